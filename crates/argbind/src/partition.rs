//! Token stream → four buckets by target cardinality.

use crate::lookup::NameLookup;
use crate::specification::TargetType;
use crate::token::Token;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Tokens split by what they feed.
///
/// Option buckets keep each name token followed by the values it owns, so a
/// bucket can be regrouped with the helpers in [`crate::mapper`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitioned {
    pub switches: Vec<Token>,
    pub scalars: Vec<Token>,
    pub sequences: Vec<Token>,
    /// Positional candidates: values no option claimed, overflow past a
    /// sequence's `max`, and everything after `--`.
    pub values: Vec<Token>,
}

pub fn partition(tokens: &[Token], lookup: &NameLookup) -> Partitioned {
    let mut out = Partitioned::default();
    // Values taken so far per sequence option, across occurrences.
    let mut taken: HashMap<String, usize> = HashMap::new();
    let mut i = 0;

    let claimable = |t: Option<&Token>| t.is_some_and(|t| t.is_value() && !t.is_forced());

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;
        if token.is_value() {
            out.values.push(token.clone());
            continue;
        }

        let Some(info) = lookup.find_type_descriptor(token.text()) else {
            trace!(name = token.text(), "unresolved name dropped");
            continue;
        };
        match info.target_type {
            TargetType::Switch => {
                out.switches.push(token.clone());
                if claimable(tokens.get(i)) && tokens[i].is_explicit() {
                    out.switches.push(tokens[i].clone());
                    i += 1;
                }
            }
            TargetType::Scalar => {
                out.scalars.push(token.clone());
                if claimable(tokens.get(i)) {
                    out.scalars.push(tokens[i].clone());
                    i += 1;
                }
            }
            TargetType::Sequence => {
                out.sequences.push(token.clone());
                let key = lookup
                    .find(token.text())
                    .map(|spec| spec.unique_name())
                    .unwrap_or_else(|| token.text().to_string());
                let count = taken.entry(key).or_insert(0);
                while claimable(tokens.get(i)) && info.max.map_or(true, |max| *count < max) {
                    out.sequences.push(tokens[i].clone());
                    *count += 1;
                    i += 1;
                }
                if claimable(tokens.get(i)) {
                    trace!(name = token.text(), max = ?info.max, "sequence full; overflow becomes positional");
                }
            }
        }
    }

    debug!(
        switches = out.switches.len(),
        scalars = out.scalars.len(),
        sequences = out.sequences.len(),
        values = out.values.len(),
        "partitioned"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ParserSettings;
    use crate::specification::{OptionSpecification, TypeDescriptor, ValueType};
    use pretty_assertions::assert_eq;

    fn lookup() -> NameLookup {
        let d = TypeDescriptor::builder("opts")
            .option("v", OptionSpecification::switch().short('v'))
            .option("s", OptionSpecification::scalar(ValueType::String).short('s'))
            .option("i", OptionSpecification::sequence(ValueType::Int).short('i').long("ints").min(3).max(4))
            .build()
            .unwrap();
        NameLookup::new(&d, &ParserSettings::default())
    }

    #[test]
    fn buckets_by_cardinality() {
        let tokens = vec![
            Token::name("v"),
            Token::value("pos"),
            Token::name("s"),
            Token::explicit_value("x"),
            Token::name("i"),
            Token::value("1"),
            Token::value("2"),
        ];
        let p = partition(&tokens, &lookup());
        assert_eq!(p.switches, vec![Token::name("v")]);
        assert_eq!(p.scalars, vec![Token::name("s"), Token::value("x")]);
        assert_eq!(p.sequences, vec![Token::name("i"), Token::value("1"), Token::value("2")]);
        assert_eq!(p.values, vec![Token::value("pos")]);
    }

    #[test]
    fn switch_takes_only_explicit_value() {
        let tokens = vec![Token::name("v"), Token::explicit_value("false"), Token::name("v"), Token::value("f")];
        let p = partition(&tokens, &lookup());
        assert_eq!(p.switches, vec![Token::name("v"), Token::value("false"), Token::name("v")]);
        assert_eq!(p.values, vec![Token::value("f")]);
    }

    #[test]
    fn sequence_overflow_is_positional() {
        let tokens: Vec<Token> = std::iter::once(Token::name("i"))
            .chain((1..=5).map(|n| Token::value(n.to_string())))
            .collect();
        let p = partition(&tokens, &lookup());
        assert_eq!(p.sequences.len(), 5);
        assert_eq!(p.values, vec![Token::value("5")]);
    }

    #[test]
    fn max_counts_across_occurrences() {
        let tokens = vec![
            Token::name("i"),
            Token::value("1"),
            Token::value("2"),
            Token::name("v"),
            Token::name("ints"),
            Token::value("3"),
            Token::value("4"),
            Token::value("5"),
        ];
        let p = partition(&tokens, &lookup());
        assert_eq!(
            p.sequences,
            vec![
                Token::name("i"),
                Token::value("1"),
                Token::value("2"),
                Token::name("ints"),
                Token::value("3"),
                Token::value("4"),
            ]
        );
        assert_eq!(p.values, vec![Token::value("5")]);
    }

    #[test]
    fn forced_values_are_never_claimed() {
        let tokens = vec![Token::name("i"), Token::forced_value("1")];
        let p = partition(&tokens, &lookup());
        assert_eq!(p.sequences, vec![Token::name("i")]);
        assert_eq!(p.values, vec![Token::value("1")]);
    }
}
