//! Argument vector → token stream.
//!
//! Mirrors the classic getopt conventions:
//!
//! - `--name` and `--name=value`; a scalar option without `=` takes the
//!   next argument as its value, whatever it looks like
//! - `-abc` clusters of short switches, `-ifile` / `-i=file` inline values
//! - `--` ends option processing when dash-dash is enabled
//! - `-` and negative numbers that are not option names are values

use crate::error::Error;
use crate::lookup::{NameLookup, NameLookupResult};
use crate::settings::ParserSettings;
use crate::token::Token;
use tracing::{debug, trace};

/// Output of [`tokenize`]: every token that could be produced, plus the
/// errors met on the way. Tokenization never stops at the first error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub errors: Vec<Error>,
}

impl Tokenized {
    pub fn into_result(self) -> Result<Vec<Token>, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

/// Tokenize `args` against the options known to `lookup`.
///
/// Unknown names are reported as `UnknownOptionError` (unless unknown
/// arguments are ignored) and dropped, together with any `=value` attached
/// to them.
pub fn tokenize(args: &[String], lookup: &NameLookup, settings: &ParserSettings) -> Tokenized {
    let mut out = Tokenized::default();
    let mut forced = false;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        i += 1;

        if forced {
            out.tokens.push(Token::forced_value(arg.as_str()));
            continue;
        }

        if arg == "--" {
            if settings.enable_dash_dash() {
                forced = true;
            } else {
                out.tokens.push(Token::value(arg.as_str()));
            }
            continue;
        }

        if let Some(rest) = arg.strip_prefix("--") {
            i += tokenize_long(rest, arg, args.get(i), lookup, settings, &mut out);
            continue;
        }

        if arg.len() > 1 && arg.starts_with('-') {
            let rest = &arg[1..];
            let negative_number = rest.starts_with(|c: char| c.is_ascii_digit())
                && rest.chars().next().map(|c| lookup.lookup(&c.to_string()))
                    == Some(NameLookupResult::NoOptionFound);
            if !negative_number {
                i += tokenize_short(rest, arg, args.get(i), lookup, settings, &mut out);
                continue;
            }
        }

        out.tokens.push(Token::value(arg.as_str()));
        if settings.posixly_correct() {
            trace!(value = %arg, "first operand ends option processing");
            forced = true;
        }
    }

    debug!(args = args.len(), tokens = out.tokens.len(), errors = out.errors.len(), "tokenized");
    out
}

/// `rest` is `arg` without its `--`. Returns how many following arguments
/// were consumed.
fn tokenize_long(
    rest: &str,
    arg: &str,
    next: Option<&String>,
    lookup: &NameLookup,
    settings: &ParserSettings,
    out: &mut Tokenized,
) -> usize {
    let (name, inline) = match rest.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (rest, None),
    };
    if !is_valid_name(name) {
        out.errors.push(Error::BadFormatToken(arg.to_string()));
        return 0;
    }

    let kind = lookup.lookup(name);
    trace!(name, ?kind, "long option");
    match kind {
        NameLookupResult::NoOptionFound => {
            if !settings.ignore_unknown_arguments() {
                out.errors.push(Error::UnknownOption(name.to_string()));
            }
            0
        }
        NameLookupResult::ScalarOptionFound => {
            out.tokens.push(Token::name(name));
            match (inline, next) {
                (Some(value), _) => {
                    out.tokens.push(Token::explicit_value(value));
                    0
                }
                (None, Some(value)) => {
                    out.tokens.push(Token::explicit_value(value.as_str()));
                    1
                }
                (None, None) => 0,
            }
        }
        NameLookupResult::BooleanOptionFound | NameLookupResult::SequenceOptionFound => {
            out.tokens.push(Token::name(name));
            if let Some(value) = inline {
                out.tokens.push(Token::explicit_value(value));
            }
            0
        }
    }
}

/// `rest` is `arg` without its `-`. Returns how many following arguments
/// were consumed.
fn tokenize_short(
    rest: &str,
    arg: &str,
    next: Option<&String>,
    lookup: &NameLookup,
    settings: &ParserSettings,
    out: &mut Tokenized,
) -> usize {
    for (pos, c) in rest.char_indices() {
        if c.is_whitespace() || c == '=' || c == '-' {
            out.errors.push(Error::BadFormatToken(arg.to_string()));
            return 0;
        }
        let name = c.to_string();
        let remainder = &rest[pos + c.len_utf8()..];

        match lookup.lookup(&name) {
            NameLookupResult::NoOptionFound => {
                if pos > 0 && !settings.getopt_mode() {
                    // Not an option: the rest of the cluster is a value.
                    out.tokens.push(Token::value(&rest[pos..]));
                    return 0;
                }
                if !settings.ignore_unknown_arguments() {
                    out.errors.push(Error::UnknownOption(name));
                }
                if !settings.getopt_mode() {
                    // Unknown leading name: the whole cluster goes with it.
                    return 0;
                }
            }
            NameLookupResult::BooleanOptionFound => out.tokens.push(Token::name(name)),
            kind @ (NameLookupResult::ScalarOptionFound | NameLookupResult::SequenceOptionFound) => {
                out.tokens.push(Token::name(name));
                if !remainder.is_empty() {
                    let value = remainder.strip_prefix('=').unwrap_or(remainder);
                    out.tokens.push(Token::explicit_value(value));
                    return 0;
                }
                if kind == NameLookupResult::ScalarOptionFound {
                    if let Some(value) = next {
                        out.tokens.push(Token::explicit_value(value.as_str()));
                        return 1;
                    }
                }
                return 0;
            }
        }
    }
    0
}

/// Option names are non-empty, do not start with `-` and hold no whitespace.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-') && !name.chars().any(char::is_whitespace)
}

/// Split the value that directly follows a separator-declaring option name
/// into one token per item.
pub fn explode_option_list(tokens: Vec<Token>, lookup: &NameLookup) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut separator: Option<char> = None;

    for token in tokens {
        if token.is_name() {
            separator = lookup.having_separator(token.text());
            out.push(token);
            continue;
        }
        match separator.take() {
            Some(sep) if !token.is_forced() => {
                out.extend(token.text().split(sep).map(|part| token.with_text(part)));
            }
            _ => out.push(token),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{OptionSpecification, TypeDescriptor, ValueType};
    use pretty_assertions::assert_eq;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    fn lookup(settings: &ParserSettings) -> NameLookup {
        let d = TypeDescriptor::builder("opts")
            .option("a", OptionSpecification::switch().short('a').long("aa"))
            .option("x", OptionSpecification::switch().short('x'))
            .option("y", OptionSpecification::switch().short('y'))
            .option("s", OptionSpecification::scalar(ValueType::String).short('s').long("stringvalue"))
            .option("i", OptionSpecification::sequence(ValueType::Int).short('i').long("ints"))
            .option("c", OptionSpecification::sequence(ValueType::String).long("csv").separator(','))
            .build()
            .unwrap();
        NameLookup::new(&d, settings)
    }

    fn run(a: &[&str], settings: &ParserSettings) -> Tokenized {
        let l = lookup(settings);
        let t = tokenize(&args(a), &l, settings);
        Tokenized { tokens: explode_option_list(t.tokens, &l), errors: t.errors }
    }

    #[test]
    fn long_with_equals_and_inline_short_value() {
        let s = ParserSettings::default();
        let t = run(&["--stringvalue=strvalue", "-i1", "2", "3"], &s);
        assert_eq!(
            t.tokens,
            vec![
                Token::name("stringvalue"),
                Token::value("strvalue"),
                Token::name("i"),
                Token::value("1"),
                Token::value("2"),
                Token::value("3"),
            ]
        );
        assert!(t.tokens[1].is_explicit());
        assert!(t.errors.is_empty());
    }

    #[test]
    fn dash_dash_forces_values() {
        let s = ParserSettings::builder().enable_dash_dash(true).build();
        let t = run(&["--aa", "--", " b", "-x", "--ints"], &s);
        assert_eq!(
            t.tokens,
            vec![Token::name("aa"), Token::value(" b"), Token::value("-x"), Token::value("--ints")]
        );
        assert!(t.tokens[1..].iter().all(Token::is_forced));
    }

    #[test]
    fn dash_dash_is_plain_value_when_disabled() {
        let t = run(&["--", "x"], &ParserSettings::default());
        assert_eq!(t.tokens, vec![Token::value("--"), Token::value("x")]);
        assert!(!t.tokens[0].is_forced());
    }

    #[test]
    fn scalar_consumes_next_argument() {
        let s = ParserSettings::builder().enable_dash_dash(true).build();
        let t = run(&["--stringvalue", "--help"], &s);
        assert_eq!(t.tokens, vec![Token::name("stringvalue"), Token::value("--help")]);
        let t = run(&["-s", "--"], &s);
        assert_eq!(t.tokens, vec![Token::name("s"), Token::value("--")]);
        let t = run(&["--stringvalue=--"], &s);
        assert_eq!(t.tokens, vec![Token::name("stringvalue"), Token::value("--")]);
    }

    #[test]
    fn short_clusters() {
        let s = ParserSettings::default();
        let t = run(&["-axy"], &s);
        assert_eq!(t.tokens, vec![Token::name("a"), Token::name("x"), Token::name("y")]);
        let t = run(&["-axsfoo"], &s);
        assert_eq!(
            t.tokens,
            vec![Token::name("a"), Token::name("x"), Token::name("s"), Token::value("foo")]
        );
        let t = run(&["-s=foo"], &s);
        assert_eq!(t.tokens, vec![Token::name("s"), Token::value("foo")]);
    }

    #[test]
    fn unknown_in_cluster() {
        let s = ParserSettings::default();
        let t = run(&["-aqz"], &s);
        assert_eq!(t.tokens, vec![Token::name("a"), Token::value("qz")]);
        assert!(t.errors.is_empty());

        let s = ParserSettings::builder().getopt_mode(true).build();
        let t = run(&["-aqx"], &s);
        assert_eq!(t.tokens, vec![Token::name("a"), Token::name("x")]);
        assert_eq!(t.errors, vec![Error::UnknownOption("q".into())]);
    }

    #[test]
    fn unknown_leading_name_drops_the_cluster() {
        let s = ParserSettings::builder().ignore_unknown_arguments(true).build();
        let t = run(&["-qzz", "-x"], &s);
        assert_eq!(t.tokens, vec![Token::name("x")]);
        assert!(t.errors.is_empty());

        let t = run(&["-qzz"], &ParserSettings::default());
        assert!(t.tokens.is_empty());
        assert_eq!(t.errors, vec![Error::UnknownOption("q".into())]);

        let s = ParserSettings::builder().getopt_mode(true).build();
        let t = run(&["-qx"], &s);
        assert_eq!(t.tokens, vec![Token::name("x")]);
        assert_eq!(t.errors, vec![Error::UnknownOption("q".into())]);
    }

    #[test]
    fn values_that_look_like_options() {
        let s = ParserSettings::default();
        let t = run(&["-", "-5", "file"], &s);
        assert_eq!(t.tokens, vec![Token::value("-"), Token::value("-5"), Token::value("file")]);
    }

    #[test]
    fn bad_format_and_unknown_continue() {
        let s = ParserSettings::default();
        let t = run(&["--bad name=x", "--nope=1", "-x"], &s);
        assert_eq!(t.tokens, vec![Token::name("x")]);
        assert_eq!(
            t.errors,
            vec![Error::BadFormatToken("--bad name=x".into()), Error::UnknownOption("nope".into())]
        );
        assert!(t.clone().into_result().is_err());

        let s = ParserSettings::builder().ignore_unknown_arguments(true).build();
        let t = run(&["--nope=1", "-x"], &s);
        assert_eq!(t.into_result(), Ok(vec![Token::name("x")]));
    }

    #[test]
    fn posixly_correct_stops_at_first_operand() {
        let s = ParserSettings::builder().posixly_correct(true).build();
        let t = run(&["-x", "file", "-y"], &s);
        assert_eq!(t.tokens, vec![Token::name("x"), Token::value("file"), Token::value("-y")]);
    }

    #[test]
    fn explodes_separated_lists() {
        let s = ParserSettings::default();
        let t = run(&["--csv=a,b", "c,d", "--csv", "e,f"], &s);
        assert_eq!(
            t.tokens,
            vec![
                Token::name("csv"),
                Token::value("a"),
                Token::value("b"),
                Token::value("c,d"),
                Token::name("csv"),
                Token::value("e"),
                Token::value("f"),
            ]
        );
    }
}
