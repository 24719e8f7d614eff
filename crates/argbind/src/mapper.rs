//! Partitioned tokens → converted values on specification properties.

use crate::convert::TypeConverter;
use crate::error::{Error, NameInfo};
use crate::specification::{Specification, SpecificationProperty, TargetType};
use crate::token::Token;
use crate::value::Value;
use tracing::{debug, trace};

/// One option occurrence: the name as typed and the raw values it owns.
pub type KeyValuePair = (String, Vec<String>);

/// Group a bucket into name → values pairs. Each name token starts a new
/// pair; following value tokens belong to it.
fn group(tokens: &[Token]) -> Vec<KeyValuePair> {
    let mut pairs: Vec<KeyValuePair> = Vec::new();
    for token in tokens {
        if token.is_name() {
            pairs.push((token.text().to_string(), Vec::new()));
        } else if let Some((_, values)) = pairs.last_mut() {
            values.push(token.text().to_string());
        }
    }
    pairs
}

/// Switch occurrences: no value, or one explicit `true`/`false`.
pub fn for_switch(tokens: &[Token]) -> Vec<KeyValuePair> {
    group(tokens)
}

/// Scalar occurrences: one value, or none when the argument list ended.
pub fn for_scalar(tokens: &[Token]) -> Vec<KeyValuePair> {
    group(tokens)
}

/// Sequence occurrences: every value the partitioner attached.
pub fn for_sequence(tokens: &[Token]) -> Vec<KeyValuePair> {
    group(tokens)
}

/// Bind option properties from their occurrences.
///
/// The last occurrence of a switch or scalar wins; sequence occurrences are
/// concatenated in order. Positional properties pass through unchanged.
pub fn map_options<'a>(
    properties: &[SpecificationProperty<'a>],
    pairs: &[KeyValuePair],
    converter: &TypeConverter<'_>,
    case_sensitive: bool,
) -> (Vec<SpecificationProperty<'a>>, Vec<Error>) {
    let mut errors = Vec::new();
    let mapped = properties
        .iter()
        .map(|prop| {
            let Specification::Option(spec) = prop.specification() else {
                return prop.clone();
            };
            let occurrences: Vec<&Vec<String>> = pairs
                .iter()
                .filter(|(name, _)| spec.matches_name(name, case_sensitive))
                .map(|(_, values)| values)
                .collect();
            if occurrences.is_empty() {
                return prop.clone();
            }
            trace!(property = prop.property().name(), occurrences = occurrences.len(), "mapping option");

            let converted = match spec.target_type() {
                TargetType::Switch if spec.is_flag_counter() => occurrences
                    .iter()
                    .map(|values| switch_state(values, converter))
                    .collect::<Result<Vec<bool>, String>>()
                    .map(|states| Value::Count(states.iter().filter(|on| **on).count() as u32)),
                TargetType::Switch => match occurrences.last() {
                    Some(values) => switch_state(values, converter).map(Value::Bool),
                    None => return prop.clone(),
                },
                TargetType::Scalar => match occurrences.last().and_then(|values| values.first()) {
                    Some(raw) => converter.convert_scalar(raw, spec.value_type()),
                    None => {
                        errors.push(Error::MissingValueOption(spec.name_info()));
                        return prop.clone();
                    }
                },
                TargetType::Sequence => {
                    let raws: Vec<String> = occurrences.iter().flat_map(|v| v.iter().cloned()).collect();
                    if raws.is_empty() {
                        errors.push(Error::MissingValueOption(spec.name_info()));
                        return prop.clone();
                    }
                    converter.convert_sequence(&raws, spec.value_type())
                }
            };
            match converted {
                Ok(value) => prop.with_value(value),
                Err(reason) => {
                    debug!(property = prop.property().name(), %reason, "conversion failed");
                    errors.push(Error::BadFormatConversion(spec.name_info()));
                    prop.clone()
                }
            }
        })
        .collect();
    (mapped, errors)
}

/// A bare switch is on; `--switch=false` turns it off.
fn switch_state(values: &[String], converter: &TypeConverter<'_>) -> Result<bool, String> {
    match values.first() {
        None => Ok(true),
        Some(raw) => match converter.convert_scalar(raw, &crate::specification::ValueType::Bool)? {
            Value::Bool(b) => Ok(b),
            other => Err(format!("not a switch state: {}", other)),
        },
    }
}

/// Bind positional properties from the value bucket, in index order.
///
/// Each property takes up to its maximum from the front of the remaining
/// values; once the values run out, later properties stay unbound. Values
/// left after the last property are ignored.
pub fn map_values<'a>(
    properties: &[SpecificationProperty<'a>],
    values: &[String],
    converter: &TypeConverter<'_>,
) -> (Vec<SpecificationProperty<'a>>, Vec<Error>) {
    let mut mapped = properties.to_vec();
    let mut errors = Vec::new();

    let mut order: Vec<usize> = (0..properties.len())
        .filter(|&i| properties[i].specification().is_value())
        .collect();
    order.sort_by_key(|&i| properties[i].specification().as_value().map(|v| v.index()));

    let mut rest = values;
    for i in order {
        if rest.is_empty() {
            break;
        }
        let Some(spec) = properties[i].specification().as_value() else {
            continue;
        };
        let n = spec.count_of_max_values().unwrap_or(rest.len()).min(rest.len());
        if n == 0 {
            continue;
        }
        let (taken, tail) = rest.split_at(n);
        rest = tail;

        let converted = match spec.target_type() {
            TargetType::Sequence => converter.convert_sequence(taken, spec.value_type()),
            _ => converter.convert_scalar(&taken[0], spec.value_type()),
        };
        match converted {
            Ok(value) => mapped[i] = properties[i].with_value(value),
            Err(reason) => {
                debug!(property = properties[i].property().name(), %reason, "conversion failed");
                errors.push(Error::BadFormatConversion(NameInfo::EMPTY));
            }
        }
    }
    if !rest.is_empty() {
        debug!(ignored = rest.len(), "positional values left unbound");
    }
    (mapped, errors)
}
