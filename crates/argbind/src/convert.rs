//! String → [`Value`] conversion.
//!
//! Primitive types are parsed directly using the configured [`Culture`];
//! enums accept a member name or its numeric value; anything else goes
//! through a [`ConverterRegistry`] entry.

use crate::settings::Culture;
use crate::specification::{EnumType, ValueType};
use crate::value::{CustomValue, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

type ConvertFn = dyn Fn(&str) -> Result<Value, String> + Send + Sync;

/// Named converters for [`ValueType::Custom`] destinations.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<ConvertFn>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an explicit conversion function.
    pub fn register<F>(mut self, name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.converters.insert(name.into(), Arc::new(convert));
        self
    }

    /// Register any [`FromStr`] type; the parsed object is kept inside a
    /// [`Value::Custom`] along with its source text.
    pub fn register_from_str<T>(self, name: impl Into<String>) -> Self
    where
        T: FromStr + Send + Sync + 'static,
        T::Err: fmt::Display,
    {
        self.register(name, |raw: &str| {
            raw.parse::<T>()
                .map(|v| Value::Custom(CustomValue::new(raw, v)))
                .map_err(|e| e.to_string())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Arc<ConvertFn>> {
        self.converters.get(name)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.converters.keys().collect();
        names.sort();
        f.debug_struct("ConverterRegistry").field("converters", &names).finish()
    }
}

/// Converts raw argument text for one parse.
#[derive(Debug, Clone, Copy)]
pub struct TypeConverter<'a> {
    culture: &'a Culture,
    case_insensitive_enums: bool,
    registry: &'a ConverterRegistry,
}

impl<'a> TypeConverter<'a> {
    pub fn new(culture: &'a Culture, case_insensitive_enums: bool, registry: &'a ConverterRegistry) -> Self {
        Self { culture, case_insensitive_enums, registry }
    }

    /// Convert one raw string. The error is a human-readable reason, used
    /// for logging only; callers report `BadFormatConversionError`.
    pub fn convert_scalar(&self, raw: &str, value_type: &ValueType) -> Result<Value, String> {
        match value_type {
            ValueType::String => Ok(Value::Str(raw.to_string())),
            ValueType::Bool => parse_bool(raw).map(Value::Bool),
            ValueType::Int => self.parse_int(raw).map(Value::Int),
            ValueType::UInt => self.parse_uint(raw).map(Value::UInt),
            ValueType::Float => self.parse_float(raw).map(Value::Float),
            ValueType::Char => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(format!("invalid type (char): {}", raw)),
                }
            }
            ValueType::Enum(e) => self.parse_enum(raw, e),
            ValueType::Custom(name) => match self.registry.get(name) {
                Some(convert) => convert(raw),
                None => Err(format!("unknown type: {}", name)),
            },
        }
    }

    /// Convert every raw string; the first failure fails the whole sequence.
    pub fn convert_sequence(&self, raws: &[String], value_type: &ValueType) -> Result<Value, String> {
        raws.iter()
            .map(|raw| self.convert_scalar(raw, value_type))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    fn parse_int(&self, raw: &str) -> Result<i64, String> {
        if !is_integer_text(raw) {
            return Err(format!("invalid type (int): {}", raw));
        }
        raw.parse::<i64>().map_err(|e| format!("invalid type (int): {}: {}", raw, e))
    }

    fn parse_uint(&self, raw: &str) -> Result<u64, String> {
        if !is_integer_text(raw) || raw.starts_with('-') {
            return Err(format!("invalid type (uint): {}", raw));
        }
        raw.parse::<u64>().map_err(|e| format!("invalid type (uint): {}: {}", raw, e))
    }

    fn parse_float(&self, raw: &str) -> Result<f64, String> {
        let mut text = String::with_capacity(raw.len());
        for c in raw.chars() {
            if Some(c) == self.culture.group_separator() && c != self.culture.decimal_separator() {
                continue;
            }
            if c == self.culture.decimal_separator() {
                text.push('.');
            } else if c == '.' {
                // A '.' that is not the culture's decimal separator is foreign.
                return Err(format!("invalid type (float): {}", raw));
            } else {
                text.push(c);
            }
        }
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            return Err(format!("invalid type (float): {}", raw));
        }
        text.parse::<f64>().map_err(|_| format!("invalid type (float): {}", raw))
    }

    fn parse_enum(&self, raw: &str, enum_type: &EnumType) -> Result<Value, String> {
        let found = enum_type.by_name(raw, self.case_insensitive_enums).or_else(|| {
            if is_integer_text(raw) {
                raw.parse::<i64>().ok().and_then(|n| enum_type.by_value(n))
            } else {
                None
            }
        });
        match found {
            Some((name, value)) => Ok(Value::Enum { name: name.to_string(), value }),
            None => Err(format!("not a member of the enumeration: {}", raw)),
        }
    }
}

/// Only "true" and "false", in any case.
fn parse_bool(raw: &str) -> Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("invalid type (bool): {}", raw))
    }
}

/// Optional sign followed by ASCII digits.
fn is_integer_text(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
