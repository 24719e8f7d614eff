//! Binding targets: the types a parse writes into and an unparse reads from.

use crate::error::{BindError, DeclarationError};
use crate::specification::TypeDescriptor;
use crate::value::{FromValue, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// Read access to property values, used by the unparser.
pub trait PropertySource {
    /// Current value of `property`; `None` when it is not set.
    fn value(&self, property: &str) -> Option<Value>;
}

/// A statically described target type.
///
/// ```
/// use argbind::{BindError, DeclarationError, OptionSpecification, PropertySource,
///               Target, ToValue, TypeDescriptor, Value, ValueType};
///
/// #[derive(Default)]
/// struct Opts {
///     name: String,
/// }
///
/// impl Target for Opts {
///     fn describe() -> Result<TypeDescriptor, DeclarationError> {
///         TypeDescriptor::builder("Opts")
///             .option("name", OptionSpecification::scalar(ValueType::String).long("name"))
///             .build()
///     }
///
///     fn bind(&mut self, property: &str, value: Value) -> Result<(), BindError> {
///         match property {
///             "name" => self.name = value.into_typed()?,
///             other => return Err(BindError::unknown_property(other)),
///         }
///         Ok(())
///     }
/// }
///
/// impl PropertySource for Opts {
///     fn value(&self, property: &str) -> Option<Value> {
///         match property {
///             "name" => self.name.to_value(),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Target: Default + PropertySource {
    fn describe() -> Result<TypeDescriptor, DeclarationError>;

    /// Store one bound value. Errors are reported as `SetValueExceptionError`.
    fn bind(&mut self, property: &str, value: Value) -> Result<(), BindError>;
}

/// Property values of one successful parse, in declaration order.
///
/// Unbound properties hold their declared default, `false` for switches,
/// `0` for counters and an empty list for sequences; unbound scalars without
/// a default are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bindings {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verb: Option<String>,
    values: IndexMap<String, Value>,
}

impl Bindings {
    pub fn new(type_name: impl Into<String>, verb: Option<String>) -> Self {
        Self { type_name: type_name.into(), verb, values: IndexMap::new() }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn verb(&self) -> Option<&str> {
        self.verb.as_deref()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: Value) {
        self.values.insert(property.into(), value);
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.values.get(property)
    }

    /// Typed view of one property; `Ok(None)` when it is absent.
    pub fn get_as<T: FromValue>(&self, property: &str) -> Result<Option<T>, BindError> {
        self.values.get(property).cloned().map(T::from_value).transpose()
    }

    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for Bindings {
    fn value(&self, property: &str) -> Option<Value> {
        self.values.get(property).cloned()
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_insertion_order_and_types() {
        let mut b = Bindings::new("opts", None);
        b.insert("z", Value::Int(3));
        b.insert("a", Value::Str("x".into()));
        let keys: Vec<&str> = b.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(b.get_as::<u8>("z").unwrap(), Some(3));
        assert_eq!(b.get_as::<u8>("missing").unwrap(), None);
        assert!(b.get_as::<bool>("a").is_err());
        assert_eq!(b.value("a"), Some(Value::Str("x".into())));
    }

    #[test]
    fn serializes_as_object() {
        let mut b = Bindings::new("opts", Some("commit".into()));
        b.insert("verbose", Value::Bool(true));
        assert_eq!(
            serde_json::to_string(&b).unwrap(),
            r#"{"type":"opts","verb":"commit","values":{"verbose":true}}"#
        );
    }
}
