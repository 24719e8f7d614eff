//! Bound values and their conversion into and out of concrete Rust types.

use crate::error::BindError;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// A converted argument value, ready to be written to a target property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    /// Enum member: canonical member name plus its numeric value.
    Enum { name: String, value: i64 },
    /// Occurrence count of a flag counter.
    Count(u32),
    Custom(CustomValue),
    List(Vec<Value>),
}

impl Value {
    /// Convert into a concrete type.
    pub fn into_typed<T: FromValue>(self) -> Result<T, BindError> {
        T::from_value(self)
    }

    /// Name of the variant, used in bind error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Enum { .. } => "enum",
            Value::Count(_) => "count",
            Value::Custom(_) => "custom",
            Value::List(_) => "list",
        }
    }

    /// True for values an unparser treats as "nothing to emit".
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
            Value::Enum { name, .. } => f.write_str(name),
            Value::Count(n) => write!(f, "{}", n),
            Value::Custom(c) => f.write_str(c.text()),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Enum { name, .. } => serializer.serialize_str(name),
            Value::Count(n) => serializer.serialize_u32(*n),
            Value::Custom(c) => serializer.serialize_str(c.text()),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Value produced by a registered custom converter.
///
/// Keeps the source text for display and unparsing; the parsed object is
/// recovered with [`CustomValue::downcast_ref`].
#[derive(Clone)]
pub struct CustomValue {
    text: String,
    inner: Arc<dyn Any + Send + Sync>,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync>(text: impl Into<String>, value: T) -> Self {
        Self { text: text.into(), inner: Arc::new(value) }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomValue").field(&self.text).finish()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

// ── Value → Rust ────────────────────────────────────────────────

/// Conversion from a bound [`Value`] into a property type.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, BindError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, BindError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Count(n) => Ok(n > 0),
            other => Err(BindError::type_mismatch("bool", &other)),
        }
    }
}

macro_rules! integer_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: Value) -> Result<Self, BindError> {
                let out = match &value {
                    Value::Int(n) => <$t>::try_from(*n).ok(),
                    Value::UInt(n) => <$t>::try_from(*n).ok(),
                    Value::Count(n) => <$t>::try_from(*n).ok(),
                    Value::Enum { value: n, .. } => <$t>::try_from(*n).ok(),
                    _ => return Err(BindError::type_mismatch(stringify!($t), &value)),
                };
                out.ok_or_else(|| BindError::new(format!("{} is out of range for {}", value, stringify!($t))))
            }
        }
    )*};
}

integer_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(n) => Ok(n as f64),
            Value::UInt(n) => Ok(n as f64),
            other => Err(BindError::type_mismatch("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, BindError> {
        f64::from_value(value).map(|x| x as f32)
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Char(c) => Ok(c),
            other => Err(BindError::type_mismatch("char", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::Str(s) => Ok(s),
            Value::Char(c) => Ok(c.to_string()),
            Value::Enum { name, .. } => Ok(name),
            Value::Custom(c) => Ok(c.text().to_string()),
            other => Err(BindError::type_mismatch("string", &other)),
        }
    }
}

impl FromValue for PathBuf {
    fn from_value(value: Value) -> Result<Self, BindError> {
        String::from_value(value).map(PathBuf::from)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, BindError> {
        T::from_value(value).map(Some)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, BindError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(BindError::type_mismatch("list", &other)),
        }
    }
}

// ── Rust → Value ────────────────────────────────────────────────

/// Read side of a property, used when unparsing an instance.
///
/// `None` means "not set" and is never emitted.
pub trait ToValue {
    fn to_value(&self) -> Option<Value>;
}

impl ToValue for Value {
    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }
}

macro_rules! signed_to_value {
    ($($t:ty),*) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Option<Value> {
                Some(Value::Int(i64::from(*self)))
            }
        }
    )*};
}

macro_rules! unsigned_to_value {
    ($($t:ty),*) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Option<Value> {
                Some(Value::UInt(u64::from(*self)))
            }
        }
    )*};
}

signed_to_value!(i8, i16, i32, i64);
unsigned_to_value!(u8, u16, u32, u64);

impl ToValue for usize {
    fn to_value(&self) -> Option<Value> {
        Some(Value::UInt(*self as u64))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(*self))
    }
}

impl ToValue for char {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Char(*self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Str(self.clone()))
    }
}

impl ToValue for str {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Str(self.to_string()))
    }
}

impl ToValue for PathBuf {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Str(self.to_string_lossy().into_owned()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Option<Value> {
        Some(Value::List(self.iter().filter_map(ToValue::to_value).collect()))
    }
}
