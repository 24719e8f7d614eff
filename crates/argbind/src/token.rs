//! Lexical tokens produced from the raw argument vector.

use std::fmt;

/// Whether a token names an option or carries a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Name,
    Value,
}

/// A single lexical unit of the argument vector.
///
/// Equality compares tag and text only; the `explicit` and `forced` markers
/// are provenance and do not take part in it.
#[derive(Debug, Clone)]
pub struct Token {
    tag: Tag,
    text: String,
    explicit: bool,
    forced: bool,
}

impl Token {
    pub fn name(text: impl Into<String>) -> Self {
        Self { tag: Tag::Name, text: text.into(), explicit: false, forced: false }
    }

    pub fn value(text: impl Into<String>) -> Self {
        Self { tag: Tag::Value, text: text.into(), explicit: false, forced: false }
    }

    /// A value bound to the preceding name by `--name=value` syntax or taken
    /// as the required argument of a scalar option. Never reinterpreted as
    /// `--` or as an option.
    pub fn explicit_value(text: impl Into<String>) -> Self {
        Self { tag: Tag::Value, text: text.into(), explicit: true, forced: false }
    }

    /// A value that followed the `--` separator.
    pub fn forced_value(text: impl Into<String>) -> Self {
        Self { tag: Tag::Value, text: text.into(), explicit: false, forced: true }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_name(&self) -> bool {
        self.tag == Tag::Name
    }

    pub fn is_value(&self) -> bool {
        self.tag == Tag::Value
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Same token with a different text, keeping the provenance markers.
    pub(crate) fn with_text(&self, text: impl Into<String>) -> Self {
        Self { text: text.into(), ..self.clone() }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.text == other.text
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Tag::Name => write!(f, "Name({})", self.text),
            Tag::Value if self.explicit => write!(f, "Value({}, explicit)", self.text),
            Tag::Value => write!(f, "Value({})", self.text),
        }
    }
}
