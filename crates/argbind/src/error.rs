//! Error taxonomy.
//!
//! [`Error`] is the recoverable, user-input side: values are accumulated in a
//! list and never thrown. [`DeclarationError`] is the programmer side: a
//! malformed specification is reported before any argument is looked at.
//! [`BindError`] is what a target's property setter returns.

use crate::value::Value;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Normalized option names, used purely for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NameInfo {
    short_name: Option<char>,
    long_names: Vec<String>,
}

impl NameInfo {
    /// Name of a positional value: it has none.
    pub const EMPTY: NameInfo = NameInfo { short_name: None, long_names: Vec::new() };

    pub fn new(short_name: Option<char>, long_names: Vec<String>) -> Self {
        Self { short_name, long_names }
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_names.first().map(String::as_str)
    }

    pub fn long_names(&self) -> &[String] {
        &self.long_names
    }

    pub fn is_empty(&self) -> bool {
        self.short_name.is_none() && self.long_names.is_empty()
    }

    /// "s, long", "s" or "long".
    pub fn name_text(&self) -> String {
        match (self.short_name, self.long_name()) {
            (Some(s), Some(l)) => format!("{}, {}", s, l),
            (Some(s), None) => s.to_string(),
            (None, Some(l)) => l.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for NameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_text())
    }
}

/// Discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    BadFormatTokenError,
    UnknownOptionError,
    MissingValueOptionError,
    MissingRequiredOptionError,
    MutuallyExclusiveSetError,
    BadFormatConversionError,
    SequenceOutOfRangeError,
    RepeatedOptionError,
    NoVerbSelectedError,
    BadVerbSelectedError,
    HelpRequestedError,
    HelpVerbRequestedError,
    VersionRequestedError,
    SetValueExceptionError,
    InvalidAttributeConfigurationError,
    MissingGroupOptionError,
    GroupOptionAmbiguityError,
    MultipleDefaultVerbsError,
}

/// A recoverable parse error. `Display` renders the user-facing sentence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Token '{0}' is not recognized.")]
    BadFormatToken(String),

    #[error("Option '{0}' is unknown.")]
    UnknownOption(String),

    #[error("Option '{0}' has no value.")]
    MissingValueOption(NameInfo),

    #[error("{}", missing_required(.0))]
    MissingRequiredOption(NameInfo),

    #[error("Option: '{name}' is not compatible with: {}.", quoted_names(.conflicts))]
    MutuallyExclusiveSet {
        name: NameInfo,
        set_name: String,
        conflicts: Vec<NameInfo>,
    },

    #[error("{}", bad_conversion(.0))]
    BadFormatConversion(NameInfo),

    #[error("{}", out_of_range(.0))]
    SequenceOutOfRange(NameInfo),

    #[error("Option '{0}' is defined multiple times.")]
    RepeatedOption(NameInfo),

    #[error("No verb selected.")]
    NoVerbSelected,

    #[error("Verb '{0}' is not recognized.")]
    BadVerbSelected(String),

    #[error("Help requested.")]
    HelpRequested,

    #[error("Help requested for verb '{}'.", .verb.as_deref().unwrap_or(""))]
    HelpVerbRequested {
        verb: Option<String>,
        type_name: Option<String>,
        matched: bool,
    },

    #[error("Version requested.")]
    VersionRequested,

    #[error("Error setting value to option '{name}': {error}")]
    SetValueException {
        name: NameInfo,
        error: BindError,
        value: Value,
    },

    #[error("Check if Option or Value attribute values are set properly for the given type.")]
    InvalidAttributeConfiguration,

    #[error("At least one option from group '{group}' ({}) is required.", plain_names(.names))]
    MissingGroupOption { group: String, names: Vec<NameInfo> },

    #[error("Both SetName and Group are not allowed in option: ({0})")]
    GroupOptionAmbiguity(NameInfo),

    #[error("More than one default verb is not allowed.")]
    MultipleDefaultVerbs,
}

fn missing_required(name: &NameInfo) -> String {
    if name.is_empty() {
        "A required value not bound to option name is missing.".to_string()
    } else {
        format!("Required option '{}' is missing.", name)
    }
}

fn bad_conversion(name: &NameInfo) -> String {
    if name.is_empty() {
        "A value not bound to option name is defined with a bad format.".to_string()
    } else {
        format!("Option '{}' is defined with a bad format.", name)
    }
}

fn out_of_range(name: &NameInfo) -> String {
    if name.is_empty() {
        "A sequence value not bound to option name is defined with fewer or more items than required."
            .to_string()
    } else {
        format!("A sequence option '{}' is defined with fewer or more items than required.", name)
    }
}

fn quoted_names(names: &[NameInfo]) -> String {
    names.iter().map(|n| format!("'{}'", n)).collect::<Vec<_>>().join(", ")
}

fn plain_names(names: &[NameInfo]) -> String {
    names.iter().map(NameInfo::name_text).collect::<Vec<_>>().join(", ")
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadFormatToken(_) => ErrorKind::BadFormatTokenError,
            Error::UnknownOption(_) => ErrorKind::UnknownOptionError,
            Error::MissingValueOption(_) => ErrorKind::MissingValueOptionError,
            Error::MissingRequiredOption(_) => ErrorKind::MissingRequiredOptionError,
            Error::MutuallyExclusiveSet { .. } => ErrorKind::MutuallyExclusiveSetError,
            Error::BadFormatConversion(_) => ErrorKind::BadFormatConversionError,
            Error::SequenceOutOfRange(_) => ErrorKind::SequenceOutOfRangeError,
            Error::RepeatedOption(_) => ErrorKind::RepeatedOptionError,
            Error::NoVerbSelected => ErrorKind::NoVerbSelectedError,
            Error::BadVerbSelected(_) => ErrorKind::BadVerbSelectedError,
            Error::HelpRequested => ErrorKind::HelpRequestedError,
            Error::HelpVerbRequested { .. } => ErrorKind::HelpVerbRequestedError,
            Error::VersionRequested => ErrorKind::VersionRequestedError,
            Error::SetValueException { .. } => ErrorKind::SetValueExceptionError,
            Error::InvalidAttributeConfiguration => ErrorKind::InvalidAttributeConfigurationError,
            Error::MissingGroupOption { .. } => ErrorKind::MissingGroupOptionError,
            Error::GroupOptionAmbiguity(_) => ErrorKind::GroupOptionAmbiguityError,
            Error::MultipleDefaultVerbs => ErrorKind::MultipleDefaultVerbsError,
        }
    }

    /// Help and version requests end processing and hide every other error.
    pub fn stops_processing(&self) -> bool {
        matches!(
            self,
            Error::HelpRequested | Error::HelpVerbRequested { .. } | Error::VersionRequested
        )
    }

    /// Option names carried by the error, if any.
    pub fn name_info(&self) -> Option<&NameInfo> {
        match self {
            Error::MissingValueOption(n)
            | Error::MissingRequiredOption(n)
            | Error::BadFormatConversion(n)
            | Error::SequenceOutOfRange(n)
            | Error::RepeatedOption(n)
            | Error::GroupOptionAmbiguity(n) => Some(n),
            Error::MutuallyExclusiveSet { name, .. } | Error::SetValueException { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }

    /// Raw token carried by the error, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Error::BadFormatToken(t) | Error::UnknownOption(t) | Error::BadVerbSelected(t) => {
                Some(t)
            }
            _ => None,
        }
    }
}

/// Failure reported by a target while storing a bound value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BindError {
    message: String,
}

impl BindError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn unknown_property(property: &str) -> Self {
        Self::new(format!("no property named '{}'", property))
    }

    pub fn type_mismatch(expected: &str, got: &Value) -> Self {
        Self::new(format!("expected {}, got {} '{}'", expected, got.kind_name(), got))
    }
}

/// A defect in a type's declared specifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("option '{property}' declares neither a short nor a long name")]
    Unnamed { property: String },

    #[error("long name '{name}' of option '{property}' must be longer than one character")]
    OneCharLongName { property: String, name: String },

    #[error("long name '{name}' of option '{property}' is not a valid option name")]
    InvalidLongName { property: String, name: String },

    #[error("short name '{name}' of option '{property}' is not a valid option name")]
    InvalidShortName { property: String, name: char },

    #[error("'{property}' is not a sequence but declares a min/max range")]
    RangeOnNonSequence { property: String },

    #[error("sequence '{property}' declares min {min} greater than max {max}")]
    MinGreaterThanMax { property: String, min: usize, max: usize },

    #[error("sequence '{property}' declares an empty range (min = max = 0)")]
    ZeroRange { property: String },

    #[error("'{property}' declares a separator but is not a sequence")]
    SeparatorOnNonSequence { property: String },

    #[error("'{property}' is a flag counter but not a switch")]
    CounterOnNonSwitch { property: String },

    #[error("property '{property}' is declared twice")]
    DuplicateProperty { property: String },

    #[error("verb name must not be empty")]
    EmptyVerbName,

    #[error("type '{type_name}' is registered as a verb but declares no verb")]
    NotAVerb { type_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(s: char, l: &str) -> NameInfo {
        NameInfo::new(Some(s), vec![l.to_string()])
    }

    #[test]
    fn name_text_forms() {
        assert_eq!(name('v', "verbose").name_text(), "v, verbose");
        assert_eq!(NameInfo::new(Some('v'), vec![]).name_text(), "v");
        assert_eq!(NameInfo::new(None, vec!["verbose".into()]).name_text(), "verbose");
        assert!(NameInfo::EMPTY.is_empty());
    }

    #[test]
    fn sentences() {
        assert_eq!(
            Error::MissingRequiredOption(name('n', "name")).to_string(),
            "Required option 'n, name' is missing."
        );
        assert_eq!(
            Error::MissingRequiredOption(NameInfo::EMPTY).to_string(),
            "A required value not bound to option name is missing."
        );
        let err = Error::MutuallyExclusiveSet {
            name: NameInfo::new(None, vec!["weburl".into()]),
            set_name: "theweb".into(),
            conflicts: vec![NameInfo::new(None, vec!["ftpurl".into()])],
        };
        assert_eq!(err.to_string(), "Option: 'weburl' is not compatible with: 'ftpurl'.");
        let err = Error::MissingGroupOption {
            group: "out".into(),
            names: vec![name('a', "alpha"), name('b', "beta")],
        };
        assert_eq!(err.to_string(), "At least one option from group 'out' (a, alpha, b, beta) is required.");
    }

    #[test]
    fn only_requests_stop_processing() {
        assert!(Error::HelpRequested.stops_processing());
        assert!(Error::VersionRequested.stops_processing());
        assert!(!Error::NoVerbSelected.stops_processing());
        assert_eq!(Error::HelpRequested.kind(), ErrorKind::HelpRequestedError);
    }

    #[test]
    fn payload_accessors() {
        assert_eq!(Error::UnknownOption("x".into()).token(), Some("x"));
        assert_eq!(Error::RepeatedOption(name('a', "all")).name_info(), Some(&name('a', "all")));
        assert_eq!(Error::NoVerbSelected.name_info(), None);
    }
}
