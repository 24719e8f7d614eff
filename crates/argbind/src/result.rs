//! Outcome of a parse.

use crate::error::Error;

/// Which type a result is about, and which types were candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfo {
    current: String,
    choices: Vec<String>,
}

impl TypeInfo {
    pub fn new(current: impl Into<String>, choices: Vec<String>) -> Self {
        Self { current: current.into(), choices }
    }

    /// Type that was parsed or attempted; empty when no verb was chosen.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Verb type names offered, empty for single-type parses.
    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

/// Either a bound value or the errors that prevented binding it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserResult<T> {
    Parsed { value: T, type_info: TypeInfo },
    NotParsed { errors: Vec<Error>, type_info: TypeInfo },
}

impl<T> ParserResult<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParserResult::Parsed { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ParserResult::Parsed { value, .. } => Some(value),
            ParserResult::NotParsed { .. } => None,
        }
    }

    /// Errors of a failed parse; empty when parsed.
    pub fn errors(&self) -> &[Error] {
        match self {
            ParserResult::Parsed { .. } => &[],
            ParserResult::NotParsed { errors, .. } => errors,
        }
    }

    pub fn type_info(&self) -> &TypeInfo {
        match self {
            ParserResult::Parsed { type_info, .. } | ParserResult::NotParsed { type_info, .. } => type_info,
        }
    }

    /// True when help (generic or for a verb) was asked for.
    pub fn is_help_request(&self) -> bool {
        self.errors()
            .iter()
            .any(|e| matches!(e, Error::HelpRequested | Error::HelpVerbRequested { .. }))
    }

    pub fn is_version_request(&self) -> bool {
        self.errors().iter().any(|e| matches!(e, Error::VersionRequested))
    }

    pub fn into_result(self) -> Result<T, Vec<Error>> {
        match self {
            ParserResult::Parsed { value, .. } => Ok(value),
            ParserResult::NotParsed { errors, .. } => Err(errors),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParserResult<U> {
        match self {
            ParserResult::Parsed { value, type_info } => ParserResult::Parsed { value: f(value), type_info },
            ParserResult::NotParsed { errors, type_info } => ParserResult::NotParsed { errors, type_info },
        }
    }

    /// Run `f` on the value when parsed.
    pub fn with_parsed(self, f: impl FnOnce(&T)) -> Self {
        if let ParserResult::Parsed { value, .. } = &self {
            f(value);
        }
        self
    }

    /// Run `f` on the errors when not parsed.
    pub fn with_not_parsed(self, f: impl FnOnce(&[Error])) -> Self {
        if let ParserResult::NotParsed { errors, .. } = &self {
            f(errors);
        }
        self
    }

    /// Collapse both outcomes into one value.
    pub fn map_result<U>(self, parsed: impl FnOnce(T) -> U, not_parsed: impl FnOnce(Vec<Error>) -> U) -> U {
        match self {
            ParserResult::Parsed { value, .. } => parsed(value),
            ParserResult::NotParsed { errors, .. } => not_parsed(errors),
        }
    }
}
