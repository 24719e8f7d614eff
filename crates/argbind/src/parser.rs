//! Parse entry points.

use crate::builder;
use crate::chooser::{self, VerbSet};
use crate::error::DeclarationError;
use crate::result::{ParserResult, TypeInfo};
use crate::settings::ParserSettings;
use crate::specification::TypeDescriptor;
use crate::target::{Bindings, PropertySource, Target};
use crate::unparse::{self, UnparserSettings};
use tracing::debug;

/// Owns a settings snapshot; every parse works on its own token set, so a
/// `Parser` can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    settings: ParserSettings,
}

impl Parser {
    pub fn new(settings: ParserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Parse into a typed target. Fails only when `T` is declared wrongly.
    pub fn parse<T, I, S>(&self, args: I) -> Result<ParserResult<T>, DeclarationError>
    where
        T: Target,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let descriptor = T::describe()?;
        let args = collect(args);
        let type_info = TypeInfo::new(descriptor.name(), Vec::new());
        let outcome = builder::build(&descriptor, &args, &self.settings)
            .and_then(|bindings| builder::materialize::<T>(bindings, &descriptor));
        Ok(match outcome {
            Ok(value) => ParserResult::Parsed { value, type_info },
            Err(errors) => ParserResult::NotParsed { errors, type_info },
        })
    }

    /// Parse against a descriptor built at run time.
    pub fn parse_descriptor<I, S>(&self, descriptor: &TypeDescriptor, args: I) -> ParserResult<Bindings>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = collect(args);
        let type_info = TypeInfo::new(descriptor.name(), Vec::new());
        match builder::build(descriptor, &args, &self.settings) {
            Ok(value) => ParserResult::Parsed { value, type_info },
            Err(errors) => ParserResult::NotParsed { errors, type_info },
        }
    }

    /// Select a verb from the first argument and parse the rest for it.
    pub fn parse_verbs<R, I, S>(&self, verbs: &VerbSet<R>, args: I) -> ParserResult<R>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        chooser::choose(verbs, &collect(args), &self.settings)
    }

    /// Quoted command line that parses back into `source`.
    pub fn format_command_line<S: PropertySource + ?Sized>(
        &self,
        descriptor: &TypeDescriptor,
        source: &S,
        settings: &UnparserSettings,
    ) -> String {
        unparse::format_command_line(descriptor, source, &self.settings, settings)
    }

    /// Argument vector that parses back into `source`.
    pub fn format_command_line_args<S: PropertySource + ?Sized>(
        &self,
        descriptor: &TypeDescriptor,
        source: &S,
        settings: &UnparserSettings,
    ) -> Vec<String> {
        unparse::format_command_line_args(descriptor, source, &self.settings, settings)
    }
}

fn collect<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    debug!(count = args.len(), "parsing arguments");
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn parser_is_shareable() {
        assert_send_sync::<Parser>();
        assert_send_sync::<VerbSet<String>>();
    }
}
