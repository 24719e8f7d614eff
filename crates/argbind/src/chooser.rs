//! Verb selection: pick the descriptor named by the first argument and bind
//! the rest of the arguments to it.

use crate::builder;
use crate::error::{DeclarationError, Error};
use crate::result::{ParserResult, TypeInfo};
use crate::settings::ParserSettings;
use crate::specification::{names_equal, TypeDescriptor, VerbInfo};
use crate::target::{Bindings, Target};
use std::fmt;
use tracing::debug;

type Finish<R> = Box<dyn Fn(Bindings) -> Result<R, Vec<Error>> + Send + Sync>;

struct VerbEntry<R> {
    descriptor: TypeDescriptor,
    finish: Finish<R>,
}

/// Verbs sharing one argument vector; each produces an `R`.
///
/// ```
/// # use argbind::{VerbSet, TypeDescriptor, VerbInfo, Bindings};
/// let verbs = VerbSet::new()
///     .descriptor(
///         TypeDescriptor::builder("add").verb(VerbInfo::new("add")).build()?,
///         |b: Bindings| b.type_name().to_string(),
///     )?;
/// assert_eq!(verbs.names(), vec!["add"]);
/// # Ok::<(), argbind::DeclarationError>(())
/// ```
pub struct VerbSet<R> {
    verbs: Vec<VerbEntry<R>>,
}

impl<R> Default for VerbSet<R> {
    fn default() -> Self {
        Self { verbs: Vec::new() }
    }
}

impl<R> fmt::Debug for VerbSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerbSet").field("verbs", &self.names()).finish()
    }
}

impl<R: 'static> VerbSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed verb; `on_parsed` turns the bound target into `R`.
    pub fn verb<T: Target + 'static>(self, on_parsed: fn(T) -> R) -> Result<Self, DeclarationError> {
        let descriptor = T::describe()?;
        let for_binding = descriptor.clone();
        self.push(
            descriptor,
            Box::new(move |bindings: Bindings| builder::materialize::<T>(bindings, &for_binding).map(on_parsed)),
        )
    }

    /// Register a dynamic verb bound into [`Bindings`].
    pub fn descriptor<F>(self, descriptor: TypeDescriptor, on_parsed: F) -> Result<Self, DeclarationError>
    where
        F: Fn(Bindings) -> R + Send + Sync + 'static,
    {
        self.push(descriptor, Box::new(move |bindings: Bindings| Ok(on_parsed(bindings))))
    }

    fn push(mut self, descriptor: TypeDescriptor, finish: Finish<R>) -> Result<Self, DeclarationError> {
        if descriptor.verb().is_none() {
            return Err(DeclarationError::NotAVerb { type_name: descriptor.name().to_string() });
        }
        self.verbs.push(VerbEntry { descriptor, finish });
        Ok(self)
    }
}

impl<R> VerbSet<R> {
    /// Verb names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.verbs.iter().filter_map(|v| v.descriptor.verb().map(VerbInfo::name)).collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.verbs.iter().map(|v| &v.descriptor)
    }

    fn find(&self, token: &str, case_sensitive: bool) -> Option<&VerbEntry<R>> {
        self.verbs
            .iter()
            .find(|v| v.descriptor.verb().is_some_and(|verb| verb.matches(token, case_sensitive)))
    }
}

pub(crate) fn choose<R>(verbs: &VerbSet<R>, args: &[String], settings: &ParserSettings) -> ParserResult<R> {
    let choices: Vec<String> = verbs.verbs.iter().map(|v| v.descriptor.name().to_string()).collect();
    let not_parsed = |errors: Vec<Error>, current: &str| ParserResult::NotParsed {
        errors,
        type_info: TypeInfo::new(current, choices.clone()),
    };
    let case_sensitive = settings.case_sensitive();

    let defaults: Vec<&VerbEntry<R>> =
        verbs.verbs.iter().filter(|v| v.descriptor.verb().is_some_and(VerbInfo::is_default)).collect();
    if defaults.len() > 1 {
        return not_parsed(vec![Error::MultipleDefaultVerbs], "");
    }
    let default = defaults.first().copied();

    let Some(first) = args.first() else {
        return match default {
            Some(entry) => run(entry, args, settings, &choices),
            None => not_parsed(vec![Error::NoVerbSelected], ""),
        };
    };

    if let Some(entry) = verbs.find(first, case_sensitive) {
        debug!(verb = %first, type_name = entry.descriptor.name(), "verb selected");
        return run(entry, &args[1..], settings, &choices);
    }

    if settings.auto_help() && names_equal(first, "help", case_sensitive) {
        let verb = args.get(1).cloned();
        let matched = verb.as_deref().and_then(|v| verbs.find(v, case_sensitive));
        return not_parsed(
            vec![Error::HelpVerbRequested {
                verb,
                type_name: matched.map(|e| e.descriptor.name().to_string()),
                matched: matched.is_some(),
            }],
            "",
        );
    }
    if settings.auto_version() && names_equal(first, "version", case_sensitive) {
        return not_parsed(vec![Error::VersionRequested], "");
    }
    let is_flag = |long: &str, short: &str, with_short: bool| {
        names_equal(first, long, case_sensitive) || (with_short && first == short)
    };
    if settings.auto_help() && is_flag("--help", "-h", settings.auto_help_short_name()) {
        return not_parsed(vec![Error::HelpRequested], "");
    }
    if settings.auto_version() && is_flag("--version", "-V", settings.auto_version_short_name()) {
        return not_parsed(vec![Error::VersionRequested], "");
    }

    match default {
        Some(entry) => run(entry, args, settings, &choices),
        None => not_parsed(vec![Error::BadVerbSelected(first.clone())], ""),
    }
}

fn run<R>(entry: &VerbEntry<R>, args: &[String], settings: &ParserSettings, choices: &[String]) -> ParserResult<R> {
    let type_info = TypeInfo::new(entry.descriptor.name(), choices.to_vec());
    match builder::build(&entry.descriptor, args, settings).and_then(|b| (entry.finish)(b)) {
        Ok(value) => ParserResult::Parsed { value, type_info },
        Err(errors) => ParserResult::NotParsed { errors, type_info },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{OptionSpecification, ValueSpecification, ValueType};
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    fn verbs(default_add: bool) -> VerbSet<String> {
        let mut add = VerbInfo::new("add").alias("a");
        if default_add {
            add = add.default_verb();
        }
        VerbSet::new()
            .descriptor(
                TypeDescriptor::builder("AddOptions")
                    .verb(add)
                    .option("all", OptionSpecification::switch().long("all"))
                    .value("path", ValueSpecification::scalar(0, ValueType::String))
                    .build()
                    .unwrap(),
                |b: Bindings| format!("add {:?}", b.get("path")),
            )
            .unwrap()
            .descriptor(
                TypeDescriptor::builder("CommitOptions")
                    .verb(VerbInfo::new("commit"))
                    .option("amend", OptionSpecification::switch().long("amend"))
                    .build()
                    .unwrap(),
                |b: Bindings| format!("commit {}", b.get("amend") == Some(&Value::Bool(true))),
            )
            .unwrap()
    }

    fn choose_with(set: &VerbSet<String>, a: &[&str]) -> ParserResult<String> {
        choose(set, &args(a), &ParserSettings::default())
    }

    #[test]
    fn selects_by_name_and_alias() {
        let set = verbs(false);
        let r = choose_with(&set, &["commit", "--amend"]);
        assert_eq!(r.value().map(String::as_str), Some("commit true"));
        assert_eq!(r.type_info().current(), "CommitOptions");
        let r = choose_with(&set, &["a", "x"]);
        assert_eq!(r.value().map(String::as_str), Some("add Some(Str(\"x\"))"));
    }

    #[test]
    fn no_and_bad_verbs() {
        let set = verbs(false);
        assert_eq!(choose_with(&set, &[]).errors(), &[Error::NoVerbSelected]);
        assert_eq!(choose_with(&set, &["push"]).errors(), &[Error::BadVerbSelected("push".into())]);
    }

    #[test]
    fn default_verb_takes_everything() {
        let set = verbs(true);
        assert_eq!(choose_with(&set, &[]).value().map(String::as_str), Some("add None"));
        assert_eq!(
            choose_with(&set, &["file"]).value().map(String::as_str),
            Some("add Some(Str(\"file\"))")
        );
    }

    #[test]
    fn help_and_version_verbs() {
        let set = verbs(false);
        assert_eq!(
            choose_with(&set, &["help", "commit"]).errors(),
            &[Error::HelpVerbRequested {
                verb: Some("commit".into()),
                type_name: Some("CommitOptions".into()),
                matched: true,
            }]
        );
        assert_eq!(
            choose_with(&set, &["help", "nope"]).errors(),
            &[Error::HelpVerbRequested { verb: Some("nope".into()), type_name: None, matched: false }]
        );
        assert_eq!(choose_with(&set, &["version"]).errors(), &[Error::VersionRequested]);
        assert_eq!(choose_with(&set, &["--help"]).errors(), &[Error::HelpRequested]);
        assert_eq!(choose_with(&set, &["commit", "--help"]).errors(), &[Error::HelpRequested]);
    }

    #[test]
    fn multiple_defaults_rejected() {
        let set = VerbSet::new()
            .descriptor(
                TypeDescriptor::builder("A").verb(VerbInfo::new("a").default_verb()).build().unwrap(),
                |_| (),
            )
            .unwrap()
            .descriptor(
                TypeDescriptor::builder("B").verb(VerbInfo::new("b").default_verb()).build().unwrap(),
                |_| (),
            )
            .unwrap();
        assert_eq!(choose(&set, &[], &ParserSettings::default()).errors(), &[Error::MultipleDefaultVerbs]);
    }

    #[test]
    fn non_verb_descriptor_is_a_declaration_error() {
        let err = VerbSet::<()>::new()
            .descriptor(TypeDescriptor::builder("Plain").build().unwrap(), |_| ())
            .unwrap_err();
        assert_eq!(err, DeclarationError::NotAVerb { type_name: "Plain".into() });
    }
}
