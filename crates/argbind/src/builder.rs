//! End-to-end binding of one type descriptor.
//!
//! tokenize → help/version check → explode lists → partition → map options
//! → map values → validate → assemble. Errors from every stage are
//! collected; only a help or version request ends the run early.

use crate::convert::TypeConverter;
use crate::error::Error;
use crate::lookup::NameLookup;
use crate::mapper;
use crate::partition::partition;
use crate::rules::{self, Occurrences};
use crate::settings::ParserSettings;
use crate::specification::{Specification, SpecificationProperty, TargetType, TypeDescriptor};
use crate::target::{Bindings, Target};
use crate::tokenizer::{explode_option_list, tokenize};
use crate::value::Value;
use tracing::debug;

pub(crate) fn build(
    descriptor: &TypeDescriptor,
    args: &[String],
    settings: &ParserSettings,
) -> Result<Bindings, Vec<Error>> {
    let case_sensitive = settings.case_sensitive();
    if descriptor.has_conflicting_declarations(case_sensitive) {
        return Err(vec![Error::InvalidAttributeConfiguration]);
    }

    let lookup = NameLookup::new(descriptor, settings);
    let tokenized = tokenize(args, &lookup, settings);

    for token in tokenized.tokens.iter().filter(|t| t.is_name()) {
        if lookup.is_help(token.text()) {
            debug!(type_name = descriptor.name(), "help requested");
            return Err(vec![Error::HelpRequested]);
        }
        if lookup.is_version(token.text()) {
            debug!(type_name = descriptor.name(), "version requested");
            return Err(vec![Error::VersionRequested]);
        }
    }

    let mut errors = tokenized.errors;
    let tokens = explode_option_list(tokenized.tokens, &lookup);

    let mut occurrences = Occurrences::new();
    for token in tokens.iter().filter(|t| t.is_name()) {
        if let Some(index) = lookup.find_type_descriptor(token.text()).and_then(|info| info.index) {
            *occurrences.entry(descriptor.properties()[index].name().to_string()).or_insert(0) += 1;
        }
    }

    let buckets = partition(&tokens, &lookup);
    let mut pairs = mapper::for_switch(&buckets.switches);
    pairs.extend(mapper::for_scalar(&buckets.scalars));
    pairs.extend(mapper::for_sequence(&buckets.sequences));
    let values: Vec<String> = buckets.values.iter().map(|t| t.text().to_string()).collect();

    let converter = TypeConverter::new(
        settings.parsing_culture(),
        settings.case_insensitive_enum_values(),
        settings.converters(),
    );
    let properties: Vec<SpecificationProperty<'_>> =
        descriptor.properties().iter().map(SpecificationProperty::new).collect();
    let (properties, option_errors) = mapper::map_options(&properties, &pairs, &converter, case_sensitive);
    let (properties, value_errors) = mapper::map_values(&properties, &values, &converter);
    errors.extend(option_errors);
    errors.extend(value_errors);
    errors.extend(rules::validate(
        &properties,
        &occurrences,
        settings.allow_multi_instance(),
        case_sensitive,
    ));

    debug!(type_name = descriptor.name(), errors = errors.len(), "bound");
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(assemble(descriptor, &properties))
}

fn assemble(descriptor: &TypeDescriptor, properties: &[SpecificationProperty<'_>]) -> Bindings {
    let mut bindings = Bindings::new(descriptor.name(), descriptor.verb().map(|v| v.name().to_string()));
    for p in properties {
        if let Some(value) = p.value().cloned().or_else(|| implicit_value(p.specification())) {
            bindings.insert(p.property().name(), value);
        }
    }
    bindings
}

/// Value of a property nobody bound.
fn implicit_value(spec: &Specification) -> Option<Value> {
    if let Some(default) = spec.default() {
        return Some(default.clone());
    }
    match spec.target_type() {
        TargetType::Switch if spec.as_option().is_some_and(|o| o.is_flag_counter()) => Some(Value::Count(0)),
        TargetType::Switch => Some(Value::Bool(false)),
        TargetType::Sequence => Some(Value::List(Vec::new())),
        TargetType::Scalar => None,
    }
}

/// Write bindings into a fresh `T`. Every failing setter is reported.
pub(crate) fn materialize<T: Target>(bindings: Bindings, descriptor: &TypeDescriptor) -> Result<T, Vec<Error>> {
    let mut target = T::default();
    let mut errors = Vec::new();
    for (property, value) in bindings {
        if let Err(error) = target.bind(&property, value.clone()) {
            let name = descriptor
                .property(&property)
                .map(|p| p.specification().name_info())
                .unwrap_or_default();
            debug!(property = %property, %error, "setter rejected value");
            errors.push(Error::SetValueException { name, error, value });
        }
    }
    if errors.is_empty() {
        Ok(target)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NameInfo;
    use crate::specification::{OptionSpecification, ValueSpecification, ValueType};
    use pretty_assertions::assert_eq;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("opts")
            .option("verbose", OptionSpecification::counter().short('v'))
            .option("quiet", OptionSpecification::switch().short('q'))
            .option("name", OptionSpecification::scalar(ValueType::String).long("stringvalue"))
            .option("level", OptionSpecification::scalar(ValueType::Int).long("level").default_value(Value::Int(1)))
            .option("tags", OptionSpecification::sequence(ValueType::String).long("tag"))
            .value("file", ValueSpecification::scalar(0, ValueType::String))
            .build()
            .unwrap()
    }

    #[test]
    fn assembles_defaults_for_unbound() {
        let b = build(&descriptor(), &args(&["-vv", "in.txt"]), &ParserSettings::default()).unwrap();
        let pairs: Vec<(&str, &Value)> = b.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("verbose", &Value::Count(2)),
                ("quiet", &Value::Bool(false)),
                ("level", &Value::Int(1)),
                ("tags", &Value::List(vec![])),
                ("file", &Value::Str("in.txt".into())),
            ]
        );
    }

    #[test]
    fn help_short_circuits_everything() {
        let errors = build(&descriptor(), &args(&["--bogus", "--help", "--level", "x"]), &ParserSettings::default())
            .unwrap_err();
        assert_eq!(errors, vec![Error::HelpRequested]);
    }

    #[test]
    fn help_consumed_as_value_is_not_a_request() {
        let b = build(&descriptor(), &args(&["--stringvalue", "--help"]), &ParserSettings::default()).unwrap();
        assert_eq!(b.get("name"), Some(&Value::Str("--help".into())));
    }

    #[test]
    fn aggregates_errors_from_all_stages() {
        let errors = build(
            &descriptor(),
            &args(&["--nope", "--level", "x", "--stringvalue", "a", "--stringvalue", "b"]),
            &ParserSettings::default(),
        )
        .unwrap_err();
        assert_eq!(
            errors,
            vec![
                Error::UnknownOption("nope".into()),
                Error::BadFormatConversion(NameInfo::new(None, vec!["level".into()])),
                Error::RepeatedOption(NameInfo::new(None, vec!["stringvalue".into()])),
            ]
        );
    }

    #[test]
    fn conflicting_declarations_are_reported() {
        let d = TypeDescriptor::builder("opts")
            .option("a", OptionSpecification::switch().long("same"))
            .option("b", OptionSpecification::switch().long("same"))
            .build()
            .unwrap();
        assert_eq!(
            build(&d, &[], &ParserSettings::default()).unwrap_err(),
            vec![Error::InvalidAttributeConfiguration]
        );
    }
}
