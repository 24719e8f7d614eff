//! Specification descriptors: what a target type accepts on the command line.
//!
//! Descriptors are immutable once built and can be shared between parses and
//! threads. Defects in a declaration are caught by
//! [`TypeDescriptorBuilder::build`] and reported as [`DeclarationError`].

use crate::error::{DeclarationError, NameInfo};
use crate::value::Value;

/// How many tokens a specification consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// Present or absent, no value token.
    Switch,
    /// Exactly one value token.
    Scalar,
    /// Zero or more value tokens.
    Sequence,
}

/// Members of an enumeration: name plus numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    members: Vec<(String, i64)>,
}

impl EnumType {
    pub fn new<S: Into<String>>(members: impl IntoIterator<Item = (S, i64)>) -> Self {
        Self { members: members.into_iter().map(|(n, v)| (n.into(), v)).collect() }
    }

    /// Members numbered from zero in declaration order.
    pub fn from_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            members: names.into_iter().enumerate().map(|(i, n)| (n.into(), i as i64)).collect(),
        }
    }

    pub fn members(&self) -> &[(String, i64)] {
        &self.members
    }

    pub fn by_name(&self, name: &str, case_insensitive: bool) -> Option<(&str, i64)> {
        self.members
            .iter()
            .find(|(n, _)| {
                if case_insensitive {
                    n.to_lowercase() == name.to_lowercase()
                } else {
                    n == name
                }
            })
            .map(|(n, v)| (n.as_str(), *v))
    }

    pub fn by_value(&self, value: i64) -> Option<(&str, i64)> {
        self.members.iter().find(|(_, v)| *v == value).map(|(n, v)| (n.as_str(), *v))
    }
}

/// Destination type of a single raw string.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Bool,
    Int,
    UInt,
    Float,
    Char,
    String,
    Enum(EnumType),
    /// Converted by the custom converter registered under this name.
    Custom(String),
}

impl ValueType {
    /// Placeholder shown in help text when no meta value is declared.
    pub fn display_name(&self) -> &str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::UInt => "uint",
            ValueType::Float => "float",
            ValueType::Char => "char",
            ValueType::String => "string",
            ValueType::Enum(_) => "enum",
            ValueType::Custom(name) => name,
        }
    }
}

// ── Option specification ─────────────────────────────────────────

/// A named option: `-s`, `--long`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpecification {
    short_name: Option<char>,
    long_names: Vec<String>,
    required: bool,
    min: Option<usize>,
    max: Option<usize>,
    separator: Option<char>,
    default_value: Option<Value>,
    set_name: Option<String>,
    group: Option<String>,
    target_type: TargetType,
    value_type: ValueType,
    flag_counter: bool,
    hidden: bool,
    help_text: String,
    meta_value: Option<String>,
}

impl OptionSpecification {
    fn with(target_type: TargetType, value_type: ValueType) -> Self {
        Self {
            short_name: None,
            long_names: Vec::new(),
            required: false,
            min: None,
            max: None,
            separator: None,
            default_value: None,
            set_name: None,
            group: None,
            target_type,
            value_type,
            flag_counter: false,
            hidden: false,
            help_text: String::new(),
            meta_value: None,
        }
    }

    /// Boolean switch.
    pub fn switch() -> Self {
        Self::with(TargetType::Switch, ValueType::Bool)
    }

    /// Switch whose value is the number of occurrences (`-vvv` → 3).
    pub fn counter() -> Self {
        Self { flag_counter: true, ..Self::switch() }
    }

    pub fn scalar(value_type: ValueType) -> Self {
        Self::with(TargetType::Scalar, value_type)
    }

    pub fn sequence(value_type: ValueType) -> Self {
        Self::with(TargetType::Sequence, value_type)
    }

    pub fn short(mut self, name: char) -> Self {
        self.short_name = Some(name);
        self
    }

    /// Add a long name; the first one is the primary name.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long_names.push(name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    pub fn meta_value(mut self, meta: impl Into<String>) -> Self {
        self.meta_value = Some(meta.into());
        self
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn long_names(&self) -> &[String] {
        &self.long_names
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_names.first().map(String::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn min_items(&self) -> Option<usize> {
        self.min
    }

    pub fn max_items(&self) -> Option<usize> {
        self.max
    }

    pub fn separator_char(&self) -> Option<char> {
        self.separator
    }

    pub fn default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Set name, `None` when empty.
    pub fn set(&self) -> Option<&str> {
        self.set_name.as_deref().filter(|s| !s.is_empty())
    }

    /// Group name, `None` when empty.
    pub fn group_name(&self) -> Option<&str> {
        self.group.as_deref().filter(|s| !s.is_empty())
    }

    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn is_flag_counter(&self) -> bool {
        self.flag_counter
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn meta(&self) -> Option<&str> {
        self.meta_value.as_deref()
    }

    pub fn name_info(&self) -> NameInfo {
        NameInfo::new(self.short_name, self.long_names.clone())
    }

    /// Long name if there is one, else the short name.
    pub fn unique_name(&self) -> String {
        self.long_name()
            .map(str::to_string)
            .or_else(|| self.short_name.map(String::from))
            .unwrap_or_default()
    }

    /// True when `name` is this option's short name or one of its long names.
    pub fn matches_name(&self, name: &str, case_sensitive: bool) -> bool {
        let eq = |a: &str, b: &str| {
            if case_sensitive {
                a == b
            } else {
                a.to_lowercase() == b.to_lowercase()
            }
        };
        let mut chars = name.chars();
        let short_hit = match (chars.next(), chars.next(), self.short_name) {
            (Some(c), None, Some(s)) => eq(&c.to_string(), &s.to_string()),
            _ => false,
        };
        short_hit || self.long_names.iter().any(|l| eq(l, name))
    }
}

// ── Value specification ──────────────────────────────────────────

/// A positional value, bound by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpecification {
    index: usize,
    min: Option<usize>,
    max: Option<usize>,
    required: bool,
    target_type: TargetType,
    value_type: ValueType,
    default_value: Option<Value>,
    meta_name: Option<String>,
    help_text: String,
    hidden: bool,
}

impl ValueSpecification {
    fn with(index: usize, target_type: TargetType, value_type: ValueType) -> Self {
        Self {
            index,
            min: None,
            max: None,
            required: false,
            target_type,
            value_type,
            default_value: None,
            meta_name: None,
            help_text: String::new(),
            hidden: false,
        }
    }

    pub fn scalar(index: usize, value_type: ValueType) -> Self {
        Self::with(index, TargetType::Scalar, value_type)
    }

    pub fn sequence(index: usize, value_type: ValueType) -> Self {
        Self::with(index, TargetType::Sequence, value_type)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn meta_name(mut self, name: impl Into<String>) -> Self {
        self.meta_name = Some(name.into());
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn min_items(&self) -> Option<usize> {
        self.min
    }

    pub fn max_items(&self) -> Option<usize> {
        self.max
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn meta(&self) -> Option<&str> {
        self.meta_name.as_deref()
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// How many values this specification takes from the positional list;
    /// `None` means all that remain.
    pub fn count_of_max_values(&self) -> Option<usize> {
        match self.target_type {
            TargetType::Scalar | TargetType::Switch => Some(1),
            TargetType::Sequence => self.max,
        }
    }
}

// ── Specification ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Specification {
    Option(OptionSpecification),
    Value(ValueSpecification),
}

impl Specification {
    pub fn is_option(&self) -> bool {
        matches!(self, Specification::Option(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Specification::Value(_))
    }

    pub fn as_option(&self) -> Option<&OptionSpecification> {
        match self {
            Specification::Option(o) => Some(o),
            Specification::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&ValueSpecification> {
        match self {
            Specification::Value(v) => Some(v),
            Specification::Option(_) => None,
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            Specification::Option(o) => o.target_type,
            Specification::Value(v) => v.target_type,
        }
    }

    pub fn value_type(&self) -> &ValueType {
        match self {
            Specification::Option(o) => &o.value_type,
            Specification::Value(v) => &v.value_type,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Specification::Option(o) => o.required,
            Specification::Value(v) => v.required,
        }
    }

    pub fn min_items(&self) -> Option<usize> {
        match self {
            Specification::Option(o) => o.min,
            Specification::Value(v) => v.min,
        }
    }

    pub fn max_items(&self) -> Option<usize> {
        match self {
            Specification::Option(o) => o.max,
            Specification::Value(v) => v.max,
        }
    }

    pub fn default(&self) -> Option<&Value> {
        match self {
            Specification::Option(o) => o.default_value.as_ref(),
            Specification::Value(v) => v.default_value.as_ref(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Specification::Option(o) => o.hidden,
            Specification::Value(v) => v.hidden,
        }
    }

    /// Option names, or the empty name for positional values.
    pub fn name_info(&self) -> NameInfo {
        match self {
            Specification::Option(o) => o.name_info(),
            Specification::Value(_) => NameInfo::EMPTY,
        }
    }

    fn validate(&self, property: &str) -> Result<(), DeclarationError> {
        let err_property = || property.to_string();
        if let Specification::Option(o) = self {
            if o.short_name.is_none() && o.long_names.is_empty() {
                return Err(DeclarationError::Unnamed { property: err_property() });
            }
            if let Some(c) = o.short_name {
                if c.is_whitespace() || c == '-' || c == '=' {
                    return Err(DeclarationError::InvalidShortName { property: err_property(), name: c });
                }
            }
            for name in &o.long_names {
                if name.chars().count() == 1 {
                    return Err(DeclarationError::OneCharLongName {
                        property: err_property(),
                        name: name.clone(),
                    });
                }
                if name.is_empty()
                    || name.starts_with('-')
                    || name.contains('=')
                    || name.chars().any(char::is_whitespace)
                {
                    return Err(DeclarationError::InvalidLongName {
                        property: err_property(),
                        name: name.clone(),
                    });
                }
            }
            if o.separator.is_some() && o.target_type != TargetType::Sequence {
                return Err(DeclarationError::SeparatorOnNonSequence { property: err_property() });
            }
            if o.flag_counter && o.target_type != TargetType::Switch {
                return Err(DeclarationError::CounterOnNonSwitch { property: err_property() });
            }
        }
        let (min, max) = (self.min_items(), self.max_items());
        if self.target_type() != TargetType::Sequence {
            if min.is_some() || max.is_some() {
                return Err(DeclarationError::RangeOnNonSequence { property: err_property() });
            }
            return Ok(());
        }
        match (min, max) {
            (Some(0), Some(0)) => Err(DeclarationError::ZeroRange { property: err_property() }),
            (Some(min), Some(max)) if min > max => {
                Err(DeclarationError::MinGreaterThanMax { property: err_property(), min, max })
            }
            _ => Ok(()),
        }
    }
}

/// A specification together with the property it writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    specification: Specification,
}

impl Property {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specification(&self) -> &Specification {
        &self.specification
    }
}

/// The unit of work flowing through the binding pipeline: a property and,
/// once mapped, its converted value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationProperty<'a> {
    property: &'a Property,
    value: Option<Value>,
}

impl<'a> SpecificationProperty<'a> {
    pub fn new(property: &'a Property) -> Self {
        Self { property, value: None }
    }

    pub fn with_value(&self, value: Value) -> Self {
        Self { property: self.property, value: Some(value) }
    }

    pub fn property(&self) -> &'a Property {
        self.property
    }

    pub fn specification(&self) -> &'a Specification {
        &self.property.specification
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}

// ── Verbs and type descriptors ───────────────────────────────────

/// Verb metadata of a target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbInfo {
    name: String,
    aliases: Vec<String>,
    help_text: String,
    hidden: bool,
    is_default: bool,
}

impl VerbInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            help_text: String::new(),
            hidden: false,
            is_default: false,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn default_verb(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn matches(&self, token: &str, case_sensitive: bool) -> bool {
        let eq = |a: &str| {
            if case_sensitive {
                a == token
            } else {
                a.to_lowercase() == token.to_lowercase()
            }
        };
        eq(&self.name) || self.aliases.iter().any(|a| eq(a))
    }
}

/// Everything the pipeline needs to know about a target type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    verb: Option<VerbInfo>,
    properties: Vec<Property>,
}

impl TypeDescriptor {
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            verb: None,
            properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verb(&self) -> Option<&VerbInfo> {
        self.verb.as_ref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionSpecification> + '_ {
        self.properties.iter().filter_map(|p| p.specification.as_option())
    }

    /// Positional values ordered by index.
    pub fn values(&self) -> Vec<&Property> {
        let mut values: Vec<&Property> =
            self.properties.iter().filter(|p| p.specification.is_value()).collect();
        values.sort_by_key(|p| p.specification.as_value().map(ValueSpecification::index));
        values
    }

    /// True when two options share a name or two values share an index.
    ///
    /// Short-name clashes between members of one group are left to the
    /// group-ambiguity rule.
    pub fn has_conflicting_declarations(&self, case_sensitive: bool) -> bool {
        let options: Vec<&OptionSpecification> = self.options().collect();
        for (i, a) in options.iter().enumerate() {
            for b in &options[i + 1..] {
                let long_clash = a
                    .long_names
                    .iter()
                    .any(|l| b.long_names.iter().any(|m| names_equal(l, m, case_sensitive)));
                let same_group = a.group_name().is_some() && a.group_name() == b.group_name();
                let short_clash = match (a.short_name, b.short_name) {
                    (Some(x), Some(y)) => {
                        names_equal(&x.to_string(), &y.to_string(), case_sensitive) && !same_group
                    }
                    _ => false,
                };
                if long_clash || short_clash {
                    return true;
                }
            }
        }
        let mut indexes: Vec<usize> = self
            .properties
            .iter()
            .filter_map(|p| p.specification.as_value().map(ValueSpecification::index))
            .collect();
        let count = indexes.len();
        indexes.sort_unstable();
        indexes.dedup();
        indexes.len() != count
    }
}

pub(crate) fn names_equal(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// Collects properties for a [`TypeDescriptor`].
#[derive(Debug, Clone)]
pub struct TypeDescriptorBuilder {
    name: String,
    verb: Option<VerbInfo>,
    properties: Vec<Property>,
}

impl TypeDescriptorBuilder {
    pub fn verb(mut self, verb: VerbInfo) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn option(mut self, property: impl Into<String>, spec: OptionSpecification) -> Self {
        self.properties.push(Property {
            name: property.into(),
            specification: Specification::Option(spec),
        });
        self
    }

    pub fn value(mut self, property: impl Into<String>, spec: ValueSpecification) -> Self {
        self.properties.push(Property {
            name: property.into(),
            specification: Specification::Value(spec),
        });
        self
    }

    /// Run the declaration guards and freeze the descriptor.
    pub fn build(self) -> Result<TypeDescriptor, DeclarationError> {
        if let Some(verb) = &self.verb {
            if verb.name.trim().is_empty() {
                return Err(DeclarationError::EmptyVerbName);
            }
        }
        for (i, p) in self.properties.iter().enumerate() {
            if self.properties[..i].iter().any(|q| q.name == p.name) {
                return Err(DeclarationError::DuplicateProperty { property: p.name.clone() });
            }
            p.specification.validate(&p.name)?;
        }
        Ok(TypeDescriptor {
            name: self.name,
            verb: self.verb,
            properties: self.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_and_orders_values() {
        let d = TypeDescriptor::builder("opts")
            .value("second", ValueSpecification::scalar(1, ValueType::String))
            .option("verbose", OptionSpecification::switch().short('v').long("verbose"))
            .value("first", ValueSpecification::scalar(0, ValueType::Int))
            .build()
            .unwrap();
        let names: Vec<&str> = d.values().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(d.options().count(), 1);
    }

    #[test]
    fn guards_reject_bad_declarations() {
        let build = |spec: OptionSpecification| {
            TypeDescriptor::builder("t").option("p", spec).build().map(|_| ())
        };
        assert_eq!(
            build(OptionSpecification::switch()),
            Err(DeclarationError::Unnamed { property: "p".into() })
        );
        assert_eq!(
            build(OptionSpecification::switch().long("x")),
            Err(DeclarationError::OneCharLongName { property: "p".into(), name: "x".into() })
        );
        assert_eq!(
            build(OptionSpecification::scalar(ValueType::Int).long("num").min(1)),
            Err(DeclarationError::RangeOnNonSequence { property: "p".into() })
        );
        assert_eq!(
            build(OptionSpecification::sequence(ValueType::Int).long("nums").min(4).max(3)),
            Err(DeclarationError::MinGreaterThanMax { property: "p".into(), min: 4, max: 3 })
        );
        assert_eq!(
            build(OptionSpecification::sequence(ValueType::Int).long("nums").min(0).max(0)),
            Err(DeclarationError::ZeroRange { property: "p".into() })
        );
        assert_eq!(
            build(OptionSpecification::scalar(ValueType::Int).long("num").separator(',')),
            Err(DeclarationError::SeparatorOnNonSequence { property: "p".into() })
        );
        assert_eq!(
            build(OptionSpecification::switch().long("bad name")),
            Err(DeclarationError::InvalidLongName { property: "p".into(), name: "bad name".into() })
        );
    }

    #[test]
    fn duplicate_property_is_fatal() {
        let err = TypeDescriptor::builder("t")
            .option("p", OptionSpecification::switch().long("one"))
            .option("p", OptionSpecification::switch().long("two"))
            .build()
            .unwrap_err();
        assert_eq!(err, DeclarationError::DuplicateProperty { property: "p".into() });
    }

    #[test]
    fn name_matching_respects_case() {
        let o = OptionSpecification::scalar(ValueType::String).short('s').long("string-value");
        assert!(o.matches_name("s", true));
        assert!(o.matches_name("string-value", true));
        assert!(!o.matches_name("S", true));
        assert!(o.matches_name("S", false));
        assert!(o.matches_name("String-Value", false));
        assert!(!o.matches_name("st", false));
    }

    #[test]
    fn conflicting_declarations() {
        let d = TypeDescriptor::builder("t")
            .option("a", OptionSpecification::switch().long("same"))
            .option("b", OptionSpecification::switch().long("SAME"))
            .build()
            .unwrap();
        assert!(!d.has_conflicting_declarations(true));
        assert!(d.has_conflicting_declarations(false));

        let d = TypeDescriptor::builder("t")
            .value("a", ValueSpecification::scalar(0, ValueType::String))
            .value("b", ValueSpecification::scalar(0, ValueType::String))
            .build()
            .unwrap();
        assert!(d.has_conflicting_declarations(true));
    }

    #[test]
    fn enum_lookup() {
        let e = EnumType::from_names(["Red", "Green"]);
        assert_eq!(e.by_name("green", true), Some(("Green", 1)));
        assert_eq!(e.by_name("green", false), None);
        assert_eq!(e.by_value(0), Some(("Red", 0)));
        assert_eq!(e.by_value(7), None);
    }

    #[test]
    fn verb_aliases() {
        let v = VerbInfo::new("commit").alias("ci");
        assert!(v.matches("ci", true));
        assert!(v.matches("COMMIT", false));
        assert!(!v.matches("COMMIT", true));
    }
}
