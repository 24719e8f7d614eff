//! JSON schema → argbind descriptors.
//!
//! ```json
//! {
//!   "program": "cp",
//!   "version": "1.0",
//!   "target": {
//!     "name": "copy",
//!     "options": [
//!       { "property": "verbose", "kind": "counter", "short": "v" },
//!       { "property": "mode", "kind": "scalar", "type": "int", "long": "mode", "default": 644 }
//!     ],
//!     "values": [
//!       { "property": "files", "kind": "sequence", "index": 0, "min": 2 }
//!     ]
//!   }
//! }
//! ```
//!
//! A schema holds either one `target` or a list of `verbs`.

use anyhow::{anyhow, bail, Context, Result};
use argbind::{
    EnumType, OptionSpecification, ParserSettings, TypeConverter, TypeDescriptor, Value, ValueSpecification,
    ValueType, VerbInfo,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub target: Option<TargetSchema>,
    #[serde(default)]
    pub verbs: Vec<TargetSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSchema {
    pub name: String,
    #[serde(default)]
    pub verb: Option<VerbSchema>,
    #[serde(default)]
    pub options: Vec<OptionSchema>,
    #[serde(default)]
    pub values: Vec<ValueSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerbSchema {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Switch,
    Counter,
    Scalar,
    Sequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Scalar,
    Sequence,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSchema {
    pub property: String,
    pub kind: OptionKind,
    #[serde(default, rename = "type")]
    pub value_type: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub short: Option<char>,
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min: Option<usize>,
    #[serde(default)]
    pub max: Option<usize>,
    #[serde(default)]
    pub separator: Option<char>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub meta: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueSchema {
    pub property: String,
    pub kind: ValueKind,
    pub index: usize,
    #[serde(default, rename = "type")]
    pub value_type: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min: Option<usize>,
    #[serde(default)]
    pub max: Option<usize>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub meta: Option<String>,
}

impl Schema {
    pub fn from_json(text: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(text).context("invalid schema")?;
        match (&schema.target, schema.verbs.is_empty()) {
            (None, true) => bail!("schema declares neither a target nor verbs"),
            (Some(_), false) => bail!("schema declares both a target and verbs"),
            _ => Ok(schema),
        }
    }

    pub fn program(&self) -> &str {
        self.program.as_deref().unwrap_or("bindcheck")
    }
}

impl TargetSchema {
    pub fn to_descriptor(&self, settings: &ParserSettings) -> Result<TypeDescriptor> {
        let mut builder = TypeDescriptor::builder(self.name.as_str());
        if let Some(verb) = &self.verb {
            builder = builder.verb(verb.to_verb_info());
        }
        for option in &self.options {
            let spec = option
                .to_specification(settings)
                .with_context(|| format!("option '{}' in '{}'", option.property, self.name))?;
            builder = builder.option(option.property.as_str(), spec);
        }
        for value in &self.values {
            let spec = value
                .to_specification(settings)
                .with_context(|| format!("value '{}' in '{}'", value.property, self.name))?;
            builder = builder.value(value.property.as_str(), spec);
        }
        builder
            .build()
            .with_context(|| format!("invalid declaration of '{}'", self.name))
    }
}

impl VerbSchema {
    fn to_verb_info(&self) -> VerbInfo {
        let mut info = VerbInfo::new(self.name.as_str()).help(self.help.as_str());
        for alias in &self.aliases {
            info = info.alias(alias.as_str());
        }
        if self.hidden {
            info = info.hidden();
        }
        if self.default {
            info = info.default_verb();
        }
        info
    }
}

impl OptionSchema {
    fn to_specification(&self, settings: &ParserSettings) -> Result<OptionSpecification> {
        let value_type = value_type(self.value_type.as_deref(), &self.choices)?;
        let mut spec = match self.kind {
            OptionKind::Switch => OptionSpecification::switch(),
            OptionKind::Counter => OptionSpecification::counter(),
            OptionKind::Scalar => OptionSpecification::scalar(value_type.clone()),
            OptionKind::Sequence => OptionSpecification::sequence(value_type.clone()),
        };
        if let Some(short) = self.short {
            spec = spec.short(short);
        }
        if let Some(long) = &self.long {
            spec = spec.long(long.as_str());
        }
        if self.required {
            spec = spec.required();
        }
        if let Some(min) = self.min {
            spec = spec.min(min);
        }
        if let Some(max) = self.max {
            spec = spec.max(max);
        }
        if let Some(separator) = self.separator {
            spec = spec.separator(separator);
        }
        if let Some(default) = &self.default {
            let sequence = self.kind == OptionKind::Sequence;
            spec = spec.default_value(default_value(default, &value_type, sequence, settings)?);
        }
        if let Some(set) = &self.set {
            spec = spec.set_name(set.as_str());
        }
        if let Some(group) = &self.group {
            spec = spec.group(group.as_str());
        }
        if self.hidden {
            spec = spec.hidden();
        }
        if let Some(meta) = &self.meta {
            spec = spec.meta_value(meta.as_str());
        }
        Ok(spec.help(self.help.as_str()))
    }
}

impl ValueSchema {
    fn to_specification(&self, settings: &ParserSettings) -> Result<ValueSpecification> {
        let value_type = value_type(self.value_type.as_deref(), &self.choices)?;
        let mut spec = match self.kind {
            ValueKind::Scalar => ValueSpecification::scalar(self.index, value_type.clone()),
            ValueKind::Sequence => ValueSpecification::sequence(self.index, value_type.clone()),
        };
        if self.required {
            spec = spec.required();
        }
        if let Some(min) = self.min {
            spec = spec.min(min);
        }
        if let Some(max) = self.max {
            spec = spec.max(max);
        }
        if let Some(default) = &self.default {
            let sequence = self.kind == ValueKind::Sequence;
            spec = spec.default_value(default_value(default, &value_type, sequence, settings)?);
        }
        if self.hidden {
            spec = spec.hidden();
        }
        if let Some(meta) = &self.meta {
            spec = spec.meta_name(meta.as_str());
        }
        Ok(spec.help(self.help.as_str()))
    }
}

/// `"int"`, `"enum"` with `choices`, or a custom converter name such as `"path"`.
fn value_type(name: Option<&str>, choices: &[String]) -> Result<ValueType> {
    if !choices.is_empty() && name.is_some_and(|n| n != "enum") {
        bail!("choices are only allowed on enum types");
    }
    Ok(match name.unwrap_or(if choices.is_empty() { "string" } else { "enum" }) {
        "bool" => ValueType::Bool,
        "int" => ValueType::Int,
        "uint" => ValueType::UInt,
        "float" => ValueType::Float,
        "char" => ValueType::Char,
        "string" => ValueType::String,
        "enum" if choices.is_empty() => bail!("enum type without choices"),
        "enum" => ValueType::Enum(EnumType::from_names(choices.iter().map(String::as_str))),
        custom => ValueType::Custom(custom.to_string()),
    })
}

/// Defaults are written in JSON but converted exactly like argument text.
fn default_value(
    raw: &serde_json::Value,
    value_type: &ValueType,
    sequence: bool,
    settings: &ParserSettings,
) -> Result<Value> {
    let converter = TypeConverter::new(
        settings.parsing_culture(),
        settings.case_insensitive_enum_values(),
        settings.converters(),
    );
    let convert = |raw: &str| converter.convert_scalar(raw, value_type).map_err(|e| anyhow!("bad default: {}", e));
    match raw {
        serde_json::Value::Array(items) if sequence => {
            let items = items.iter().map(|item| convert(&json_text(item))).collect::<Result<Vec<_>>>()?;
            Ok(Value::List(items))
        }
        serde_json::Value::Array(_) => bail!("list default on a non-sequence"),
        other if sequence => Ok(Value::List(vec![convert(&json_text(other))?])),
        other => convert(&json_text(other)),
    }
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
