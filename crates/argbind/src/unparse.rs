//! Instance → command line.
//!
//! The output is accepted back by the tokenizer with the same settings, so
//! `parse(format_command_line_args(x))` reproduces `x`.

use crate::settings::{Culture, ParserSettings};
use crate::specification::{OptionSpecification, TargetType, TypeDescriptor, ValueSpecification};
use crate::target::PropertySource;
use crate::value::Value;

/// Formatting choices for [`format_command_line_args`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnparserSettings {
    /// `-n` instead of `--name` where both exist.
    pub prefer_short_name: bool,
    /// Fold short switches into one `-abc` argument.
    pub group_switches: bool,
    /// `--name=value` instead of `--name value`.
    pub use_equal_token: bool,
    pub show_hidden: bool,
    /// Omit options whose value equals their declared default.
    pub skip_default: bool,
}

impl UnparserSettings {
    pub fn with_prefer_short_name(mut self, yes: bool) -> Self {
        self.prefer_short_name = yes;
        self
    }

    pub fn with_group_switches(mut self, yes: bool) -> Self {
        self.group_switches = yes;
        self
    }

    pub fn with_use_equal_token(mut self, yes: bool) -> Self {
        self.use_equal_token = yes;
        self
    }

    pub fn with_show_hidden(mut self, yes: bool) -> Self {
        self.show_hidden = yes;
        self
    }

    pub fn with_skip_default(mut self, yes: bool) -> Self {
        self.skip_default = yes;
        self
    }
}

/// Argument vector reproducing `source`: verb name, options in declaration
/// order, `--` when dash-dash is enabled, then positional values by index.
///
/// Without dash-dash, positional values move in front of the options when
/// the last option written is a sequence that could still claim them. Under
/// posixly-correct parsing they always stay last.
pub fn format_command_line_args<S: PropertySource + ?Sized>(
    descriptor: &TypeDescriptor,
    source: &S,
    parser: &ParserSettings,
    settings: &UnparserSettings,
) -> Vec<String> {
    let culture = parser.parsing_culture();
    let mut out = Vec::new();
    if let Some(verb) = descriptor.verb() {
        out.push(verb.name().to_string());
    }

    let mut grouped = String::new();
    let mut options = Vec::new();
    let mut open_sequence = false;
    for property in descriptor.properties() {
        let Some(spec) = property.specification().as_option() else {
            continue;
        };
        if spec.is_hidden() && !settings.show_hidden {
            continue;
        }
        let Some(value) = source.value(property.name()) else {
            continue;
        };
        if settings.skip_default && spec.default() == Some(&value) {
            continue;
        }
        if spec.target_type() == TargetType::Switch && settings.group_switches {
            if let Some(short) = spec.short_name() {
                grouped.extend(std::iter::repeat(short).take(switch_count(spec, &value)));
                continue;
            }
        }
        let before = options.len();
        let open = format_option(spec, &value, culture, settings, &mut options);
        if options.len() > before {
            open_sequence = open;
        }
    }
    if !grouped.is_empty() {
        out.push(format!("-{}", grouped));
    }

    let mut values = Vec::new();
    for property in descriptor.values() {
        let Some(spec) = property.specification().as_value() else {
            continue;
        };
        if let Some(value) = source.value(property.name()) {
            format_positional(spec, &value, culture, &mut values);
        }
    }
    if values.is_empty() {
        out.extend(options);
    } else if parser.enable_dash_dash() {
        out.extend(options);
        out.push("--".to_string());
        out.extend(values);
    } else if open_sequence && !parser.posixly_correct() {
        out.extend(values);
        out.extend(options);
    } else {
        out.extend(options);
        out.extend(values);
    }
    out
}

/// Single quoted command line string.
pub fn format_command_line<S: PropertySource + ?Sized>(
    descriptor: &TypeDescriptor,
    source: &S,
    parser: &ParserSettings,
    settings: &UnparserSettings,
) -> String {
    format_command_line_args(descriptor, source, parser, settings)
        .iter()
        .map(|arg| quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// How many times a switch is emitted.
fn switch_count(spec: &OptionSpecification, value: &Value) -> usize {
    match value {
        Value::Bool(true) => 1,
        Value::Count(n) => *n as usize,
        Value::Int(n) if spec.is_flag_counter() => usize::try_from(*n).unwrap_or(0),
        Value::UInt(n) if spec.is_flag_counter() => usize::try_from(*n).unwrap_or(0),
        _ => 0,
    }
}

/// Returns true when the option ends in a space-separated sequence with
/// room for more items.
fn format_option(
    spec: &OptionSpecification,
    value: &Value,
    culture: &Culture,
    settings: &UnparserSettings,
    out: &mut Vec<String>,
) -> bool {
    let (name, is_long) = match (spec.short_name(), spec.long_name()) {
        (Some(s), _) if settings.prefer_short_name => (format!("-{}", s), false),
        (_, Some(l)) => (format!("--{}", l), true),
        (Some(s), None) => (format!("-{}", s), false),
        (None, None) => return false,
    };
    let equal = settings.use_equal_token && is_long;

    match spec.target_type() {
        TargetType::Switch => {
            for _ in 0..switch_count(spec, value) {
                out.push(name.clone());
            }
        }
        TargetType::Scalar => {
            push_with_value(out, &name, format_value(value, culture), equal);
        }
        TargetType::Sequence => {
            let items = value.as_list().unwrap_or(std::slice::from_ref(value));
            if items.is_empty() {
                return false;
            }
            match spec.separator_char() {
                Some(sep) => {
                    let joined = items
                        .iter()
                        .map(|v| format_value(v, culture))
                        .collect::<Vec<_>>()
                        .join(&sep.to_string());
                    push_with_value(out, &name, joined, equal);
                }
                None => {
                    out.push(name.clone());
                    out.extend(items.iter().map(|v| format_value(v, culture)));
                    return spec.max_items().map_or(true, |max| items.len() < max);
                }
            }
        }
    }
    false
}

fn push_with_value(out: &mut Vec<String>, name: &str, text: String, equal: bool) {
    if equal {
        out.push(format!("{}={}", name, text));
    } else {
        out.push(name.to_string());
        out.push(text);
    }
}

fn format_positional(spec: &ValueSpecification, value: &Value, culture: &Culture, out: &mut Vec<String>) {
    match (spec.target_type(), value) {
        (TargetType::Sequence, Value::List(items)) => {
            out.extend(items.iter().map(|v| format_value(v, culture)));
        }
        (TargetType::Sequence, _) if value.is_empty() => {}
        _ => out.push(format_value(value, culture)),
    }
}

/// Text of one value as the converter reads it back.
fn format_value(value: &Value, culture: &Culture) -> String {
    match value {
        Value::Float(x) => {
            let text = x.to_string();
            if culture.decimal_separator() == '.' {
                text
            } else {
                text.replace('.', &culture.decimal_separator().to_string())
            }
        }
        other => other.to_string(),
    }
}

/// Wrap in double quotes when the argument holds a space or a quote, or is
/// empty; embedded quotes become `\"`.
pub fn quote(arg: &str) -> String {
    if arg.is_empty() {
        return "\"\"".to_string();
    }
    if arg.contains(' ') || arg.contains('"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Inverse of [`format_command_line`]: split on unquoted whitespace,
/// honouring double quotes and `\"` escapes.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
                in_arg = true;
            }
            '"' => {
                quoted = !quoted;
                in_arg = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{OptionSpecification, ValueSpecification, ValueType, VerbInfo};
    use crate::target::Bindings;
    use pretty_assertions::assert_eq;

    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("opts")
            .option("all", OptionSpecification::switch().short('a').long("all"))
            .option("verbose", OptionSpecification::counter().short('v'))
            .option("name", OptionSpecification::scalar(ValueType::String).short('n').long("name"))
            .option(
                "level",
                OptionSpecification::scalar(ValueType::Int).long("level").default_value(Value::Int(1)),
            )
            .option("csv", OptionSpecification::sequence(ValueType::String).long("csv").separator(','))
            .option("secret", OptionSpecification::scalar(ValueType::String).long("secret").hidden())
            .value("file", ValueSpecification::scalar(0, ValueType::String))
            .build()
            .unwrap()
    }

    fn bindings() -> Bindings {
        let mut b = Bindings::new("opts", None);
        b.insert("all", Value::Bool(true));
        b.insert("verbose", Value::Count(2));
        b.insert("name", Value::Str("two words".into()));
        b.insert("level", Value::Int(1));
        b.insert("csv", Value::List(vec![Value::Str("a".into()), Value::Str("b".into())]));
        b.insert("secret", Value::Str("s".into()));
        b.insert("file", Value::Str("in.txt".into()));
        b
    }

    #[test]
    fn default_formatting() {
        let line = format_command_line(
            &descriptor(),
            &bindings(),
            &ParserSettings::default(),
            &UnparserSettings::default(),
        );
        assert_eq!(line, r#"--all -v -v --name "two words" --level 1 --csv a,b in.txt"#);
    }

    #[test]
    fn short_grouped_equal_hidden_and_defaults() {
        let settings = UnparserSettings::default()
            .with_prefer_short_name(true)
            .with_group_switches(true)
            .with_use_equal_token(true)
            .with_show_hidden(true)
            .with_skip_default(true);
        let parser = ParserSettings::builder().enable_dash_dash(true).build();
        let args = format_command_line_args(&descriptor(), &bindings(), &parser, &settings);
        assert_eq!(
            args,
            vec!["-avv", "-n", "two words", "--csv=a,b", "--secret=s", "--", "in.txt"]
        );
    }

    #[test]
    fn verb_name_comes_first() {
        let d = TypeDescriptor::builder("Commit")
            .verb(VerbInfo::new("commit"))
            .option("amend", OptionSpecification::switch().long("amend"))
            .build()
            .unwrap();
        let mut b = Bindings::new("Commit", Some("commit".into()));
        b.insert("amend", Value::Bool(true));
        let args = format_command_line_args(&d, &b, &ParserSettings::default(), &UnparserSettings::default());
        assert_eq!(args, vec!["commit", "--amend"]);
    }

    fn tagged() -> TypeDescriptor {
        TypeDescriptor::builder("tagged")
            .option("tags", OptionSpecification::sequence(ValueType::String).long("tags"))
            .option("pair", OptionSpecification::sequence(ValueType::Int).long("pair").max(2))
            .value("file", ValueSpecification::scalar(0, ValueType::String))
            .build()
            .unwrap()
    }

    #[test]
    fn positionals_move_before_an_open_sequence() {
        let mut b = Bindings::new("tagged", None);
        b.insert("tags", Value::List(vec![Value::Str("a".into())]));
        b.insert("file", Value::Str("in.txt".into()));
        let unparse = |b: &Bindings, parser: &ParserSettings| {
            format_command_line_args(&tagged(), b, parser, &UnparserSettings::default())
        };
        assert_eq!(unparse(&b, &ParserSettings::default()), vec!["in.txt", "--tags", "a"]);
        assert_eq!(
            unparse(&b, &ParserSettings::builder().enable_dash_dash(true).build()),
            vec!["--tags", "a", "--", "in.txt"]
        );
        assert_eq!(
            unparse(&b, &ParserSettings::builder().posixly_correct(true).build()),
            vec!["--tags", "a", "in.txt"]
        );

        b.insert("pair", Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(
            unparse(&b, &ParserSettings::default()),
            vec!["--tags", "a", "--pair", "1", "2", "in.txt"]
        );
    }

    #[test]
    fn empty_strings_are_written() {
        let mut b = Bindings::new("opts", None);
        b.insert("name", Value::Str(String::new()));
        b.insert("file", Value::Str(String::new()));
        let parser = ParserSettings::default();
        let args = format_command_line_args(&descriptor(), &b, &parser, &UnparserSettings::default());
        assert_eq!(args, vec!["--name", "", ""]);
        let line = format_command_line(&descriptor(), &b, &parser, &UnparserSettings::default());
        assert_eq!(line, r#"--name "" """#);

        let equal = UnparserSettings::default().with_use_equal_token(true);
        assert_eq!(format_command_line_args(&descriptor(), &b, &parser, &equal), vec!["--name=", ""]);
    }

    #[test]
    fn quoting_round_trips() {
        let args = vec!["plain".to_string(), "a b".into(), "say \"hi\"".into(), String::new()];
        let line = args.iter().map(|a| quote(a)).collect::<Vec<_>>().join(" ");
        assert_eq!(line, r#"plain "a b" "say \"hi\"" """#);
        assert_eq!(split_command_line(&line), args);
    }

    #[test]
    fn floats_use_culture() {
        let culture = Culture::new(',', Some('.'));
        assert_eq!(format_value(&Value::Float(1.5), &culture), "1,5");
        assert_eq!(format_value(&Value::Float(1.5), &Culture::invariant()), "1.5");
    }
}
