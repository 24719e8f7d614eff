//! Plain-text help and error rendering.
//!
//! Layout:
//!
//! ```text
//! Usage:
//!   tool [options] <input> ...rest
//!
//! Arguments:
//!    input string            Input file
//!
//! Options:
//!  ! -n, --name string (default: x)
//!            Description, wrapped at the display width
//! ```

use crate::chooser::VerbSet;
use crate::error::Error;
use crate::settings::ParserSettings;
use crate::specification::{OptionSpecification, Property, TargetType, TypeDescriptor, ValueSpecification};
use std::fmt;

/// Column where argument descriptions start.
const FIELD_WIDTH: usize = 24;
/// Indent of option descriptions.
const DESCRIPTION_INDENT: usize = 11;

/// Sentences for every error that is not a help or version request,
/// under an `ERROR(S):` heading. Empty when there is nothing to report.
pub fn render_errors(errors: &[Error]) -> String {
    let lines: Vec<String> = errors
        .iter()
        .filter(|e| !e.stops_processing())
        .map(|e| format!("  {}", e))
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    format!("ERROR(S):\n{}\n", lines.join("\n"))
}

/// Rendered help screen for one descriptor or a verb family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    heading: Option<String>,
    usage: String,
    commands: Vec<(String, String)>,
    arguments: Vec<(String, String)>,
    options: Vec<(String, String)>,
    footer: Option<String>,
    width: usize,
}

impl HelpText {
    pub fn for_descriptor(program: &str, descriptor: &TypeDescriptor, settings: &ParserSettings) -> Self {
        let mut params: Vec<String> = Vec::new();
        let visible_options: Vec<&OptionSpecification> =
            descriptor.options().filter(|o| !o.is_hidden()).collect();
        if !visible_options.is_empty() || settings.auto_help() || settings.auto_version() {
            params.push("[options]".to_string());
        }

        let mut arguments = Vec::new();
        for property in descriptor.values() {
            let Some(spec) = property.specification().as_value() else {
                continue;
            };
            if spec.is_hidden() {
                continue;
            }
            let name = value_display_name(property, spec);
            params.push(if spec.target_type() == TargetType::Sequence {
                format!("...{}", name)
            } else if !spec.is_required() || spec.default().is_some() {
                format!("[{}]", name)
            } else {
                format!("<{}>", name)
            });
            arguments.push((format!("{} {}", name, spec.value_type().display_name()), spec.help_text().to_string()));
        }

        let mut options: Vec<(String, String)> = visible_options
            .iter()
            .map(|o| (format_option_field(o), o.help_text().to_string()))
            .collect();
        let declared = |name: &str| descriptor.options().any(|o| o.matches_name(name, settings.case_sensitive()));
        if settings.auto_help() && !declared("help") {
            let short = settings.auto_help_short_name() && !declared("h");
            options.push((implicit_field('h', "help", short), "Display this help screen.".to_string()));
        }
        if settings.auto_version() && !declared("version") {
            let short = settings.auto_version_short_name() && !declared("V");
            options.push((implicit_field('V', "version", short), "Display version information.".to_string()));
        }

        let mut usage = program.to_string();
        if let Some(verb) = descriptor.verb() {
            usage = format!("{} {}", usage, verb.name());
        }
        if !params.is_empty() {
            usage = format!("{} {}", usage, params.join(" "));
        }

        Self {
            heading: None,
            usage,
            commands: Vec::new(),
            arguments,
            options,
            footer: None,
            width: settings.maximum_display_width(),
        }
    }

    pub fn for_verbs<R>(program: &str, verbs: &VerbSet<R>, settings: &ParserSettings) -> Self {
        let mut commands: Vec<(String, String)> = verbs
            .descriptors()
            .filter_map(|d| d.verb())
            .filter(|v| !v.is_hidden())
            .map(|v| {
                let mut name = v.name().to_string();
                if !v.aliases().is_empty() {
                    name = format!("{}, {}", name, v.aliases().join(", "));
                }
                (name, v.help_text().to_string())
            })
            .collect();
        if settings.auto_help() {
            commands.push(("help".to_string(), "Display more information on a specific command.".to_string()));
        }
        if settings.auto_version() {
            commands.push(("version".to_string(), "Display version information.".to_string()));
        }
        Self {
            heading: None,
            usage: format!("{} <command> [args]", program),
            commands,
            arguments: Vec::new(),
            options: Vec::new(),
            footer: Some(format!("Use \"{} <command> --help\" for more information about a command.", program)),
            width: settings.maximum_display_width(),
        }
    }

    /// Text printed above the usage line, e.g. name and version.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }
}

impl fmt::Display for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(heading) = &self.heading {
            for line in heading.lines() {
                writeln!(f, "{}", line.trim_start())?;
            }
            writeln!(f)?;
        }
        if self.commands.is_empty() {
            writeln!(f, "Usage:")?;
            writeln!(f, "  {}", self.usage)?;
        } else {
            writeln!(f, "Usage: {}", self.usage)?;
            writeln!(f, "\nAvailable Commands:")?;
            for (name, desc) in &self.commands {
                write_columns(f, "  ", name, desc, self.width)?;
            }
        }

        if !self.arguments.is_empty() {
            writeln!(f, "\nArguments:")?;
            for (field, desc) in &self.arguments {
                write_columns(f, "   ", field, desc, self.width)?;
            }
        }

        if !self.options.is_empty() {
            writeln!(f, "\nOptions:")?;
            let indent = " ".repeat(DESCRIPTION_INDENT);
            for (field, desc) in &self.options {
                writeln!(f, "{}", field)?;
                for line in wrap(desc, self.width.saturating_sub(DESCRIPTION_INDENT)) {
                    writeln!(f, "{}{}", indent, line)?;
                }
            }
        }

        if let Some(footer) = &self.footer {
            writeln!(f)?;
            writeln!(f, "{}", footer)?;
        }
        Ok(())
    }
}

/// `name` padded to the field column, then the wrapped description.
fn write_columns(f: &mut fmt::Formatter<'_>, prefix: &str, name: &str, desc: &str, width: usize) -> fmt::Result {
    let lines = wrap(desc, width.saturating_sub(prefix.len() + FIELD_WIDTH));
    let mut lines = lines.iter();
    match lines.next() {
        Some(first) => writeln!(f, "{}{:width$}{}", prefix, name, first, width = FIELD_WIDTH)?,
        None => writeln!(f, "{}{}", prefix, name)?,
    }
    let pad = " ".repeat(prefix.len() + FIELD_WIDTH);
    for line in lines {
        writeln!(f, "{}{}", pad, line)?;
    }
    Ok(())
}

fn value_display_name(property: &Property, spec: &ValueSpecification) -> String {
    spec.meta().map(str::to_string).unwrap_or_else(|| property.name().to_string())
}

/// " ! -s, --name type (default: val)" for one option.
fn format_option_field(spec: &OptionSpecification) -> String {
    let mut out = String::new();
    out.push_str(if spec.is_required() { " ! " } else { "   " });

    match (spec.short_name(), spec.long_name()) {
        (Some(s), Some(l)) => out.push_str(&format!("-{}, --{}", s, l)),
        (Some(s), None) => out.push_str(&format!("-{}", s)),
        (None, Some(l)) => out.push_str(&format!("    --{}", l)),
        (None, None) => {}
    }

    if spec.target_type() != TargetType::Switch {
        out.push(' ');
        if spec.target_type() == TargetType::Sequence {
            out.push_str("...");
        }
        out.push_str(spec.meta().unwrap_or_else(|| spec.value_type().display_name()));
        if let Some(default) = spec.default() {
            out.push_str(&format!(" (default: {})", default));
        }
    }
    out
}

fn implicit_field(short: char, long: &str, with_short: bool) -> String {
    if with_short {
        format!("   -{}, --{}", short, long)
    } else {
        format!("       --{}", long)
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
