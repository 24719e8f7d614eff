//! Plain text: one `property = value` line per binding.

use crate::render::Renderer;
use anyhow::Result;
use argbind::help::render_errors;
use argbind::{Bindings, Error, Value};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn bindings(&self, bindings: &Bindings) -> Result<String> {
        let mut out = String::new();
        if let Some(verb) = bindings.verb() {
            out.push_str(&format!("verb = {}\n", verb));
        }
        for (name, value) in bindings.iter() {
            out.push_str(&format!("{} = {}\n", name, text_value(value)));
        }
        Ok(out)
    }

    fn errors(&self, errors: &[Error]) -> Result<String> {
        Ok(render_errors(errors))
    }

    fn command_line(&self, _args: &[String], line: &str) -> Result<String> {
        Ok(format!("{}\n", line))
    }
}

/// Lists in brackets so an empty one is still visible.
fn text_value(value: &Value) -> String {
    match value {
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(text_value).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argbind::NameInfo;

    #[test]
    fn renders_bindings_in_order() {
        let mut b = Bindings::new("copy", None);
        b.insert("verbose", Value::Count(2));
        b.insert("files", Value::List(vec![Value::Str("a".into()), Value::Str("b".into())]));
        b.insert("tags", Value::List(Vec::new()));
        assert_eq!(
            TextRenderer.bindings(&b).unwrap(),
            "verbose = 2\nfiles = [a, b]\ntags = []\n"
        );
    }

    #[test]
    fn renders_errors_as_sentences() {
        let errors = vec![Error::MissingRequiredOption(NameInfo::new(Some('n'), vec!["name".into()]))];
        assert_eq!(
            TextRenderer.errors(&errors).unwrap(),
            "ERROR(S):\n  Required option 'n, name' is missing.\n"
        );
    }
}
