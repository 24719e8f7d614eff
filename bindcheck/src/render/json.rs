//! JSON renderer: structured output for tooling integration.

use crate::render::Renderer;
use anyhow::{Context, Result};
use argbind::{Bindings, Error, ErrorKind};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Report<'a> {
    Parsed {
        #[serde(flatten)]
        bindings: &'a Bindings,
    },
    Failed {
        errors: Vec<ErrorReport>,
    },
    Unparsed {
        args: &'a [String],
        line: &'a str,
    },
}

#[derive(Serialize)]
struct ErrorReport {
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl From<&Error> for ErrorReport {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            name: error.name_info().filter(|n| !n.is_empty()).map(|n| n.name_text()),
            token: error.token().map(str::to_string),
        }
    }
}

fn to_json(report: &Report<'_>) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    out.push('\n');
    Ok(out)
}

impl Renderer for JsonRenderer {
    fn bindings(&self, bindings: &Bindings) -> Result<String> {
        to_json(&Report::Parsed { bindings })
    }

    fn errors(&self, errors: &[Error]) -> Result<String> {
        to_json(&Report::Failed { errors: errors.iter().map(ErrorReport::from).collect() })
    }

    fn command_line(&self, args: &[String], line: &str) -> Result<String> {
        to_json(&Report::Unparsed { args, line })
    }
}
