//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod text;

use anyhow::{anyhow, Result};
use argbind::{Bindings, Error};

/// Renders the outcome of one bind.
pub trait Renderer {
    fn bindings(&self, bindings: &Bindings) -> Result<String>;
    fn errors(&self, errors: &[Error]) -> Result<String>;
    /// Canonical unparsed form: the argument vector and its quoted line.
    fn command_line(&self, args: &[String], line: &str) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text or json", format)),
    }
}
