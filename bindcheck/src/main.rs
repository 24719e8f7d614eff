//! bindcheck: bind an argument vector against a JSON schema.
//!
//! Reads a schema of options, positional values and verbs, binds the
//! arguments given after `--` and prints what came out:
//!
//! - the bound values (exit 0)
//! - help or version text when they were requested (exit 0)
//! - every error found (exit 2)
//!
//! With `--unparse` a successful bind is printed back as its canonical
//! command line instead.

mod render;
mod schema;

use anyhow::{Context, Result};
use argbind::help::HelpText;
use argbind::{
    Bindings, ConverterRegistry, Culture, Error, ParserResult, ParserSettings, TypeDescriptor, UnparserSettings,
    VerbSet,
};
use clap::{Args, Parser};
use schema::Schema;
use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bindcheck",
    version,
    about = "Bind arguments against a JSON schema and report values, errors or help"
)]
struct Cli {
    /// Schema file describing the target or its verbs
    #[arg(short = 's', long)]
    schema: PathBuf,

    /// Output format: text (default), json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Print the canonical command line of the bound values
    #[arg(long)]
    unparse: bool,

    #[command(flatten)]
    parse: ParseFlags,

    #[command(flatten)]
    unparse_flags: UnparseFlags,

    /// Arguments to bind, after `--`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Args)]
struct ParseFlags {
    /// Match option names case-insensitively
    #[arg(long)]
    ignore_case: bool,

    /// Match enum members case-insensitively
    #[arg(long)]
    ignore_enum_case: bool,

    /// Treat `--` as the end of options
    #[arg(long)]
    dash_dash: bool,

    /// Drop unknown options instead of failing
    #[arg(long)]
    ignore_unknown: bool,

    #[arg(long)]
    no_auto_help: bool,

    #[arg(long)]
    no_auto_version: bool,

    /// Accept `-h` for help
    #[arg(long)]
    help_short: bool,

    /// Accept `-V` for version
    #[arg(long)]
    version_short: bool,

    /// Allow options to be repeated
    #[arg(long)]
    multi_instance: bool,

    /// getopt conventions: implies --dash-dash and --multi-instance
    #[arg(long)]
    getopt: bool,

    /// Stop option processing at the first operand
    #[arg(long)]
    posixly_correct: bool,

    /// Help text width
    #[arg(long, default_value_t = 80)]
    width: usize,

    #[arg(long, default_value_t = '.')]
    decimal_separator: char,

    #[arg(long)]
    group_separator: Option<char>,
}

#[derive(Args)]
struct UnparseFlags {
    /// Prefer `-n` over `--name`
    #[arg(long)]
    prefer_short: bool,

    /// Fold short switches into one argument
    #[arg(long)]
    group_switches: bool,

    /// Write `--name=value`
    #[arg(long)]
    use_equals: bool,

    #[arg(long)]
    show_hidden: bool,

    /// Leave out values equal to their default
    #[arg(long)]
    skip_default: bool,
}

impl ParseFlags {
    fn settings(&self) -> ParserSettings {
        // Custom value types the schema can name.
        let converters = ConverterRegistry::new()
            .register_from_str::<PathBuf>("path")
            .register_from_str::<IpAddr>("ip");
        ParserSettings::builder()
            .case_sensitive(!self.ignore_case)
            .case_insensitive_enum_values(self.ignore_enum_case)
            .enable_dash_dash(self.dash_dash)
            .ignore_unknown_arguments(self.ignore_unknown)
            .auto_help(!self.no_auto_help)
            .auto_version(!self.no_auto_version)
            .auto_help_short_name(self.help_short)
            .auto_version_short_name(self.version_short)
            .allow_multi_instance(self.multi_instance)
            .getopt_mode(self.getopt)
            .posixly_correct(self.posixly_correct)
            .maximum_display_width(self.width)
            .parsing_culture(Culture::new(self.decimal_separator, self.group_separator))
            .converters(converters)
            .build()
    }
}

impl UnparseFlags {
    fn settings(&self) -> UnparserSettings {
        UnparserSettings::default()
            .with_prefer_short_name(self.prefer_short)
            .with_group_switches(self.group_switches)
            .with_use_equal_token(self.use_equals)
            .with_show_hidden(self.show_hidden)
            .with_skip_default(self.skip_default)
    }
}

/// Descriptors loaded from a schema.
enum Catalog {
    Single(TypeDescriptor),
    Verbs(VerbSet<Bindings>),
}

impl Catalog {
    fn load(schema: &Schema, settings: &ParserSettings) -> Result<Self> {
        if let Some(target) = &schema.target {
            return Ok(Catalog::Single(target.to_descriptor(settings)?));
        }
        let mut verbs = VerbSet::new();
        for verb in &schema.verbs {
            verbs = verbs
                .descriptor(verb.to_descriptor(settings)?, |bindings: Bindings| bindings)
                .with_context(|| format!("invalid verb '{}'", verb.name))?;
        }
        Ok(Catalog::Verbs(verbs))
    }

    fn parse(&self, parser: &argbind::Parser, args: &[String]) -> ParserResult<Bindings> {
        match self {
            Catalog::Single(descriptor) => parser.parse_descriptor(descriptor, args.iter().cloned()),
            Catalog::Verbs(verbs) => parser.parse_verbs(verbs, args.iter().cloned()),
        }
    }

    fn descriptor(&self, type_name: &str) -> Option<&TypeDescriptor> {
        match self {
            Catalog::Single(descriptor) => Some(descriptor).filter(|d| d.name() == type_name),
            Catalog::Verbs(verbs) => verbs.descriptors().find(|d| d.name() == type_name),
        }
    }

    /// Help for the verb the request names, else for the whole catalog.
    fn help(&self, program: &str, result: &ParserResult<Bindings>, settings: &ParserSettings) -> HelpText {
        let requested = match result.errors().first() {
            Some(Error::HelpVerbRequested { type_name, .. }) => type_name.as_deref(),
            _ => Some(result.type_info().current()),
        };
        match (self, requested.and_then(|name| self.descriptor(name))) {
            (_, Some(descriptor)) => HelpText::for_descriptor(program, descriptor, settings),
            (Catalog::Single(descriptor), None) => HelpText::for_descriptor(program, descriptor, settings),
            (Catalog::Verbs(verbs), None) => HelpText::for_verbs(program, verbs, settings),
        }
    }
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.schema)
        .with_context(|| format!("failed to read {}", cli.schema.display()))?;
    let schema = Schema::from_json(&text).with_context(|| format!("failed to load {}", cli.schema.display()))?;
    let renderer = render::create_renderer(&cli.format)?;

    let settings = cli.parse.settings();
    let catalog = Catalog::load(&schema, &settings)?;
    let parser = argbind::Parser::new(settings);
    debug!(args = ?cli.args, "binding");
    let result = catalog.parse(&parser, &cli.args);

    if result.is_help_request() {
        let mut help = catalog.help(schema.program(), &result, parser.settings());
        if let Some(heading) = version_line(&schema) {
            help = help.with_heading(heading);
        }
        print!("{}", help);
        return Ok(ExitCode::SUCCESS);
    }
    if result.is_version_request() {
        println!("{}", version_line(&schema).unwrap_or_else(|| schema.program().to_string()));
        return Ok(ExitCode::SUCCESS);
    }

    match result.into_result() {
        Ok(bindings) if cli.unparse => {
            let descriptor = catalog
                .descriptor(bindings.type_name())
                .context("bound type is missing from the schema")?;
            let settings = cli.unparse_flags.settings();
            let args = parser.format_command_line_args(descriptor, &bindings, &settings);
            let line = parser.format_command_line(descriptor, &bindings, &settings);
            print!("{}", renderer.command_line(&args, &line)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(bindings) => {
            print!("{}", renderer.bindings(&bindings)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            debug!(errors = errors.len(), "bind failed");
            let out = renderer.errors(&errors)?;
            if cli.format == "json" {
                print!("{}", out);
            } else {
                eprint!("{}", out);
            }
            Ok(ExitCode::from(2))
        }
    }
}

fn version_line(schema: &Schema) -> Option<String> {
    schema
        .version
        .as_deref()
        .map(|version| format!("{} {}", schema.program(), version))
}

/// Events go to stderr; `BINDCHECK_LOG` takes an env-filter directive.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("BINDCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
