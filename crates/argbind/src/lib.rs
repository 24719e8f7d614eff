//! argbind: declarative command-line argument binding.
//!
//! Targets describe their options, positional values and verbs as a
//! [`TypeDescriptor`]; a [`Parser`] turns an argument vector into either a
//! bound value or the complete list of [`Error`]s, and can turn a value back
//! into an argument vector.
//!
//! Pipeline: tokenizer → partitioner → mapper → converter → rules → builder,
//! with [`NameLookup`] answering "what is this name?" along the way.
//!
//! ```
//! use argbind::{OptionSpecification, Parser, TypeDescriptor, Value, ValueSpecification, ValueType};
//!
//! let descriptor = TypeDescriptor::builder("copy")
//!     .option("verbose", OptionSpecification::counter().short('v'))
//!     .option("mode", OptionSpecification::scalar(ValueType::Int).short('m').long("mode"))
//!     .value("files", ValueSpecification::sequence(0, ValueType::String).min(2))
//!     .build()?;
//!
//! let result = Parser::default().parse_descriptor(&descriptor, ["-vv", "--mode=644", "a", "b"]);
//! let bindings = result.into_result().unwrap();
//! assert_eq!(bindings.get("verbose"), Some(&Value::Count(2)));
//! assert_eq!(bindings.get_as::<u32>("mode")?, Some(644));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod chooser;
mod convert;
mod error;
pub mod help;
mod lookup;
pub mod mapper;
mod parser;
pub mod partition;
mod result;
pub mod rules;
mod settings;
mod specification;
mod target;
mod token;
pub mod tokenizer;
mod unparse;
mod value;

pub use chooser::VerbSet;
pub use convert::{ConverterRegistry, TypeConverter};
pub use error::{BindError, DeclarationError, Error, ErrorKind, NameInfo};
pub use lookup::{NameLookup, NameLookupResult, TargetInfo};
pub use parser::Parser;
pub use result::{ParserResult, TypeInfo};
pub use settings::{Culture, ParserSettings, ParserSettingsBuilder};
pub use specification::{
    EnumType, OptionSpecification, Property, Specification, SpecificationProperty, TargetType, TypeDescriptor,
    TypeDescriptorBuilder, ValueSpecification, ValueType, VerbInfo,
};
pub use target::{Bindings, PropertySource, Target};
pub use token::{Tag, Token};
pub use unparse::{format_command_line, format_command_line_args, quote, split_command_line, UnparserSettings};
pub use value::{CustomValue, FromValue, ToValue, Value};
