//! Name and type lookup over a descriptor's option specifications.
//!
//! The tokenizer asks "what kind of option is `name`?"; the partitioner asks
//! "how many tokens does it take?". Both answers come from here and are pure
//! functions of the descriptor and settings.

use crate::settings::ParserSettings;
use crate::specification::{OptionSpecification, TargetType, TypeDescriptor};

/// Classification of an option name for the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameLookupResult {
    NoOptionFound,
    BooleanOptionFound,
    ScalarOptionFound,
    SequenceOptionFound,
}

/// Cardinality information for the partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    pub target_type: TargetType,
    pub max: Option<usize>,
    /// Index of the owning property in the descriptor; `None` for the
    /// implicit help and version switches.
    pub index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Implicit {
    Help,
    Version,
}

#[derive(Debug, Clone)]
struct Entry {
    spec: OptionSpecification,
    index: Option<usize>,
    implicit: Option<Implicit>,
}

/// Options of one descriptor, plus `--help`/`--version` when enabled and not
/// declared by the user.
#[derive(Debug, Clone)]
pub struct NameLookup {
    entries: Vec<Entry>,
    case_sensitive: bool,
}

impl NameLookup {
    pub fn new(descriptor: &TypeDescriptor, settings: &ParserSettings) -> Self {
        let case_sensitive = settings.case_sensitive();
        let mut entries: Vec<Entry> = descriptor
            .properties()
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                p.specification().as_option().map(|spec| Entry {
                    spec: spec.clone(),
                    index: Some(index),
                    implicit: None,
                })
            })
            .collect();

        let taken = |entries: &[Entry], name: &str| {
            entries.iter().any(|e| e.spec.matches_name(name, case_sensitive))
        };
        let add = |entries: &mut Vec<Entry>, long: &str, short: char, with_short: bool, kind: Implicit| {
            if taken(entries, long) {
                return;
            }
            let mut spec = OptionSpecification::switch().long(long);
            if with_short && !taken(entries, &short.to_string()) {
                spec = spec.short(short);
            }
            entries.push(Entry { spec, index: None, implicit: Some(kind) });
        };
        if settings.auto_help() {
            add(&mut entries, "help", 'h', settings.auto_help_short_name(), Implicit::Help);
        }
        if settings.auto_version() {
            add(&mut entries, "version", 'V', settings.auto_version_short_name(), Implicit::Version);
        }

        Self { entries, case_sensitive }
    }

    fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.spec.matches_name(name, self.case_sensitive))
    }

    /// The specification owning `name`, implicit switches included.
    pub fn find(&self, name: &str) -> Option<&OptionSpecification> {
        self.find_entry(name).map(|e| &e.spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_entry(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> NameLookupResult {
        match self.find_entry(name).map(|e| e.spec.target_type()) {
            None => NameLookupResult::NoOptionFound,
            Some(TargetType::Switch) => NameLookupResult::BooleanOptionFound,
            Some(TargetType::Scalar) => NameLookupResult::ScalarOptionFound,
            Some(TargetType::Sequence) => NameLookupResult::SequenceOptionFound,
        }
    }

    /// Separator declared by the option named `name`, if any.
    pub fn having_separator(&self, name: &str) -> Option<char> {
        self.find_entry(name).and_then(|e| e.spec.separator_char())
    }

    pub fn find_type_descriptor(&self, name: &str) -> Option<TargetInfo> {
        self.find_entry(name).map(|e| TargetInfo {
            target_type: e.spec.target_type(),
            max: e.spec.max_items(),
            index: e.index,
        })
    }

    /// `name` selects the implicit help switch.
    pub fn is_help(&self, name: &str) -> bool {
        self.find_entry(name).and_then(|e| e.implicit) == Some(Implicit::Help)
    }

    /// `name` selects the implicit version switch.
    pub fn is_version(&self, name: &str) -> bool {
        self.find_entry(name).and_then(|e| e.implicit) == Some(Implicit::Version)
    }
}
