//! Validation over the fully mapped property set.
//!
//! Every rule is a pure function returning its own error kind; [`validate`]
//! runs all of them so one parse reports everything it can detect.

use crate::error::{Error, NameInfo};
use crate::specification::{names_equal, OptionSpecification, Specification, SpecificationProperty, TargetType};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Occurrence count of each option property, keyed by property name.
pub type Occurrences = HashMap<String, usize>;

pub fn validate(
    properties: &[SpecificationProperty<'_>],
    occurrences: &Occurrences,
    allow_multi_instance: bool,
    case_sensitive: bool,
) -> Vec<Error> {
    let mut errors = enforce_group_ambiguity(properties, case_sensitive);
    errors.extend(enforce_missing_group(properties));
    errors.extend(enforce_mutually_exclusive_set(properties));
    errors.extend(enforce_required(properties));
    errors.extend(enforce_range(properties));
    if !allow_multi_instance {
        errors.extend(enforce_single(properties, occurrences));
    }
    errors
}

fn options<'p, 'a>(
    properties: &'p [SpecificationProperty<'a>],
) -> impl Iterator<Item = (&'p SpecificationProperty<'a>, &'a OptionSpecification)> + 'p {
    properties.iter().filter_map(|p| p.specification().as_option().map(|o| (p, o)))
}

/// An option may not carry both a set name and a group; two members of one
/// group may not share a short name.
pub fn enforce_group_ambiguity(properties: &[SpecificationProperty<'_>], case_sensitive: bool) -> Vec<Error> {
    let mut errors = Vec::new();
    let opts: Vec<&OptionSpecification> = options(properties).map(|(_, o)| o).collect();
    for (i, o) in opts.iter().enumerate() {
        if o.set().is_some() && o.group_name().is_some() {
            errors.push(Error::GroupOptionAmbiguity(o.name_info()));
            continue;
        }
        let (Some(group), Some(short)) = (o.group_name(), o.short_name()) else {
            continue;
        };
        let clash = opts[..i].iter().any(|p| {
            p.group_name() == Some(group)
                && p.short_name().is_some_and(|s| names_equal(&s.to_string(), &short.to_string(), case_sensitive))
        });
        if clash {
            errors.push(Error::GroupOptionAmbiguity(o.name_info()));
        }
    }
    errors
}

/// At least one member of every group must be bound.
pub fn enforce_missing_group(properties: &[SpecificationProperty<'_>]) -> Vec<Error> {
    let mut groups: IndexMap<&str, (bool, Vec<NameInfo>)> = IndexMap::new();
    for (p, o) in options(properties) {
        if let Some(group) = o.group_name() {
            let entry = groups.entry(group).or_insert_with(|| (false, Vec::new()));
            entry.0 |= p.is_bound();
            entry.1.push(o.name_info());
        }
    }
    groups
        .into_iter()
        .filter(|(_, (bound, _))| !bound)
        .map(|(group, (_, names))| Error::MissingGroupOption { group: group.to_string(), names })
        .collect()
}

/// At most one member of a set may be bound; every bound member of a
/// violated set gets an error naming the others.
pub fn enforce_mutually_exclusive_set(properties: &[SpecificationProperty<'_>]) -> Vec<Error> {
    let mut sets: IndexMap<&str, Vec<NameInfo>> = IndexMap::new();
    for (p, o) in options(properties) {
        if let (Some(set), true) = (o.set(), p.is_bound()) {
            sets.entry(set).or_default().push(o.name_info());
        }
    }
    let mut errors = Vec::new();
    for (set, bound) in sets {
        if bound.len() < 2 {
            continue;
        }
        for (i, name) in bound.iter().enumerate() {
            let conflicts = bound
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, n)| n.clone())
                .collect();
            errors.push(Error::MutuallyExclusiveSet {
                name: name.clone(),
                set_name: set.to_string(),
                conflicts,
            });
        }
    }
    errors
}

/// Required properties must be bound. A required set member is satisfied by
/// any bound member of its set; group members are covered by the group rule.
/// A declared default satisfies the requirement.
pub fn enforce_required(properties: &[SpecificationProperty<'_>]) -> Vec<Error> {
    let bound_sets: Vec<&str> = options(properties)
        .filter(|(p, _)| p.is_bound())
        .filter_map(|(_, o)| o.set())
        .collect();
    let mut errors = Vec::new();
    for p in properties {
        if p.is_bound() || !p.specification().is_required() || p.specification().default().is_some() {
            continue;
        }
        match p.specification() {
            Specification::Option(o) => {
                if o.group_name().is_some() || o.set().is_some_and(|s| bound_sets.contains(&s)) {
                    continue;
                }
                errors.push(Error::MissingRequiredOption(o.name_info()));
            }
            Specification::Value(_) => errors.push(Error::MissingRequiredOption(NameInfo::EMPTY)),
        }
    }
    errors
}

/// Bound sequences must hold between `min` and `max` items. An unbound
/// positional sequence with a positive `min` is out of range too.
pub fn enforce_range(properties: &[SpecificationProperty<'_>]) -> Vec<Error> {
    let mut errors = Vec::new();
    for p in properties {
        let spec = p.specification();
        if spec.target_type() != TargetType::Sequence {
            continue;
        }
        let (min, max) = (spec.min_items(), spec.max_items());
        let out_of_range = match p.value().and_then(|v| v.as_list()) {
            Some(items) => min.is_some_and(|m| items.len() < m) || max.is_some_and(|m| items.len() > m),
            None => spec.is_value() && !spec.is_required() && min.is_some_and(|m| m > 0),
        };
        if out_of_range {
            errors.push(Error::SequenceOutOfRange(spec.name_info()));
        }
    }
    errors
}

/// Without multi-instance, an option other than a counter may appear once.
pub fn enforce_single(properties: &[SpecificationProperty<'_>], occurrences: &Occurrences) -> Vec<Error> {
    options(properties)
        .filter(|(_, o)| !o.is_flag_counter())
        .filter(|(p, _)| occurrences.get(p.property().name()).copied().unwrap_or(0) > 1)
        .map(|(_, o)| Error::RepeatedOption(o.name_info()))
        .collect()
}
