//! Parser configuration.
//!
//! Settings are assembled with [`ParserSettingsBuilder`] and frozen by
//! `build()`; a [`ParserSettings`] value only has getters, so nothing can
//! change it once a parser owns it.

use crate::convert::ConverterRegistry;

/// Number formatting rules used when converting numeric arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Culture {
    decimal_separator: char,
    group_separator: Option<char>,
}

impl Culture {
    /// `.` for decimals, `,` between digit groups.
    pub const fn invariant() -> Self {
        Self { decimal_separator: '.', group_separator: Some(',') }
    }

    pub const fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self { decimal_separator, group_separator }
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> Option<char> {
        self.group_separator
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Immutable parser configuration.
#[derive(Debug, Clone)]
pub struct ParserSettings {
    case_sensitive: bool,
    case_insensitive_enum_values: bool,
    enable_dash_dash: bool,
    ignore_unknown_arguments: bool,
    parsing_culture: Culture,
    auto_help: bool,
    auto_version: bool,
    auto_help_short_name: bool,
    auto_version_short_name: bool,
    allow_multi_instance: bool,
    getopt_mode: bool,
    posixly_correct: bool,
    maximum_display_width: usize,
    converters: ConverterRegistry,
}

impl ParserSettings {
    pub fn builder() -> ParserSettingsBuilder {
        ParserSettingsBuilder { settings: Self::default() }
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn case_insensitive_enum_values(&self) -> bool {
        self.case_insensitive_enum_values
    }

    /// `--` ends option processing. Always on in getopt mode.
    pub fn enable_dash_dash(&self) -> bool {
        self.enable_dash_dash || self.getopt_mode
    }

    pub fn ignore_unknown_arguments(&self) -> bool {
        self.ignore_unknown_arguments
    }

    pub fn parsing_culture(&self) -> &Culture {
        &self.parsing_culture
    }

    pub fn auto_help(&self) -> bool {
        self.auto_help
    }

    pub fn auto_version(&self) -> bool {
        self.auto_version
    }

    pub fn auto_help_short_name(&self) -> bool {
        self.auto_help && self.auto_help_short_name
    }

    pub fn auto_version_short_name(&self) -> bool {
        self.auto_version && self.auto_version_short_name
    }

    /// Options may be repeated. Always on in getopt mode.
    pub fn allow_multi_instance(&self) -> bool {
        self.allow_multi_instance || self.getopt_mode
    }

    pub fn getopt_mode(&self) -> bool {
        self.getopt_mode
    }

    pub fn posixly_correct(&self) -> bool {
        self.posixly_correct
    }

    pub fn maximum_display_width(&self) -> usize {
        self.maximum_display_width
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            case_insensitive_enum_values: false,
            enable_dash_dash: false,
            ignore_unknown_arguments: false,
            parsing_culture: Culture::invariant(),
            auto_help: true,
            auto_version: true,
            auto_help_short_name: false,
            auto_version_short_name: false,
            allow_multi_instance: false,
            getopt_mode: false,
            posixly_correct: false,
            maximum_display_width: 80,
            converters: ConverterRegistry::default(),
        }
    }
}

/// Mutable staging area for [`ParserSettings`].
#[derive(Debug, Clone)]
pub struct ParserSettingsBuilder {
    settings: ParserSettings,
}

impl ParserSettingsBuilder {
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.settings.case_sensitive = yes;
        self
    }

    pub fn case_insensitive_enum_values(mut self, yes: bool) -> Self {
        self.settings.case_insensitive_enum_values = yes;
        self
    }

    pub fn enable_dash_dash(mut self, yes: bool) -> Self {
        self.settings.enable_dash_dash = yes;
        self
    }

    pub fn ignore_unknown_arguments(mut self, yes: bool) -> Self {
        self.settings.ignore_unknown_arguments = yes;
        self
    }

    pub fn parsing_culture(mut self, culture: Culture) -> Self {
        self.settings.parsing_culture = culture;
        self
    }

    pub fn auto_help(mut self, yes: bool) -> Self {
        self.settings.auto_help = yes;
        self
    }

    pub fn auto_version(mut self, yes: bool) -> Self {
        self.settings.auto_version = yes;
        self
    }

    /// Also recognize `-h` as a help request.
    pub fn auto_help_short_name(mut self, yes: bool) -> Self {
        self.settings.auto_help_short_name = yes;
        self
    }

    /// Also recognize `-V` as a version request.
    pub fn auto_version_short_name(mut self, yes: bool) -> Self {
        self.settings.auto_version_short_name = yes;
        self
    }

    pub fn allow_multi_instance(mut self, yes: bool) -> Self {
        self.settings.allow_multi_instance = yes;
        self
    }

    pub fn getopt_mode(mut self, yes: bool) -> Self {
        self.settings.getopt_mode = yes;
        self
    }

    pub fn posixly_correct(mut self, yes: bool) -> Self {
        self.settings.posixly_correct = yes;
        self
    }

    pub fn maximum_display_width(mut self, width: usize) -> Self {
        self.settings.maximum_display_width = width;
        self
    }

    pub fn converters(mut self, converters: ConverterRegistry) -> Self {
        self.settings.converters = converters;
        self
    }

    pub fn build(self) -> ParserSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = ParserSettings::default();
        assert!(s.case_sensitive());
        assert!(!s.enable_dash_dash());
        assert!(s.auto_help());
        assert!(!s.auto_help_short_name());
        assert_eq!(s.parsing_culture(), &Culture::invariant());
        assert_eq!(s.maximum_display_width(), 80);
    }

    #[test]
    fn getopt_mode_implies_dash_dash_and_multi_instance() {
        let s = ParserSettings::builder().getopt_mode(true).build();
        assert!(s.enable_dash_dash());
        assert!(s.allow_multi_instance());
    }

    #[test]
    fn short_names_need_auto_flags() {
        let s = ParserSettings::builder()
            .auto_help(false)
            .auto_help_short_name(true)
            .auto_version_short_name(true)
            .build();
        assert!(!s.auto_help_short_name());
        assert!(s.auto_version_short_name());
    }
}
