//! Lookup table from a variant option name to the catalog column it feeds.
//!
//! Matching is exact and case-sensitive: `"Size"` maps to [`OptionField::Size`]
//! but `"size"` does not, unless it is registered as an alias.

use std::collections::HashMap;

/// A catalog column that aggregates variant option values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionField {
    Size,
    Color,
    Material,
}

/// Default option names recognised by the normalizer.
const DEFAULT_OPTION_NAMES: &[(&str, OptionField)] = &[
    ("Size", OptionField::Size),
    ("Color", OptionField::Color),
    ("Material", OptionField::Material),
];

#[derive(Debug, Clone)]
pub struct OptionMapping {
    fields: HashMap<String, OptionField>,
}

impl Default for OptionMapping {
    fn default() -> Self {
        Self {
            fields: DEFAULT_OPTION_NAMES
                .iter()
                .map(|(name, field)| ((*name).to_string(), *field))
                .collect(),
        }
    }
}

impl OptionMapping {
    /// Registers an additional option name for `field`, e.g. `"Colour"`.
    #[must_use]
    pub fn with_alias(mut self, name: impl Into<String>, field: OptionField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Returns the field an option name feeds, or `None` if it is ignored.
    #[must_use]
    pub fn field_for(&self, option_name: &str) -> Option<OptionField> {
        self.fields.get(option_name).copied()
    }
}
