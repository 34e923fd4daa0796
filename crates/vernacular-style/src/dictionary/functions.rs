//! Localized function-call patterns.
//!
//! Each entry pairs a localized wrapper name with a compiled pattern that
//! matches one whole call, e.g. `旋转(45度)` or `旋转（45度）`, capturing the
//! argument text. The translator rewrites the wrapper and, when the entry
//! allows it, translates the arguments recursively.

use std::collections::HashMap;

use regex::Regex;

use crate::Result;
use crate::error::compile_pattern;

/// One localized function and how it maps to canonical syntax.
#[derive(Debug, Clone)]
pub struct FunctionPattern {
    /// Localized wrapper name.
    pub localized: String,
    /// Canonical function name.
    pub canonical: String,
    /// Whether argument text is translated (units, keywords, nested calls).
    pub translate_args: bool,
    pattern: Regex,
}

impl FunctionPattern {
    /// Compile a pattern for a localized function name.
    pub fn new(
        localized: impl Into<String>,
        canonical: impl Into<String>,
        translate_args: bool,
    ) -> Result<Self> {
        let localized = localized.into();
        let pattern = compile_pattern(&format!(
            r"^{}\s*[(（]([\s\S]*)[)）]$",
            regex::escape(&localized)
        ))?;
        Ok(Self {
            localized,
            canonical: canonical.into(),
            translate_args,
            pattern,
        })
    }

    /// Match a whole call, returning the raw argument text.
    pub fn captures<'v>(&self, value: &'v str) -> Option<&'v str> {
        self.pattern
            .captures(value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// The ordered function pattern table with a reverse index by canonical name.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    patterns: Vec<FunctionPattern>,
    by_canonical: HashMap<String, usize>,
    canonical_call: Regex,
}

impl FunctionTable {
    /// Build the table. The first entry for a canonical name is the one used
    /// when formatting canonical text.
    pub fn new(patterns: Vec<FunctionPattern>) -> Result<Self> {
        let mut by_canonical = HashMap::new();
        for (index, entry) in patterns.iter().enumerate() {
            by_canonical.entry(entry.canonical.clone()).or_insert(index);
        }
        Ok(Self {
            patterns,
            by_canonical,
            canonical_call: compile_pattern(r"^([A-Za-z][A-Za-z0-9-]*)\(([\s\S]*)\)$")?,
        })
    }

    /// Find the entry whose pattern matches the whole value.
    pub fn match_localized<'v>(&self, value: &'v str) -> Option<(&FunctionPattern, &'v str)> {
        self.patterns
            .iter()
            .find_map(|entry| entry.captures(value).map(|args| (entry, args)))
    }

    /// Split a canonical call like `rotate(45deg)` and find its entry.
    pub fn match_canonical<'v>(&self, value: &'v str) -> Option<(&FunctionPattern, &'v str)> {
        let caps = self.canonical_call.captures(value)?;
        let name = caps.get(1)?.as_str();
        let args = caps.get(2)?.as_str();
        let index = *self.by_canonical.get(name)?;
        Some((&self.patterns[index], args))
    }

    /// Iterate over all entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionPattern> {
        self.patterns.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
