//! Bidirectional alias table.

use std::collections::HashMap;

use vernacular_core::logging::targets;

/// A forward map from localized alias to canonical token, plus the reverse map.
///
/// Both directions are built from one ordered list of pairs. When several
/// aliases name the same canonical token, the reverse direction keeps the
/// first-registered alias, so later entries (including user additions) never
/// change how existing canonical text is displayed. Duplicate aliases keep
/// their first canonical target as well.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    pairs: Vec<(String, String)>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(alias, canonical)` pairs in registration order.
    pub fn from_pairs<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::new();
        for (alias, canonical) in pairs {
            table.register(alias, canonical);
        }
        table
    }

    /// Register one pair. Returns `false` if the alias was already registered.
    pub fn register(&mut self, alias: impl Into<String>, canonical: impl Into<String>) -> bool {
        let alias = alias.into();
        let canonical = canonical.into();
        if self.forward.contains_key(&alias) {
            tracing::debug!(
                target: targets::DICTIONARY,
                alias = %alias,
                "duplicate alias ignored"
            );
            return false;
        }
        self.forward.insert(alias.clone(), canonical.clone());
        self.reverse
            .entry(canonical.clone())
            .or_insert_with(|| alias.clone());
        self.pairs.push((alias, canonical));
        true
    }

    /// Look up the canonical token for an alias.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.forward.get(alias).map(String::as_str)
    }

    /// Look up the display alias for a canonical token.
    pub fn alias_of(&self, canonical: &str) -> Option<&str> {
        self.reverse.get(canonical).map(String::as_str)
    }

    /// Resolve an alias, passing unknown input through unchanged.
    pub fn resolve<'a>(&'a self, alias: &'a str) -> &'a str {
        self.get(alias).unwrap_or(alias)
    }

    /// Localize a canonical token, passing unknown input through unchanged.
    pub fn localize<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.alias_of(canonical).unwrap_or(canonical)
    }

    /// Whether the alias is registered.
    pub fn contains_alias(&self, alias: &str) -> bool {
        self.forward.contains_key(alias)
    }

    /// Registered pairs in registration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tokens_pass_through() {
        let table = AliasTable::from_pairs([("颜色", "color")]);

        assert_eq!(table.resolve("颜色"), "color");
        assert_eq!(table.resolve("mask-image"), "mask-image");
        assert_eq!(table.localize("mask-image"), "mask-image");
    }

    #[test]
    fn reverse_keeps_first_registered_alias() {
        let table = AliasTable::from_pairs([("颜色", "color"), ("文字颜色", "color")]);

        assert_eq!(table.resolve("文字颜色"), "color");
        assert_eq!(table.localize("color"), "颜色");
    }

    #[test]
    fn duplicate_alias_keeps_first_target() {
        let mut table = AliasTable::from_pairs([("居中", "center")]);

        assert!(!table.register("居中", "middle"));
        assert_eq!(table.resolve("居中"), "center");
        assert_eq!(table.len(), 1);
    }
}
