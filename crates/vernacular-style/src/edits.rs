//! Pending edits from outside the source text.
//!
//! Form controls write canonical values for a selector and property while
//! the author keeps typing. Writes accumulate as pending values on top of
//! the last committed rules and are folded in by [`StyleEdits::commit`].

use vernacular_core::logging::targets;

use crate::rules::RuleMap;

/// Committed rules plus pending writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleEdits {
    committed: RuleMap,
    /// An empty value marks a removal.
    pending: RuleMap,
}

impl StyleEdits {
    /// Create an empty edit buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the committed rules, keeping pending writes.
    pub fn reset(&mut self, committed: RuleMap) {
        self.committed = committed;
    }

    /// Record a pending write. An empty `value` removes the property.
    pub fn write(&mut self, selector: &str, property: &str, value: &str) {
        tracing::trace!(target: targets::COORDINATOR, selector, property, value, "pending write");
        self.pending.set(selector, property, value.trim());
    }

    /// The value a reader should see: pending if written, else committed.
    pub fn effective_value(&self, selector: &str, property: &str) -> Option<&str> {
        match self.pending.value(selector, property) {
            Some("") => None,
            Some(value) => Some(value),
            None => self.committed.value(selector, property),
        }
    }

    /// Whether any writes are pending.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The committed rules.
    pub fn committed(&self) -> &RuleMap {
        &self.committed
    }

    /// Fold pending writes into the committed rules and return them.
    pub fn commit(&mut self) -> &RuleMap {
        let pending = std::mem::take(&mut self.pending);
        for rule in pending {
            for (property, value) in rule.properties.iter() {
                if value.is_empty() {
                    if let Some(properties) = self.committed.get_mut(&rule.selector) {
                        properties.remove(property);
                    }
                } else {
                    self.committed.set(&rule.selector, property, value);
                }
            }
        }
        self.committed.prune();
        &self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed() -> RuleMap {
        let mut rules = RuleMap::new();
        rules.set("body", "color", "red");
        rules.set("body", "width", "10px");
        rules
    }

    #[test]
    fn pending_shadows_committed() {
        let mut edits = StyleEdits::new();
        edits.reset(committed());
        assert_eq!(edits.effective_value("body", "color"), Some("red"));

        edits.write("body", "color", "blue");
        assert_eq!(edits.effective_value("body", "color"), Some("blue"));
        assert_eq!(edits.committed().value("body", "color"), Some("red"));
    }

    #[test]
    fn empty_write_removes() {
        let mut edits = StyleEdits::new();
        edits.reset(committed());
        edits.write("body", "width", "");
        assert_eq!(edits.effective_value("body", "width"), None);

        let rules = edits.commit();
        assert_eq!(rules.value("body", "width"), None);
        assert_eq!(rules.value("body", "color"), Some("red"));
        assert!(!edits.has_pending());
    }

    #[test]
    fn commit_adds_new_rules_and_prunes_empty_ones() {
        let mut edits = StyleEdits::new();
        edits.reset(committed());
        edits.write(".card", "padding", "4px");
        edits.write("body", "color", "");
        edits.write("body", "width", "");

        let rules = edits.commit();
        assert_eq!(rules.value(".card", "padding"), Some("4px"));
        assert!(!rules.contains("body"));
    }

    #[test]
    fn writes_survive_reset() {
        let mut edits = StyleEdits::new();
        edits.write("body", "color", "blue");
        edits.reset(committed());

        assert_eq!(edits.commit().value("body", "color"), Some("blue"));
    }
}
