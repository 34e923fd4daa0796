//! Ordered rule collection.

use crate::rules::{PropertyMap, StyleRule};

/// An ordered collection of rules with unique selectors.
///
/// Rules keep the order in which their selector first appeared. A rule with
/// no declarations never survives [`prune`](Self::prune), and every
/// producer in this crate prunes before handing a map out. Equality ignores
/// rule order.
#[derive(Debug, Clone, Default, Eq)]
pub struct RuleMap {
    rules: Vec<StyleRule>,
}

impl RuleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the declarations for a selector.
    pub fn get(&self, selector: &str) -> Option<&PropertyMap> {
        self.rules
            .iter()
            .find(|r| r.selector == selector)
            .map(|r| &r.properties)
    }

    /// Get the declarations for a selector mutably.
    pub fn get_mut(&mut self, selector: &str) -> Option<&mut PropertyMap> {
        self.rules
            .iter_mut()
            .find(|r| r.selector == selector)
            .map(|r| &mut r.properties)
    }

    /// Get the declarations for a selector, appending an empty rule if absent.
    pub fn entry(&mut self, selector: &str) -> &mut PropertyMap {
        let index = match self.rules.iter().position(|r| r.selector == selector) {
            Some(index) => index,
            None => {
                self.rules.push(StyleRule::new(selector, PropertyMap::new()));
                self.rules.len() - 1
            }
        };
        &mut self.rules[index].properties
    }

    /// Merge declarations into the rule for `selector`. Later values win.
    pub fn merge(&mut self, selector: &str, properties: &PropertyMap) {
        self.entry(selector).extend_from(properties);
    }

    /// Overlay every rule of `other` onto this map.
    pub fn merge_all(&mut self, other: &RuleMap) {
        for rule in other.iter() {
            self.merge(&rule.selector, &rule.properties);
        }
    }

    /// Set one declaration.
    pub fn set(&mut self, selector: &str, property: &str, value: impl Into<String>) {
        self.entry(selector).set(property, value);
    }

    /// Get one declaration.
    pub fn value(&self, selector: &str, property: &str) -> Option<&str> {
        self.get(selector)?.get(property)
    }

    /// Remove a whole rule.
    pub fn remove(&mut self, selector: &str) -> Option<PropertyMap> {
        let index = self.rules.iter().position(|r| r.selector == selector)?;
        Some(self.rules.remove(index).properties)
    }

    /// Remove rules with no declarations.
    pub fn prune(&mut self) {
        self.rules.retain(|r| !r.is_empty());
    }

    /// Whether a rule exists for the selector.
    pub fn contains(&self, selector: &str) -> bool {
        self.rules.iter().any(|r| r.selector == selector)
    }

    /// Iterate over rules in order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Iterate over selectors in order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.selector.as_str())
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Clear all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

impl PartialEq for RuleMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|r| other.get(&r.selector) == Some(&r.properties))
    }
}

impl IntoIterator for RuleMap {
    type Item = StyleRule;
    type IntoIter = std::vec::IntoIter<StyleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleMap {
    type Item = &'a StyleRule;
    type IntoIter = std::slice::Iter<'a, StyleRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<StyleRule> for RuleMap {
    fn from_iter<I: IntoIterator<Item = StyleRule>>(iter: I) -> Self {
        let mut map = Self::new();
        for rule in iter {
            map.merge(&rule.selector, &rule.properties);
        }
        map
    }
}
