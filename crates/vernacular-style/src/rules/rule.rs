//! Single rule definition.

/// Canonical property → canonical value, keeping first-insertion order.
///
/// Keys are unique. Setting an existing property replaces its value in
/// place, so the position of a declaration is that of its first occurrence.
/// Equality ignores order.
#[derive(Debug, Clone, Default, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from pairs; later duplicates overwrite earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (property, value) in pairs {
            map.set(property, value);
        }
        map
    }

    /// Get the value of a property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the property is set.
    pub fn contains(&self, property: &str) -> bool {
        self.entries.iter().any(|(p, _)| p == property)
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((property, value));
                None
            }
        }
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.entries.iter().position(|(p, _)| p == property)?;
        Some(self.entries.remove(index).1)
    }

    /// Overlay another map onto this one.
    pub fn extend_from(&mut self, other: &PropertyMap) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    /// Keep only properties for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.entries.retain(|(p, v)| keep(p, v));
    }

    /// Iterate over `(property, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Iterate over property names in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for PropertyMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(p, v)| other.get(p) == Some(v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// A rule mapping a selector to its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// A resolved canonical selector, or a raw one passed through.
    pub selector: String,
    /// The declarations.
    pub properties: PropertyMap,
}

impl StyleRule {
    /// Create a new rule.
    pub fn new(selector: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            selector: selector.into(),
            properties,
        }
    }

    /// Whether the rule has no declarations.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
