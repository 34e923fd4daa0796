//! The document that decorations are materialized into.

use slotmap::{SlotMap, new_key_type};

use crate::rules::PropertyMap;

new_key_type! {
    /// Stable handle of a page element.
    pub struct ElementHandle;
}

new_key_type! {
    /// Handle of a synthetic decoration node.
    pub struct NodeHandle;
}

/// Operations the decoration engine needs from the page.
///
/// Selecting an element that matches nothing is not an error; it yields an
/// empty list and the rule simply has nothing to attach to.
pub trait DocumentHost {
    /// Elements currently matching a selector, in document order.
    fn select(&self, selector: &str) -> Vec<ElementHandle>;

    /// Whether an element is still attached to the document.
    fn is_connected(&self, element: ElementHandle) -> bool;

    /// Create a synthetic node inside `anchor`, tagged with `rule_id` and
    /// carrying `class_name` and inline `styles`.
    ///
    /// Returns `None` if the anchor no longer exists.
    fn insert_decoration(
        &mut self,
        anchor: ElementHandle,
        rule_id: &str,
        class_name: &str,
        styles: &PropertyMap,
    ) -> Option<NodeHandle>;

    /// Remove every node tagged with `rule_id`. Returns how many were removed.
    fn remove_decorations(&mut self, rule_id: &str) -> usize;

    /// Remove every synthetic node. Returns how many were removed.
    fn remove_all_decorations(&mut self) -> usize;

    /// Set an inline style on an element; an empty value removes it.
    fn set_inline_style(&mut self, element: ElementHandle, property: &str, value: &str);
}

/// An element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    selectors: Vec<String>,
    connected: bool,
    inline: PropertyMap,
}

impl MemoryElement {
    /// Inline styles set on the element.
    pub fn inline_style(&self) -> &PropertyMap {
        &self.inline
    }
}

/// A synthetic node of a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct MemoryNode {
    /// The element the node was inserted into.
    pub anchor: ElementHandle,
    /// The decoration rule that created it.
    pub rule_id: String,
    /// Its synthetic class name.
    pub class_name: String,
    /// Its inline styles.
    pub styles: PropertyMap,
}

/// In-memory [`DocumentHost`].
///
/// Elements are registered with the exact selector strings they should
/// match; there is no selector engine.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: SlotMap<ElementHandle, MemoryElement>,
    nodes: SlotMap<NodeHandle, MemoryNode>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element matching the given selectors.
    pub fn add_element<I, S>(&mut self, selectors: I) -> ElementHandle
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements.insert(MemoryElement {
            selectors: selectors.into_iter().map(Into::into).collect(),
            connected: true,
            inline: PropertyMap::new(),
        })
    }

    /// Detach an element; its synthetic nodes go with it.
    pub fn detach(&mut self, element: ElementHandle) {
        if let Some(el) = self.elements.get_mut(element) {
            el.connected = false;
        }
        self.nodes.retain(|_, node| node.anchor != element);
    }

    /// Get an element.
    pub fn element(&self, element: ElementHandle) -> Option<&MemoryElement> {
        self.elements.get(element)
    }

    /// Get a node.
    pub fn node(&self, node: NodeHandle) -> Option<&MemoryNode> {
        self.nodes.get(node)
    }

    /// An inline style value of an element.
    pub fn inline_style(&self, element: ElementHandle, property: &str) -> Option<&str> {
        self.elements.get(element)?.inline.get(property)
    }

    /// Nodes inside an element.
    pub fn decorations_on(&self, element: ElementHandle) -> Vec<&MemoryNode> {
        self.nodes.values().filter(|n| n.anchor == element).collect()
    }

    /// Nodes created by a rule.
    pub fn decorations_of(&self, rule_id: &str) -> Vec<&MemoryNode> {
        self.nodes.values().filter(|n| n.rule_id == rule_id).collect()
    }

    /// Total number of synthetic nodes.
    pub fn decoration_count(&self) -> usize {
        self.nodes.len()
    }
}

impl DocumentHost for MemoryDocument {
    fn select(&self, selector: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .filter(|(_, el)| el.connected && el.selectors.iter().any(|s| s == selector))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn is_connected(&self, element: ElementHandle) -> bool {
        self.elements.get(element).is_some_and(|el| el.connected)
    }

    fn insert_decoration(
        &mut self,
        anchor: ElementHandle,
        rule_id: &str,
        class_name: &str,
        styles: &PropertyMap,
    ) -> Option<NodeHandle> {
        if !self.is_connected(anchor) {
            return None;
        }
        Some(self.nodes.insert(MemoryNode {
            anchor,
            rule_id: rule_id.to_string(),
            class_name: class_name.to_string(),
            styles: styles.clone(),
        }))
    }

    fn remove_decorations(&mut self, rule_id: &str) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.rule_id != rule_id);
        before - self.nodes.len()
    }

    fn remove_all_decorations(&mut self) -> usize {
        let removed = self.nodes.len();
        self.nodes.clear();
        removed
    }

    fn set_inline_style(&mut self, element: ElementHandle, property: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(element) {
            if value.is_empty() {
                el.inline.remove(property);
            } else {
                el.inline.set(property, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_matches_connected_elements() {
        let mut doc = MemoryDocument::new();
        let a = doc.add_element([".card"]);
        let b = doc.add_element([".card", "#main"]);

        assert_eq!(doc.select(".card"), vec![a, b]);
        doc.detach(a);
        assert_eq!(doc.select(".card"), vec![b]);
        assert!(!doc.is_connected(a));
    }

    #[test]
    fn nodes_follow_their_anchor() {
        let mut doc = MemoryDocument::new();
        let el = doc.add_element([".x"]);
        doc.insert_decoration(el, "r", "vd-1", &PropertyMap::new()).unwrap();
        doc.insert_decoration(el, "s", "vd-2", &PropertyMap::new()).unwrap();

        assert_eq!(doc.remove_decorations("r"), 1);
        doc.detach(el);
        assert_eq!(doc.decoration_count(), 0);
        assert!(doc.insert_decoration(el, "r", "vd-1", &PropertyMap::new()).is_none());
    }

    #[test]
    fn empty_inline_value_removes() {
        let mut doc = MemoryDocument::new();
        let el = doc.add_element([".x"]);

        doc.set_inline_style(el, "overflow", "hidden");
        assert_eq!(doc.inline_style(el, "overflow"), Some("hidden"));
        doc.set_inline_style(el, "overflow", "");
        assert_eq!(doc.inline_style(el, "overflow"), None);
    }
}
