//! Accessibility nodes for screen readers and assistive technology.
//!
//! Widgets describe themselves as a tree of [`AccessibleNode`]s carrying
//! ARIA-like state: expanded/collapsed, selected, disabled, the active
//! descendant of a composite widget, and id references between nodes.

use crate::widget::AccessibleRole;

/// An accessible element in the accessibility tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleNode {
    /// Element id, referenced by `controls` and `active_descendant`.
    pub id: Option<String>,
    /// Accessible role.
    pub role: AccessibleRole,
    /// Accessible name (label).
    pub name: Option<String>,
    /// Accessible description.
    pub description: Option<String>,
    /// Current value (for combo boxes, inputs).
    pub value: Option<String>,
    /// Whether the element is enabled.
    pub enabled: bool,
    /// Whether the element is focusable.
    pub focusable: bool,
    /// Whether the element is expanded (for expandable elements).
    pub expanded: Option<bool>,
    /// Whether the element is selected (for options).
    pub selected: Option<bool>,
    /// Whether a value is required.
    pub required: bool,
    /// Whether the current value failed validation.
    pub invalid: bool,
    /// Role of the popup this element opens, if any.
    pub has_popup: Option<AccessibleRole>,
    /// Id of the element this one controls.
    pub controls: Option<String>,
    /// Id of the descendant that currently has virtual focus.
    pub active_descendant: Option<String>,
    /// Child nodes.
    pub children: Vec<AccessibleNode>,
}

impl AccessibleNode {
    /// Create a new accessible node.
    #[must_use]
    pub const fn new(role: AccessibleRole) -> Self {
        Self {
            id: None,
            role,
            name: None,
            description: None,
            value: None,
            enabled: true,
            focusable: false,
            expanded: None,
            selected: None,
            required: false,
            invalid: false,
            has_popup: None,
            controls: None,
            active_descendant: None,
            children: Vec::new(),
        }
    }

    /// Set the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the accessible description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for a node with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Self> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// All nodes with `role`, in depth-first order.
    #[must_use]
    pub fn find_all(&self, role: AccessibleRole) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect(role, &mut out);
        out
    }

    fn collect<'a>(&'a self, role: AccessibleRole, out: &mut Vec<&'a Self>) {
        if self.role == role {
            out.push(self);
        }
        for child in &self.children {
            child.collect(role, out);
        }
    }

    /// Total node count including self.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always false; a node counts itself.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> AccessibleNode {
        AccessibleNode::new(AccessibleRole::ComboBox)
            .with_id("fruit")
            .with_name("Select a fruit")
            .with_child(
                AccessibleNode::new(AccessibleRole::ListBox)
                    .with_id("fruit-listbox")
                    .with_child(
                        AccessibleNode::new(AccessibleRole::Option)
                            .with_id("fruit-option-apple")
                            .with_name("Apple"),
                    )
                    .with_child(
                        AccessibleNode::new(AccessibleRole::Option)
                            .with_id("fruit-option-banana")
                            .with_name("Banana")
                            .with_description("yellow"),
                    ),
            )
    }

    #[test]
    fn test_new_defaults() {
        let node = AccessibleNode::new(AccessibleRole::Option);
        assert!(node.enabled);
        assert!(!node.focusable);
        assert!(node.expanded.is_none());
        assert!(node.selected.is_none());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let tree = sample_tree();
        let banana = tree.find_by_id("fruit-option-banana").unwrap();
        assert_eq!(banana.name.as_deref(), Some("Banana"));
        assert_eq!(banana.description.as_deref(), Some("yellow"));
        assert!(tree.find_by_id("fruit-option-cherry").is_none());
    }

    #[test]
    fn test_find_all_by_role() {
        let tree = sample_tree();
        assert_eq!(tree.find_all(AccessibleRole::Option).len(), 2);
        assert_eq!(tree.find_all(AccessibleRole::ListBox).len(), 1);
        assert!(tree.find_all(AccessibleRole::Alert).is_empty());
    }

    #[test]
    fn test_len_counts_all_nodes() {
        assert_eq!(sample_tree().len(), 4);
        assert!(!sample_tree().is_empty());
    }
}
