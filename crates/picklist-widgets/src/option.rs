//! Option records displayed by the select widget.

use serde::{Deserialize, Serialize};

/// A selectable option.
///
/// Options are ordered; their order is display order. Values are expected
/// to be unique within one select, and lookups by value use the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Identifier reported on commit
    pub value: String,
    /// Display label
    pub label: String,
    /// Whether this option can be highlighted or committed
    #[serde(default)]
    pub disabled: bool,
    /// Secondary text shown under the label when descriptions are enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectOption {
    /// Create a new option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            description: None,
        }
    }

    /// Create an option where value equals label.
    #[must_use]
    pub fn simple(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the description line.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Whether the option can be highlighted or committed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.disabled
    }
}
