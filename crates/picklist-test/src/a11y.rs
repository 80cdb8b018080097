//! Accessibility checking for the combobox pattern.
//!
//! Checks a widget's accessibility tree for:
//! - Name/role/value on focusable elements (4.1.2)
//! - Keyboard reachability (2.1.1)
//! - Combobox to listbox wiring: haspopup, controls, expanded
//! - Active descendant pointing at an enabled option
//! - Option state and names
//! - Error identification (3.3.1)

use picklist_core::{AccessibleNode, AccessibleRole, Widget};

/// Accessibility checker.
pub struct A11yChecker;

impl A11yChecker {
    /// Check a widget tree for accessibility violations.
    #[must_use]
    pub fn check(widget: &dyn Widget) -> A11yReport {
        Self::check_node(&widget.accessible_node())
    }

    /// Check an already-built accessibility tree.
    #[must_use]
    pub fn check_node(node: &AccessibleNode) -> A11yReport {
        let mut violations = Vec::new();
        Self::check_recursive(node, &mut violations);
        A11yReport { violations }
    }

    fn check_recursive(node: &AccessibleNode, violations: &mut Vec<A11yViolation>) {
        let interactive = node.enabled && (node.focusable || node.role == AccessibleRole::ComboBox);

        if interactive && node.name.as_deref().map_or(true, str::is_empty) {
            violations.push(violation(
                "aria-label",
                "Interactive element missing accessible name",
                "4.1.2",
                Impact::Critical,
            ));
        }

        match node.role {
            AccessibleRole::ComboBox => Self::check_combobox(node, violations),
            AccessibleRole::Option => Self::check_option(node, violations),
            _ => {}
        }

        for child in &node.children {
            Self::check_recursive(child, violations);
        }
    }

    fn check_combobox(node: &AccessibleNode, violations: &mut Vec<A11yViolation>) {
        if node.enabled && !node.focusable {
            violations.push(violation(
                "keyboard",
                "Combobox is not keyboard focusable",
                "2.1.1",
                Impact::Critical,
            ));
        }

        if node.has_popup != Some(AccessibleRole::ListBox) {
            violations.push(violation(
                "aria-haspopup",
                "Combobox must declare a listbox popup",
                "4.1.2",
                Impact::Serious,
            ));
        }

        let Some(expanded) = node.expanded else {
            violations.push(violation(
                "aria-expanded",
                "Combobox missing expanded state",
                "4.1.2",
                Impact::Serious,
            ));
            return;
        };

        let Some(controls) = node.controls.as_deref() else {
            violations.push(violation(
                "aria-controls",
                "Combobox does not reference its listbox",
                "4.1.2",
                Impact::Serious,
            ));
            return;
        };

        let listbox = node
            .children
            .iter()
            .find(|c| c.role == AccessibleRole::ListBox);

        match (expanded, listbox) {
            (true, None) => violations.push(violation(
                "listbox-owned",
                "Expanded combobox has no listbox",
                "4.1.2",
                Impact::Critical,
            )),
            (true, Some(list)) if list.id.as_deref() != Some(controls) => {
                violations.push(A11yViolation {
                    rule: "aria-controls".to_string(),
                    message: format!(
                        "Combobox controls '{controls}' but its listbox id is {:?}",
                        list.id
                    ),
                    wcag: "4.1.2".to_string(),
                    impact: Impact::Serious,
                });
            }
            (false, Some(_)) => violations.push(violation(
                "hidden-listbox",
                "Collapsed combobox still exposes its listbox",
                "1.3.1",
                Impact::Moderate,
            )),
            _ => {}
        }

        if let Some(active) = node.active_descendant.as_deref() {
            let target = listbox
                .filter(|_| expanded)
                .and_then(|list| list.children.iter().find(|o| o.id.as_deref() == Some(active)));
            match target {
                Some(option) if option.role == AccessibleRole::Option && option.enabled => {}
                _ => violations.push(A11yViolation {
                    rule: "aria-activedescendant".to_string(),
                    message: format!("Active descendant '{active}' is not an enabled visible option"),
                    wcag: "4.1.2".to_string(),
                    impact: Impact::Serious,
                }),
            }
        }

        if node.invalid && !node.children.iter().any(|c| c.role == AccessibleRole::Alert) {
            violations.push(violation(
                "error-message",
                "Invalid combobox has no error message",
                "3.3.1",
                Impact::Moderate,
            ));
        }
    }

    fn check_option(node: &AccessibleNode, violations: &mut Vec<A11yViolation>) {
        if node.name.as_deref().map_or(true, str::is_empty) {
            violations.push(violation(
                "option-name",
                "Option missing accessible name",
                "4.1.2",
                Impact::Serious,
            ));
        }
        if node.selected.is_none() {
            violations.push(violation(
                "aria-selected",
                "Option missing selected state",
                "4.1.2",
                Impact::Moderate,
            ));
        }
    }
}

fn violation(rule: &str, message: &str, wcag: &str, impact: Impact) -> A11yViolation {
    A11yViolation {
        rule: rule.to_string(),
        message: message.to_string(),
        wcag: wcag.to_string(),
        impact,
    }
}

/// Accessibility report.
#[derive(Debug)]
pub struct A11yReport {
    /// List of violations found
    pub violations: Vec<A11yViolation>,
}

impl A11yReport {
    /// Check if all accessibility tests passed.
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get critical violations only.
    #[must_use]
    pub fn critical(&self) -> Vec<&A11yViolation> {
        self.violations
            .iter()
            .filter(|v| v.impact == Impact::Critical)
            .collect()
    }

    /// Whether any violation was raised by `rule`.
    #[must_use]
    pub fn has_rule(&self, rule: &str) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }

    /// Assert that all accessibility tests pass.
    ///
    /// # Panics
    ///
    /// Panics if there are any violations.
    pub fn assert_pass(&self) {
        if !self.is_passing() {
            let messages: Vec<String> = self
                .violations
                .iter()
                .map(|v| {
                    format!(
                        "  [{:?}] {}: {} (WCAG {})",
                        v.impact, v.rule, v.message, v.wcag
                    )
                })
                .collect();

            panic!(
                "Accessibility check failed with {} violation(s):\n{}",
                self.violations.len(),
                messages.join("\n")
            );
        }
    }
}

/// A single accessibility violation.
#[derive(Debug, Clone)]
pub struct A11yViolation {
    /// Rule that was violated
    pub rule: String,
    /// Human-readable message
    pub message: String,
    /// WCAG success criterion
    pub wcag: String,
    /// Impact level
    pub impact: Impact,
}

/// Impact level of an accessibility violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Minor issue
    Minor,
    /// Moderate issue
    Moderate,
    /// Serious issue
    Serious,
    /// Critical issue - must fix
    Critical,
}

const fn role_name(role: AccessibleRole) -> Option<&'static str> {
    match role {
        AccessibleRole::Generic => None,
        AccessibleRole::Text => Some("text"),
        AccessibleRole::Label => Some("label"),
        AccessibleRole::Group => Some("group"),
        AccessibleRole::Separator => Some("separator"),
        AccessibleRole::ComboBox => Some("combobox"),
        AccessibleRole::ListBox => Some("listbox"),
        AccessibleRole::Option => Some("option"),
        AccessibleRole::Alert => Some("alert"),
    }
}

const fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// HTML attributes a host would put on the element for `node`.
#[must_use]
pub fn aria_attributes(node: &AccessibleNode) -> Vec<(String, String)> {
    let mut attrs = Vec::new();

    if let Some(id) = &node.id {
        attrs.push(("id".to_string(), id.clone()));
    }
    if let Some(role) = role_name(node.role) {
        attrs.push(("role".to_string(), role.to_string()));
    }
    if let Some(name) = &node.name {
        attrs.push(("aria-label".to_string(), name.clone()));
    }
    if let Some(expanded) = node.expanded {
        attrs.push(("aria-expanded".to_string(), bool_str(expanded).to_string()));
    }
    if let Some(popup) = node.has_popup.and_then(role_name) {
        attrs.push(("aria-haspopup".to_string(), popup.to_string()));
    }
    if let Some(controls) = &node.controls {
        attrs.push(("aria-controls".to_string(), controls.clone()));
    }
    if let Some(active) = &node.active_descendant {
        attrs.push(("aria-activedescendant".to_string(), active.clone()));
    }
    if let Some(selected) = node.selected {
        attrs.push(("aria-selected".to_string(), bool_str(selected).to_string()));
    }
    if !node.enabled {
        attrs.push(("aria-disabled".to_string(), "true".to_string()));
    }
    if node.required {
        attrs.push(("aria-required".to_string(), "true".to_string()));
    }
    if node.invalid {
        attrs.push(("aria-invalid".to_string(), "true".to_string()));
    }

    attrs
}
