//! Select/Dropdown widget for choosing one value from a list of options.
//!
//! The widget is a trigger showing the current selection (or a placeholder)
//! plus a popover list that is painted only while open. It owns three pieces
//! of interaction state: whether the popover is open, the highlighted row
//! (the keyboard/hover cursor), and the selected value.
//!
//! Committing a row is the only way the selection changes from user input;
//! a commit closes the popover, invokes the `on_change` callback once, and
//! returns a [`SelectionChanged`] message from [`Widget::event`].

use crate::option::SelectOption;
use picklist_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    AccessibleNode, Canvas, Color, Constraints, Event, Key, MouseButton, Point, Rect, Size,
    TypeId, Widget, WidgetId,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Default popover viewport cap in pixels.
pub const DEFAULT_MAX_HEIGHT: f32 = 250.0;
/// Default trigger text when nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select an option";
/// Text of the single row shown when there are no options.
pub const EMPTY_STATE_TEXT: &str = "No options available";

const LABEL_HEIGHT: f32 = 20.0;
const LABEL_GAP: f32 = 6.0;
const ERROR_GAP: f32 = 4.0;
const ERROR_HEIGHT: f32 = 18.0;
const POPOVER_GAP: f32 = 4.0;
const DESCRIPTION_HEIGHT: f32 = 18.0;
const TEXT_INSET: f32 = 12.0;
const CHAR_WIDTH: f32 = 7.5;

/// Callback invoked with the committed value.
pub type ChangeCallback = Box<dyn FnMut(&str) + Send + Sync>;

/// Custom row and trigger text renderer.
pub type OptionRenderer = Box<dyn Fn(&SelectOption) -> String + Send + Sync>;

/// Message emitted when a row is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    /// The committed value
    pub value: String,
    /// Index of the committed option
    pub index: usize,
}

/// Message emitted when the popover opens or closes without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownToggled {
    /// Whether the popover is now open
    pub open: bool,
}

/// Visual style of one region of the widget.
///
/// Region styles affect painting only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStyle {
    /// Fill color
    pub background: Color,
    /// Border color
    pub border: Color,
    /// Corner radius
    pub radius: f32,
}

impl RegionStyle {
    /// Create a region style.
    #[must_use]
    pub const fn new(background: Color, border: Color, radius: f32) -> Self {
        Self {
            background,
            border,
            radius,
        }
    }

    fn container() -> Self {
        Self::new(Color::TRANSPARENT, Color::TRANSPARENT, 0.0)
    }

    fn trigger() -> Self {
        Self::new(Color::WHITE, Color::rgb(0.82, 0.84, 0.86), 6.0)
    }

    fn popover() -> Self {
        Self::new(Color::WHITE, Color::rgb(0.9, 0.91, 0.92), 6.0)
    }

    fn row() -> Self {
        Self::new(Color::rgb(0.94, 0.96, 1.0), Color::TRANSPARENT, 4.0)
    }
}

/// Select/Dropdown widget.
#[derive(Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Select {
    /// Available options, in display order
    options: Vec<SelectOption>,
    /// Selected value; may name no current option
    selected_value: Option<String>,
    /// Placeholder text when nothing is selected
    placeholder: String,
    /// Label painted above the trigger
    label: Option<String>,
    /// Whether the label carries a required marker
    required: bool,
    /// Validation message painted below the trigger
    error: Option<String>,
    /// Whether the widget ignores all input
    disabled: bool,
    /// Popover viewport cap
    max_height: f32,
    /// Whether option descriptions are painted
    show_description: bool,
    /// Element id; listbox and row ids derive from it
    id: String,
    /// Form field name
    name: Option<String>,
    /// Minimum width
    min_width: f32,
    /// Trigger and row height
    item_height: f32,
    /// Outer container style
    container_style: RegionStyle,
    /// Trigger style
    trigger_style: RegionStyle,
    /// Popover style
    popover_style: RegionStyle,
    /// Highlighted row style
    row_style: RegionStyle,
    /// Text color
    text_color: Color,
    /// Placeholder and description color
    muted_color: Color,
    /// Disabled fill and text color
    disabled_color: Color,
    /// Focus ring and check mark color
    accent_color: Color,
    /// Error text and border color
    error_color: Color,
    /// Test ID
    test_id_value: Option<String>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Host handle
    widget_id_value: Option<WidgetId>,
    /// Commit callback
    #[serde(skip)]
    on_change: Option<ChangeCallback>,
    /// Custom text renderer
    #[serde(skip)]
    render_option: Option<OptionRenderer>,
    /// Last value supplied by the host
    #[serde(skip)]
    supplied_value: Option<String>,
    /// Whether the popover is open
    #[serde(skip)]
    open: bool,
    /// Keyboard/hover cursor
    #[serde(skip)]
    highlighted: Option<usize>,
    /// Popover scroll position
    #[serde(skip)]
    scroll_offset: f32,
    /// Whether the widget has keyboard focus
    #[serde(skip)]
    focused: bool,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Select {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select")
            .field("id", &self.id)
            .field("options", &self.options.len())
            .field("selected_value", &self.selected_value)
            .field("open", &self.open)
            .field("highlighted", &self.highlighted)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl Select {
    /// Create a new select widget.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            selected_value: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            label: None,
            required: false,
            error: None,
            disabled: false,
            max_height: DEFAULT_MAX_HEIGHT,
            show_description: false,
            id: "select".to_string(),
            name: None,
            min_width: 150.0,
            item_height: 36.0,
            container_style: RegionStyle::container(),
            trigger_style: RegionStyle::trigger(),
            popover_style: RegionStyle::popover(),
            row_style: RegionStyle::row(),
            text_color: Color::rgb(0.07, 0.09, 0.15),
            muted_color: Color::rgb(0.42, 0.45, 0.5),
            disabled_color: Color::rgb(0.95, 0.96, 0.96),
            accent_color: Color::rgb(0.23, 0.51, 0.96),
            error_color: Color::rgb(0.86, 0.15, 0.15),
            test_id_value: None,
            accessible_name_value: None,
            widget_id_value: None,
            on_change: None,
            render_option: None,
            supplied_value: None,
            open: false,
            highlighted: None,
            scroll_offset: 0.0,
            focused: false,
            bounds: Rect::default(),
        }
    }

    /// Add an option.
    #[must_use]
    pub fn option(mut self, opt: SelectOption) -> Self {
        self.options.push(opt);
        self
    }

    /// Add multiple options.
    #[must_use]
    pub fn options(mut self, opts: impl IntoIterator<Item = SelectOption>) -> Self {
        self.options.extend(opts);
        self
    }

    /// Set options from simple string values.
    #[must_use]
    pub fn options_from_strings(
        mut self,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.options = values.into_iter().map(SelectOption::simple).collect();
        self
    }

    /// Set the host-controlled value.
    #[must_use]
    pub fn value(mut self, value: Option<&str>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the commit callback.
    #[must_use]
    pub fn on_change(mut self, callback: impl FnMut(&str) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the label painted above the trigger.
    #[must_use]
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the validation message.
    #[must_use]
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Set the popover viewport cap.
    #[must_use]
    pub fn max_height(mut self, height: f32) -> Self {
        self.max_height = height.max(1.0);
        self
    }

    /// Paint option descriptions under their labels.
    #[must_use]
    pub const fn show_description(mut self, show: bool) -> Self {
        self.show_description = show;
        self
    }

    /// Replace the label text of rows and the trigger.
    #[must_use]
    pub fn render_option(
        mut self,
        render: impl Fn(&SelectOption) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render_option = Some(Box::new(render));
        self
    }

    /// Set the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the form field name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set minimum width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(50.0);
        self
    }

    /// Set trigger and row height.
    #[must_use]
    pub fn item_height(mut self, height: f32) -> Self {
        self.item_height = height.max(20.0);
        self
    }

    /// Set the outer container style.
    #[must_use]
    pub const fn container_style(mut self, style: RegionStyle) -> Self {
        self.container_style = style;
        self
    }

    /// Set the trigger style.
    #[must_use]
    pub const fn trigger_style(mut self, style: RegionStyle) -> Self {
        self.trigger_style = style;
        self
    }

    /// Set the popover style.
    #[must_use]
    pub const fn popover_style(mut self, style: RegionStyle) -> Self {
        self.popover_style = style;
        self
    }

    /// Set the highlighted row style.
    #[must_use]
    pub const fn row_style(mut self, style: RegionStyle) -> Self {
        self.row_style = style;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the host handle.
    #[must_use]
    pub const fn with_widget_id(mut self, id: WidgetId) -> Self {
        self.widget_id_value = Some(id);
        self
    }

    // =========================================================================
    // Host-driven updates
    // =========================================================================

    /// Push the host's value.
    ///
    /// When `value` differs from the last supplied value it overwrites the
    /// selection, even after user interaction. Moving to `None` clears the
    /// selection so the trigger shows the placeholder again.
    pub fn set_value(&mut self, value: Option<&str>) {
        if self.supplied_value.as_deref() == value {
            return;
        }
        self.supplied_value = value.map(str::to_string);
        tracing::debug!(id = %self.id, value = ?value, "select value supplied by host");
        self.selected_value = value.map(str::to_string);
    }

    /// Replace the option list, dropping a cursor that no longer fits.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        if self.highlighted.is_some_and(|i| !self.is_enabled_row(i)) {
            self.highlighted = None;
        }
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    /// Enable or disable the widget; disabling closes the popover.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
            self.focused = false;
        }
    }

    /// Set or clear the validation message.
    pub fn set_error(&mut self, message: Option<String>) {
        self.error = message;
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Open the popover. Returns whether the state changed.
    ///
    /// The cursor moves to the selected row when the selection names an
    /// enabled option; otherwise it stays where it was.
    pub fn open(&mut self) -> bool {
        if self.disabled || self.open {
            return false;
        }
        self.open = true;
        if let Some(index) = self.selected_index().filter(|&i| self.is_enabled_row(i)) {
            self.highlighted = Some(index);
        }
        self.ensure_highlight_visible();
        tracing::debug!(id = %self.id, highlighted = ?self.highlighted, "select opened");
        true
    }

    /// Close the popover without committing. Returns whether the state changed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        tracing::debug!(id = %self.id, "select closed");
        true
    }

    /// Toggle the popover. Returns whether the state changed.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close()
        } else {
            self.open()
        }
    }

    /// Commit the option at `index`.
    ///
    /// Out-of-range and disabled rows are ignored. Otherwise the selection
    /// is set, the callback runs once, and the popover closes.
    pub fn select(&mut self, index: usize) -> Option<SelectionChanged> {
        let opt = self.options.get(index)?;
        if opt.disabled {
            tracing::trace!(id = %self.id, index, "ignored commit of disabled option");
            return None;
        }
        let value = opt.value.clone();
        self.selected_value = Some(value.clone());
        self.highlighted = Some(index);
        self.open = false;
        tracing::debug!(id = %self.id, value = %value, index, "select committed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(&value);
        }
        Some(SelectionChanged { value, index })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Check if the popover is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Check if the widget has keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Check if the widget is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The cursor row.
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The selected value, which may name no current option.
    #[must_use]
    pub fn selected_value(&self) -> Option<&str> {
        self.selected_value.as_deref()
    }

    /// Index of the first option matching the selected value.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let value = self.selected_value.as_deref()?;
        self.options.iter().position(|o| o.value == value)
    }

    /// The first option matching the selected value.
    #[must_use]
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected_index().and_then(|i| self.options.get(i))
    }

    /// Text shown in the trigger.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.selected_option()
            .map_or_else(|| self.placeholder.clone(), |o| self.option_text(o))
    }

    /// Get all options.
    #[must_use]
    pub fn get_options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Check if empty (no options).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Get option count.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Get placeholder text.
    #[must_use]
    pub fn get_placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Get the label.
    #[must_use]
    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the validation message.
    #[must_use]
    pub fn get_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a value is required.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Get the popover viewport cap.
    #[must_use]
    pub const fn get_max_height(&self) -> f32 {
        self.max_height
    }

    /// Get the minimum width.
    #[must_use]
    pub const fn get_min_width(&self) -> f32 {
        self.min_width
    }

    /// Whether descriptions are painted.
    #[must_use]
    pub const fn shows_description(&self) -> bool {
        self.show_description
    }

    /// Current popover scroll position.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Element id.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.id
    }

    /// Id of the popover list.
    #[must_use]
    pub fn listbox_id(&self) -> String {
        format!("{}-listbox", self.id)
    }

    /// Id of the row at `index`.
    #[must_use]
    pub fn option_id(&self, index: usize) -> Option<String> {
        self.options
            .get(index)
            .map(|o| format!("{}-option-{}", self.id, o.value))
    }

    /// Hidden form field: name and selected value (empty when unset).
    #[must_use]
    pub fn form_field(&self) -> Option<(&str, &str)> {
        self.name
            .as_deref()
            .map(|name| (name, self.selected_value.as_deref().unwrap_or("")))
    }

    /// Text painted for `opt` in rows and the trigger.
    #[must_use]
    pub fn option_text(&self, opt: &SelectOption) -> String {
        self.render_option
            .as_ref()
            .map_or_else(|| opt.label.clone(), |render| render(opt))
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    fn label_offset(&self) -> f32 {
        if self.label.is_some() {
            LABEL_HEIGHT + LABEL_GAP
        } else {
            0.0
        }
    }

    /// Bounds of the always-visible trigger.
    #[must_use]
    pub fn trigger_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y + self.label_offset(),
            self.bounds.width,
            self.item_height,
        )
    }

    fn row_height(&self, opt: &SelectOption) -> f32 {
        if self.show_description && opt.description.is_some() {
            self.item_height + DESCRIPTION_HEIGHT
        } else {
            self.item_height
        }
    }

    fn row_top(&self, index: usize) -> f32 {
        self.options
            .iter()
            .take(index)
            .map(|o| self.row_height(o))
            .sum()
    }

    fn content_height(&self) -> f32 {
        if self.options.is_empty() {
            self.item_height
        } else {
            self.options.iter().map(|o| self.row_height(o)).sum()
        }
    }

    fn viewport_height(&self) -> f32 {
        self.content_height().min(self.max_height)
    }

    fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_height()).max(0.0)
    }

    /// Bounds of the popover viewport while open.
    #[must_use]
    pub fn popover_rect(&self) -> Option<Rect> {
        if !self.open {
            return None;
        }
        let trigger = self.trigger_rect();
        Some(Rect::new(
            trigger.x,
            trigger.bottom() + POPOVER_GAP,
            trigger.width,
            self.viewport_height(),
        ))
    }

    /// On-screen bounds of the row at `index` while open, before clipping.
    #[must_use]
    pub fn row_rect(&self, index: usize) -> Option<Rect> {
        let popover = self.popover_rect()?;
        let opt = self.options.get(index)?;
        Some(Rect::new(
            popover.x,
            popover.y + self.row_top(index) - self.scroll_offset,
            popover.width,
            self.row_height(opt),
        ))
    }

    /// Row under `point`, if the point is inside the open popover.
    #[must_use]
    pub fn row_at(&self, point: Point) -> Option<usize> {
        let popover = self.popover_rect()?;
        if !popover.contains_point(&point) {
            return None;
        }
        let y = point.y - popover.y + self.scroll_offset;
        let mut top = 0.0;
        for (i, opt) in self.options.iter().enumerate() {
            let bottom = top + self.row_height(opt);
            if y >= top && y < bottom {
                return Some(i);
            }
            top = bottom;
        }
        None
    }

    /// Whether `point` lies inside the container or the open popover.
    #[must_use]
    pub fn region_contains(&self, point: Point) -> bool {
        let container = self.bounds.union(&self.trigger_rect());
        container.contains_point(&point)
            || self
                .popover_rect()
                .is_some_and(|p| p.contains_point(&point))
    }

    /// Scroll the popover by the minimal amount that fully shows the cursor row.
    fn ensure_highlight_visible(&mut self) {
        let Some(index) = self.highlighted else {
            return;
        };
        let Some(opt) = self.options.get(index) else {
            return;
        };
        let top = self.row_top(index);
        let bottom = top + self.row_height(opt);
        let viewport = self.viewport_height();

        if bottom > self.scroll_offset + viewport {
            self.scroll_offset = bottom - viewport;
        } else if top < self.scroll_offset {
            self.scroll_offset = top;
        }
        tracing::trace!(id = %self.id, index, offset = self.scroll_offset, "scrolled row into view");
    }

    fn scroll_by(&mut self, delta_y: f32) {
        let max_scroll = self.max_scroll();
        self.scroll_offset = delta_y
            .mul_add(-self.item_height, self.scroll_offset)
            .clamp(0.0, max_scroll);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    fn is_enabled_row(&self, index: usize) -> bool {
        self.options.get(index).is_some_and(SelectOption::is_enabled)
    }

    fn first_enabled(&self) -> Option<usize> {
        self.options.iter().position(SelectOption::is_enabled)
    }

    fn last_enabled(&self) -> Option<usize> {
        self.options.iter().rposition(SelectOption::is_enabled)
    }

    fn next_enabled(&self, from: Option<usize>) -> Option<usize> {
        let start = from.map_or(0, |i| i + 1);
        self.options
            .iter()
            .skip(start)
            .position(SelectOption::is_enabled)
            .map(|offset| start + offset)
    }

    fn prev_enabled(&self, from: Option<usize>) -> Option<usize> {
        match from {
            None => self.last_enabled(),
            Some(i) => (0..i).rev().find(|&j| self.is_enabled_row(j)),
        }
    }

    fn set_highlight(&mut self, index: usize) {
        if self.highlighted == Some(index) {
            return;
        }
        self.highlighted = Some(index);
        tracing::trace!(id = %self.id, index, "select cursor moved");
        if self.open {
            self.ensure_highlight_visible();
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    fn handle_key(&mut self, key: Key) -> Option<Box<dyn Any + Send>> {
        if !self.open {
            return match key {
                Key::Enter | Key::Space => self.open().then(|| toggled(true)),
                Key::Down | Key::Up => {
                    if !self.open() {
                        return None;
                    }
                    if self.highlighted.is_none() {
                        let seed = if key == Key::Down {
                            self.first_enabled()
                        } else {
                            self.last_enabled()
                        };
                        if let Some(index) = seed {
                            self.set_highlight(index);
                        }
                    }
                    Some(toggled(true))
                }
                _ => None,
            };
        }

        match key {
            Key::Enter | Key::Space => {
                let target = self.highlighted.filter(|&i| self.is_enabled_row(i));
                if let Some(index) = target {
                    return self.select(index).map(boxed);
                }
                self.close();
                Some(toggled(false))
            }
            Key::Down => {
                if let Some(index) = self.next_enabled(self.highlighted) {
                    self.set_highlight(index);
                }
                None
            }
            Key::Up => {
                if let Some(index) = self.prev_enabled(self.highlighted) {
                    self.set_highlight(index);
                }
                None
            }
            Key::Escape | Key::Tab => {
                self.close();
                Some(toggled(false))
            }
            _ => None,
        }
    }

    fn handle_press(&mut self, position: Point) -> Option<Box<dyn Any + Send>> {
        if self.trigger_rect().contains_point(&position) {
            self.focused = true;
            self.toggle();
            return Some(toggled(self.open));
        }

        if let Some(popover) = self.popover_rect() {
            if popover.contains_point(&position) {
                return self
                    .row_at(position)
                    .and_then(|i| self.select(i))
                    .map(boxed);
            }
        }

        if self.region_contains(position) {
            return None;
        }

        self.focused = false;
        self.close().then(|| toggled(false))
    }

    // =========================================================================
    // Painting
    // =========================================================================

    fn paint_label(&self, canvas: &mut dyn Canvas) {
        let Some(label) = &self.label else {
            return;
        };
        let style = TextStyle {
            color: self.text_color,
            weight: FontWeight::Medium,
            ..Default::default()
        };
        let origin = Point::new(self.bounds.x, self.bounds.y);
        canvas.draw_text(label, origin, &style);

        if self.required {
            let marker_x = (label.chars().count() as f32).mul_add(CHAR_WIDTH, origin.x + 4.0);
            let marker = TextStyle {
                color: self.error_color,
                ..style
            };
            canvas.draw_text("*", Point::new(marker_x, origin.y), &marker);
        }
    }

    fn paint_trigger(&self, canvas: &mut dyn Canvas) {
        let trigger = self.trigger_rect();
        let background = if self.disabled {
            self.disabled_color
        } else {
            self.trigger_style.background
        };
        canvas.fill_rounded_rect(trigger, self.trigger_style.radius, background);

        let border = if self.error.is_some() {
            self.error_color
        } else if self.open || self.focused {
            self.accent_color
        } else {
            self.trigger_style.border
        };
        canvas.stroke_rect(trigger, border, 1.0);

        let text_color = if self.disabled || self.selected_option().is_none() {
            self.muted_color
        } else {
            self.text_color
        };
        let style = TextStyle {
            color: text_color,
            ..Default::default()
        };
        let text_pos = Point::new(
            trigger.x + TEXT_INSET,
            trigger.y + (self.item_height - 16.0) / 2.0,
        );
        canvas.draw_text(&self.display_text(), text_pos, &style);

        // Chevron points down while closed, up while open.
        let center = Point::new(trigger.right() - 18.0, trigger.center().y);
        let dy = if self.open { -2.0 } else { 2.0 };
        let chevron = [
            Point::new(center.x - 4.0, center.y - dy),
            Point::new(center.x, center.y + dy),
            Point::new(center.x + 4.0, center.y - dy),
        ];
        canvas.draw_path(&chevron, self.muted_color, 1.5);
    }

    fn paint_error(&self, canvas: &mut dyn Canvas) {
        let Some(message) = &self.error else {
            return;
        };
        let trigger = self.trigger_rect();
        let style = TextStyle {
            size: 12.0,
            color: self.error_color,
            ..Default::default()
        };
        canvas.draw_text(
            message,
            Point::new(trigger.x, trigger.bottom() + ERROR_GAP),
            &style,
        );
    }

    fn paint_popover(&self, canvas: &mut dyn Canvas, popover: Rect) {
        canvas.fill_rounded_rect(
            popover,
            self.popover_style.radius,
            self.popover_style.background,
        );
        canvas.stroke_rect(popover, self.popover_style.border, 1.0);
        canvas.push_clip(popover);

        if self.options.is_empty() {
            let style = TextStyle {
                color: self.muted_color,
                ..Default::default()
            };
            let pos = Point::new(
                popover.x + TEXT_INSET,
                popover.y + (self.item_height - 16.0) / 2.0,
            );
            canvas.draw_text(EMPTY_STATE_TEXT, pos, &style);
            canvas.pop_clip();
            return;
        }

        let selected = self.selected_index();
        for (i, opt) in self.options.iter().enumerate() {
            let Some(row) = self.row_rect(i) else {
                continue;
            };
            if row.bottom() < popover.y || row.y > popover.bottom() {
                continue;
            }

            if self.highlighted == Some(i) && !opt.disabled {
                canvas.fill_rounded_rect(row, self.row_style.radius, self.row_style.background);
            }

            let style = TextStyle {
                color: if opt.disabled {
                    self.muted_color
                } else {
                    self.text_color
                },
                weight: if selected == Some(i) {
                    FontWeight::Medium
                } else {
                    FontWeight::Normal
                },
                ..Default::default()
            };
            let text_pos = Point::new(
                row.x + TEXT_INSET,
                row.y + (self.item_height - 16.0) / 2.0,
            );
            canvas.draw_text(&self.option_text(opt), text_pos, &style);

            if self.show_description {
                if let Some(description) = &opt.description {
                    let desc_style = TextStyle {
                        size: 12.0,
                        color: self.muted_color,
                        ..Default::default()
                    };
                    let desc_pos = Point::new(row.x + TEXT_INSET, row.y + self.item_height - 6.0);
                    canvas.draw_text(description, desc_pos, &desc_style);
                }
            }

            if selected == Some(i) {
                let x = row.right() - 20.0;
                let y = row.y + self.item_height / 2.0;
                let check = [
                    Point::new(x - 5.0, y),
                    Point::new(x - 1.0, y + 4.0),
                    Point::new(x + 6.0, y - 4.0),
                ];
                canvas.draw_path(&check, self.accent_color, 2.0);
            }
        }

        canvas.pop_clip();
    }
}

fn toggled(open: bool) -> Box<dyn Any + Send> {
    Box::new(DropdownToggled { open })
}

fn boxed(msg: SelectionChanged) -> Box<dyn Any + Send> {
    Box::new(msg)
}

impl Widget for Select {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let error = if self.error.is_some() {
            ERROR_GAP + ERROR_HEIGHT
        } else {
            0.0
        };
        let height = self.label_offset() + self.item_height + error;
        constraints.constrain(Size::new(self.min_width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.container_style.background.a > 0.0 {
            canvas.fill_rounded_rect(
                self.bounds,
                self.container_style.radius,
                self.container_style.background,
            );
        }
        self.paint_label(canvas);
        self.paint_trigger(canvas);
        self.paint_error(canvas);
        if let Some(popover) = self.popover_rect() {
            self.paint_popover(canvas, popover);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        match event {
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut => {
                self.focused = false;
                self.close().then(|| toggled(false))
            }
            Event::KeyDown { key } if self.focused => self.handle_key(*key),
            Event::MouseMove { position } => {
                if let Some(index) = self.row_at(*position) {
                    if self.is_enabled_row(index) {
                        self.set_highlight(index);
                    }
                }
                None
            }
            Event::Scroll { position, delta_y } => {
                if self
                    .popover_rect()
                    .is_some_and(|p| p.contains_point(position))
                {
                    self.scroll_by(*delta_y);
                }
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.handle_press(*position),
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn consumes_key(&self, key: Key) -> bool {
        if self.disabled || !self.focused {
            return false;
        }
        match key {
            Key::Enter | Key::Space | Key::Up | Key::Down => true,
            Key::Escape => self.open,
            _ => false,
        }
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value
            .as_deref()
            .or(self.label.as_deref())
            .or(Some(self.placeholder.as_str()))
            .filter(|name| !name.is_empty())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ComboBox
    }

    fn accessible_node(&self) -> AccessibleNode {
        let mut node = AccessibleNode::new(AccessibleRole::ComboBox).with_id(self.id.clone());
        node.name = self.accessible_name().map(str::to_string);
        node.value = self.selected_option().map(|o| self.option_text(o));
        node.enabled = !self.disabled;
        node.focusable = !self.disabled;
        node.expanded = Some(self.open);
        node.required = self.required;
        node.invalid = self.error.is_some();
        node.has_popup = Some(AccessibleRole::ListBox);
        node.controls = Some(self.listbox_id());

        if self.open {
            node.active_descendant = self.highlighted.and_then(|i| self.option_id(i));

            let selected = self.selected_index();
            let mut listbox = AccessibleNode::new(AccessibleRole::ListBox).with_id(self.listbox_id());
            for (i, opt) in self.options.iter().enumerate() {
                let mut row = AccessibleNode::new(AccessibleRole::Option)
                    .with_id(format!("{}-option-{}", self.id, opt.value))
                    .with_name(self.option_text(opt));
                if self.show_description {
                    row.description = opt.description.clone();
                }
                row.selected = Some(selected == Some(i));
                row.enabled = !opt.disabled;
                listbox.children.push(row);
            }
            node.children.push(listbox);
        }

        if let Some(message) = &self.error {
            node.children
                .push(AccessibleNode::new(AccessibleRole::Alert).with_name(message.clone()));
        }

        node
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn widget_id(&self) -> Option<WidgetId> {
        self.widget_id_value
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
