//! Headless interaction harness for picklist widgets.
//!
//! The harness owns a root widget, lays it out inside a viewport, feeds it
//! synthetic input, and records every message the widget returns plus every
//! key whose default action the widget asked the host to suppress.

use picklist_core::{
    AccessibleNode, Constraints, Event, Key, MouseButton, Point, Rect, RecordingCanvas, Widget,
};
use picklist_widgets::Select;
use std::any::Any;
use std::collections::VecDeque;

/// Test harness for interacting with a widget.
pub struct Harness<W: Widget> {
    /// Root widget being tested
    root: W,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Current viewport
    viewport: Rect,
    /// Messages returned by the root, in order
    messages: Vec<Box<dyn Any + Send>>,
    /// Keys the root consumed
    prevented: Vec<Key>,
}

impl<W: Widget + 'static> Harness<W> {
    /// Create a new harness and lay the root out at the viewport origin.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
            messages: Vec::new(),
            prevented: Vec::new(),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size and lay out again.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// The root widget.
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// The root widget, mutably.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Measure the root against the viewport and lay it out.
    pub fn relayout(&mut self) -> &mut Self {
        let size = self.root.measure(Constraints::loose(self.viewport.size()));
        self.root
            .layout(Rect::new(self.viewport.x, self.viewport.y, size.width, size.height));
        self
    }

    // === Event Simulation ===

    /// Dispatch one event to the root.
    pub fn dispatch(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    /// Give the root keyboard focus.
    pub fn focus(&mut self) -> &mut Self {
        self.dispatch(Event::FocusIn)
    }

    /// Take keyboard focus away from the root.
    pub fn blur(&mut self) -> &mut Self {
        self.dispatch(Event::FocusOut)
    }

    /// Simulate a key press, recording whether the root consumed it.
    pub fn press(&mut self, key: Key) -> &mut Self {
        if self.root.consumes_key(key) {
            self.prevented.push(key);
        }
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Simulate a sequence of key presses.
    pub fn press_all(&mut self, keys: &[Key]) -> &mut Self {
        for &key in keys {
            self.press(key);
        }
        self
    }

    /// Simulate a left click at `position`.
    pub fn click(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::MouseMove { position });
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Simulate a left click beyond the right edge of the viewport.
    pub fn click_outside(&mut self) -> &mut Self {
        let position = Point::new(self.viewport.right() + 10.0, self.viewport.y + 10.0);
        self.click(position)
    }

    /// Move the pointer to `position`.
    pub fn hover(&mut self, position: Point) -> &mut Self {
        self.dispatch(Event::MouseMove { position })
    }

    /// Simulate wheel scrolling at `position`.
    pub fn scroll(&mut self, position: Point, delta_y: f32) -> &mut Self {
        self.dispatch(Event::Scroll { position, delta_y })
    }

    // === Queries ===

    /// Paint the root into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    /// Every text string the root paints.
    #[must_use]
    pub fn painted_texts(&self) -> Vec<String> {
        self.paint().texts().into_iter().map(str::to_string).collect()
    }

    /// The root's accessibility tree.
    #[must_use]
    pub fn accessible_tree(&self) -> AccessibleNode {
        self.root.accessible_node()
    }

    /// Find a widget by test id, searching depth first from the root.
    #[must_use]
    pub fn find_by_test_id(&self, id: &str) -> Option<&dyn Widget> {
        find_widget(&self.root, id)
    }

    /// All messages returned by the root so far.
    #[must_use]
    pub fn messages(&self) -> &[Box<dyn Any + Send>] {
        &self.messages
    }

    /// Messages of type `T`, in order.
    #[must_use]
    pub fn messages_of<T: 'static>(&self) -> Vec<&T> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .collect()
    }

    /// The latest message of type `T`.
    #[must_use]
    pub fn last_message_of<T: 'static>(&self) -> Option<&T> {
        self.messages.iter().rev().find_map(|m| m.downcast_ref::<T>())
    }

    /// Drop recorded messages and consumed keys.
    pub fn clear(&mut self) -> &mut Self {
        self.messages.clear();
        self.prevented.clear();
        self
    }

    /// Keys whose default action the root suppressed.
    #[must_use]
    pub fn prevented_keys(&self) -> &[Key] {
        &self.prevented
    }

    // === Assertions ===

    /// Assert that `text` is painted.
    ///
    /// # Panics
    ///
    /// Panics if no painted text equals `text`.
    pub fn assert_painted(&self, text: &str) -> &Self {
        let texts = self.painted_texts();
        assert!(
            texts.iter().any(|t| t == text),
            "Expected '{text}' to be painted, painted texts: {texts:?}"
        );
        self
    }

    /// Assert that `text` is not painted.
    ///
    /// # Panics
    ///
    /// Panics if some painted text equals `text`.
    pub fn assert_not_painted(&self, text: &str) -> &Self {
        let texts = self.painted_texts();
        assert!(
            !texts.iter().any(|t| t == text),
            "Expected '{text}' not to be painted, painted texts: {texts:?}"
        );
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            tracing::trace!(?event, "harness dispatch");
            if let Some(msg) = self.root.event(&event) {
                self.messages.push(msg);
            }
        }
    }
}

fn find_widget<'a>(widget: &'a dyn Widget, id: &str) -> Option<&'a dyn Widget> {
    if widget.test_id() == Some(id) {
        return Some(widget);
    }
    widget
        .children()
        .iter()
        .find_map(|child| find_widget(child.as_ref(), id))
}

/// Select-specific helpers.
impl Harness<Select> {
    /// Click the center of the trigger.
    pub fn click_trigger(&mut self) -> &mut Self {
        let center = self.root.trigger_rect().center();
        self.click(center)
    }

    /// Click the center of row `index`; does nothing while closed.
    pub fn click_row(&mut self, index: usize) -> &mut Self {
        match self.root.row_rect(index) {
            Some(row) => self.click(row.center()),
            None => self,
        }
    }

    /// Move the pointer over row `index`; does nothing while closed.
    pub fn hover_row(&mut self, index: usize) -> &mut Self {
        match self.root.row_rect(index) {
            Some(row) => self.hover(row.center()),
            None => self,
        }
    }

    /// Scroll the open popover by `delta_y` lines.
    pub fn scroll_popover(&mut self, delta_y: f32) -> &mut Self {
        match self.root.popover_rect() {
            Some(popover) => self.scroll(popover.center(), delta_y),
            None => self,
        }
    }

    /// Push a host value, as a controlled parent would.
    pub fn set_value(&mut self, value: Option<&str>) -> &mut Self {
        self.root.set_value(value);
        self
    }

    /// Assert the popover is open.
    ///
    /// # Panics
    ///
    /// Panics if the popover is closed.
    pub fn assert_open(&self) -> &Self {
        assert!(self.root.is_open(), "Expected select to be open");
        self
    }

    /// Assert the popover is closed.
    ///
    /// # Panics
    ///
    /// Panics if the popover is open.
    pub fn assert_closed(&self) -> &Self {
        assert!(!self.root.is_open(), "Expected select to be closed");
        self
    }

    /// Assert the selected value.
    ///
    /// # Panics
    ///
    /// Panics if the selected value differs.
    pub fn assert_selected(&self, expected: Option<&str>) -> &Self {
        let actual = self.root.selected_value();
        assert_eq!(
            actual, expected,
            "Expected selected value {expected:?} but got {actual:?}"
        );
        self
    }

    /// Assert the cursor row.
    ///
    /// # Panics
    ///
    /// Panics if the cursor differs.
    pub fn assert_highlighted(&self, expected: Option<usize>) -> &Self {
        let actual = self.root.highlighted();
        assert_eq!(
            actual, expected,
            "Expected highlighted row {expected:?} but got {actual:?}"
        );
        self
    }

    /// Assert the text shown in the trigger.
    ///
    /// # Panics
    ///
    /// Panics if the trigger text differs.
    pub fn assert_trigger_text(&self, expected: &str) -> &Self {
        let actual = self.root.display_text();
        assert_eq!(
            actual, expected,
            "Expected trigger text '{expected}' but got '{actual}'"
        );
        self
    }
}
