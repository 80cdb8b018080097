//! Inert stand-ins for composable select sub-components.
//!
//! These types mirror the names of a popular component library's
//! select parts so that markup written against that API can be laid out
//! and painted. **None of them is functional**: they stack their children
//! or paint their text, ignore every event, and never open, highlight, or
//! commit anything. Use [`crate::Select`] for a working dropdown.

use picklist_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};
use std::any::Any;

/// Note shown next to API demonstrations built from these parts.
pub const API_DEMO_NOTE: &str =
    "Note: This is just for API demonstration - use the BasicSelect component instead";

const TEXT_HEIGHT: f32 = 24.0;
const CHAR_WIDTH: f32 = 7.5;

#[derive(Default)]
struct Stack {
    children: Vec<Box<dyn Widget>>,
    bounds: Rect,
}

impl Stack {
    fn measure(&self, constraints: Constraints) -> Size {
        let (width, height) = self.children.iter().fold((0.0f32, 0.0f32), |(w, h), child| {
            let size = child.measure(Constraints::loose(Size::new(
                constraints.max_width,
                constraints.max_height,
            )));
            (w.max(size.width), h + size.height)
        });
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let mut y = bounds.y;
        for child in &mut self.children {
            let size = child.measure(Constraints::loose(bounds.size()));
            child.layout(Rect::new(bounds.x, y, bounds.width, size.height));
            y += size.height;
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            child.paint(canvas);
        }
    }
}

macro_rules! inert_container {
    ($(#[$doc:meta])* $name:ident, $role:expr) => {
        $(#[$doc])*
        #[derive(Default)]
        pub struct $name {
            stack: Stack,
        }

        impl $name {
            /// Create an empty part.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Add a child part.
            #[must_use]
            pub fn child(mut self, widget: impl Widget + 'static) -> Self {
                self.stack.children.push(Box::new(widget));
                self
            }
        }

        impl Widget for $name {
            fn type_id(&self) -> TypeId {
                TypeId::of::<Self>()
            }

            fn measure(&self, constraints: Constraints) -> Size {
                self.stack.measure(constraints)
            }

            fn layout(&mut self, bounds: Rect) -> LayoutResult {
                self.stack.layout(bounds)
            }

            fn paint(&self, canvas: &mut dyn Canvas) {
                self.stack.paint(canvas);
            }

            fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
                None
            }

            fn children(&self) -> &[Box<dyn Widget>] {
                &self.stack.children
            }

            fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
                &mut self.stack.children
            }

            fn accessible_role(&self) -> AccessibleRole {
                $role
            }

            fn bounds(&self) -> Rect {
                self.stack.bounds
            }
        }
    };
}

macro_rules! inert_text {
    ($(#[$doc:meta])* $name:ident, $role:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            text: String,
            bounds: Rect,
        }

        impl $name {
            /// Text painted by this part.
            #[must_use]
            pub fn text(&self) -> &str {
                &self.text
            }
        }

        impl Widget for $name {
            fn type_id(&self) -> TypeId {
                TypeId::of::<Self>()
            }

            fn measure(&self, constraints: Constraints) -> Size {
                let width = self.text.chars().count() as f32 * CHAR_WIDTH;
                constraints.constrain(Size::new(width, TEXT_HEIGHT))
            }

            fn layout(&mut self, bounds: Rect) -> LayoutResult {
                self.bounds = bounds;
                LayoutResult {
                    size: bounds.size(),
                }
            }

            fn paint(&self, canvas: &mut dyn Canvas) {
                if !self.text.is_empty() {
                    canvas.draw_text(
                        &self.text,
                        Point::new(self.bounds.x, self.bounds.y),
                        &TextStyle::default(),
                    );
                }
            }

            fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
                None
            }

            fn children(&self) -> &[Box<dyn Widget>] {
                &[]
            }

            fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
                &mut []
            }

            fn accessible_name(&self) -> Option<&str> {
                Some(&self.text)
            }

            fn accessible_role(&self) -> AccessibleRole {
                $role
            }

            fn bounds(&self) -> Rect {
                self.bounds
            }
        }
    };
}

inert_container!(
    /// Trigger part. Non-functional: clicking it opens nothing.
    SelectTrigger,
    AccessibleRole::Generic
);

inert_container!(
    /// Popover content part. Non-functional: always painted, never scrolls.
    SelectContent,
    AccessibleRole::Generic
);

inert_container!(
    /// Group of items. Non-functional.
    SelectGroup,
    AccessibleRole::Group
);

inert_text!(
    /// Placeholder/value display part. Non-functional: never reflects a selection.
    SelectValue,
    AccessibleRole::Text
);

inert_text!(
    /// Item part. Non-functional: cannot be highlighted or committed.
    SelectItem,
    AccessibleRole::Text
);

inert_text!(
    /// Group label part. Non-functional.
    SelectLabel,
    AccessibleRole::Label
);

impl SelectValue {
    /// Create a value part showing `placeholder`.
    #[must_use]
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            text: placeholder.into(),
            bounds: Rect::default(),
        }
    }
}

impl SelectItem {
    /// Create an item. The value is accepted for API shape only.
    #[must_use]
    pub fn new(_value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: Rect::default(),
        }
    }
}

impl SelectLabel {
    /// Create a label part.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: Rect::default(),
        }
    }
}

/// Separator part. Non-functional: paints a hairline.
#[derive(Debug, Clone, Default)]
pub struct SelectSeparator {
    bounds: Rect,
}

impl SelectSeparator {
    /// Create a separator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for SelectSeparator {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(0.0, 9.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let y = self.bounds.center().y;
        canvas.fill_rect(
            Rect::new(self.bounds.x, y, self.bounds.width, 1.0),
            Color::rgb(0.9, 0.91, 0.92),
        );
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Separator
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
