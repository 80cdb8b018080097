//! Picklist: an accessible single-value dropdown select.
//!
//! Re-exports the core types, the [`Select`](widgets::Select) widget and its
//! presets, the manifest loader, and the [`showcase`] host page.
//!
//! ```
//! use picklist::widgets::presets;
//! use picklist::{Event, Key, Rect, Widget};
//!
//! let mut select = presets::fruit_select();
//! select.layout(Rect::new(0.0, 0.0, 180.0, 36.0));
//! select.event(&Event::FocusIn);
//! select.event(&Event::KeyDown { key: Key::Down });
//! select.event(&Event::KeyDown { key: Key::Enter });
//! assert_eq!(select.selected_value(), Some("apple"));
//! ```

pub use picklist_core::*;
pub use picklist_widgets as widgets;
pub use picklist_yaml as yaml;

pub mod showcase;

pub use showcase::{Showcase, ShowcaseSection};
pub use widgets::{Select, SelectOption, SelectionChanged};
