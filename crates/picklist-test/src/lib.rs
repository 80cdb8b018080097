//! Testing harness for picklist widgets.
//!
//! [`Harness`] drives a widget headlessly: it lays the widget out, feeds it
//! synthetic focus, keyboard, pointer, and wheel input, and records the
//! messages the widget returns. [`A11yChecker`] validates the combobox,
//! listbox, and option contract of a widget's accessibility tree.
//!
//! ```
//! use picklist_test::{A11yChecker, Harness};
//! use picklist_core::Key;
//! use picklist_widgets::{Select, SelectOption};
//!
//! let select = Select::new()
//!     .label("Select a fruit")
//!     .options([SelectOption::simple("apple"), SelectOption::simple("banana")]);
//!
//! let mut harness = Harness::new(select);
//! harness.focus().press_all(&[Key::Down, Key::Down, Key::Enter]);
//! harness.assert_closed().assert_selected(Some("banana"));
//! A11yChecker::check(harness.widget()).assert_pass();
//! ```

mod a11y;
mod harness;

pub use a11y::{aria_attributes, A11yChecker, A11yReport, A11yViolation, Impact};
pub use harness::Harness;
