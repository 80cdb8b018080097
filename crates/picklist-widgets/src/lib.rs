//! Dropdown select widget for picklist.
//!
//! - [`Select`]: trigger plus popover list with keyboard and pointer interaction
//! - [`presets`]: fruit, timezone, and color selects
//! - [`compat`]: inert stand-ins for composable select sub-components

pub mod compat;
mod option;
pub mod presets;
pub mod select;

pub use option::SelectOption;
pub use select::{
    ChangeCallback, DropdownToggled, OptionRenderer, RegionStyle, Select, SelectionChanged,
    DEFAULT_MAX_HEIGHT, DEFAULT_PLACEHOLDER, EMPTY_STATE_TEXT,
};
