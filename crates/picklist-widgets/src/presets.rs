//! Preconfigured selects with fixed option tables.
//!
//! Each preset returns a plain [`Select`]; hosts forward `value` and
//! `on_change` through the normal builder calls.

use crate::option::SelectOption;
use crate::select::Select;

/// Fruit options as `(value, label)`.
pub const FRUITS: &[(&str, &str)] = &[
    ("apple", "Apple"),
    ("banana", "Banana"),
    ("blueberry", "Blueberry"),
    ("grapes", "Grapes"),
    ("pineapple", "Pineapple"),
];

/// UTC offsets as `(value, label)`, west to east.
pub const TIMEZONES: &[(&str, &str)] = &[
    ("utc-12", "(UTC-12:00) International Date Line West"),
    ("utc-11", "(UTC-11:00) Coordinated Universal Time-11"),
    ("utc-10", "(UTC-10:00) Hawaii"),
    ("utc-9", "(UTC-09:00) Alaska"),
    ("utc-8", "(UTC-08:00) Pacific Time (US & Canada)"),
    ("utc-7", "(UTC-07:00) Mountain Time (US & Canada)"),
    ("utc-6", "(UTC-06:00) Central Time (US & Canada)"),
    ("utc-5", "(UTC-05:00) Eastern Time (US & Canada)"),
    ("utc-4", "(UTC-04:00) Atlantic Time (Canada)"),
    ("utc-3", "(UTC-03:00) Brasilia"),
    ("utc-2", "(UTC-02:00) Coordinated Universal Time-02"),
    ("utc-1", "(UTC-01:00) Azores"),
    ("utc", "(UTC) Coordinated Universal Time"),
    ("utc+1", "(UTC+01:00) Central European Time"),
    ("utc+2", "(UTC+02:00) Eastern European Time"),
    ("utc+3", "(UTC+03:00) Moscow Time"),
    ("utc+4", "(UTC+04:00) Dubai"),
    ("utc+5", "(UTC+05:00) Pakistan Standard Time"),
    ("utc+5.5", "(UTC+05:30) Indian Standard Time"),
    ("utc+6", "(UTC+06:00) Bangladesh Standard Time"),
    ("utc+7", "(UTC+07:00) Indochina Time"),
    ("utc+8", "(UTC+08:00) China Standard Time"),
    ("utc+9", "(UTC+09:00) Japan Standard Time"),
    ("utc+10", "(UTC+10:00) Australian Eastern Standard Time"),
    ("utc+11", "(UTC+11:00) Solomon Islands Time"),
    ("utc+12", "(UTC+12:00) New Zealand Standard Time"),
];

/// Color options as `(value, label, description)`.
pub const COLORS: &[(&str, &str, &str)] = &[
    ("red", "Red", "The color of passion and energy"),
    ("blue", "Blue", "The color of calm and serenity"),
    ("green", "Green", "The color of nature and growth"),
    ("yellow", "Yellow", "The color of happiness and optimism"),
    ("purple", "Purple", "The color of luxury and creativity"),
];

/// Width of the fruit preset.
pub const FRUIT_WIDTH: f32 = 180.0;
/// Width of the timezone preset.
pub const TIMEZONE_WIDTH: f32 = 280.0;

fn table(rows: &[(&str, &str)]) -> Vec<SelectOption> {
    rows.iter()
        .map(|&(value, label)| SelectOption::new(value, label))
        .collect()
}

/// The fruit options.
#[must_use]
pub fn fruit_options() -> Vec<SelectOption> {
    table(FRUITS)
}

/// The timezone options.
#[must_use]
pub fn timezone_options() -> Vec<SelectOption> {
    table(TIMEZONES)
}

/// The color options, with descriptions.
#[must_use]
pub fn color_options() -> Vec<SelectOption> {
    COLORS
        .iter()
        .map(|&(value, label, description)| SelectOption::new(value, label).description(description))
        .collect()
}

/// Basic fruit select.
#[must_use]
pub fn fruit_select() -> Select {
    fruit_select_with(fruit_options())
}

/// Fruit select defaults with a replacement option table.
#[must_use]
pub fn fruit_select_with(options: impl IntoIterator<Item = SelectOption>) -> Select {
    Select::new()
        .id("fruit")
        .options(options)
        .placeholder("Select a fruit")
        .min_width(FRUIT_WIDTH)
}

/// Long timezone list that scrolls inside the popover.
#[must_use]
pub fn timezone_select() -> Select {
    Select::new()
        .id("timezone")
        .options(timezone_options())
        .placeholder("Select a timezone")
        .min_width(TIMEZONE_WIDTH)
}

/// Color select showing a description under each label.
#[must_use]
pub fn color_select() -> Select {
    Select::new()
        .id("color")
        .options(color_options())
        .placeholder("Choose a color")
        .label("Select a color")
        .show_description(true)
}
