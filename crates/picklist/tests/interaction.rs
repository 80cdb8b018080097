//! End-to-end interaction tests driven through the headless harness.

use picklist::showcase::{Showcase, ShowcaseSection};
use picklist::widgets::{presets, DropdownToggled, SelectionChanged, EMPTY_STATE_TEXT};
use picklist::yaml::SelectManifest;
use picklist::{AccessibleRole, Key, Select, SelectOption};
use picklist_test::{A11yChecker, Harness};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type Log = Arc<Mutex<Vec<String>>>;

fn recorded(select: Select) -> (Select, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let select = select.on_change(move |v| sink.lock().unwrap().push(v.to_string()));
    (select, log)
}

fn berries() -> Select {
    Select::new().options([
        SelectOption::new("apple", "Apple"),
        SelectOption::new("banana", "Banana"),
        SelectOption::new("blueberry", "Blueberry"),
    ])
}

// =========================================================================
// Keyboard Scenarios
// =========================================================================

#[test]
fn test_arrow_arrow_enter_commits_banana() {
    init_tracing();
    let (select, log) = recorded(berries());
    let mut harness = Harness::new(select);

    harness.focus().press(Key::Down);
    harness.assert_open().assert_highlighted(Some(0));
    harness.press(Key::Down);
    harness.assert_highlighted(Some(1));
    harness.press(Key::Enter);

    harness.assert_closed().assert_selected(Some("banana"));
    harness.assert_trigger_text("Banana");
    assert_eq!(*log.lock().unwrap(), vec!["banana".to_string()]);
    let change = harness.last_message_of::<SelectionChanged>().unwrap();
    assert_eq!(change.index, 1);
    assert_eq!(
        harness.prevented_keys(),
        &[Key::Down, Key::Down, Key::Enter]
    );
}

#[test]
fn test_arrow_down_skips_disabled() {
    let select = Select::new().options([
        SelectOption::simple("A"),
        SelectOption::simple("B").disabled(true),
        SelectOption::simple("C"),
    ]);
    let mut harness = Harness::new(select);
    harness.focus().press(Key::Down).assert_highlighted(Some(0));
    harness.press(Key::Down).assert_highlighted(Some(2));
    harness.press(Key::Down).assert_highlighted(Some(2));
    harness.press(Key::Up).assert_highlighted(Some(0));
    harness.press(Key::Up).assert_highlighted(Some(0));
}

#[test]
fn test_escape_closes_without_commit() {
    let (select, log) = recorded(berries().value(Some("apple")));
    let mut harness = Harness::new(select);
    harness.focus().press_all(&[Key::Enter, Key::Down, Key::Escape]);

    harness.assert_closed().assert_selected(Some("apple"));
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(
        harness.last_message_of::<DropdownToggled>(),
        Some(&DropdownToggled { open: false })
    );
}

#[test]
fn test_tab_closes_and_is_not_consumed() {
    let mut harness = Harness::new(berries());
    harness.focus().press(Key::Space).assert_open();
    harness.clear();
    harness.press(Key::Tab);
    harness.assert_closed();
    assert!(harness.prevented_keys().is_empty());
}

#[test]
fn test_enter_without_cursor_closes() {
    let (select, log) = recorded(berries());
    let mut harness = Harness::new(select);
    harness.focus().press(Key::Enter).assert_open();
    harness.assert_highlighted(None);
    harness.press(Key::Enter).assert_closed();
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_keys_ignored_without_focus() {
    let mut harness = Harness::new(berries());
    harness.press(Key::Down).assert_closed();
    assert!(harness.messages().is_empty());
}

// =========================================================================
// Pointer Scenarios
// =========================================================================

#[test]
fn test_click_row_commits_once() {
    let (select, log) = recorded(berries());
    let mut harness = Harness::new(select);
    harness.click_trigger().assert_open();
    harness.click_row(2);
    harness.assert_closed().assert_selected(Some("blueberry"));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn test_click_disabled_row_is_ignored() {
    let (select, log) = recorded(Select::new().options([
        SelectOption::simple("A"),
        SelectOption::simple("B").disabled(true),
    ]));
    let mut harness = Harness::new(select);
    harness.click_trigger().hover_row(1).assert_highlighted(None);
    harness.click_row(1);
    harness.assert_open().assert_selected(None);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_click_outside_closes_without_commit() {
    let (select, log) = recorded(berries().value(Some("banana")));
    let mut harness = Harness::new(select);
    harness.click_trigger().hover_row(0).assert_open();
    harness.click_outside();
    harness.assert_closed().assert_selected(Some("banana"));
    assert!(log.lock().unwrap().is_empty());
    assert!(!harness.widget().is_focused());
}

#[test]
fn test_trigger_click_toggles() {
    let mut harness = Harness::new(berries());
    harness.click_trigger().assert_open();
    harness.click_trigger().assert_closed();
    assert_eq!(
        harness.messages_of::<DropdownToggled>(),
        vec![
            &DropdownToggled { open: true },
            &DropdownToggled { open: false }
        ]
    );
}

#[test]
fn test_disabled_select_ignores_everything() {
    let mut harness = Harness::new(berries().disabled(true));
    harness.focus().press(Key::Enter).click_trigger();
    harness.assert_closed();
    assert!(harness.messages().is_empty());
    assert!(harness.prevented_keys().is_empty());
}

// =========================================================================
// Rendering Scenarios
// =========================================================================

#[test]
fn test_empty_options_show_empty_state_row() {
    let mut harness = Harness::new(Select::new().label("Nothing"));
    harness.click_trigger().assert_open();
    harness.assert_painted(EMPTY_STATE_TEXT);

    let tree = harness.accessible_tree();
    assert_eq!(tree.find_all(AccessibleRole::ListBox).len(), 1);
    assert!(tree.find_all(AccessibleRole::Option).is_empty());

    harness.press(Key::Down).press(Key::Enter);
    harness.assert_selected(None);
}

#[test]
fn test_controlled_value_tracks_host() {
    let mut harness = Harness::new(berries().value(Some("apple")));
    harness.assert_trigger_text("Apple");

    harness.set_value(Some("blueberry"));
    harness.assert_trigger_text("Blueberry").assert_painted("Blueberry");

    harness.set_value(Some("kiwi"));
    harness.assert_selected(Some("kiwi"));
    harness.assert_trigger_text("Select an option");
}

#[test]
fn test_descriptions_only_in_rows() {
    let mut harness = Harness::new(presets::color_select().value(Some("red")));
    harness.assert_not_painted("The color of passion and energy");
    harness.click_trigger();
    harness.assert_painted("The color of passion and energy");
    harness.assert_painted("The color of luxury and creativity");
}

#[test]
fn test_custom_renderer_applies_to_trigger_and_rows() {
    let select = berries()
        .value(Some("apple"))
        .render_option(|o| format!("* {}", o.label));
    let mut harness = Harness::new(select);
    harness.assert_trigger_text("* Apple");
    harness.click_trigger().assert_painted("* Banana");
}

// =========================================================================
// Scrolling Scenarios
// =========================================================================

#[test]
fn test_timezone_cursor_stays_visible() {
    let mut harness = Harness::new(presets::timezone_select());
    harness.focus().press(Key::Down);
    for _ in 0..15 {
        harness.press(Key::Down);
        let select = harness.widget();
        let index = select.highlighted().unwrap();
        let row = select.row_rect(index).unwrap();
        let popover = select.popover_rect().unwrap();
        assert!(row.y >= popover.y - 0.01, "row {index} above viewport");
        assert!(row.bottom() <= popover.bottom() + 0.01, "row {index} below viewport");
    }
    assert!(harness.widget().scroll_offset() > 0.0);

    harness.press(Key::Up);
    let offset = harness.widget().scroll_offset();
    harness.press_all(&[Key::Up; 20]);
    assert!(harness.widget().scroll_offset() < offset);
    harness.assert_highlighted(Some(0));
    assert_eq!(harness.widget().scroll_offset(), 0.0);
}

#[test]
fn test_wheel_scroll_is_clamped() {
    let mut harness = Harness::new(presets::timezone_select());
    harness.click_trigger().scroll_popover(-3.0);
    assert_eq!(harness.widget().scroll_offset(), 108.0);
    harness.scroll_popover(-1000.0);
    let max = harness.widget().scroll_offset();
    harness.scroll_popover(-1.0);
    assert_eq!(harness.widget().scroll_offset(), max);
    harness.scroll_popover(1000.0);
    assert_eq!(harness.widget().scroll_offset(), 0.0);
}

// =========================================================================
// Accessibility Scenarios
// =========================================================================

#[test]
fn test_active_descendant_follows_cursor() {
    let mut harness = Harness::new(berries().id("fruit").label("Fruit"));
    assert_eq!(harness.accessible_tree().active_descendant, None);

    harness.focus().press_all(&[Key::Down, Key::Down]);
    let tree = harness.accessible_tree();
    assert_eq!(tree.expanded, Some(true));
    assert_eq!(tree.active_descendant.as_deref(), Some("fruit-option-banana"));
    A11yChecker::check(harness.widget()).assert_pass();

    harness.press(Key::Enter);
    let tree = harness.accessible_tree();
    assert_eq!(tree.expanded, Some(false));
    assert_eq!(tree.active_descendant, None);
    assert_eq!(tree.value.as_deref(), Some("Banana"));
}

// =========================================================================
// Manifest Scenarios
// =========================================================================

#[test]
fn test_manifest_select_is_interactive() {
    let manifest = SelectManifest::from_yaml(
        r"
id: pet
label: Pick a pet
options:
  - value: cat
    label: Cat
  - value: dog
    label: Dog
    disabled: true
  - value: fish
",
    )
    .unwrap();
    let mut harness = Harness::new(manifest.build().unwrap());
    harness.focus().press_all(&[Key::Down, Key::Down, Key::Enter]);
    harness.assert_selected(Some("fish")).assert_trigger_text("fish");
    A11yChecker::check(harness.widget()).assert_pass();
}

// =========================================================================
// Showcase Scenarios
// =========================================================================

#[test]
fn test_showcase_round_trip() {
    init_tracing();
    let mut harness = Harness::new(Showcase::new());
    harness.assert_painted("Improved Select Components");

    let trigger = harness
        .widget()
        .select(ShowcaseSection::Timezone)
        .trigger_rect()
        .center();
    harness.click(trigger);
    assert_eq!(
        harness.widget().open_section(),
        Some(ShowcaseSection::Timezone)
    );
    A11yChecker::check(harness.widget()).assert_pass();

    let row = harness
        .widget()
        .select(ShowcaseSection::Timezone)
        .row_rect(2)
        .unwrap()
        .center();
    harness.click(row);
    assert_eq!(
        harness.widget().value(ShowcaseSection::Timezone),
        Some("utc-10")
    );
    harness.assert_painted("You selected: utc-10");
    harness.assert_painted("(UTC-10:00) Hawaii");
}

#[test]
fn test_showcase_keyboard_walk() {
    let mut harness = Harness::new(Showcase::new());
    harness.focus().press(Key::Tab).press(Key::Tab);
    assert_eq!(
        harness.widget().focused_section(),
        Some(ShowcaseSection::Color)
    );
    harness.press_all(&[Key::Up, Key::Enter]);
    assert_eq!(harness.widget().value(ShowcaseSection::Color), Some("purple"));
    harness.assert_painted("You selected: purple");
}

// =========================================================================
// Property Tests
// =========================================================================

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Enter),
        Just(Key::Space),
        Just(Key::Up),
        Just(Key::Down),
        Just(Key::Escape),
        Just(Key::Tab),
    ]
}

proptest! {
    #[test]
    fn prop_cursor_and_commits_stay_valid(
        disabled in prop::collection::vec(any::<bool>(), 0..10),
        keys in prop::collection::vec(key(), 0..40),
    ) {
        let options: Vec<SelectOption> = disabled
            .iter()
            .enumerate()
            .map(|(i, &d)| SelectOption::simple(format!("v{i}")).disabled(d))
            .collect();
        let (select, log) = recorded(Select::new().options(options));
        let mut harness = Harness::new(select);
        harness.focus();

        for key in keys {
            harness.press(key);
            if let Some(index) = harness.widget().highlighted() {
                prop_assert!(index < disabled.len());
                prop_assert!(!disabled[index]);
            }
        }

        let commits = harness.messages_of::<SelectionChanged>();
        let log = log.lock().unwrap();
        prop_assert_eq!(commits.len(), log.len());
        for (commit, value) in commits.iter().zip(log.iter()) {
            prop_assert_eq!(&commit.value, value);
            prop_assert!(!disabled[commit.index]);
        }
    }
}
