//! Showcase host page.
//!
//! A column of controlled selects: each commit is stored by the page and
//! pushed back into the select through [`Select::set_value`], and the stored
//! value is echoed under the select. The color section also paints a swatch
//! filled with the chosen color.

use picklist_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    AccessibleNode, Canvas, Color, Constraints, Event, Key, Point, Rect, Size, TypeId, Widget,
};
use picklist_widgets::{compat::API_DEMO_NOTE, presets, Select, SelectionChanged};
use std::any::Any;

/// Page title.
pub const TITLE: &str = "Improved Select Components";
/// Page subtitle.
pub const SUBTITLE: &str = "Portable, customizable, and easy to import into any project";

const PAGE_WIDTH: f32 = 448.0;
const NARROW_WIDTH: f32 = 320.0;
const TITLE_HEIGHT: f32 = 36.0;
const SUBTITLE_HEIGHT: f32 = 24.0;
const BLOCK_GAP: f32 = 48.0;
const HEADING_HEIGHT: f32 = 28.0;
const HEADING_GAP: f32 = 24.0;
const NOTE_HEIGHT: f32 = 20.0;
const NOTE_GAP: f32 = 8.0;
const ECHO_GAP: f32 = 16.0;
const ECHO_HEIGHT: f32 = 24.0;
const SWATCH_RADIUS: f32 = 12.0;
const CHAR_WIDTH: f32 = 7.5;

/// Sections of the showcase, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowcaseSection {
    /// Basic fruit select
    Fruit,
    /// Scrollable timezone select
    Timezone,
    /// Color select with descriptions
    Color,
    /// Select built with the compatibility API note
    ApiDemo,
}

impl ShowcaseSection {
    /// Every section in page order.
    pub const ALL: [Self; 4] = [Self::Fruit, Self::Timezone, Self::Color, Self::ApiDemo];

    const fn index(self) -> usize {
        self as usize
    }
}

struct Section {
    heading: Option<&'static str>,
    note: Option<&'static str>,
    select: Select,
    value: Option<String>,
    echo: bool,
    swatch: bool,
    full_width: bool,
    heading_y: f32,
    note_y: f32,
    echo_y: f32,
}

impl Section {
    fn new(heading: Option<&'static str>, select: Select) -> Self {
        Self {
            heading,
            note: None,
            select,
            value: None,
            echo: true,
            swatch: false,
            full_width: false,
            heading_y: 0.0,
            note_y: 0.0,
            echo_y: 0.0,
        }
    }

    fn select_width(&self, page_width: f32) -> f32 {
        if self.full_width {
            page_width
        } else {
            page_width.min(NARROW_WIDTH).max(self.select.get_min_width())
        }
    }

    fn shows_echo(&self) -> bool {
        self.echo && self.value.is_some()
    }

    /// Height of the section below the preceding block gap.
    fn height(&self, page_width: f32) -> f32 {
        let mut height = 0.0;
        if self.heading.is_some() {
            height += HEADING_HEIGHT + HEADING_GAP;
        }
        if self.note.is_some() {
            height += NOTE_HEIGHT + NOTE_GAP;
        }
        let width = self.select_width(page_width);
        height += self
            .select
            .measure(Constraints::loose(Size::new(width, f32::INFINITY)))
            .height;
        if self.shows_echo() {
            height += ECHO_GAP + ECHO_HEIGHT;
        }
        height
    }
}

/// Named CSS colors used by the color preset.
fn swatch_color(value: &str) -> Option<Color> {
    match value {
        "red" => Some(Color::rgb(1.0, 0.0, 0.0)),
        "blue" => Some(Color::rgb(0.0, 0.0, 1.0)),
        "green" => Some(Color::rgb(0.0, 0.5, 0.0)),
        "yellow" => Some(Color::rgb(1.0, 1.0, 0.0)),
        "purple" => Some(Color::rgb(0.5, 0.0, 0.5)),
        other => Color::from_hex(other).ok(),
    }
}

/// Host page demonstrating the select presets.
pub struct Showcase {
    sections: Vec<Section>,
    focused: Option<usize>,
    bounds: Rect,
    text_color: Color,
    muted_color: Color,
    note_color: Color,
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new()
    }
}

impl Showcase {
    /// Create the page with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        let fruit = Section::new(
            Some("Basic Select"),
            presets::fruit_select().label("Select a fruit"),
        );
        let timezone = Section {
            full_width: true,
            ..Section::new(
                Some("Scrollable Select"),
                presets::timezone_select().label("Select a timezone"),
            )
        };
        let color = Section {
            swatch: true,
            ..Section::new(Some("Select with Descriptions"), presets::color_select())
        };
        let api_demo = Section {
            note: Some(API_DEMO_NOTE),
            echo: false,
            ..Section::new(
                None,
                presets::fruit_select()
                    .id("api-demo")
                    .with_accessible_name("Select a fruit"),
            )
        };

        Self {
            sections: vec![fruit, timezone, color, api_demo],
            focused: None,
            bounds: Rect::default(),
            text_color: Color::rgb(0.07, 0.09, 0.15),
            muted_color: Color::rgb(0.42, 0.45, 0.5),
            note_color: Color::rgb(0.94, 0.27, 0.27),
        }
    }

    /// The select in `section`.
    #[must_use]
    pub fn select(&self, section: ShowcaseSection) -> &Select {
        &self.sections[section.index()].select
    }

    /// The value the page holds for `section`.
    #[must_use]
    pub fn value(&self, section: ShowcaseSection) -> Option<&str> {
        self.sections[section.index()].value.as_deref()
    }

    /// Section whose select has keyboard focus.
    #[must_use]
    pub fn focused_section(&self) -> Option<ShowcaseSection> {
        self.focused.map(|i| ShowcaseSection::ALL[i])
    }

    /// Section whose popover is open.
    #[must_use]
    pub fn open_section(&self) -> Option<ShowcaseSection> {
        self.open_index().map(|i| ShowcaseSection::ALL[i])
    }

    /// Set the value held for `section`, as if it had been committed.
    pub fn set_value(&mut self, section: ShowcaseSection, value: Option<&str>) {
        let s = &mut self.sections[section.index()];
        s.value = value.map(str::to_string);
        s.select.set_value(value);
        self.arrange();
    }

    /// Text echoed under `section`, if any.
    #[must_use]
    pub fn echo_text(&self, section: ShowcaseSection) -> Option<String> {
        let s = &self.sections[section.index()];
        s.shows_echo()
            .then(|| format!("You selected: {}", s.value.as_deref().unwrap_or_default()))
    }

    fn open_index(&self) -> Option<usize> {
        self.sections.iter().position(|s| s.select.is_open())
    }

    fn page_width(&self) -> f32 {
        self.bounds.width.min(PAGE_WIDTH)
    }

    fn arrange(&mut self) {
        let width = self.page_width();
        let x = self.bounds.x + (self.bounds.width - width) / 2.0;
        let mut y = self.bounds.y + TITLE_HEIGHT + SUBTITLE_HEIGHT;

        for section in &mut self.sections {
            y += BLOCK_GAP;
            section.heading_y = y;
            if section.heading.is_some() {
                y += HEADING_HEIGHT + HEADING_GAP;
            }
            section.note_y = y;
            if section.note.is_some() {
                y += NOTE_HEIGHT + NOTE_GAP;
            }
            let select_width = section.select_width(width);
            let size = section
                .select
                .measure(Constraints::loose(Size::new(select_width, f32::INFINITY)));
            section
                .select
                .layout(Rect::new(x, y, select_width, size.height));
            y += size.height;
            if section.shows_echo() {
                section.echo_y = y + ECHO_GAP;
                y = section.echo_y + ECHO_HEIGHT;
            }
        }
    }

    /// Store a commit from section `index` and push it back into the select.
    fn record(&mut self, index: usize, msg: Box<dyn Any + Send>) -> Box<dyn Any + Send> {
        if let Some(change) = msg.downcast_ref::<SelectionChanged>() {
            let section = &mut self.sections[index];
            tracing::debug!(
                section = ?ShowcaseSection::ALL[index],
                value = %change.value,
                "showcase stored selection"
            );
            section.value = Some(change.value.clone());
            section.select.set_value(Some(&change.value));
            self.arrange();
        }
        msg
    }

    fn route_pointer(
        &mut self,
        event: &Event,
        position: Point,
    ) -> Option<(usize, Box<dyn Any + Send>)> {
        // An open popover sits above everything laid out after it.
        if let Some(i) = self.open_index() {
            let over_popover = self.sections[i]
                .select
                .popover_rect()
                .is_some_and(|p| p.contains_point(&position));
            if over_popover {
                return self.sections[i].select.event(event).map(|m| (i, m));
            }
        }

        let target = self
            .sections
            .iter()
            .position(|s| s.select.region_contains(position));
        let mut result = None;
        for (i, section) in self.sections.iter_mut().enumerate() {
            if let Some(msg) = section.select.event(event) {
                if result.is_none() || Some(i) == target {
                    result = Some((i, msg));
                }
            }
        }

        if matches!(event, Event::MouseDown { .. }) {
            self.focused = self.sections.iter().position(|s| s.select.is_focused());
        }
        result
    }

    fn route_key(&mut self, event: &Event, key: Key) -> Option<(usize, Box<dyn Any + Send>)> {
        let i = self.focused?;
        let msg = self.sections[i].select.event(event).map(|m| (i, m));

        if key == Key::Tab && matches!(event, Event::KeyDown { .. }) {
            self.sections[i].select.event(&Event::FocusOut);
            let next = i + 1;
            if next < self.sections.len() {
                self.sections[next].select.event(&Event::FocusIn);
                self.focused = Some(next);
            } else {
                self.focused = None;
            }
        }
        msg
    }

    fn paint_text(
        &self,
        canvas: &mut dyn Canvas,
        text: &str,
        y: f32,
        style: &TextStyle,
        centered: bool,
    ) {
        let width = self.page_width();
        let left = self.bounds.x + (self.bounds.width - width) / 2.0;
        let x = if centered {
            let text_width = text.chars().count() as f32 * CHAR_WIDTH * style.size / 14.0;
            left + ((width - text_width) / 2.0).max(0.0)
        } else {
            left
        };
        canvas.draw_text(text, Point::new(x, y), style);
    }
}

impl Widget for Showcase {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = constraints.max_width.min(PAGE_WIDTH);
        let height = self
            .sections
            .iter()
            .fold(TITLE_HEIGHT + SUBTITLE_HEIGHT, |h, s| h + BLOCK_GAP + s.height(width));
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.arrange();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let title = TextStyle {
            size: 30.0,
            color: self.text_color,
            weight: FontWeight::Semibold,
        };
        self.paint_text(canvas, TITLE, self.bounds.y, &title, true);
        let subtitle = TextStyle {
            color: self.muted_color,
            ..Default::default()
        };
        self.paint_text(canvas, SUBTITLE, self.bounds.y + TITLE_HEIGHT, &subtitle, true);

        let heading = TextStyle {
            size: 20.0,
            color: self.text_color,
            weight: FontWeight::Semibold,
        };
        let note = TextStyle {
            size: 12.0,
            color: self.note_color,
            ..Default::default()
        };
        let echo = TextStyle {
            color: self.text_color,
            ..Default::default()
        };

        let open = self.open_index();
        for (i, section) in self.sections.iter().enumerate() {
            if let Some(text) = section.heading {
                self.paint_text(canvas, text, section.heading_y, &heading, false);
            }
            if let Some(text) = section.note {
                self.paint_text(canvas, text, section.note_y, &note, false);
            }
            if open != Some(i) {
                section.select.paint(canvas);
            }
            if let (true, Some(value)) = (section.echo, &section.value) {
                let mut x = section.select.bounds().x;
                if section.swatch {
                    if let Some(color) = swatch_color(value) {
                        let center =
                            Point::new(x + SWATCH_RADIUS, section.echo_y + ECHO_HEIGHT / 2.0);
                        canvas.fill_circle(center, SWATCH_RADIUS, color);
                        x += SWATCH_RADIUS * 2.0 + 8.0;
                    }
                }
                let text = format!("You selected: {value}");
                canvas.draw_text(&text, Point::new(x, section.echo_y + 2.0), &echo);
            }
        }

        // Painted last so the popover covers later sections.
        if let Some(i) = open {
            self.sections[i].select.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let routed = match event {
            Event::FocusIn => {
                let i = self.focused.unwrap_or(0);
                self.focused = Some(i);
                self.sections[i].select.event(event).map(|m| (i, m))
            }
            Event::FocusOut => {
                self.focused = None;
                let mut result = None;
                for (i, section) in self.sections.iter_mut().enumerate() {
                    if let Some(msg) = section.select.event(event) {
                        result = result.or(Some((i, msg)));
                    }
                }
                result
            }
            Event::KeyDown { key } | Event::KeyUp { key } => self.route_key(event, *key),
            _ => match event.position() {
                Some(position) => self.route_pointer(event, position),
                None => None,
            },
        };

        routed.map(|(i, msg)| self.record(i, msg))
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }

    fn consumes_key(&self, key: Key) -> bool {
        self.focused
            .is_some_and(|i| self.sections[i].select.consumes_key(key))
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(TITLE)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Group
    }

    fn accessible_node(&self) -> AccessibleNode {
        let mut node = AccessibleNode::new(AccessibleRole::Group).with_name(TITLE);
        for section in &self.sections {
            if let Some(heading) = section.heading {
                node.children
                    .push(AccessibleNode::new(AccessibleRole::Text).with_name(heading));
            }
            node.children.push(section.select.accessible_node());
        }
        node
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_core::{MouseButton, RecordingCanvas};
    use picklist_widgets::DropdownToggled;

    fn laid_out() -> Showcase {
        let mut page = Showcase::new();
        let size = page.measure(Constraints::loose(Size::new(1280.0, 2000.0)));
        page.layout(Rect::new(0.0, 0.0, size.width, size.height));
        page
    }

    fn click(page: &mut Showcase, position: Point) -> Option<Box<dyn Any + Send>> {
        page.event(&Event::MouseMove { position });
        let msg = page.event(&Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        page.event(&Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        msg
    }

    fn trigger(page: &Showcase, section: ShowcaseSection) -> Point {
        page.select(section).trigger_rect().center()
    }

    // =========================================================================
    // Layout Tests - TESTS FIRST
    // =========================================================================

    #[test]
    fn test_sections_are_stacked_in_order() {
        let page = laid_out();
        let ys: Vec<f32> = ShowcaseSection::ALL
            .iter()
            .map(|&s| page.select(s).bounds().y)
            .collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_section_widths() {
        let page = laid_out();
        assert_eq!(page.select(ShowcaseSection::Timezone).bounds().width, 448.0);
        assert_eq!(page.select(ShowcaseSection::Fruit).bounds().width, 320.0);
    }

    #[test]
    fn test_measure_grows_with_echo_line() {
        let mut page = Showcase::new();
        let constraints = Constraints::loose(Size::new(1280.0, 4000.0));
        let before = page.measure(constraints).height;
        page.set_value(ShowcaseSection::Fruit, Some("apple"));
        let after = page.measure(constraints).height;
        assert_eq!(after - before, ECHO_GAP + ECHO_HEIGHT);
    }

    // =========================================================================
    // Routing Tests
    // =========================================================================

    #[test]
    fn test_commit_is_stored_and_pushed_back() {
        let mut page = laid_out();
        let at = trigger(&page, ShowcaseSection::Fruit);
        let open = click(&mut page, at).unwrap();
        assert_eq!(open.downcast_ref::<DropdownToggled>(), Some(&DropdownToggled { open: true }));
        assert_eq!(page.open_section(), Some(ShowcaseSection::Fruit));

        let row = page.select(ShowcaseSection::Fruit).row_rect(1).unwrap().center();
        let msg = click(&mut page, row).unwrap();
        assert_eq!(msg.downcast_ref::<SelectionChanged>().unwrap().value, "banana");
        assert_eq!(page.value(ShowcaseSection::Fruit), Some("banana"));
        assert_eq!(
            page.select(ShowcaseSection::Fruit).selected_value(),
            Some("banana")
        );
        assert_eq!(
            page.echo_text(ShowcaseSection::Fruit).as_deref(),
            Some("You selected: banana")
        );
    }

    #[test]
    fn test_clearing_value_resets_select_to_placeholder() {
        let mut page = laid_out();
        page.set_value(ShowcaseSection::Fruit, Some("apple"));
        assert_eq!(page.select(ShowcaseSection::Fruit).display_text(), "Apple");

        page.set_value(ShowcaseSection::Fruit, None);
        assert_eq!(page.value(ShowcaseSection::Fruit), None);
        assert_eq!(page.echo_text(ShowcaseSection::Fruit), None);
        let select = page.select(ShowcaseSection::Fruit);
        assert_eq!(select.selected_value(), None);
        assert_eq!(select.display_text(), "Select a fruit");
    }

    #[test]
    fn test_open_popover_covers_next_trigger() {
        let mut page = laid_out();
        let at = trigger(&page, ShowcaseSection::Fruit);
        click(&mut page, at);

        let popover = page.select(ShowcaseSection::Fruit).popover_rect().unwrap();
        let timezone = page.select(ShowcaseSection::Timezone).trigger_rect();
        let point = Point::new(popover.x + 10.0, timezone.center().y);
        assert!(popover.contains_point(&point));
        assert!(timezone.contains_point(&point));

        // Row 3 of the fruit popover lies over the timezone trigger.
        click(&mut page, point);
        assert!(!page.select(ShowcaseSection::Timezone).is_open());
        assert_eq!(page.value(ShowcaseSection::Fruit), Some("grapes"));
    }

    #[test]
    fn test_opening_one_closes_another() {
        let mut page = laid_out();
        let at = trigger(&page, ShowcaseSection::Color);
        click(&mut page, at);
        assert_eq!(page.open_section(), Some(ShowcaseSection::Color));

        let at = trigger(&page, ShowcaseSection::Fruit);
        click(&mut page, at);
        assert_eq!(page.open_section(), Some(ShowcaseSection::Fruit));
        assert_eq!(page.focused_section(), Some(ShowcaseSection::Fruit));
    }

    #[test]
    fn test_keys_go_to_focused_select() {
        let mut page = laid_out();
        page.event(&Event::FocusIn);
        assert_eq!(page.focused_section(), Some(ShowcaseSection::Fruit));
        assert!(page.consumes_key(Key::Down));

        page.event(&Event::KeyDown { key: Key::Down });
        page.event(&Event::KeyDown { key: Key::Down });
        page.event(&Event::KeyDown { key: Key::Enter });
        assert_eq!(page.value(ShowcaseSection::Fruit), Some("banana"));
        assert_eq!(page.value(ShowcaseSection::Timezone), None);
    }

    #[test]
    fn test_tab_moves_focus_and_closes() {
        let mut page = laid_out();
        page.event(&Event::FocusIn);
        page.event(&Event::KeyDown { key: Key::Down });
        assert_eq!(page.open_section(), Some(ShowcaseSection::Fruit));
        assert!(!page.consumes_key(Key::Tab));

        page.event(&Event::KeyDown { key: Key::Tab });
        assert_eq!(page.open_section(), None);
        assert_eq!(page.focused_section(), Some(ShowcaseSection::Timezone));
        assert!(page.select(ShowcaseSection::Timezone).is_focused());
        assert!(!page.select(ShowcaseSection::Fruit).is_focused());
    }

    #[test]
    fn test_focus_out_closes_everything() {
        let mut page = laid_out();
        let at = trigger(&page, ShowcaseSection::Timezone);
        click(&mut page, at);
        let msg = page.event(&Event::FocusOut).unwrap();
        assert_eq!(msg.downcast_ref::<DropdownToggled>(), Some(&DropdownToggled { open: false }));
        assert_eq!(page.open_section(), None);
        assert_eq!(page.focused_section(), None);
    }

    // =========================================================================
    // Paint Tests
    // =========================================================================

    #[test]
    fn test_paints_page_text() {
        let page = laid_out();
        let mut canvas = RecordingCanvas::new();
        page.paint(&mut canvas);
        assert!(canvas.has_text(TITLE));
        assert!(canvas.has_text(SUBTITLE));
        assert!(canvas.has_text("Basic Select"));
        assert!(canvas.has_text("Scrollable Select"));
        assert!(canvas.has_text("Select with Descriptions"));
        assert!(canvas.has_text(API_DEMO_NOTE));
        assert!(canvas.has_text("Choose a color"));
        assert!(!canvas.texts().iter().any(|t| t.starts_with("You selected")));
    }

    #[test]
    fn test_color_swatch_painted() {
        let mut page = laid_out();
        page.set_value(ShowcaseSection::Color, Some("purple"));
        let mut canvas = RecordingCanvas::new();
        page.paint(&mut canvas);
        assert!(canvas.has_text("You selected: purple"));
        let circles = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, picklist_core::DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 1);
    }

    #[test]
    fn test_api_demo_never_echoes() {
        let mut page = laid_out();
        page.set_value(ShowcaseSection::ApiDemo, Some("apple"));
        assert_eq!(page.echo_text(ShowcaseSection::ApiDemo), None);
        assert_eq!(
            page.select(ShowcaseSection::ApiDemo).display_text(),
            "Apple"
        );
    }

    #[test]
    fn test_swatch_color_names() {
        assert_eq!(swatch_color("red"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(swatch_color("#00ff00"), Some(Color::rgb(0.0, 1.0, 0.0)));
        assert_eq!(swatch_color("mauve"), None);
    }

    #[test]
    fn test_accessible_tree_lists_every_select() {
        let page = laid_out();
        let tree = page.accessible_node();
        assert_eq!(tree.find_all(AccessibleRole::ComboBox).len(), 4);
        assert!(tree.find_by_id("timezone").is_some());
    }
}
