use alloc::{rc::Rc, string::String, vec, vec::Vec};
use core::{cell::Cell, convert::Infallible};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, ErrorKind, ErrorType, InputPin},
};

use super::*;
use crate::{
    config::MenuConfig,
    input::{Encoder, mock::ScriptedEncoder},
    item::{IntegerSpec, MenuContext, SubMenuItem},
    render::{Scene, Slot},
};

const METRICS: SurfaceMetrics = SurfaceMetrics::new(128, 64, 6, 10);
/// Three rows per page.
const SHORT: SurfaceMetrics = SurfaceMetrics::new(128, 30, 6, 10);

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Show { page: usize },
    Hide,
    Repaint(Slot),
    SwitchPage { page: usize },
}

struct RecordingSurface {
    metrics: SurfaceMetrics,
    events: Vec<Event>,
}

impl RecordingSurface {
    fn new(metrics: SurfaceMetrics) -> Self {
        Self {
            metrics,
            events: Vec::new(),
        }
    }

    fn count(&self, wanted: fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|event| wanted(event)).count()
    }
}

impl MenuSurface for RecordingSurface {
    fn metrics(&self) -> SurfaceMetrics {
        self.metrics
    }

    fn show(&mut self, scene: &Scene) {
        self.events.push(Event::Show {
            page: scene.showing_page(),
        });
    }

    fn hide(&mut self) {
        self.events.push(Event::Hide);
    }

    fn repaint(&mut self, _scene: &Scene, slot: Slot) {
        self.events.push(Event::Repaint(slot));
    }

    fn switch_page(&mut self, scene: &Scene) {
        self.events.push(Event::SwitchPage {
            page: scene.showing_page(),
        });
    }
}

/// Active-low button replaying one "pressed" sample per poll.
struct ScriptedButton<'a> {
    presses: &'a [bool],
    cursor: usize,
}

impl<'a> ScriptedButton<'a> {
    const fn new(presses: &'a [bool]) -> Self {
        Self { presses, cursor: 0 }
    }
}

impl ErrorType for ScriptedButton<'_> {
    type Error = Infallible;
}

impl InputPin for ScriptedButton<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let Some(pressed) = self.presses.get(self.cursor).copied() else {
            panic!("button script exhausted after {} polls", self.cursor);
        };
        self.cursor += 1;
        Ok(!pressed)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Default)]
struct RecordingDelay {
    waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

#[derive(Clone, Copy)]
enum Step {
    Turn(i32),
    Press,
}

/// One loop iteration per step: an encoder delta and a button sample.
fn script(steps: &[Step]) -> (Vec<i32>, Vec<bool>) {
    steps
        .iter()
        .map(|step| match *step {
            Step::Turn(delta) => (delta, false),
            Step::Press => (0, true),
        })
        .unzip()
}

type TestDevices<'a> =
    Devices<RecordingSurface, ScriptedEncoder<'a>, ScriptedButton<'a>, RecordingDelay>;

fn devices<'a>(deltas: &'a [i32], presses: &'a [bool], metrics: SurfaceMetrics) -> TestDevices<'a> {
    Devices::new(
        RecordingSurface::new(metrics),
        ScriptedEncoder::new(deltas),
        ScriptedButton::new(presses),
        RecordingDelay::default(),
        MenuConfig::default(),
    )
}

fn toggles(labels: &[&str]) -> Vec<MenuItem> {
    labels
        .iter()
        .map(|label| MenuItem::toggle(*label, false))
        .collect()
}

#[test]
fn edit_then_exit_end_to_end() {
    use Step::*;

    let items = vec![
        MenuItem::title("Demo"),
        MenuItem::integer("N", IntegerSpec::new(5).with_bounds(0, 10)).unwrap(),
        MenuItem::exit("Exit"),
    ];
    let (deltas, presses) = script(&[Press, Turn(1), Press, Turn(1), Press]);
    let mut navigator = Navigator::new(items, devices(&deltas, &presses, METRICS)).unwrap();
    assert_eq!(navigator.menu().selected(), 1);

    let (outcome, record) = navigator.run_collect().unwrap();

    assert_eq!(outcome, Outcome::Exit(Value::None));
    assert_eq!(record.get("N"), Some(&Value::Int(6)));
    assert_eq!(record.get("Exit"), Some(&Value::Bool(true)));
    assert!(!record.contains_key("Demo"));

    let devices = navigator.devices();
    assert!(devices.encoder().is_exhausted());
    assert_eq!(
        devices.surface().events,
        [
            Event::Show { page: 0 },
            Event::Repaint(Slot::Label(1)),
            Event::Repaint(Slot::Value(1)),
            Event::Repaint(Slot::Value(1)),
            Event::Repaint(Slot::Label(1)),
            Event::Repaint(Slot::Value(1)),
            Event::Repaint(Slot::Label(1)),
            Event::Repaint(Slot::Label(2)),
            Event::Hide,
        ]
    );
    assert_eq!(devices.delay().waits_ms, [250, 250, 250]);
}

#[test]
fn forward_moves_never_rest_on_titles() {
    let items = vec![
        MenuItem::title("Top"),
        MenuItem::toggle("A", false),
        MenuItem::title("Mid"),
        MenuItem::toggle("B", false),
        MenuItem::title("End"),
    ];
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut surface = RecordingSurface::new(METRICS);

    let mut visited = Vec::new();
    for _ in 0..6 {
        menu.rotate(1, &mut surface);
        assert!(menu.selected_item().is_selectable());
        visited.push(menu.selected());
    }
    assert_eq!(visited, [3, 1, 3, 1, 3, 1]);

    menu.rotate(-1, &mut surface);
    assert_eq!(menu.selected(), 3);
}

#[test]
fn moving_past_the_last_item_wraps_over_leading_titles() {
    let mut items = vec![MenuItem::title("Head")];
    items.extend(toggles(&["A", "B", "C"]));
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut surface = RecordingSurface::new(METRICS);

    menu.rotate(2, &mut surface);
    assert_eq!(menu.selected(), 3);
    menu.rotate(1, &mut surface);
    assert_eq!(menu.selected(), 1);
}

#[test]
fn moving_within_a_page_repaints_exactly_two_labels() {
    let mut menu = Menu::new(toggles(&["A", "B", "C"]), METRICS).unwrap();
    let mut surface = RecordingSurface::new(METRICS);

    menu.rotate(1, &mut surface);

    assert_eq!(
        surface.events,
        [Event::Repaint(Slot::Label(0)), Event::Repaint(Slot::Label(1))]
    );
    let rows = menu.scene().rows();
    assert!(!rows[0].label().is_highlighted());
    assert!(rows[1].label().is_highlighted());
    assert!(!rows[2].label().is_highlighted());
    assert_eq!(menu.mode(), Mode::Browsing);
}

#[test]
fn crossing_a_page_boundary_switches_page() {
    let mut menu = Menu::new(toggles(&["A", "B", "C", "D", "E"]), SHORT).unwrap();
    let mut surface = RecordingSurface::new(SHORT);
    assert_eq!(menu.lines(), 3);
    assert_eq!(menu.scene().page_label().text(), "[1/2]");

    menu.rotate(2, &mut surface);
    assert_eq!(menu.page(), 0);
    menu.rotate(1, &mut surface);
    assert_eq!(menu.page(), 1);
    assert_eq!(menu.scene().page_label().text(), "[2/2]");
    assert_eq!(surface.events.last(), Some(&Event::SwitchPage { page: 1 }));

    surface.events.clear();
    menu.rotate(1, &mut surface);
    assert_eq!(
        surface.events,
        [Event::Repaint(Slot::Label(3)), Event::Repaint(Slot::Label(4))]
    );

    menu.rotate(1, &mut surface);
    assert_eq!(menu.selected(), 0);
    assert_eq!(surface.events.last(), Some(&Event::SwitchPage { page: 0 }));
}

#[test]
fn initial_page_holds_the_first_selectable_item() {
    let items = vec![
        MenuItem::title("One"),
        MenuItem::title("Two"),
        MenuItem::title("Three"),
        MenuItem::toggle("Four", true),
    ];
    let menu = Menu::new(items, SHORT).unwrap();

    assert_eq!(menu.selected(), 3);
    assert_eq!(menu.page(), 1);
    assert!(menu.scene().rows()[3].label().is_highlighted());
}

#[test]
fn activation_swaps_highlight_between_label_and_value() {
    let items = vec![MenuItem::integer("N", IntegerSpec::new(5)).unwrap()];
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut devices = devices(&[], &[], METRICS);

    assert_eq!(menu.press(&mut devices), None);
    assert_eq!(menu.mode(), Mode::Editing);
    let row = &menu.scene().rows()[0];
    assert!(!row.label().is_highlighted());
    assert!(row.value().is_some_and(|value| value.is_highlighted()));
    assert_eq!(
        devices.surface().events,
        [Event::Repaint(Slot::Label(0)), Event::Repaint(Slot::Value(0))]
    );

    devices.surface_mut().events.clear();
    menu.rotate(3, devices.surface_mut());
    assert_eq!(devices.surface().events, [Event::Repaint(Slot::Value(0))]);
    assert_eq!(
        menu.scene().drawable(Slot::Value(0)).map(|label| label.text()),
        Some("8")
    );

    assert_eq!(menu.press(&mut devices), None);
    assert_eq!(menu.mode(), Mode::Browsing);
    assert!(menu.scene().rows()[0].label().is_highlighted());
    assert_eq!(devices.delay().waits_ms.len(), 2);
}

#[test]
fn toggle_press_redraws_value_immediately() {
    let mut menu = Menu::new(toggles(&["Loud"]), METRICS).unwrap();
    let mut devices = devices(&[], &[], METRICS);

    assert_eq!(menu.press(&mut devices), None);

    assert_eq!(devices.surface().events, [Event::Repaint(Slot::Value(0))]);
    assert_eq!(
        menu.scene().drawable(Slot::Value(0)).map(|label| label.text()),
        Some("[x]")
    );
    assert_eq!(devices.delay().waits_ms, [250]);
}

#[test]
fn callback_reads_current_sibling_values() {
    let seen = Rc::new(Cell::new(None));
    let sink = Rc::clone(&seen);
    let items = vec![
        MenuItem::integer("N", IntegerSpec::new(5)).unwrap(),
        MenuItem::callback("Apply", move |ctx: &MenuContext| {
            sink.set(ctx.value("N").and_then(Value::as_int));
        }),
    ];
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut devices = devices(&[], &[], METRICS);

    menu.press(&mut devices);
    menu.rotate(2, devices.surface_mut());
    menu.press(&mut devices);
    menu.rotate(1, devices.surface_mut());
    assert_eq!(menu.selected(), 1);

    assert_eq!(menu.press(&mut devices), None);
    assert_eq!(seen.get(), Some(7));
    assert_eq!(menu.context().value("Apply"), None);
}

#[test]
#[should_panic(expected = "does not accept edit deltas")]
fn rotating_an_active_toggle_panics() {
    let mut menu = Menu::new(toggles(&["Loud"]), METRICS).unwrap();
    let mut surface = RecordingSurface::new(METRICS);
    menu.items[0].set_active(true);

    menu.rotate(1, &mut surface);
}

#[test]
#[should_panic(expected = "entered while active")]
fn entering_an_active_submenu_panics() {
    let items = vec![MenuItem::submenu("More", toggles(&["A"]))];
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut devices = devices(&[], &[], METRICS);
    menu.items[0].set_active(true);

    menu.press(&mut devices);
}

#[test]
#[should_panic(expected = "both active")]
fn second_active_item_panics() {
    let items = vec![
        MenuItem::integer("A", IntegerSpec::new(1)).unwrap(),
        MenuItem::integer("B", IntegerSpec::new(2)).unwrap(),
    ];
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut devices = devices(&[], &[], METRICS);
    let context = menu.context();
    menu.items[1].handle_press(&context);

    menu.press(&mut devices);
}

#[test]
fn back_from_submenu_resumes_parent_unchanged() {
    use Step::*;

    let items = vec![
        MenuItem::integer("N", IntegerSpec::new(1)).unwrap(),
        MenuItem::submenu("More", vec![MenuItem::toggle("Loud", false)]),
        MenuItem::exit("Exit"),
    ];
    let mut menu = Menu::new(items, METRICS).unwrap();
    let mut surface = RecordingSurface::new(METRICS);
    menu.rotate(1, &mut surface);
    assert_eq!(menu.selected(), 1);

    // Child: flip Loud, move to Back, press Back.
    let (deltas, presses) = script(&[Press, Turn(1), Press]);
    let mut devices = devices(&deltas, &presses, METRICS);

    assert_eq!(menu.press(&mut devices), None);

    assert_eq!(menu.selected(), 1);
    assert_eq!(menu.mode(), Mode::Browsing);
    assert!(menu.items().iter().all(|item| !item.is_active()));

    let events = &devices.surface().events;
    assert_eq!(events.first(), Some(&Event::Show { page: 0 }));
    assert_eq!(events.last(), Some(&Event::Show { page: 0 }));
    assert_eq!(devices.surface().count(|e| *e == Event::Hide), 0);

    let child = menu.items()[1].submenu_menu().unwrap();
    assert_eq!(child.depth(), 1);
    assert_eq!(child.items().last().map(MenuItem::label), Some("Back"));

    let record = menu.serialize().unwrap();
    let more = record.get("More").and_then(Value::as_record).unwrap();
    assert_eq!(more.get("Loud"), Some(&Value::Bool(true)));
    assert!(!more.contains_key("Back"));
}

#[test]
fn submenu_keeps_its_state_between_visits() {
    use Step::*;

    let items = vec![MenuItem::submenu(
        "More",
        vec![MenuItem::toggle("A", false), MenuItem::toggle("B", false)],
    )];
    let mut menu = Menu::new(items, METRICS).unwrap();

    let (deltas, presses) = script(&[Turn(1), Turn(1), Press]);
    let mut first = devices(&deltas, &presses, METRICS);
    assert_eq!(menu.press(&mut first), None);

    // The child cursor still rests on Back.
    let (deltas, presses) = script(&[Press]);
    let mut second = devices(&deltas, &presses, METRICS);
    assert_eq!(menu.press(&mut second), None);
    assert_eq!(menu.items()[0].submenu_menu().unwrap().selected(), 2);
}

#[test]
fn exit_inside_submenu_propagates_and_hides_once() {
    use Step::*;

    let items = vec![
        MenuItem::title("Main"),
        MenuItem::submenu("Print...", vec![MenuItem::exit_with("Done", 7)]),
        MenuItem::exit("Exit"),
    ];
    let (deltas, presses) = script(&[Press, Press]);
    let mut navigator = Navigator::new(items, devices(&deltas, &presses, METRICS)).unwrap();

    let outcome = navigator.run();

    assert_eq!(outcome.value(), Some(&Value::Int(7)));
    let surface = navigator.devices().surface();
    assert_eq!(surface.count(|e| *e == Event::Hide), 1);
    assert_eq!(surface.events.last(), Some(&Event::Hide));

    let record = navigator.serialize().unwrap();
    assert_eq!(record.get("Exit"), Some(&Value::Bool(false)));
    let nested = record.get("Print...").and_then(Value::as_record).unwrap();
    assert_eq!(nested.get("Done"), Some(&Value::Bool(true)));
}

#[test]
fn submenu_without_back_has_only_its_own_items() {
    let child = SubMenuItem::new(toggles(&["A"])).without_back();
    let menu = Menu::new(vec![MenuItem::submenu("More", child)], METRICS).unwrap();
    assert_eq!(menu.items()[0].submenu_menu().unwrap().items().len(), 1);

    let relabeled = SubMenuItem::new(toggles(&["A"])).with_back_label("Up");
    let menu = Menu::new(vec![MenuItem::submenu("More", relabeled)], METRICS).unwrap();
    let child = menu.items()[0].submenu_menu().unwrap();
    assert_eq!(child.items()[1].label(), "Up");
}

#[test]
fn top_level_back_is_returned() {
    let (deltas, presses) = script(&[Step::Press]);
    let mut navigator = Navigator::new(
        vec![MenuItem::back()],
        devices(&deltas, &presses, METRICS),
    )
    .unwrap();

    let outcome = navigator.run();
    assert!(outcome.is_back());
    assert_eq!(outcome.into_value(), None);
    assert_eq!(navigator.devices().surface().events.last(), Some(&Event::Hide));
}

#[test]
fn duplicate_labels_fail_serialization() {
    let items = vec![
        MenuItem::title("X"),
        MenuItem::toggle("X", true),
        MenuItem::toggle("X", false),
    ];
    let menu = Menu::new(items, METRICS).unwrap();

    assert_eq!(
        menu.serialize(),
        Err(SerializeError::DuplicateKey(String::from("X")))
    );
}

#[test]
fn construction_fails_fast() {
    assert_eq!(
        Menu::new(Vec::new(), METRICS).unwrap_err(),
        BuildError::EmptyMenu
    );
    assert_eq!(
        Menu::new(vec![MenuItem::title("Only")], METRICS).unwrap_err(),
        BuildError::NoSelectableItem
    );
    assert_eq!(
        Menu::new(toggles(&["A"]), SurfaceMetrics::new(128, 8, 6, 10)).unwrap_err(),
        BuildError::SurfaceTooSmall {
            height: 8,
            glyph_height: 10
        }
    );

    let empty_child = MenuItem::submenu("More", SubMenuItem::new(Vec::new()).without_back());
    assert_eq!(
        Menu::new(vec![empty_child], METRICS).unwrap_err(),
        BuildError::EmptyMenu
    );
}

struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl core::fmt::Debug for PinFault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PinFault")
    }
}

struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = PinFault;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

struct BrokenEncoder;

impl Encoder for BrokenEncoder {
    type Error = ();

    fn delta(&mut self) -> Result<i32, Self::Error> {
        Err(())
    }
}

#[test]
fn device_read_failures_read_as_idle() {
    let mut devices = Devices::new(
        RecordingSurface::new(METRICS),
        BrokenEncoder,
        BrokenPin,
        RecordingDelay::default(),
        MenuConfig::default(),
    );

    assert_eq!(devices.read_delta(), 0);
    assert!(!devices.button_pressed());
}

#[test]
fn pressed_level_is_configurable() {
    // ScriptedButton is active-low: a "released" sample reads high.
    let presses = [false];
    let mut devices = Devices::new(
        RecordingSurface::new(METRICS),
        ScriptedEncoder::new(&[]),
        ScriptedButton::new(&presses),
        RecordingDelay::default(),
        MenuConfig::default()
            .with_button_pressed_level(true)
            .with_debounce_ms(40),
    );

    assert!(devices.button_pressed());
    devices.debounce();
    assert_eq!(devices.delay().waits_ms, [40]);
}
