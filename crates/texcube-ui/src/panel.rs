//! Parameter panel: a column of labelled controls, each bound to an
//! [`Adapter`].
//!
//! Controls are registered once; [`Panel::build`] turns them into a fresh
//! widget tree every frame, reading every bound value as it goes. Writes from
//! a control go straight through the adapter and then to the control's
//! `on_change` callback.
//!
//! ```rust,ignore
//! let mut panel = Panel::new();
//! panel.add(Property::new(t.clone(), "repeat.x", get, set), 0.0, 5.0).step(0.01);
//! panel
//!     .add_options(StringToNumber::new(wrap), &[("Repeat", 1000.0), ("Clamp", 1001.0)])
//!     .name("texture.wrapS")
//!     .on_change(move |_| texture.borrow_mut().mark_needs_update());
//! ```

use std::rc::Rc;

use log::debug;
use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::paint::Color;
use texcube_engine::text::FontId;

use crate::adapter::Adapter;
use crate::constraints::{Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};
use crate::widgets::container::Container;
use crate::widgets::flex::Column;
use crate::widgets::option_menu::OptionMenu;
use crate::widgets::slider::{constrain_value, Slider};
use crate::widgets::text::Text;

type NumberBinding = Rc<dyn Adapter<Input = f64, Output = f64>>;
type TextBinding = Rc<dyn Adapter<Input = String, Output = f64>>;
type ChangeFn = Rc<dyn Fn(f64)>;

const ROW_HEIGHT: f32 = 26.0;
const ACCENT_WIDTH: f32 = 3.0;
const VALUE_WIDTH: f32 = 52.0;
const FONT_SIZE: f32 = 11.0;

#[derive(Clone)]
enum Binding {
    Number { adapter: NumberBinding, min: f64, max: f64, step: Option<f64> },
    Options { adapter: TextBinding, choices: Vec<(String, f64)> },
}

/// One registered control. Builder methods chain off [`Panel::add`] and
/// [`Panel::add_options`].
#[derive(Clone)]
pub struct Controller {
    name: String,
    binding: Binding,
    on_change: Option<ChangeFn>,
}

impl Controller {
    /// Replaces the displayed label (the adapter's label by default).
    pub fn name(&mut self, label: impl Into<String>) -> &mut Self {
        self.name = label.into();
        self
    }

    /// Snaps slider input to multiples of `step`. Has no effect on option
    /// controls.
    pub fn step(&mut self, step: f64) -> &mut Self {
        if let Binding::Number { step: s, .. } = &mut self.binding {
            *s = Some(step);
        }
        self
    }

    /// Runs after every write made through this control, with the value read
    /// back from the target.
    pub fn on_change(&mut self, f: impl Fn(f64) + 'static) -> &mut Self {
        self.on_change = Some(Rc::new(f));
        self
    }

    pub fn label(&self) -> &str {
        &self.name
    }

    /// Current value of the bound field.
    pub fn read(&self) -> f64 {
        match &self.binding {
            Binding::Number { adapter, .. } => adapter.read(),
            Binding::Options { adapter, .. } => adapter.read(),
        }
    }

    /// Slider input: clamps to the range, snaps to the step and writes.
    pub fn set_number(&self, raw: f64) {
        let Binding::Number { adapter, min, max, step } = &self.binding else {
            debug!("{}: numeric input on an option control ignored", self.name);
            return;
        };
        adapter.write(constrain_value(raw, *min, *max, *step));
        self.changed();
    }

    /// Option input: writes the code of choice `index` as text.
    pub fn select(&self, index: usize) {
        let Binding::Options { adapter, choices } = &self.binding else {
            debug!("{}: option input on a numeric control ignored", self.name);
            return;
        };
        let Some((_, code)) = choices.get(index) else {
            debug!("{}: no option {index}", self.name);
            return;
        };
        adapter.write(code.to_string());
        self.changed();
    }

    /// Index of the choice whose code equals the current value.
    pub fn selected_index(&self) -> Option<usize> {
        let Binding::Options { adapter, choices } = &self.binding else {
            return None;
        };
        let current = adapter.read();
        choices.iter().position(|(_, code)| *code == current)
    }

    fn changed(&self) {
        if let Some(f) = &self.on_change {
            f(self.read());
        }
    }

    fn control(&self, font: Option<FontId>) -> (Element, Option<String>) {
        match &self.binding {
            Binding::Number { min, max, step, .. } => {
                let value = self.read();
                let mut slider = Slider::new(*min, *max).value(value);
                if let Some(s) = step {
                    slider = slider.step(*s);
                }
                let ctl = self.clone();
                let slider = slider.on_input(move |v| ctl.set_number(v));
                (slider.into(), Some(format_number(value, *step)))
            }
            Binding::Options { choices, .. } => {
                let ctl = self.clone();
                let menu = OptionMenu::new(choices.iter().map(|(label, _)| label.clone()))
                    .selected(self.selected_index())
                    .font(font)
                    .on_select(move |i| ctl.select(i));
                (menu.into(), None)
            }
        }
    }

    fn accent(&self) -> Color {
        match self.binding {
            Binding::Number { .. } => Color::from_srgb_u8(0x2f, 0xa1, 0xd6, 0xff),
            Binding::Options { .. } => Color::from_srgb_u8(0x80, 0x6e, 0xd6, 0xff),
        }
    }
}

/// Value text shown next to a slider, with as many decimals as the step has.
pub fn format_number(value: f64, step: Option<f64>) -> String {
    let decimals = match step {
        Some(s) if s > 0.0 => (0..10)
            .find(|&d| {
                let scaled = s * 10f64.powi(d);
                (scaled - scaled.round()).abs() < 1e-9
            })
            .unwrap_or(10) as usize,
        _ => 2,
    };
    format!("{value:.decimals$}")
}

/// The registered controls plus how to draw them.
pub struct Panel {
    controllers: Vec<Controller>,
    font: Option<FontId>,
    width: f32,
    label_width: f32,
}

impl Panel {
    pub fn new() -> Self {
        Self { controllers: Vec::new(), font: None, width: 300.0, label_width: 120.0 }
    }

    /// Font for labels and values. Without one, controls draw unlabelled.
    pub fn set_font(&mut self, font: Option<FontId>) {
        self.font = font;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Numeric slider over `[min, max]`.
    pub fn add<A>(&mut self, adapter: A, min: f64, max: f64) -> &mut Controller
    where
        A: Adapter<Input = f64, Output = f64> + 'static,
    {
        let name = adapter.label().to_string();
        self.push(Controller {
            name,
            binding: Binding::Number { adapter: Rc::new(adapter), min, max, step: None },
            on_change: None,
        })
    }

    /// Fixed-choice menu. Each choice is `(label, code)`; picking one writes
    /// the code through the adapter as text.
    pub fn add_options<A>(&mut self, adapter: A, choices: &[(&str, f64)]) -> &mut Controller
    where
        A: Adapter<Input = String, Output = f64> + 'static,
    {
        let name = adapter.label().to_string();
        let choices = choices.iter().map(|(l, c)| ((*l).to_string(), *c)).collect();
        self.push(Controller {
            name,
            binding: Binding::Options { adapter: Rc::new(adapter), choices },
            on_change: None,
        })
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Widget tree for this frame, reflecting the current bound values.
    pub fn build(&self) -> Element {
        let rows = self.controllers.iter().map(|c| {
            let (control, value) = c.control(self.font);
            PropertyRow {
                label: self.font.map(|f| Text::new(c.label(), f, FONT_SIZE, label_color())),
                value: value.and_then(|v| self.font.map(|f| Text::new(v, f, FONT_SIZE, value_color()))),
                control,
                accent: c.accent(),
                label_width: self.label_width,
            }
        });

        Container::new()
            .width(self.width)
            .background(Color::from_srgb_u8(0x00, 0x00, 0x00, 0xff))
            .padding(Edges::all(1.0))
            .child(Column::new().spacing(1.0).children(rows))
            .into()
    }

    fn push(&mut self, c: Controller) -> &mut Controller {
        let i = self.controllers.len();
        self.controllers.push(c);
        &mut self.controllers[i]
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

fn label_color() -> Color {
    Color::from_srgb_u8(0xee, 0xee, 0xee, 0xff)
}

fn value_color() -> Color {
    Color::from_srgb_u8(0x2f, 0xa1, 0xd6, 0xff)
}

/// `| accent | label | control | value |`, one per controller.
struct PropertyRow {
    label: Option<Text>,
    control: Element,
    value: Option<Text>,
    accent: Color,
    label_width: f32,
}

struct RowAreas {
    accent: Rect,
    label: Rect,
    control: Rect,
    value: Option<Rect>,
}

impl PropertyRow {
    fn areas(&self, rect: Rect) -> RowAreas {
        let (accent, rest) = rect.split_left(ACCENT_WIDTH);
        let (label, rest) = rest.split_left(self.label_width);
        let (control, value) = if self.value.is_some() {
            let (c, v) = rest.split_left(rest.size.x - VALUE_WIDTH);
            (c, Some(v))
        } else {
            (rest, None)
        };
        RowAreas {
            accent,
            label: Rect::new(label.origin.x + 6.0, label.origin.y, (label.size.x - 6.0).max(0.0), label.size.y),
            control: Rect::new(
                control.origin.x,
                control.origin.y + 4.0,
                (control.size.x - 4.0).max(0.0),
                (control.size.y - 8.0).max(0.0),
            ),
            value: value.map(|v| Rect::new(v.origin.x + 4.0, v.origin.y, v.size.x - 4.0, v.size.y)),
        }
    }
}

impl Widget for PropertyRow {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let w = if constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            ACCENT_WIDTH + self.label_width + 160.0 + VALUE_WIDTH
        };
        constraints.constrain(Vec2::new(w, ROW_HEIGHT))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let areas = self.areas(rect);
        painter.fill_rect(rect, Color::from_srgb_u8(0x1a, 0x1a, 0x1a, 0xff));
        painter.fill_rect(areas.accent, self.accent);
        if let Some(label) = &self.label {
            label.paint(painter, areas.label);
        }
        self.control.paint(painter, areas.control);
        if let (Some(value), Some(r)) = (&self.value, areas.value) {
            value.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let areas = self.areas(rect);
        self.control.on_event(event, areas.control, ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::adapter::{DegRad, Property, StringToNumber};
    use crate::scene::{UiInput, UiScene};

    #[derive(Default)]
    struct Params {
        wrap: f64,
        repeat: f64,
        rotation: f64,
    }

    fn params() -> Rc<RefCell<Params>> {
        Rc::new(RefCell::new(Params { wrap: 1001.0, repeat: 1.0, rotation: 0.0 }))
    }

    fn wrap(p: &Rc<RefCell<Params>>) -> StringToNumber<Params> {
        StringToNumber::new(Property::new(p.clone(), "wrap", |p| p.wrap, |p, v| p.wrap = v))
    }

    fn repeat(p: &Rc<RefCell<Params>>) -> Property<Params> {
        Property::new(p.clone(), "repeat", |p| p.repeat, |p, v| p.repeat = v)
    }

    const WRAPS: [(&str, f64); 3] = [("Repeat", 1000.0), ("Clamp", 1001.0), ("Mirror", 1002.0)];

    /// Records the raw text it is handed.
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Adapter for Recorder {
        type Input = String;
        type Output = f64;
        fn label(&self) -> &str {
            "rec"
        }
        fn read(&self) -> f64 {
            0.0
        }
        fn write(&self, value: String) {
            self.0.borrow_mut().push(value);
        }
    }

    #[test]
    fn option_select_writes_code_text_and_notifies() {
        let p = params();
        let fired = Rc::new(Cell::new(0));
        let sink = fired.clone();
        let mut panel = Panel::new();
        panel.add_options(wrap(&p), &WRAPS).on_change(move |_| sink.set(sink.get() + 1));

        panel.controllers()[0].select(2);
        assert_eq!(p.borrow().wrap, 1002.0);
        assert_eq!(fired.get(), 1);
        assert_eq!(panel.controllers()[0].selected_index(), Some(2));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut panel = Panel::new();
        panel.add_options(Recorder(seen.clone()), &WRAPS);
        panel.controllers()[0].select(0);
        assert_eq!(*seen.borrow(), vec!["1000".to_string()]);
    }

    #[test]
    fn unknown_code_selects_nothing() {
        let p = params();
        p.borrow_mut().wrap = f64::NAN;
        let mut panel = Panel::new();
        panel.add_options(wrap(&p), &WRAPS);
        assert_eq!(panel.controllers()[0].selected_index(), None);
    }

    #[test]
    fn slider_input_clamps_and_snaps() {
        let p = params();
        let mut panel = Panel::new();
        panel.add(repeat(&p), 0.0, 5.0).step(0.01);
        let c = &panel.controllers()[0];

        c.set_number(7.3);
        assert_eq!(p.borrow().repeat, 5.0);
        c.set_number(1.2345);
        assert!((p.borrow().repeat - 1.23).abs() < 1e-9);
        c.set_number(-1.0);
        assert_eq!(p.borrow().repeat, 0.0);
    }

    #[test]
    fn code_writes_are_shown_unclamped() {
        let p = params();
        let mut panel = Panel::new();
        panel.add(repeat(&p), 0.0, 5.0).step(0.01);
        p.borrow_mut().repeat = 12.0;
        assert_eq!(panel.controllers()[0].read(), 12.0);
        assert_eq!(format_number(12.0, Some(0.01)), "12.00");
    }

    #[test]
    fn labels_default_to_the_adapter() {
        let p = params();
        let mut panel = Panel::new();
        panel.add(repeat(&p), 0.0, 5.0);
        let rotation = Property::new(p.clone(), "rotation", |p| p.rotation, |p, v| p.rotation = v);
        panel.add(DegRad::new(rotation), -360.0, 360.0).name("texture.rotation");
        assert_eq!(panel.controllers()[0].label(), "repeat");
        assert_eq!(panel.controllers()[1].label(), "texture.rotation");
    }

    #[test]
    fn number_format_follows_step() {
        assert_eq!(format_number(1.0, Some(0.01)), "1.00");
        assert_eq!(format_number(2.5, Some(0.1)), "2.5");
        assert_eq!(format_number(3.0, Some(1.0)), "3");
        assert_eq!(format_number(-45.0, None), "-45.00");
        assert_eq!(format_number(f64::NAN, Some(0.01)), "NaN");
    }

    #[test]
    fn clicking_a_built_option_writes_through() {
        let p = params();
        let fired = Rc::new(Cell::new(0.0));
        let sink = fired.clone();
        let mut panel = Panel::new();
        panel.add_options(wrap(&p), &WRAPS).on_change(move |v| sink.set(v));

        let mut scene = UiScene::new();
        let bounds = Rect::new(0.0, 0.0, panel.width(), 400.0);
        // Near the right edge of the only row: inside the last segment.
        let at = Some(Vec2::new(panel.width() - 8.0, 1.0 + ROW_HEIGHT * 0.5));

        let _ = scene.frame(panel.build(), bounds, &UiInput { pointer: at, pressed: true, held: true, released: false });
        let list = scene.frame(panel.build(), bounds, &UiInput { pointer: at, pressed: false, held: false, released: true });
        assert!(!list.is_empty());

        assert_eq!(p.borrow().wrap, 1002.0);
        assert_eq!(fired.get(), 1002.0);
    }

    #[test]
    fn dragging_a_built_slider_writes_through() {
        let p = params();
        let mut panel = Panel::new();
        panel.add(repeat(&p), 0.0, 5.0).step(0.01);

        let mut scene = UiScene::new();
        let bounds = Rect::new(0.0, 0.0, panel.width(), 400.0);
        // Left end of the slider track, just past the label column.
        let x = 1.0 + ACCENT_WIDTH + panel.label_width + 0.5;
        let at = Some(Vec2::new(x, 1.0 + ROW_HEIGHT * 0.5));
        let _ = scene.frame(panel.build(), bounds, &UiInput { pointer: at, pressed: true, held: true, released: false });

        assert!(p.borrow().repeat < 0.05);
    }
}
