use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::paint::Color;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// Clamps `raw` into `[min, max]`, snapping to the nearest multiple of `step`
/// first when one is given.
pub fn constrain_value(raw: f64, min: f64, max: f64, step: Option<f64>) -> f64 {
    let snapped = match step {
        Some(s) if s > 0.0 => (raw / s).round() * s,
        _ => raw,
    };
    snapped.clamp(min, max)
}

/// Horizontal slider over an `f64` range.
///
/// The displayed value is whatever the slider was built with, even outside the
/// range; only the fill position clamps. Values produced by dragging are
/// clamped and snapped and passed to `on_input`.
///
/// ```rust,ignore
/// Slider::new(0.0, 5.0).step(0.01).value(1.0).on_input(|v| println!("{v}"))
/// ```
pub struct Slider {
    value: f64,
    min: f64,
    max: f64,
    step: Option<f64>,
    height: f32,
    track_color: Color,
    fill_color: Color,
    hover_color: Color,
    on_input: Option<Box<dyn FnMut(f64)>>,
}

impl Slider {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            value: min,
            min,
            max,
            step: None,
            height: 18.0,
            track_color: Color::from_srgb_u8(0x30, 0x30, 0x30, 0xff),
            fill_color: Color::from_srgb_u8(0x2f, 0xa1, 0xd6, 0xff),
            hover_color: Color::from_srgb_u8(0x44, 0xab, 0xda, 0xff),
            on_input: None,
        }
    }

    pub fn value(mut self, v: f64) -> Self {
        self.value = v;
        self
    }

    pub fn step(mut self, s: f64) -> Self {
        self.step = Some(s);
        self
    }

    pub fn on_input(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_input = Some(Box::new(f));
        self
    }

    /// Fill fraction in `[0, 1]`; NaN and empty ranges show as empty.
    fn normalized(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON || self.value.is_nan() {
            return 0.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0) as f32
    }

    fn value_at(&self, x: f32, rect: Rect) -> f64 {
        let t = if rect.size.x > 0.0 {
            ((x - rect.origin.x) / rect.size.x).clamp(0.0, 1.0) as f64
        } else {
            0.0
        };
        constrain_value(self.min + t * (self.max - self.min), self.min, self.max, self.step)
    }

    fn input(&mut self, v: f64) {
        if v == self.value {
            return;
        }
        self.value = v;
        if let Some(f) = &mut self.on_input {
            f(v);
        }
    }
}

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let w = if constraints.max.x.is_finite() { constraints.max.x } else { 160.0 };
        constraints.constrain(Vec2::new(w, self.height))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_rect(rect, self.track_color);
        let fill_w = rect.size.x * self.normalized();
        if fill_w > 0.0 {
            let color = if painter.is_hovered(rect) { self.hover_color } else { self.fill_color };
            painter.fill_rect(Rect::new(rect.origin.x, rect.origin.y, fill_w, rect.size.y), color);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        match *event {
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start } if rect.contains(start) => {
                let v = self.value_at(pos.x, rect);
                self.input(v);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use texcube_engine::text::FontSystem;

    #[test]
    fn constrain_clamps_then_snaps() {
        assert_eq!(constrain_value(7.0, 0.0, 5.0, Some(0.01)), 5.0);
        assert_eq!(constrain_value(-3.0, -2.0, 2.0, None), -2.0);
        assert!((constrain_value(1.2345, 0.0, 5.0, Some(0.01)) - 1.23).abs() < 1e-9);
        assert!((constrain_value(0.26, 0.0, 1.0, Some(0.25)) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn thumb_clamps_but_value_does_not() {
        let s = Slider::new(0.0, 5.0).value(9.0);
        assert_eq!(s.value, 9.0);
        assert_eq!(s.normalized(), 1.0);
        assert_eq!(Slider::new(0.0, 5.0).value(f64::NAN).normalized(), 0.0);
    }

    #[test]
    fn drag_reports_snapped_values() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut s = Slider::new(0.0, 2.0).step(0.5).on_input(move |v| sink.borrow_mut().push(v));

        let rect = Rect::new(0.0, 0.0, 100.0, 10.0);
        let start = Vec2::new(10.0, 5.0);
        let r = s.on_event(&UiEvent::Drag { pos: Vec2::new(60.0, 5.0), start }, rect, &ctx);
        assert!(r.is_consumed());
        // Same snapped value again: no second write.
        s.on_event(&UiEvent::Drag { pos: Vec2::new(61.0, 5.0), start }, rect, &ctx);
        s.on_event(&UiEvent::DragEnd { pos: Vec2::new(500.0, 5.0), start }, rect, &ctx);
        assert_eq!(*seen.borrow(), vec![1.0, 2.0]);
    }

    #[test]
    fn drags_from_elsewhere_are_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut s = Slider::new(0.0, 1.0);
        let ev = UiEvent::Drag { pos: Vec2::new(5.0, 5.0), start: Vec2::new(500.0, 5.0) };
        assert!(!s.on_event(&ev, Rect::new(0.0, 0.0, 10.0, 10.0), &ctx).is_consumed());
    }
}
