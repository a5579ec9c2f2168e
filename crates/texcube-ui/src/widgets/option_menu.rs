use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::paint::Color;
use texcube_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A row of mutually exclusive choices, one equal-width segment each.
///
/// `selected` is `None` when the bound value matches no choice; any click then
/// counts as a change.
///
/// ```rust,ignore
/// OptionMenu::new(["Repeat", "Clamp", "Mirror"])
///     .selected(Some(1))
///     .font(font)
///     .on_select(|i| println!("picked {i}"))
/// ```
pub struct OptionMenu {
    labels: Vec<String>,
    selected: Option<usize>,
    font: Option<FontId>,
    font_size: f32,
    height: f32,
    gap: f32,
    label_color: Color,
    idle_color: Color,
    selected_color: Color,
    on_select: Option<Box<dyn FnMut(usize)>>,
}

impl OptionMenu {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            selected: None,
            font: None,
            font_size: 11.0,
            height: 18.0,
            gap: 2.0,
            label_color: Color::from_srgb_u8(0xee, 0xee, 0xee, 0xff),
            idle_color: Color::from_srgb_u8(0x30, 0x30, 0x30, 0xff),
            selected_color: Color::from_srgb_u8(0x2f, 0xa1, 0xd6, 0xff),
            on_select: None,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn font(mut self, font: Option<FontId>) -> Self {
        self.font = font;
        self
    }

    pub fn on_select(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    fn segment(&self, rect: Rect, i: usize) -> Rect {
        let n = self.labels.len().max(1) as f32;
        let w = ((rect.size.x - self.gap * (n - 1.0)) / n).max(0.0);
        Rect::new(rect.origin.x + i as f32 * (w + self.gap), rect.origin.y, w, rect.size.y)
    }
}

impl Widget for OptionMenu {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let w = if constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            self.labels
                .iter()
                .map(|l| self.font.map_or(40.0, |f| ctx.fonts.measure_text(l, f, self.font_size).x + 8.0))
                .sum::<f32>()
                + self.gap * self.labels.len().saturating_sub(1) as f32
        };
        constraints.constrain(Vec2::new(w, self.height))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        for (i, label) in self.labels.iter().enumerate() {
            let seg = self.segment(rect, i);
            let bg = if self.selected == Some(i) { self.selected_color } else { self.idle_color };
            painter.fill_rect(seg, bg);

            if let Some(font) = self.font {
                let size = painter.measure_text(label, font, self.font_size);
                let origin = Vec2::new(
                    seg.origin.x + ((seg.size.x - size.x) * 0.5).max(0.0),
                    seg.origin.y + ((seg.size.y - size.y) * 0.5).max(0.0),
                );
                painter.text(label, font, self.font_size, self.label_color, origin);
            }
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        let UiEvent::Click { pos } = *event else {
            return EventResult::Ignored;
        };
        if !rect.contains(pos) {
            return EventResult::Ignored;
        }
        let Some(i) = (0..self.labels.len()).find(|&i| self.segment(rect, i).contains(pos)) else {
            return EventResult::Ignored;
        };
        if self.selected != Some(i) {
            self.selected = Some(i);
            if let Some(f) = &mut self.on_select {
                f(i);
            }
        }
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use texcube_engine::text::FontSystem;

    fn click(menu: &mut OptionMenu, x: f32) -> EventResult {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        menu.on_event(&UiEvent::Click { pos: Vec2::new(x, 5.0) }, Rect::new(0.0, 0.0, 94.0, 18.0), &ctx)
    }

    #[test]
    fn click_picks_the_segment_under_the_pointer() {
        let picked = Rc::new(Cell::new(None));
        let sink = picked.clone();
        let mut menu = OptionMenu::new(["a", "b", "c"]).on_select(move |i| sink.set(Some(i)));
        // Segments are 30 wide with a 2px gap: [0,30) [32,62) [64,94).
        assert!(click(&mut menu, 40.0).is_consumed());
        assert_eq!(picked.get(), Some(1));
    }

    #[test]
    fn reselecting_the_current_choice_is_quiet() {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        let mut menu = OptionMenu::new(["a", "b"]).selected(Some(0)).on_select(move |_| sink.set(sink.get() + 1));
        click(&mut menu, 1.0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn gap_clicks_are_ignored() {
        let mut menu = OptionMenu::new(["a", "b", "c"]);
        assert!(!click(&mut menu, 31.0).is_consumed());
    }
}
