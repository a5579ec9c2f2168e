use texcube_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Vertical stack. Every child is stretched to the column's inner width.
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
}

impl Column {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default() }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
        self.children.extend(iter.into_iter().map(Into::into));
        self
    }

    fn child_constraints(inner_w: f32) -> Constraints {
        // An unbounded column lets children size naturally instead of to infinity.
        let min_x = if inner_w.is_finite() { inner_w } else { 0.0 };
        Constraints { min: Vec2::new(min_x, 0.0), max: Vec2::new(inner_w, f32::INFINITY) }
    }

    /// Child rects top to bottom inside `rect`.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = Self::child_constraints(inner.size.x);

        let mut y = inner.origin.y;
        self.children
            .iter()
            .map(|child| {
                let s = child.measure(child_c, ctx);
                let r = Rect::new(inner.origin.x, y, s.x, s.y);
                y += s.y + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = Self::child_constraints(inner_w);

        let mut total_h = self.padding.v();
        let mut max_child_w: f32 = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            let s = child.measure(child_c, ctx);
            total_h += s.y;
            if i + 1 < self.children.len() {
                total_h += self.spacing;
            }
            max_child_w = max_child_w.max(s.x);
        }

        let w = if constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            max_child_w + self.padding.h()
        };
        constraints.constrain(Vec2::new(w, total_h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.layout(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let rects = self.layout(rect, ctx);
        for (child, r) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texcube_engine::text::FontSystem;

    struct Fixed(Vec2);

    impl Widget for Fixed {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(self.0)
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    #[test]
    fn stacks_with_spacing_and_stretches_width() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let col = Column::new()
            .spacing(2.0)
            .padding(Edges::all(1.0))
            .child(Fixed(Vec2::new(10.0, 5.0)))
            .child(Fixed(Vec2::new(20.0, 7.0)));

        let size = col.measure(Constraints::loose(Vec2::new(40.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::new(40.0, 16.0));

        let rects = col.layout(Rect::new(0.0, 0.0, 40.0, 16.0), &ctx);
        assert_eq!(rects[0], Rect::new(1.0, 1.0, 38.0, 5.0));
        assert_eq!(rects[1], Rect::new(1.0, 8.0, 38.0, 7.0));
    }
}
