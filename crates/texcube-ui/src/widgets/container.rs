use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::paint::Color;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Single child with padding, an optional background and a fixed width.
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Color>,
    width: Option<f32>,
    min_height: f32,
}

impl Container {
    pub fn new() -> Self {
        Self { child: None, padding: Edges::default(), background: None, width: None, min_height: 0.0 }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Fixes the outer width regardless of the child.
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }

    pub fn min_height(mut self, h: f32) -> Self {
        self.min_height = h;
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let mut inner = constraints.shrink(self.padding);
        if let Some(w) = self.width {
            inner.max.x = inner.max.x.min((w - self.padding.h()).max(0.0));
        }

        let child = self.child.as_ref().map_or(Vec2::ZERO, |c| c.measure(inner, ctx));
        let w = self.width.unwrap_or(child.x + self.padding.h());
        let h = (child.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if let Some(bg) = self.background {
            painter.fill_rect(rect, bg);
        }
        if let Some(child) = &self.child {
            child.paint(painter, inset_rect(rect, self.padding));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        match &mut self.child {
            Some(child) => child.on_event(event, inset_rect(rect, self.padding), ctx),
            None => EventResult::Ignored,
        }
    }
}
