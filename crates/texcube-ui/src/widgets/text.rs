use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::paint::Color;
use texcube_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// One line of text, vertically centred in the rect it is given.
pub struct Text {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(ctx.fonts.measure_text(&self.text, self.font, self.size))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let line = painter.measure_text(&self.text, self.font, self.size);
        let y = rect.origin.y + ((rect.size.y - line.y) * 0.5).max(0.0);
        painter.text(&self.text, self.font, self.size, self.color, Vec2::new(rect.origin.x, y));
    }
}
