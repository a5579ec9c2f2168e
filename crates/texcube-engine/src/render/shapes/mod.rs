//! 2D overlay renderers.

mod common;

pub mod rect;
pub mod text;

pub use rect::RectRenderer;
pub use text::TextRenderer;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::FontSystem;

/// Draws a whole `DrawList`: every rect, then every text run on top.
///
/// The overlay is flat (panel backgrounds under labels), so two passes in a
/// fixed order are enough.
#[derive(Default)]
pub struct OverlayRenderer {
    rects: RectRenderer,
    text: TextRenderer,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.rects.render(ctx, target, draw_list);
        self.text.render(ctx, target, draw_list, fonts);
    }
}
