use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::paint::Color;
use texcube_engine::scene::{DrawList, ZIndex};
use texcube_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface handed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Every call gets the next z so later widgets land on top of earlier ones.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    z: i32,
    /// Pointer position, `None` while outside the window.
    pub pointer: Option<Vec2>,
    /// Primary button held this frame.
    pub pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        fonts: &'a FontSystem,
        pointer: Option<Vec2>,
        pressed: bool,
    ) -> Self {
        Self { draw_list, fonts, z: 0, pointer, pressed }
    }

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|p| rect.contains(p))
    }

    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.fonts.measure_text(text, font, size)
    }

    /// Containers use this to re-measure children while painting.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.fonts }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, color);
    }

    /// Single line of text; `origin` is the top-left of the line box.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texcube_engine::scene::DrawCmd;

    #[test]
    fn later_fills_paint_on_top() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, None, false);
            p.fill_rect(Rect::new(1.0, 0.0, 4.0, 4.0), Color::WHITE);
            p.fill_rect(Rect::new(2.0, 0.0, 4.0, 4.0), Color::BLACK);
        }
        let xs: Vec<f32> = list
            .iter_in_paint_order()
            .map(|it| match &it.cmd {
                DrawCmd::Rect(r) => r.rect.origin.x,
                DrawCmd::Text(_) => -1.0,
            })
            .collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn hover_needs_a_pointer() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!Painter::new(&mut list, &fonts, None, false).is_hovered(r));
        assert!(Painter::new(&mut list, &fonts, Some(Vec2::new(5.0, 5.0)), false).is_hovered(r));
    }
}
