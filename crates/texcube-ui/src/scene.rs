use texcube_engine::coords::{Rect, Vec2};
use texcube_engine::input::{InputFrame, InputState, MouseButton};
use texcube_engine::scene::DrawList;
use texcube_engine::text::FontSystem;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

/// Pointer snapshot for one UI frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiInput {
    pub pointer: Option<Vec2>,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button is held.
    pub held: bool,
    /// Primary button came up this frame.
    pub released: bool,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            pointer: state.pointer_pos,
            pressed: frame.buttons_pressed.contains(&MouseButton::Left),
            held: state.button_down(MouseButton::Left),
            released: frame.buttons_released.contains(&MouseButton::Left),
        }
    }
}

/// Owns the fonts and the draw list the widget tree paints into, plus the
/// drag that spans frames.
///
/// Both fields are public so the caller can split-borrow them for
/// `OverlayRenderer::render`.
pub struct UiScene {
    pub font_system: FontSystem,
    pub draw_list: DrawList,
    drag_start: Option<Vec2>,
    last_pointer: Option<Vec2>,
}

impl UiScene {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            draw_list: DrawList::new(),
            drag_start: None,
            last_pointer: None,
        }
    }

    /// Lays `root` out inside `bounds`, paints it and routes this frame's
    /// pointer events to it.
    ///
    /// The tree is consumed: it is rebuilt by the caller every frame.
    pub fn frame(&mut self, mut root: Element, bounds: Rect, input: &UiInput) -> &mut DrawList {
        self.draw_list.clear();
        let events = self.pointer_events(input);

        let ctx = LayoutCtx { fonts: &self.font_system };
        let size = root.measure(Constraints::loose(bounds.size), &ctx);
        let rect = Rect::new(bounds.origin.x, bounds.origin.y, size.x, size.y);

        {
            let mut painter =
                Painter::new(&mut self.draw_list, &self.font_system, input.pointer, input.held);
            root.paint(&mut painter, rect);
        }

        for event in &events {
            root.on_event(event, rect, &ctx);
        }

        &mut self.draw_list
    }

    /// Turns button transitions into widget events and tracks the drag origin.
    fn pointer_events(&mut self, input: &UiInput) -> Vec<UiEvent> {
        if input.pointer.is_some() {
            self.last_pointer = input.pointer;
        }
        let Some(pos) = input.pointer.or(self.last_pointer) else {
            self.drag_start = None;
            return Vec::new();
        };

        let mut events = Vec::with_capacity(3);
        if input.pointer.is_some() {
            events.push(UiEvent::Hover { pos });
        }
        if input.pressed {
            self.drag_start = Some(pos);
        }
        if let Some(start) = self.drag_start {
            if input.held || input.pressed {
                events.push(UiEvent::Drag { pos, start });
            }
            if input.released {
                events.push(UiEvent::DragEnd { pos, start });
                events.push(UiEvent::Click { pos });
                self.drag_start = None;
            }
        }
        events
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> Option<Vec2> {
        Some(Vec2::new(x, y))
    }

    #[test]
    fn press_starts_a_drag_at_the_pointer() {
        let mut scene = UiScene::new();
        let ev = scene.pointer_events(&UiInput { pointer: at(3.0, 4.0), pressed: true, held: true, released: false });
        let start = Vec2::new(3.0, 4.0);
        assert_eq!(ev, vec![UiEvent::Hover { pos: start }, UiEvent::Drag { pos: start, start }]);
    }

    #[test]
    fn release_ends_the_drag_and_clicks() {
        let mut scene = UiScene::new();
        let _ = scene.pointer_events(&UiInput { pointer: at(1.0, 1.0), pressed: true, held: true, released: false });
        let ev = scene.pointer_events(&UiInput { pointer: at(9.0, 1.0), pressed: false, held: false, released: true });
        let start = Vec2::new(1.0, 1.0);
        let pos = Vec2::new(9.0, 1.0);
        assert!(ev.contains(&UiEvent::DragEnd { pos, start }));
        assert!(ev.contains(&UiEvent::Click { pos }));

        let after = scene.pointer_events(&UiInput { pointer: at(9.0, 1.0), ..UiInput::default() });
        assert_eq!(after, vec![UiEvent::Hover { pos }]);
    }

    #[test]
    fn release_outside_window_uses_last_position() {
        let mut scene = UiScene::new();
        let _ = scene.pointer_events(&UiInput { pointer: at(2.0, 2.0), pressed: true, held: true, released: false });
        let ev = scene.pointer_events(&UiInput { pointer: None, pressed: false, held: false, released: true });
        let p = Vec2::new(2.0, 2.0);
        assert_eq!(ev, vec![UiEvent::DragEnd { pos: p, start: p }, UiEvent::Click { pos: p }]);
    }
}
