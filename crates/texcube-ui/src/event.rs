use texcube_engine::coords::Vec2;

/// Pointer events routed through the widget tree.
///
/// Only the primary button takes part; positions are logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Pointer is inside the window at `pos`. Sent every frame.
    Hover { pos: Vec2 },
    /// Primary button is held. `start` is where it went down; sent every frame
    /// of the drag, including the press frame.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a drag that began at `start`.
    ///
    /// Fires wherever the pointer is; use `rect.contains(start)` to tell
    /// whether the drag belongs to the widget.
    DragEnd { pos: Vec2, start: Vec2 },
    /// Primary button released at `pos`.
    Click { pos: Vec2 },
}

/// Result of [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled; stop routing to later siblings.
    Consumed,
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
