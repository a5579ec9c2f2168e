use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::text::TextCmd;

/// One overlay primitive. Each variant has a matching renderer under
/// `render::shapes`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Text(TextCmd),
}
