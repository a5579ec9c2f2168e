pub(crate) mod rect;
pub(crate) mod text;

pub use rect::RectCmd;
pub use text::TextCmd;
