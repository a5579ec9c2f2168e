//! Overlay draw stream.
//!
//! The UI layer records flat 2D commands here each frame; the overlay
//! renderers consume them in paint order (z, then insertion order).

mod cmd;
mod key;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
