//! 2D coordinate types for the overlay layer.
//!
//! Logical pixels, origin top-left, +Y down. Renderers convert to NDC in their
//! shaders from a viewport uniform. 3D space lives in `scene3d` and uses `glam`.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
