//! GPU renderers.
//!
//! `mesh` draws the textured 3D scene with a depth buffer. `shapes` draws the
//! 2D overlay (rects and text) recorded in a `scene::DrawList` on top of it.
//! Every renderer creates its GPU resources lazily on first use and rebuilds
//! them when the surface format or the inputs they depend on change.

mod ctx;
pub mod mesh;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::MeshRenderer;
pub use shapes::OverlayRenderer;
