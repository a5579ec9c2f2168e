//! GPU device and surface management.
//!
//! `Gpu` owns the wgpu instance, device, queue and the window surface.
//! `RenderSurface` is the narrow view of "a drawable with a display size and a
//! backing size" that the frame loop resizes against.

mod gpu;
mod init;
mod resize;
mod surface;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
pub use resize::{resize_to_display_size, RenderSurface};
pub use surface::WindowSurface;
