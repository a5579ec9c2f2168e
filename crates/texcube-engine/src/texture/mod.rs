//! Texture state shared between the parameter panel and the mesh renderer.
//!
//! A `Texture` is plain CPU-side data: the decoded image (once the background
//! decode finishes), the sampling transform, and a version counter. The
//! renderer owns the GPU copy and refreshes it when the version moves.

mod asset;
mod decode;
mod transform;
mod wrap;

pub use asset::Texture;
pub use decode::{decode_file, TextureImage, TextureLoadError};
pub use transform::TextureTransform;
pub use wrap::{WrapMode, CLAMP_TO_EDGE_WRAPPING, MIRRORED_REPEAT_WRAPPING, REPEAT_WRAPPING};
