//! Minimal 3D scene: a perspective camera and textured meshes.
//!
//! Right-handed, +Y up, camera looking down -Z. Matrices are `glam` and the
//! projection targets wgpu's `0..1` depth range.

mod camera;
mod geometry;
mod mesh;

pub use camera::PerspectiveCamera;
pub use geometry::{Geometry, MeshVertex};
pub use mesh::{Mesh, Transform};
