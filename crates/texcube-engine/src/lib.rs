//! texcube engine: window and GPU runtime, a small 3D scene of textured
//! meshes, texture state, and the 2D overlay the parameter panel draws into.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod time;
pub mod window;

pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
pub mod scene3d;
pub mod text;
pub mod texture;

pub use glam;
