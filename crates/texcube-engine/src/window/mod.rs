//! Window and event loop.
//!
//! Owns the `winit` event loop and the single application window, binds the
//! GPU surface to it and drives `core::App` with continuous redraws.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
