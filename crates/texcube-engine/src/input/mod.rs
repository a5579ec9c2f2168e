//! Input subsystem.
//!
//! The public types are platform-agnostic; `platform::winit` turns window
//! events into `InputEvent`s and `InputState` folds them into the current
//! pointer/keyboard state plus a per-frame delta (`InputFrame`).

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};
