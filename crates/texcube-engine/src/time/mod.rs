//! Frame timing.
//!
//! One `FrameClock` per render loop; `tick()` once per frame yields a
//! `FrameTime` carrying both the clamped delta and the unclamped time since
//! the clock started.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
