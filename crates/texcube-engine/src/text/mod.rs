//! Font loading and single-line text measurement.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
pub(crate) use font_system::layout_line;
