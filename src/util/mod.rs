//! Utility modules for sysgauge.

mod text;

pub use text::{pad_right, truncate};
