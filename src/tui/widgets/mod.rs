//! TUI widgets for sysgauge.

pub mod gauge;

pub use gauge::Gauge;
