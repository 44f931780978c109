//! sysgauge - animated CPU and memory gauges for the terminal.
//!
//! The library holds everything the `sysgauge` binary is made of:
//! - `collector` - procfs-backed metric source
//! - `tui` - gauges, dashboard state, event scheduler and rendering
//! - `util` - small text helpers

pub mod collector;
pub mod tui;
pub mod util;
