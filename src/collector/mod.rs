//! Metric collection for the dashboard.
//!
//! The dashboard only ever talks to a [`MetricSource`]. The production source
//! reads the Linux `/proc` filesystem through the [`FileSystem`] trait so that
//! tests (and non-Linux hosts) can substitute an in-memory [`MockFs`].
//!
//! ```text
//!   DashboardState ──► MetricSource (trait)
//!                           │
//!                      ProcfsSource
//!                           │
//!                     SystemCollector ── /proc/stat, /proc/meminfo
//!                           │
//!                      FileSystem (trait)
//!                     ┌─────┴─────┐
//!                  RealFs       MockFs
//! ```
//!
//! # Usage
//!
//! ```
//! use sysgauge::collector::{MetricSource, MockFs, ProcfsSource};
//!
//! let mut source = ProcfsSource::new(MockFs::typical_system(), "/proc");
//! let mem = source.sample_memory().unwrap();
//! assert!((0.0..=100.0).contains(&mem));
//! ```

pub mod mock;
pub mod procfs;
mod source;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{CollectError, SystemCollector};
pub use source::{Metric, MetricSource, ProcfsSource};
pub use traits::{FileSystem, RealFs};
