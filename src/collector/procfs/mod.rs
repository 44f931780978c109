//! Collectors for the Linux `/proc` filesystem.

pub mod parser;
pub mod system;

pub use parser::{CpuTimes, MemInfo, ParseError};
pub use system::{CollectError, SystemCollector};
