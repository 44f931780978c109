//! System collector for gathering global system metrics from `/proc/`.

use crate::collector::procfs::parser::{CpuTimes, MemInfo, parse_cpu_times, parse_meminfo};
use crate::collector::traits::FileSystem;
use std::path::Path;

/// Errors raised while collecting a metric.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a `/proc` file.
    Io(std::io::Error),
    /// Parse error in a `/proc` file.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "{}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// Collects system-wide metrics from `/proc/`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Returns the underlying filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Returns the underlying filesystem mutably, so tests can change `/proc`
    /// between samples.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    /// Returns the proc root this collector reads from.
    pub fn proc_path(&self) -> &str {
        &self.proc_path
    }

    /// Collects memory information from `/proc/meminfo`.
    pub fn collect_meminfo(&self) -> Result<MemInfo, CollectError> {
        let path = format!("{}/meminfo", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects aggregate CPU times from `/proc/stat`.
    pub fn collect_cpu_times(&self) -> Result<CpuTimes, CollectError> {
        let path = format!("{}/stat", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        parse_cpu_times(&content).map_err(|e| CollectError::Parse(e.message))
    }
}
