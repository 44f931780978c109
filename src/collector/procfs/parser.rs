//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc` files into
//! structured data. They are easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parsed data from `/proc/meminfo` (values in kB).
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    /// `None` on kernels that do not report `MemAvailable`.
    pub mem_available: Option<u64>,
    pub buffers: u64,
    pub cached: u64,
}

impl MemInfo {
    /// Memory available to new allocations, estimated from free + buffers +
    /// page cache when the kernel does not report it.
    pub fn available(&self) -> u64 {
        self.mem_available
            .unwrap_or(self.mem_free + self.buffers + self.cached)
    }
}

/// Parses `/proc/meminfo` content.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = Some(parse_kb(line));
        } else if line.starts_with("Buffers:") {
            info.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            info.cached = parse_kb(line);
        }
    }

    if info.mem_total == 0 {
        return Err(ParseError::new("MemTotal missing or zero"));
    }

    Ok(info)
}

/// Aggregate CPU times from the `cpu` line of `/proc/stat` (in jiffies).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    /// All accounted time. Guest time is already part of `user`.
    ///
    /// Saturates at `u64::MAX` instead of overflowing on bogus counters.
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }

    /// Time spent doing work (everything but idle and iowait).
    pub fn busy(&self) -> u64 {
        self.total()
            .saturating_sub(self.idle)
            .saturating_sub(self.iowait)
    }
}

/// Parses the aggregate `cpu` line of `/proc/stat`.
///
/// Per-CPU lines (`cpu0`, `cpu1`, ...) are ignored.
pub fn parse_cpu_times(content: &str) -> Result<CpuTimes, ParseError> {
    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.first() != Some(&"cpu") {
            continue;
        }
        if parts.len() < 5 {
            return Err(ParseError::new(format!(
                "cpu line has {} fields, expected at least 4 counters",
                parts.len() - 1
            )));
        }

        // Missing trailing counters (older kernels) read as zero; present
        // but unparsable ones are an error.
        let get_val = |idx: usize| -> Result<u64, ParseError> {
            match parts.get(idx) {
                Some(s) => s.parse().map_err(|_| {
                    ParseError::new(format!("invalid cpu counter {:?} at field {}", s, idx))
                }),
                None => Ok(0),
            }
        };

        return Ok(CpuTimes {
            user: get_val(1)?,
            nice: get_val(2)?,
            system: get_val(3)?,
            idle: get_val(4)?,
            iowait: get_val(5)?,
            irq: get_val(6)?,
            softirq: get_val(7)?,
            steal: get_val(8)?,
        });
    }

    Err(ParseError::new("aggregate cpu line not found"))
}
