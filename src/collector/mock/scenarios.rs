//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` states for the files the metric
//! source reads.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical 4-CPU system with about a quarter of its memory in use.
    ///
    /// Memory: 16 GB total, 12 GB available (26.76 % used).
    /// CPU since boot: 13800 busy jiffies out of 94800.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );

        fs
    }

    /// Creates a system whose kernel predates `MemAvailable` (pre 3.14).
    ///
    /// Memory: 8 GB total, free + buffers + cached = 4 GB (50 % used).
    pub fn legacy_kernel() -> Self {
        let mut fs = Self::typical_system();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        8000000 kB
MemFree:         2000000 kB
Buffers:          500000 kB
Cached:          1500000 kB
SwapCached:            0 kB
",
        );

        fs
    }

    /// Creates a system where `/proc` exists but is unreadable.
    pub fn locked_down() -> Self {
        let mut fs = Self::typical_system();
        fs.deny("/proc/stat");
        fs.deny("/proc/meminfo");
        fs
    }
}
