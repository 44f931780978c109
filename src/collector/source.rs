//! The metric source the dashboard samples on every tick.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::procfs::{CollectError, CpuTimes, SystemCollector};
use super::traits::FileSystem;

/// A tracked metric. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Cpu,
    Memory,
}

impl Metric {
    pub fn all() -> &'static [Metric] {
        &[Metric::Cpu, Metric::Memory]
    }

    /// Label shown next to the gauge.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU:",
            Metric::Memory => "Memory:",
        }
    }

    /// Prefix used in the error banner.
    pub fn error_label(&self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Memory => "Mem",
        }
    }
}

/// Synchronous source of utilization percentages in `0..=100`.
pub trait MetricSource {
    /// Aggregate CPU load since the previous sample.
    fn sample_cpu(&mut self) -> Result<f64, CollectError>;

    /// Used share of physical memory.
    fn sample_memory(&mut self) -> Result<f64, CollectError>;

    /// Samples one metric.
    fn sample(&mut self, metric: Metric) -> Result<f64, CollectError> {
        match metric {
            Metric::Cpu => self.sample_cpu(),
            Metric::Memory => self.sample_memory(),
        }
    }
}

/// Metric source backed by `/proc/stat` and `/proc/meminfo`.
///
/// CPU load needs two readings; the first sample is measured against boot
/// (all counters zero), later samples against the previous reading.
pub struct ProcfsSource<F: FileSystem> {
    collector: SystemCollector<F>,
    prev_cpu: CpuTimes,
    slow_threshold: Option<Duration>,
}

impl<F: FileSystem> ProcfsSource<F> {
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            collector: SystemCollector::new(fs, proc_path),
            prev_cpu: CpuTimes::default(),
            slow_threshold: None,
        }
    }

    /// Logs a warning whenever a single read takes longer than `threshold`.
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = Some(threshold);
        self
    }

    pub fn collector(&self) -> &SystemCollector<F> {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut SystemCollector<F> {
        &mut self.collector
    }

    fn check_latency(&self, what: &str, started: Instant) {
        let took = started.elapsed();
        if let Some(limit) = self.slow_threshold
            && took > limit
        {
            warn!(metric = what, took_ms = took.as_millis() as u64, "slow metric read");
        }
    }
}

impl<F: FileSystem> MetricSource for ProcfsSource<F> {
    fn sample_cpu(&mut self) -> Result<f64, CollectError> {
        let started = Instant::now();
        let now = self.collector.collect_cpu_times();
        self.check_latency("cpu", started);
        let now = now?;

        let percent = busy_percent(&self.prev_cpu, &now);
        self.prev_cpu = now;
        debug!(percent, "sampled cpu");
        Ok(percent)
    }

    fn sample_memory(&mut self) -> Result<f64, CollectError> {
        let started = Instant::now();
        let info = self.collector.collect_meminfo();
        self.check_latency("memory", started);
        let info = info?;

        let used = info.mem_total.saturating_sub(info.available());
        let percent = used as f64 / info.mem_total as f64 * 100.0;
        debug!(percent, "sampled memory");
        Ok(percent)
    }
}

/// Busy share of the CPU time elapsed between two readings.
fn busy_percent(prev: &CpuTimes, now: &CpuTimes) -> f64 {
    let (prev_busy, now_busy) = (prev.busy(), now.busy());
    let (prev_total, now_total) = (prev.total(), now.total());

    if now_busy <= prev_busy {
        return 0.0;
    }
    if now_total <= prev_total {
        return 100.0;
    }
    let percent = (now_busy - prev_busy) as f64 / (now_total - prev_total) as f64 * 100.0;
    percent.clamp(0.0, 100.0)
}
