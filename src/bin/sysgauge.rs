//! sysgauge - animated CPU and memory gauges for the terminal.
//!
//! Usage:
//!   sysgauge                      # refresh every second
//!   sysgauge 5                    # refresh every 5 seconds
//!   sysgauge --log-file g.log -v  # debug logging to g.log
//!
//! Press `q` or `Ctrl+C` to quit.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use sysgauge::collector::{FileSystem, MetricSource, ProcfsSource};
#[cfg(not(target_os = "linux"))]
use sysgauge::collector::MockFs;
#[cfg(target_os = "linux")]
use sysgauge::collector::RealFs;
use sysgauge::tui::{App, DashboardConfig, Event, EventHandler};

/// Animated CPU and memory gauges.
#[derive(Parser)]
#[command(name = "sysgauge", about = "Animated CPU and memory gauges", version)]
struct Args {
    /// Refresh interval in seconds.
    #[arg(value_name = "INTERVAL", default_value = "1")]
    interval: u64,

    /// Animation frames per second.
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Path to /proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Write logs to this file. Without it nothing is logged.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Routes logs to `path`; the terminal itself is reserved for the dashboard.
fn init_logging(path: &Path, verbose: u8) -> std::io::Result<()> {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let file = File::create(path)?;

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("sysgauge={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn build_source(args: &Args, slow_threshold: Duration) -> Box<dyn MetricSource> {
    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    #[cfg(not(target_os = "linux"))]
    let fs = MockFs::typical_system();

    let source = ProcfsSource::new(fs, &args.proc_path).with_slow_threshold(slow_threshold);
    let stat = Path::new(&args.proc_path).join("stat");
    if !source.collector().fs().exists(&stat) {
        warn!(path = %stat.display(), "proc stat not found, CPU gauge will report errors");
    }
    Box::new(source)
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    let config = DashboardConfig {
        refresh_interval: Duration::from_secs(args.interval.max(1)),
        frame_interval: Duration::from_secs(1) / args.fps,
        ..DashboardConfig::default()
    };
    info!(
        "sysgauge {} starting: interval={}s, fps={}, proc={}",
        env!("CARGO_PKG_VERSION"),
        config.refresh_interval.as_secs(),
        args.fps,
        args.proc_path
    );

    let source = build_source(&args, config.refresh_interval);
    let events = EventHandler::new();

    let quit_tx = events.sender();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        let _ = quit_tx.send(Ok(Event::Quit));
    }) {
        warn!("Failed to set signal handler: {}", e);
    }

    let app = App::new(source, config);
    if let Err(e) = app.run(events) {
        eprintln!("Error running program: {}", e);
        std::process::exit(1);
    }
}
