//! End-to-end runs of the dashboard loop against mock `/proc` data.

use std::cell::Cell as Counter;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::{Backend, TestBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

use sysgauge::collector::{Metric, MockFs, ProcfsSource};
use sysgauge::tui::{
    App, Command, DashboardConfig, DashboardLayout, DashboardState, Event, EventSource, Scheduler,
    viewport_height,
};

const HOUR: Duration = Duration::from_secs(3600);

/// Plays back poll results; `None` entries are timeouts, `Quit` once exhausted.
struct Scripted(VecDeque<Option<Event>>);

impl Scripted {
    fn new(script: impl IntoIterator<Item = Option<Event>>) -> Self {
        Self(script.into_iter().collect())
    }
}

impl EventSource for Scripted {
    fn poll(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Event>> {
        Ok(self.0.pop_front().unwrap_or(Some(Event::Quit)))
    }
}

fn proc_with(cpu_line: &str, mem_total_kb: u64, mem_available_kb: u64) -> MockFs {
    let mut fs = MockFs::new();
    fs.add_file("/proc/stat", format!("{}\n", cpu_line));
    fs.add_file(
        "/proc/meminfo",
        format!(
            "MemTotal: {} kB\nMemFree: 0 kB\nMemAvailable: {} kB\n",
            mem_total_kb, mem_available_kb
        ),
    );
    fs
}

fn config() -> DashboardConfig {
    DashboardConfig {
        refresh_interval: HOUR,
        frame_interval: Duration::ZERO,
        layout: DashboardLayout::default(),
    }
}

fn target(state: &DashboardState, metric: Metric) -> f64 {
    state.gauge(metric).unwrap().target()
}

#[test]
fn tick_sets_both_targets() {
    // 42 busy of 100 jiffies since boot; 685 of 1000 kB used.
    let mut source = ProcfsSource::new(proc_with("cpu 42 0 0 58 0 0 0 0", 1000, 315), "/proc");
    let mut state = DashboardState::new(&config());

    let commands = state.handle(Event::Tick, &mut source);

    assert!((target(&state, Metric::Cpu) - 0.42).abs() < 1e-9);
    assert!((target(&state, Metric::Memory) - 0.685).abs() < 1e-9);
    assert_eq!(state.error_banner(), "");
    assert_eq!(commands.last(), Some(&Command::ScheduleTick(HOUR)));
}

#[test]
fn unreadable_cpu_keeps_last_target_and_reports() {
    let mut source = ProcfsSource::new(proc_with("cpu 50 0 0 50 0 0 0 0", 1000, 700), "/proc");
    let mut state = DashboardState::new(&config());
    state.handle(Event::Tick, &mut source);
    let before = target(&state, Metric::Cpu);

    source.collector_mut().fs_mut().deny("/proc/stat");
    state.handle(Event::Tick, &mut source);

    assert_eq!(state.error_banner(), "CPU Err: permission denied");
    assert_eq!(target(&state, Metric::Cpu), before);
    assert!((target(&state, Metric::Memory) - 0.30).abs() < 1e-9);

    source.collector_mut().fs_mut().allow("/proc/stat");
    state.handle(Event::Tick, &mut source);
    assert_eq!(state.error_banner(), "");
}

#[test]
fn every_read_failing_still_reschedules() {
    let mut source = ProcfsSource::new(MockFs::locked_down(), "/proc");
    let mut state = DashboardState::new(&config());

    let commands = state.handle(Event::Tick, &mut source);

    assert_eq!(commands, vec![Command::ScheduleTick(HOUR)]);
    assert_eq!(
        state.error_banner(),
        "CPU Err: permission denied | Mem Err: permission denied"
    );
}

#[test]
fn resize_with_eighteen_columns_of_overhead() {
    let mut state = DashboardState::new(&DashboardConfig {
        layout: DashboardLayout::new(1, 10),
        ..config()
    });
    let mut source = ProcfsSource::new(MockFs::typical_system(), "/proc");

    state.handle(Event::Resize(40), &mut source);

    assert_eq!(state.gauge(Metric::Cpu).unwrap().width(), 22);
    assert_eq!(state.gauge(Metric::Memory).unwrap().width(), 22);
}

#[test]
fn quit_mid_animation_stops_all_delivery() {
    let mut source = ProcfsSource::new(MockFs::typical_system(), "/proc");
    let mut state = DashboardState::new(&config());
    let mut scheduler = Scheduler::new(
        Scripted::new([None, None, Some(Event::Quit)]),
        Duration::ZERO,
    );
    scheduler.push(Event::Tick);

    let mut delivered = Vec::new();
    while let Some(event) = scheduler.next_event().unwrap() {
        delivered.push(event);
        let commands = state.handle(event, &mut source);
        scheduler.apply(commands);
    }

    assert_eq!(delivered.len(), 4);
    assert_eq!(delivered[0], Event::Tick);
    assert!(matches!(delivered[1], Event::Frame { .. }));
    assert!(matches!(delivered[2], Event::Frame { .. }));
    assert_eq!(delivered[3], Event::Quit);

    assert!(state.is_animating(), "quit arrived before the gauges settled");
    assert!(!scheduler.is_running());
    assert!(!scheduler.has_pending_frame());
    assert!(!scheduler.has_pending_tick());
    assert_eq!(scheduler.next_event().unwrap(), None);
}

#[test]
fn app_animates_to_rest_and_draws_final_frame() {
    let source = ProcfsSource::new(MockFs::legacy_kernel(), "/proc");
    let mut app = App::new(Box::new(source), config());
    let mut terminal = Terminal::new(TestBackend::new(65, viewport_height())).unwrap();

    // Plenty of timeouts for the gauges to settle at MIN_STEP pace, then quit.
    let script = std::iter::repeat_n(None, 2000).chain([Some(Event::Quit)]);
    app.run_on(&mut terminal, Scripted::new(script)).unwrap();

    let state = app.state();
    assert!(!state.is_animating());
    // 65 columns minus 25 of overhead.
    assert_eq!(state.gauge(Metric::Memory).unwrap().width(), 40);
    assert_eq!(state.gauge(Metric::Memory).unwrap().current(), 0.5);

    let buffer = terminal.backend().buffer();
    let memory_row: String = (0..65u16)
        .map(|x| buffer[(x, 3u16)].symbol().to_string())
        .collect();
    assert!(memory_row.starts_with("  Memory:"));
    assert!(memory_row.contains(&"█".repeat(20)));
    assert!(memory_row.trim_end().ends_with("50%"));
}

/// `TestBackend` whose `flush` fails from the `fail_at`-th call on.
struct BrokenTerminal {
    inner: TestBackend,
    flushes: usize,
    fail_at: usize,
}

impl Backend for BrokenTerminal {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.inner.clear()
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        if self.flushes >= self.fail_at {
            return Err(io::Error::other("display gone"));
        }
        self.inner.flush()
    }
}

/// Counts polls, then behaves like an idle terminal.
struct CountingPolls(Rc<Counter<usize>>);

impl EventSource for CountingPolls {
    fn poll(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Event>> {
        self.0.set(self.0.get() + 1);
        Ok(None)
    }
}

#[test]
fn display_failure_stops_the_loop_with_an_error() {
    let source = ProcfsSource::new(MockFs::typical_system(), "/proc");
    let mut app = App::new(Box::new(source), config());
    let backend = BrokenTerminal {
        inner: TestBackend::new(65, viewport_height()),
        flushes: 0,
        // Initial draw and the draw after Resize succeed; the one after Tick fails.
        fail_at: 3,
    };
    let mut terminal = Terminal::new(backend).unwrap();
    let polls = Rc::new(Counter::new(0));

    let err = app
        .run_on(&mut terminal, CountingPolls(Rc::clone(&polls)))
        .unwrap_err();

    assert_eq!(err.to_string(), "display gone");
    assert_eq!(polls.get(), 0, "no event may be read after the failed draw");
    let cpu = app.state().gauge(Metric::Cpu).unwrap();
    assert!(cpu.target() > 0.0);
    assert_eq!(cpu.current(), 0.0, "no frame was handled");
}

#[test]
fn display_failure_on_first_draw_handles_nothing() {
    let source = ProcfsSource::new(MockFs::typical_system(), "/proc");
    let mut app = App::new(Box::new(source), config());
    let backend = BrokenTerminal {
        inner: TestBackend::new(65, viewport_height()),
        flushes: 0,
        fail_at: 1,
    };
    let mut terminal = Terminal::new(backend).unwrap();
    let polls = Rc::new(Counter::new(0));

    assert!(
        app.run_on(&mut terminal, CountingPolls(Rc::clone(&polls)))
            .is_err()
    );
    assert_eq!(polls.get(), 0);
    assert_eq!(app.state().terminal_width(), 0);
}
