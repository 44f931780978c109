//! Main TUI application.

use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::{Terminal, TerminalOptions, Viewport};
use tracing::info;

use crate::collector::MetricSource;

use super::event::{Event, EventHandler, EventSource};
use super::render::{render, viewport_height};
use super::scheduler::Scheduler;
use super::state::{DashboardConfig, DashboardState};

/// Main TUI application.
pub struct App {
    source: Box<dyn MetricSource>,
    state: DashboardState,
    config: DashboardConfig,
}

impl App {
    /// Creates a new App sampling from `source`.
    pub fn new(source: Box<dyn MetricSource>, config: DashboardConfig) -> Self {
        Self {
            source,
            state: DashboardState::new(&config),
            config,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Runs the dashboard on the current terminal until quit.
    ///
    /// The dashboard is drawn inline below the cursor, so the last frame stays
    /// visible after exit.
    pub fn run(mut self, events: EventHandler) -> io::Result<()> {
        enable_raw_mode()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(viewport_height()),
            },
        );

        let result = match terminal {
            Ok(mut terminal) => {
                let result = self.run_on(&mut terminal, events);
                // Leave the cursor below the dashboard.
                let restored = terminal.show_cursor().and_then(|_| {
                    let area = terminal.get_frame().area();
                    terminal.set_cursor_position((0, area.bottom().saturating_sub(1)))
                });
                result.and(restored)
            }
            Err(e) => Err(e),
        };

        disable_raw_mode()?;
        println!();
        result
    }

    /// Drives the event loop against any backend and event source.
    ///
    /// Draws once up front, then after every event except the one that stops
    /// the loop.
    pub fn run_on<B: Backend, S: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        source: S,
    ) -> io::Result<()> {
        let mut scheduler = Scheduler::new(source, self.config.frame_interval);

        if let Ok(size) = terminal.size() {
            scheduler.push(Event::Resize(size.width));
        }
        scheduler.push(Event::Tick);
        info!(
            refresh_ms = self.config.refresh_interval.as_millis() as u64,
            frame_ms = self.config.frame_interval.as_millis() as u64,
            "dashboard started"
        );

        terminal.draw(|frame| render(frame, &self.state))?;

        while let Some(event) = scheduler.next_event()? {
            let commands = self.state.handle(event, self.source.as_mut());
            scheduler.apply(commands);
            if !scheduler.is_running() {
                break;
            }
            terminal.draw(|frame| render(frame, &self.state))?;
        }

        info!("dashboard stopped");
        Ok(())
    }
}
