//! Dashboard state and its event handlers.
//!
//! Handlers never touch the scheduler directly: they mutate the state and
//! return the [`Command`]s the scheduler should carry out next.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::collector::{Metric, MetricSource};
use crate::util::truncate;

use super::event::{Command, Event};
use super::layout::DashboardLayout;
use super::widgets::Gauge;

/// Separator between errors of the same tick.
const ERROR_SEPARATOR: &str = " | ";

/// Runtime settings of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Time between metric samples.
    pub refresh_interval: Duration,
    /// Minimum time between animation frames.
    pub frame_interval: Duration,
    pub layout: DashboardLayout,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(1),
            frame_interval: Duration::from_secs(1) / 60,
            layout: DashboardLayout::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    gauges: BTreeMap<Metric, Gauge>,
    terminal_width: u16,
    error_banner: String,
    layout: DashboardLayout,
    refresh_interval: Duration,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig) -> Self {
        let gauges = Metric::all()
            .iter()
            .map(|&metric| (metric, Gauge::default()))
            .collect();
        Self {
            gauges,
            terminal_width: 0,
            error_banner: String::new(),
            layout: config.layout,
            refresh_interval: config.refresh_interval,
        }
    }

    pub fn gauge(&self, metric: Metric) -> Option<&Gauge> {
        self.gauges.get(&metric)
    }

    /// Gauges in display order.
    pub fn gauges(&self) -> impl Iterator<Item = (Metric, &Gauge)> {
        self.gauges.iter().map(|(&metric, gauge)| (metric, gauge))
    }

    pub fn terminal_width(&self) -> u16 {
        self.terminal_width
    }

    pub fn error_banner(&self) -> &str {
        &self.error_banner
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.gauges.values().any(Gauge::is_animating)
    }

    /// Dispatches one event to its handler.
    pub fn handle(&mut self, event: Event, source: &mut dyn MetricSource) -> Vec<Command> {
        match event {
            Event::Tick => self.handle_tick(source),
            Event::Frame { elapsed } => self.handle_animation_frame(elapsed),
            Event::Resize(width) => {
                self.handle_resize(width);
                Vec::new()
            }
            Event::Quit => vec![self.handle_quit()],
        }
    }

    /// Samples every metric and retargets its gauge.
    ///
    /// Always ends with a `ScheduleTick`, even when every read failed.
    pub fn handle_tick(&mut self, source: &mut dyn MetricSource) -> Vec<Command> {
        self.error_banner.clear();
        let mut commands = Vec::new();

        for (&metric, gauge) in self.gauges.iter_mut() {
            match source.sample(metric) {
                Ok(percent) => {
                    debug!(metric = ?metric, percent, "tick sample");
                    commands.extend(gauge.set_target(percent / 100.0));
                }
                Err(e) => {
                    warn!(metric = ?metric, error = %e, "metric read failed");
                    let message = format!("{} Err: {}", metric.error_label(), e);
                    Self::append_error(
                        &mut self.error_banner,
                        &message,
                        self.layout.banner_limit(self.terminal_width),
                    );
                }
            }
        }

        commands.push(Command::ScheduleTick(self.refresh_interval));
        commands
    }

    /// Records the new terminal width and resizes every gauge.
    pub fn handle_resize(&mut self, width: u16) {
        self.terminal_width = width;
        let gauge_width = self.layout.gauge_width(width);
        for gauge in self.gauges.values_mut() {
            gauge.resize(gauge_width);
        }
        debug!(width, gauge_width, "resized");
    }

    /// Advances every gauge by one frame.
    pub fn handle_animation_frame(&mut self, elapsed: Duration) -> Vec<Command> {
        self.gauges
            .values_mut()
            .filter_map(|gauge| gauge.advance_frame(elapsed))
            .collect()
    }

    pub fn handle_quit(&self) -> Command {
        Command::Terminate
    }

    /// Plain-text rendition of the dashboard, one line per `\n`.
    pub fn render(&self) -> String {
        super::render::plain_text(self)
    }

    fn append_error(banner: &mut String, message: &str, limit: Option<usize>) {
        if !banner.is_empty() {
            banner.push_str(ERROR_SEPARATOR);
        }
        banner.push_str(message);
        if let Some(limit) = limit {
            *banner = truncate(banner, limit);
        }
    }
}
