//! Terminal User Interface for sysgauge.
//!
//! The dashboard is an event-driven state machine: the [`Scheduler`] hands out
//! one [`Event`] at a time, [`DashboardState`] reduces it and returns
//! [`Command`]s, and the renderer draws the result after every event.

mod app;
mod event;
mod input;
mod layout;
mod render;
mod scheduler;
mod state;
mod style;
pub mod widgets;

pub use app::App;
pub use event::{Command, Event, EventHandler, EventSource};
pub use input::is_quit_key;
pub use layout::DashboardLayout;
pub use render::{dashboard_lines, render, viewport_height};
pub use scheduler::{Scheduler, SchedulerState};
pub use state::{DashboardConfig, DashboardState};
pub use widgets::Gauge;
