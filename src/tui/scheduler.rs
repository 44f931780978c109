//! Cooperative event scheduler.
//!
//! Turns the dashboard's commands into timers and hands out one event at a
//! time. The caller handles each event to completion, feeds the returned
//! commands back through [`Scheduler::apply`], and asks for the next event.
//!
//! Two kinds of timers exist while running:
//! - the refresh tick, exactly one pending at a time, re-armed by
//!   `Command::ScheduleTick`;
//! - the animation frame, at most one pending at a time. Several
//!   `RequestFrame`s arriving before it fires collapse into one frame, since a
//!   frame already advances every gauge.
//!
//! External input is polled with a timeout running up to the earliest timer,
//! so a quit key is seen even while frames are continuously due.

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use tracing::debug;

use super::event::{Command, Event, EventSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Terminated,
}

pub struct Scheduler<S: EventSource> {
    source: S,
    state: SchedulerState,
    queue: VecDeque<Event>,
    next_tick: Option<Instant>,
    /// When the pending frame was requested.
    frame_requested: Option<Instant>,
    frame_interval: Duration,
}

impl<S: EventSource> Scheduler<S> {
    pub fn new(source: S, frame_interval: Duration) -> Self {
        Self {
            source,
            state: SchedulerState::Running,
            queue: VecDeque::new(),
            next_tick: None,
            frame_requested: None,
            frame_interval,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn has_pending_tick(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_requested.is_some()
    }

    /// Queues an event ahead of any timer.
    pub fn push(&mut self, event: Event) {
        if self.is_running() {
            self.queue.push_back(event);
        }
    }

    /// Carries out commands returned by an event handler.
    pub fn apply(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            if !self.is_running() {
                return;
            }
            match command {
                Command::RequestFrame => {
                    if self.frame_requested.is_none() {
                        self.frame_requested = Some(Instant::now());
                    }
                }
                Command::ScheduleTick(interval) => {
                    self.next_tick = Some(Instant::now() + interval);
                }
                Command::Terminate => self.terminate(),
            }
        }
    }

    fn terminate(&mut self) {
        debug!("scheduler terminated");
        self.state = SchedulerState::Terminated;
        self.queue.clear();
        self.next_tick = None;
        self.frame_requested = None;
    }

    fn frame_due_at(&self) -> Option<Instant> {
        self.frame_requested
            .map(|requested| requested + self.frame_interval)
    }

    /// Earliest pending timer; frames win ties.
    fn next_deadline(&self) -> Option<Instant> {
        match (self.frame_due_at(), self.next_tick) {
            (Some(frame), Some(tick)) => Some(frame.min(tick)),
            (frame, tick) => frame.or(tick),
        }
    }

    /// Fires the earliest timer if it is due at `now`.
    fn fire_due(&mut self, now: Instant) -> Option<Event> {
        let frame_due = self.frame_due_at().filter(|&due| due <= now);
        let tick_due = self.next_tick.filter(|&due| due <= now);

        match (frame_due, tick_due) {
            (Some(frame), Some(tick)) if tick < frame => self.fire_tick(),
            (Some(_), _) => self.fire_frame(now),
            (None, Some(_)) => self.fire_tick(),
            (None, None) => None,
        }
    }

    fn fire_frame(&mut self, now: Instant) -> Option<Event> {
        let requested = self.frame_requested.take()?;
        Some(Event::Frame {
            elapsed: now.saturating_duration_since(requested),
        })
    }

    fn fire_tick(&mut self) -> Option<Event> {
        self.next_tick.take().map(|_| Event::Tick)
    }

    /// Blocks until the next event, or returns `None` once terminated.
    pub fn next_event(&mut self) -> io::Result<Option<Event>> {
        loop {
            if !self.is_running() {
                return Ok(None);
            }
            if let Some(event) = self.queue.pop_front() {
                return Ok(Some(event));
            }

            let timeout = self
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()));
            if let Some(event) = self.source.poll(timeout)? {
                return Ok(Some(event));
            }

            if let Some(event) = self.fire_due(Instant::now()) {
                return Ok(Some(event));
            }
        }
    }
}
