//! Events delivered to the dashboard and the commands it hands back.
//!
//! Terminal input is read on a separate thread and forwarded through a
//! channel; everything else (ticks, animation frames) is produced by the
//! [`Scheduler`](super::scheduler::Scheduler) on the thread that owns the
//! dashboard state.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent};
use tracing::warn;

use super::input::is_quit_key;

/// Application events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Refresh timer fired: sample the metrics.
    Tick,
    /// One animation step; `elapsed` is the time since the frame was requested.
    Frame { elapsed: Duration },
    /// Terminal resize (width in columns).
    Resize(u16),
    /// Quit key pressed or termination signal received.
    Quit,
}

/// Follow-up work returned by event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Deliver an animation frame at the next frame slot.
    RequestFrame,
    /// Arm the refresh timer.
    ScheduleTick(Duration),
    /// Stop the event loop.
    Terminate,
}

/// Source of externally produced events.
pub trait EventSource {
    /// Waits up to `timeout` for an event; `None` waits indefinitely.
    ///
    /// Returns `Ok(None)` when the timeout elapsed without input.
    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Event>>;
}

/// Event handler that reads terminal input in a separate thread.
///
/// A failed terminal read is forwarded as well and surfaces from
/// [`EventSource::poll`] as an error, so the loop ends instead of running on
/// without input.
pub struct EventHandler {
    rx: Receiver<io::Result<Event>>,
    tx: Sender<io::Result<Event>>,
}

impl EventHandler {
    /// Spawns the input thread.
    ///
    /// Only quit keys and resizes are forwarded; other input is dropped here.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            loop {
                let evt = match event::read() {
                    Ok(evt) => evt,
                    Err(e) => {
                        warn!(error = %e, "terminal input failed");
                        let _ = event_tx.send(Err(e));
                        break;
                    }
                };
                let event = match evt {
                    CrosstermEvent::Key(key) if is_quit_key(&key) => Event::Quit,
                    CrosstermEvent::Resize(w, _) => Event::Resize(w),
                    _ => continue,
                };
                if event_tx.send(Ok(event)).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for injecting events from elsewhere (signal handlers).
    pub fn sender(&self) -> Sender<io::Result<Event>> {
        self.tx.clone()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for EventHandler {
    fn poll(&mut self, timeout: Option<Duration>) -> io::Result<Option<Event>> {
        match timeout {
            Some(timeout) => match self.rx.recv_timeout(timeout) {
                Ok(event) => event.map(Some),
                Err(RecvTimeoutError::Timeout) => Ok(None),
                // `tx` is held by `self`, so the channel cannot disconnect.
                Err(RecvTimeoutError::Disconnected) => Ok(Some(Event::Quit)),
            },
            None => self.rx.recv().unwrap_or(Ok(Event::Quit)).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_handler() -> EventHandler {
        // Channel only: no input thread, so tests never touch the terminal.
        let (tx, rx) = mpsc::channel();
        EventHandler { rx, tx }
    }

    #[test]
    fn poll_times_out_without_input() {
        let mut handler = detached_handler();
        let got = handler.poll(Some(Duration::from_millis(1))).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn injected_events_are_delivered_in_order() {
        let mut handler = detached_handler();
        let tx = handler.sender();
        tx.send(Ok(Event::Resize(120))).unwrap();
        tx.send(Ok(Event::Quit)).unwrap();

        assert_eq!(handler.poll(None).unwrap(), Some(Event::Resize(120)));
        assert_eq!(
            handler.poll(Some(Duration::ZERO)).unwrap(),
            Some(Event::Quit)
        );
    }

    #[test]
    fn input_failure_surfaces_as_error() {
        let mut handler = detached_handler();
        handler
            .sender()
            .send(Err(io::Error::other("tty closed")))
            .unwrap();

        let err = handler.poll(Some(Duration::from_millis(50))).unwrap_err();
        assert_eq!(err.to_string(), "tty closed");
    }

    #[test]
    fn input_failure_ends_the_scheduler_loop() {
        use crate::tui::scheduler::Scheduler;

        let mut handler = detached_handler();
        handler.sender().send(Err(io::Error::other("tty closed"))).unwrap();
        let mut scheduler = Scheduler::new(handler, Duration::from_secs(3600));
        scheduler.apply([Command::ScheduleTick(Duration::from_secs(3600))]);

        assert!(scheduler.next_event().is_err());
    }
}
