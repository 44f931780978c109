//! Animated horizontal gauge.
//!
//! A gauge keeps two fractions: the one currently drawn and the one it is
//! moving toward. Setting a new target does not redraw anything by itself; it
//! asks the scheduler for animation frames, and each frame moves the drawn
//! fraction a little closer until it lands on the target exactly.

use std::time::Duration;

use crate::tui::event::Command;

/// Narrowest bar, in cells.
pub const MIN_WIDTH: u16 = 10;
/// Widest bar, in cells.
pub const MAX_WIDTH: u16 = 80;
/// Cells taken by [`Gauge::percent_label`].
pub const PERCENT_WIDTH: u16 = 5;

/// Fractions closer than this are considered equal.
const EPSILON: f64 = 1e-6;
/// Smallest move per frame. Bounds convergence to `ceil(1 / MIN_STEP)` frames.
pub const MIN_STEP: f64 = 0.002;
/// Time constant of the ease-out: a frame this long closes the whole gap.
const SETTLE_TIME: Duration = Duration::from_millis(150);

const FILLED: char = '█';
const EMPTY: char = '░';

/// Clamps to `[0, 1]`; NaN becomes 0.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    current: f64,
    target: f64,
    width: u16,
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new(MAX_WIDTH)
    }
}

impl Gauge {
    pub fn new(width: u16) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
        }
    }

    /// Fill level currently drawn.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Fill level the gauge is moving toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn is_animating(&self) -> bool {
        (self.target - self.current).abs() > EPSILON
    }

    /// Sets a new target and requests a frame if the gauge has to move.
    pub fn set_target(&mut self, value: f64) -> Option<Command> {
        self.target = clamp_unit(value);
        if self.is_animating() {
            Some(Command::RequestFrame)
        } else {
            self.current = self.target;
            None
        }
    }

    /// Advances the animation by one frame that took `elapsed`.
    ///
    /// Each frame closes `elapsed / SETTLE_TIME` of the remaining gap, but at
    /// least `MIN_STEP`, and never more than the gap itself.
    pub fn advance_frame(&mut self, elapsed: Duration) -> Option<Command> {
        if !self.is_animating() {
            self.current = self.target;
            return None;
        }

        let gap = self.target - self.current;
        let distance = gap.abs();
        let rate = (elapsed.as_secs_f64() / SETTLE_TIME.as_secs_f64()).min(1.0);
        let step = (distance * rate).max(MIN_STEP);

        if step >= distance - EPSILON {
            self.current = self.target;
            None
        } else {
            self.current = clamp_unit(self.current + step.copysign(gap));
            Some(Command::RequestFrame)
        }
    }

    pub fn resize(&mut self, width: u16) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }

    /// Number of filled cells for the current fraction.
    pub fn filled_cells(&self) -> u16 {
        ((self.current * f64::from(self.width)).round() as u16).min(self.width)
    }

    /// Bar of exactly `width` cells.
    pub fn render(&self) -> String {
        let filled = usize::from(self.filled_cells());
        let empty = usize::from(self.width) - filled;
        let mut bar = String::with_capacity(usize::from(self.width) * FILLED.len_utf8());
        bar.extend(std::iter::repeat_n(FILLED, filled));
        bar.extend(std::iter::repeat_n(EMPTY, empty));
        bar
    }

    /// Percentage suffix of the current fill, e.g. `"  42%"`.
    pub fn percent_label(&self) -> String {
        format!(" {:>3.0}%", self.current * 100.0)
    }
}
