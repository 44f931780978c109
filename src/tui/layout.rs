//! Width arithmetic for the dashboard lines.
//!
//! A gauge line is `pad + label + " " + bar + percent`, so the bar gets
//! whatever the terminal width leaves after padding on both sides, the label
//! column, the separating space and the percentage.

use super::widgets::gauge::{MAX_WIDTH, MIN_WIDTH, PERCENT_WIDTH};

/// Prefix of the banner line.
pub const ERROR_PREFIX: &str = "Error: ";
/// The banner is never cut below this many characters.
pub const MIN_BANNER_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    /// Blank columns on each side.
    pub padding: u16,
    /// Column reserved for metric labels.
    pub label_width: u16,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            padding: 2,
            label_width: 15,
        }
    }
}

impl DashboardLayout {
    pub fn new(padding: u16, label_width: u16) -> Self {
        Self {
            padding,
            label_width,
        }
    }

    /// Columns on a gauge line not available to the bar.
    pub fn overhead(&self) -> u16 {
        self.padding
            .saturating_mul(2)
            .saturating_add(self.label_width)
            .saturating_add(1 + PERCENT_WIDTH)
    }

    /// Bar width for a terminal `terminal_width` columns wide.
    pub fn gauge_width(&self, terminal_width: u16) -> u16 {
        terminal_width
            .saturating_sub(self.overhead())
            .clamp(MIN_WIDTH, MAX_WIDTH)
    }

    /// Longest banner that fits, or `None` while the width is unknown.
    pub fn banner_limit(&self, terminal_width: u16) -> Option<usize> {
        if terminal_width == 0 {
            return None;
        }
        let room = usize::from(terminal_width)
            .saturating_sub(usize::from(self.padding) * 2 + ERROR_PREFIX.len());
        Some(room.max(MIN_BANNER_LEN))
    }

    /// Left padding as a string.
    pub fn pad(&self) -> String {
        " ".repeat(usize::from(self.padding))
    }
}
