//! Color scheme and styles.

use ratatui::style::{Color, Style};

/// Dashboard palette.
pub struct Theme;

impl Theme {
    /// Left end of the gauge gradient.
    pub const GRADIENT_START: (u8, u8, u8) = (0x5A, 0x56, 0xE0);
    /// Right end of the gauge gradient.
    pub const GRADIENT_END: (u8, u8, u8) = (0xEE, 0x6F, 0xF8);

    pub const EMPTY: Color = Color::Rgb(0x60, 0x60, 0x60);
    pub const FG: Color = Color::Reset;
    pub const ERROR: Color = Color::LightRed;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Labels and percentages.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG)
    }

    /// Unfilled gauge cells.
    pub fn empty_cell() -> Style {
        Style::default().fg(Theme::EMPTY)
    }

    /// Filled gauge cell `index` of a bar `width` cells wide.
    pub fn filled_cell(index: u16, width: u16) -> Style {
        Style::default().fg(gradient(index, width))
    }

    /// Error banner line.
    pub fn error() -> Style {
        Style::default().fg(Theme::ERROR)
    }
}

/// Color of cell `index` on a gradient spread over the whole bar width.
pub fn gradient(index: u16, width: u16) -> Color {
    let t = if width <= 1 {
        0.0
    } else {
        f64::from(index.min(width - 1)) / f64::from(width - 1)
    };
    let (r0, g0, b0) = Theme::GRADIENT_START;
    let (r1, g1, b1) = Theme::GRADIENT_END;
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        assert_eq!(gradient(0, 40), Color::Rgb(0x5A, 0x56, 0xE0));
        assert_eq!(gradient(39, 40), Color::Rgb(0xEE, 0x6F, 0xF8));
    }

    #[test]
    fn gradient_is_safe_for_degenerate_widths() {
        assert_eq!(gradient(0, 0), Color::Rgb(0x5A, 0x56, 0xE0));
        assert_eq!(gradient(5, 1), Color::Rgb(0x5A, 0x56, 0xE0));
        assert_eq!(gradient(100, 10), Color::Rgb(0xEE, 0x6F, 0xF8));
    }
}
