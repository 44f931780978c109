//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::collector::Metric;
use crate::util::pad_right;

use super::layout::ERROR_PREFIX;
use super::state::DashboardState;
use super::style::Styles;
use super::widgets::Gauge;

/// Lines needed to show every gauge plus the banner.
///
/// Leading blank line, gauges separated by blank lines, then a blank line and
/// the banner.
pub fn viewport_height() -> u16 {
    let gauges = Metric::all().len() as u16;
    1 + (gauges * 2 - 1) + 2
}

/// Main render function.
pub fn render(frame: &mut Frame, state: &DashboardState) {
    let paragraph = Paragraph::new(dashboard_lines(state));
    frame.render_widget(paragraph, frame.area());
}

/// Styled dashboard lines.
pub fn dashboard_lines(state: &DashboardState) -> Vec<Line<'static>> {
    let layout = state.layout();
    let pad = layout.pad();
    let mut lines = vec![Line::default()];

    for (i, (metric, gauge)) in state.gauges().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let mut spans = vec![
            Span::raw(pad.clone()),
            Span::styled(
                pad_right(metric.label(), usize::from(layout.label_width)),
                Styles::default(),
            ),
            Span::raw(" "),
        ];
        spans.extend(gauge_spans(gauge));
        lines.push(Line::from(spans));
    }

    if !state.error_banner().is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::raw(pad),
            Span::styled(
                format!("{}{}", ERROR_PREFIX, state.error_banner()),
                Styles::error(),
            ),
        ]));
    }

    lines
}

/// Bar cells (gradient-filled, then dimmed) followed by the percentage.
fn gauge_spans(gauge: &Gauge) -> Vec<Span<'static>> {
    let width = gauge.width();
    let filled = gauge.filled_cells();
    let bar = gauge.render();
    let mut cells = bar.chars();
    let mut spans = Vec::with_capacity(usize::from(filled) + 2);

    for i in 0..filled {
        if let Some(cell) = cells.next() {
            spans.push(Span::styled(cell.to_string(), Styles::filled_cell(i, width)));
        }
    }
    let rest: String = cells.collect();
    if !rest.is_empty() {
        spans.push(Span::styled(rest, Styles::empty_cell()));
    }

    spans.push(Span::styled(gauge.percent_label(), Styles::default()));
    spans
}

/// The dashboard as plain text, lines joined with `\n`.
pub fn plain_text(state: &DashboardState) -> String {
    dashboard_lines(state)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{CollectError, MetricSource};
    use crate::tui::state::DashboardConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    struct Fixed(f64, Option<&'static str>);

    impl MetricSource for Fixed {
        fn sample_cpu(&mut self) -> Result<f64, CollectError> {
            match self.1 {
                Some(msg) => Err(CollectError::Parse(msg.to_string())),
                None => Ok(self.0),
            }
        }

        fn sample_memory(&mut self) -> Result<f64, CollectError> {
            Ok(self.0)
        }
    }

    fn settled(percent: f64, error: Option<&'static str>) -> DashboardState {
        let mut state = DashboardState::new(&DashboardConfig::default());
        state.handle_resize(45);
        state.handle_tick(&mut Fixed(percent, error));
        state.handle_animation_frame(Duration::from_secs(1));
        state
    }

    #[test]
    fn viewport_fits_two_gauges_and_banner() {
        assert_eq!(viewport_height(), 6);
    }

    #[test]
    fn plain_text_layout() {
        let text = settled(50.0, None).render();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            format!("  {:<15} {}{}  50%", "CPU:", "█".repeat(10), "░".repeat(10))
        );
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with(&format!("  {:<15} █", "Memory:")));
    }

    #[test]
    fn banner_line_follows_gauges() {
        let text = settled(10.0, Some("bad")).render();
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "  Error: CPU Err: parse error: bad");
    }

    #[test]
    fn filled_cells_carry_gradient() {
        let state = settled(100.0, None);
        let lines = dashboard_lines(&state);
        let cpu = &lines[1];
        // pad, label, space, then 20 filled cells.
        assert_eq!(cpu.spans[3].style, Styles::filled_cell(0, 20));
        assert_eq!(cpu.spans[22].style, Styles::filled_cell(19, 20));
    }

    #[test]
    fn renders_into_terminal_buffer() {
        let state = settled(50.0, None);
        let backend = TestBackend::new(45, viewport_height());
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..45u16)
            .map(|x| buffer[(x, 1u16)].symbol().to_string())
            .collect();
        assert!(row.starts_with("  CPU:"));
        assert!(row.contains("██████████░"));
    }
}
