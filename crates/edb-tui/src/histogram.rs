// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use edb_app::{BIN_COUNT, Histogram, Metric, Severity};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::layout::severity_color;

pub const BAR_WIDTH: usize = 24;

/// One line per bin: `lo-hi | ████ (count)`, each bar colored by the band
/// of the bin's upper bound.
pub fn histogram_lines(metric: Metric, scores: &[i64], width: usize) -> Vec<Line<'static>> {
    let histogram = Histogram::from_scores(scores.iter().copied(), metric.ceiling());
    (0..BIN_COUNT)
        .map(|bin| {
            let (low, high) = histogram.bin_range(bin);
            let count = histogram.bins()[bin];
            let color = severity_color(Severity::classify(metric, high));
            Line::from(vec![
                Span::raw(format!("{low:>3}-{high:<3} | ")),
                Span::styled(
                    "█".repeat(histogram.bar_len(bin, width)),
                    Style::default().fg(color),
                ),
                Span::raw(format!(" ({count})")),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{BAR_WIDTH, histogram_lines};
    use crate::layout::line_text;
    use edb_app::Metric;
    use ratatui::style::Color;

    #[test]
    fn renders_ten_labelled_bins() {
        let lines = histogram_lines(Metric::EColi, &[0, 0, 1000, 1000], BAR_WIDTH);
        assert_eq!(lines.len(), 10);
        assert_eq!(line_text(&lines[0]), format!("  0-100 | {} (2)", "█".repeat(24)));
        assert_eq!(line_text(&lines[1]), "100-200 |  (0)");
        assert_eq!(line_text(&lines[9]), format!("900-1000 | {} (2)", "█".repeat(24)));
    }

    #[test]
    fn bars_follow_metric_bands() {
        let lines = histogram_lines(Metric::EColi, &[], BAR_WIDTH);
        assert_eq!(lines[4].spans[1].style.fg, Some(Color::LightBlue));
        assert_eq!(lines[5].spans[1].style.fg, Some(Color::Yellow));
        assert_eq!(lines[9].spans[1].style.fg, Some(Color::Yellow));

        let lines = histogram_lines(Metric::Enterococci, &[], BAR_WIDTH);
        assert_eq!(lines[4].spans[1].style.fg, Some(Color::LightBlue));
        assert_eq!(lines[5].spans[1].style.fg, Some(Color::Yellow));
    }
}
