// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Box-drawn text tables sized by display width.

use edb_app::{Metric, POINT_LABEL, RawTable, SITE_LABEL, Severity};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub const SUMMARY_SITE_KEY: &str = "plage";
pub const SUMMARY_STATUS_KEY: &str = "etat_sanitaire";
pub const SWIMMING_ALLOWED: &str = "Baignade autorisée";

const COLUMN_SEPARATOR: &str = " │ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos<'a> {
    pub row: usize,
    pub column: usize,
    /// Header key of the column, before any display relabelling.
    pub key: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl TableLayout {
    /// Lays out `rows` (header first). The header fixes the column count;
    /// missing cells are rendered empty.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let columns = rows.first().map_or(0, Vec::len);
        let mut widths = vec![0; columns];
        for row in &rows {
            for (column, width) in widths.iter_mut().enumerate() {
                let cell = row.get(column).map(String::as_str).unwrap_or("");
                *width = (*width).max(cell.width());
            }
        }
        Self { rows, widths }
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Total display width of every rendered line.
    #[cfg(test)]
    pub(crate) fn line_width(&self) -> usize {
        if self.widths.is_empty() {
            return 0;
        }
        self.widths.iter().map(|width| width + 3).sum::<usize>() + 1
    }

    pub fn render(&self, keys: &[String], style: impl Fn(CellPos<'_>) -> Style) -> Vec<Line<'static>> {
        if self.widths.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        lines.push(self.rule('┌', '┬', '┐'));
        for (row_index, row) in self.rows.iter().enumerate() {
            let mut spans = Vec::with_capacity(self.widths.len() * 2 + 1);
            spans.push(Span::styled("│ ", border_style()));
            for (column, width) in self.widths.iter().enumerate() {
                if column > 0 {
                    spans.push(Span::styled(COLUMN_SEPARATOR, border_style()));
                }
                let text = row.get(column).map(String::as_str).unwrap_or("");
                let key = keys.get(column).map(String::as_str).unwrap_or("");
                let cell_style = style(CellPos {
                    row: row_index,
                    column,
                    key,
                    text,
                });
                spans.push(Span::styled(pad(text, *width), cell_style));
            }
            spans.push(Span::styled(" │", border_style()));
            lines.push(Line::from(spans));
            if row_index == 0 {
                lines.push(self.rule('├', '┼', '┤'));
            }
        }
        lines.push(self.rule('└', '┴', '┘'));
        lines
    }

    fn rule(&self, left: char, middle: char, right: char) -> Line<'static> {
        let mut text = String::new();
        text.push(left);
        for (column, width) in self.widths.iter().enumerate() {
            if column > 0 {
                text.push(middle);
            }
            text.push_str(&"─".repeat(width + 2));
        }
        text.push(right);
        Line::from(Span::styled(text, border_style()))
    }
}

pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

pub fn border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Good => Color::LightBlue,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub fn severity_style(severity: Severity) -> Style {
    Style::default()
        .fg(severity_color(severity))
        .add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn cell_style() -> Style {
    Style::default().fg(Color::White)
}

fn summary_header_label(key: &str) -> &str {
    match key {
        SUMMARY_SITE_KEY => "Plage",
        SUMMARY_STATUS_KEY => "Status",
        other => other,
    }
}

/// Summary table: one row per beach with its sanitary status.
pub fn summary_table(table: &RawTable) -> Vec<Line<'static>> {
    if table.is_empty() {
        return Vec::new();
    }
    let keys = table.header().to_vec();
    let mut rows = table.rows().to_vec();
    rows[0] = keys
        .iter()
        .map(|key| summary_header_label(key).to_owned())
        .collect();

    TableLayout::new(rows).render(&keys, |cell| {
        if cell.row == 0 {
            header_style()
        } else if cell.key == SUMMARY_STATUS_KEY && cell.text == SWIMMING_ALLOWED {
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            cell_style()
        }
    })
}

/// Detail table, already reshaped and ordered. `selected` is the 1-based
/// data row to highlight.
pub fn detail_table(table: &RawTable, selected: usize) -> Vec<Line<'static>> {
    if table.is_empty() {
        return Vec::new();
    }
    let keys = table.header().to_vec();
    TableLayout::new(table.rows().to_vec()).render(&keys, |cell| {
        if cell.row == 0 {
            return header_style();
        }
        let style = if let Some(metric) = Metric::from_label(cell.key) {
            severity_style(Severity::classify_cell(metric, cell.text))
        } else if cell.key == SITE_LABEL {
            cell_style()
        } else if cell.key == POINT_LABEL {
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD)
        } else {
            cell_style()
        };
        if cell.row == selected {
            highlight(style, cell.key == SITE_LABEL)
        } else {
            style
        }
    })
}

fn highlight(style: Style, emphasize: bool) -> Style {
    let style = style.bg(Color::Gray).add_modifier(Modifier::UNDERLINED);
    if emphasize {
        style.fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Wraps lines in a single-line border, padding each to `inner_width`.
pub fn boxed(lines: Vec<Line<'static>>, inner_width: usize, color: Color) -> Vec<Line<'static>> {
    let inner_width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .max(inner_width);
    let frame = Style::default().fg(color);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(Line::from(Span::styled(
        format!("┌{}┐", "─".repeat(inner_width + 2)),
        frame,
    )));
    for line in lines {
        let fill = inner_width - line.width();
        let mut spans = vec![Span::styled("│ ", frame)];
        spans.extend(line.spans);
        spans.push(Span::raw(" ".repeat(fill)));
        spans.push(Span::styled(" │", frame));
        out.push(Line::from(spans));
    }
    out.push(Line::from(Span::styled(
        format!("└{}┘", "─".repeat(inner_width + 2)),
        frame,
    )));
    out
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
