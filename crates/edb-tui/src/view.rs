// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use edb_app::{
    AppState, Metric, Popup, RawTable, Severity, clock_time, day_and_time, parse_measurement,
    reshape_details,
};
use qrcode::render::unicode::Dense1x2;
use qrcode::{EcLevel, QrCode};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use time::macros::format_description;

use crate::histogram::{BAR_WIDTH, histogram_lines};
use crate::layout::{boxed, detail_table, severity_style, summary_table};

pub const PROJECT_URL: &str = "https://github.com/adriens/edb-noumea-go";

const INTRO: &str = "edb-noumea : qualité des eaux de baignade à Nouméa, dans votre terminal";
const TITLE: &str = "Eaux de baignade - Nouméa";
const KEY_HINTS: &str = "[q] Quitter  [r] Rafraîchir  [a] À propos  [l] Légende  [s] Stats  [e] Trier E. coli  [n] Trier Enté.  [↑/↓] Sélection détail";
const CLOSE_HINT: &str = "Appuyez sur une touche pour fermer.";

/// The single branch rendered for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Stats,
    About,
    Legend,
    Error,
    Loading,
    Main,
}

impl Screen {
    pub fn select(state: &AppState) -> Self {
        match state.popup {
            Popup::Stats => Self::Stats,
            Popup::About => Self::About,
            Popup::Legend => Self::Legend,
            Popup::Closed if !state.has_data() && state.last_error.is_some() => Self::Error,
            Popup::Closed if !state.has_data() => Self::Loading,
            Popup::Closed => Self::Main,
        }
    }
}

/// Render inputs that do not change between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewData {
    pub about_qr: String,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            about_qr: qr_art(PROJECT_URL).unwrap_or_else(|| "[QR code non disponible]".to_owned()),
        }
    }
}

pub fn qr_art(url: &str) -> Option<String> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::M).ok()?;
    Some(
        code.render::<Dense1x2>()
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .build(),
    )
}

pub fn draw(frame: &mut Frame<'_>, state: &AppState, view: &ViewData) {
    let area = frame.area();
    match Screen::select(state) {
        Screen::Stats => draw_popup(frame, area, stats_lines(state), Color::LightCyan, false),
        Screen::About => draw_popup(frame, area, about_lines(view), Color::LightGreen, true),
        Screen::Legend => draw_popup(frame, area, legend_lines(), Color::LightCyan, false),
        Screen::Error => {
            let message = state.last_error.as_deref().unwrap_or_default();
            frame.render_widget(
                Paragraph::new(format!("Erreur: {message}")).style(Style::default().fg(Color::Red)),
                area,
            );
        }
        Screen::Loading => {
            frame.render_widget(Paragraph::new("Chargement des données..."), area);
        }
        Screen::Main => draw_main(frame, area, state),
    }
}

fn draw_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    lines: Vec<Line<'static>>,
    color: Color,
    fit_content: bool,
) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let content_height = lines.len() as u16;
    let (width, height, padding) = if fit_content {
        (
            content_width + 10,
            content_height + 4,
            Padding::new(4, 4, 1, 1),
        )
    } else {
        (
            (area.width / 2).max(content_width + 10),
            (area.height / 2).max(content_height + 6),
            Padding::new(4, 4, 2, 2),
        )
    };
    let popup = centered_area(width, height, area);
    let alignment = if fit_content {
        Alignment::Center
    } else {
        Alignment::Left
    };

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(alignment)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color))
                    .padding(padding),
            ),
        popup,
    );
}

fn draw_main(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let footer = footer_lines(state);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(footer.len() as u16 + 2),
        ])
        .split(area);

    let main = main_view(state);
    // Border and vertical padding take four rows.
    let visible = layout[0].height.saturating_sub(4) as usize;
    let scroll = main
        .focus_line
        .map(|line| (line + 2).saturating_sub(visible))
        .unwrap_or(0);

    frame.render_widget(
        Paragraph::new(Text::from(main.lines))
            .scroll((scroll as u16, 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::LightMagenta))
                    .padding(Padding::new(2, 2, 1, 1)),
            ),
        layout[0],
    );
    frame.render_widget(
        Paragraph::new(Text::from(footer)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(2)),
        ),
        layout[1],
    );
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainView {
    pub lines: Vec<Line<'static>>,
    /// Line of the selected detail row, used to keep it on screen.
    pub focus_line: Option<usize>,
}

/// Main dashboard body: banners, both tables, the panel for the selected
/// measurement, and key hints.
pub fn main_view(state: &AppState) -> MainView {
    let mut lines = vec![
        Line::styled(
            INTRO,
            Style::default()
                .fg(Color::LightYellow)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )
        .centered(),
        Line::styled(
            TITLE,
            Style::default()
                .fg(Color::LightCyan)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .centered(),
        refresh_banner(state),
    ];
    if let Some(error) = &state.last_error {
        lines.push(Line::styled(
            format!("Dernière erreur : {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::default());
    lines.extend(summary_table(&state.summary));
    lines.push(Line::default());

    let details = state.sort.apply(&reshape_details(&state.details));
    let mut focus_line = None;
    if !details.is_empty() {
        // Top rule, header and separator precede the first data row.
        let first_data_line = lines.len() + 3;
        lines.extend(detail_table(&details, state.selected_row));
        if state.selected_row < details.row_count() {
            focus_line = Some(first_data_line + state.selected_row - 1);
            lines.push(Line::default());
            lines.extend(detail_panel(&details, state.selected_row, state.viewport.width));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(KEY_HINTS));
    MainView { lines, focus_line }
}

fn refresh_banner(state: &AppState) -> Line<'static> {
    let style = Style::default()
        .fg(Color::LightGreen)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);
    let text = match state.last_refresh {
        Some(at) => format!(
            " Données récupérées depuis GitHub le {} à {} (source : github.com/adriens/edb-noumea-data) ",
            at.format(format_description!("[day]/[month]/[year]"))
                .unwrap_or_default(),
            clock_time(at)
        ),
        None => " Données non encore récupérées. ".to_owned(),
    };
    Line::styled(text, style)
}

/// Every field of the selected row, with an intensity bar under each
/// bacteria count.
pub fn detail_panel(details: &RawTable, selected: usize, viewport_width: u16) -> Vec<Line<'static>> {
    let box_width = usize::from(viewport_width / 2);
    let bar_width = box_width.saturating_sub(6).max(8);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (column, label) in details.header().iter().enumerate() {
        let value = details.cell(selected, column);
        lines.push(Line::from(vec![
            Span::styled(label.clone(), bold),
            Span::raw(format!(" : {value}")),
        ]));
        if let Some(metric) = Metric::from_label(label) {
            let measured = parse_measurement(value);
            lines.push(Line::styled(
                "━".repeat(intensity_bar_len(metric, measured, bar_width)),
                severity_style(Severity::classify(metric, measured)),
            ));
        }
    }
    boxed(lines, box_width.saturating_sub(4), Color::LightCyan)
}

/// Share of the metric's scale covered by `value`: full above the
/// ceiling, empty below zero, otherwise at least one column.
pub fn intensity_bar_len(metric: Metric, value: i64, max_len: usize) -> usize {
    let ceiling = metric.ceiling();
    if value > ceiling {
        max_len
    } else if value < 0 {
        0
    } else {
        ((value as usize * max_len) / ceiling as usize).max(1)
    }
}

pub fn footer_lines(state: &AppState) -> Vec<Line<'static>> {
    let last = state
        .last_refresh
        .map(day_and_time)
        .unwrap_or_else(|| "-".to_owned());
    let mut lines = vec![Line::from(format!(
        "Dernier refresh : {last} | Prochain : {}",
        day_and_time(state.next_refresh)
    ))];
    lines.extend(state.log.entries().map(|entry| Line::from(entry.to_string())));
    lines
}

pub fn metric_scores(details: &RawTable, metric: Metric) -> Vec<i64> {
    details
        .column_index(metric.label())
        .map(|column| details.column_values(column).map(parse_measurement).collect())
        .unwrap_or_default()
}

pub fn stats_lines(state: &AppState) -> Vec<Line<'static>> {
    let details = reshape_details(&state.details);
    let mut lines = Vec::new();
    for (index, metric) in Metric::ALL.into_iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(format!(
            "Histogramme {} (≤{}) :",
            metric.label(),
            metric.ceiling()
        )));
        lines.extend(histogram_lines(
            metric,
            &metric_scores(&details, metric),
            BAR_WIDTH,
        ));
    }
    lines.push(Line::default());
    lines.push(Line::from(CLOSE_HINT));
    lines
}

pub fn legend_lines() -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(Metric::EColi.label(), bold),
            Span::raw(
                " : Nombre de bactéries Escherichia coli pour 100ml d'eau (NPP = Nombre le Plus Probable)",
            ),
        ]),
        Line::from(vec![
            Span::styled(Metric::Enterococci.label(), bold),
            Span::raw(" : Nombre d'entérocoques pour 100ml d'eau (NPP = Nombre le Plus Probable)"),
        ]),
        Line::default(),
        Line::from("Seuils européens (Directive 2006/7/CE) :"),
    ];
    for metric in Metric::ALL {
        let (good, warning) = metric.cutoffs();
        lines.push(Line::from(vec![
            Span::raw("- "),
            Span::styled(metric.label(), bold),
            Span::raw(format!(" : ≤ {good} (")),
            Span::styled(Severity::Good.label(), severity_style(Severity::Good)),
            Span::raw(format!("), ≤ {warning} (")),
            Span::styled(Severity::Warning.label(), severity_style(Severity::Warning)),
            Span::raw(format!("), > {warning} (")),
            Span::styled(
                Severity::Critical.label(),
                severity_style(Severity::Critical),
            ),
            Span::raw(")"),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(CLOSE_HINT));
    lines
}

pub fn about_lines(view: &ViewData) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::default(),
        Line::from("Développé par Adrien S."),
        Line::from(format!("GitHub : {PROJECT_URL}")),
        Line::default(),
        Line::from("Scannez le QR code pour accéder au projet :"),
    ];
    lines.extend(view.about_qr.lines().map(|line| Line::from(line.to_owned())));
    lines.push(Line::default());
    lines.push(Line::from(
        "Appuyez sur n'importe quelle touche pour revenir.",
    ));
    lines
}

fn centered_area(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
