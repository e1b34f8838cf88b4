// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Duration, OffsetDateTime};

use crate::log::clock_time;
use crate::{ActionLog, FetchedTables, Metric, RawTable, SortMode};

pub const AUTO_REFRESH_INTERVAL: Duration = Duration::hours(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Popup {
    #[default]
    Closed,
    About,
    Legend,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// Keys the dashboard reacts to, already decoded from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    About,
    Legend,
    Stats,
    Up,
    Down,
    SortBy(Metric),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyAction),
    Resize { width: u16, height: u16 },
    AutoRefreshTick,
    FetchSucceeded(FetchedTables),
    FetchFailed { error: String },
}

/// Follow-up work requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    FetchTables,
    ScheduleAutoRefresh,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub summary: RawTable,
    pub details: RawTable,
    pub last_error: Option<String>,
    pub last_refresh: Option<OffsetDateTime>,
    pub next_refresh: OffsetDateTime,
    pub log: ActionLog,
    pub viewport: Viewport,
    pub selected_row: usize,
    pub popup: Popup,
    pub auto_refresh: bool,
    pub sort: SortMode,
    pub quit: bool,
}

impl AppState {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            summary: RawTable::default(),
            details: RawTable::default(),
            last_error: None,
            last_refresh: None,
            next_refresh: now + AUTO_REFRESH_INTERVAL,
            log: ActionLog::default(),
            viewport: Viewport::default(),
            selected_row: 1,
            popup: Popup::Closed,
            auto_refresh: true,
            sort: SortMode::Arrival,
            quit: false,
        }
    }

    /// Commands to run once the loop is up: the first fetch, and the
    /// hourly timer when enabled.
    pub fn boot(&mut self, now: OffsetDateTime) -> Vec<AppCommand> {
        self.next_refresh = now + AUTO_REFRESH_INTERVAL;
        if self.auto_refresh {
            vec![AppCommand::FetchTables, AppCommand::ScheduleAutoRefresh]
        } else {
            vec![AppCommand::FetchTables]
        }
    }

    pub fn has_data(&self) -> bool {
        !self.summary.is_empty()
    }

    pub fn dispatch(&mut self, event: AppEvent, now: OffsetDateTime) -> Vec<AppCommand> {
        if self.quit {
            return Vec::new();
        }

        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Resize { width, height } => {
                self.viewport = Viewport { width, height };
                Vec::new()
            }
            AppEvent::AutoRefreshTick => {
                if !self.auto_refresh {
                    return Vec::new();
                }
                self.stamp_refresh(now);
                self.push_log(
                    now,
                    format!(
                        "Rafraîchissement automatique déclenché. Dernier : {}. Prochain : {}.",
                        clock_time(now),
                        clock_time(self.next_refresh)
                    ),
                );
                vec![AppCommand::FetchTables, AppCommand::ScheduleAutoRefresh]
            }
            AppEvent::FetchSucceeded(tables) => {
                self.summary = tables.summary;
                self.details = tables.details;
                self.last_refresh = Some(now);
                self.last_error = None;
                self.selected_row = self.selected_row.clamp(1, self.last_row());
                self.push_log(now, "Données rafraîchies depuis GitHub");
                Vec::new()
            }
            AppEvent::FetchFailed { error } => {
                self.push_log(now, format!("Erreur: {error}"));
                self.last_error = Some(error);
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyAction, now: OffsetDateTime) -> Vec<AppCommand> {
        if self.popup != Popup::Closed {
            self.popup = Popup::Closed;
            return Vec::new();
        }

        match key {
            KeyAction::Quit => {
                self.push_log(now, "Application quittée");
                self.quit = true;
                vec![AppCommand::Quit]
            }
            KeyAction::Refresh => {
                self.stamp_refresh(now);
                self.push_log(
                    now,
                    format!(
                        "Rafraîchissement manuel demandé. Dernier : {}. Prochain : {}.",
                        clock_time(now),
                        clock_time(self.next_refresh)
                    ),
                );
                vec![AppCommand::FetchTables]
            }
            KeyAction::About => self.open(Popup::About),
            KeyAction::Legend => self.open(Popup::Legend),
            KeyAction::Stats => self.open(Popup::Stats),
            KeyAction::Up => {
                if self.selected_row > 1 {
                    self.selected_row -= 1;
                }
                Vec::new()
            }
            KeyAction::Down => {
                if self.selected_row < self.last_row() {
                    self.selected_row += 1;
                }
                Vec::new()
            }
            KeyAction::SortBy(metric) => {
                self.sort = self.sort.toggle(metric);
                Vec::new()
            }
            KeyAction::Other => Vec::new(),
        }
    }

    fn open(&mut self, popup: Popup) -> Vec<AppCommand> {
        self.popup = popup;
        Vec::new()
    }

    /// Index of the last selectable detail row, never below 1.
    fn last_row(&self) -> usize {
        self.details.data_row_count().max(1)
    }

    fn stamp_refresh(&mut self, now: OffsetDateTime) {
        self.last_refresh = Some(now);
        self.next_refresh = now + AUTO_REFRESH_INTERVAL;
    }

    fn push_log(&mut self, now: OffsetDateTime, message: impl Into<String>) {
        self.log.push(now, message);
    }
}
