// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::VecDeque;
use std::fmt;

use time::OffsetDateTime;
use time::macros::format_description;

pub const ACTION_LOG_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: OffsetDateTime,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", clock_time(self.at), self.message)
    }
}

/// The most recent user-visible actions, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLog {
    entries: VecDeque<LogEntry>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTION_LOG_CAPACITY),
        }
    }
}

impl ActionLog {
    pub fn push(&mut self, at: OffsetDateTime, message: impl Into<String>) {
        if self.entries.len() == ACTION_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }
}

pub fn clock_time(at: OffsetDateTime) -> String {
    at.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "--:--:--".to_owned())
}

pub fn day_and_time(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[day]/[month]/[year] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| "--/--/---- --:--:--".to_owned())
}
