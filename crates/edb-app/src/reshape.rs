// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Turns the raw detail dataset into the display schema.

use crate::{Metric, RawTable};

pub const ID_COLUMN: &str = "id_point_prelevement";
pub const RAW_POINT_COLUMN: &str = "point_de_prelevement";
pub const DATE_COLUMN: &str = "date";
pub const TIME_COLUMN: &str = "heure";
pub const DESCRIPTION_COLUMN: &str = "desc_point_prelevement";

pub const DATE_LABEL: &str = "Date";
pub const SITE_LABEL: &str = "Site";
pub const POINT_LABEL: &str = "Point de prélèvement";

const SITE_PREFIX: &str = "PLAGE DE ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputColumn {
    Pass { source: usize, label: String },
    Date { date: usize, time: Option<usize> },
    Site(usize),
    Description(usize),
}

impl OutputColumn {
    fn label(&self) -> &str {
        match self {
            Self::Pass { label, .. } => label,
            Self::Date { .. } => DATE_LABEL,
            Self::Site(_) => SITE_LABEL,
            Self::Description(_) => POINT_LABEL,
        }
    }

    fn value(&self, table: &RawTable, row: usize) -> String {
        match self {
            Self::Pass { source, .. } => table.cell(row, *source).to_owned(),
            Self::Date { date, time } => {
                let date = table.cell(row, *date);
                match time {
                    Some(time) => format!("{date} {}", table.cell(row, *time)),
                    None => date.to_owned(),
                }
            }
            Self::Site(source) => strip_site_prefix(table.cell(row, *source)).to_owned(),
            Self::Description(source) => capitalize_first(table.cell(row, *source)),
        }
    }
}

/// Builds the display table. Every output row is produced by walking the
/// output header, so rows always have the header's length.
pub fn reshape_details(raw: &RawTable) -> RawTable {
    if raw.is_empty() {
        return RawTable::default();
    }

    let columns = plan_columns(raw);
    let mut rows = Vec::with_capacity(raw.row_count());
    rows.push(
        columns
            .iter()
            .map(|column| column.label().to_owned())
            .collect(),
    );
    for row in 1..raw.row_count() {
        rows.push(columns.iter().map(|column| column.value(raw, row)).collect());
    }
    RawTable::new(rows)
}

fn plan_columns(raw: &RawTable) -> Vec<OutputColumn> {
    let date = raw.column_index(DATE_COLUMN);
    let time = raw.column_index(TIME_COLUMN);
    let description = raw.column_index(DESCRIPTION_COLUMN);

    let mut columns = Vec::with_capacity(raw.header().len() + 1);
    for (index, name) in raw.header().iter().enumerate() {
        if name == ID_COLUMN || name == RAW_POINT_COLUMN {
            continue;
        }
        if Some(index) == date {
            columns.push(OutputColumn::Date {
                date: index,
                time,
            });
            continue;
        }
        if Some(index) == time {
            continue;
        }
        if index == 0
            && let Some(description) = description
        {
            columns.push(OutputColumn::Site(index));
            columns.push(OutputColumn::Description(description));
            continue;
        }
        if Some(index) == description {
            continue;
        }
        let label = Metric::from_raw_header(name)
            .map(|metric| metric.label().to_owned())
            .unwrap_or_else(|| name.clone());
        columns.push(OutputColumn::Pass {
            source: index,
            label,
        });
    }
    columns
}

fn strip_site_prefix(site: &str) -> &str {
    match site.get(..SITE_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(SITE_PREFIX) => &site[SITE_PREFIX.len()..],
        _ => site,
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
