// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Reverse;

use crate::{Metric, RawTable, parse_measurement};

/// Ordering of the detail rows. At most one metric sort is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Arrival,
    Descending(Metric),
}

impl SortMode {
    pub fn toggle(self, metric: Metric) -> Self {
        if self == Self::Descending(metric) {
            Self::Arrival
        } else {
            Self::Descending(metric)
        }
    }

    /// Orders a reshaped table. The input is never modified, so switching
    /// back to `Arrival` always shows the dataset order.
    pub fn apply(self, table: &RawTable) -> RawTable {
        match self {
            Self::Arrival => table.clone(),
            Self::Descending(metric) => sort_descending(table, metric.label()),
        }
    }
}

/// Stable descending sort of the data rows by the integer value of
/// `column`. Unknown columns leave the order untouched.
pub fn sort_descending(table: &RawTable, column: &str) -> RawTable {
    let Some(index) = table.column_index(column) else {
        return table.clone();
    };

    let mut rows = table.clone().into_rows();
    if let Some(data) = rows.get_mut(1..) {
        data.sort_by_key(|row| {
            Reverse(parse_measurement(
                row.get(index).map(String::as_str).unwrap_or(""),
            ))
        });
    }
    RawTable::new(rows)
}
