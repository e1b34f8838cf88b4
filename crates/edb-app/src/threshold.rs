// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    EColi,
    Enterococci,
}

impl Metric {
    pub const ALL: [Self; 2] = [Self::EColi, Self::Enterococci];

    /// Short header shown in the detail table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::EColi => "E. coli",
            Self::Enterococci => "Enté.",
        }
    }

    /// Header spellings used by the dataset over time.
    pub const fn raw_headers(self) -> &'static [&'static str] {
        match self {
            Self::EColi => &["e_coli_npp_100ml", "ec_npp_100ml"],
            Self::Enterococci => &["enterocoques_npp_100ml", "ent_npp_100ml"],
        }
    }

    /// Upper bounds (inclusive) of the good and warning bands, per 100ml.
    pub const fn cutoffs(self) -> (i64, i64) {
        match self {
            Self::EColi => (500, 1000),
            Self::Enterococci => (200, 400),
        }
    }

    /// Top of the scale used by histograms and intensity bars.
    pub const fn ceiling(self) -> i64 {
        self.cutoffs().1
    }

    pub fn from_raw_header(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.raw_headers().contains(&name))
    }

    pub fn from_label(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.label() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

impl Severity {
    pub const fn classify(metric: Metric, value: i64) -> Self {
        let (good, warning) = metric.cutoffs();
        if value <= good {
            Self::Good
        } else if value <= warning {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn classify_cell(metric: Metric, cell: &str) -> Self {
        Self::classify(metric, parse_measurement(cell))
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "excellent",
            Self::Warning => "passable",
            Self::Critical => "baignade interdite",
        }
    }
}

/// Reads the leading integer of a cell the way the dataset is meant to be
/// read: optional whitespace, optional sign, digits. Anything else is 0.
pub fn parse_measurement(cell: &str) -> i64 {
    let trimmed = cell.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|byte| !byte.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::{Metric, Severity, parse_measurement};

    #[test]
    fn e_coli_band_boundaries() {
        assert_eq!(Severity::classify(Metric::EColi, 500), Severity::Good);
        assert_eq!(Severity::classify(Metric::EColi, 501), Severity::Warning);
        assert_eq!(Severity::classify(Metric::EColi, 1000), Severity::Warning);
        assert_eq!(Severity::classify(Metric::EColi, 1001), Severity::Critical);
    }

    #[test]
    fn enterococci_band_boundaries() {
        assert_eq!(Severity::classify(Metric::Enterococci, 200), Severity::Good);
        assert_eq!(
            Severity::classify(Metric::Enterococci, 201),
            Severity::Warning
        );
        assert_eq!(
            Severity::classify(Metric::Enterococci, 400),
            Severity::Warning
        );
        assert_eq!(
            Severity::classify(Metric::Enterococci, 401),
            Severity::Critical
        );
    }

    #[test]
    fn classification_is_monotonic() {
        for metric in Metric::ALL {
            let mut previous = Severity::Good;
            for value in -10..=2_000 {
                let current = Severity::classify(metric, value);
                assert!(current >= previous, "{metric:?} regressed at {value}");
                previous = current;
            }
        }
    }

    #[test]
    fn unparsable_cells_fall_into_good_band() {
        assert_eq!(Severity::classify_cell(Metric::EColi, "<10"), Severity::Good);
        assert_eq!(Severity::classify_cell(Metric::EColi, ""), Severity::Good);
        assert_eq!(
            Severity::classify_cell(Metric::Enterococci, "n/a"),
            Severity::Good
        );
    }

    #[test]
    fn parse_measurement_reads_leading_integer() {
        assert_eq!(parse_measurement("1250"), 1250);
        assert_eq!(parse_measurement("  42"), 42);
        assert_eq!(parse_measurement("15 NPP"), 15);
        assert_eq!(parse_measurement("-3"), -3);
        assert_eq!(parse_measurement("+7"), 7);
        assert_eq!(parse_measurement("<10"), 0);
        assert_eq!(parse_measurement("-"), 0);
        assert_eq!(parse_measurement(""), 0);
    }

    #[test]
    fn header_synonyms_resolve_to_metric() {
        assert_eq!(Metric::from_raw_header("ec_npp_100ml"), Some(Metric::EColi));
        assert_eq!(
            Metric::from_raw_header("e_coli_npp_100ml"),
            Some(Metric::EColi)
        );
        assert_eq!(
            Metric::from_raw_header("ent_npp_100ml"),
            Some(Metric::Enterococci)
        );
        assert_eq!(
            Metric::from_raw_header("enterocoques_npp_100ml"),
            Some(Metric::Enterococci)
        );
        assert_eq!(Metric::from_raw_header("E. coli"), None);
        assert_eq!(Metric::from_label("Enté."), Some(Metric::Enterococci));
    }
}
