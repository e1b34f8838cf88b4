// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use edb_app::{FetchedTables, RawTable};

pub const SUMMARY_HEADER: [&str; 2] = ["plage", "etat_sanitaire"];

pub const DETAILS_HEADER: [&str; 8] = [
    "site",
    "point_de_prelevement",
    "date",
    "heure",
    "e_coli_npp_100ml",
    "enterocoques_npp_100ml",
    "id_point_prelevement",
    "desc_point_prelevement",
];

const BEACHES: [&str; 8] = [
    "Anse Vata",
    "Baie des Citrons",
    "Magenta",
    "Kuendu Beach",
    "Château Royal",
    "Ouémo",
    "Rocher à la Voile",
    "Sainte-Marie",
];

const SAMPLING_POINTS: [&str; 6] = [
    "face au restaurant",
    "milieu de plage",
    "près du ponton",
    "extrémité nord",
    "extrémité sud",
    "côté parking",
];

const STATUSES: [&str; 3] = [
    "Baignade autorisée",
    "Baignade déconseillée",
    "Baignade interdite",
];

/// Summary table shaped like the published `resume.csv`.
pub fn sample_summary() -> RawTable {
    RawTable::from_strs(&[
        &SUMMARY_HEADER,
        &["Anse Vata", "Baignade autorisée"],
        &["Baie des Citrons", "Baignade autorisée"],
        &["Magenta", "Baignade interdite"],
    ])
}

/// Detail table shaped like the published `details.csv`.
pub fn sample_details() -> RawTable {
    RawTable::from_strs(&[
        &DETAILS_HEADER,
        &[
            "PLAGE DE L'ANSE VATA",
            "PLAGE DE L'ANSE VATA 1",
            "03/11/2025",
            "08:15",
            "10",
            "<10",
            "PRE-001",
            "face au restaurant",
        ],
        &[
            "PLAGE DE LA BAIE DES CITRONS",
            "PLAGE DE LA BAIE DES CITRONS 1",
            "03/11/2025",
            "08:40",
            "620",
            "52",
            "PRE-002",
            "milieu de plage",
        ],
        &[
            "PLAGE DE MAGENTA",
            "PLAGE DE MAGENTA 2",
            "03/11/2025",
            "09:05",
            "1450",
            "480",
            "PRE-003",
            "près du ponton",
        ],
    ])
}

pub fn sample_tables() -> FetchedTables {
    FetchedTables {
        summary: sample_summary(),
        details: sample_details(),
    }
}

/// Serializes a table the way the upstream CSV files are written: comma
/// separated, every field quoted.
pub fn to_csv(table: &RawTable) -> String {
    let mut out = String::new();
    for row in table.rows() {
        let line = row
            .iter()
            .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for larger, varied datasets (demo mode, layout tests).
#[derive(Debug, Clone)]
pub struct SamplingFaker {
    rng: DeterministicRng,
}

impl SamplingFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn tables(&mut self, sampling_rows: usize) -> FetchedTables {
        FetchedTables {
            summary: self.summary(),
            details: self.details(sampling_rows),
        }
    }

    pub fn summary(&mut self) -> RawTable {
        let mut rows = vec![header(&SUMMARY_HEADER)];
        for beach in BEACHES {
            rows.push(vec![beach.to_owned(), self.pick(&STATUSES).to_owned()]);
        }
        RawTable::new(rows)
    }

    pub fn details(&mut self, sampling_rows: usize) -> RawTable {
        let mut rows = vec![header(&DETAILS_HEADER)];
        for index in 0..sampling_rows {
            let beach = self.pick(&BEACHES).to_uppercase();
            let point = self.pick(&SAMPLING_POINTS);
            rows.push(vec![
                format!("PLAGE DE {beach}"),
                format!("PLAGE DE {beach} {}", index + 1),
                format!("{:02}/11/2025", 1 + self.rng.int_n(28)),
                format!("{:02}:{:02}", 7 + self.rng.int_n(4), self.rng.int_n(60)),
                self.measurement(1_800),
                self.measurement(700),
                format!("PRE-{:03}", index + 1),
                point.to_owned(),
            ]);
        }
        RawTable::new(rows)
    }

    /// Mostly low counts with the occasional spike; a few values use the
    /// `<10` notation of the lab reports.
    fn measurement(&mut self, max: usize) -> String {
        match self.rng.int_n(10) {
            0 => "<10".to_owned(),
            1 | 2 => (max / 2 + self.rng.int_n(max / 2)).to_string(),
            _ => (10 + self.rng.int_n(max / 4)).to_string(),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| (*column).to_owned()).collect()
}
