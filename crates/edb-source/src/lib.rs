// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use edb_app::{FetchedTables, RawTable};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const SUMMARY_URL: &str =
    "https://raw.githubusercontent.com/adriens/edb-noumea-data/main/data/resume.csv";
pub const DETAILS_URL: &str =
    "https://raw.githubusercontent.com/adriens/edb-noumea-data/main/data/details.csv";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the two published CSV datasets.
#[derive(Debug, Clone)]
pub struct Client {
    summary_url: Url,
    details_url: Url,
    http: HttpClient,
}

impl Client {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_urls(SUMMARY_URL, DETAILS_URL, timeout)
    }

    pub fn with_urls(summary_url: &str, details_url: &str, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            bail!("fetch timeout must be positive");
        }
        let summary_url = parse_url(summary_url)?;
        let details_url = parse_url(details_url)?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("edb-noumea/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            summary_url,
            details_url,
            http,
        })
    }

    pub fn summary_url(&self) -> &Url {
        &self.summary_url
    }

    pub fn details_url(&self) -> &Url {
        &self.details_url
    }

    /// Both tables, summary first. The first failure aborts the fetch.
    pub fn fetch_all(&self) -> Result<FetchedTables> {
        let summary = self
            .fetch_table(&self.summary_url)
            .context("fetch summary table")?;
        let details = self
            .fetch_table(&self.details_url)
            .context("fetch details table")?;
        Ok(FetchedTables { summary, details })
    }

    pub fn fetch_table(&self, url: &Url) -> Result<RawTable> {
        debug!(%url, "fetching CSV");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|error| connection_error(url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%url, status = status.as_u16(), "CSV fetch rejected");
            return Err(clean_error_response(status, &body));
        }

        let body = response.text().context("read CSV body")?;
        let table = parse_csv(&body)?;
        debug!(%url, rows = table.row_count(), "CSV parsed");
        Ok(table)
    }
}

/// Parses comma-separated text into rows. Ragged rows are kept as-is; the
/// display pipeline pads them.
pub fn parse_csv(body: &str) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("parse CSV record {}", index + 1))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(RawTable::new(rows))
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid data URL {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported scheme {other:?} in data URL {raw:?}; use http or https"),
    }
}

fn connection_error(url: &Url, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("timed out reaching {url}");
    }
    anyhow!("cannot reach {url} ({error})")
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    let body = body.trim();
    if !body.is_empty() && body.len() < 100 && !body.contains('<') {
        return anyhow!("server error ({}): {}", status.as_u16(), body);
    }
    anyhow!("server returned {}", status.as_u16())
}
