// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use edb_app::{AppEvent, FetchedTables};
use edb_source::Client;
use edb_testkit::SamplingFaker;
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

const DEMO_SAMPLING_ROWS: usize = 12;

/// Fetches the published tables over HTTP, one worker thread per fetch.
pub struct SourceRuntime {
    client: Client,
}

impl SourceRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl edb_tui::AppRuntime for SourceRuntime {
    fn fetch_tables(&mut self) -> Result<FetchedTables> {
        self.client.fetch_all()
    }

    fn spawn_fetch(&mut self, tx: Sender<AppEvent>) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name("edb-fetch".to_owned())
            .spawn(move || {
                let event = match client.fetch_all() {
                    Ok(tables) => AppEvent::FetchSucceeded(tables),
                    Err(error) => AppEvent::FetchFailed {
                        error: format!("{error:#}"),
                    },
                };
                if tx.send(event).is_err() {
                    debug!("dashboard closed before fetch finished");
                }
            })
            .map_err(|error| anyhow!("spawn fetch worker: {error}"))?;
        Ok(())
    }
}

/// Offline runtime serving generated tables; each fetch draws a new sample.
pub struct DemoRuntime {
    faker: SamplingFaker,
}

impl DemoRuntime {
    pub fn new(seed: u64) -> Self {
        Self {
            faker: SamplingFaker::new(seed),
        }
    }
}

impl edb_tui::AppRuntime for DemoRuntime {
    fn fetch_tables(&mut self) -> Result<FetchedTables> {
        Ok(self.faker.tables(DEMO_SAMPLING_ROWS))
    }
}
