// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use edb_app::AppState;
use edb_tui::{AppRuntime, Clock, Session};
use runtime::{DemoRuntime, SourceRuntime};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_SEED: u64 = 2025;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Read the UTC offset while the process still has a single thread.
    let clock = Clock::local();

    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `edb-noumea --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let client = edb_source::Client::new(config.fetch_timeout()?).with_context(|| {
        format!(
            "invalid [fetch] config in {}; fix the timeout value",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let log_path = config.log_path()?;
    init_logging(&log_path, config.log_level())?;
    info!(
        config = %options.config_path.display(),
        demo = options.demo,
        "edb-noumea starting"
    );

    let mut state = AppState::new(clock.now());
    state.auto_refresh = config.auto_refresh();

    if options.demo {
        launch(state, DemoRuntime::new(DEMO_SEED), clock)
    } else {
        launch(state, SourceRuntime::new(client), clock)
    }
}

fn launch<R: AppRuntime>(state: AppState, runtime: R, clock: Clock) -> Result<()> {
    let mut session = Session::new(state, runtime, clock);
    edb_tui::run_app(&mut session)
}

/// Routes tracing output to a file; the terminal belongs to the UI.
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("init logging: {error}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("edb-noumea: bathing water quality for Nouméa beaches");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Launch with generated offline data");
    println!("  --check                  Validate config + HTTP client setup");
    println!("  --help                   Show this help");
}
