// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod histogram;
pub mod layout;
pub mod view;

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use edb_app::{
    AUTO_REFRESH_INTERVAL, AppCommand, AppEvent, AppState, FetchedTables, KeyAction, Metric,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, info, warn};

pub use view::{Screen, ViewData};

const POLL_INTERVAL: Duration = Duration::from_millis(120);

pub trait AppRuntime {
    fn fetch_tables(&mut self) -> Result<FetchedTables>;

    /// Starts a fetch whose outcome arrives on `tx`. The default runs the
    /// fetch inline; network-backed runtimes move it off the UI thread.
    fn spawn_fetch(&mut self, tx: Sender<AppEvent>) -> Result<()> {
        let event = match self.fetch_tables() {
            Ok(tables) => AppEvent::FetchSucceeded(tables),
            Err(error) => AppEvent::FetchFailed {
                error: format!("{error:#}"),
            },
        };
        tx.send(event)
            .map_err(|_| anyhow!("fetch event channel closed"))?;
        Ok(())
    }
}

/// Wall clock pinned to one UTC offset.
///
/// The local offset can only be read safely while the process is single
/// threaded, so it is resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    pub fn local() -> Self {
        Self::fixed(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    pub fn fixed(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the state machine and runs the commands its transitions return.
/// Terminal input, fetch workers and the timer all feed one channel, and
/// every event goes through [`Session::handle`] on the UI thread in the
/// order it was queued.
pub struct Session<R: AppRuntime> {
    state: AppState,
    runtime: R,
    view: ViewData,
    clock: Clock,
    refresh_interval: Duration,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl<R: AppRuntime> Session<R> {
    pub fn new(state: AppState, runtime: R, clock: Clock) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state,
            runtime,
            view: ViewData::default(),
            clock,
            refresh_interval: AUTO_REFRESH_INTERVAL.unsigned_abs(),
            tx,
            rx,
        }
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Handle for producers living outside the session.
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn boot(&mut self) -> Result<Flow> {
        info!(
            auto_refresh = self.state.auto_refresh,
            interval_secs = self.refresh_interval.as_secs(),
            "starting dashboard session"
        );
        let commands = self.state.boot(self.clock.now());
        self.run_commands(commands)
    }

    pub fn handle(&mut self, event: AppEvent) -> Result<Flow> {
        match &event {
            AppEvent::FetchFailed { error } => warn!(%error, "fetch failed"),
            AppEvent::FetchSucceeded(tables) => debug!(
                summary_rows = tables.summary.data_row_count(),
                detail_rows = tables.details.data_row_count(),
                "fetch succeeded"
            ),
            _ => {}
        }
        let commands = self.state.dispatch(event, self.clock.now());
        self.run_commands(commands)
    }

    /// Blocks up to `timeout` for the next queued event, then applies it and
    /// everything queued behind it.
    pub fn wait(&mut self, timeout: Duration) -> Result<Flow> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                if self.handle(event)? == Flow::Quit {
                    return Ok(Flow::Quit);
                }
                self.pump()
            }
            Err(RecvTimeoutError::Timeout) => Ok(Flow::Continue),
            Err(RecvTimeoutError::Disconnected) => Err(anyhow!("event channel closed")),
        }
    }

    /// Applies every queued event without blocking.
    pub fn pump(&mut self) -> Result<Flow> {
        while let Ok(event) = self.rx.try_recv() {
            if self.handle(event)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal
            .draw(|frame| view::draw(frame, &self.state, &self.view))
            .context("draw frame")?;
        Ok(())
    }

    fn run_commands(&mut self, commands: Vec<AppCommand>) -> Result<Flow> {
        let mut flow = Flow::Continue;
        for command in commands {
            debug!(?command, "running command");
            match command {
                AppCommand::FetchTables => self
                    .runtime
                    .spawn_fetch(self.tx.clone())
                    .context("start fetch")?,
                AppCommand::ScheduleAutoRefresh => {
                    schedule_auto_refresh(&self.tx, self.refresh_interval);
                }
                AppCommand::Quit => flow = Flow::Quit,
            }
        }
        Ok(flow)
    }
}

fn schedule_auto_refresh(tx: &Sender<AppEvent>, interval: Duration) {
    let sender = tx.clone();
    thread::spawn(move || {
        thread::sleep(interval);
        let _ = sender.send(AppEvent::AutoRefreshTick);
    });
}

pub fn key_action(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return if key.code == KeyCode::Char('c') {
            KeyAction::Quit
        } else {
            KeyAction::Other
        };
    }
    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('a') => KeyAction::About,
        KeyCode::Char('l') => KeyAction::Legend,
        KeyCode::Char('s') => KeyAction::Stats,
        KeyCode::Char('e') => KeyAction::SortBy(Metric::EColi),
        KeyCode::Char('n') => KeyAction::SortBy(Metric::Enterococci),
        KeyCode::Up => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        _ => KeyAction::Other,
    }
}

/// Terminal events the dashboard cares about. Key releases and repeats
/// are dropped so each press acts once.
pub fn terminal_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key_action(key))),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        _ => None,
    }
}

/// Moves terminal events from `next` into `tx` until `stop` is raised, the
/// receiver hangs up or reading fails. `next` yields `Ok(None)` on timeout.
pub fn forward_terminal_events<F>(mut next: F, tx: &Sender<AppEvent>, stop: &AtomicBool)
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !stop.load(Ordering::Relaxed) {
        match next() {
            Ok(Some(event)) => {
                let Some(event) = terminal_event(event) else {
                    continue;
                };
                if tx.send(event).is_err() {
                    debug!("session closed; terminal reader exiting");
                    return;
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "terminal read failed");
                return;
            }
        }
    }
}

fn next_terminal_event() -> io::Result<Option<Event>> {
    if event::poll(POLL_INTERVAL)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

fn spawn_terminal_reader(tx: Sender<AppEvent>, stop: Arc<AtomicBool>) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("edb-terminal".to_owned())
        .spawn(move || forward_terminal_events(next_terminal_event, &tx, &stop))
        .context("spawn terminal reader")
}

pub fn run_app<R: AppRuntime>(session: &mut Session<R>) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend).context("create terminal") {
        Ok(mut terminal) => event_loop(session, &mut terminal),
        Err(error) => Err(error),
    };

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<R: AppRuntime, B: Backend>(
    session: &mut Session<R>,
    terminal: &mut Terminal<B>,
) -> Result<()> {
    let size = terminal.size().context("read terminal size")?;
    session.handle(AppEvent::Resize {
        width: size.width,
        height: size.height,
    })?;
    if session.boot()? == Flow::Quit {
        return Ok(());
    }

    let stop = Arc::new(AtomicBool::new(false));
    let reader = spawn_terminal_reader(session.sender(), Arc::clone(&stop))?;
    let result = drive(session, terminal);
    stop.store(true, Ordering::Relaxed);
    if reader.join().is_err() {
        warn!("terminal reader panicked");
    }
    result
}

fn drive<R: AppRuntime, B: Backend>(
    session: &mut Session<R>,
    terminal: &mut Terminal<B>,
) -> Result<()> {
    loop {
        session.draw(terminal)?;
        if session.wait(POLL_INTERVAL)? == Flow::Quit {
            info!("dashboard closed");
            return Ok(());
        }
    }
}
