//! OIPulse TUI — three-panel terminal dashboard for NIFTY option-chain
//! sentiment.
//!
//! Panels:
//! 1. Dashboard — latest signal, reasons, exit monitor, OI shifts, chain
//! 2. History — this session's signals (mirrors the CSV journal)
//! 3. Help — key bindings and recent errors
//!
//! A background worker runs the fetch/analyze cycle; refreshes fire on
//! wall-clock interval boundaries or on demand with `r`.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use oipulse_core::chain::{ChainProvider, FixtureProvider, NseProvider};
use oipulse_core::config::Config;
use oipulse_runner::{schedule, SignalJournal};

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerResponse};

const CONFIG_PATH: &str = "oipulse.toml";
const JOURNAL_DIR: &str = "signals";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Config: optional oipulse.toml next to the binary's working directory.
    let cfg = if Path::new(CONFIG_PATH).exists() {
        Config::load(Path::new(CONFIG_PATH)).context("failed to load oipulse.toml")?
    } else {
        Config::default()
    };

    // Provider: live NSE by default, a JSON fixture when OIPULSE_FIXTURE is set.
    let provider: Box<dyn ChainProvider> = match std::env::var("OIPULSE_FIXTURE") {
        Ok(path) => Box::new(FixtureProvider::new(path)),
        Err(_) => Box::new(NseProvider::new(cfg.fetch.clone(), cfg.signal.strike_step)),
    };
    let provider_name = provider.name().to_string();

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(
        provider,
        cfg.signal.clone(),
        SignalJournal::new(JOURNAL_DIR),
        cmd_rx,
        resp_tx,
    );

    let mut app = AppState::new(cmd_tx.clone(), resp_rx, cfg, provider_name);
    // First fetch right away; the schedule takes over afterwards.
    app.request_refresh("startup");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Fire a scheduled refresh once its boundary passes.
        let now = chrono::Local::now().naive_local();
        if now >= app.next_refresh {
            app.next_refresh =
                schedule::advance(app.next_refresh, now, app.cfg.refresh_interval_mins);
            app.request_refresh("scheduled");
        }

        // 4. Poll for input events (250ms timeout keeps the countdown live)
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::CycleDone(report) => {
            app.record_report(*report);
        }
        WorkerResponse::CycleFailed { category, error } => {
            app.refresh_in_flight = false;
            app.push_error(ErrorCategory::from_tag(&category), error);
        }
        WorkerResponse::JournalFailed { error } => {
            app.push_error(ErrorCategory::Journal, format!("journal append failed: {error}"));
            app.set_warning("Signal shown but not journaled — check the signals directory");
        }
    }
}
