//! Background worker thread — the fetch/analyze cycle runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The
//! worker owns the chain provider, the session state (previous OI map),
//! and the journal; the main thread only ever sees finished reports.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use oipulse_core::chain::ChainProvider;
use oipulse_core::config::SignalConfig;
use oipulse_runner::{run_cycle, CycleError, CycleReport, JournalEntry, SessionState, SignalJournal};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Run one full refresh cycle (scheduled or manual).
    Refresh,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    CycleDone(Box<CycleReport>),
    CycleFailed {
        category: String,
        error: String,
    },
    /// The cycle succeeded but the CSV append did not. Sent after the
    /// `CycleDone` it belongs to, so the warning outlives the report's
    /// status-line update.
    JournalFailed {
        error: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    provider: Box<dyn ChainProvider>,
    cfg: SignalConfig,
    journal: SignalJournal,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("oipulse-worker".into())
        .spawn(move || worker_loop(provider, cfg, journal, rx, tx))
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    provider: Box<dyn ChainProvider>,
    cfg: SignalConfig,
    journal: SignalJournal,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    // The previous-OI map lives here, updated only by successful cycles.
    let mut state = SessionState::new();

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Refresh) => {
                handle_refresh(provider.as_ref(), &cfg, &journal, &mut state, &tx);
            }
        }
    }
}

fn handle_refresh(
    provider: &dyn ChainProvider,
    cfg: &SignalConfig,
    journal: &SignalJournal,
    state: &mut SessionState,
    tx: &Sender<WorkerResponse>,
) {
    match run_cycle(provider, cfg, state) {
        Ok(report) => {
            let entry = JournalEntry::from_report(&report);
            let journal_error = journal.append(&entry).err();
            let _ = tx.send(WorkerResponse::CycleDone(Box::new(report)));
            if let Some(e) = journal_error {
                let _ = tx.send(WorkerResponse::JournalFailed {
                    error: e.to_string(),
                });
            }
        }
        Err(e) => {
            let category = match &e {
                CycleError::Fetch(_) => "network",
                CycleError::Analysis(_) => "data",
            };
            let _ = tx.send(WorkerResponse::CycleFailed {
                category: category.into(),
                error: e.to_string(),
            });
        }
    }
}
