//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use oipulse_core::config::Config;
use oipulse_runner::{schedule, CycleReport, JournalEntry};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Dashboard,
    History,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Dashboard => 0,
            Panel::History => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Dashboard),
            1 => Some(Panel::History),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::History => "History",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 3).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 2) % 3).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Journal,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Journal => "LOG",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "network" => ErrorCategory::Network,
            "data" => ErrorCategory::Data,
            "journal" => ErrorCategory::Journal,
            _ => ErrorCategory::Other,
        }
    }
}

/// An error record for the help panel's recent-errors list.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Refresh schedule
    pub next_refresh: NaiveDateTime,
    pub refresh_in_flight: bool,

    // Latest cycle output and the session's signal history (newest first)
    pub latest: Option<CycleReport>,
    pub history: Vec<JournalEntry>,
    pub history_cursor: usize,

    // Cross-cutting
    pub cfg: Config,
    pub provider_name: String,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        cfg: Config,
        provider_name: String,
    ) -> Self {
        let now = chrono::Local::now().naive_local();
        let next_refresh = schedule::next_aligned(now, cfg.refresh_interval_mins);
        Self {
            active_panel: Panel::Dashboard,
            running: true,
            worker_tx,
            worker_rx,
            next_refresh,
            refresh_in_flight: false,
            latest: None,
            history: Vec::new(),
            history_cursor: 0,
            cfg,
            provider_name,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
        }
    }

    /// Ask the worker for a refresh cycle; no-op while one is running.
    pub fn request_refresh(&mut self, origin: &str) {
        if self.refresh_in_flight {
            return;
        }
        if self.worker_tx.send(WorkerCommand::Refresh).is_ok() {
            self.refresh_in_flight = true;
            self.set_status(format!("Refreshing ({origin})…"));
        }
    }

    /// Record a finished cycle: latest report, history row, status line.
    pub fn record_report(&mut self, report: CycleReport) {
        self.refresh_in_flight = false;
        let entry = JournalEntry::from_report(&report);
        let strike = entry
            .strike
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        self.set_status(format!(
            "{} @ {} | PCR {:.2} | conf {}/5",
            entry.signal, strike, entry.pcr, entry.confidence
        ));
        self.history.insert(0, entry);
        self.history_cursor = 0;
        self.latest = Some(report);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, rx) = mpsc::channel();
        let app = AppState::new(tx, rx, Config::default(), "fixture".into());
        (app, cmd_rx)
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Dashboard.next(), Panel::History);
        assert_eq!(Panel::Help.next(), Panel::Dashboard);
        assert_eq!(Panel::Dashboard.prev(), Panel::Help);
        assert_eq!(Panel::History.prev(), Panel::Dashboard);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..3 {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(3).is_none());
    }

    #[test]
    fn refresh_request_is_deduplicated() {
        let (mut app, cmd_rx) = test_app();
        app.request_refresh("manual");
        app.request_refresh("manual");
        assert!(app.refresh_in_flight);
        assert!(cmd_rx.try_recv().is_ok());
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"));
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn error_category_tags() {
        assert_eq!(ErrorCategory::from_tag("network"), ErrorCategory::Network);
        assert_eq!(ErrorCategory::from_tag("data"), ErrorCategory::Data);
        assert_eq!(ErrorCategory::from_tag("journal"), ErrorCategory::Journal);
        assert_eq!(ErrorCategory::from_tag("???"), ErrorCategory::Other);
    }
}
