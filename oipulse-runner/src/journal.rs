//! Per-day CSV signal journal.
//!
//! Each cycle's signal is appended as one row to `signals_YYYYMMDD.csv`
//! under the journal directory; a fresh file (with header) begins each
//! calendar day. Rows are only ever appended, never rewritten.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::cycle::CycleReport;

const COLUMNS: [&str; 7] = [
    "time",
    "signal",
    "strike",
    "pcr",
    "confidence",
    "spot",
    "reasons",
];

/// One journal row, derived from a cycle report.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub time: NaiveDateTime,
    pub signal: String,
    pub strike: Option<u32>,
    pub pcr: f64,
    pub confidence: u8,
    pub spot: f64,
    /// All reasons joined with "; " so the row stays one line.
    pub reasons: String,
}

impl JournalEntry {
    pub fn from_report(report: &CycleReport) -> Self {
        Self {
            time: report.fetched_at,
            signal: report.signal.signal.label().to_string(),
            strike: report.signal.suggested_strike,
            pcr: report.signal.pcr,
            confidence: report.signal.confidence_level(),
            spot: report.signal.spot,
            reasons: report.signal.reasons.join("; "),
        }
    }
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only CSV journal, one file per calendar day.
#[derive(Debug, Clone)]
pub struct SignalJournal {
    dir: PathBuf,
}

impl SignalJournal {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the journal file for a given day.
    pub fn file_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("signals_{}.csv", date.format("%Y%m%d")))
    }

    /// Append one entry to the day file for `entry.time`, creating the
    /// directory and file (with header) as needed. Returns the file path.
    pub fn append(&self, entry: &JournalEntry) -> Result<PathBuf, JournalError> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.file_for(entry.time.date());
        let is_new = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(COLUMNS)?;
        }
        writer.write_record([
            entry.time.format("%H:%M:%S").to_string(),
            entry.signal.clone(),
            entry.strike.map(|s| s.to_string()).unwrap_or_default(),
            format!("{:.2}", entry.pcr),
            entry.confidence.to_string(),
            format!("{:.2}", entry.spot),
            entry.reasons.clone(),
        ])?;
        writer.flush()?;
        Ok(path)
    }
}
