//! OIPulse Runner — drives one refresh cycle end to end and owns the
//! peripheral concerns around it: the retained previous-OI state, the
//! wall-clock-aligned refresh schedule, and the per-day CSV signal journal.

pub mod cycle;
pub mod journal;
pub mod schedule;

pub use cycle::{run_cycle, CycleError, CycleReport, SessionState};
pub use journal::{JournalEntry, JournalError, SignalJournal};
