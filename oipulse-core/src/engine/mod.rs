//! Signal derivation engine — pure functions over one cycle's chain data.
//!
//! The pipeline runs `detect_shift` → `analyze` → `check_exit` once per
//! refresh. Nothing here touches I/O or retains state; the caller owns the
//! previous-cycle OI map and passes it in by reference.

pub mod exit;
pub mod sentiment;
pub mod shift;

pub use exit::check_exit;
pub use sentiment::analyze;
pub use shift::detect_shift;

use thiserror::Error;

/// Structured "cannot compute" outcomes for the analyzer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("option chain snapshot has no rows — cannot locate an ATM strike")]
    EmptySnapshot,
}
