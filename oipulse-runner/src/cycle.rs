//! One refresh cycle: fetch → detect shift → analyze → check exit.
//!
//! The cycle is a straight-line sequential pipeline. The only state it
//! touches is [`SessionState::last_oi`], and only after every stage has
//! succeeded — a failed cycle leaves the retained OI map exactly as it was
//! after the last success, so the next cycle's shift comparison stays
//! valid.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use oipulse_core::chain::{ChainError, ChainProvider};
use oipulse_core::config::SignalConfig;
use oipulse_core::domain::{ChainSnapshot, ExitReport, OiMap, ShiftReport, SignalResult};
use oipulse_core::engine::{analyze, check_exit, detect_shift, EngineError};

/// Cross-cycle state owned by the orchestration layer.
///
/// `last_oi` is the OI map of the last *successful* cycle; in-memory only,
/// reset on restart. That is deliberate — the strategy only ever compares
/// adjacent intraday refreshes.
#[derive(Debug, Default)]
pub struct SessionState {
    pub last_oi: Option<OiMap>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything one successful cycle produced, for rendering and journaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub fetched_at: NaiveDateTime,
    pub provider: String,
    pub snapshot: ChainSnapshot,
    pub shift: ShiftReport,
    pub signal: SignalResult,
    pub exit: ExitReport,
}

/// A terminal cycle failure. No signal is computed, nothing is journaled,
/// and the retained OI state is untouched.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ChainError),

    #[error("analysis failed: {0}")]
    Analysis(#[from] EngineError),
}

/// Run one full cycle against `provider`, updating `state` on success.
pub fn run_cycle(
    provider: &dyn ChainProvider,
    cfg: &SignalConfig,
    state: &mut SessionState,
) -> Result<CycleReport, CycleError> {
    let snapshot = provider.fetch()?;

    let current_oi = snapshot.oi_map();
    let shift = detect_shift(state.last_oi.as_ref(), &current_oi, cfg);
    let signal = analyze(&snapshot, &shift, cfg)?;

    let atm = signal
        .suggested_strike
        .expect("analyze sets the ATM strike for any snapshot it accepts");
    let exit = check_exit(&snapshot, signal.signal, atm);

    state.last_oi = Some(current_oi);

    Ok(CycleReport {
        fetched_at: chrono::Local::now().naive_local(),
        provider: provider.name().to_string(),
        snapshot,
        shift,
        signal,
        exit,
    })
}
