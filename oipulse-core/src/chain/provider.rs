//! Chain provider trait and structured error types.
//!
//! The ChainProvider trait abstracts over snapshot sources (live NSE
//! endpoint, JSON fixture) so the runner and TUI can swap implementations
//! and mock for tests.

use thiserror::Error;

use crate::domain::ChainSnapshot;

/// Structured error types for chain fetching.
///
/// These are designed to be displayable in both CLI and TUI contexts. Any
/// of them aborts the current refresh cycle; none of them touches the
/// retained previous-OI state.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("option chain has no strikes in the ATM window")]
    EmptyChain,

    #[error("fixture error: {0}")]
    Fixture(String),

    #[error("chain error: {0}")]
    Other(String),
}

/// Trait for option-chain snapshot sources.
///
/// `fetch` returns one complete snapshot (rows sorted, deduped, spot set)
/// or a structured error after the provider's own bounded retries are
/// exhausted. Implementations own their retry policy; callers treat any
/// error as a terminal cycle failure.
pub trait ChainProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the current five-strike snapshot around ATM.
    fn fetch(&self) -> Result<ChainSnapshot, ChainError>;
}
