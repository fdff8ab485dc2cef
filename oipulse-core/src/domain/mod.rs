//! Domain types: chain snapshots, OI maps, signals, exit reports.

pub mod chain;
pub mod oi;
pub mod signal;

pub use chain::{ChainSnapshot, StrikeRow};
pub use oi::{OiEntry, OiMap, OiMovement, ShiftReport};
pub use signal::{ExitReport, OptionSide, Signal, SignalResult};
