//! Open-interest map and the cross-cycle shift report.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::signal::OptionSide;

/// Open interest on both sides of a single strike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OiEntry {
    pub ce_oi: u64,
    pub pe_oi: u64,
}

/// Strike → OI mapping for one refresh cycle.
///
/// Backed by a `BTreeMap` so iteration is strike-ascending, which fixes the
/// order of shift tags without any extra sorting. The previous cycle's map
/// is the only state retained across refreshes (in memory, reset on
/// restart).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OiMap {
    entries: BTreeMap<u32, OiEntry>,
}

impl OiMap {
    pub fn from_entries(entries: BTreeMap<u32, OiEntry>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, strike: u32, entry: OiEntry) {
        self.entries.insert(strike, entry);
    }

    pub fn get(&self, strike: u32) -> Option<&OiEntry> {
        self.entries.get(&strike)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &OiEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A writer build-up detected at one strike between two cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OiMovement {
    pub strike: u32,
    pub side: OptionSide,
}

impl fmt::Display for OiMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} writers building at {}", self.side, self.strike)
    }
}

/// Outcome of comparing the current OI map against the previous cycle's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShiftReport {
    /// First cycle: nothing to compare against.
    NoHistory,
    /// No strike moved OI past the configured threshold.
    NoShift,
    /// Per-strike build-up tags, strike-ascending.
    Movements(Vec<OiMovement>),
}

impl ShiftReport {
    /// Does the report mention a writer build-up on the given side?
    pub fn mentions_building(&self, side: OptionSide) -> bool {
        match self {
            ShiftReport::Movements(moves) => moves.iter().any(|m| m.side == side),
            _ => false,
        }
    }

    /// Human-readable lines for display and logging.
    pub fn lines(&self) -> Vec<String> {
        match self {
            ShiftReport::NoHistory => vec!["No OI history yet.".into()],
            ShiftReport::NoShift => vec!["No major OI shifts detected.".into()],
            ShiftReport::Movements(moves) => moves.iter().map(|m| m.to_string()).collect(),
        }
    }
}
