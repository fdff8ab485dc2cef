//! Option-chain snapshot — the fundamental market data unit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::oi::{OiEntry, OiMap};

/// One strike's market snapshot: call and put open interest, the session's
/// OI change, and implied volatility for each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeRow {
    pub strike: u32,
    pub ce_oi: u64,
    pub ce_oi_change: i64,
    pub ce_iv: f64,
    pub pe_oi: u64,
    pub pe_oi_change: i64,
    pub pe_iv: f64,
}

/// The five-strike window around ATM plus the underlying spot price.
///
/// Rows are sorted ascending by strike with exactly one row per strike —
/// `new` enforces both. Consumed read-only by the whole pipeline; nothing
/// downstream mutates a snapshot after the fetch step produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub spot: f64,
    pub rows: Vec<StrikeRow>,
}

impl ChainSnapshot {
    /// Build a snapshot, sorting rows ascending by strike and collapsing
    /// duplicate strikes to the row with the highest open interest.
    pub fn new(spot: f64, mut rows: Vec<StrikeRow>) -> Self {
        rows.sort_by(|a, b| {
            a.strike
                .cmp(&b.strike)
                .then(b.ce_oi.cmp(&a.ce_oi))
                .then(b.pe_oi.cmp(&a.pe_oi))
        });
        rows.dedup_by_key(|r| r.strike);
        Self { spot, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total_ce_oi(&self) -> u64 {
        self.rows.iter().map(|r| r.ce_oi).sum()
    }

    pub fn total_pe_oi(&self) -> u64 {
        self.rows.iter().map(|r| r.pe_oi).sum()
    }

    /// Row at an exact strike, if present.
    pub fn row_at(&self, strike: u32) -> Option<&StrikeRow> {
        self.rows.iter().find(|r| r.strike == strike)
    }

    /// The strike closest to spot. On an exact tie the lower strike wins
    /// (rows are ascending, and a later row only replaces the best when it
    /// is strictly closer).
    pub fn atm_strike(&self) -> Option<u32> {
        let mut best: Option<(u32, f64)> = None;
        for row in &self.rows {
            let dist = (f64::from(row.strike) - self.spot).abs();
            match best {
                Some((_, d)) if dist >= d => {}
                _ => best = Some((row.strike, dist)),
            }
        }
        best.map(|(strike, _)| strike)
    }

    /// Project the snapshot down to the strike → OI mapping used for
    /// cross-cycle shift comparison.
    pub fn oi_map(&self) -> OiMap {
        let mut map = BTreeMap::new();
        for row in &self.rows {
            map.insert(
                row.strike,
                OiEntry {
                    ce_oi: row.ce_oi,
                    pe_oi: row.pe_oi,
                },
            );
        }
        OiMap::from_entries(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(strike: u32, ce_oi: u64, pe_oi: u64) -> StrikeRow {
        StrikeRow {
            strike,
            ce_oi,
            ce_oi_change: 0,
            ce_iv: 15.0,
            pe_oi,
            pe_oi_change: 0,
            pe_iv: 15.0,
        }
    }

    #[test]
    fn new_sorts_rows_ascending() {
        let snap = ChainSnapshot::new(
            24_500.0,
            vec![row(24_600, 10, 10), row(24_400, 10, 10), row(24_500, 10, 10)],
        );
        let strikes: Vec<u32> = snap.rows.iter().map(|r| r.strike).collect();
        assert_eq!(strikes, vec![24_400, 24_500, 24_600]);
    }

    #[test]
    fn new_dedupes_keeping_highest_oi() {
        let snap = ChainSnapshot::new(
            24_500.0,
            vec![row(24_500, 100, 50), row(24_500, 90_000, 80_000)],
        );
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.rows[0].ce_oi, 90_000);
    }

    #[test]
    fn totals_sum_across_rows() {
        let snap = ChainSnapshot::new(
            24_500.0,
            vec![row(24_450, 1_000, 2_000), row(24_500, 3_000, 4_000)],
        );
        assert_eq!(snap.total_ce_oi(), 4_000);
        assert_eq!(snap.total_pe_oi(), 6_000);
    }

    #[test]
    fn atm_picks_nearest_strike() {
        let snap = ChainSnapshot::new(
            24_480.0,
            vec![row(24_400, 1, 1), row(24_450, 1, 1), row(24_500, 1, 1)],
        );
        assert_eq!(snap.atm_strike(), Some(24_500));
    }

    #[test]
    fn atm_tie_breaks_to_lower_strike() {
        // Spot exactly equidistant between 24450 and 24500.
        let snap = ChainSnapshot::new(24_475.0, vec![row(24_450, 1, 1), row(24_500, 1, 1)]);
        assert_eq!(snap.atm_strike(), Some(24_450));
    }

    #[test]
    fn atm_of_empty_snapshot_is_none() {
        let snap = ChainSnapshot::new(24_500.0, vec![]);
        assert_eq!(snap.atm_strike(), None);
    }

    #[test]
    fn oi_map_carries_both_sides() {
        let snap = ChainSnapshot::new(24_500.0, vec![row(24_500, 111, 222)]);
        let map = snap.oi_map();
        let entry = map.get(24_500).unwrap();
        assert_eq!(entry.ce_oi, 111);
        assert_eq!(entry.pe_oi, 222);
    }

    #[test]
    fn snapshot_serialization_roundtrip() {
        let snap = ChainSnapshot::new(24_500.0, vec![row(24_450, 5, 6)]);
        let json = serde_json::to_string(&snap).unwrap();
        let deser: ChainSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, deser);
    }
}
