//! OI shift detection — compares the current OI map against the previous
//! cycle's and tags strikes where writers are building positions.

use crate::config::SignalConfig;
use crate::domain::{OiMap, OiMovement, OptionSide, ShiftReport};

/// Compare `current` against `prev`, tagging each strike whose PE or CE
/// open interest grew by more than `cfg.oi_shift_threshold` contracts.
///
/// A strike missing from `prev` counts as zero prior OI, so a strike newly
/// entering the five-strike window reports its full OI as a build-up.
/// Both sides may fire for the same strike; tags come out strike-ascending
/// with PE before CE at each strike.
pub fn detect_shift(prev: Option<&OiMap>, current: &OiMap, cfg: &SignalConfig) -> ShiftReport {
    let Some(prev) = prev else {
        return ShiftReport::NoHistory;
    };

    let mut movements = Vec::new();
    for (&strike, entry) in current.iter() {
        let before = prev.get(strike).copied().unwrap_or_default();
        let pe_delta = entry.pe_oi as i64 - before.pe_oi as i64;
        let ce_delta = entry.ce_oi as i64 - before.ce_oi as i64;

        if pe_delta > cfg.oi_shift_threshold {
            movements.push(OiMovement {
                strike,
                side: OptionSide::Pe,
            });
        }
        if ce_delta > cfg.oi_shift_threshold {
            movements.push(OiMovement {
                strike,
                side: OptionSide::Ce,
            });
        }
    }

    if movements.is_empty() {
        ShiftReport::NoShift
    } else {
        ShiftReport::Movements(movements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OiEntry;

    fn map(entries: &[(u32, u64, u64)]) -> OiMap {
        let mut m = OiMap::default();
        for &(strike, ce_oi, pe_oi) in entries {
            m.insert(strike, OiEntry { ce_oi, pe_oi });
        }
        m
    }

    #[test]
    fn first_cycle_reports_no_history() {
        let current = map(&[(24_500, 10_000, 10_000)]);
        let report = detect_shift(None, &current, &SignalConfig::default());
        assert_eq!(report, ShiftReport::NoHistory);
    }

    #[test]
    fn small_deltas_report_no_shift() {
        let prev = map(&[(24_500, 10_000, 10_000)]);
        let current = map(&[(24_500, 15_000, 19_000)]);
        let report = detect_shift(Some(&prev), &current, &SignalConfig::default());
        assert_eq!(report, ShiftReport::NoShift);
    }

    #[test]
    fn threshold_is_strict() {
        // Exactly +10000 does not fire; +10001 does.
        let prev = map(&[(24_500, 0, 10_000)]);
        let at = map(&[(24_500, 0, 20_000)]);
        let over = map(&[(24_500, 0, 20_001)]);
        let cfg = SignalConfig::default();
        assert_eq!(detect_shift(Some(&prev), &at, &cfg), ShiftReport::NoShift);
        assert!(detect_shift(Some(&prev), &over, &cfg).mentions_building(OptionSide::Pe));
    }

    #[test]
    fn pe_build_up_tagged() {
        let prev = map(&[(24_500, 50_000, 40_000)]);
        let current = map(&[(24_500, 50_500, 55_000)]);
        let report = detect_shift(Some(&prev), &current, &SignalConfig::default());
        assert_eq!(
            report,
            ShiftReport::Movements(vec![OiMovement {
                strike: 24_500,
                side: OptionSide::Pe,
            }])
        );
    }

    #[test]
    fn both_sides_can_fire_at_one_strike_pe_first() {
        let prev = map(&[(24_500, 1_000, 1_000)]);
        let current = map(&[(24_500, 20_000, 20_000)]);
        let report = detect_shift(Some(&prev), &current, &SignalConfig::default());
        let ShiftReport::Movements(moves) = report else {
            panic!("expected movements");
        };
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].side, OptionSide::Pe);
        assert_eq!(moves[1].side, OptionSide::Ce);
    }

    #[test]
    fn new_strike_counts_full_oi_as_build_up() {
        // 24600 was outside the window last cycle.
        let prev = map(&[(24_500, 10_000, 10_000)]);
        let current = map(&[(24_500, 10_000, 10_000), (24_600, 500, 12_000)]);
        let report = detect_shift(Some(&prev), &current, &SignalConfig::default());
        assert_eq!(
            report,
            ShiftReport::Movements(vec![OiMovement {
                strike: 24_600,
                side: OptionSide::Pe,
            }])
        );
    }

    #[test]
    fn tags_come_out_strike_ascending() {
        let prev = map(&[]);
        let current = map(&[(24_600, 20_000, 100), (24_400, 100, 20_000)]);
        let report = detect_shift(Some(&prev), &current, &SignalConfig::default());
        let ShiftReport::Movements(moves) = report else {
            panic!("expected movements");
        };
        assert_eq!(moves[0].strike, 24_400);
        assert_eq!(moves[1].strike, 24_600);
    }

    #[test]
    fn threshold_comes_from_config() {
        let mut cfg = SignalConfig::default();
        cfg.oi_shift_threshold = 1_000;
        let prev = map(&[(24_500, 0, 0)]);
        let current = map(&[(24_500, 0, 1_500)]);
        assert!(detect_shift(Some(&prev), &current, &cfg).mentions_building(OptionSide::Pe));
    }
}
