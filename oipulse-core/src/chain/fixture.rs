//! Fixture provider — serves a snapshot from a JSON file.
//!
//! Used for offline dashboard runs and as the deterministic source in
//! tests. The file holds a serialized `ChainSnapshot`; rows are
//! re-normalized on load so hand-edited fixtures with unsorted or
//! duplicated strikes still satisfy the snapshot invariants.

use std::path::PathBuf;

use super::provider::{ChainError, ChainProvider};
use crate::domain::ChainSnapshot;

pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ChainProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch(&self) -> Result<ChainSnapshot, ChainError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            ChainError::Fixture(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let raw: ChainSnapshot = serde_json::from_str(&text).map_err(|e| {
            ChainError::Fixture(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        if raw.rows.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(ChainSnapshot::new(raw.spot, raw.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StrikeRow;

    fn write_fixture(dir: &tempfile::TempDir, snapshot: &ChainSnapshot) -> PathBuf {
        let path = dir.path().join("chain.json");
        std::fs::write(&path, serde_json::to_string_pretty(snapshot).unwrap()).unwrap();
        path
    }

    fn sample_snapshot() -> ChainSnapshot {
        ChainSnapshot::new(
            24_500.0,
            vec![StrikeRow {
                strike: 24_500,
                ce_oi: 10_000,
                ce_oi_change: 500,
                ce_iv: 15.0,
                pe_oi: 12_000,
                pe_oi_change: -300,
                pe_iv: 14.0,
            }],
        )
    }

    #[test]
    fn loads_written_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, &sample_snapshot());
        let provider = FixtureProvider::new(&path);
        let snap = provider.fetch().unwrap();
        assert_eq!(snap, sample_snapshot());
    }

    #[test]
    fn missing_file_is_fixture_error() {
        let provider = FixtureProvider::new("/nonexistent/chain.json");
        let err = provider.fetch().unwrap_err();
        assert!(matches!(err, ChainError::Fixture(_)));
    }

    #[test]
    fn invalid_json_is_fixture_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.json");
        std::fs::write(&path, "not json").unwrap();
        let err = FixtureProvider::new(&path).fetch().unwrap_err();
        assert!(matches!(err, ChainError::Fixture(_)));
    }

    #[test]
    fn empty_rows_is_empty_chain_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, &ChainSnapshot::new(24_500.0, vec![]));
        let err = FixtureProvider::new(&path).fetch().unwrap_err();
        assert!(matches!(err, ChainError::EmptyChain));
    }
}
