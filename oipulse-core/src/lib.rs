//! OIPulse Core — domain types, signal derivation engine, chain fetching.
//!
//! This crate contains the heart of the dashboard:
//! - Domain types (strike rows, chain snapshots, OI maps, signals, reports)
//! - The pure signal pipeline: OI shift detection → sentiment analysis →
//!   exit-condition checks
//! - Configuration with named rule thresholds (TOML-loadable)
//! - Chain providers (live NSE endpoint, JSON fixture) behind a trait

pub mod chain;
pub mod config;
pub mod domain;
pub mod engine;
