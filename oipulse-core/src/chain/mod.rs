//! Option-chain snapshot sources: the live NSE endpoint and JSON fixtures.

pub mod fixture;
pub mod nse;
pub mod provider;

pub use fixture::FixtureProvider;
pub use nse::NseProvider;
pub use provider::{ChainError, ChainProvider};
