//! The boundary to the chain-state provider.
//!
//! Fetching table rows and the reference account's limits is not done here.
//! A provider hands the engine already-resolved values; [`MarketSnapshot`]
//! is the in-memory provider for callers that cache a read.

use {
    crate::state::{
        LegacyExchangeMarketState, LegacyLinearMarketState, PrimaryMarketState, UsageSample,
    },
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

/// Source of market-state snapshots and usage samples.
pub trait ChainStateProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn primary_market(&self) -> Result<PrimaryMarketState, Self::Error>;

    fn legacy_linear_market(&self) -> Result<LegacyLinearMarketState, Self::Error>;

    fn legacy_exchange_market(&self) -> Result<LegacyExchangeMarketState, Self::Error>;

    fn usage_sample(&self) -> Result<UsageSample, Self::Error>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Snapshot does not contain the {0} table")]
    Missing(&'static str),
}

/// A point-in-time bundle of previously fetched rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Unix seconds at which the rows were read.
    pub taken_at: u64,
    pub primary: Option<PrimaryMarketState>,
    pub legacy_linear: Option<LegacyLinearMarketState>,
    pub legacy_exchange: Option<LegacyExchangeMarketState>,
    pub usage_sample: Option<UsageSample>,
}

impl ChainStateProvider for MarketSnapshot {
    type Error = SnapshotError;

    fn primary_market(&self) -> Result<PrimaryMarketState, Self::Error> {
        self.primary
            .clone()
            .ok_or(SnapshotError::Missing("primary market"))
    }

    fn legacy_linear_market(&self) -> Result<LegacyLinearMarketState, Self::Error> {
        self.legacy_linear
            .clone()
            .ok_or(SnapshotError::Missing("legacy linear market"))
    }

    fn legacy_exchange_market(&self) -> Result<LegacyExchangeMarketState, Self::Error> {
        self.legacy_exchange
            .clone()
            .ok_or(SnapshotError::Missing("legacy exchange market"))
    }

    fn usage_sample(&self) -> Result<UsageSample, Self::Error> {
        self.usage_sample
            .ok_or(SnapshotError::Missing("usage sample"))
    }
}
