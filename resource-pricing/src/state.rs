//! Market-state snapshots.
//!
//! These mirror the on-chain table rows field for field. They are plain
//! values: a chain-state provider builds them from a point-in-time read and
//! the pricers only ever borrow them.

use {
    crate::{
        asset::Asset,
        error::PricingError,
        fixed_point::{mul_div, Rounding},
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Bonding-curve state for one leasable resource (CPU or NET).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct ResourceCurveState {
    pub version: u8,
    /// Total capacity the curve is denominated in.
    pub weight: i64,
    /// Current capacity-shift ratio.
    pub weight_ratio: i64,
    pub assumed_stake_weight: i64,
    pub initial_weight_ratio: i64,
    pub target_weight_ratio: i64,
    /// Start of the capacity-shift window (unix seconds).
    pub initial_timestamp: u32,
    /// End of the capacity-shift window (unix seconds).
    pub target_timestamp: u32,
    /// Curve steepness.
    pub exponent: f64,
    /// Time constant of the utilization decay, in seconds.
    pub decay_secs: u32,
    pub min_price: Asset,
    pub max_price: Asset,
    /// Weight currently leased out.
    pub utilization: i64,
    /// Decayed utilization baseline at `utilization_timestamp`.
    pub adjusted_utilization: i64,
    /// Last time the contract updated `adjusted_utilization` (unix seconds).
    pub utilization_timestamp: u32,
}

/// State of the primary leasing market: one curve per resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PrimaryMarketState {
    pub version: u8,
    pub net: ResourceCurveState,
    pub cpu: ResourceCurveState,
    /// Lease duration in days.
    pub lease_days: u32,
    /// Smallest total fee the market accepts for one lease.
    pub min_fee: Asset,
}

/// Bancor-like staking pool backing the legacy linear market.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct LegacyLinearMarketState {
    pub version: u8,
    pub total_lent: Asset,
    pub total_unlent: Asset,
    pub total_rent: Asset,
    pub total_lendable: Asset,
    /// Outstanding pool shares.
    pub total_supply: Asset,
    pub proceeds: Asset,
    pub counter: u64,
}

/// One side of a constant-product market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Connector {
    pub balance: Asset,
    pub weight: f64,
}

/// Constant-product market for the legacy storage resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct LegacyExchangeMarketState {
    pub supply: Asset,
    /// Resource pool (e.g. storage bytes).
    pub base: Connector,
    /// Quote token pool.
    pub quote: Connector,
}

/// Capacity units per reference account stake weight, one scalar per
/// resource, scaled by [`crate::PricingConfig::weight_precision`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct UsageSample {
    pub cpu: u128,
    pub net: u128,
}

impl UsageSample {
    /// Derive a sample from a reference account's maximum resource limits and
    /// its staked weight: `ceil(limit * precision / weight)` per resource.
    pub fn from_account_limits(
        cpu_limit_max: u64,
        cpu_weight: u64,
        net_limit_max: u64,
        net_weight: u64,
        precision: u64,
    ) -> Result<Self, PricingError> {
        if cpu_weight == 0 {
            return Err(PricingError::InvalidUsageSample { resource: "cpu" });
        }
        if net_weight == 0 {
            return Err(PricingError::InvalidUsageSample { resource: "net" });
        }
        Ok(Self {
            cpu: mul_div(
                u128::from(cpu_limit_max),
                u128::from(precision),
                u128::from(cpu_weight),
                Rounding::Up,
            )?,
            net: mul_div(
                u128::from(net_limit_max),
                u128::from(precision),
                u128::from(net_weight),
                Rounding::Up,
            )?,
        })
    }
}
