//! Descriptors for the leasable resources.
//!
//! A [`crate::curve::BondingCurvePricer`] is generic over one of these; the
//! descriptor supplies everything that differs between CPU and NET.

use crate::{
    config::{PricingConfig, PricingOptions},
    state::{PrimaryMarketState, ResourceCurveState, UsageSample},
};

pub trait ResourceKind {
    /// Short name used in logs and errors.
    const NAME: &'static str;
    /// Smallest unit requests are denominated in.
    const BASE_UNIT: &'static str;
    /// The next larger unit.
    const COARSE_UNIT: &'static str;
    /// Base units per coarse unit.
    const BASE_PER_COARSE: u64 = 1_000;

    /// Virtual block limit in base units, honouring a per-call override.
    fn block_limit(config: &PricingConfig, options: &PricingOptions) -> u64;

    /// This resource's scalar from a usage sample.
    fn sample(sample: &UsageSample) -> u128;

    /// This resource's curve in the primary market.
    fn curve(state: &PrimaryMarketState) -> &ResourceCurveState;
}

/// Compute time, measured in microseconds.
#[derive(Debug, Clone, Copy)]
pub enum Cpu {}

impl ResourceKind for Cpu {
    const NAME: &'static str = "cpu";
    const BASE_UNIT: &'static str = "us";
    const COARSE_UNIT: &'static str = "ms";

    fn block_limit(config: &PricingConfig, options: &PricingOptions) -> u64 {
        options
            .virtual_block_cpu_limit
            .unwrap_or(config.default_block_cpu_limit)
    }

    fn sample(sample: &UsageSample) -> u128 {
        sample.cpu
    }

    fn curve(state: &PrimaryMarketState) -> &ResourceCurveState {
        &state.cpu
    }
}

/// Bandwidth, measured in bytes.
#[derive(Debug, Clone, Copy)]
pub enum Net {}

impl ResourceKind for Net {
    const NAME: &'static str = "net";
    const BASE_UNIT: &'static str = "bytes";
    const COARSE_UNIT: &'static str = "kb";

    fn block_limit(config: &PricingConfig, options: &PricingOptions) -> u64 {
        options
            .virtual_block_net_limit
            .unwrap_or(config.default_block_net_limit)
    }

    fn sample(sample: &UsageSample) -> u128 {
        sample.net
    }

    fn curve(state: &PrimaryMarketState) -> &ResourceCurveState {
        &state.net
    }
}
