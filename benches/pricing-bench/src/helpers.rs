//! Shared market fixtures for the pricing benchmarks.

use resource_pricing::{
    Asset, Connector, LegacyExchangeMarketState, LegacyLinearMarketState, PrimaryMarketState,
    ResourceCurveState, Symbol, UsageSample,
};

/// Evaluation time every benchmark pins its quotes to.
pub const NOW: u64 = 1_700_000_000;

/// Microseconds of CPU the chain produces per day.
pub const CPU_PER_DAY: u64 = 34_560_000_000;

/// Bytes of NET the chain produces per day.
pub const NET_PER_DAY: u64 = 181_193_932_800_000;

const WEIGHT: i64 = 1_000_000_000_000;

pub fn eos(units: i64) -> Asset {
    Asset::from_units(units, Symbol::new(4, "EOS"))
}

/// A curve with `utilization_pct` in use and another `hot_pct` still
/// decaying from a recent spike.
pub fn curve(utilization_pct: i64, hot_pct: i64) -> ResourceCurveState {
    let utilization = WEIGHT / 100 * utilization_pct;
    ResourceCurveState {
        version: 0,
        weight: WEIGHT,
        weight_ratio: 1,
        assumed_stake_weight: 1,
        initial_weight_ratio: 1,
        target_weight_ratio: 1,
        initial_timestamp: 0,
        target_timestamp: 0,
        exponent: 2.0,
        decay_secs: 86_400,
        min_price: eos(50_000_000),
        max_price: eos(1_000_000_000),
        utilization,
        adjusted_utilization: utilization + WEIGHT / 100 * hot_pct,
        utilization_timestamp: (NOW - 3_600) as u32,
    }
}

pub fn primary_market(utilization_pct: i64, hot_pct: i64) -> PrimaryMarketState {
    PrimaryMarketState {
        version: 0,
        net: curve(utilization_pct, hot_pct),
        cpu: curve(utilization_pct, hot_pct),
        lease_days: 1,
        min_fee: eos(1),
    }
}

/// Usage sample that maps one day of chain capacity onto the curve weight.
pub fn usage_sample() -> UsageSample {
    UsageSample {
        cpu: u128::from(CPU_PER_DAY) * 1_000_000 / WEIGHT as u128,
        net: u128::from(NET_PER_DAY) * 1_000_000 / WEIGHT as u128,
    }
}

pub fn linear_market() -> LegacyLinearMarketState {
    LegacyLinearMarketState {
        version: 0,
        total_lent: eos(300_000_000_000),
        total_unlent: eos(700_000_000_000),
        total_rent: eos(1_000_000_000),
        total_lendable: eos(1_000_000_000_000),
        total_supply: Asset::from_units(10_000_000_000_000_000, Symbol::new(4, "REX")),
        proceeds: eos(0),
        counter: 0,
    }
}

pub fn exchange_market() -> LegacyExchangeMarketState {
    LegacyExchangeMarketState {
        supply: Asset::from_units(100_000_000_000_000, Symbol::new(4, "RAMCORE")),
        base: Connector {
            balance: Asset::from_units(80_000_000_000, Symbol::new(0, "RAM")),
            weight: 0.5,
        },
        quote: Connector {
            balance: eos(40_000_000_000),
            weight: 0.5,
        },
    }
}
