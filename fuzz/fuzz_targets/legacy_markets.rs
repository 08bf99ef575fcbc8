//! Fuzz the legacy markets with random pool balances.
//!
//! Goals:
//! - Find panics, overflows, underflows, or division-by-zero.
//! - Verify that reserved_ratio never exceeds 1.
//! - Verify that constant-product quotes fail exactly past half the pool.

#![no_main]

use {
    arbitrary::{Arbitrary, Unstructured},
    libfuzzer_sys::fuzz_target,
    resource_pricing::{
        Asset, BancorExchangeModel, Connector, ConstantProductExchange, Cpu,
        LegacyExchangeMarketState, LegacyLinearMarketState, Net, PricingConfig, PricingError,
        Symbol, UsageSample,
    },
};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    total_lent: i64,
    total_unlent: i64,
    total_rent: i64,
    total_lendable: i64,
    total_supply: i64,
    shares: i64,
    base: i64,
    quote: i64,
    cpu_sample: u128,
    net_sample: u128,
    units: u64,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let input: FuzzInput = match u.arbitrary() {
        Ok(i) => i,
        Err(_) => return,
    };

    let eos = |units: i64| Asset::from_units(units, Symbol::new(4, "EOS"));
    let config = PricingConfig::default();
    let sample = UsageSample {
        cpu: input.cpu_sample,
        net: input.net_sample,
    };

    // ── Test 1: linear staking pool ──

    let linear = LegacyLinearMarketState {
        version: 0,
        total_lent: eos(input.total_lent),
        total_unlent: eos(input.total_unlent),
        total_rent: eos(input.total_rent),
        total_lendable: eos(input.total_lendable),
        total_supply: Asset::from_units(input.total_supply, Symbol::new(4, "REX")),
        proceeds: eos(0),
        counter: 0,
    };
    if let Ok(model) = BancorExchangeModel::new(&linear, &config) {
        if let Ok(ratio) = model.reserved_ratio() {
            assert!(ratio.raw() <= ratio.scale(), "reserved ratio {ratio} > 1");
        }
        let _ = model.conversion_rate();
        let _ = model.exchange(&Asset::from_units(input.shares, Symbol::new(4, "REX")));
        let _ = model.price_per_unit::<Cpu>(&sample, input.units);
        let _ = model.price_per_coarse_unit::<Net>(&sample, input.units);
    }

    // ── Test 2: constant-product storage market ──

    let exchange = LegacyExchangeMarketState {
        supply: Asset::from_units(100_000_000_000_000, Symbol::new(4, "RAMCORE")),
        base: Connector {
            balance: Asset::from_units(input.base, Symbol::new(0, "RAM")),
            weight: 0.5,
        },
        quote: Connector {
            balance: eos(input.quote),
            weight: 0.5,
        },
    };
    if let Ok(market) = ConstantProductExchange::new(&exchange) {
        let result = market.price_per_unit(input.units);
        if input.units > 0 && u128::from(input.units) * 2 > input.base as u128 {
            assert!(matches!(
                result,
                Err(PricingError::InsufficientLiquidity { .. })
            ));
        }
        let _ = market.price_per_coarse_unit(input.units);
        let _ = market.proceeds_for(input.units);
    }
});
