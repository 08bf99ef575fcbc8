//! Fuzz the bonding-curve pricer with random curve snapshots and requests.
//!
//! Goals:
//! - Find panics, overflows, underflows, or division-by-zero.
//! - Verify that decayed utilization stays within [utilization, adjusted].
//! - Verify that a successful quote is positive and in the curve's symbol.
//! - Verify that coarse and base unit quotes agree.

#![no_main]

use {
    arbitrary::{Arbitrary, Unstructured},
    libfuzzer_sys::fuzz_target,
    resource_pricing::{
        decay::adjusted_utilization, Asset, BondingCurvePricer, Cpu, Net, PricingConfig,
        PricingOptions, PrimaryMarket, PrimaryMarketState, ResourceCurveState, Symbol,
        UsageSample,
    },
};

/// Fuzz input: a raw curve snapshot plus one request.
#[derive(Debug)]
struct FuzzInput {
    // Curve
    weight: i64,
    exponent: f64,
    decay_secs: u32,
    min_price: i64,
    max_price: i64,
    utilization: i64,
    adjusted_utilization: i64,
    utilization_timestamp: u32,

    // Request
    cpu_sample: u128,
    net_sample: u128,
    units: u64,
    coarse_units: u32,
    now: u64,
    min_payment: Option<i64>,
}

impl<'a> Arbitrary<'a> for FuzzInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(FuzzInput {
            weight: u.arbitrary()?,
            exponent: u.arbitrary()?,
            decay_secs: u.arbitrary()?,
            min_price: u.arbitrary()?,
            max_price: u.arbitrary()?,
            utilization: u.arbitrary()?,
            adjusted_utilization: u.arbitrary()?,
            utilization_timestamp: u.arbitrary()?,
            cpu_sample: u.arbitrary()?,
            net_sample: u.arbitrary()?,
            units: u.arbitrary()?,
            coarse_units: u.arbitrary()?,
            now: u.int_in_range(0..=u64::from(u32::MAX) * 2)?,
            min_payment: u.arbitrary()?,
        })
    }
}

fn curve(input: &FuzzInput) -> ResourceCurveState {
    let eos = Symbol::new(4, "EOS");
    ResourceCurveState {
        version: 0,
        weight: input.weight,
        weight_ratio: 1,
        assumed_stake_weight: 1,
        initial_weight_ratio: 1,
        target_weight_ratio: 1,
        initial_timestamp: 0,
        target_timestamp: 0,
        exponent: input.exponent,
        decay_secs: input.decay_secs,
        min_price: Asset::from_units(input.min_price, eos.clone()),
        max_price: Asset::from_units(input.max_price, eos),
        utilization: input.utilization,
        adjusted_utilization: input.adjusted_utilization,
        utilization_timestamp: input.utilization_timestamp,
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let input: FuzzInput = match u.arbitrary() {
        Ok(i) => i,
        Err(_) => return,
    };

    let config = PricingConfig::default();
    let state = curve(&input);
    let sample = UsageSample {
        cpu: input.cpu_sample,
        net: input.net_sample,
    };
    let options = PricingOptions {
        min_payment: input
            .min_payment
            .map(|units| Asset::from_units(units, Symbol::new(4, "EOS"))),
        ..PricingOptions::at(input.now)
    };

    // ── Test 1: decay must not panic and must stay in bounds ──

    if let Ok(adjusted) = adjusted_utilization(&state, input.now) {
        assert!(adjusted >= 0, "negative adjusted utilization {adjusted}");
        if state.utilization < state.adjusted_utilization {
            assert!(
                adjusted >= state.utilization && adjusted <= state.adjusted_utilization,
                "adjusted {adjusted} outside [{}, {}]",
                state.utilization,
                state.adjusted_utilization
            );
        } else {
            assert_eq!(adjusted, state.adjusted_utilization);
        }
    }

    // ── Test 2: quotes must not panic; successes are positive ──

    let Ok(cpu) = BondingCurvePricer::<Cpu>::new(&state, &config) else {
        return;
    };
    if let Ok(price) = cpu.price_per_unit(&sample, input.units, &options) {
        assert_eq!(price.symbol, state.min_price.symbol);
        assert!(input.units == 0 || price.units > 0, "zero price for {}", input.units);
    }

    // ── Test 3: coarse units are 1000 base units ──

    let coarse = u64::from(input.coarse_units);
    assert_eq!(
        cpu.price_per_coarse_unit(&sample, coarse, &options),
        cpu.price_per_unit(&sample, coarse * 1_000, &options)
    );
    if let Ok(net) = BondingCurvePricer::<Net>::new(&state, &config) {
        assert_eq!(
            net.price_per_coarse_unit(&sample, coarse, &options),
            net.price_per_unit(&sample, coarse * 1_000, &options)
        );
    }

    // ── Test 4: read-only helpers must not panic ──

    let _ = cpu.reserved();
    let _ = cpu.weight_ratio_at(input.now);
    let _ = cpu.price_function(input.utilization);

    // ── Test 5: a combined lease never undercuts either leg ──

    let market_state = PrimaryMarketState {
        version: 0,
        net: state.clone(),
        cpu: state.clone(),
        lease_days: 1,
        min_fee: Asset::from_units(0, Symbol::new(4, "EOS")),
    };
    let market = PrimaryMarket::new(&market_state, &config);
    if let Ok(quote) = market.quote(&sample, input.units, input.units / 2, &options) {
        assert!(quote.total_fee.units >= quote.cpu_fee.units);
        assert!(quote.total_fee.units >= quote.net_fee.units);
    }
});
