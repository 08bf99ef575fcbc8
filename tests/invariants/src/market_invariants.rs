//! Property-based tests for the legacy markets.
//!
//! Properties tested:
//! 1. reserved_ratio is always in [0, 1].
//! 2. The reference-amount bancor price never undercuts the single-division
//!    ratio and stays within floor-rounding distance of it.
//! 3. Constant-product quotes fail exactly when a request takes more than
//!    half of the base pool, and grow with the request otherwise.
//! 4. Selling into the pool never returns more than buying the same amount
//!    costs.

#[cfg(test)]
mod tests {
    use {
        proptest::prelude::*,
        resource_pricing::{
            Asset, BancorExchangeModel, Connector, ConstantProductExchange, Cpu,
            LegacyExchangeMarketState, LegacyLinearMarketState, Net, PricingConfig, PricingError,
            Symbol, UsageSample,
        },
    };

    fn eos(units: i64) -> Asset {
        Asset::from_units(units, Symbol::new(4, "EOS"))
    }

    /// Supply is 10_000 shares per base unit; callers keep `lent + unlent`
    /// below `i64::MAX / 10_000`.
    fn linear_market(lent: i64, unlent: i64, rent: i64) -> LegacyLinearMarketState {
        LegacyLinearMarketState {
            version: 0,
            total_lent: eos(lent),
            total_unlent: eos(unlent),
            total_rent: eos(rent),
            total_lendable: eos(lent + unlent),
            total_supply: Asset::from_units((lent + unlent) * 10_000, Symbol::new(4, "REX")),
            proceeds: eos(0),
            counter: 0,
        }
    }

    fn exchange_market(base: i64, quote: i64) -> LegacyExchangeMarketState {
        LegacyExchangeMarketState {
            supply: Asset::from_units(100_000_000_000_000, Symbol::new(4, "RAMCORE")),
            base: Connector {
                balance: Asset::from_units(base, Symbol::new(0, "RAM")),
                weight: 0.5,
            },
            quote: Connector {
                balance: eos(quote),
                weight: 0.5,
            },
        }
    }

    /// `ppm` millionths of the base pool, at least one unit.
    fn half_pool_share(base: i64, ppm: u64) -> u64 {
        (base as u64 * ppm / 1_000_000).max(1)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1. Reserved ratio bounds
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn reserved_ratio_is_a_fraction(
            lent in 0i64..=100_000_000_000_000,
            unlent in 0i64..=100_000_000_000_000,
        ) {
            prop_assume!(lent + unlent > 0);
            let state = linear_market(lent, unlent, 1);
            let config = PricingConfig::default();
            let model = BancorExchangeModel::new(&state, &config).unwrap();

            let ratio = model.reserved_ratio().unwrap();
            prop_assert!(ratio.raw() <= ratio.scale());
            if lent == 0 {
                prop_assert!(ratio.is_zero());
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 2. Reference-amount vs single-division pricing
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        #[allow(deprecated)]
        fn reference_price_brackets_direct_ratio(
            unlent in 1_000_000_000i64..=10_000_000_000_000,
            rent in 1_000i64..=1_000_000_000,
            cpu_sample in 1_000_000u128..=1_000_000_000_000,
            net_sample in 1_000_000u128..=1_000_000_000_000,
            units in 1u64..=10_000_000_000,
        ) {
            let config = PricingConfig::default();
            let reference = u128::from(config.bancor_reference_units);
            let precision = u128::from(config.weight_precision);
            let stake = reference * unlent as u128 / rent as u128;
            prop_assume!(stake >= 1_000_000);
            prop_assume!(stake * cpu_sample / precision >= 1_000_000);
            prop_assume!(stake * net_sample / precision >= 1_000_000);

            let state = linear_market(0, unlent, rent);
            let model = BancorExchangeModel::new(&state, &config).unwrap();
            let sample = UsageSample { cpu: cpu_sample, net: net_sample };

            let cpu = model.price_per_unit::<Cpu>(&sample, units).unwrap().units as f64;
            let cpu_direct = model.price_per_unit_direct::<Cpu>(&sample, units).unwrap().units as f64;
            prop_assert!(cpu >= cpu_direct, "cpu {cpu} undercuts {cpu_direct}");
            prop_assert!(cpu <= cpu_direct * (1.0 + 1e-5) + 1.0, "cpu {cpu} vs {cpu_direct}");

            let net = model.price_per_unit::<Net>(&sample, units).unwrap().units as f64;
            let net_direct = model.price_per_unit_direct::<Net>(&sample, units).unwrap().units as f64;
            prop_assert!(net >= net_direct, "net {net} undercuts {net_direct}");
            prop_assert!(net <= net_direct * (1.0 + 1e-5) + 1.0, "net {net} vs {net_direct}");
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 3. Constant-product liquidity bound
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn constant_product_fails_iff_pool_would_halve(
            base in 0i64..=100_000_000_000,
            quote in 1i64..=10_000_000_000_000,
            units in 1u64..=200_000_000_000,
        ) {
            let state = exchange_market(base, quote);
            let market = ConstantProductExchange::new(&state).unwrap();
            let result = market.price_per_unit(units);

            if u128::from(units) * 2 > base as u128 {
                let is_liquidity_error =
                    matches!(result, Err(PricingError::InsufficientLiquidity { .. }));
                prop_assert!(is_liquidity_error);
            } else {
                let price = result.unwrap();
                prop_assert!(price.units > 0);
                prop_assert!(price.units <= quote);
            }
        }

        #[test]
        fn constant_product_is_monotone(
            base in 2i64..=100_000_000_000,
            quote in 1i64..=10_000_000_000_000,
            a_ppm in 0u64..=500_000,
            b_ppm in 0u64..=500_000,
        ) {
            let (low, high) = (
                half_pool_share(base, a_ppm.min(b_ppm)),
                half_pool_share(base, a_ppm.max(b_ppm)),
            );
            let state = exchange_market(base, quote);
            let market = ConstantProductExchange::new(&state).unwrap();

            let cheap = market.price_per_unit(low).unwrap();
            let dear = market.price_per_unit(high).unwrap();
            prop_assert!(cheap.units <= dear.units);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 4. No round-trip profit
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn selling_never_beats_buying(
            base in 2i64..=100_000_000_000,
            quote in 1i64..=10_000_000_000_000,
            ppm in 0u64..=500_000,
        ) {
            let units = half_pool_share(base, ppm);
            let state = exchange_market(base, quote);
            let market = ConstantProductExchange::new(&state).unwrap();

            let cost = market.price_per_unit(units).unwrap();
            let proceeds = market.proceeds_for(units).unwrap();
            prop_assert!(proceeds.units <= cost.units);
        }
    }
}
