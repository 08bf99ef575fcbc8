//! Bonding-curve pricer for the primary leasing market.
//!
//! Replicates the lease contract's fee computation so a quote matches what
//! the chain will charge:
//!
//! ```text
//! p(u) = min_price + (max_price - min_price) * u^(exponent - 1)
//! f(u) = min_price * u + (max_price - min_price) / exponent * u^exponent
//! ```
//!
//! where `u` is utilization as a fraction of `weight`. Unit and weight
//! conversions run in 128-bit integers with fixed rounding directions; only
//! the curve itself is evaluated in `f64`, exactly as the contract does.

use {
    crate::{
        asset::{Asset, Symbol},
        config::{validate_config, PricingConfig, PricingOptions},
        decay::{self, current_timestamp},
        error::PricingError,
        fixed_point::{mul_div, FixedPoint, Rounding},
        resource::ResourceKind,
        state::{ResourceCurveState, UsageSample},
    },
    log::{debug, trace},
    std::marker::PhantomData,
};

/// Prices leases of resource `R` against one curve snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BondingCurvePricer<'a, R: ResourceKind> {
    state: &'a ResourceCurveState,
    config: &'a PricingConfig,
    resource: PhantomData<R>,
}

impl<'a, R: ResourceKind> BondingCurvePricer<'a, R> {
    /// Wrap a curve snapshot after checking it can be priced at all.
    pub fn new(
        state: &'a ResourceCurveState,
        config: &'a PricingConfig,
    ) -> Result<Self, PricingError> {
        validate_config(config)?;
        validate_curve(state)?;
        Ok(Self {
            state,
            config,
            resource: PhantomData,
        })
    }

    pub fn state(&self) -> &ResourceCurveState {
        self.state
    }

    /// Symbol every price from this curve is denominated in.
    pub fn symbol(&self) -> &Symbol {
        &self.state.min_price.symbol
    }

    /// Daily chain capacity in base units (µs or bytes).
    pub fn units_per_day(&self, options: &PricingOptions) -> u64 {
        R::block_limit(self.config, options).saturating_mul(self.config.blocks_per_day())
    }

    /// Daily chain capacity in coarse units (ms or kb), rounded down.
    pub fn coarse_units_per_day(&self, options: &PricingOptions) -> u64 {
        self.units_per_day(options) / R::BASE_PER_COARSE
    }

    /// Base units to stake weight. Rounds down: the requester never gets
    /// credited with more weight than the units buy.
    pub fn units_to_weight(&self, sample: &UsageSample, units: u64) -> Result<u128, PricingError> {
        mul_div(
            u128::from(units),
            u128::from(self.config.weight_precision),
            self.sample_scalar(sample)?,
            Rounding::Down,
        )
    }

    /// Stake weight to base units. Rounds up.
    pub fn weight_to_units(&self, sample: &UsageSample, weight: u128) -> Result<u128, PricingError> {
        mul_div(
            weight,
            self.sample_scalar(sample)?,
            u128::from(self.config.weight_precision),
            Rounding::Up,
        )
    }

    /// The request as a fraction of the market's weight, at
    /// `config.frac_scale` fixed-point precision, rounded down.
    pub fn fraction(&self, sample: &UsageSample, units: u64) -> Result<FixedPoint, PricingError> {
        let weight = self.units_to_weight(sample, units)?;
        FixedPoint::from_ratio(
            weight,
            self.weight(),
            u128::from(self.config.frac_scale),
            Rounding::Down,
        )
    }

    /// Utilization added by a lease of `frac`: `ceil(weight * frac)`.
    pub fn utilization_increase(&self, frac: &FixedPoint) -> Result<i64, PricingError> {
        let increase = frac.mul_int(self.weight(), Rounding::Up)?;
        i64::try_from(increase).map_err(|_| PricingError::Overflow)
    }

    /// Decayed utilization baseline at `now` (unix seconds).
    pub fn adjusted_utilization(&self, now: u64) -> Result<i64, PricingError> {
        decay::adjusted_utilization(self.state, now)
    }

    /// Marginal price `p(u)` in smallest units. Flat `max_price` when the
    /// exponent leaves no slope (`exponent <= 1`).
    pub fn price_function(&self, utilization: i64) -> f64 {
        let min_price = self.state.min_price.units as f64;
        let max_price = self.state.max_price.units as f64;
        let new_exponent = self.state.exponent - 1.0;
        if new_exponent <= 0.0 {
            return max_price;
        }
        min_price
            + (max_price - min_price)
                * (utilization as f64 / self.state.weight as f64).powf(new_exponent)
    }

    /// `f(end) - f(start)`: the integral of `p` between two utilizations.
    pub fn price_integral_delta(&self, start_utilization: i64, end_utilization: i64) -> f64 {
        let min_price = self.state.min_price.units as f64;
        let max_price = self.state.max_price.units as f64;
        let exponent = self.state.exponent;
        let coefficient = (max_price - min_price) / exponent;
        let start_u = start_utilization as f64 / self.state.weight as f64;
        let end_u = end_utilization as f64 / self.state.weight as f64;
        min_price * end_u - min_price * start_u + coefficient * end_u.powf(exponent)
            - coefficient * start_u.powf(exponent)
    }

    /// Raw fee, in smallest units, for adding `utilization_increase`.
    ///
    /// Capacity between `utilization` and the decayed baseline is still hot
    /// from recent leases and is charged at the flat price `p(adjusted)`.
    /// Whatever lies beyond the baseline follows the curve integral.
    pub fn fee(&self, utilization_increase: i64, adjusted_utilization: i64) -> f64 {
        let mut start_utilization = self.state.utilization;
        let end_utilization = start_utilization.saturating_add(utilization_increase);
        let mut fee = 0.0;

        if start_utilization < adjusted_utilization {
            let hot = utilization_increase.min(adjusted_utilization.saturating_sub(start_utilization));
            fee += self.price_function(adjusted_utilization) * hot as f64
                / self.state.weight as f64;
            start_utilization = adjusted_utilization;
        }

        if start_utilization < end_utilization {
            fee += self.price_integral_delta(start_utilization, end_utilization);
        }

        fee
    }

    /// Price of leasing `units` base units (µs or bytes).
    ///
    /// The raw fee is rounded up to the symbol's smallest unit. Fails with
    /// [`PricingError::BelowPrecision`] when a non-zero request prices at
    /// zero and with [`PricingError::BelowMinimumPayment`] when
    /// `options.min_payment` exceeds the price.
    pub fn price_per_unit(
        &self,
        sample: &UsageSample,
        units: u64,
        options: &PricingOptions,
    ) -> Result<Asset, PricingError> {
        let symbol = self.symbol().clone();
        if units == 0 {
            return Ok(Asset::zero(symbol));
        }

        let frac = self.fraction(sample, units)?;
        let increase = self.utilization_increase(&frac)?;
        self.ensure_capacity(increase)?;

        let now = options.timestamp.unwrap_or_else(current_timestamp);
        let adjusted = self.adjusted_utilization(now)?;
        let fee = self.fee(increase, adjusted);

        debug!(
            "{} quote: units={} {} frac={} increase={} adjusted={} fee={}",
            R::NAME,
            units,
            R::BASE_UNIT,
            frac,
            increase,
            adjusted,
            fee
        );

        let price = Asset::from_fee_ceil(fee, symbol)?;
        if price.units <= 0 {
            return Err(PricingError::BelowPrecision {
                requested: units,
                symbol: price.symbol.code,
            });
        }
        if let Some(minimum) = &options.min_payment {
            minimum.ensure_symbol(&price.symbol)?;
            if minimum.units > price.units {
                return Err(PricingError::BelowMinimumPayment {
                    price: price.to_string(),
                    minimum: minimum.to_string(),
                });
            }
        }
        Ok(price)
    }

    /// Price of leasing `amount` coarse units (ms or kb).
    pub fn price_per_coarse_unit(
        &self,
        sample: &UsageSample,
        amount: u64,
        options: &PricingOptions,
    ) -> Result<Asset, PricingError> {
        trace!("{} quote for {} {}", R::NAME, amount, R::COARSE_UNIT);
        let units = amount
            .checked_mul(R::BASE_PER_COARSE)
            .ok_or(PricingError::Overflow)?;
        self.price_per_unit(sample, units, options)
    }

    /// Share of the market's weight currently leased out.
    pub fn reserved(&self) -> Result<FixedPoint, PricingError> {
        FixedPoint::from_ratio(
            u128::try_from(self.state.utilization).map_err(|_| PricingError::Overflow)?,
            self.weight(),
            u128::from(self.config.frac_scale),
            Rounding::Down,
        )
    }

    /// Share of the market's capacity handed to leasing so far:
    /// `1 - weight_ratio / target_weight_ratio / 100`, clamped at zero.
    pub fn allocated(&self) -> Result<FixedPoint, PricingError> {
        let state = self.state;
        if state.weight_ratio < 0 || state.target_weight_ratio <= 0 {
            return Err(PricingError::InvalidState {
                reason: format!(
                    "weight ratios must be weight_ratio >= 0 and target_weight_ratio > 0, got {} / {}",
                    state.weight_ratio, state.target_weight_ratio
                ),
            });
        }
        let scale = u128::from(self.config.frac_scale);
        let target = u128::from(state.target_weight_ratio.unsigned_abs())
            .checked_mul(100)
            .ok_or(PricingError::Overflow)?;
        // Round the subtracted share up so the result rounds down.
        let retained = mul_div(
            state.weight_ratio.unsigned_abs().into(),
            scale,
            target,
            Rounding::Up,
        )?;
        Ok(FixedPoint::from_raw(scale.saturating_sub(retained), scale))
    }

    /// Capacity-shift ratio at `now`, interpolated linearly between the
    /// initial and target ratios over the shift window.
    pub fn weight_ratio_at(&self, now: u64) -> Result<i64, PricingError> {
        let state = self.state;
        let initial = u64::from(state.initial_timestamp);
        let target = u64::from(state.target_timestamp);
        if now >= target || target <= initial {
            return Ok(state.target_weight_ratio);
        }
        if now <= initial {
            return Ok(state.initial_weight_ratio);
        }
        let span = i128::from(
            state
                .target_weight_ratio
                .checked_sub(state.initial_weight_ratio)
                .ok_or(PricingError::Overflow)?,
        );
        let shifted = span
            .checked_mul(i128::from(now - initial))
            .ok_or(PricingError::Overflow)?
            / i128::from(target - initial);
        i64::try_from(i128::from(state.initial_weight_ratio) + shifted)
            .map_err(|_| PricingError::Overflow)
    }

    fn ensure_capacity(&self, increase: i64) -> Result<(), PricingError> {
        let end = self.state.utilization.checked_add(increase);
        match end {
            Some(end) if end <= self.state.weight => Ok(()),
            _ => Err(PricingError::InsufficientCapacity {
                utilization: self.state.utilization,
                increase,
                weight: self.state.weight,
            }),
        }
    }

    fn sample_scalar(&self, sample: &UsageSample) -> Result<u128, PricingError> {
        match R::sample(sample) {
            0 => Err(PricingError::InvalidUsageSample { resource: R::NAME }),
            scalar => Ok(scalar),
        }
    }

    #[inline]
    fn weight(&self) -> u128 {
        // `validate_curve` guarantees a positive weight.
        self.state.weight.unsigned_abs().into()
    }
}

/// Check the structural preconditions the curve math relies on.
pub fn validate_curve(state: &ResourceCurveState) -> Result<(), PricingError> {
    if state.weight <= 0 {
        return Err(PricingError::InvalidState {
            reason: format!("weight must be > 0, got {}", state.weight),
        });
    }
    if !state.exponent.is_finite() || state.exponent <= 0.0 {
        return Err(PricingError::InvalidState {
            reason: format!("exponent must be finite and > 0, got {}", state.exponent),
        });
    }
    state.max_price.ensure_symbol(&state.min_price.symbol)?;
    if state.min_price.units < 0 || state.min_price.units > state.max_price.units {
        return Err(PricingError::InvalidState {
            reason: format!(
                "price range must satisfy 0 <= min_price ({}) <= max_price ({})",
                state.min_price, state.max_price
            ),
        });
    }
    if state.utilization < 0 || state.adjusted_utilization < 0 {
        return Err(PricingError::InvalidState {
            reason: format!(
                "utilization ({}) and adjusted_utilization ({}) must be >= 0",
                state.utilization, state.adjusted_utilization
            ),
        });
    }
    Ok(())
}
