//! Legacy linear staking market (bancor-style pool).
//!
//! Pool shares are minted against lendable base tokens; resources are rented
//! out of the unlent balance at a rate set by `total_rent / total_unlent`.
//!
//! The per-unit price here is a **linear approximation** of the pool's
//! marginal rate, not an integral over the bancor curve. It is accurate for
//! requests that are small relative to the pool and increasingly optimistic
//! as requests grow.

use {
    crate::{
        asset::Asset,
        config::{validate_config, PricingConfig},
        error::PricingError,
        fixed_point::{mul_div, FixedPoint, Rounding},
        resource::ResourceKind,
        state::{LegacyLinearMarketState, UsageSample},
    },
    log::debug,
};

#[derive(Debug, Clone, Copy)]
pub struct BancorExchangeModel<'a> {
    state: &'a LegacyLinearMarketState,
    config: &'a PricingConfig,
}

impl<'a> BancorExchangeModel<'a> {
    pub fn new(
        state: &'a LegacyLinearMarketState,
        config: &'a PricingConfig,
    ) -> Result<Self, PricingError> {
        validate_config(config)?;
        let base = &state.total_lendable.symbol;
        for amount in [&state.total_lent, &state.total_unlent, &state.total_rent] {
            amount.ensure_symbol(base)?;
        }
        for amount in [
            &state.total_lent,
            &state.total_unlent,
            &state.total_rent,
            &state.total_lendable,
            &state.total_supply,
        ] {
            if amount.units < 0 {
                return Err(PricingError::InvalidState {
                    reason: format!("pool totals must be >= 0, got {amount}"),
                });
            }
        }
        Ok(Self { state, config })
    }

    /// `total_lent / total_lendable`, the share of the pool rented out.
    pub fn reserved_ratio(&self) -> Result<FixedPoint, PricingError> {
        let lent = self.state.total_lent.units;
        let lendable = self.state.total_lendable.units;
        if lendable == 0 {
            return Err(PricingError::InvalidState {
                reason: "total_lendable must be > 0".to_string(),
            });
        }
        if lent > lendable {
            return Err(PricingError::InvalidState {
                reason: format!(
                    "total_lent ({}) exceeds total_lendable ({})",
                    self.state.total_lent, self.state.total_lendable
                ),
            });
        }
        FixedPoint::from_ratio(
            lent.unsigned_abs().into(),
            lendable.unsigned_abs().into(),
            self.frac_scale(),
            Rounding::Down,
        )
    }

    /// Base tokens backing one pool share, `(lent + unlent) / supply`,
    /// compared as decimal values.
    pub fn conversion_rate(&self) -> Result<FixedPoint, PricingError> {
        let supply = &self.state.total_supply;
        if supply.units == 0 {
            return Err(PricingError::InvalidState {
                reason: "total_supply must be > 0".to_string(),
            });
        }
        let backing = self.state.total_lent.checked_add(&self.state.total_unlent)?;
        let numerator = u128::from(backing.units.unsigned_abs())
            .checked_mul(u128::from(supply.symbol.scale()?.unsigned_abs()))
            .ok_or(PricingError::Overflow)?;
        let denominator = u128::from(supply.units.unsigned_abs())
            .checked_mul(u128::from(backing.symbol.scale()?.unsigned_abs()))
            .ok_or(PricingError::Overflow)?;
        FixedPoint::from_ratio(numerator, denominator, self.frac_scale(), Rounding::Down)
    }

    /// Redeem `shares` for base tokens: `shares * lendable / supply`,
    /// rounded down.
    pub fn exchange(&self, shares: &Asset) -> Result<Asset, PricingError> {
        let supply = &self.state.total_supply;
        shares.ensure_symbol(&supply.symbol)?;
        if shares.units < 0 {
            return Err(PricingError::InvalidState {
                reason: format!("cannot redeem a negative amount {shares}"),
            });
        }
        if supply.units == 0 {
            return Err(PricingError::InvalidState {
                reason: "total_supply must be > 0".to_string(),
            });
        }
        let units = mul_div(
            shares.units.unsigned_abs().into(),
            self.state.total_lendable.units.unsigned_abs().into(),
            supply.units.unsigned_abs().into(),
            Rounding::Down,
        )?;
        Ok(Asset::from_units(
            i64::try_from(units).map_err(|_| PricingError::Overflow)?,
            self.state.total_lendable.symbol.clone(),
        ))
    }

    /// Price of renting `units` base units of resource `R`.
    ///
    /// A fixed reference amount of base token
    /// ([`PricingConfig::bancor_reference_units`]) is converted to stake
    /// weight at the pool's `unlent / rent` rate, then to resource units via
    /// the usage sample; the request is charged pro rata, rounded up.
    pub fn price_per_unit<R: ResourceKind>(
        &self,
        sample: &UsageSample,
        units: u64,
    ) -> Result<Asset, PricingError> {
        let symbol = self.state.total_lent.symbol.clone();
        if units == 0 {
            return Ok(Asset::zero(symbol));
        }
        let (rent, unlent) = self.rent_and_unlent(units)?;
        let scalar = sample_scalar::<R>(sample)?;
        let reference = u128::from(self.config.bancor_reference_units);

        let stake = mul_div(reference, unlent, rent, Rounding::Down)?;
        let leased = mul_div(
            stake,
            scalar,
            u128::from(self.config.weight_precision),
            Rounding::Down,
        )?;
        if leased == 0 {
            return Err(PricingError::InsufficientLiquidity {
                requested: i64::try_from(units).unwrap_or(i64::MAX),
                available: 0,
            });
        }
        let cost = mul_div(u128::from(units), reference, leased, Rounding::Up)?;

        debug!(
            "{} bancor quote: units={} stake_per_reference={} units_per_reference={} cost={}",
            R::NAME,
            units,
            stake,
            leased,
            cost
        );

        Ok(Asset::from_units(
            i64::try_from(cost).map_err(|_| PricingError::Overflow)?,
            symbol,
        ))
    }

    /// Price of renting `amount` coarse units (ms or kb) of resource `R`.
    pub fn price_per_coarse_unit<R: ResourceKind>(
        &self,
        sample: &UsageSample,
        amount: u64,
    ) -> Result<Asset, PricingError> {
        let units = amount
            .checked_mul(R::BASE_PER_COARSE)
            .ok_or(PricingError::Overflow)?;
        self.price_per_unit::<R>(sample, units)
    }

    /// Price of renting `units` via the explicit ratio
    /// `units * precision * rent / (sample * unlent)`, rounded up once.
    #[deprecated(
        note = "disagrees with observed chain quotes at small pool depths; use `price_per_unit`"
    )]
    pub fn price_per_unit_direct<R: ResourceKind>(
        &self,
        sample: &UsageSample,
        units: u64,
    ) -> Result<Asset, PricingError> {
        let symbol = self.state.total_lent.symbol.clone();
        if units == 0 {
            return Ok(Asset::zero(symbol));
        }
        let (rent, unlent) = self.rent_and_unlent(units)?;
        let scalar = sample_scalar::<R>(sample)?;
        let weight = u128::from(units)
            .checked_mul(u128::from(self.config.weight_precision))
            .ok_or(PricingError::Overflow)?;
        let denominator = scalar.checked_mul(unlent).ok_or(PricingError::Overflow)?;
        let cost = mul_div(weight, rent, denominator, Rounding::Up)?;
        Ok(Asset::from_units(
            i64::try_from(cost).map_err(|_| PricingError::Overflow)?,
            symbol,
        ))
    }

    fn rent_and_unlent(&self, units: u64) -> Result<(u128, u128), PricingError> {
        let rent = self.state.total_rent.units;
        let unlent = self.state.total_unlent.units;
        if rent == 0 {
            return Err(PricingError::InvalidState {
                reason: "total_rent must be > 0".to_string(),
            });
        }
        if unlent == 0 {
            return Err(PricingError::InsufficientLiquidity {
                requested: i64::try_from(units).unwrap_or(i64::MAX),
                available: 0,
            });
        }
        Ok((rent.unsigned_abs().into(), unlent.unsigned_abs().into()))
    }

    #[inline]
    fn frac_scale(&self) -> u128 {
        u128::from(self.config.frac_scale)
    }
}

fn sample_scalar<R: ResourceKind>(sample: &UsageSample) -> Result<u128, PricingError> {
    match R::sample(sample) {
        0 => Err(PricingError::InvalidUsageSample { resource: R::NAME }),
        scalar => Ok(scalar),
    }
}
