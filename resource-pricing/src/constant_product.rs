//! Legacy constant-product market (storage bytes against a quote token).

use {
    crate::{
        asset::Asset,
        error::PricingError,
        fixed_point::{mul_div, Rounding},
        state::LegacyExchangeMarketState,
    },
    log::debug,
};

/// Base units per coarse unit (bytes per kb).
pub const BYTES_PER_KB: u64 = 1_000;

#[derive(Debug, Clone, Copy)]
pub struct ConstantProductExchange<'a> {
    state: &'a LegacyExchangeMarketState,
}

impl<'a> ConstantProductExchange<'a> {
    pub fn new(state: &'a LegacyExchangeMarketState) -> Result<Self, PricingError> {
        if state.base.balance.units < 0 || state.quote.balance.units <= 0 {
            return Err(PricingError::InvalidState {
                reason: format!(
                    "pool balances must be base >= 0 and quote > 0, got {} / {}",
                    state.base.balance, state.quote.balance
                ),
            });
        }
        Ok(Self { state })
    }

    /// Cost of buying `units` of the base resource:
    /// `quote * units / (base - units)`, rounded up.
    ///
    /// Fails with [`PricingError::InsufficientLiquidity`] when the request
    /// would take more than half of the base pool, i.e. when the cost would
    /// exceed the whole quote balance. That bound also rejects
    /// `units >= base`, where the formula divides by zero or goes negative.
    /// It is stricter than the formula alone: 600 of 1000 base units would
    /// price at 1.5x the quote balance and is rejected too.
    pub fn price_per_unit(&self, units: u64) -> Result<Asset, PricingError> {
        let symbol = self.state.quote.balance.symbol.clone();
        if units == 0 {
            return Ok(Asset::zero(symbol));
        }
        let base = self.state.base.balance.units;
        let quote = self.state.quote.balance.units;

        let requested = i128::from(units);
        if requested.saturating_mul(2) > i128::from(base) {
            debug!(
                "constant-product quote rejected: units={} base={}",
                units, base
            );
            return Err(PricingError::InsufficientLiquidity {
                requested: i64::try_from(units).unwrap_or(i64::MAX),
                available: base / 2,
            });
        }

        // `2 * units <= base` above, so `units < base` and the remainder is positive.
        let remaining = base.unsigned_abs() - units;
        let cost = mul_div(
            quote.unsigned_abs().into(),
            units.into(),
            remaining.into(),
            Rounding::Up,
        )?;
        Ok(Asset::from_units(
            i64::try_from(cost).map_err(|_| PricingError::Overflow)?,
            symbol,
        ))
    }

    /// Cost of buying `kilobytes * 1000` units.
    pub fn price_per_coarse_unit(&self, kilobytes: u64) -> Result<Asset, PricingError> {
        let units = kilobytes
            .checked_mul(BYTES_PER_KB)
            .ok_or(PricingError::Overflow)?;
        self.price_per_unit(units)
    }

    /// Quote tokens received for selling `units` back into the pool:
    /// `quote * units / (base + units)`, rounded down.
    pub fn proceeds_for(&self, units: u64) -> Result<Asset, PricingError> {
        let base = self.state.base.balance.units.unsigned_abs();
        let quote = self.state.quote.balance.units.unsigned_abs();
        let deepened = u128::from(base) + u128::from(units);
        if deepened == 0 {
            return Ok(Asset::zero(self.state.quote.balance.symbol.clone()));
        }
        let proceeds = mul_div(quote.into(), units.into(), deepened, Rounding::Down)?;
        Ok(Asset::from_units(
            i64::try_from(proceeds).map_err(|_| PricingError::Overflow)?,
            self.state.quote.balance.symbol.clone(),
        ))
    }
}
