use {
    crate::{
        asset::Asset,
        config::{PricingConfig, PricingOptions, SECONDS_PER_DAY},
        curve::BondingCurvePricer,
        decay::current_timestamp,
        error::PricingError,
        resource::{Cpu, Net, ResourceKind},
        state::{PrimaryMarketState, UsageSample},
    },
    log::debug,
    serde::{Deserialize, Serialize},
};

/// Breakdown of a combined CPU + NET lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseQuote {
    pub cpu_fee: Asset,
    pub net_fee: Asset,
    /// `cpu_fee + net_fee`.
    pub total_fee: Asset,
    pub lease_days: u32,
    /// Unix seconds at which the leased resources return to the market.
    pub expires_at: u64,
}

/// The primary leasing market: both resource curves plus the market-wide
/// minimum fee and lease duration.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryMarket<'a> {
    state: &'a PrimaryMarketState,
    config: &'a PricingConfig,
}

impl<'a> PrimaryMarket<'a> {
    pub fn new(state: &'a PrimaryMarketState, config: &'a PricingConfig) -> Self {
        Self { state, config }
    }

    pub fn pricer<R: ResourceKind>(&self) -> Result<BondingCurvePricer<'a, R>, PricingError> {
        BondingCurvePricer::new(R::curve(self.state), self.config)
    }

    pub fn cpu(&self) -> Result<BondingCurvePricer<'a, Cpu>, PricingError> {
        self.pricer::<Cpu>()
    }

    pub fn net(&self) -> Result<BondingCurvePricer<'a, Net>, PricingError> {
        self.pricer::<Net>()
    }

    /// Quote a lease of `cpu_units` µs and `net_units` bytes.
    ///
    /// Each resource is priced on its own curve and must clear its own
    /// precision check. The total must reach both the market's `min_fee`
    /// and `options.min_payment`.
    pub fn quote(
        &self,
        sample: &UsageSample,
        cpu_units: u64,
        net_units: u64,
        options: &PricingOptions,
    ) -> Result<LeaseQuote, PricingError> {
        let now = options.timestamp.unwrap_or_else(current_timestamp);
        // Pin the clock so both legs see the same decay.
        let leg_options = PricingOptions {
            timestamp: Some(now),
            min_payment: None,
            ..options.clone()
        };

        let cpu_fee = self.cpu()?.price_per_unit(sample, cpu_units, &leg_options)?;
        let net_fee = self.net()?.price_per_unit(sample, net_units, &leg_options)?;
        let total_fee = cpu_fee.checked_add(&net_fee)?;

        let mut minimum = &self.state.min_fee;
        if let Some(floor) = &options.min_payment {
            floor.ensure_symbol(&minimum.symbol)?;
            if floor.units > minimum.units {
                minimum = floor;
            }
        }
        minimum.ensure_symbol(&total_fee.symbol)?;
        if total_fee.units < minimum.units {
            debug!(
                "lease quote rejected: total {} below minimum {}",
                total_fee, minimum
            );
            return Err(PricingError::BelowMinimumPayment {
                price: total_fee.to_string(),
                minimum: minimum.to_string(),
            });
        }

        let lease_secs = u64::from(self.state.lease_days).saturating_mul(SECONDS_PER_DAY);
        Ok(LeaseQuote {
            cpu_fee,
            net_fee,
            total_fee,
            lease_days: self.state.lease_days,
            expires_at: now.saturating_add(lease_secs),
        })
    }
}
