use {
    crate::{asset::Asset, error::PricingError},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

/// Seconds in one day, used to turn per-block limits into daily capacity.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Chain constants the pricers are evaluated against.
///
/// Nothing here is global: every pricer borrows a `PricingConfig`, so quotes
/// for chains with different constants can be computed side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PricingConfig {
    /// Scalar applied when converting between resource units and stake
    /// weight. Usage samples are expressed in units per `weight_precision`
    /// stake weight.
    pub weight_precision: u64,

    /// Fixed-point scale of utilization fractions. The lease contract uses
    /// `10^15`.
    pub frac_scale: u64,

    /// Virtual block CPU limit in microseconds.
    pub default_block_cpu_limit: u64,

    /// Virtual block NET limit in bytes.
    pub default_block_net_limit: u64,

    /// Blocks produced per second (500 ms blocks).
    pub blocks_per_second: u64,

    /// Reference amount, in smallest units of the base token, used by the
    /// bancor market's linear price approximation (`1.0000` of a 4 decimal
    /// token).
    pub bancor_reference_units: u64,
}

impl PricingConfig {
    /// Number of blocks produced in one day.
    #[inline]
    pub fn blocks_per_day(&self) -> u64 {
        self.blocks_per_second.saturating_mul(SECONDS_PER_DAY)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            weight_precision: 1_000_000,
            frac_scale: 1_000_000_000_000_000,
            default_block_cpu_limit: 200_000,
            default_block_net_limit: 1_048_576_000,
            blocks_per_second: 2,
            bancor_reference_units: 10_000,
        }
    }
}

/// Validate that a `PricingConfig` can be used for conversions.
pub fn validate_config(config: &PricingConfig) -> Result<(), PricingError> {
    if config.weight_precision == 0 {
        return Err(PricingError::InvalidConfig {
            reason: "weight_precision must be > 0".to_string(),
        });
    }
    if config.frac_scale == 0 {
        return Err(PricingError::InvalidConfig {
            reason: "frac_scale must be > 0".to_string(),
        });
    }
    if config.default_block_cpu_limit == 0 || config.default_block_net_limit == 0 {
        return Err(PricingError::InvalidConfig {
            reason: format!(
                "block limits must be > 0 (cpu {}, net {})",
                config.default_block_cpu_limit, config.default_block_net_limit
            ),
        });
    }
    if config.blocks_per_second == 0 {
        return Err(PricingError::InvalidConfig {
            reason: "blocks_per_second must be > 0".to_string(),
        });
    }
    if config.bancor_reference_units == 0 {
        return Err(PricingError::InvalidConfig {
            reason: "bancor_reference_units must be > 0".to_string(),
        });
    }
    Ok(())
}

/// Per-call knobs accepted by the pricers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingOptions {
    /// Evaluation time in unix seconds. Wall-clock time when `None`.
    pub timestamp: Option<u64>,

    /// Overrides [`PricingConfig::default_block_cpu_limit`].
    pub virtual_block_cpu_limit: Option<u64>,

    /// Overrides [`PricingConfig::default_block_net_limit`].
    pub virtual_block_net_limit: Option<u64>,

    /// Reject quotes priced below this amount.
    pub min_payment: Option<Asset>,
}

impl PricingOptions {
    /// Options pinned to a fixed evaluation time.
    pub fn at(timestamp: u64) -> Self {
        Self {
            timestamp: Some(timestamp),
            ..Self::default()
        }
    }
}
