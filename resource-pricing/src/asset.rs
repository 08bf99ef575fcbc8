//! Money amounts: an integer number of smallest units plus a symbol.
//!
//! Prices leave the engine only as [`Asset`]s. Anything computed in floating
//! point is rounded back to whole smallest units before it gets here.

use {
    crate::error::PricingError,
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// Largest supported decimal precision; `10^18` is the largest power of ten
/// that fits in an `i64`.
pub const MAX_PRECISION: u8 = 18;

/// Token symbol: decimal precision and ticker.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Symbol {
    pub precision: u8,
    pub code: String,
}

impl Symbol {
    pub fn new(precision: u8, code: impl Into<String>) -> Self {
        Self {
            precision,
            code: code.into(),
        }
    }

    /// Number of smallest units in one whole token, `10^precision`.
    pub fn scale(&self) -> Result<i64, PricingError> {
        if self.precision > MAX_PRECISION {
            return Err(PricingError::Overflow);
        }
        10i64
            .checked_pow(u32::from(self.precision))
            .ok_or(PricingError::Overflow)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// A money amount (the chain's `asset` type).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Asset {
    /// Magnitude in smallest units, e.g. `10_000` for `1.0000 EOS`.
    pub units: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn from_units(units: i64, symbol: Symbol) -> Self {
        Self { units, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Self { units: 0, symbol }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Round a raw fee, expressed in smallest units, up to a whole unit.
    ///
    /// Rounding is always toward the payer owing more, matching the
    /// contract's `ceil` on the fee.
    pub fn from_fee_ceil(fee_units: f64, symbol: Symbol) -> Result<Self, PricingError> {
        if !fee_units.is_finite() {
            return Err(PricingError::Overflow);
        }
        let rounded = fee_units.ceil();
        // i64::MAX is not representable in f64; reject anything at or above 2^63.
        if rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
            return Err(PricingError::Overflow);
        }
        Ok(Self {
            units: rounded as i64,
            symbol,
        })
    }

    /// Decimal value as a float. For display and reference comparisons only.
    pub fn to_f64(&self) -> f64 {
        self.units as f64 / 10f64.powi(i32::from(self.symbol.precision))
    }

    pub fn ensure_symbol(&self, expected: &Symbol) -> Result<(), PricingError> {
        if &self.symbol != expected {
            return Err(PricingError::SymbolMismatch {
                expected: expected.to_string(),
                actual: self.symbol.to_string(),
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Asset) -> Result<Asset, PricingError> {
        other.ensure_symbol(&self.symbol)?;
        let units = self
            .units
            .checked_add(other.units)
            .ok_or(PricingError::Overflow)?;
        Ok(Asset::from_units(units, self.symbol.clone()))
    }

    pub fn checked_sub(&self, other: &Asset) -> Result<Asset, PricingError> {
        other.ensure_symbol(&self.symbol)?;
        let units = self
            .units
            .checked_sub(other.units)
            .ok_or(PricingError::Overflow)?;
        Ok(Asset::from_units(units, self.symbol.clone()))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.units < 0 { "-" } else { "" };
        let magnitude = self.units.unsigned_abs();
        let precision = u32::from(self.symbol.precision.min(MAX_PRECISION));
        if precision == 0 {
            return write!(f, "{sign}{magnitude} {}", self.symbol.code);
        }
        let scale = 10u64.pow(precision);
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            magnitude / scale,
            magnitude % scale,
            self.symbol.code,
            width = precision as usize
        )
    }
}

impl FromStr for Asset {
    type Err = PricingError;

    /// Parse `"1.0000 EOS"`. The number of fraction digits sets the precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PricingError::InvalidAsset {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (amount, code) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| invalid("expected \"<amount> <SYMBOL>\""))?;
        let code = code.trim();
        if code.is_empty() || code.len() > 7 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid("symbol code must be 1-7 uppercase letters"));
        }

        let (negative, amount) = match amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount),
        };
        let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("amount must be a decimal number"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("amount must be a decimal number"));
        }
        if amount.contains('.') && fraction.is_empty() {
            return Err(invalid("missing fraction digits after '.'"));
        }
        let precision =
            u8::try_from(fraction.len()).map_err(|_| invalid("too many fraction digits"))?;
        if precision > MAX_PRECISION {
            return Err(invalid("too many fraction digits"));
        }

        let symbol = Symbol::new(precision, code);
        let whole: i64 = whole.parse().map_err(|_| invalid("amount out of range"))?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| invalid("amount out of range"))?
        };
        let units = whole
            .checked_mul(symbol.scale()?)
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(|| invalid("amount out of range"))?;

        Ok(Asset::from_units(if negative { -units } else { units }, symbol))
    }
}
