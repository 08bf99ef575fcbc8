//! Integer helpers for the unit, weight and fraction conversions.
//!
//! The lease contract does these steps in 128-bit integer math; doing them in
//! `f64` drifts from the chain once weights get large, so every conversion
//! goes through [`mul_div`] with an explicit rounding direction.

use {crate::error::PricingError, std::fmt};

/// Rounding direction for an integer division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward zero (floor for non-negative operands).
    Down,
    /// Away from zero (ceil for non-negative operands).
    Up,
}

/// Compute `a * b / c` in `u128` with the given rounding.
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128, PricingError> {
    if c == 0 {
        return Err(PricingError::Overflow);
    }
    let product = a.checked_mul(b).ok_or(PricingError::Overflow)?;
    Ok(match rounding {
        Rounding::Down => product / c,
        Rounding::Up => product.div_ceil(c),
    })
}

/// A non-negative fixed-point number `raw / scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPoint {
    raw: u128,
    scale: u128,
}

impl FixedPoint {
    /// `numerator / denominator` expressed at `scale`.
    pub fn from_ratio(
        numerator: u128,
        denominator: u128,
        scale: u128,
        rounding: Rounding,
    ) -> Result<Self, PricingError> {
        if scale == 0 {
            return Err(PricingError::Overflow);
        }
        let raw = mul_div(numerator, scale, denominator, rounding)?;
        Ok(Self { raw, scale })
    }

    pub fn from_raw(raw: u128, scale: u128) -> Self {
        Self { raw, scale }
    }

    #[inline]
    pub fn raw(&self) -> u128 {
        self.raw
    }

    #[inline]
    pub fn scale(&self) -> u128 {
        self.scale
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.raw == 0
    }

    /// `value * self`, rounded as requested.
    pub fn mul_int(&self, value: u128, rounding: Rounding) -> Result<u128, PricingError> {
        mul_div(value, self.raw, self.scale, rounding)
    }

    /// Lossy conversion for display and reference comparisons.
    pub fn to_f64(&self) -> f64 {
        self.raw as f64 / self.scale as f64
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.raw / self.scale;
        let mut rem = self.raw % self.scale;
        write!(f, "{whole}")?;
        if rem == 0 {
            return Ok(());
        }
        f.write_str(".")?;
        let mut digits = 0;
        while rem != 0 && digits < 38 {
            rem = rem.saturating_mul(10);
            write!(f, "{}", rem / self.scale)?;
            rem %= self.scale;
            digits += 1;
        }
        Ok(())
    }
}
