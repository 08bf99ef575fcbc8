use thiserror::Error;

/// Errors produced by the resource pricing engine.
///
/// Every variant is deterministic: retrying with the same snapshot, sample,
/// timestamp and amount yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The curve's decay constant is zero, so utilization decay is undefined.
    #[error("Invalid decay constant: decay_secs must be > 0, got {decay_secs}")]
    InvalidDecayConstant { decay_secs: u32 },

    /// The request is non-zero but its price rounds to zero smallest units.
    /// Ask for more of the resource.
    #[error(
        "Price for {requested} units rounds below the smallest unit of {symbol}; \
         request a larger amount"
    )]
    BelowPrecision { requested: u64, symbol: String },

    /// The computed price is below the minimum payment the caller (or the
    /// market) requires.
    #[error("Calculated price {price} is below the minimum payment {minimum}")]
    BelowMinimumPayment { price: String, minimum: String },

    /// A constant-product request would drain the pool.
    #[error(
        "Insufficient liquidity: requested {requested} units but the pool only holds {available}"
    )]
    InsufficientLiquidity { requested: i64, available: i64 },

    /// The lease would push utilization past the market's total weight.
    #[error(
        "Insufficient capacity: utilization {utilization} + increase {increase} exceeds weight {weight}"
    )]
    InsufficientCapacity {
        utilization: i64,
        increase: i64,
        weight: i64,
    },

    /// The snapshot violates a structural precondition of the pricer.
    #[error("Invalid market state: {reason}")]
    InvalidState { reason: String },

    /// A usage sample scalar of zero cannot convert between units and weight.
    #[error("Invalid usage sample for {resource}: sample must be > 0")]
    InvalidUsageSample { resource: &'static str },

    /// Two money amounts that must share a symbol do not.
    #[error("Symbol mismatch: expected {expected}, got {actual}")]
    SymbolMismatch { expected: String, actual: String },

    /// The pricing configuration is invalid (e.g. zero precision).
    #[error("Invalid pricing configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A money amount string could not be parsed.
    #[error("Invalid asset {input:?}: {reason}")]
    InvalidAsset { input: String, reason: String },

    /// Arithmetic overflow during price calculation.
    #[error("Price calculation overflow")]
    Overflow,
}
