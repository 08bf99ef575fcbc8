//! # Resource Pricing
//!
//! Client-side quotes for leasing chain resources, computed with the same
//! integer and fixed-point steps the on-chain contracts use, so a wallet can
//! show what a lease will cost **before** the transaction is sent.
//!
//! Three markets are covered:
//!
//! - [`curve`]: the primary leasing market. A two-segment bonding curve over
//!   time-decayed utilization ([`decay`]), one [`BondingCurvePricer`] per
//!   resource ([`Cpu`], [`Net`]), combined by [`PrimaryMarket`].
//! - [`bancor`]: the legacy linear staking pool.
//! - [`constant_product`]: the legacy constant-product storage market.
//!
//! Every operation is a pure function of an immutable snapshot, a usage
//! sample and an explicit timestamp; nothing here performs I/O.
//!
//! ## Quick start
//!
//! ```rust
//! use resource_pricing::{
//!     Asset, Connector, ConstantProductExchange, LegacyExchangeMarketState,
//! };
//!
//! let state = LegacyExchangeMarketState {
//!     supply: "10000000000.0000 RAMCORE".parse().unwrap(),
//!     base: Connector { balance: "1000 RAM".parse().unwrap(), weight: 0.5 },
//!     quote: Connector { balance: "200.0000 EOS".parse().unwrap(), weight: 0.5 },
//! };
//! let market = ConstantProductExchange::new(&state).unwrap();
//!
//! // 200 * 10 / (1000 - 10) = 2.020202.., rounded up to the smallest unit.
//! let price: Asset = market.price_per_unit(10).unwrap();
//! assert_eq!(price.to_string(), "2.0203 EOS");
//! ```
//!
//! See [`config`] for chain constants and per-call options.

pub mod asset;
pub mod bancor;
pub mod config;
pub mod constant_product;
pub mod curve;
pub mod decay;
pub mod error;
pub mod fixed_point;
pub mod primary;
pub mod provider;
pub mod resource;
pub mod state;


// Re-exports for convenience.
pub use {
    asset::{Asset, Symbol},
    bancor::BancorExchangeModel,
    config::{PricingConfig, PricingOptions},
    constant_product::ConstantProductExchange,
    curve::BondingCurvePricer,
    error::PricingError,
    fixed_point::{FixedPoint, Rounding},
    primary::{LeaseQuote, PrimaryMarket},
    provider::{ChainStateProvider, MarketSnapshot},
    resource::{Cpu, Net, ResourceKind},
    state::{
        Connector, LegacyExchangeMarketState, LegacyLinearMarketState, PrimaryMarketState,
        ResourceCurveState, UsageSample,
    },
};
