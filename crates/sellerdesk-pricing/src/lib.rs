//! # sellerdesk-pricing: Pure Pricing Logic for Sellerdesk
//!
//! This crate is the pricing **core** of the Sellerdesk seller ops backend.
//! It contains the listing-price derivation and its configuration rules as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sellerdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (Config Editor / Listings)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Ops Backend Handlers                           │   │
//! │  │    save_pricing_config, price_listing, cost lookup, storage     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain (config, cost) values            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ sellerdesk-pricing (THIS CRATE) ★                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  config   │  │validation │  │calculator │  │   error   │   │   │
//! │  │   │ documents │  │   rules   │  │  formula  │  │   types   │   │   │
//! │  │   │   tiers   │  │  checks   │  │   tiers   │  │   kinds   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - The pricing configuration document and profit tiers
//! - [`validation`] - Configuration invariant checks and warnings
//! - [`calculator`] - Profit resolution and the listing-price formula
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every call is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, and cost-lookup access is FORBIDDEN here
//! 3. **f64 By Contract**: Stored documents and the frontend exchange plain
//!    JSON numbers; rounding happens once per figure at the display boundary
//! 4. **Explicit Errors**: All errors are typed, never strings or panics;
//!    soft diagnostics come back as a warnings list, never a log side effect
//!
//! ## Example Usage
//!
//! ```rust
//! use sellerdesk_pricing::{compute_price, PricingConfig};
//!
//! let config = PricingConfig {
//!     spent_rate: Some(83.0),    // source -> settlement, for expenses
//!     payout_rate: Some(80.0),   // settlement -> source, for the payout
//!     desired_profit: Some(500.0),
//!     ..PricingConfig::default() // marketplace-standard fees and tax
//! };
//!
//! let quote = compute_price(&config, 20.0).unwrap();
//!
//! // 20 + 10% sourcing tax = 22, × 83 = 1826, + 500 profit, ÷ 80,
//! // then ÷ 0.831 to cover the 16.9% combined fees.
//! assert_eq!(quote.price, 34.99);
//! assert_eq!(quote.breakdown.tax_amount, 2.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod config;
pub mod error;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sellerdesk_pricing::PricingConfig` instead of
// `use sellerdesk_pricing::config::PricingConfig`

pub use calculator::{
    compute_price, resolve_profit, PriceBreakdown, PriceQuote, ProfitSource, ResolvedProfit,
};
pub use config::{PricingConfig, ProfitTier, ProfitTiers};
pub use error::{PricingError, PricingResult, TierError};
pub use validation::{validate_config, validate_profit_tiers, ValidationReport};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for every percentage field (`saleTax`, `ebayFee`, `adsFee`,
/// `tdsFee`, `taxRate`).
///
/// ## Why a constant?
/// Percentages above 100 are always a data-entry mistake, and several such
/// documents were found in production before this bound existed. The fee
/// multiplier guard would catch most of them anyway, but the validator names
/// the field instead of reporting a degenerate multiplier.
pub const MAX_PERCENT: f64 = 100.0;

/// Default marketplace final value fee, in percent.
///
/// ## Business Reason
/// Matches the marketplace's standard fee for the categories our sellers
/// list in. Documents saved before fee fields existed keep pricing the way
/// they always have.
pub const DEFAULT_EBAY_FEE_PERCENT: f64 = 12.9;

/// Default promoted listing (ads) fee, in percent.
pub const DEFAULT_ADS_FEE_PERCENT: f64 = 3.0;

/// Default tax-deducted-at-source on the payout, in percent.
pub const DEFAULT_TDS_FEE_PERCENT: f64 = 1.0;

/// Default sourcing-side tax rate, in percent.
///
/// ## Business Reason
/// The bulk of our sourcing happens on marketplaces that charge a flat 10%
/// tax at checkout. Sellers in other regimes override it per template.
pub const DEFAULT_TAX_RATE_PERCENT: f64 = 10.0;
