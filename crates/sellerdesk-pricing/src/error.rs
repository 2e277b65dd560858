//! # Error Types
//!
//! Domain-specific error types for sellerdesk-pricing.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sellerdesk-pricing errors (this file)                                  │
//! │  ├── PricingError   - Config fields, cost input, fee math               │
//! │  └── TierError      - Profit tier schedule problems                     │
//! │                                                                         │
//! │  Host backend errors (separate codebase)                                │
//! │  └── ApiError       - What the frontend sees (serialized)               │
//! │                                                                         │
//! │  Flow: TierError → PricingError → ApiError → Frontend                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, tier position, value)
//! 3. Errors are enum variants, never String
//! 4. Messages are shown to sellers verbatim, so they name the offending
//!    field using the stored document's key spelling (`spentRate`, `minCost`)

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised while validating a pricing configuration or computing a
/// listing price.
///
/// Every failure is terminal and synchronous: the computation is pure, so
/// retrying with the same inputs reproduces the same error. Callers get
/// either a complete quote or one of these.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A required configuration field is missing or null.
    ///
    /// ## When This Occurs
    /// - Flat-profit mode without `spentRate`, `payoutRate`, or `desiredProfit`
    /// - Price computation on a document whose rates were never filled in
    #[error("{field} is required")]
    Required { field: String },

    /// A field that must be strictly positive is zero, negative, or not a
    /// finite number.
    #[error("{field} must be a positive number, got {value}")]
    MustBePositive { field: String, value: f64 },

    /// A percentage field is outside the [0, 100] range or not a finite
    /// number.
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: String, value: f64 },

    /// A fee or cost field that may be zero is negative or not a finite
    /// number.
    #[error("{field} cannot be negative, got {value}")]
    NegativeNotAllowed { field: String, value: f64 },

    /// The profit tier schedule is invalid (wraps [`TierError`]).
    #[error("profit tiers are invalid: {0}")]
    Tier(#[from] TierError),

    /// The cost argument is zero, negative, or not a finite number.
    ///
    /// ## When This Occurs
    /// - Cost-lookup provider returned a placeholder or sentinel value
    /// - Caller forgot to resolve the cost before asking for a price
    #[error("cost must be a positive number, got {cost}")]
    InvalidCost { cost: f64 },

    /// Sales tax and percentage fees combine to a non-positive fee
    /// multiplier, so no finite price can cover them.
    ///
    /// ## When This Occurs
    /// - Fee percentages sum to 100% or more of the sale price
    /// - A high `saleTax` pushes an otherwise-legal fee total over the edge
    #[error("fees and sales tax consume the entire sale price (fee multiplier {multiplier})")]
    FeesConsumePrice { multiplier: f64 },

    /// The computed price is non-finite or not positive despite all prior
    /// checks passing. Guards against extreme numeric inputs.
    #[error("computed price is not a positive number: {price}")]
    InvalidPrice { price: f64 },
}

impl PricingError {
    /// True for structural configuration problems (missing or out-of-range
    /// fields). The config editor highlights the named field.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PricingError::Required { .. }
                | PricingError::MustBePositive { .. }
                | PricingError::PercentOutOfRange { .. }
                | PricingError::NegativeNotAllowed { .. }
        )
    }

    /// True when the profit tier schedule is at fault.
    pub fn is_tier_error(&self) -> bool {
        matches!(self, PricingError::Tier(_))
    }

    /// True when the cost argument itself was rejected.
    pub fn is_input_error(&self) -> bool {
        matches!(self, PricingError::InvalidCost { .. })
    }

    /// True when the fee percentages make a price mathematically undefined.
    pub fn is_fee_config_error(&self) -> bool {
        matches!(self, PricingError::FeesConsumePrice { .. })
    }

    /// True when the final numeric result failed the sanity check.
    pub fn is_computation_error(&self) -> bool {
        matches!(self, PricingError::InvalidPrice { .. })
    }
}

// =============================================================================
// Tier Error
// =============================================================================

/// Profit tier schedule errors.
///
/// Tier positions in messages are 1-based. Per-tier field errors report the
/// position in the order the tiers were supplied; overlap and gap errors
/// report positions after sorting by `minCost` ascending, which is the order
/// the config editor displays.
#[derive(Debug, Error)]
pub enum TierError {
    /// Tiered profit is enabled but the tier list is empty.
    #[error("at least one profit tier is required when tiered profit is enabled")]
    Empty,

    /// A tier's `minCost` is negative or not a finite number.
    #[error("tier {position}: minCost must be a non-negative number, got {value}")]
    InvalidMinCost { position: usize, value: f64 },

    /// A tier's `profit` is zero, negative, or not a finite number.
    #[error("tier {position}: profit must be a positive number, got {value}")]
    InvalidProfit { position: usize, value: f64 },

    /// A tier's `maxCost` does not exceed its `minCost`, so the tier covers
    /// no costs at all.
    #[error("tier {position}: maxCost {max_cost} must be greater than minCost {min_cost}")]
    EmptyRange {
        position: usize,
        min_cost: f64,
        max_cost: f64,
    },

    /// A tier other than the highest one has no `maxCost`.
    #[error("tier {position}: only the highest tier may omit maxCost")]
    UnboundedNotLast { position: usize },

    /// Two adjacent tiers overlap, so a cost in the shared range would match
    /// both.
    #[error("tiers {first} and {second} overlap: maxCost {max_cost} is greater than the next minCost {next_min_cost}")]
    Overlap {
        first: usize,
        second: usize,
        max_cost: f64,
        next_min_cost: f64,
    },

    /// Two adjacent tiers leave a range of costs that no tier covers.
    #[error("tiers {first} and {second} are not contiguous: maxCost {max_cost} is less than the next minCost {next_min_cost}")]
    Gap {
        first: usize,
        second: usize,
        max_cost: f64,
        next_min_cost: f64,
    },

    /// No tier covers the given cost and the config has no flat
    /// `desiredProfit` to fall back to.
    ///
    /// ## When This Occurs
    /// Stored documents can predate today's validation rules, so a schedule
    /// with holes (or a bounded top tier) can still reach the calculator.
    #[error("no profit tier covers cost {cost} and desiredProfit is not set")]
    NoMatch { cost: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
