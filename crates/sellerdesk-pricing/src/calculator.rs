//! # Price Calculator
//!
//! Derives a marketplace listing price from a sourcing cost and a pricing
//! configuration, with a full audit trail of every intermediate figure.
//!
//! ## Formula Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Listing Price Derivation                           │
//! │                                                                         │
//! │  cost ──► + shippingCost ──► + sourcing tax ──► × spentRate             │
//! │  (source currency)                    (buying price, settlement)        │
//! │                                                                         │
//! │  profit (flat or tier-matched) ──► + buying price ──► ÷ payoutRate      │
//! │  (settlement currency)                        (payout, source currency) │
//! │                                                                         │
//! │  + fixedFee ÷ payoutRate ──► ÷ fee multiplier ──► round ──► price       │
//! │                                                                         │
//! │  fee multiplier = 1 - (1 + saleTax%) × (ebayFee% + adsFee% + tdsFee%)   │
//! │  Must stay positive, or no finite price can cover the fees.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is 64-bit floating point: stored pricing documents and the
//! frontend exchange plain JSON numbers, and the formula's rate divisions do
//! not stay in any fixed-point grid. Rounding happens once per output figure,
//! at the display boundary.
//!
//! Every call re-validates the configuration before computing. Stored
//! documents can predate today's validation rules, so the calculator never
//! trusts that a document was checked when it was saved.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult, TierError};
use crate::validation::validate_config;

// =============================================================================
// Profit Source
// =============================================================================

/// Where the resolved profit target came from.
///
/// Carried in the breakdown so the frontend can show which tier priced a
/// listing, and so fallback pricing is visible instead of silent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProfitSource {
    /// Flat `desiredProfit`; tiered profit is not in effect.
    Flat,

    /// A tier matched the cost. `position` is 1-based in the order the
    /// tiers appear in the document.
    #[serde(rename_all = "camelCase")]
    Tier {
        position: usize,
        min_cost: f64,
        max_cost: Option<f64>,
    },

    /// Tiered profit is in effect but no tier covered the cost, so the flat
    /// `desiredProfit` was used instead.
    FlatFallback,
}

impl fmt::Display for ProfitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitSource::Flat => write!(f, "N/A"),
            ProfitSource::Tier {
                position,
                min_cost,
                max_cost: Some(max_cost),
            } => write!(f, "tier {position} (cost {min_cost} to {max_cost})"),
            ProfitSource::Tier {
                position,
                min_cost,
                max_cost: None,
            } => write!(f, "tier {position} (cost {min_cost} and up)"),
            ProfitSource::FlatFallback => write!(f, "flat fallback (outside all tiers)"),
        }
    }
}

// =============================================================================
// Resolved Profit
// =============================================================================

/// A profit target plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProfit {
    /// Profit target in settlement currency, as stored (unrounded).
    pub amount: f64,
    /// Which rule supplied the amount.
    pub source: ProfitSource,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Every intermediate figure of one price derivation.
///
/// Recomputed on every call and never persisted; the config store remains
/// the single source of truth. Monetary figures are rounded to 2 decimals
/// for display (4 for the fee multiplier). The rounding is per-figure: the
/// displayed intermediates are not re-fed into the formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Sourcing cost, source currency.
    pub cost: f64,
    /// Shipping on the sourcing side, source currency.
    pub shipping_cost: f64,
    /// Sourcing-side tax rate, percent.
    pub tax_rate: f64,
    /// Tax paid when buying, source currency.
    pub tax_amount: f64,
    /// cost + shipping + tax, source currency.
    pub buying_price_source: f64,
    /// Buying price converted at `spentRate`, settlement currency.
    pub buying_price_settlement: f64,
    /// Profit target that applied, settlement currency.
    pub resolved_profit: f64,
    /// Where the profit target came from.
    pub profit_source: ProfitSource,
    /// resolvedProfit + buyingPriceSettlement, settlement currency.
    pub profit_component: f64,
    /// Profit component converted at `payoutRate`, source currency.
    pub payout_source: f64,
    /// Flat transaction fee, settlement currency.
    pub fixed_fee: f64,
    /// Payout plus the converted fixed fee, source currency.
    pub with_fixed_fee: f64,
    /// Fraction of the gross price left after sales tax and percentage fees.
    pub fee_multiplier: f64,
    /// The listing price, rounded to the cent.
    pub final_price: f64,
}

impl fmt::Display for PriceBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "listing price breakdown")?;
        writeln!(f, "  cost (source)              {:>12.2}", self.cost)?;
        writeln!(f, "  shipping (source)          {:>12.2}", self.shipping_cost)?;
        writeln!(f, "  tax rate (%)               {:>12.2}", self.tax_rate)?;
        writeln!(f, "  tax amount (source)        {:>12.2}", self.tax_amount)?;
        writeln!(f, "  buying price (source)      {:>12.2}", self.buying_price_source)?;
        writeln!(f, "  buying price (settlement)  {:>12.2}", self.buying_price_settlement)?;
        writeln!(
            f,
            "  profit (settlement)        {:>12.2}   [{}]",
            self.resolved_profit, self.profit_source
        )?;
        writeln!(f, "  profit component           {:>12.2}", self.profit_component)?;
        writeln!(f, "  payout (source)            {:>12.2}", self.payout_source)?;
        writeln!(f, "  fixed fee (settlement)     {:>12.2}", self.fixed_fee)?;
        writeln!(f, "  with fixed fee             {:>12.2}", self.with_fixed_fee)?;
        writeln!(f, "  fee multiplier             {:>12.4}", self.fee_multiplier)?;
        write!(f, "  final price                {:>12.2}", self.final_price)
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// A computed listing price with its derivation trail and any validation
/// warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// The listing price, rounded to the cent.
    pub price: f64,
    /// Every intermediate figure, for audit and display.
    pub breakdown: PriceBreakdown,
    /// Non-fatal diagnostics from validation (see
    /// [`crate::validation::ValidationReport`]).
    pub warnings: Vec<String>,
}

// =============================================================================
// Profit Resolution
// =============================================================================

/// Resolves the profit target for a cost.
///
/// ## Rules
/// - Tiered profit not in effect (schedule absent, disabled, or empty):
///   the flat `desiredProfit` applies.
/// - Otherwise the tiers are scanned **in document order** (not sorted) and
///   the first tier containing the cost wins. Validated schedules have at
///   most one match, but unvalidated documents with overlaps resolve by
///   input order, and that order must be preserved for stored documents to
///   keep pricing the way they always have.
/// - No tier matches: fall back to `desiredProfit` if it is set, otherwise
///   fail with [`TierError::NoMatch`]. The fallback is deliberate: schedules
///   saved before the continuity rules existed can have holes.
pub fn resolve_profit(cost: f64, config: &PricingConfig) -> PricingResult<ResolvedProfit> {
    let tiers = match &config.profit_tiers {
        Some(schedule) if schedule.is_active() => &schedule.tiers,
        _ => {
            return Ok(ResolvedProfit {
                amount: flat_profit(config)?,
                source: ProfitSource::Flat,
            })
        }
    };

    for (index, tier) in tiers.iter().enumerate() {
        if tier.contains(cost) {
            return Ok(ResolvedProfit {
                amount: tier.profit,
                source: ProfitSource::Tier {
                    position: index + 1,
                    min_cost: tier.min_cost,
                    max_cost: tier.max_cost,
                },
            });
        }
    }

    match config.desired_profit {
        Some(amount) if amount.is_finite() => {
            debug!(cost, amount, "no profit tier matched; using flat desiredProfit");
            Ok(ResolvedProfit {
                amount,
                source: ProfitSource::FlatFallback,
            })
        }
        _ => Err(TierError::NoMatch { cost }.into()),
    }
}

/// The flat `desiredProfit`, or a typed error when it is unusable.
fn flat_profit(config: &PricingConfig) -> PricingResult<f64> {
    match config.desired_profit {
        Some(amount) if amount.is_finite() => Ok(amount),
        Some(amount) => Err(PricingError::MustBePositive {
            field: "desiredProfit".to_string(),
            value: amount,
        }),
        None => Err(PricingError::Required {
            field: "desiredProfit".to_string(),
        }),
    }
}

// =============================================================================
// Price Computation
// =============================================================================

/// Computes the listing price for a sourcing cost.
///
/// Validates the configuration, resolves the profit target, runs the
/// formula, and returns the price with its full breakdown. Fails with a
/// typed [`PricingError`] on the first violated precondition; there is no
/// partial result.
///
/// ## Example
/// ```rust
/// use sellerdesk_pricing::calculator::compute_price;
/// use sellerdesk_pricing::config::PricingConfig;
///
/// let config = PricingConfig {
///     spent_rate: Some(83.0),
///     payout_rate: Some(80.0),
///     desired_profit: Some(500.0),
///     ..PricingConfig::default()
/// };
///
/// let quote = compute_price(&config, 20.0).unwrap();
/// assert_eq!(quote.price, 34.99);
/// assert_eq!(quote.breakdown.fee_multiplier, 0.831);
/// ```
pub fn compute_price(config: &PricingConfig, cost: f64) -> PricingResult<PriceQuote> {
    let report = validate_config(config)?;

    if !cost.is_finite() || cost <= 0.0 {
        return Err(PricingError::InvalidCost { cost });
    }

    // Validation only requires the conversion rates in flat mode; tiered
    // documents still need them here.
    let spent_rate = required_rate("spentRate", config.spent_rate)?;
    let payout_rate = required_rate("payoutRate", config.payout_rate)?;

    let tax_amount = cost * (config.tax_rate / 100.0);
    let buying_price_source = cost + config.shipping_cost + tax_amount;
    let buying_price_settlement = buying_price_source * spent_rate;

    let resolved = resolve_profit(cost, config)?;

    let profit_component = resolved.amount + buying_price_settlement;
    let payout_source = profit_component / payout_rate;
    let with_fixed_fee = payout_source + config.fixed_fee / payout_rate;

    let combined_fee_pct = config.combined_fee_percent() / 100.0;
    let fee_multiplier = 1.0 - (1.0 + config.sale_tax / 100.0) * combined_fee_pct;

    if fee_multiplier <= 0.0 {
        return Err(PricingError::FeesConsumePrice {
            multiplier: fee_multiplier,
        });
    }

    let final_price = with_fixed_fee / fee_multiplier;

    if !final_price.is_finite() || final_price <= 0.0 {
        return Err(PricingError::InvalidPrice { price: final_price });
    }

    let price = round2(final_price);
    debug!(cost, price, "listing price computed");

    Ok(PriceQuote {
        price,
        breakdown: PriceBreakdown {
            cost: round2(cost),
            shipping_cost: round2(config.shipping_cost),
            tax_rate: round2(config.tax_rate),
            tax_amount: round2(tax_amount),
            buying_price_source: round2(buying_price_source),
            buying_price_settlement: round2(buying_price_settlement),
            resolved_profit: round2(resolved.amount),
            profit_source: resolved.source,
            profit_component: round2(profit_component),
            payout_source: round2(payout_source),
            fixed_fee: round2(config.fixed_fee),
            with_fixed_fee: round2(with_fixed_fee),
            fee_multiplier: round4(fee_multiplier),
            final_price: price,
        },
        warnings: report.warnings,
    })
}

/// A conversion rate that must be present, finite, and positive at pricing
/// time, regardless of profit mode.
fn required_rate(field: &str, value: Option<f64>) -> PricingResult<f64> {
    match value {
        Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
        Some(rate) => Err(PricingError::MustBePositive {
            field: field.to_string(),
            value: rate,
        }),
        None => Err(PricingError::Required {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to 2 decimals, half away from zero (standard monetary rounding).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 4 decimals; used for the fee multiplier only.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

// =============================================================================
// Unit Tests
// =============================================================================
