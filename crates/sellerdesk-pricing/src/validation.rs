//! # Validation Module
//!
//! Configuration validation for the pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty fields, obvious typos)                 │
//! │  └── Immediate feedback in the config editor                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Config save handler (Rust)                                   │
//! │  └── THIS MODULE: full invariant check before the document is stored   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Price computation (Rust)                                     │
//! │  └── THIS MODULE again: stored documents can predate today's rules,    │
//! │      so every quote re-validates before any arithmetic runs            │
//! │                                                                         │
//! │  Defense in depth: a bad document is caught at the latest by layer 3   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sellerdesk_pricing::config::PricingConfig;
//! use sellerdesk_pricing::validation::validate_config;
//!
//! let config = PricingConfig {
//!     spent_rate: Some(83.0),
//!     payout_rate: Some(80.0),
//!     desired_profit: Some(500.0),
//!     ..PricingConfig::default()
//! };
//!
//! let report = validate_config(&config).unwrap();
//! assert!(report.is_clean());
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::config::{PricingConfig, ProfitTier};
use crate::error::{PricingError, PricingResult, TierError};
use crate::MAX_PERCENT;

// =============================================================================
// Validation Report
// =============================================================================

/// Outcome of a successful validation run.
///
/// Legal-but-suspicious configurations (today: a bounded top tier) pass
/// validation and are reported here instead of being written to a log, so
/// the config editor can show them next to the save button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationReport {
    /// Human-readable, non-fatal diagnostics. Empty for a clean config.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when validation produced no diagnostics at all.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// =============================================================================
// Config Validation
// =============================================================================

/// Validates a pricing configuration before it is stored or priced.
///
/// ## Rules
/// - Flat-profit mode: `spentRate`, `payoutRate`, `desiredProfit` must all
///   be present, finite, and positive.
/// - Tiered mode: the tier schedule must pass [`validate_profit_tiers`];
///   the flat-profit fields are NOT checked (tiers supply the profit).
/// - Percentage fields (`saleTax`, `ebayFee`, `adsFee`, `tdsFee`, `taxRate`)
///   must be finite and within [0, 100] in every mode.
/// - `fixedFee` and `shippingCost` must be finite and non-negative in every
///   mode.
///
/// Returns the collected warnings on success; the first violated rule is
/// returned as an error.
pub fn validate_config(config: &PricingConfig) -> PricingResult<ValidationReport> {
    let mut report = ValidationReport::default();

    match &config.profit_tiers {
        Some(schedule) if schedule.enabled => {
            report.warnings = validate_profit_tiers(&schedule.tiers)?;
        }
        _ => {
            required_positive("spentRate", config.spent_rate)?;
            required_positive("payoutRate", config.payout_rate)?;
            required_positive("desiredProfit", config.desired_profit)?;
        }
    }

    percent_in_range("saleTax", config.sale_tax)?;
    percent_in_range("ebayFee", config.ebay_fee)?;
    percent_in_range("adsFee", config.ads_fee)?;
    percent_in_range("tdsFee", config.tds_fee)?;
    percent_in_range("taxRate", config.tax_rate)?;

    non_negative("fixedFee", config.fixed_fee)?;
    non_negative("shippingCost", config.shipping_cost)?;

    Ok(report)
}

// =============================================================================
// Tier Validation
// =============================================================================

/// Validates a profit tier schedule.
///
/// ## Rules
/// - The list must be non-empty.
/// - Each tier: `minCost` finite and >= 0, `profit` finite and > 0, and a
///   present `maxCost` strictly greater than `minCost`.
/// - Sorted by `minCost` ascending, the tiers must partition the cost axis:
///   no overlaps, no gaps, and only the last tier may omit `maxCost`.
///
/// The tiers may be supplied in any order; the continuity checks sort a
/// scratch copy and leave the input untouched.
///
/// ## Edge Policy
/// A bounded last tier is legal but leaves high costs uncovered, so it is
/// returned as a warning rather than an error. Costs beyond the bound fall
/// back to the flat `desiredProfit` at pricing time.
pub fn validate_profit_tiers(tiers: &[ProfitTier]) -> Result<Vec<String>, TierError> {
    if tiers.is_empty() {
        return Err(TierError::Empty);
    }

    // Per-tier field checks, reported against the order the seller entered.
    for (index, tier) in tiers.iter().enumerate() {
        let position = index + 1;

        if !tier.min_cost.is_finite() || tier.min_cost < 0.0 {
            return Err(TierError::InvalidMinCost {
                position,
                value: tier.min_cost,
            });
        }

        if !tier.profit.is_finite() || tier.profit <= 0.0 {
            return Err(TierError::InvalidProfit {
                position,
                value: tier.profit,
            });
        }

        if let Some(max_cost) = tier.max_cost {
            if !max_cost.is_finite() || max_cost <= tier.min_cost {
                return Err(TierError::EmptyRange {
                    position,
                    min_cost: tier.min_cost,
                    max_cost,
                });
            }
        }
    }

    // Continuity checks run on a sorted view; positions below are 1-based
    // in sorted order, matching how the config editor lists tiers.
    let mut sorted: Vec<&ProfitTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| a.min_cost.total_cmp(&b.min_cost));

    for (index, pair) in sorted.windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);
        let first = index + 1;
        let second = index + 2;

        let Some(max_cost) = current.max_cost else {
            return Err(TierError::UnboundedNotLast { position: first });
        };

        if max_cost > next.min_cost {
            return Err(TierError::Overlap {
                first,
                second,
                max_cost,
                next_min_cost: next.min_cost,
            });
        }

        if max_cost < next.min_cost {
            return Err(TierError::Gap {
                first,
                second,
                max_cost,
                next_min_cost: next.min_cost,
            });
        }
    }

    let mut warnings = Vec::new();
    if let Some(last) = sorted.last() {
        if let Some(max_cost) = last.max_cost {
            let position = sorted.len();
            warn!(
                position,
                max_cost, "highest profit tier is bounded; costs beyond it fall back to desiredProfit"
            );
            warnings.push(format!(
                "tier {position} is the highest tier but still sets maxCost {max_cost}; \
                 costs of {max_cost} or more will fall back to the flat desiredProfit"
            ));
        }
    }

    Ok(warnings)
}

// =============================================================================
// Field Validators
// =============================================================================

/// A field that must be present, finite, and strictly positive.
fn required_positive(field: &str, value: Option<f64>) -> PricingResult<()> {
    match value {
        Some(value) if value.is_finite() && value > 0.0 => Ok(()),
        Some(value) => Err(PricingError::MustBePositive {
            field: field.to_string(),
            value,
        }),
        None => Err(PricingError::Required {
            field: field.to_string(),
        }),
    }
}

/// A percentage field: finite and within [0, 100].
fn percent_in_range(field: &str, value: f64) -> PricingResult<()> {
    if !value.is_finite() || value < 0.0 || value > MAX_PERCENT {
        return Err(PricingError::PercentOutOfRange {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// A fee or cost field: finite and >= 0 (zero is meaningful, e.g. free
/// shipping).
fn non_negative(field: &str, value: f64) -> PricingResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::NegativeNotAllowed {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfitTiers;

    fn tier(min_cost: f64, max_cost: Option<f64>, profit: f64) -> ProfitTier {
        ProfitTier {
            min_cost,
            max_cost,
            profit,
        }
    }

    fn flat_config() -> PricingConfig {
        PricingConfig {
            spent_rate: Some(83.0),
            payout_rate: Some(80.0),
            desired_profit: Some(500.0),
            ..PricingConfig::default()
        }
    }

    fn tiered_config(tiers: Vec<ProfitTier>) -> PricingConfig {
        PricingConfig {
            profit_tiers: Some(ProfitTiers {
                enabled: true,
                tiers,
            }),
            ..PricingConfig::default()
        }
    }

    #[test]
    fn test_valid_flat_config_is_clean() {
        let report = validate_config(&flat_config()).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_flat_mode_requires_rates_and_profit() {
        let mut config = flat_config();
        config.spent_rate = None;
        let err = validate_config(&config).unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(err.to_string(), "spentRate is required");

        let mut config = flat_config();
        config.payout_rate = Some(0.0);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PricingError::MustBePositive { .. }));

        let mut config = flat_config();
        config.desired_profit = Some(f64::NAN);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PricingError::MustBePositive { .. }));
    }

    #[test]
    fn test_tiered_mode_skips_flat_profit_fields() {
        let mut config = tiered_config(vec![tier(0.0, None, 400.0)]);
        config.spent_rate = None;
        config.payout_rate = None;
        config.desired_profit = None;

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_disabled_schedule_falls_back_to_flat_rules() {
        let mut config = flat_config();
        config.profit_tiers = Some(ProfitTiers {
            enabled: false,
            tiers: Vec::new(),
        });
        assert!(validate_config(&config).is_ok());

        config.desired_profit = None;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "desiredProfit is required");
    }

    #[test]
    fn test_enabled_schedule_with_no_tiers_is_rejected() {
        let config = tiered_config(Vec::new());
        let err = validate_config(&config).unwrap_err();
        assert!(err.is_tier_error());
        assert!(matches!(err, PricingError::Tier(TierError::Empty)));
    }

    #[test]
    fn test_percentage_bounds_apply_in_every_mode() {
        let mut config = flat_config();
        config.sale_tax = 150.0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            PricingError::PercentOutOfRange { ref field, .. } if field == "saleTax"
        ));

        let mut config = tiered_config(vec![tier(0.0, None, 400.0)]);
        config.tax_rate = -1.0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err,
            PricingError::PercentOutOfRange { ref field, .. } if field == "taxRate"
        ));

        let mut config = flat_config();
        config.ebay_fee = f64::INFINITY;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_negative_fees_are_rejected() {
        let mut config = flat_config();
        config.shipping_cost = -2.5;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "shippingCost cannot be negative, got -2.5");

        let mut config = flat_config();
        config.fixed_fee = -0.01;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, PricingError::NegativeNotAllowed { .. }));
    }

    #[test]
    fn test_tier_field_errors_use_input_positions() {
        let err = validate_profit_tiers(&[
            tier(0.0, Some(50.0), 400.0),
            tier(-5.0, Some(60.0), 650.0),
        ])
        .unwrap_err();
        assert!(matches!(err, TierError::InvalidMinCost { position: 2, .. }));

        let err = validate_profit_tiers(&[tier(0.0, Some(50.0), 0.0)]).unwrap_err();
        assert!(matches!(err, TierError::InvalidProfit { position: 1, .. }));

        let err = validate_profit_tiers(&[tier(50.0, Some(50.0), 400.0)]).unwrap_err();
        assert!(matches!(err, TierError::EmptyRange { position: 1, .. }));
    }

    #[test]
    fn test_unordered_input_is_sorted_before_continuity_checks() {
        let warnings = validate_profit_tiers(&[
            tier(50.0, None, 650.0),
            tier(0.0, Some(50.0), 400.0),
        ])
        .unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_overlap_names_both_tiers() {
        let err = validate_profit_tiers(&[
            tier(0.0, Some(60.0), 400.0),
            tier(50.0, None, 650.0),
        ])
        .unwrap_err();
        assert!(matches!(err, TierError::Overlap { first: 1, second: 2, .. }));
        assert_eq!(
            err.to_string(),
            "tiers 1 and 2 overlap: maxCost 60 is greater than the next minCost 50"
        );
    }

    #[test]
    fn test_gap_names_both_tiers() {
        let err = validate_profit_tiers(&[
            tier(0.0, Some(40.0), 400.0),
            tier(50.0, None, 650.0),
        ])
        .unwrap_err();
        assert!(matches!(err, TierError::Gap { first: 1, second: 2, .. }));
    }

    #[test]
    fn test_unbounded_tier_must_be_last() {
        let err = validate_profit_tiers(&[
            tier(0.0, None, 400.0),
            tier(50.0, None, 650.0),
        ])
        .unwrap_err();
        assert!(matches!(err, TierError::UnboundedNotLast { position: 1 }));
    }

    #[test]
    fn test_bounded_last_tier_warns_but_passes() {
        let warnings = validate_profit_tiers(&[
            tier(0.0, Some(50.0), 400.0),
            tier(50.0, Some(200.0), 650.0),
        ])
        .unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("tier 2"));
        assert!(warnings[0].contains("desiredProfit"));
    }

    #[test]
    fn test_warnings_flow_into_the_report() {
        let config = tiered_config(vec![tier(0.0, Some(100.0), 400.0)]);
        let report = validate_config(&config).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_single_unbounded_tier_is_clean() {
        let warnings = validate_profit_tiers(&[tier(0.0, None, 400.0)]).unwrap();
        assert!(warnings.is_empty());
    }
}
