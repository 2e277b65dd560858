//! # Configuration Types
//!
//! The pricing configuration document and its profit tier schedule.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PricingConfig                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Rates          │   │  Fees           │   │  ProfitTiers    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  spentRate      │   │  fixedFee       │   │  enabled        │       │
//! │  │  payoutRate     │   │  saleTax %      │   │  tiers[]        │       │
//! │  │  desiredProfit  │   │  ebayFee %      │   │   ├ minCost     │       │
//! │  └─────────────────┘   │  adsFee %       │   │   ├ maxCost?    │       │
//! │                        │  tdsFee %       │   │   └ profit      │       │
//! │                        │  taxRate %      │   └─────────────────┘       │
//! │                        │  shippingCost   │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Contract
//! Stored documents and the frontend both use camelCase keys (`spentRate`,
//! `minCost`). Fields absent from older documents fall back to the marketplace
//! defaults below, and `null` rates deserialize to `None`. Unknown keys are
//! ignored so newer documents stay readable by older builds.
//!
//! This crate only reads these values. The config store owns creation,
//! persistence, and mutation; a fresh document is passed in on every call.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    DEFAULT_ADS_FEE_PERCENT, DEFAULT_EBAY_FEE_PERCENT, DEFAULT_TAX_RATE_PERCENT,
    DEFAULT_TDS_FEE_PERCENT,
};

// =============================================================================
// Pricing Config
// =============================================================================

/// A seller's pricing configuration for one listing template.
///
/// ## Currency Model
/// Costs and shipping are in the sourcing marketplace's currency
/// ("source"). Profits and fixed fees are in the seller's payout currency
/// ("settlement"). `spentRate` converts source → settlement for expenses;
/// `payoutRate` converts settlement → source for the payout target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Whether automatic repricing is switched on for this template.
    /// Carried for the scheduler; the calculator prices on demand either way.
    #[serde(default)]
    pub enabled: bool,

    /// Source → settlement conversion rate applied to expenses. Must be
    /// positive when a price is computed.
    #[serde(default)]
    pub spent_rate: Option<f64>,

    /// Settlement → source conversion rate applied to the payout target.
    /// Must be positive when a price is computed.
    #[serde(default)]
    pub payout_rate: Option<f64>,

    /// Flat profit target in settlement currency. Required unless the tier
    /// schedule is enabled; also the fallback when no tier matches.
    #[serde(default)]
    pub desired_profit: Option<f64>,

    /// Flat per-transaction fee in settlement currency.
    #[serde(default)]
    pub fixed_fee: f64,

    /// Sales tax the marketplace adds on top of percentage fees, in percent.
    #[serde(default)]
    pub sale_tax: f64,

    /// Marketplace final value fee, in percent.
    #[serde(default = "default_ebay_fee")]
    pub ebay_fee: f64,

    /// Promoted listing (ads) fee, in percent.
    #[serde(default = "default_ads_fee")]
    pub ads_fee: f64,

    /// Tax deducted at source on the payout, in percent.
    #[serde(default = "default_tds_fee")]
    pub tds_fee: f64,

    /// Tax applied on the sourcing side when buying the item, in percent.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Shipping cost on the sourcing side, in source currency.
    #[serde(default)]
    pub shipping_cost: f64,

    /// Optional tiered profit schedule. When enabled it supersedes
    /// `desiredProfit`.
    #[serde(default)]
    pub profit_tiers: Option<ProfitTiers>,
}

impl PricingConfig {
    /// Whether the tiered profit schedule should govern validation.
    ///
    /// True as soon as the schedule is present and switched on, even if its
    /// tier list is empty (an empty enabled schedule is a config error, not
    /// a silent fallback to flat profit).
    #[inline]
    pub fn tiers_enabled(&self) -> bool {
        self.profit_tiers
            .as_ref()
            .map_or(false, |schedule| schedule.enabled)
    }

    /// Sum of the percentage-based marketplace fees.
    #[inline]
    pub fn combined_fee_percent(&self) -> f64 {
        self.ebay_fee + self.ads_fee + self.tds_fee
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            enabled: false,
            spent_rate: None,
            payout_rate: None,
            desired_profit: None,
            fixed_fee: 0.0,
            sale_tax: 0.0,
            ebay_fee: default_ebay_fee(),
            ads_fee: default_ads_fee(),
            tds_fee: default_tds_fee(),
            tax_rate: default_tax_rate(),
            shipping_cost: 0.0,
            profit_tiers: None,
        }
    }
}

// Serde default hooks. These mirror the marketplace's standard fee schedule
// so documents saved before a field existed keep pricing the same way.

fn default_ebay_fee() -> f64 {
    DEFAULT_EBAY_FEE_PERCENT
}

fn default_ads_fee() -> f64 {
    DEFAULT_ADS_FEE_PERCENT
}

fn default_tds_fee() -> f64 {
    DEFAULT_TDS_FEE_PERCENT
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE_PERCENT
}

// =============================================================================
// Profit Tiers
// =============================================================================

/// A tiered profit schedule: distinct profit targets per cost range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfitTiers {
    /// Whether the schedule is in effect. A disabled schedule is kept in the
    /// document so sellers can toggle it without losing their tiers.
    #[serde(default)]
    pub enabled: bool,

    /// The tiers, in the order the seller entered them.
    #[serde(default)]
    pub tiers: Vec<ProfitTier>,
}

impl ProfitTiers {
    /// Whether profit resolution should scan this schedule.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.tiers.is_empty()
    }
}

// =============================================================================
// Profit Tier
// =============================================================================

/// One profit tier: a half-open cost interval `[minCost, maxCost)` and the
/// profit target for costs inside it.
///
/// `maxCost = None` means unbounded above, legal only on the tier with the
/// greatest `minCost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProfitTier {
    /// Inclusive lower bound of the cost range, in source currency.
    pub min_cost: f64,

    /// Exclusive upper bound of the cost range, or `None` for unbounded.
    #[serde(default)]
    pub max_cost: Option<f64>,

    /// Profit target in settlement currency for costs in this range.
    pub profit: f64,
}

impl ProfitTier {
    /// Whether a cost falls inside this tier's half-open range.
    ///
    /// ## Example
    /// ```rust
    /// use sellerdesk_pricing::config::ProfitTier;
    ///
    /// let tier = ProfitTier { min_cost: 0.0, max_cost: Some(50.0), profit: 400.0 };
    /// assert!(tier.contains(0.0));      // lower bound is inclusive
    /// assert!(tier.contains(49.999));
    /// assert!(!tier.contains(50.0));    // upper bound is exclusive
    /// ```
    pub fn contains(&self, cost: f64) -> bool {
        cost >= self.min_cost
            && match self.max_cost {
                Some(max_cost) => cost < max_cost,
                None => true,
            }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
