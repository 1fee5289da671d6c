//! # Quotation Records
//!
//! Everything a finished calculation hands back to the caller.
//!
//! ## Record Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quotation Records                                 │
//! │                                                                         │
//! │  QuotationResult (wire shape, success flag + flat fields)              │
//! │  │                                                                      │
//! │  ├── success path ◄── Quotation                                        │
//! │  │                    ├── MoldLayout      (length, height, area)       │
//! │  │                    ├── MaterialUsage   (grams, grams per cm²)       │
//! │  │                    ├── CostBreakdown   (every cost layer)           │
//! │  │                    │   ├── OverheadLayer × n (from configuration)   │
//! │  │                    │   └── SalePrice × n     (margin tiers)         │
//! │  │                    └── NormalizedInput (echo of what was priced)    │
//! │  │                                                                      │
//! │  └── failure path: error message + error_kind, nothing else            │
//! │                                                                         │
//! │  Consumers: quote screen, record persistence, printable quote          │
//! │  document. All three read the same field names.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{QuoteError, QuoteErrorKind};
use crate::input::NormalizedInput;
use crate::rules::Percent;

// =============================================================================
// Layout & Material Records
// =============================================================================

/// Mold footprint after rounding to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoldLayout {
    /// Mold length in cm (whole units).
    pub total_length: f64,

    /// Mold height in cm (whole units).
    pub total_height: f64,

    /// Mold area in cm², the product of the rounded sides.
    pub total_area: f64,
}

/// Material consumption for one mold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaterialUsage {
    /// Grams of PVC one mold consumes.
    pub total_grams: f64,

    /// Grams per cm² at the quoted thickness.
    pub grams_per_area: f64,
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// One indirect-cost layer: the configured rate and the amount it adds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OverheadLayer {
    /// Configured overhead rate.
    pub percentage: Percent,

    /// Amount this layer adds to the production cost.
    pub amount: f64,
}

/// One candidate sale price at a configured margin tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalePrice {
    /// Margin tier: the share of the sale price that is profit.
    pub margin: Percent,

    /// Sale price at that margin.
    pub price: f64,
}

/// The full cost side of a quotation, every figure already rounded to
/// 2 decimals.
///
/// Overhead layers and sale prices keep the order of their configured
/// percentage lists; nothing about their count is hard-coded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostBreakdown {
    /// Die-cut cost per stamping, echoed into the cost table.
    pub cost_per_stamp: f64,

    /// Throughput metric: mold batches per hour (0 when setup time is 0).
    pub molds_per_hour: f64,

    /// Material cost apportioned to one label.
    pub material_unit_cost: f64,

    /// Flat mounting fee.
    pub mounting_cost: f64,

    /// Flat measurement fee.
    pub measurement_cost: f64,

    /// material_unit_cost + mounting + measurement.
    pub total_material: f64,

    /// Sum of all assembly components.
    pub assembly_total: f64,

    /// Sum of all secondary material/process components.
    pub other_materials_total: f64,

    /// Indirect-cost layers in configured order.
    pub overhead_layers: Vec<OverheadLayer>,

    /// Administrative surcharge.
    pub admin_cost: f64,

    /// Cost base + overhead layers + admin.
    pub total_production_cost: f64,

    /// Candidate sale prices in configured order.
    pub sale_prices: Vec<SalePrice>,
}

impl CostBreakdown {
    /// Flat, string-keyed view of the breakdown in presentation order.
    ///
    /// This is the shape the quote document and the stored record use:
    /// fixed lines first, then one `overhead_<rate>` entry per configured
    /// layer, then `admin` and the total, then one `sale_price_<rate>` per
    /// margin tier.
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut entries = vec![
            ("cost_per_stamp".to_string(), self.cost_per_stamp),
            ("molds_per_hour".to_string(), self.molds_per_hour),
            ("material".to_string(), self.material_unit_cost),
            ("mounting".to_string(), self.mounting_cost),
            ("measurement".to_string(), self.measurement_cost),
            ("total_material".to_string(), self.total_material),
            ("assembly_total".to_string(), self.assembly_total),
            (
                "other_materials_total".to_string(),
                self.other_materials_total,
            ),
        ];
        for layer in &self.overhead_layers {
            entries.push((
                format!("overhead_{}", layer.percentage.value()),
                layer.amount,
            ));
        }
        entries.push(("admin".to_string(), self.admin_cost));
        entries.push((
            "total_production_cost".to_string(),
            self.total_production_cost,
        ));
        for tier in &self.sale_prices {
            entries.push((format!("sale_price_{}", tier.margin.value()), tier.price));
        }
        entries
    }
}

// =============================================================================
// Quotation
// =============================================================================

/// A complete, successful quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quotation {
    /// Resolved mold geometry.
    pub layout: MoldLayout,

    /// Resolved material consumption.
    pub material_usage: MaterialUsage,

    /// The per-gram rate the quote was priced with.
    pub cost_per_gram: f64,

    /// Every cost layer and candidate price.
    pub cost_breakdown: CostBreakdown,

    /// Echo of the normalized input this quote was computed from.
    pub input: NormalizedInput,
}

impl Quotation {
    /// The price the shop quotes by default: the second margin tier when
    /// configured (the standard commercial tier), otherwise the first.
    pub fn recommended_sale_price(&self) -> Option<f64> {
        let prices = &self.cost_breakdown.sale_prices;
        prices.get(1).or_else(|| prices.first()).map(|tier| tier.price)
    }
}

// =============================================================================
// Quotation Result
// =============================================================================

/// The record `compute` always returns, success or not.
///
/// Exactly one of the two field groups is populated:
/// - `success: true` ⇒ the five quotation fields
/// - `success: false` ⇒ `error` + `error_kind`
///
/// Use the constructors; never assemble this by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationResult {
    /// Whether the calculation finished.
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<MoldLayout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_usage: Option<MaterialUsage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_gram: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_breakdown: Option<CostBreakdown>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<NormalizedInput>,

    /// Human-readable problem description (failure only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Which of the two recoverable kinds occurred (failure only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<QuoteErrorKind>,
}

impl QuotationResult {
    /// Wraps a finished quotation.
    pub fn from_quotation(quotation: Quotation) -> Self {
        QuotationResult {
            success: true,
            layout: Some(quotation.layout),
            material_usage: Some(quotation.material_usage),
            cost_per_gram: Some(quotation.cost_per_gram),
            cost_breakdown: Some(quotation.cost_breakdown),
            input: Some(quotation.input),
            error: None,
            error_kind: None,
        }
    }

    /// Wraps a recoverable calculation failure.
    pub fn from_error(error: &QuoteError) -> Self {
        QuotationResult {
            success: false,
            layout: None,
            material_usage: None,
            cost_per_gram: None,
            cost_breakdown: None,
            input: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }

    /// Whether this result carries a quotation.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl From<Result<Quotation, QuoteError>> for QuotationResult {
    fn from(outcome: Result<Quotation, QuoteError>) -> Self {
        match outcome {
            Ok(quotation) => QuotationResult::from_quotation(quotation),
            Err(error) => QuotationResult::from_error(&error),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
