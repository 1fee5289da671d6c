//! # Quotation Engine
//!
//! Runs the full calculation pipeline and owns the active rule set.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuotationInput (raw, everything optional)                              │
//! │        │ normalize()            missing mandatory field → MissingField  │
//! │        ▼                                                                │
//! │  NormalizedInput                                                        │
//! │        │ resolve_layout()       mold dimensions, rounded to whole cm    │
//! │        ▼                                                                │
//! │  MoldLayout                                                             │
//! │        │ resolve_material_usage()   grams scaled from reference sheet   │
//! │        ▼                                                                │
//! │  MaterialUsage                                                          │
//! │        │ resolve_costs()        material → overhead → admin → prices    │
//! │        ▼                                                                │
//! │  CostBreakdown ──────────────────────────────► Quotation                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Contract
//! ```text
//! Mold dimensions     → whole units (ties away from zero), BEFORE the area
//!                       product, so total_area = rounded_l × rounded_h.
//! Internal cost chain → unrounded. Base, overhead layers, admin, their sum
//!                       into the total and the sale price divisions all run
//!                       on raw f64 values.
//! Reported figures    → every number in the breakdown is rounded to
//!                       hundredths exactly once, when the record is built.
//!                       The reported total can therefore differ by a cent
//!                       from the sum of the reported layers.
//! ```
//!
//! ## Usage
//! ```rust
//! use cotizador_core::engine::QuotationEngine;
//! use cotizador_core::input::QuotationInput;
//!
//! let engine = QuotationEngine::default();
//! let result = engine.compute(&QuotationInput::default());
//! assert!(!result.success); // empty input is missing every mandatory field
//! ```

use std::sync::{Arc, RwLock};

use crate::error::{QuoteError, QuoteResult};
use crate::input::{NormalizedInput, QuotationInput};
use crate::quotation::{
    CostBreakdown, MaterialUsage, MoldLayout, OverheadLayer, Quotation, QuotationResult, SalePrice,
};
use crate::rounding;
use crate::rules::{BusinessRules, MaterialTable};
use crate::MOLD_MARGIN;

// =============================================================================
// Step 1: Mold Layout
// =============================================================================

/// Computes the physical mold dimensions for a grid of items.
///
/// Each axis gets the fixed [`MOLD_MARGIN`] border plus the item run and the
/// gaps between consecutive items. Both dimensions are rounded to whole
/// units before the area product, so the area is always an integer-valued
/// f64.
pub fn resolve_layout(input: &NormalizedInput) -> QuoteResult<MoldLayout> {
    let across = f64::from(input.count_horizontal);
    let down = f64::from(input.count_vertical);

    let raw_length =
        MOLD_MARGIN + input.item_width * across + input.gap_between_items * (across - 1.0);
    let raw_height =
        MOLD_MARGIN + input.item_height * down + input.gap_between_items * (down - 1.0);

    let total_length = rounding::to_unit(raw_length);
    let total_height = rounding::to_unit(raw_height);
    let total_area = rounding::to_unit(total_length * total_height);

    if total_area <= 0.0 {
        return Err(QuoteError::DegenerateArea { area: total_area });
    }

    Ok(MoldLayout {
        total_length,
        total_height,
        total_area,
    })
}

// =============================================================================
// Step 2: Material Usage
// =============================================================================

/// Scales the reference sheet weight to the mold area.
///
/// Unknown thickness classes fall back to the table's `default` entry; the
/// lookup only fails when that entry is missing too. `total_grams` is the
/// rounded raw weight, while `grams_per_area` divides the raw weight (not
/// the rounded one) by the area before its own rounding.
pub fn resolve_material_usage(
    layout: &MoldLayout,
    thickness_class: &str,
    table: &MaterialTable,
) -> QuoteResult<MaterialUsage> {
    let reference = table
        .resolve(thickness_class)
        .ok_or_else(|| QuoteError::UnknownThicknessClass {
            class: thickness_class.to_string(),
        })?;

    // Guards rules built in code that skipped BusinessRules::validate().
    if reference.reference_area <= 0.0 {
        return Err(QuoteError::InvalidReferenceArea {
            class: thickness_class.to_string(),
            area: reference.reference_area,
        });
    }

    let raw_grams = reference.grams_for_area(layout.total_area);

    Ok(MaterialUsage {
        total_grams: rounding::to_hundredths(raw_grams),
        grams_per_area: rounding::to_hundredths(raw_grams / layout.total_area),
    })
}

// =============================================================================
// Step 3: Cost Breakdown
// =============================================================================

/// Builds the full cost breakdown from the material usage and rule set.
///
/// The production base is `cost_per_stamp + total_material +
/// other_materials_total + assembly_total`. The whole chain stays unrounded:
/// raw overhead layers and the raw admin charge sum onto the raw base, and
/// sale prices divide that raw total by `1 - margin/100`. Every reported
/// figure rounds to hundredths once, when the record is built.
pub fn resolve_costs(
    input: &NormalizedInput,
    usage: &MaterialUsage,
    rules: &BusinessRules,
) -> QuoteResult<CostBreakdown> {
    let molds_per_hour = if rules.setup_minutes_per_batch > 0.0 {
        60.0 / rules.setup_minutes_per_batch
    } else {
        0.0
    };

    // Material cost per unit uses the already-rounded gram figure so the
    // breakdown stays consistent with the weight a customer is shown.
    let units_per_mold = f64::from(input.units_per_mold());
    let material_unit_cost = (usage.total_grams * rules.cost_per_gram) / units_per_mold;
    let total_material = material_unit_cost + input.mounting_cost + input.measurement_cost;

    let assembly_total: f64 = input.assembly_costs.values().sum();
    let other_materials_total: f64 = input.other_material_costs.values().sum();

    let cost_base = input.cost_per_stamp + total_material + other_materials_total + assembly_total;

    let overhead_amounts: Vec<f64> = rules
        .overhead_percentages
        .iter()
        .map(|percentage| percentage.of(cost_base))
        .collect();
    let admin_cost = rules.admin_percentage.of(cost_base);

    let overhead_sum: f64 = overhead_amounts.iter().sum();
    let total_production_cost = cost_base + overhead_sum + admin_cost;

    let mut sale_prices = Vec::with_capacity(rules.profit_percentages.len());
    for &margin in &rules.profit_percentages {
        if !margin.is_margin() {
            return Err(QuoteError::MarginTooHigh {
                percentage: margin.value(),
            });
        }
        sale_prices.push(SalePrice {
            margin,
            price: rounding::to_hundredths(total_production_cost / (1.0 - margin.value() / 100.0)),
        });
    }

    Ok(CostBreakdown {
        cost_per_stamp: rounding::to_hundredths(input.cost_per_stamp),
        molds_per_hour: rounding::to_hundredths(molds_per_hour),
        material_unit_cost: rounding::to_hundredths(material_unit_cost),
        mounting_cost: rounding::to_hundredths(input.mounting_cost),
        measurement_cost: rounding::to_hundredths(input.measurement_cost),
        total_material: rounding::to_hundredths(total_material),
        assembly_total: rounding::to_hundredths(assembly_total),
        other_materials_total: rounding::to_hundredths(other_materials_total),
        overhead_layers: rules
            .overhead_percentages
            .iter()
            .zip(overhead_amounts)
            .map(|(&percentage, amount)| OverheadLayer {
                percentage,
                amount: rounding::to_hundredths(amount),
            })
            .collect(),
        admin_cost: rounding::to_hundredths(admin_cost),
        total_production_cost: rounding::to_hundredths(total_production_cost),
        sale_prices,
    })
}

// =============================================================================
// Pipeline Entry Points
// =============================================================================

/// Runs the whole pipeline, surfacing the first failure as a [`QuoteError`].
pub fn evaluate_quotation(
    input: &QuotationInput,
    rules: &BusinessRules,
) -> QuoteResult<Quotation> {
    let normalized = input.normalize()?;
    let layout = resolve_layout(&normalized)?;
    let material_usage = resolve_material_usage(
        &layout,
        &normalized.material_thickness_class,
        &rules.material_reference_table,
    )?;
    let cost_breakdown = resolve_costs(&normalized, &material_usage, rules)?;

    Ok(Quotation {
        layout,
        material_usage,
        cost_per_gram: rules.cost_per_gram,
        cost_breakdown,
        input: normalized,
    })
}

/// Like [`evaluate_quotation`], but folds the outcome into the flat
/// success-or-error envelope the UI consumes.
pub fn compute_quotation(input: &QuotationInput, rules: &BusinessRules) -> QuotationResult {
    evaluate_quotation(input, rules).into()
}

// =============================================================================
// Engine
// =============================================================================

/// Thread-safe pipeline runner holding the active [`BusinessRules`].
///
/// Computations snapshot the rules behind an `Arc`, so a concurrent
/// [`replace_rules`](QuotationEngine::replace_rules) never changes the rule
/// set mid-quotation.
#[derive(Debug)]
pub struct QuotationEngine {
    rules: RwLock<Arc<BusinessRules>>,
}

impl QuotationEngine {
    /// Creates an engine with the given rule set.
    pub fn new(rules: BusinessRules) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
        }
    }

    /// Returns a snapshot of the active rules.
    pub fn rules(&self) -> Arc<BusinessRules> {
        Arc::clone(&self.rules.read().expect("Business rules lock poisoned"))
    }

    /// Swaps in a new rule set. In-flight computations keep the snapshot
    /// they started with.
    pub fn replace_rules(&self, rules: BusinessRules) {
        *self.rules.write().expect("Business rules lock poisoned") = Arc::new(rules);
    }

    /// Runs the pipeline against the active rules.
    pub fn evaluate(&self, input: &QuotationInput) -> QuoteResult<Quotation> {
        evaluate_quotation(input, &self.rules())
    }

    /// Runs the pipeline and folds the outcome into a [`QuotationResult`].
    pub fn compute(&self, input: &QuotationInput) -> QuotationResult {
        compute_quotation(input, &self.rules())
    }
}

impl Default for QuotationEngine {
    fn default() -> Self {
        Self::new(BusinessRules::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteErrorKind;
    use crate::rules::{MaterialReference, Percent};
    use std::collections::BTreeMap;

    /// 4×3 items with a 0.5 gap in a 10×10 grid, the walkthrough case used
    /// throughout the breakdown tests.
    fn reference_input() -> QuotationInput {
        QuotationInput {
            item_width: Some(4.0),
            item_height: Some(3.0),
            gap_between_items: Some(0.5),
            count_horizontal: Some(10),
            count_vertical: Some(10),
            total_quantity: Some(1000),
            cost_per_stamp: Some(150.0),
            mounting_cost: Some(30.0),
            measurement_cost: Some(20.0),
            material_thickness_class: Some("2_mm".to_string()),
            assembly_costs: BTreeMap::from([
                ("bagged".to_string(), Some(50.0)),
                ("sealed".to_string(), None),
            ]),
            other_material_costs: BTreeMap::from([("plotter".to_string(), Some(40.0))]),
        }
    }

    #[test]
    fn test_layout_rounds_each_dimension_before_area() {
        let quotation =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();

        // Raw 46.5 × 36.5 rounds to 47 × 37; the area multiplies the
        // rounded figures, not the raw ones.
        assert_eq!(quotation.layout.total_length, 47.0);
        assert_eq!(quotation.layout.total_height, 37.0);
        assert_eq!(quotation.layout.total_area, 1739.0);
    }

    #[test]
    fn test_single_item_mold_is_margin_plus_item() {
        let mut input = reference_input();
        input.item_width = Some(5.0);
        input.item_height = Some(4.0);
        input.gap_between_items = Some(0.0);
        input.count_horizontal = Some(1);
        input.count_vertical = Some(1);

        let quotation = evaluate_quotation(&input, &BusinessRules::default()).unwrap();
        assert_eq!(quotation.layout.total_length, 7.0);
        assert_eq!(quotation.layout.total_height, 6.0);
        assert_eq!(quotation.layout.total_area, 42.0);
    }

    #[test]
    fn test_mold_never_shrinks_below_margin() {
        let mut input = reference_input();
        input.item_width = Some(0.1);
        input.item_height = Some(0.1);
        input.gap_between_items = Some(0.0);
        input.count_horizontal = Some(1);
        input.count_vertical = Some(1);

        // 2 + 0.1 rounds back down to the bare margin on both axes.
        let quotation = evaluate_quotation(&input, &BusinessRules::default()).unwrap();
        assert_eq!(quotation.layout.total_length, 2.0);
        assert_eq!(quotation.layout.total_height, 2.0);
        assert_eq!(quotation.layout.total_area, 4.0);
    }

    #[test]
    fn test_material_usage_scales_from_reference() {
        let quotation =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();

        // 2 mm reference: 50 g per 100 cm², so 1739 cm² weighs 869.5 g.
        assert_eq!(quotation.material_usage.total_grams, 869.5);
        assert_eq!(quotation.material_usage.grams_per_area, 0.5);
        assert_eq!(quotation.cost_per_gram, 10.0);
    }

    #[test]
    fn test_unknown_thickness_class_uses_fallback() {
        let mut input = reference_input();
        input.material_thickness_class = Some("9_mm".to_string());

        let quotation = evaluate_quotation(&input, &BusinessRules::default()).unwrap();
        let baseline =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();
        assert_eq!(quotation.material_usage, baseline.material_usage);
    }

    #[test]
    fn test_missing_fallback_entry_is_calculation_error() {
        let mut rules = BusinessRules::default();
        rules.material_reference_table = MaterialTable::new();
        rules.material_reference_table.insert(
            "1_mm",
            MaterialReference {
                reference_grams: 25.0,
                reference_area: 100.0,
            },
        );

        let mut input = reference_input();
        input.material_thickness_class = Some("9_mm".to_string());

        let result = compute_quotation(&input, &rules);
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(QuoteErrorKind::CalculationError));
        assert!(result.error.unwrap().contains("9_mm"));
    }

    #[test]
    fn test_cost_breakdown_reference_figures() {
        let quotation =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();
        let costs = &quotation.cost_breakdown;

        assert_eq!(costs.cost_per_stamp, 150.0);
        assert_eq!(costs.molds_per_hour, 12.0);
        assert_eq!(costs.material_unit_cost, 86.95);
        assert_eq!(costs.mounting_cost, 30.0);
        assert_eq!(costs.measurement_cost, 20.0);
        assert_eq!(costs.total_material, 136.95);
        assert_eq!(costs.assembly_total, 50.0);
        assert_eq!(costs.other_materials_total, 40.0);
        assert_eq!(costs.admin_cost, 18.85);
        assert_eq!(costs.total_production_cost, 520.19);

        let amounts: Vec<f64> = costs.overhead_layers.iter().map(|l| l.amount).collect();
        assert_eq!(amounts, vec![30.16, 37.7, 56.54]);
    }

    #[test]
    fn test_total_production_cost_sums_unrounded_layers() {
        let quotation =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();
        let costs = &quotation.cost_breakdown;

        // 376.95 + 124.3935 + 18.8475 = 520.191, reported as 520.19. Adding
        // up the displayed layer amounts instead would land on 520.20.
        assert_eq!(costs.total_production_cost, 520.19);

        let displayed: f64 = costs.overhead_layers.iter().map(|l| l.amount).sum();
        assert_eq!(displayed, 124.4);
        assert_eq!(costs.admin_cost, 18.85);
    }

    #[test]
    fn test_sale_prices_divide_by_margin_complement() {
        let quotation =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();
        let prices: Vec<f64> = quotation
            .cost_breakdown
            .sale_prices
            .iter()
            .map(|p| p.price)
            .collect();

        // 520.191 / 0.55 = 945.80, not 520.191 × 1.45: margin, not markup.
        // The division takes the raw total, not the reported 520.19.
        assert_eq!(prices, vec![945.8, 722.49, 626.74, 584.48]);
        assert_eq!(quotation.recommended_sale_price(), Some(722.49));
    }

    #[test]
    fn test_single_margin_tier() {
        let mut rules = BusinessRules::default();
        rules.profit_percentages = vec![Percent::new(30.0)];

        let quotation = evaluate_quotation(&reference_input(), &rules).unwrap();
        let prices = &quotation.cost_breakdown.sale_prices;
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].price, 743.13);
        assert_eq!(quotation.recommended_sale_price(), Some(743.13));
    }

    #[test]
    fn test_overhead_layers_mirror_configured_percentages() {
        let mut rules = BusinessRules::default();
        rules.overhead_percentages = (1..=10).map(|p| Percent::new(f64::from(p))).collect();

        let quotation = evaluate_quotation(&reference_input(), &rules).unwrap();
        let layers = &quotation.cost_breakdown.overhead_layers;
        assert_eq!(layers.len(), 10);
        for (layer, expected) in layers.iter().zip(1..=10) {
            assert_eq!(layer.percentage, Percent::new(f64::from(expected)));
        }
        assert_eq!(layers[0].amount, 3.77);
        assert_eq!(layers[1].amount, 7.54);
        assert_eq!(layers[2].amount, 11.31);
    }

    #[test]
    fn test_quantity_does_not_change_unit_costs() {
        let mut bulk = reference_input();
        bulk.total_quantity = Some(50_000);

        let baseline =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();
        let quotation = evaluate_quotation(&bulk, &BusinessRules::default()).unwrap();

        assert_eq!(quotation.cost_breakdown, baseline.cost_breakdown);
        assert_eq!(quotation.input.total_quantity, 50_000);
    }

    #[test]
    fn test_identical_input_identical_result() {
        let engine = QuotationEngine::default();
        let first = engine.compute(&reference_input());
        let second = engine.compute(&reference_input());
        assert_eq!(first, second);
    }

    #[test]
    fn test_margin_of_one_hundred_is_rejected() {
        let mut rules = BusinessRules::default();
        rules.profit_percentages = vec![Percent::new(45.0), Percent::new(100.0)];

        let result = compute_quotation(&reference_input(), &rules);
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(QuoteErrorKind::CalculationError));
        assert!(result.error.unwrap().contains("100"));
    }

    #[test]
    fn test_missing_mandatory_field_reports_missing_field_kind() {
        let mut input = reference_input();
        input.count_horizontal = None;

        let result = compute_quotation(&input, &BusinessRules::default());
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(QuoteErrorKind::MissingField));
        assert!(result.error.unwrap().contains("count_horizontal"));
        assert!(result.cost_breakdown.is_none());
    }

    #[test]
    fn test_zero_setup_minutes_disables_hourly_rate() {
        let mut rules = BusinessRules::default();
        rules.setup_minutes_per_batch = 0.0;

        let quotation = evaluate_quotation(&reference_input(), &rules).unwrap();
        assert_eq!(quotation.cost_breakdown.molds_per_hour, 0.0);
    }

    #[test]
    fn test_replace_rules_affects_later_computations() {
        let engine = QuotationEngine::default();
        let before = engine.compute(&reference_input());

        let mut pricier = BusinessRules::default();
        pricier.cost_per_gram = 20.0;
        engine.replace_rules(pricier);

        let after = engine.compute(&reference_input());
        assert_eq!(
            before.cost_breakdown.unwrap().material_unit_cost,
            86.95
        );
        assert_eq!(after.cost_breakdown.unwrap().material_unit_cost, 173.9);
        assert_eq!(engine.rules().cost_per_gram, 20.0);
    }

    #[test]
    fn test_engine_evaluate_matches_free_function() {
        let engine = QuotationEngine::default();
        let via_engine = engine.evaluate(&reference_input()).unwrap();
        let via_free =
            evaluate_quotation(&reference_input(), &BusinessRules::default()).unwrap();
        assert_eq!(via_engine, via_free);
    }
}
