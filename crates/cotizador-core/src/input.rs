//! # Quotation Input
//!
//! The caller-facing input record and its normalized form.
//!
//! ## Two-Stage Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Lifecycle                                    │
//! │                                                                         │
//! │  Capture form / API payload                                            │
//! │       │  (every field optional: an absent JSON key must be            │
//! │       │   representable, not silently zeroed)                          │
//! │       ▼                                                                 │
//! │  QuotationInput ──► normalize() ──► NormalizedInput                    │
//! │                        │                 │                             │
//! │                        │                 └── defaults applied,        │
//! │                        │                     nulls resolved,          │
//! │                        │                     every number checked     │
//! │                        └── MissingField / range errors               │
//! │                                                                         │
//! │  The engine computes from NormalizedInput only, and echoes it back     │
//! │  inside the result so the consumer sees exactly what was priced.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::QuoteResult;
use crate::validation::{at_least_one, layout_count, non_negative, positive, require};
use crate::DEFAULT_THICKNESS_CLASS;

// =============================================================================
// Draft Input
// =============================================================================

/// One quotation request as the caller hands it over.
///
/// Every field is optional on the wire. `normalize` decides which ones were
/// actually mandatory; fee-style fields simply default. The two cost maps
/// accept `null` values because capture forms send untouched component rows
/// that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct QuotationInput {
    /// Label width in cm.
    pub item_width: Option<f64>,

    /// Label height in cm.
    pub item_height: Option<f64>,

    /// Spacing between neighboring labels in cm.
    pub gap_between_items: Option<f64>,

    /// Labels per mold row.
    pub count_horizontal: Option<u32>,

    /// Labels per mold column.
    pub count_vertical: Option<u32>,

    /// Units the customer ordered.
    pub total_quantity: Option<u32>,

    /// Cost of one die-cut stamping (absent ⇒ 0).
    pub cost_per_stamp: Option<f64>,

    /// Flat mounting fee (absent ⇒ 0).
    pub mounting_cost: Option<f64>,

    /// Flat measurement fee (absent ⇒ 0).
    pub measurement_cost: Option<f64>,

    /// Thickness class key into the material reference table
    /// (absent ⇒ the standard class).
    pub material_thickness_class: Option<String>,

    /// Optional assembly cost components (bagging, sealing, packing, ...).
    pub assembly_costs: BTreeMap<String, Option<f64>>,

    /// Optional secondary material/process costs (plotter, perforation,
    /// guillotine, ...).
    pub other_material_costs: BTreeMap<String, Option<f64>>,
}

impl QuotationInput {
    /// Checks presence and sanity of every field and produces the record
    /// the pipeline computes from.
    ///
    /// ## Errors
    /// - [`MissingField`](crate::error::QuoteError::MissingField) for any
    ///   absent mandatory field
    /// - a calculation-kind error for any number that fails validation
    pub fn normalize(&self) -> QuoteResult<NormalizedInput> {
        let item_width = positive("item_width", require("item_width", self.item_width)?)?;
        let item_height = positive("item_height", require("item_height", self.item_height)?)?;
        let gap_between_items = non_negative(
            "gap_between_items",
            require("gap_between_items", self.gap_between_items)?,
        )?;
        let count_horizontal = layout_count(
            "count_horizontal",
            require("count_horizontal", self.count_horizontal)?,
        )?;
        let count_vertical = layout_count(
            "count_vertical",
            require("count_vertical", self.count_vertical)?,
        )?;
        let total_quantity =
            at_least_one("total_quantity", require("total_quantity", self.total_quantity)?)?;

        let cost_per_stamp =
            non_negative("cost_per_stamp", self.cost_per_stamp.unwrap_or(0.0))?;
        let mounting_cost = non_negative("mounting_cost", self.mounting_cost.unwrap_or(0.0))?;
        let measurement_cost =
            non_negative("measurement_cost", self.measurement_cost.unwrap_or(0.0))?;
        let material_thickness_class = self
            .material_thickness_class
            .clone()
            .unwrap_or_else(|| DEFAULT_THICKNESS_CLASS.to_string());

        Ok(NormalizedInput {
            item_width,
            item_height,
            gap_between_items,
            count_horizontal,
            count_vertical,
            total_quantity,
            cost_per_stamp,
            mounting_cost,
            measurement_cost,
            material_thickness_class,
            assembly_costs: resolve_components("assembly_costs", &self.assembly_costs)?,
            other_material_costs: resolve_components(
                "other_material_costs",
                &self.other_material_costs,
            )?,
        })
    }
}

/// Resolves a component map: `null` becomes 0, negatives are rejected.
fn resolve_components(
    map_name: &str,
    components: &BTreeMap<String, Option<f64>>,
) -> QuoteResult<BTreeMap<String, f64>> {
    let mut resolved = BTreeMap::new();
    for (name, amount) in components {
        let field = format!("{map_name}.{name}");
        resolved.insert(name.clone(), non_negative(&field, amount.unwrap_or(0.0))?);
    }
    Ok(resolved)
}

// =============================================================================
// Normalized Input
// =============================================================================

/// The validated, fully-defaulted input the pipeline runs on.
///
/// Echoed verbatim inside a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NormalizedInput {
    pub item_width: f64,
    pub item_height: f64,
    pub gap_between_items: f64,
    pub count_horizontal: u32,
    pub count_vertical: u32,
    pub total_quantity: u32,
    pub cost_per_stamp: f64,
    pub mounting_cost: f64,
    pub measurement_cost: f64,
    pub material_thickness_class: String,
    pub assembly_costs: BTreeMap<String, f64>,
    pub other_material_costs: BTreeMap<String, f64>,
}

impl NormalizedInput {
    /// Labels produced by one mold cycle.
    ///
    /// Material cost is apportioned across this count, which is why the
    /// quote is independent of `total_quantity`.
    #[inline]
    pub fn units_per_mold(&self) -> u32 {
        self.count_horizontal * self.count_vertical
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;

    fn full_input() -> QuotationInput {
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
    fn test_normalize_full_input() {
        let normalized = full_input().normalize().unwrap();
        assert_eq!(normalized.item_width, 4.0);
        assert_eq!(normalized.count_horizontal, 10);
        assert_eq!(normalized.units_per_mold(), 100);
        assert_eq!(normalized.material_thickness_class, "2_mm");
    }

    #[test]
    fn test_normalize_resolves_null_components_to_zero() {
        let normalized = full_input().normalize().unwrap();
        assert_eq!(normalized.assembly_costs["sealed"], 0.0);
        assert_eq!(normalized.assembly_costs["bagged"], 50.0);
    }

    #[test]
    fn test_normalize_defaults_fees_and_thickness() {
        let mut input = full_input();
        input.mounting_cost = None;
        input.measurement_cost = None;
        input.material_thickness_class = None;

        let normalized = input.normalize().unwrap();
        assert_eq!(normalized.mounting_cost, 0.0);
        assert_eq!(normalized.measurement_cost, 0.0);
        assert_eq!(normalized.material_thickness_class, DEFAULT_THICKNESS_CLASS);
    }

    #[test]
    fn test_normalize_defaults_cost_per_stamp_to_zero() {
        let mut input = full_input();
        input.cost_per_stamp = None;

        // A quote without die-cutting is still a quote, it stamps for free.
        let normalized = input.normalize().unwrap();
        assert_eq!(normalized.cost_per_stamp, 0.0);

        let mut input = full_input();
        input.cost_per_stamp = Some(-150.0);
        assert!(matches!(
            input.normalize().unwrap_err(),
            QuoteError::Negative { .. }
        ));
    }

    #[test]
    fn test_normalize_reports_each_missing_mandatory_field() {
        for strip in [
            "item_width",
            "item_height",
            "gap_between_items",
            "count_horizontal",
            "count_vertical",
            "total_quantity",
        ] {
            let mut input = full_input();
            match strip {
                "item_width" => input.item_width = None,
                "item_height" => input.item_height = None,
                "gap_between_items" => input.gap_between_items = None,
                "count_horizontal" => input.count_horizontal = None,
                "count_vertical" => input.count_vertical = None,
                "total_quantity" => input.total_quantity = None,
                _ => unreachable!(),
            }
            let err = input.normalize().unwrap_err();
            assert!(
                matches!(&err, QuoteError::MissingField { field } if field == strip),
                "expected MissingField for {strip}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_normalize_rejects_bad_numbers() {
        let mut input = full_input();
        input.item_width = Some(0.0);
        assert!(matches!(
            input.normalize().unwrap_err(),
            QuoteError::NotPositive { .. }
        ));

        let mut input = full_input();
        input.gap_between_items = Some(-0.5);
        assert!(matches!(
            input.normalize().unwrap_err(),
            QuoteError::Negative { .. }
        ));

        let mut input = full_input();
        input.count_vertical = Some(0);
        assert!(matches!(
            input.normalize().unwrap_err(),
            QuoteError::CountTooSmall { .. }
        ));

        let mut input = full_input();
        input
            .assembly_costs
            .insert("bagged".to_string(), Some(-1.0));
        let err = input.normalize().unwrap_err();
        assert!(
            matches!(&err, QuoteError::Negative { field, .. } if field == "assembly_costs.bagged")
        );
    }

    #[test]
    fn test_deserialize_with_absent_keys() {
        let input: QuotationInput = serde_json::from_str(r#"{"item_width": 4.0}"#).unwrap();
        assert_eq!(input.item_width, Some(4.0));
        assert_eq!(input.item_height, None);
        assert!(input.assembly_costs.is_empty());
    }

    #[test]
    fn test_deserialize_null_component_values() {
        let input: QuotationInput = serde_json::from_str(
            r#"{"assembly_costs": {"bagged": 50.0, "sealed": null}}"#,
        )
        .unwrap();
        assert_eq!(input.assembly_costs["bagged"], Some(50.0));
        assert_eq!(input.assembly_costs["sealed"], None);
    }
}
