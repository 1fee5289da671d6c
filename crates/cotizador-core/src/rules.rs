//! # Business Rules Module
//!
//! The configuration shape the engine computes against.
//!
//! ## Who Owns What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Business Rules Ownership                            │
//! │                                                                         │
//! │  cotizador-config (file layer)        cotizador-core (THIS FILE)       │
//! │  ─────────────────────────────        ────────────────────────────     │
//! │  • finds business_rules.toml          • BusinessRules struct           │
//! │  • parses + caches + reloads          • MaterialTable + fallback       │
//! │                    │                  • Percent newtype                │
//! │                    └────────────────► • validate()                     │
//! │                                                                         │
//! │  The engine never learns where the rules came from. It receives a      │
//! │  BusinessRules value and nothing else.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Percentage Convention
//! Every percentage is a whole-number rate: `8` means 8%, never `0.08`.
//! The [`Percent`] newtype keeps that convention in one place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::error::RulesError;
use crate::FALLBACK_REFERENCE_KEY;

// =============================================================================
// Percent
// =============================================================================

/// A percentage expressed as a whole number (`8` = 8%).
///
/// ## Why a Newtype?
/// Overhead layers, the admin rate and profit margins all travel through
/// the rules file as bare numbers. Wrapping them makes "is this already
/// divided by 100?" a question the type system answers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    /// Creates a percentage from a whole-number rate.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Returns the whole-number rate (`8.0` for 8%).
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Applies this percentage to a base amount.
    ///
    /// ## Example
    /// ```rust
    /// use cotizador_core::rules::Percent;
    ///
    /// let overhead = Percent::new(8.0);
    /// assert_eq!(overhead.of(1000.0), 80.0);
    /// ```
    #[inline]
    pub fn of(&self, base: f64) -> f64 {
        base * (self.0 / 100.0)
    }

    /// Whether this rate can act as a profit margin.
    ///
    /// Sale prices divide by `1 - rate/100`, so a rate at or above 100
    /// has no finite price.
    #[inline]
    pub fn is_margin(&self) -> bool {
        self.0 < 100.0
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Percent::new(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Material Reference
// =============================================================================

/// Weight sample for one thickness class: a known cut of
/// `reference_area` cm² weighs `reference_grams` grams.
///
/// Consumption for any mold scales off this ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaterialReference {
    /// Grams the sampled cut weighs.
    pub reference_grams: f64,

    /// Area of the sampled cut in cm².
    pub reference_area: f64,
}

impl MaterialReference {
    /// Grams of material a mold of `area` cm² consumes, unrounded.
    #[inline]
    pub fn grams_for_area(&self, area: f64) -> f64 {
        (area * self.reference_grams) / self.reference_area
    }
}

// =============================================================================
// Material Table
// =============================================================================

/// Thickness-class key → reference entry, with a guaranteed fallback.
///
/// A valid table always carries a `default` entry; an unknown class is
/// resolved to it silently, never as an error. Operators add exotic
/// gauges to the file without touching code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct MaterialTable(BTreeMap<String, MaterialReference>);

impl MaterialTable {
    /// Creates an empty table (invalid until a fallback entry is added).
    pub fn new() -> Self {
        MaterialTable(BTreeMap::new())
    }

    /// Adds or replaces the entry for a thickness class.
    pub fn insert(&mut self, class: impl Into<String>, reference: MaterialReference) {
        self.0.insert(class.into(), reference);
    }

    /// Exact lookup, no fallback.
    pub fn get(&self, class: &str) -> Option<&MaterialReference> {
        self.0.get(class)
    }

    /// Lookup with silent fallback to the `default` entry.
    ///
    /// Returns `None` only when the class is unknown AND the table has no
    /// fallback, which `validate` rejects up front.
    pub fn resolve(&self, class: &str) -> Option<&MaterialReference> {
        self.0
            .get(class)
            .or_else(|| self.0.get(FALLBACK_REFERENCE_KEY))
    }

    /// Whether the fallback entry is present.
    pub fn has_fallback(&self) -> bool {
        self.0.contains_key(FALLBACK_REFERENCE_KEY)
    }

    /// Number of entries, fallback included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MaterialReference)> {
        self.0.iter()
    }
}

// =============================================================================
// Business Rules
// =============================================================================

/// Every business constant the quotation pipeline reads.
///
/// Deserialized from `business_rules.toml` by the config crate; the
/// percentage lists fall back to the shop's standard tiers when the file
/// omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessRules {
    /// Reference weights per thickness class (`default` entry mandatory).
    pub material_reference_table: MaterialTable,

    /// Price of one gram of PVC.
    pub cost_per_gram: f64,

    /// Minutes to prepare one mold batch; drives the molds-per-hour
    /// metric.
    pub setup_minutes_per_batch: f64,

    /// Indirect-cost layers applied to the cost base, in quote order.
    #[serde(default = "default_overhead_percentages")]
    pub overhead_percentages: Vec<Percent>,

    /// Administrative surcharge on the cost base.
    #[serde(default = "default_admin_percentage")]
    pub admin_percentage: Percent,

    /// Margin tiers offered as candidate sale prices, in quote order.
    #[serde(default = "default_profit_percentages")]
    pub profit_percentages: Vec<Percent>,
}

/// Standard overhead tiers.
fn default_overhead_percentages() -> Vec<Percent> {
    vec![Percent::new(8.0), Percent::new(10.0), Percent::new(15.0)]
}

/// Standard administrative rate.
fn default_admin_percentage() -> Percent {
    Percent::new(5.0)
}

/// Standard margin tiers, highest first.
fn default_profit_percentages() -> Vec<Percent> {
    vec![
        Percent::new(45.0),
        Percent::new(28.0),
        Percent::new(17.0),
        Percent::new(11.0),
    ]
}

impl BusinessRules {
    /// Checks that these rules can drive a calculation without producing
    /// garbage.
    ///
    /// ## What Is Checked
    /// - reference table non-empty and carrying its fallback entry
    /// - every reference area positive (they are divisors), grams ≥ 0
    /// - rates non-negative
    /// - no negative percentage anywhere
    ///
    /// Profit tiers ≥ 100 are deliberately NOT rejected here: the engine
    /// reports them per calculation as a calculation error, which is the
    /// shape callers already handle.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.material_reference_table.is_empty() {
            return Err(RulesError::EmptyReferenceTable);
        }
        if !self.material_reference_table.has_fallback() {
            return Err(RulesError::MissingFallbackEntry {
                key: FALLBACK_REFERENCE_KEY.to_string(),
            });
        }
        for (class, reference) in self.material_reference_table.iter() {
            if reference.reference_area <= 0.0 || !reference.reference_area.is_finite() {
                return Err(RulesError::NonPositiveReferenceArea {
                    class: class.clone(),
                    area: reference.reference_area,
                });
            }
            if reference.reference_grams < 0.0 || !reference.reference_grams.is_finite() {
                return Err(RulesError::NegativeReferenceGrams {
                    class: class.clone(),
                    grams: reference.reference_grams,
                });
            }
        }
        if self.cost_per_gram < 0.0 || !self.cost_per_gram.is_finite() {
            return Err(RulesError::NegativeRate {
                field: "cost_per_gram".to_string(),
                value: self.cost_per_gram,
            });
        }
        if self.setup_minutes_per_batch < 0.0 || !self.setup_minutes_per_batch.is_finite() {
            return Err(RulesError::NegativeRate {
                field: "setup_minutes_per_batch".to_string(),
                value: self.setup_minutes_per_batch,
            });
        }
        for (field, rates) in [
            ("overhead_percentages", self.overhead_percentages.as_slice()),
            ("profit_percentages", self.profit_percentages.as_slice()),
        ] {
            for rate in rates {
                if rate.value() < 0.0 || !rate.value().is_finite() {
                    return Err(RulesError::NegativePercentage {
                        field: field.to_string(),
                        value: rate.value(),
                    });
                }
            }
        }
        if self.admin_percentage.value() < 0.0 || !self.admin_percentage.value().is_finite() {
            return Err(RulesError::NegativePercentage {
                field: "admin_percentage".to_string(),
                value: self.admin_percentage.value(),
            });
        }
        Ok(())
    }
}

/// The shop's standard rule set.
///
/// Reference weights follow PVC gauge linearly against a 100 cm² sample:
/// the 2 mm house standard weighs 50 g, thinner and thicker gauges scale
/// with thickness. `default` mirrors the 2 mm entry.
impl Default for BusinessRules {
    fn default() -> Self {
        let mut table = MaterialTable::new();
        for (class, grams) in [
            ("1_mm", 25.0),
            ("1.2_mm", 30.0),
            ("1.5_mm", 37.5),
            ("2_mm", 50.0),
            ("3_mm", 75.0),
            ("5_mm", 125.0),
            (FALLBACK_REFERENCE_KEY, 50.0),
        ] {
            table.insert(
                class,
                MaterialReference {
                    reference_grams: grams,
                    reference_area: 100.0,
                },
            );
        }
        BusinessRules {
            material_reference_table: table,
            cost_per_gram: 10.0,
            setup_minutes_per_batch: 5.0,
            overhead_percentages: default_overhead_percentages(),
            admin_percentage: default_admin_percentage(),
            profit_percentages: default_profit_percentages(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
