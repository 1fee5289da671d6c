//! # Validation Module
//!
//! Field-level checks for quotation input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Capture form / API client                                    │
//! │  ├── required-field marks, min/max attributes                          │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (inside QuotationInput::normalize)               │
//! │  ├── presence of every mandatory field                                 │
//! │  └── numeric sanity (finite, sign, count bounds)                       │
//! │                                                                         │
//! │  The engine never trusts Layer 1: a caller that skipped the form       │
//! │  still gets a typed error, not NaN arithmetic.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{QuoteError, QuoteResult};
use crate::MAX_LAYOUT_COUNT;

// =============================================================================
// Presence
// =============================================================================

/// Unwraps a mandatory field or reports it missing.
///
/// ## Example
/// ```rust
/// use cotizador_core::validation::require;
///
/// assert_eq!(require("item_width", Some(4.0)).unwrap(), 4.0);
/// assert!(require::<f64>("item_width", None).is_err());
/// ```
pub fn require<T>(field: &str, value: Option<T>) -> QuoteResult<T> {
    value.ok_or_else(|| QuoteError::MissingField {
        field: field.to_string(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a dimension that must be strictly positive (width, height).
pub fn positive(field: &str, value: f64) -> QuoteResult<f64> {
    if !value.is_finite() {
        return Err(QuoteError::NotFinite {
            field: field.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(QuoteError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Validates an amount that may be zero but never negative (gaps, fees,
/// cost components).
pub fn non_negative(field: &str, value: f64) -> QuoteResult<f64> {
    if !value.is_finite() {
        return Err(QuoteError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(QuoteError::Negative {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Validates a count that must be at least 1 (ordered quantity).
pub fn at_least_one(field: &str, value: u32) -> QuoteResult<u32> {
    if value < 1 {
        return Err(QuoteError::CountTooSmall {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Validates a layout count (items per mold row/column).
///
/// ## Rules
/// - At least 1 (a mold holds something)
/// - At most [`MAX_LAYOUT_COUNT`] (catches a mistyped 4000 for 40)
pub fn layout_count(field: &str, value: u32) -> QuoteResult<u32> {
    at_least_one(field, value)?;
    if value > MAX_LAYOUT_COUNT {
        return Err(QuoteError::CountTooLarge {
            field: field.to_string(),
            max: MAX_LAYOUT_COUNT,
        });
    }
    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
