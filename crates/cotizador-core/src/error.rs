//! # Error Types
//!
//! Domain-specific error types for cotizador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cotizador-core errors (this file)                                     │
//! │  ├── QuoteError   - Anything that stops one calculation               │
//! │  └── RulesError   - An invalid BusinessRules value                    │
//! │                                                                         │
//! │  cotizador-config errors (separate crate)                              │
//! │  └── ConfigError  - Rules file discovery/parse failures               │
//! │                                                                         │
//! │  Boundary: QuoteError collapses to exactly two reportable kinds        │
//! │  (missing_field | calculation_error) inside QuotationResult.           │
//! │  Everything else (poisoned locks, bugs) propagates as a panic.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a user-facing message

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Quote Error
// =============================================================================

/// Errors that abort a single quotation calculation.
///
/// Variants carry enough context to tell the operator exactly which input
/// to fix. Every variant maps to one of the two reportable kinds via
/// [`QuoteError::kind`].
#[derive(Debug, Error)]
pub enum QuoteError {
    /// A mandatory input field was absent.
    ///
    /// ## When This Occurs
    /// - The form/API payload never set the field
    /// - A JSON key was dropped before reaching the engine
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A field that must be strictly greater than zero was not.
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: String, value: f64 },

    /// A cost or spacing field was negative.
    #[error("{field} cannot be negative, got {value}")]
    Negative { field: String, value: f64 },

    /// A numeric field was NaN or infinite.
    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    /// A layout count was below one (a mold holds at least one item).
    #[error("{field} must be at least 1")]
    CountTooSmall { field: String },

    /// A layout count beyond any physical mold, usually a typo.
    #[error("{field} cannot exceed {max}")]
    CountTooLarge { field: String, max: u32 },

    /// The resolved mold area was zero or negative.
    #[error("Mold area must be positive, got {area}")]
    DegenerateArea { area: f64 },

    /// No reference entry matched the thickness class and the table has
    /// no fallback entry either.
    #[error("No material reference for thickness class '{class}'")]
    UnknownThicknessClass { class: String },

    /// The resolved reference entry divides by its area, so it must be
    /// positive.
    #[error("Reference area for thickness class '{class}' must be positive, got {area}")]
    InvalidReferenceArea { class: String, area: f64 },

    /// A profit percentage at or above 100 would make the margin formula
    /// divide by zero or flip the price negative.
    #[error("Profit percentage must be below 100, got {percentage}")]
    MarginTooHigh { percentage: f64 },
}

impl QuoteError {
    /// Collapses this error to the kind reported at the result boundary.
    ///
    /// Only field absence is `missing_field`; every other variant is an
    /// arithmetic/validation problem and reports as `calculation_error`.
    pub fn kind(&self) -> QuoteErrorKind {
        match self {
            QuoteError::MissingField { .. } => QuoteErrorKind::MissingField,
            _ => QuoteErrorKind::CalculationError,
        }
    }
}

// =============================================================================
// Reportable Error Kind
// =============================================================================

/// The two error kinds a `QuotationResult` can carry.
///
/// Callers branch on this tag: `missing_field` means re-prompt the user for
/// the named field, `calculation_error` means the numbers themselves are
/// unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuoteErrorKind {
    /// A required input key was absent.
    MissingField,
    /// Arithmetic or numeric validation failed.
    CalculationError,
}

// =============================================================================
// Rules Error
// =============================================================================

/// Validation errors for a [`BusinessRules`](crate::rules::BusinessRules)
/// value.
///
/// Raised by `BusinessRules::validate`, normally at configuration load time
/// (the config crate wraps these into its own error type).
#[derive(Debug, Error)]
pub enum RulesError {
    /// The material reference table has no entries at all.
    #[error("Material reference table is empty")]
    EmptyReferenceTable,

    /// The material reference table is missing its fallback entry.
    #[error("Material reference table has no '{key}' entry")]
    MissingFallbackEntry { key: String },

    /// A reference entry carries a non-positive area (it is a divisor).
    #[error("Reference area for '{class}' must be positive, got {area}")]
    NonPositiveReferenceArea { class: String, area: f64 },

    /// A reference entry carries negative grams.
    #[error("Reference grams for '{class}' cannot be negative, got {grams}")]
    NegativeReferenceGrams { class: String, grams: f64 },

    /// A monetary or time rate was negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeRate { field: String, value: f64 },

    /// A configured percentage was negative.
    #[error("{field} cannot hold a negative percentage, got {value}")]
    NegativePercentage { field: String, value: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with QuoteError.
pub type QuoteResult<T> = Result<T, QuoteError>;

// =============================================================================
// Unit Tests
// =============================================================================
