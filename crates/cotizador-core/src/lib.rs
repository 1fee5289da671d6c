//! # cotizador-core: Pure Quotation Logic
//!
//! This crate is the **heart** of the quotation tool. It turns a label order
//! (item size, grid counts, fees) into a full production cost breakdown and
//! tiered sale prices, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cotizador Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Caller (UI / API)                          │   │
//! │  │        order form ──► QuotationInput ──► QuotationResult        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cotizador-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   input   │  │   rules   │  │  engine   │  │ quotation │  │   │
//! │  │   │ normalize │  │  Percent  │  │  layout   │  │ breakdown │  │   │
//! │  │   │  validate │  │ MaterialT.│  │  material │  │  envelope │  │   │
//! │  │   └───────────┘  └───────────┘  │   costs   │  └───────────┘  │   │
//! │  │                                 └───────────┘                  │   │
//! │  │   NO I/O • NO FILE SYSTEM • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               cotizador-config (Rules Loading)                  │   │
//! │  │          TOML discovery, parsing, validation, reload            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Raw and normalized quotation requests
//! - [`rules`] - Configurable business rules (material table, percentages)
//! - [`engine`] - The three-step calculation pipeline and engine state
//! - [`quotation`] - Breakdown records and the success-or-error envelope
//! - [`rounding`] - The two rounding functions every figure goes through
//! - [`error`] - Domain error types and the two boundary error kinds
//! - [`validation`] - Field-level numeric checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every quotation is deterministic - same input and
//!    rules = bit-identical output
//! 2. **No I/O**: File, network and environment access is FORBIDDEN here;
//!    rules arrive as values
//! 3. **Report-Time Rounding**: The cost chain runs on raw `f64` values and
//!    every reported figure is rounded to hundredths exactly once
//! 4. **Explicit Errors**: All failures are typed and collapse to exactly
//!    two boundary kinds, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cotizador_core::rounding;
//!
//! // Dimensions round ties away from zero, money to hundredths
//! assert_eq!(rounding::to_unit(46.5), 47.0);
//! assert_eq!(rounding::to_hundredths(86.945), 86.95);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod input;
pub mod quotation;
pub mod rounding;
pub mod rules;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cotizador_core::QuotationEngine` instead of
// `use cotizador_core::engine::QuotationEngine`

pub use engine::{compute_quotation, evaluate_quotation, QuotationEngine};
pub use error::{QuoteError, QuoteErrorKind, QuoteResult, RulesError};
pub use input::{NormalizedInput, QuotationInput};
pub use quotation::{CostBreakdown, MaterialUsage, MoldLayout, Quotation, QuotationResult};
pub use rules::{BusinessRules, MaterialReference, MaterialTable, Percent};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed border added to each mold axis, in the same unit as item sizes.
///
/// ## Business Reason
/// The press needs a frame around the item grid to clamp the sheet. One unit
/// on each side, so two per axis, regardless of grid size.
pub const MOLD_MARGIN: f64 = 2.0;

/// Thickness class assumed when a request does not name one.
///
/// ## Business Reason
/// The 2 mm sheet is the shop's standard stock; most orders never specify a
/// thickness at all.
pub const DEFAULT_THICKNESS_CLASS: &str = "2_mm";

/// Reference table key consulted when the requested class has no entry.
///
/// ## Business Reason
/// A quote for an unstocked thickness should still come out priced as
/// standard stock rather than fail, so the table carries a `default` row
/// that unknown classes silently resolve to.
pub const FALLBACK_REFERENCE_KEY: &str = "default";

/// Maximum item count along either mold axis.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 5000 instead of 50) from
/// producing molds no press could hold.
pub const MAX_LAYOUT_COUNT: u32 = 1000;
