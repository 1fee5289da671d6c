//! # Rounding Module
//!
//! The two rounding rules every quotation figure passes through.
//!
//! ## Why Centralize Rounding?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE HALF-UNIT PROBLEM                                                  │
//! │                                                                         │
//! │  A 10×10 mold of 4cm labels with 0.5cm gaps measures 46.5cm wide.      │
//! │  The shop's rule: a half unit of material is always charged as a       │
//! │  full unit, so 46.5 → 47 and -46.5 → -47 (ties away from zero).        │
//! │                                                                         │
//! │  f64::round already does exactly that. What it must NOT become is     │
//! │  round-half-to-even (46.5 → 46): that undercharges every tie and the   │
//! │  published quote tables would stop matching the shop's figures.        │
//! │                                                                         │
//! │  Money and grams are quoted to 2 decimals, same tie rule:              │
//! │    869.5 g stays 869.5, a computed 86.945 becomes 86.95 (not 86.94)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cotizador_core::rounding;
//!
//! // Mold dimensions land on whole units
//! assert_eq!(rounding::to_unit(46.5), 47.0);
//!
//! // Monetary amounts and gram weights land on hundredths
//! assert_eq!(rounding::to_hundredths(86.9501), 86.95);
//! ```

// =============================================================================
// Rounding Rules
// =============================================================================

/// Rounds to the nearest whole unit, ties away from zero.
///
/// Used for mold dimensions and the mold area: material is cut and billed
/// in whole centimeters.
///
/// ## Example
/// ```rust
/// use cotizador_core::rounding::to_unit;
///
/// assert_eq!(to_unit(46.5), 47.0);
/// assert_eq!(to_unit(36.5), 37.0);
/// assert_eq!(to_unit(36.4), 36.0);
/// ```
#[inline]
pub fn to_unit(value: f64) -> f64 {
    value.round()
}

/// Rounds to 2 decimal places, ties away from zero.
///
/// Used for every monetary amount and for gram weights.
///
/// ## Example
/// ```rust
/// use cotizador_core::rounding::to_hundredths;
///
/// assert_eq!(to_hundredths(86.945), 86.95);
/// assert_eq!(to_hundredths(869.5), 869.5);
/// ```
#[inline]
pub fn to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_unit_ties_round_away_from_zero() {
        assert_eq!(to_unit(46.5), 47.0);
        assert_eq!(to_unit(36.5), 37.0);
        assert_eq!(to_unit(0.5), 1.0);
        assert_eq!(to_unit(-0.5), -1.0);
        assert_eq!(to_unit(-46.5), -47.0);
    }

    #[test]
    fn test_to_unit_plain_cases() {
        assert_eq!(to_unit(46.4), 46.0);
        assert_eq!(to_unit(46.6), 47.0);
        assert_eq!(to_unit(47.0), 47.0);
        assert_eq!(to_unit(0.0), 0.0);
    }

    #[test]
    fn test_to_hundredths_keeps_two_decimals() {
        assert_eq!(to_hundredths(86.945), 86.95);
        assert_eq!(to_hundredths(86.944), 86.94);
        assert_eq!(to_hundredths(869.5), 869.5);
        assert_eq!(to_hundredths(0.5), 0.5);
    }

    #[test]
    fn test_to_hundredths_flattens_float_noise() {
        // 0.1 + 0.2 is the classic 0.30000000000000004
        assert_eq!(to_hundredths(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_to_hundredths_negative_ties() {
        assert_eq!(to_hundredths(-1.005 * 10.0), -10.05);
        assert_eq!(to_hundredths(-86.945), -86.95);
    }
}
