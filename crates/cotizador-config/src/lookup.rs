//! # Dotted-Path Lookup
//!
//! Raw access into a parsed TOML document by `"a.b.c"` paths.
//!
//! The typed [`BusinessRules`](cotizador_core::BusinessRules) shape covers
//! everything the engine needs, but callers occasionally want a single raw
//! value out of the file (a UI showing "admin_percentage = 5" next to an
//! edit box, a diagnostic dump). These helpers walk the document without
//! forcing a full deserialize.
//!
//! ## Path Semantics
//! ```text
//! "cost_per_gram"                              → top-level key
//! "material_reference_table.2_mm.reference_grams" → nested tables
//! "" or any missing segment                    → None
//! ```
//! Only tables are traversed; array indexing is not supported, and keys
//! that themselves contain a dot (the `1.2_mm` thickness class) cannot be
//! addressed this way.

use toml::Value;

/// Walks `document` down the dot-separated `path`, one table per segment.
pub fn dotted<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = current.as_table()?.get(segment)?;
    }
    Some(current)
}

/// Reads a TOML value as `f64`, accepting both float and integer literals.
///
/// TOML distinguishes `5` from `5.0`; rules files in the wild contain both
/// spellings for the same field.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Value {
        toml::from_str(
            r#"
            cost_per_gram = 10.0
            setup_minutes_per_batch = 5

            [material_reference_table.2_mm]
            reference_grams = 50.0
            reference_area = 100.0
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_dotted_resolves_top_level_key() {
        let doc = document();
        let value = dotted(&doc, "cost_per_gram").unwrap();
        assert_eq!(value.as_float(), Some(10.0));
    }

    #[test]
    fn test_dotted_resolves_nested_tables() {
        let doc = document();
        let value = dotted(&doc, "material_reference_table.2_mm.reference_grams").unwrap();
        assert_eq!(value.as_float(), Some(50.0));
    }

    #[test]
    fn test_dotted_misses_return_none() {
        let doc = document();
        assert!(dotted(&doc, "material_reference_table.9_mm").is_none());
        assert!(dotted(&doc, "cost_per_gram.deeper").is_none());
        assert!(dotted(&doc, "").is_none());
    }

    #[test]
    fn test_as_number_accepts_both_literal_forms() {
        let doc = document();
        let float = dotted(&doc, "cost_per_gram").unwrap();
        let integer = dotted(&doc, "setup_minutes_per_batch").unwrap();
        assert_eq!(as_number(float), Some(10.0));
        assert_eq!(as_number(integer), Some(5.0));
        assert_eq!(as_number(&Value::String("10".into())), None);
    }
}
