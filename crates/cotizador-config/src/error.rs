//! # Config Error Types
//!
//! Error types for rules-file loading.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Config Error Categories                            │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │    Discovery     │  │     File I/O     │  │      Contents        │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  NotFound        │  │  ReadFailed      │  │  ParseFailed         │  │
//! │  │  (all candidate  │  │  (fs error as    │  │  (TOML syntax/shape) │  │
//! │  │   paths listed)  │  │   text)          │  │  Invalid             │  │
//! │  │                  │  │                  │  │  (RulesError nested) │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use cotizador_core::RulesError;

/// Result type alias for rules-file operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while locating, reading or validating a rules file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No rules file exists in any searched location.
    #[error("No business rules file found. Searched: {searched:?}")]
    NotFound { searched: Vec<PathBuf> },

    /// The rules file exists but could not be read.
    #[error("Failed to read rules file: {0}")]
    ReadFailed(String),

    /// The rules file is not valid TOML, or does not match the rules shape.
    #[error("Failed to parse rules file: {0}")]
    ParseFailed(String),

    /// The rules parsed but failed business validation.
    #[error("Invalid business rules: {0}")]
    Invalid(#[from] RulesError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::ReadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}
