//! # cotizador-config: Business-Rules Provider
//!
//! This crate owns every file-system concern the quotation engine is
//! forbidden from touching: finding `business_rules.toml`, parsing it,
//! validating it, caching the parsed rules and swapping them on reload.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cotizador Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Caller (UI / API)                          │   │
//! │  └───────────┬─────────────────────────────────────┬───────────────┘   │
//! │              │ rules                               │ quotes            │
//! │  ┌───────────▼─────────────────────┐  ┌────────────▼───────────────┐   │
//! │  │  ★ cotizador-config (THIS) ★    │  │       cotizador-core       │   │
//! │  │                                 │  │                            │   │
//! │  │  ┌───────────┐  ┌───────────┐  │  │   pure calculation, takes  │   │
//! │  │  │  loader   │  │  lookup   │  │──►   BusinessRules as values  │   │
//! │  │  │ discovery │  │ dotted    │  │  │                            │   │
//! │  │  │ cache     │  │ raw reads │  │  │                            │   │
//! │  │  └───────────┘  └───────────┘  │  │                            │   │
//! │  │                                 │  │                            │   │
//! │  │  ALL I/O LIVES HERE            │  │   NO I/O EVER              │   │
//! │  └─────────────────────────────────┘  └────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`loader`] - [`RulesLoader`]: discovery, cached load, reload
//! - [`lookup`] - Dotted-path access into the raw TOML document
//! - [`error`] - [`ConfigError`] / [`ConfigResult`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cotizador_config::RulesLoader;
//!
//! # fn main() -> cotizador_config::ConfigResult<()> {
//! let loader = RulesLoader::discover(".")?;
//! let rules = loader.load()?; // parsed, validated, cached
//! println!("pricing at {} per gram", rules.cost_per_gram);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod lookup;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::RulesLoader;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// File name looked for in every discovery location.
pub const RULES_FILE_NAME: &str = "business_rules.toml";

/// Environment variable naming an exact rules file, bypassing discovery.
///
/// ## Business Reason
/// Deployments pin the rules file per machine (one per branch office);
/// an operator-set variable must win over anything sitting in the working
/// directory.
pub const RULES_ENV_VAR: &str = "COTIZADOR_RULES";
