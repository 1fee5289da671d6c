//! # Rules Loader
//!
//! Finds, parses, validates and caches `business_rules.toml`.
//!
//! ## Discovery Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rules File Discovery                                │
//! │                                                                         │
//! │  1. COTIZADOR_RULES environment variable (highest priority)            │
//! │     Taken as-is, no existence check: an operator who sets it wants     │
//! │     that file or a loud failure.                                       │
//! │                                                                         │
//! │  2. <base>/config/business_rules.toml                                  │
//! │                                                                         │
//! │  3. <base>/business_rules.toml                                         │
//! │                                                                         │
//! │  4. Per-user config directory (lowest priority)                        │
//! │     ~/.config/cotizador/business_rules.toml (Linux)                    │
//! │     ~/Library/Application Support/com.cotizador.cotizador/... (macOS)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Caching
//! The first [`load`](RulesLoader::load) parses and validates the file and
//! keeps the result behind an `RwLock`; later loads hand out `Arc` clones of
//! the cached rules. [`reload`](RulesLoader::reload) re-reads the file and
//! swaps the cache, leaving earlier `Arc` holders on the snapshot they took.
//!
//! ## Rules File Format
//! ```toml
//! # business_rules.toml
//! cost_per_gram = 10.0
//! setup_minutes_per_batch = 5.0
//! overhead_percentages = [8.0, 10.0, 15.0]
//! admin_percentage = 5.0
//! profit_percentages = [45.0, 28.0, 17.0, 11.0]
//!
//! [material_reference_table.default]
//! reference_grams = 50.0
//! reference_area = 100.0
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use toml::Value;
use tracing::{debug, info, warn};

use cotizador_core::BusinessRules;

use crate::error::{ConfigError, ConfigResult};
use crate::lookup;
use crate::{RULES_ENV_VAR, RULES_FILE_NAME};

// =============================================================================
// Loaded State
// =============================================================================

/// One successful parse: the typed rules plus the raw document they came
/// from, kept together so dotted lookups always describe the same file
/// revision as the rules in use.
#[derive(Debug)]
struct LoadedState {
    rules: Arc<BusinessRules>,
    document: Value,
}

// =============================================================================
// Rules Loader
// =============================================================================

/// Cached provider of [`BusinessRules`] from a TOML file.
#[derive(Debug)]
pub struct RulesLoader {
    path: PathBuf,
    cache: RwLock<Option<Arc<LoadedState>>>,
}

impl RulesLoader {
    /// Creates a loader for an explicit rules file path. Nothing is read
    /// until the first [`load`](RulesLoader::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Locates a rules file using the discovery priority order and returns
    /// a loader for it.
    pub fn discover(base_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let base = base_dir.as_ref();

        if let Some(path) = std::env::var_os(RULES_ENV_VAR) {
            let path = PathBuf::from(path);
            info!(?path, "Using rules file from environment");
            return Ok(Self::new(path));
        }

        let mut searched = Vec::new();
        for candidate in [
            base.join("config").join(RULES_FILE_NAME),
            base.join(RULES_FILE_NAME),
        ] {
            if candidate.is_file() {
                debug!(path = ?candidate, "Found rules file");
                return Ok(Self::new(candidate));
            }
            searched.push(candidate);
        }

        if let Some(dirs) = directories::ProjectDirs::from("com", "cotizador", "cotizador") {
            let candidate = dirs.config_dir().join(RULES_FILE_NAME);
            if candidate.is_file() {
                debug!(path = ?candidate, "Found rules file");
                return Ok(Self::new(candidate));
            }
            searched.push(candidate);
        }

        warn!(?searched, "No rules file found");
        Err(ConfigError::NotFound { searched })
    }

    /// Returns the path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the rules, parsing the file on first call and serving the
    /// cache afterwards.
    pub fn load(&self) -> ConfigResult<Arc<BusinessRules>> {
        self.ensure_loaded().map(|state| Arc::clone(&state.rules))
    }

    /// Re-reads the file and swaps the cache. Earlier `Arc` holders keep
    /// the snapshot they already have.
    pub fn reload(&self) -> ConfigResult<Arc<BusinessRules>> {
        self.reload_state().map(|state| Arc::clone(&state.rules))
    }

    /// Looks up a single raw value by dotted path, loading the file first
    /// if needed. `Ok(None)` means the file is fine but has no such key.
    pub fn value(&self, path: &str) -> ConfigResult<Option<Value>> {
        let state = self.ensure_loaded()?;
        Ok(lookup::dotted(&state.document, path).cloned())
    }

    /// Numeric dotted lookup with a fallback for missing keys, non-numeric
    /// values or an unreadable file.
    pub fn value_or(&self, path: &str, default: f64) -> f64 {
        match self.value(path) {
            Ok(Some(value)) => lookup::as_number(&value).unwrap_or(default),
            _ => default,
        }
    }

    fn ensure_loaded(&self) -> ConfigResult<Arc<LoadedState>> {
        if let Some(state) = self.cache.read().expect("Rules cache lock poisoned").as_ref() {
            return Ok(Arc::clone(state));
        }
        self.reload_state()
    }

    fn reload_state(&self) -> ConfigResult<Arc<LoadedState>> {
        let state = Arc::new(self.read_state()?);
        *self.cache.write().expect("Rules cache lock poisoned") = Some(Arc::clone(&state));
        Ok(state)
    }

    fn read_state(&self) -> ConfigResult<LoadedState> {
        info!(path = ?self.path, "Loading business rules");
        let contents = std::fs::read_to_string(&self.path)?;
        let document: Value = toml::from_str(&contents)?;
        let rules: BusinessRules = document.clone().try_into()?;
        rules.validate()?;
        debug!(
            classes = rules.material_reference_table.len(),
            "Business rules loaded"
        );
        Ok(LoadedState {
            rules: Arc::new(rules),
            document,
        })
    }
}
