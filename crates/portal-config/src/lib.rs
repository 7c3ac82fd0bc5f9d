//! # portal-config
//!
//! Layered configuration loading for Portal using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PORTAL_*` prefix, `__` as separator)
//! 2. Project-level `.portal/config.toml`
//! 3. User-level `~/.config/portal/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PORTAL_BACKEND__BASE_URL` -> `backend.base_url`,
//! `PORTAL_SEARCH__PAGE_SIZE` -> `search.page_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! The field registry (`[[fields]]`), facet set (`[[facets]]`), completeness
//! categories, and translation catalogs are static configuration: they are
//! loaded once and never mutated afterwards.
//!
//! # Usage
//!
//! ```no_run
//! use portal_config::PortalConfig;
//!
//! let config = PortalConfig::load_with_dotenv().expect("config");
//!
//! if config.backend.is_configured() {
//!     println!("Backend: {}", config.backend.base_url);
//! }
//! ```

mod backend;
mod completeness;
mod display;
mod error;
mod search;

pub use backend::BackendConfig;
pub use completeness::{CompletenessCategory, CompletenessConfig};
pub use display::{DisplayConfig, I18nConfig};
pub use error::ConfigError;
pub use search::SearchConfig;

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use portal_core::{Field, SearchFacet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub completeness: CompletenessConfig,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub facets: Vec<SearchFacet>,
}

impl PortalConfig {
    /// Load and validate configuration from all sources (TOML files +
    /// environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file layered above the
    /// discovered ones (below environment variables).
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Err(ConfigError::invalid(
                "config",
                format!("file not found: {}", path.display()),
            ));
        }
        let config: Self = Self::figment()
            .merge(Toml::file(path))
            .merge(Env::prefixed("PORTAL_").split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".portal/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PORTAL_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("portal").join("config.toml"))
    }

    /// Check cross-section invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for zero page sizes, date
    /// formats chrono cannot render, negative or non-finite completeness
    /// weights, invalid or duplicate fields, and duplicate facet axes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.page_size == 0 {
            return Err(ConfigError::invalid("search.page_size", "must be > 0"));
        }
        if self.search.facet_page_size == 0 {
            return Err(ConfigError::invalid("search.facet_page_size", "must be > 0"));
        }
        self.display.validate()?;

        for category in &self.completeness.categories {
            if !category.weight.is_finite() || category.weight < 0.0 {
                return Err(ConfigError::invalid(
                    format!("completeness.categories.{}.weight", category.name),
                    "must be a finite number >= 0",
                ));
            }
        }

        let mut field_names = HashSet::new();
        for field in &self.fields {
            field
                .validate()
                .map_err(|e| ConfigError::invalid(format!("fields.{}", field.name), e.to_string()))?;
            if !field_names.insert(field.name.as_str()) {
                return Err(ConfigError::invalid(
                    format!("fields.{}", field.name),
                    "duplicate field name",
                ));
            }
        }

        let mut axes = HashSet::new();
        for facet in &self.facets {
            if !axes.insert(facet.name.as_str()) {
                return Err(ConfigError::invalid(
                    format!("facets.{}", facet.name),
                    "duplicate axis name",
                ));
            }
        }

        Ok(())
    }

    /// Ensure the backend section is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when no base URL is set.
    pub fn require_backend(&self) -> Result<&BackendConfig, ConfigError> {
        if self.backend.is_configured() {
            Ok(&self.backend)
        } else {
            Err(ConfigError::NotConfigured {
                section: "backend".into(),
            })
        }
    }
}
