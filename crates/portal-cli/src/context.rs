use anyhow::Context;
use portal_client::BackendClient;
use portal_config::PortalConfig;
use portal_fields::{Catalog, DisplayContext, FieldRegistry, ItemCache, RendererRegistry};
use portal_search::SearchSession;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PortalConfig,
    pub fields: FieldRegistry,
    pub catalog: Catalog,
    pub renderers: RendererRegistry,
    pub client: BackendClient,
    pub cache: ItemCache,
}

impl AppContext {
    /// Build the field registry, translation catalog, and HTTP client.
    pub fn init(config: PortalConfig) -> anyhow::Result<Self> {
        let backend = config.require_backend()?;
        let client = BackendClient::new(backend).context("failed to build backend client")?;
        let fields = FieldRegistry::new(config.fields.clone()).context("invalid field configuration")?;
        let catalog = Catalog::from_config(&config.i18n);

        tracing::debug!(
            base_url = client.base_url(),
            fields = fields.len(),
            facets = config.facets.len(),
            language = %config.i18n.language,
            "application context ready"
        );

        Ok(Self {
            config,
            fields,
            catalog,
            renderers: RendererRegistry::with_defaults(),
            client,
            cache: ItemCache::new(),
        })
    }

    /// Fresh search session over the configured facets.
    #[must_use]
    pub fn session(&self) -> SearchSession {
        SearchSession::new(self.config.search.clone(), self.config.facets.clone())
    }

    /// Display context for plain-text output, or HTML with `--html`.
    #[must_use]
    pub fn display_context(&self, flags: &GlobalFlags) -> DisplayContext<'_> {
        DisplayContext::new(&self.catalog, &self.config.display, &self.renderers)
            .with_fields(&self.fields)
            .with_escape(flags.html)
    }
}

/// Load configuration from `--config` or the discovered layers.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PortalConfig> {
    match &flags.config {
        Some(path) => PortalConfig::load_from(path)
            .with_context(|| format!("failed to load config from {path}")),
        None => PortalConfig::load_with_dotenv().context("failed to load configuration"),
    }
}
