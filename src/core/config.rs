use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::{PortalError, PortalResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_CFDI_USE: &str = "G03";
pub const DEFAULT_PAYMENT_FORM: &str = "03";
pub const DEFAULT_TAX_SYSTEM: &str = "601";
pub const DEFAULT_ADMIN_PAGE_SIZE: u32 = 100;

/// Client configuration.
///
/// Sources, lowest priority first: built-in defaults, an optional `portal.{toml,json,yaml}`
/// file in the working directory, then `PORTAL_*` environment variables
/// (`PORTAL_API_BASE`, `PORTAL_TOKEN_PATH`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub api_base: String,
    pub token_path: Option<PathBuf>,
    pub admin_page_size: u32,
    pub cfdi_use: String,
    pub payment_form: String,
    pub tax_system: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        PortalConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            token_path: None,
            admin_page_size: DEFAULT_ADMIN_PAGE_SIZE,
            cfdi_use: DEFAULT_CFDI_USE.to_string(),
            payment_form: DEFAULT_PAYMENT_FORM.to_string(),
            tax_system: DEFAULT_TAX_SYSTEM.to_string(),
        }
    }
}

impl PortalConfig {
    pub fn new(api_base: impl Into<String>) -> PortalResult<Self> {
        PortalConfig {
            api_base: api_base.into(),
            ..PortalConfig::default()
        }
        .normalized()
    }

    /// Loads `.env`, then the layered sources.
    pub fn load() -> PortalResult<Self> {
        dotenv::dotenv().ok();

        let config = defaults()?
            .add_source(config::File::with_name("portal").required(false))
            .add_source(config::Environment::with_prefix("PORTAL"))
            .build()?;

        config.try_deserialize::<PortalConfig>()?.normalized()
    }

    /// Defaults overlaid with a single file. Format is taken from the extension.
    pub fn load_from_file(path: &Path) -> PortalResult<Self> {
        let config = defaults()?
            .add_source(config::File::from(path))
            .build()?;

        config.try_deserialize::<PortalConfig>()?.normalized()
    }

    fn normalized(mut self) -> PortalResult<Self> {
        let trimmed = self.api_base.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&trimmed)
            .map_err(|e| PortalError::Config(format!("api_base inválida '{}': {}", trimmed, e)))?;
        self.api_base = trimmed;

        if self.admin_page_size == 0 {
            return Err(PortalError::Config(
                "admin_page_size debe ser mayor que cero".to_string(),
            ));
        }

        Ok(self)
    }
}

fn defaults() -> PortalResult<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api_base", DEFAULT_API_BASE)?
        .set_default("admin_page_size", i64::from(DEFAULT_ADMIN_PAGE_SIZE))?
        .set_default("cfdi_use", DEFAULT_CFDI_USE)?
        .set_default("payment_form", DEFAULT_PAYMENT_FORM)?
        .set_default("tax_system", DEFAULT_TAX_SYSTEM)?)
}
