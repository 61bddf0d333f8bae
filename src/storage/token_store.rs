use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::{PortalConfig, PortalError, PortalResult};

pub const ADMIN_TOKEN_KEY: &str = "adminToken";
const APP_DIR: &str = "factura-portal";
const STORAGE_FILE: &str = "storage.json";

/// Durable slot for the admin credential.
///
/// Backed by a small JSON object on disk so the token survives restarts. There is no expiry;
/// the value only changes through [`TokenStore::save`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    /// `token_path` from the config, else `{config_dir}/factura-portal/storage.json`.
    pub fn from_config(config: &PortalConfig) -> PortalResult<Self> {
        if let Some(path) = &config.token_path {
            return Ok(TokenStore::new(path.clone()));
        }

        let base = dirs::config_dir().ok_or_else(|| {
            PortalError::Storage("no se encontró el directorio de configuración".to_string())
        })?;
        Ok(TokenStore::new(base.join(APP_DIR).join(STORAGE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token; `None` when the file, the key or the value is missing or empty.
    pub async fn load(&self) -> PortalResult<Option<String>> {
        let entries = self.read_entries().await?;

        Ok(entries
            .get(ADMIN_TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string))
    }

    /// Writes the token, keeping any other keys already in the file.
    pub async fn save(&self, token: &str) -> PortalResult<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(ADMIN_TOKEN_KEY.to_string(), Value::String(token.to_string()));

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec_pretty(&Value::Object(entries))
            .map_err(|e| PortalError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;

        tracing::info!("Token de administrador guardado en {}", self.path.display());
        Ok(())
    }

    async fn read_entries(&self) -> PortalResult<Map<String, Value>> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&content) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(PortalError::Storage(format!(
                "{} no contiene un objeto JSON",
                self.path.display()
            ))),
            Err(e) => Err(PortalError::Storage(format!("{}: {}", self.path.display(), e))),
        }
    }
}
