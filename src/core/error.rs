use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    /// Falta un dato local; se detecta antes de cualquier llamada de red.
    #[error("Error de validación: {0}")]
    Validation(String),

    /// El backend respondió con un estado distinto de 2xx.
    #[error("Error del servidor ({status}): {}", .message.as_deref().unwrap_or("sin mensaje"))]
    Remote { status: u16, message: Option<String> },

    #[error("Error de red: {0}")]
    Transport(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    /// Ya hay una operación del mismo tipo en curso.
    #[error("Operación en curso: {0}")]
    Busy(&'static str),

    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}

impl PortalError {
    pub fn validation(message: impl Into<String>) -> Self {
        PortalError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PortalError::Validation(_))
    }

    /// Remote, transport and decode failures: anything that came back from the wire.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            PortalError::Remote { .. } | PortalError::Transport(_) | PortalError::Decode(_)
        )
    }

    /// Message shown to the user. Server-supplied messages win over `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            PortalError::Remote { message: Some(message), .. } => message.clone(),
            PortalError::Transport(message) if !message.is_empty() => message.clone(),
            PortalError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            PortalError::Decode(error.to_string())
        } else {
            PortalError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(error: serde_json::Error) -> Self {
        PortalError::Decode(error.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(error: std::io::Error) -> Self {
        PortalError::Storage(error.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(error: config::ConfigError) -> Self {
        PortalError::Config(error.to_string())
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
