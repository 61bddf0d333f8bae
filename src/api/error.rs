use serde::Deserialize;

use crate::core::PortalError;

/// Error payload the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Builds the error for a non-success status. The body may be anything, including empty.
pub fn remote_error(status: u16, body: &[u8]) -> PortalError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());

    PortalError::Remote { status, message }
}
