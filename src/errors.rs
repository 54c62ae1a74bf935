use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request signing error: {0}")]
    Signing(String),

    #[error("Failed to parse Tumblr response (HTTP {status}): {source}")]
    ResponseParse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tumblr API error {status}: {body}")]
    PlatformRejected { status: u16, body: String },

    #[error("No photos to upload")]
    NoPhotos,
}

/// Custom result type
pub type ExportResult<T> = Result<T, ExportError>;

impl ExportError {
    pub fn config(message: &str) -> Self {
        Self::Config(message.to_string())
    }

    pub fn platform_rejected(status: u16, body: &serde_json::Value) -> Self {
        Self::PlatformRejected {
            status,
            body: body.to_string(),
        }
    }

    /// HTTP status reported by the platform, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ExportError::ResponseParse { status, .. }
            | ExportError::PlatformRejected { status, .. } => Some(*status),
            ExportError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
