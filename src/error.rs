//! Error types for the studio client.

/// Errors that can occur while generating, loading or publishing.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// Generation was requested without a prompt.
    #[error("Please provide proper prompt")]
    MissingPrompt,

    /// Submission was requested before a prompt and image were both present.
    #[error("Please generate an image with proper details")]
    MissingImage,

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, trimmed.
        message: String,
    },

    /// A record from the server failed validation.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Client configuration is unusable (e.g. malformed base URL).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudioError {
    /// Returns true for input validation failures, which never reach the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingPrompt | Self::MissingImage)
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
