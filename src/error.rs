use thiserror::Error;

/// The primary error type for the gps-tracker crate.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // --- Service lifecycle errors ---
    #[error("The tracking service has not been initialized")]
    NotInitialized,

    #[error("The tracking service was already initialized")]
    AlreadyInitialized,

    #[error("The tracking service must be initialized inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    // --- External collaborators ---
    #[error("Location provider failed: {0}")]
    Provider(String),
}

/// Errors raised by an [`crate::upload::transport::UploadTransport`].
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("no upload URL is configured")]
    MissingUrl,

    /// The request could not be sent.
    #[error("{0}")]
    Request(#[source] reqwest::Error),

    /// The request was sent but the server response was an error or unreadable.
    #[error("{0}")]
    Response(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read configuration file")]
    Io(#[from] std::io::Error),

    #[error("Could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for setting {key}")]
    InvalidSetting { key: String, value: String },

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
}
