use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Service '{name}' is not configured")]
    ServiceNotConfigured { name: String },

    #[error("Item of ID '{id}' is not found")]
    ItemNotFound { id: u64 },

    #[error("Downstream request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed JSON stream: {message}")]
    MalformedStream { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, BrokerError>;
