//! Error types for the prize settlement engine
//!
//! The settlement pipeline itself never fails; these errors come from the
//! boundary operations around it (tier lookup, configuration, input parsing).

use thiserror::Error;

use crate::types::Amount;

/// Result type for settlement boundary operations
pub type Result<T> = std::result::Result<T, SettlementError>;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("No fee tier configured for entry fee {entry_fee}")]
    TierNotFound { entry_fee: Amount },

    #[error("Fee tier for entry fee {entry_fee} is defined more than once")]
    DuplicateTier { entry_fee: Amount },

    #[error("Entrant id {entrant_id} appears more than once")]
    DuplicateEntrant { entrant_id: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SettlementError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        SettlementError::InvalidConfig {
            message: message.into(),
        }
    }
}
