//! Error types for playlist and transport control

use thiserror::Error;

/// Player errors
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Transport control was requested with no source loaded
    #[error("No active track")]
    NoActiveTrack,

    /// The playback resource rejected a command
    #[error("Playback resource error: {0}")]
    Resource(String),

    /// An ephemeral source could not be created for an uploaded file
    #[error("Source registry error: {0}")]
    Registry(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlayerError {
    /// Create a playback resource error
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Create a source registry error
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
