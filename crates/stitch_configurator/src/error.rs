//! Error types for stitch_configurator

use crate::state::WizardStep;
use thiserror::Error;

/// Errors raised by configuration input handlers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Drag payload or part name outside the catalog
    #[error("Unknown part: {0}")]
    UnknownPart(String),

    /// Base model id not offered
    #[error("Unknown base model: {0}")]
    UnknownBaseModel(String),

    /// Gender selector not recognised
    #[error("Unknown gender: {0}")]
    UnknownGender(String),

    /// Stitching colour not offered
    #[error("Unknown stitching colour: {0}")]
    UnknownStitching(String),

    /// Manual navigation to a later step that isn't reachable yet
    #[error("Step {} is locked until it or the steps before it are done", .0.index())]
    StepLocked(WizardStep),

    /// Review requested before every main step is done
    #[error("Configuration is incomplete")]
    Incomplete,

    /// Event text that doesn't parse
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}

/// Errors raised while reading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for this schema
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is outside its allowed range
    #[error("Invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
