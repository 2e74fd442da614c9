//! Error types for the reveal engine.

use thiserror::Error;

/// Result type for reveal operations.
pub type Result<T> = std::result::Result<T, RevealError>;

/// Errors that can occur during reveal operations.
#[derive(Error, Debug)]
pub enum RevealError {
    /// The host has no viewport-observation capability.
    ///
    /// Engines never surface this to callers directly: an attach against an
    /// unsupported host degrades to the hidden default style instead of
    /// failing. The variant exists so observer implementations can report
    /// the condition.
    #[error("viewport observation is not supported by this host")]
    Unsupported,

    /// A configuration field failed strict validation.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// A root margin string could not be parsed.
    #[error("invalid root margin: {0}")]
    InvalidRootMargin(String),

    /// A preset name did not resolve to a built-in or registered preset.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A manager operation referenced an element with no attachment.
    #[error("no attachment for element: {0}")]
    UnknownTarget(String),

    /// Reading a preset file failed.
    #[error("failed to read preset file: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing a preset file failed.
    #[error("failed to parse preset file: {0}")]
    PresetParse(#[from] toml::de::Error),
}
