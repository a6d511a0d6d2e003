//! Error handling for the quality scoring library
//!
//! The scoring pipelines are total over `f64` and never fail. Errors only
//! come from the two boundaries around them: loading/validating a
//! [`QualityConfig`](crate::config::QualityConfig) and parsing a
//! string-typed QoS report.

use thiserror::Error;

/// Result type alias for quality operations
pub type Result<T> = std::result::Result<T, QualityError>;

/// Error type for configuration and ingestion failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QualityError {
    /// Configuration failed validation
    #[error("Invalid quality configuration: {details}")]
    InvalidConfig { details: String },

    /// Resolution whose target bitrate does not exceed the video floor
    #[error(
        "Degenerate resolution {width}x{height}: target bitrate {target_bps:.1}bps \
         does not exceed minimum {min_bps:.1}bps"
    )]
    DegenerateResolution {
        width: u32,
        height: u32,
        target_bps: f64,
        min_bps: f64,
    },

    /// A string-typed QoS field could not be parsed as a number
    #[error("Malformed QoS field '{field}': {value:?}")]
    MalformedField { field: &'static str, value: String },

    /// A QoS field parsed but lies outside its domain
    #[error("QoS field '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// Configuration file is not valid TOML for the schema
    #[error("Failed to parse configuration: {reason}")]
    ConfigParse { reason: String },

    /// Configuration file could not be read
    #[error("I/O operation failed: {reason}")]
    Io { reason: String },
}

impl QualityError {
    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Create a new malformed field error
    pub fn malformed_field(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedField {
            field,
            value: value.into(),
        }
    }

    /// Create a new out of range error
    pub fn out_of_range(field: &'static str, value: f64) -> Self {
        Self::OutOfRange { field, value }
    }

    /// Whether the error came from a QoS sample rather than configuration
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MalformedField { .. } | Self::OutOfRange { .. })
    }
}

impl From<std::io::Error> for QualityError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for QualityError {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigParse {
            reason: error.to_string(),
        }
    }
}
