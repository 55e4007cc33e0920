//! Audio configuration error types
//!
//! Every failure of a capability query or of the buffer-size resolution is
//! mapped to one of these variants. Nothing is recovered locally.

use thiserror::Error;

/// Unified error type for audio configuration resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A device property needed by the native path is missing or malformed
    #[error("Configuration unavailable: {property}: {reason}")]
    ConfigUnavailable { property: String, reason: String },

    /// A capability query failed or reported a nonsensical value
    #[error("Capability query failed: {query}: {reason}")]
    CapabilityQueryFailed { query: String, reason: String },

    /// Configuration breaking the rate or native-symmetry invariants
    #[error("Invalid audio configuration: {0}")]
    InvalidConfiguration(String),

    /// Legacy thread-type code outside {0, 1}
    #[error("Invalid audio thread type: {0}")]
    InvalidThreadType(i32),
}

impl ConfigError {
    pub fn config_unavailable(property: &str, reason: impl Into<String>) -> Self {
        Self::ConfigUnavailable {
            property: property.to_string(),
            reason: reason.into(),
        }
    }

    pub fn query_failed(query: &str, reason: impl Into<String>) -> Self {
        Self::CapabilityQueryFailed {
            query: query.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures a caller may answer by retrying on the managed path
    pub fn is_config_unavailable(&self) -> bool {
        matches!(self, Self::ConfigUnavailable { .. })
    }
}

/// Result type alias for audio configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
