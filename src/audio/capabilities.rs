//! Device capability abstraction
//!
//! This trait is the only boundary between the resolver and the platform.
//! Implementations answer cheap, non-blocking property reads: the native
//! output sample rate, the preferred buffer size in frames, and the minimum
//! buffer sizes reported by the managed playback and record APIs.
//!
//! # Important
//!
//! Raw platform values are passed through unmodified. Sanity checks
//! (negative sizes, zero rates) belong to the resolver, not to providers.

use crate::audio::error::{ConfigError, Result};
use crate::audio::types::{ChannelConfig, Encoding};

/// Name of the device property holding the preferred buffer size in frames
pub const FRAMES_PER_BUFFER_PROPERTY: &str = "output_frames_per_buffer";

/// First platform version exposing the native low-latency audio API
pub const MIN_NATIVE_PLATFORM_VERSION: u32 = 9;

/// Capability queries consumed by the resolver
///
/// # Example
///
/// ```ignore
/// let caps = StaticCapabilities::native(48000, "240");
/// let path = select_path(caps.is_native_path_supported());
/// let config = resolve(path, &caps)?;
/// assert_eq!(config.play_buffer_bytes, 480);
/// ```
pub trait CapabilityProvider {
    /// Capability probe: is the native low-latency path safe on this platform
    fn is_native_path_supported(&self) -> bool;

    /// Native output sample rate in Hz, as reported by the platform
    fn native_output_sample_rate(&self) -> Result<i32>;

    /// Device preferred buffer size in frames
    ///
    /// Fails with `ConfigUnavailable` when the property is absent or is not
    /// an integer. Only queried on the native path.
    fn preferred_buffer_frames(&self) -> Result<u32>;

    /// Minimum playback buffer size in bytes (managed path only)
    ///
    /// Negative values are platform error codes.
    fn min_playback_buffer_bytes(
        &self,
        sample_rate: u32,
        channel_config: ChannelConfig,
        encoding: Encoding,
    ) -> Result<i32>;

    /// Minimum record buffer size in bytes (managed path only)
    fn min_record_buffer_bytes(
        &self,
        sample_rate: u32,
        channel_config: ChannelConfig,
        encoding: Encoding,
    ) -> Result<i32>;
}

/// Platform-version gate for the native path
pub fn is_safe_to_use_native(platform_version: u32) -> bool {
    platform_version >= MIN_NATIVE_PLATFORM_VERSION
}

/// Parse the string-encoded preferred frames property
pub fn parse_frames_property(value: Option<&str>) -> Result<u32> {
    let raw = value.ok_or_else(|| {
        ConfigError::config_unavailable(FRAMES_PER_BUFFER_PROPERTY, "property absent")
    })?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::config_unavailable(
            FRAMES_PER_BUFFER_PROPERTY,
            "property empty",
        ));
    }
    trimmed.parse::<u32>().map_err(|e| {
        ConfigError::config_unavailable(
            FRAMES_PER_BUFFER_PROPERTY,
            format!("'{}' is not a frame count: {}", trimmed, e),
        )
    })
}

/// Capability provider backed by a snapshot of device properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCapabilities {
    pub native_supported: bool,
    pub sample_rate: i32,
    /// Raw text of the frames-per-buffer property (None = absent)
    pub frames_property: Option<String>,
    pub min_playback_bytes: i32,
    pub min_record_bytes: i32,
}

impl StaticCapabilities {
    /// Snapshot of a device supporting the native path
    pub fn native(sample_rate: i32, frames_property: &str) -> Self {
        Self {
            native_supported: true,
            sample_rate,
            frames_property: Some(frames_property.to_string()),
            min_playback_bytes: 0,
            min_record_bytes: 0,
        }
    }

    /// Snapshot of a device limited to the managed path
    pub fn managed(sample_rate: i32, min_playback_bytes: i32, min_record_bytes: i32) -> Self {
        Self {
            native_supported: false,
            sample_rate,
            frames_property: None,
            min_playback_bytes,
            min_record_bytes,
        }
    }

    /// Derive the capability probe from a platform version
    pub fn with_platform_version(mut self, platform_version: u32) -> Self {
        self.native_supported = is_safe_to_use_native(platform_version);
        self
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn is_native_path_supported(&self) -> bool {
        self.native_supported
    }

    fn native_output_sample_rate(&self) -> Result<i32> {
        Ok(self.sample_rate)
    }

    fn preferred_buffer_frames(&self) -> Result<u32> {
        parse_frames_property(self.frames_property.as_deref())
    }

    fn min_playback_buffer_bytes(
        &self,
        _sample_rate: u32,
        _channel_config: ChannelConfig,
        _encoding: Encoding,
    ) -> Result<i32> {
        Ok(self.min_playback_bytes)
    }

    fn min_record_buffer_bytes(
        &self,
        _sample_rate: u32,
        _channel_config: ChannelConfig,
        _encoding: Encoding,
    ) -> Result<i32> {
        Ok(self.min_record_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frames_property() {
        assert_eq!(parse_frames_property(Some("240")), Ok(240));
        assert_eq!(parse_frames_property(Some(" 192\n")), Ok(192));
    }

    #[test]
    fn test_parse_frames_property_rejects_bad_input() {
        for bad in [None, Some(""), Some("   "), Some("abc"), Some("-240"), Some("24.0")] {
            let err = parse_frames_property(bad).unwrap_err();
            assert!(err.is_config_unavailable(), "{:?} -> {:?}", bad, err);
        }
    }

    #[test]
    fn test_platform_version_gate() {
        assert!(!is_safe_to_use_native(8));
        assert!(is_safe_to_use_native(9));
        assert!(is_safe_to_use_native(23));

        let caps = StaticCapabilities::native(48000, "240").with_platform_version(4);
        assert!(!caps.is_native_path_supported());
    }

    #[test]
    fn test_static_capabilities_missing_property() {
        let caps = StaticCapabilities::managed(44100, 3528, 4096);
        assert!(caps.preferred_buffer_frames().unwrap_err().is_config_unavailable());
    }
}
