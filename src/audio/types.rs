//! Shared audio configuration types
//!
//! Plain values produced and consumed by the resolver.
//! NO platform-specific imports allowed here.

use serde::{Deserialize, Serialize};

use crate::audio::error::ConfigError;

/// Bytes per frame for 16-bit mono PCM
pub const BYTES_PER_FRAME: u32 = 2;

/// Audio execution path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioPathKind {
    /// Low-latency path using the device's preferred native buffer
    Native,
    /// Portable path sized by minimum-buffer-size queries
    Managed,
}

impl AudioPathKind {
    /// Legacy thread-type code (0 = managed/Java thread, 1 = native thread)
    pub fn code(self) -> i32 {
        match self {
            Self::Managed => 0,
            Self::Native => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Managed => "managed",
        }
    }
}

impl TryFrom<i32> for AudioPathKind {
    type Error = ConfigError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Managed),
            1 => Ok(Self::Native),
            other => Err(ConfigError::InvalidThreadType(other)),
        }
    }
}

/// Channel layout passed to minimum-buffer-size queries
///
/// Playback and record take distinct layout constants on the platform side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelConfig {
    /// Mono output, for playback queries
    MonoOut,
    /// Mono input, for record queries
    MonoIn,
}

impl ChannelConfig {
    pub fn channel_count(self) -> u32 {
        match self {
            Self::MonoOut | Self::MonoIn => 1,
        }
    }
}

/// Sample encoding passed to minimum-buffer-size queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Pcm16Bit,
}

impl Encoding {
    pub fn bytes_per_sample(self) -> u32 {
        match self {
            Self::Pcm16Bit => 2,
        }
    }
}

/// Resolved audio I/O configuration
///
/// Produced by one `resolve` call and never mutated afterwards. Holders
/// replace the whole value on reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfiguration {
    /// Device native output sample rate
    pub sampling_rate_hz: u32,
    /// Minimum playback buffer size for `path`
    pub play_buffer_bytes: u32,
    /// Minimum record buffer size for `path`
    pub record_buffer_bytes: u32,
    pub path: AudioPathKind,
}

impl AudioConfiguration {
    /// Check the data-model invariants
    ///
    /// - a non-zero buffer requires a positive sample rate
    /// - the native path uses one buffer size for both directions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let has_buffer = self.play_buffer_bytes > 0 || self.record_buffer_bytes > 0;
        if has_buffer && self.sampling_rate_hz == 0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "{}B / {}B buffers at 0 Hz",
                self.play_buffer_bytes, self.record_buffer_bytes
            )));
        }
        let symmetric = self.play_buffer_bytes == self.record_buffer_bytes;
        if self.path == AudioPathKind::Native && !symmetric {
            return Err(ConfigError::InvalidConfiguration(format!(
                "native path needs equal buffers, got {}B / {}B",
                self.play_buffer_bytes, self.record_buffer_bytes
            )));
        }
        Ok(())
    }

    /// Playback and record buffer durations in milliseconds
    ///
    /// Returns None when the sample rate is zero.
    pub fn buffer_latency_ms(&self) -> Option<(f64, f64)> {
        if self.sampling_rate_hz == 0 {
            return None;
        }
        let to_ms = |bytes: u32| {
            (bytes / BYTES_PER_FRAME) as f64 * 1000.0 / self.sampling_rate_hz as f64
        };
        Some((to_ms(self.play_buffer_bytes), to_ms(self.record_buffer_bytes)))
    }

    pub fn with_sampling_rate(self, sampling_rate_hz: u32) -> Self {
        Self { sampling_rate_hz, ..self }
    }

    pub fn with_play_buffer_bytes(self, play_buffer_bytes: u32) -> Self {
        Self { play_buffer_bytes, ..self }
    }

    pub fn with_record_buffer_bytes(self, record_buffer_bytes: u32) -> Self {
        Self { record_buffer_bytes, ..self }
    }

    pub fn with_path(self, path: AudioPathKind) -> Self {
        Self { path, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_frame_matches_mono_pcm16() {
        assert_eq!(
            BYTES_PER_FRAME,
            ChannelConfig::MonoOut.channel_count() * Encoding::Pcm16Bit.bytes_per_sample()
        );
        assert_eq!(
            ChannelConfig::MonoIn.channel_count(),
            ChannelConfig::MonoOut.channel_count()
        );
    }

    #[test]
    fn test_validate() {
        let native = AudioConfiguration {
            sampling_rate_hz: 48000,
            play_buffer_bytes: 480,
            record_buffer_bytes: 480,
            path: AudioPathKind::Native,
        };
        assert_eq!(native.validate(), Ok(()));

        let no_rate = native.with_sampling_rate(0);
        assert!(matches!(no_rate.validate(), Err(ConfigError::InvalidConfiguration(_))));

        let empty = no_rate.with_play_buffer_bytes(0).with_record_buffer_bytes(0);
        assert_eq!(empty.validate(), Ok(()));

        let asymmetric = native.with_record_buffer_bytes(960);
        assert!(matches!(asymmetric.validate(), Err(ConfigError::InvalidConfiguration(_))));
        assert_eq!(asymmetric.with_path(AudioPathKind::Managed).validate(), Ok(()));
    }

    #[test]
    fn test_thread_type_codes() {
        assert_eq!(AudioPathKind::Managed.code(), 0);
        assert_eq!(AudioPathKind::Native.code(), 1);
        assert_eq!(AudioPathKind::try_from(1), Ok(AudioPathKind::Native));
        assert_eq!(AudioPathKind::try_from(0), Ok(AudioPathKind::Managed));
        assert_eq!(
            AudioPathKind::try_from(7),
            Err(ConfigError::InvalidThreadType(7))
        );
    }

    #[test]
    fn test_path_serializes_lowercase() {
        let json = serde_json::to_string(&AudioPathKind::Native).unwrap();
        assert_eq!(json, "\"native\"");
    }

    #[test]
    fn test_buffer_latency() {
        let config = AudioConfiguration {
            sampling_rate_hz: 48000,
            play_buffer_bytes: 480,
            record_buffer_bytes: 960,
            path: AudioPathKind::Managed,
        };
        let (play, record) = config.buffer_latency_ms().unwrap();
        assert!((play - 5.0).abs() < 1e-9);
        assert!((record - 10.0).abs() < 1e-9);

        assert!(config.with_sampling_rate(0).buffer_latency_ms().is_none());
    }
}
