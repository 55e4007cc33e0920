//! Buffer size resolution
//!
//! Turns a chosen path and a capability provider into an `AudioConfiguration`.
//!
//! - Native: one symmetric buffer, `preferred frames * BYTES_PER_FRAME`.
//! - Managed: independent playback and record minimums, MONO / PCM 16-bit.
//!
//! The sample rate is read first on both paths. Any failure aborts the whole
//! call; there is no default substitution and no automatic fallback.

use crate::audio::capabilities::CapabilityProvider;
use crate::audio::error::{ConfigError, Result};
use crate::audio::types::{
    AudioConfiguration, AudioPathKind, ChannelConfig, Encoding, BYTES_PER_FRAME,
};

const ENCODING: Encoding = Encoding::Pcm16Bit;

/// Platform error codes returned by minimum-buffer-size queries
const ERROR: i32 = -1;
const ERROR_BAD_VALUE: i32 = -2;

/// Resolve the audio configuration for `path`
pub fn resolve<C>(path: AudioPathKind, caps: &C) -> Result<AudioConfiguration>
where
    C: CapabilityProvider + ?Sized,
{
    let sampling_rate_hz = sample_rate(caps)?;

    let (play_buffer_bytes, record_buffer_bytes) = match path {
        AudioPathKind::Native => {
            let frames = caps.preferred_buffer_frames()?;
            let bytes = frames.checked_mul(BYTES_PER_FRAME).ok_or_else(|| {
                ConfigError::query_failed(
                    "preferred_buffer_frames",
                    format!("{} frames overflows the buffer size", frames),
                )
            })?;
            (bytes, bytes)
        }
        AudioPathKind::Managed => {
            let play =
                caps.min_playback_buffer_bytes(sampling_rate_hz, ChannelConfig::MonoOut, ENCODING)?;
            let play = buffer_size("min_playback_buffer_bytes", play)?;

            let record =
                caps.min_record_buffer_bytes(sampling_rate_hz, ChannelConfig::MonoIn, ENCODING)?;
            let record = buffer_size("min_record_buffer_bytes", record)?;
            (play, record)
        }
    };

    Ok(AudioConfiguration {
        sampling_rate_hz,
        play_buffer_bytes,
        record_buffer_bytes,
        path,
    })
}

/// Resolve on `path`, re-resolving on the managed path when the native
/// buffer property is unavailable
pub fn resolve_with_fallback<C>(path: AudioPathKind, caps: &C) -> Result<AudioConfiguration>
where
    C: CapabilityProvider + ?Sized,
{
    match resolve(path, caps) {
        Err(e) if path == AudioPathKind::Native && e.is_config_unavailable() => {
            resolve(AudioPathKind::Managed, caps)
        }
        other => other,
    }
}

fn sample_rate<C>(caps: &C) -> Result<u32>
where
    C: CapabilityProvider + ?Sized,
{
    let rate = caps.native_output_sample_rate()?;
    if rate <= 0 {
        return Err(ConfigError::query_failed(
            "native_output_sample_rate",
            format!("invalid sample rate {} Hz", rate),
        ));
    }
    Ok(rate as u32)
}

fn buffer_size(query: &str, raw: i32) -> Result<u32> {
    match raw {
        ERROR => Err(ConfigError::query_failed(query, "platform reported ERROR")),
        ERROR_BAD_VALUE => Err(ConfigError::query_failed(
            query,
            "platform reported ERROR_BAD_VALUE",
        )),
        n if n < 0 => Err(ConfigError::query_failed(
            query,
            format!("negative buffer size {}", n),
        )),
        n => Ok(n as u32),
    }
}
