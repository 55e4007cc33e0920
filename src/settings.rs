// === SETTINGS LOOPBACK ===
// Holds the audio configuration for the running session.
// The stored value is always replaced as a whole, never patched in place.

use log::{info, warn};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::audio::{
    resolve, resolve_with_fallback, select_path, AudioConfiguration, AudioPathKind,
    CapabilityProvider,
};
use crate::config::{LoopbackConfig, SettingsError};

static SETTINGS: Lazy<LoopbackSettings> = Lazy::new(LoopbackSettings::new);

/// Process-wide settings slot
pub fn settings() -> &'static LoopbackSettings {
    &SETTINGS
}

/// Current audio configuration of the application
#[derive(Debug, Default)]
pub struct LoopbackSettings {
    current: RwLock<Option<AudioConfiguration>>,
}

impl LoopbackSettings {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Pick the path and compute the defaults, as done on application start
    pub fn set_defaults<C>(
        &self,
        caps: &C,
        config: &LoopbackConfig,
    ) -> Result<AudioConfiguration, SettingsError>
    where
        C: CapabilityProvider + ?Sized,
    {
        let path = match config.forced_path {
            Some(path) => {
                info!("[Loopback] Audio path forced to {}", path.name());
                path
            }
            None => select_path(caps.is_native_path_supported()),
        };
        self.compute_defaults(path, caps, config)
    }

    /// Resolve on `path` and store the result
    ///
    /// Overrides from `config` are applied after resolution and the result
    /// must still pass `AudioConfiguration::validate`. On failure the stored
    /// configuration is left untouched.
    pub fn compute_defaults<C>(
        &self,
        path: AudioPathKind,
        caps: &C,
        config: &LoopbackConfig,
    ) -> Result<AudioConfiguration, SettingsError>
    where
        C: CapabilityProvider + ?Sized,
    {
        let result = if config.fallback_to_managed {
            resolve_with_fallback(path, caps)
        } else {
            resolve(path, caps)
        };
        let resolved = result.map_err(|e| {
            warn!("[Loopback] Audio configuration failed on {} path: {}", path.name(), e);
            e
        })?;
        if resolved.path != path {
            warn!(
                "[Loopback] {} path unavailable, fell back to {}",
                path.name(),
                resolved.path.name()
            );
        }

        let resolved = config.apply_overrides(resolved);
        if config.has_overrides() {
            if let Err(e) = resolved.validate() {
                warn!("[Loopback] Rejected user overrides: {}", e);
                return Err(e.into());
            }
            info!("[Loopback] Applied user overrides");
        }
        self.replace(resolved);
        Ok(resolved)
    }

    fn replace(&self, config: AudioConfiguration) {
        let latency = config
            .buffer_latency_ms()
            .map(|(play, record)| format!("{:.2}ms / {:.2}ms", play, record))
            .unwrap_or_else(|| "n/a".to_string());
        info!(
            "[Loopback] Audio configuration: path={}, rate={}Hz, play={}B, record={}B ({})",
            config.path.name(),
            config.sampling_rate_hz,
            config.play_buffer_bytes,
            config.record_buffer_bytes,
            latency
        );
        *self.current.write() = Some(config);
    }

    /// Drop the stored configuration
    pub fn reset(&self) {
        *self.current.write() = None;
    }

    pub fn current(&self) -> Option<AudioConfiguration> {
        *self.current.read()
    }

    pub fn sampling_rate(&self) -> Option<u32> {
        self.current().map(|c| c.sampling_rate_hz)
    }

    pub fn play_buffer_bytes(&self) -> Option<u32> {
        self.current().map(|c| c.play_buffer_bytes)
    }

    pub fn record_buffer_bytes(&self) -> Option<u32> {
        self.current().map(|c| c.record_buffer_bytes)
    }

    pub fn audio_path(&self) -> Option<AudioPathKind> {
        self.current().map(|c| c.path)
    }

    // === Overrides ===
    // Each setter builds a new configuration, validates it and swaps it in.
    // A native configuration only accepts equal buffers, see set_buffer_bytes.

    pub fn set_sampling_rate(&self, rate: u32) -> Result<AudioConfiguration, SettingsError> {
        self.update(|c| c.with_sampling_rate(rate))
    }

    pub fn set_play_buffer_bytes(&self, bytes: u32) -> Result<AudioConfiguration, SettingsError> {
        self.update(|c| c.with_play_buffer_bytes(bytes))
    }

    pub fn set_record_buffer_bytes(&self, bytes: u32) -> Result<AudioConfiguration, SettingsError> {
        self.update(|c| c.with_record_buffer_bytes(bytes))
    }

    /// Set playback and record buffers to the same size
    pub fn set_buffer_bytes(&self, bytes: u32) -> Result<AudioConfiguration, SettingsError> {
        self.update(|c| c.with_play_buffer_bytes(bytes).with_record_buffer_bytes(bytes))
    }

    pub fn set_audio_path(&self, path: AudioPathKind) -> Result<AudioConfiguration, SettingsError> {
        self.update(|c| c.with_path(path))
    }

    fn update<F>(&self, f: F) -> Result<AudioConfiguration, SettingsError>
    where
        F: FnOnce(AudioConfiguration) -> AudioConfiguration,
    {
        let mut guard = self.current.write();
        let current = guard.ok_or(SettingsError::NotResolved)?;
        let next = f(current);
        next.validate()?;
        *guard = Some(next);
        Ok(next)
    }
}
