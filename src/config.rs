// === CONFIGURATION LOOPBACK ===
// User overrides persisted as JSON under the platform data directory.
// A missing or unreadable file yields the defaults.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::audio::{AudioConfiguration, AudioPathKind, ConfigError};

/// Errors raised by the settings layer
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No audio configuration resolved yet")]
    NotResolved,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted user overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopbackConfig {
    /// Skip the capability probe and always use this path
    #[serde(default)]
    pub forced_path: Option<AudioPathKind>,
    /// Re-resolve on the managed path when the native buffer property is unavailable
    #[serde(default = "default_fallback")]
    pub fallback_to_managed: bool,
    #[serde(default)]
    pub sampling_rate_override: Option<u32>,
    #[serde(default)]
    pub play_buffer_override: Option<u32>,
    #[serde(default)]
    pub record_buffer_override: Option<u32>,
}

fn default_fallback() -> bool {
    true
}

impl Default for LoopbackConfig {
    fn default() -> Self {
        Self {
            forced_path: None,
            fallback_to_managed: true,
            sampling_rate_override: None,
            play_buffer_override: None,
            record_buffer_override: None,
        }
    }
}

impl LoopbackConfig {
    /// Apply the field overrides to a freshly resolved configuration
    ///
    /// The result is unchecked; `LoopbackSettings` validates it before storing.
    pub fn apply_overrides(&self, config: AudioConfiguration) -> AudioConfiguration {
        let mut out = config;
        if let Some(rate) = self.sampling_rate_override {
            out = out.with_sampling_rate(rate);
        }
        if let Some(bytes) = self.play_buffer_override {
            out = out.with_play_buffer_bytes(bytes);
        }
        if let Some(bytes) = self.record_buffer_override {
            out = out.with_record_buffer_bytes(bytes);
        }
        out
    }

    pub fn has_overrides(&self) -> bool {
        self.sampling_rate_override.is_some()
            || self.play_buffer_override.is_some()
            || self.record_buffer_override.is_some()
    }
}

// === CHEMINS DES FICHIERS ===
pub fn get_data_dir() -> PathBuf {
    let home = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join("loopback")
}

pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.json")
}

// === LECTURE/ÉCRITURE ===
pub fn load_config() -> LoopbackConfig {
    load_config_from(&get_config_path())
}

pub fn load_config_from(path: &Path) -> LoopbackConfig {
    if !path.exists() {
        debug!("[Loopback] No config at {:?}, using defaults", path);
        return LoopbackConfig::default();
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("[Loopback] Failed to read {:?}: {}", path, e);
            return LoopbackConfig::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("[Loopback] Ignoring malformed config {:?}: {}", path, e);
            LoopbackConfig::default()
        }
    }
}

pub fn save_config(config: &LoopbackConfig) -> Result<(), SettingsError> {
    save_config_to(&get_config_path(), config)
}

pub fn save_config_to(path: &Path, config: &LoopbackConfig) -> Result<(), SettingsError> {
    let content = serde_json::to_string_pretty(config)?;
    save_file_secure(path, &content)?;
    info!("[Loopback] Saved config to {:?}", path);
    Ok(())
}

/// Write file with owner-only permissions (0600 on Unix)
fn save_file_secure(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json"));
        assert_eq!(config, LoopbackConfig::default());
        assert!(config.fallback_to_managed);
        assert!(!config.has_overrides());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = LoopbackConfig {
            forced_path: Some(AudioPathKind::Managed),
            fallback_to_managed: false,
            sampling_rate_override: Some(48000),
            play_buffer_override: None,
            record_buffer_override: Some(8192),
        };
        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path), config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_partial_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        fs::write(&path, r#"{ "forced_path": "native" }"#).unwrap();
        let config = load_config_from(&path);
        assert_eq!(config.forced_path, Some(AudioPathKind::Native));
        assert!(config.fallback_to_managed);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config_from(&path), LoopbackConfig::default());
    }

    #[test]
    fn test_apply_overrides() {
        let resolved = AudioConfiguration {
            sampling_rate_hz: 44100,
            play_buffer_bytes: 3528,
            record_buffer_bytes: 4096,
            path: AudioPathKind::Managed,
        };
        let config = LoopbackConfig {
            play_buffer_override: Some(1024),
            ..LoopbackConfig::default()
        };
        let out = config.apply_overrides(resolved);
        assert_eq!(out.play_buffer_bytes, 1024);
        assert_eq!(out.record_buffer_bytes, 4096);
        assert_eq!(out.sampling_rate_hz, 44100);
    }
}
