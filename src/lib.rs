//! Loopback audio configuration
//!
//! Chooses the audio path (native low-latency or managed) for a round-trip
//! latency measurement and derives the playback and record buffer sizes for
//! that path from device capabilities.

pub mod audio;
pub mod config;
pub mod settings;

pub use audio::{
    resolve, resolve_with_fallback, select_path, AudioConfiguration, AudioPathKind,
    CapabilityProvider, ConfigError, StaticCapabilities, BYTES_PER_FRAME,
};
pub use config::{load_config, save_config, LoopbackConfig, SettingsError};
pub use settings::{settings, LoopbackSettings};
