//! Audio configuration core for Loopback
//!
//! Decides which audio path the latency measurement runs on and how large
//! the playback and record buffers must be on that path. No audio is
//! captured or played here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        LoopbackSettings (application)        │
//! │  holds the current AudioConfiguration        │
//! └─────────────┬───────────────────────────────┘
//!               │ capability probe
//!               ▼
//! ┌─────────────────────────────────────────────┐
//! │   select_path()  →  Native | Managed         │
//! └─────────────┬───────────────────────────────┘
//!               ▼
//! ┌─────────────────────────────────────────────┐
//! │   resolve(path, &dyn CapabilityProvider)     │
//! └──────┬──────────────────────┬───────────────┘
//!        ▼                      ▼
//! ┌──────────────┐    ┌──────────────────────┐
//! │ Native       │    │ Managed              │
//! │ frames * 2   │    │ min play / min rec   │
//! └──────────────┘    └──────────────────────┘
//! ```

pub mod capabilities;
pub mod error;
pub mod path;
pub mod resolver;
pub mod types;

// Re-exports for convenience
pub use capabilities::{
    is_safe_to_use_native, parse_frames_property, CapabilityProvider, StaticCapabilities,
    FRAMES_PER_BUFFER_PROPERTY, MIN_NATIVE_PLATFORM_VERSION,
};
pub use error::{ConfigError, Result};
pub use path::select_path;
pub use resolver::{resolve, resolve_with_fallback};
pub use types::*;
