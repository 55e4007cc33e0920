//! Audio path selection

use crate::audio::types::AudioPathKind;

/// Choose the audio path from the capability probe
///
/// An unconfirmed capability always lands on the managed path.
pub fn select_path(capability: bool) -> AudioPathKind {
    if capability {
        AudioPathKind::Native
    } else {
        AudioPathKind::Managed
    }
}
