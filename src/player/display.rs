use std::collections::BTreeSet;

use crate::theory::{Chord, ChordKey};

/// Read-only view of the player for the UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// Keys whose chord is currently attacked and not yet released.
    pub active_keys: BTreeSet<ChordKey>,
    /// Most recently attacked chord that is still held.
    pub now_playing: Option<&'static Chord>,
    /// Whether the renderer has been acquired.
    pub audio_ready: bool,
}

impl DisplayState {
    pub fn is_active(&self, key: ChordKey) -> bool {
        self.active_keys.contains(&key)
    }

    pub fn is_idle(&self) -> bool {
        self.active_keys.is_empty()
    }
}
