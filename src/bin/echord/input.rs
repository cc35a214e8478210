//! Key hold tracking
//!
//! Turns raw terminal key events into one `play` per physical press and one
//! `stop` per release. Terminals that report key-up (kitty keyboard protocol)
//! release on the real event. Others only send auto-repeat presses while a
//! key is held, so a key counts as released once no press or repeat has
//! arrived for `HOLD_TIMEOUT`.

use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use echord::ChordKey;

/// Default hold timeout. Must exceed the desktop's auto-repeat delay (X11
/// 660 ms, KDE 600 ms) or a held key drops before its first repeat arrives.
/// Override with `--hold-timeout <ms>`.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(750);

pub struct KeyTracker {
    held: BTreeMap<ChordKey, Instant>,
    /// `None` when the terminal reports real key releases.
    release_after: Option<Duration>,
}

impl KeyTracker {
    pub fn with_release_events() -> Self {
        Self {
            held: BTreeMap::new(),
            release_after: None,
        }
    }

    pub fn with_hold_timeout(timeout: Duration) -> Self {
        Self {
            held: BTreeMap::new(),
            release_after: Some(timeout),
        }
    }

    /// A press or repeat. Returns true only for a new press.
    pub fn press(&mut self, key: ChordKey, now: Instant) -> bool {
        self.held.insert(key, now).is_none()
    }

    /// Returns true if the key was held.
    pub fn release(&mut self, key: ChordKey) -> bool {
        self.held.remove(&key).is_some()
    }

    /// Keys whose hold timed out; they are no longer tracked as held.
    pub fn expired(&mut self, now: Instant) -> Vec<ChordKey> {
        let Some(timeout) = self.release_after else {
            return Vec::new();
        };

        let mut released = Vec::new();
        self.held.retain(|&key, last| {
            if now.saturating_duration_since(*last) > timeout {
                released.push(key);
                false
            } else {
                true
            }
        });
        released
    }

    pub fn release_all(&mut self) -> Vec<ChordKey> {
        std::mem::take(&mut self.held).into_keys().collect()
    }

    pub fn uses_timeout(&self) -> bool {
        self.release_after.is_some()
    }
}
