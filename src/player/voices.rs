use std::collections::BTreeMap;

use log::{debug, info, warn};

use super::{
    display::DisplayState,
    renderer::{Renderer, RendererError},
};
use crate::theory::{Chord, ChordKey, Pitch};

/// Pitches sounding for one key, plus when that key was attacked.
#[derive(Debug, Clone)]
struct ActiveChord {
    pitches: Vec<Pitch>,
    order: u64,
}

/// Turns key down/up into attack/release on a shared renderer.
///
/// Keeps at most one voice group per key. Pressing a held key again releases
/// the old group before attacking the new one; releasing a key touches only
/// the pitches recorded for that key. Renderer failures are logged and
/// swallowed, so a broken output drops notes but never breaks input handling.
pub struct VoiceManager<R: Renderer> {
    renderer: R,
    ready: bool,
    active: BTreeMap<ChordKey, ActiveChord>,
    next_order: u64,
}

impl<R: Renderer> VoiceManager<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            ready: false,
            active: BTreeMap::new(),
            next_order: 0,
        }
    }

    /// Acquire the renderer if that has not happened yet.
    ///
    /// On failure the manager stays uninitialized and the next `play` tries
    /// again.
    pub fn initialize(&mut self) -> Result<(), RendererError> {
        if self.ready {
            return Ok(());
        }
        self.renderer.initialize()?;
        self.ready = true;
        info!("voice renderer ready");
        Ok(())
    }

    /// Start the chord for `key`, retriggering it if already held.
    ///
    /// Keys outside 1..=7 are ignored.
    pub fn play(&mut self, key: i32) {
        let Some(key) = ChordKey::new(key) else {
            debug!("ignoring play for key {key}");
            return;
        };

        if let Err(err) = self.initialize() {
            warn!("cannot play key {key}: {err}; retrying on next press");
            return;
        }

        if self.active.contains_key(&key) && !self.release_key(key) {
            // The old group is still sounding; attacking again would double it.
            return;
        }

        let chord = key.chord();
        let at = self.renderer.now();
        match self.renderer.attack(key, &chord.pitches, at) {
            Ok(()) => {
                debug!(
                    "key {key}: attack {} {:?} at {at:.3}s",
                    chord.name, chord.pitches
                );
                self.active.insert(
                    key,
                    ActiveChord {
                        pitches: chord.pitches.to_vec(),
                        order: self.next_order,
                    },
                );
                self.next_order += 1;
            }
            Err(err) => warn!("key {key}: dropped {}: {err}", chord.name),
        }
    }

    /// Release the chord held under `key`. No-op if nothing is held there.
    pub fn stop(&mut self, key: i32) {
        match ChordKey::new(key) {
            Some(key) => {
                self.release_key(key);
            }
            None => debug!("ignoring stop for key {key}"),
        }
    }

    /// Release every held chord and forget them all.
    pub fn stop_all(&mut self) {
        let keys: Vec<ChordKey> = self.active.keys().copied().collect();
        for key in keys {
            self.release_key(key);
        }
        self.active.clear();
    }

    /// Stop everything and hand the renderer's resources back.
    ///
    /// A later `play` initializes again.
    pub fn dispose(&mut self) {
        self.stop_all();
        if self.ready {
            self.renderer.dispose();
            self.ready = false;
            info!("voice renderer disposed");
        }
    }

    /// Returns false if the renderer refused, leaving the key held.
    fn release_key(&mut self, key: ChordKey) -> bool {
        let Some(chord) = self.active.get(&key) else {
            return true;
        };

        let at = self.renderer.now();
        match self.renderer.release(key, &chord.pitches, at) {
            Ok(()) => {
                debug!("key {key}: release {:?} at {at:.3}s", chord.pitches);
                self.active.remove(&key);
                true
            }
            Err(err) => {
                warn!("key {key}: release failed: {err}");
                false
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn active_keys(&self) -> impl Iterator<Item = ChordKey> + '_ {
        self.active.keys().copied()
    }

    /// Pitches currently sounding for `key`.
    pub fn sounding(&self, key: ChordKey) -> Option<&[Pitch]> {
        self.active.get(&key).map(|chord| chord.pitches.as_slice())
    }

    /// Chord of the most recently attacked key that is still held.
    pub fn now_playing(&self) -> Option<&'static Chord> {
        self.active
            .iter()
            .max_by_key(|(_, chord)| chord.order)
            .map(|(key, _)| key.chord())
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            active_keys: self.active.keys().copied().collect(),
            now_playing: self.now_playing(),
            audio_ready: self.ready,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Init,
        Attack(u8, Vec<String>),
        Release(u8, Vec<String>),
        Dispose,
    }

    /// Records every call. `fail_init` and `refuse` simulate a broken output.
    #[derive(Default)]
    struct FakeRenderer {
        calls: Vec<Call>,
        fail_init: usize,
        refuse: bool,
        clock: f64,
    }

    fn names(pitches: &[Pitch]) -> Vec<String> {
        pitches.iter().map(Pitch::to_string).collect()
    }

    impl Renderer for FakeRenderer {
        fn initialize(&mut self) -> Result<(), RendererError> {
            self.calls.push(Call::Init);
            if self.fail_init > 0 {
                self.fail_init -= 1;
                return Err(RendererError::NoOutputDevice);
            }
            Ok(())
        }

        fn now(&self) -> f64 {
            self.clock
        }

        fn attack(
            &mut self,
            key: ChordKey,
            pitches: &[Pitch],
            _at: f64,
        ) -> Result<(), RendererError> {
            if self.refuse {
                return Err(RendererError::NotReady);
            }
            self.calls.push(Call::Attack(key.number(), names(pitches)));
            Ok(())
        }

        fn release(
            &mut self,
            key: ChordKey,
            pitches: &[Pitch],
            _at: f64,
        ) -> Result<(), RendererError> {
            if self.refuse {
                return Err(RendererError::NotReady);
            }
            self.calls.push(Call::Release(key.number(), names(pitches)));
            Ok(())
        }

        fn dispose(&mut self) {
            self.calls.push(Call::Dispose);
        }
    }

    fn manager() -> VoiceManager<FakeRenderer> {
        VoiceManager::new(FakeRenderer::default())
    }

    fn sounding(voices: &VoiceManager<FakeRenderer>, key: i32) -> Option<Vec<String>> {
        voices.sounding(ChordKey::new(key)?).map(names)
    }

    #[test]
    fn initializes_lazily_once() {
        let mut voices = manager();
        assert!(!voices.is_ready());
        assert!(voices.renderer().calls.is_empty());

        voices.play(1);
        voices.play(2);
        voices.initialize().unwrap();

        let inits = voices
            .renderer()
            .calls
            .iter()
            .filter(|c| **c == Call::Init)
            .count();
        assert_eq!(inits, 1);
        assert!(voices.is_ready());
    }

    #[test]
    fn play_records_the_chord_pitches() {
        let mut voices = manager();
        voices.play(1);

        assert_eq!(sounding(&voices, 1), Some(vec!["C3".into(), "E3".into(), "G3".into()]));
        assert_eq!(
            voices.renderer().calls.last(),
            Some(&Call::Attack(1, vec!["C3".into(), "E3".into(), "G3".into()]))
        );
    }

    #[test]
    fn invalid_keys_are_ignored() {
        let mut voices = manager();
        voices.play(0);
        voices.play(8);
        voices.play(-1);
        voices.stop(9);

        assert!(voices.renderer().calls.is_empty());
        assert_eq!(voices.active_keys().count(), 0);
    }

    #[test]
    fn stop_twice_is_a_noop() {
        let mut voices = manager();
        voices.play(3);
        voices.stop(3);
        let after_first = voices.renderer().calls.clone();
        voices.stop(3);

        assert_eq!(voices.renderer().calls, after_first);
        assert_eq!(sounding(&voices, 3), None);
    }

    #[test]
    fn stopping_one_key_leaves_the_other() {
        let mut voices = manager();
        voices.play(1);
        voices.play(2);
        voices.stop(1);

        assert_eq!(sounding(&voices, 1), None);
        assert_eq!(sounding(&voices, 2), Some(vec!["D3".into(), "F3".into(), "A3".into()]));
        assert!(voices
            .renderer()
            .calls
            .iter()
            .all(|c| !matches!(c, Call::Release(2, _))));
    }

    #[test]
    fn retrigger_releases_before_attacking() {
        let mut voices = manager();
        voices.play(1);
        voices.play(1);

        let tail: Vec<_> = voices.renderer().calls.iter().skip(1).cloned().collect();
        let c_major = vec!["C3".to_string(), "E3".into(), "G3".into()];
        assert_eq!(
            tail,
            vec![
                Call::Attack(1, c_major.clone()),
                Call::Release(1, c_major.clone()),
                Call::Attack(1, c_major),
            ]
        );
        assert_eq!(voices.active_keys().count(), 1);
    }

    #[test]
    fn init_failure_retries_on_next_play() {
        let mut voices = VoiceManager::new(FakeRenderer {
            fail_init: 1,
            ..Default::default()
        });

        voices.play(5);
        assert!(!voices.is_ready());
        assert_eq!(voices.active_keys().count(), 0);

        voices.play(5);
        assert!(voices.is_ready());
        assert_eq!(sounding(&voices, 5), Some(vec!["G3".into(), "B3".into(), "D4".into()]));
    }

    #[test]
    fn refused_attack_leaves_state_unchanged() {
        let mut voices = manager();
        voices.initialize().unwrap();
        voices.renderer.refuse = true;

        voices.play(4);
        assert_eq!(voices.active_keys().count(), 0);
        assert_eq!(voices.now_playing(), None);
    }

    #[test]
    fn refused_release_blocks_retrigger() {
        let mut voices = manager();
        voices.play(6);
        voices.renderer.refuse = true;

        voices.play(6);
        voices.stop(6);
        let held: Vec<u8> = voices.active_keys().map(ChordKey::number).collect();
        assert_eq!(held, vec![6]);

        voices.renderer.refuse = false;
        voices.stop(6);
        assert_eq!(voices.active_keys().count(), 0);
    }

    #[test]
    fn stop_all_releases_every_key() {
        let mut voices = manager();
        for key in 1..=7 {
            voices.play(key);
        }
        voices.stop_all();

        let releases = voices
            .renderer()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Release(..)))
            .count();
        assert_eq!(releases, 7);
        assert_eq!(voices.active_keys().count(), 0);
    }

    #[test]
    fn dispose_then_play_reinitializes() {
        let mut voices = manager();
        voices.play(2);
        voices.dispose();

        assert!(!voices.is_ready());
        assert_eq!(voices.renderer().calls.last(), Some(&Call::Dispose));

        voices.play(2);
        assert!(voices.is_ready());
        let inits = voices
            .renderer()
            .calls
            .iter()
            .filter(|c| **c == Call::Init)
            .count();
        assert_eq!(inits, 2);
    }

    #[test]
    fn now_playing_follows_latest_held_key() {
        let mut voices = manager();
        voices.play(1);
        voices.play(5);
        assert_eq!(voices.now_playing().map(|c| c.name), Some("G Major"));

        voices.stop(5);
        assert_eq!(voices.now_playing().map(|c| c.name), Some("C Major"));

        voices.play(5);
        voices.play(1);
        assert_eq!(voices.now_playing().map(|c| c.name), Some("C Major"));

        voices.stop_all();
        assert_eq!(voices.now_playing(), None);
        let display = voices.display_state();
        assert!(display.is_idle());
        assert!(display.audio_ready);
    }
}
