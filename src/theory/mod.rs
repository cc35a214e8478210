//! Scale-degree theory for the seven diatonic triads of C major.
//!
//! Everything here is pure and `const`-built: the chord table is computed at
//! compile time and never changes.

/// Triads, chord qualities and the key-to-chord table.
pub mod chord;
/// Natural note names and octave-qualified pitches.
pub mod pitch;

pub use chord::{build_triad, chord_by_key, Chord, ChordKey, ChordQuality, DIATONIC_CHORDS};
pub use pitch::{NoteName, Pitch};
