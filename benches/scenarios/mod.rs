//! What the player does at run time: one chord voice on its own, and the
//! polyphonic synth with several keys held.

mod chords;
mod voices;

pub use chords::bench_chords;
pub use voices::bench_voices;
