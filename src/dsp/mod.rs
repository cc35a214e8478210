//! Low-level DSP primitives used by the graph nodes.
//!
//! Everything here is allocation-free and safe to call from the audio
//! callback.

/// Linear attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Band-limited oscillator waveforms.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeStage};
pub use oscillator::{OscillatorBlock, Waveform};
