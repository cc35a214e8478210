pub mod audio; // cpal output implementing the renderer
pub mod config;
pub mod dsp;
pub mod graph; // Composable audio graph nodes
pub mod player; // Key events → voice groups
pub mod synth; // Voice management and polyphony
pub mod theory; // Diatonic triads of C major

pub use config::SynthConfig;
pub use player::{DisplayState, PlayerHandle, Renderer, RendererError, VoiceManager};
pub use theory::{chord_by_key, Chord, ChordKey, ChordQuality, NoteName, Pitch};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
