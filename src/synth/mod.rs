//! Voice management and polyphony.
//!
//! This layer sits above the graph nodes: it owns a pool of voices, routes
//! timed note events to them and mixes the result.

pub mod factory;
pub mod message;
pub mod patch;
pub mod poly;
pub mod voice;

pub use message::{SynthMessage, TimedMessage};
pub use poly::PolySynth;
