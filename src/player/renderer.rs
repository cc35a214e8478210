use thiserror::Error;

use crate::theory::{ChordKey, Pitch};

/// Errors a voice renderer can report.
///
/// None of these reach the key handler: the `VoiceManager` logs them and
/// drops the note.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("output device uses {0} samples, only f32 is supported")]
    UnsupportedFormat(String),

    #[error("failed to query the default output config")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build the output stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start the output stream")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("renderer is not initialized")]
    NotReady,

    #[error("note queue is full ({available} free slots, {needed} needed)")]
    QueueFull { needed: usize, available: usize },
}

/// A shared polyphonic voice renderer.
///
/// `key` identifies whose voices an attack or release belongs to. Two held
/// chords may share a pitch, and releasing one must leave the other sounding.
/// Times are seconds on the renderer's own clock (see [`Renderer::now`]).
pub trait Renderer {
    /// Acquire the output. Calling it again once ready is a no-op.
    fn initialize(&mut self) -> Result<(), RendererError>;

    /// Current time on the renderer clock, in seconds.
    fn now(&self) -> f64;

    fn attack(&mut self, key: ChordKey, pitches: &[Pitch], at: f64) -> Result<(), RendererError>;

    fn release(&mut self, key: ChordKey, pitches: &[Pitch], at: f64) -> Result<(), RendererError>;

    /// Release every resource; `initialize` is required before further use.
    fn dispose(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn initialize(&mut self) -> Result<(), RendererError> {
        (**self).initialize()
    }

    fn now(&self) -> f64 {
        (**self).now()
    }

    fn attack(&mut self, key: ChordKey, pitches: &[Pitch], at: f64) -> Result<(), RendererError> {
        (**self).attack(key, pitches, at)
    }

    fn release(&mut self, key: ChordKey, pitches: &[Pitch], at: f64) -> Result<(), RendererError> {
        (**self).release(key, pitches, at)
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}
