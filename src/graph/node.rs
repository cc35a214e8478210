/// Convert a MIDI note number to Hz (A4 = 69 = 440 Hz).
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// What a node should render for the current voice.
///
/// - `sample_rate`: output rate in Hz
/// - `frequency`: pitch of the voice in Hz
/// - `velocity`: MIDI-style 0.0..=127.0
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub velocity: f32,
}

impl RenderCtx {
    pub fn from_note(sample_rate: f32, note: u8, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency: midi_note_to_freq(note),
            velocity,
        }
    }

    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
        }
    }

    /// Velocity normalized to 0.0..=1.0.
    pub fn gain(&self) -> f32 {
        (self.velocity / 127.0).clamp(0.0, 1.0)
    }
}

/// A block-rendering audio node that reacts to note on/off.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    fn note_on(&mut self, _ctx: &RenderCtx) {}

    fn note_off(&mut self, _ctx: &RenderCtx) {}

    /// Current envelope level, if this node contains one.
    fn envelope_level(&self) -> Option<f32> {
        None
    }

    /// Whether the node still produces sound. Voices are freed once this
    /// turns false after a release.
    fn is_active(&self) -> bool {
        true
    }
}

impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        (**self).note_on(ctx)
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        (**self).note_off(ctx)
    }

    fn envelope_level(&self) -> Option<f32> {
        (**self).envelope_level()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
