use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, sample by sample.
///
/// With an envelope as the modulator this is the voice's amplitude control.
pub struct Amplify<N, M> {
    signal: N,
    modulator: M,
    scratch: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        let frames = &mut self.scratch[..out.len()];
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn envelope_level(&self) -> Option<f32> {
        self.modulator
            .envelope_level()
            .or_else(|| self.signal.envelope_level())
    }

    // Silent once the modulator is done, even if the signal keeps running.
    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

/// Fixed gain scaled by the voice velocity.
pub struct Gain<N> {
    signal: N,
    level: f32,
}

impl<N> Gain<N> {
    pub fn new(signal: N, level: f32) -> Self {
        Self { signal, level }
    }
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        let gain = self.level * ctx.gain();
        for o in out.iter_mut() {
            *o *= gain;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
    }

    fn envelope_level(&self) -> Option<f32> {
        self.signal.envelope_level()
    }

    fn is_active(&self) -> bool {
        self.signal.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, oscillator::OscNode};

    #[test]
    fn envelope_gates_the_signal() {
        let ctx = RenderCtx::from_note(48_000.0, 60, 127.0);
        let mut voice = Amplify::new(OscNode::square(), EnvNode::adsr(0.001, 0.0, 1.0, 0.01));

        let mut buffer = vec![0.0f32; 256];
        voice.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|&s| s == 0.0), "idle envelope must be silent");

        voice.note_on(&ctx);
        voice.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().any(|s| s.abs() > 0.5));
        assert!(voice.is_active());
    }

    #[test]
    fn gain_scales_by_level_and_velocity() {
        let full = RenderCtx::from_note(48_000.0, 60, 127.0);
        let half = RenderCtx::from_note(48_000.0, 60, 63.5);

        let mut loud = Gain::new(OscNode::square(), 0.5);
        let mut quiet = Gain::new(OscNode::square(), 0.5);
        let mut a = vec![0.0f32; 64];
        let mut b = vec![0.0f32; 64];
        loud.render_block(&mut a, &full);
        quiet.render_block(&mut b, &half);

        // Sample 32 sits mid-cycle, clear of any PolyBLEP correction.
        assert!((a[32].abs() - 0.5).abs() < 1e-4);
        assert!((b[32].abs() - 0.25).abs() < 1e-4);
    }
}
