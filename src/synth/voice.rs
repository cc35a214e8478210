use crate::graph::node::{GraphNode, RenderCtx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// Available for allocation.
    Free,
    /// Key held; envelope in attack, decay or sustain.
    Active,
    /// Key released; envelope fading out.
    Releasing,
}

/// One sounding note of one chord key.
pub struct Voice<T: GraphNode> {
    group: u8,
    note: u8,
    velocity: u8,
    state: VoiceState,
    age: u64,
    sample_rate: f32,
    graph: T,
}

impl<T: GraphNode> Voice<T> {
    pub fn new(graph: T, sample_rate: f32) -> Self {
        Self {
            group: 0,
            note: 0,
            velocity: 0,
            state: VoiceState::Free,
            age: 0,
            sample_rate,
            graph,
        }
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_note(self.sample_rate, self.note, self.velocity as f32)
    }

    /// Start (or steal and restart) this voice. `age` is the frame it began.
    pub fn start(&mut self, group: u8, note: u8, velocity: u8, age: u64) {
        self.group = group;
        self.note = note;
        self.velocity = velocity;
        self.state = VoiceState::Active;
        self.age = age;

        let ctx = self.ctx();
        self.graph.note_on(&ctx);
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            let ctx = self.ctx();
            self.graph.note_off(&ctx);
        }
    }

    pub fn render(&mut self, out: &mut [f32]) {
        let ctx = self.ctx();
        self.graph.render_block(out, &ctx);

        if self.state == VoiceState::Releasing && !self.graph.is_active() {
            self.state = VoiceState::Free;
        }
    }

    /// Held and belonging to `group` at `note`.
    pub fn is_held(&self, group: u8, note: u8) -> bool {
        self.state == VoiceState::Active && self.group == group && self.note == note
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_sounding(&self) -> bool {
        self.state != VoiceState::Free
    }

    pub fn envelope_level(&self) -> Option<f32> {
        self.graph.envelope_level()
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}
