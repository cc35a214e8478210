use rtrb::Consumer;

use crate::{
    synth::{
        factory::VoiceFactory,
        message::{SynthMessage, TimedMessage},
        voice::{Voice, VoiceState},
    },
    MAX_BLOCK_SIZE,
};

/*
Polyphonic Voice Pool
=====================

PolySynth owns a fixed pool of voices built once by a VoiceFactory and mixes
every sounding voice into the output. It runs inside the audio callback, so
it never allocates, locks or blocks after construction.

Events arrive on a wait-free ring buffer as TimedMessages. Before rendering,
the synth applies every message whose frame has come due. If the next message
lands inside the current block, the block is split at that frame so the chord
starts on the exact sample it was stamped with:

    block:    |-------- 256 frames --------|
    events:           ^ NoteOn @ +90
    render:   [0..90) apply [90..256)

Messages are applied in queue order, never reordered, so attack and release
for one key keep their FIFO order.

Allocation:
  1. a free voice
  2. otherwise the oldest voice in its release tail
  3. otherwise the oldest held voice (a pool this small should not get here)

Releases match on (group, note), so two held chords that share a pitch each
own a separate voice for it.
*/

pub struct PolySynth<F: VoiceFactory> {
    voices: Vec<Voice<F::Voice>>,
    rx: Consumer<TimedMessage>,
    scratch: Vec<f32>,
    frame_counter: u64,
}

impl<F: VoiceFactory> PolySynth<F> {
    pub fn new(
        sample_rate: f32,
        max_voices: usize,
        factory: F,
        rx: Consumer<TimedMessage>,
    ) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| Voice::new(factory.create_voice(), sample_rate))
            .collect();

        Self {
            voices,
            rx,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    /// Render the next `out.len()` frames (at most `MAX_BLOCK_SIZE`).
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);
        out.fill(0.0);

        let len = out.len();
        let mut offset = 0;
        while offset < len {
            self.apply_due(self.frame_counter + offset as u64);

            let end = match self.rx.peek() {
                Ok(next) => ((next.frame - self.frame_counter) as usize).min(len),
                Err(_) => len,
            };

            self.mix_voices(&mut out[offset..end]);
            offset = end;
        }

        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }

        self.frame_counter += len as u64;
    }

    fn apply_due(&mut self, now: u64) {
        while let Ok(next) = self.rx.peek() {
            if next.frame > now {
                break;
            }
            if let Ok(timed) = self.rx.pop() {
                self.apply(timed.message, now);
            }
        }
    }

    fn apply(&mut self, message: SynthMessage, now: u64) {
        match message {
            SynthMessage::NoteOn {
                group,
                note,
                velocity,
            } => {
                let idx = self.allocate_voice();
                self.voices[idx].start(group, note, velocity, now);
            }
            SynthMessage::NoteOff { group, note } => {
                if let Some(voice) = self.voices.iter_mut().find(|v| v.is_held(group, note)) {
                    voice.release();
                }
            }
        }
    }

    fn mix_voices(&mut self, out: &mut [f32]) {
        if out.is_empty() {
            return;
        }
        for voice in &mut self.voices {
            if voice.is_sounding() {
                let tmp = &mut self.scratch[..out.len()];
                voice.render(tmp);
                for (o, v) in out.iter_mut().zip(tmp.iter()) {
                    *o += v;
                }
            }
        }
    }

    fn allocate_voice(&self) -> usize {
        if let Some(idx) = self.voices.iter().position(|v| v.is_free()) {
            return idx;
        }

        let oldest_in = |state: VoiceState| {
            self.voices
                .iter()
                .enumerate()
                .filter(|(_, v)| v.state() == state)
                .min_by_key(|(_, v)| v.age())
                .map(|(idx, _)| idx)
        };

        oldest_in(VoiceState::Releasing)
            .or_else(|| oldest_in(VoiceState::Active))
            .unwrap_or(0)
    }

    /// Frames rendered since construction.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn voices(&self) -> &[Voice<F::Voice>] {
        &self.voices
    }

    pub fn sounding_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_sounding()).count()
    }

    /// `(group, note)` of every voice whose key is still held.
    pub fn held_notes(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.voices
            .iter()
            .filter(|v| v.state() == VoiceState::Active)
            .map(|v| (v.group(), v.note()))
    }
}
