use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Linear ADSR Envelope
====================

The envelope scales each voice's amplitude over the life of a key press.

  Level
    1.0 ┐    ╱╲
        │   ╱  ╲__________
    S   │  ╱              ╲
        │ ╱                ╲
    0.0 └╱──────────────────╲──→ Time
        Attack Decay Sustain Release

Stages move forward on their own (Attack → Decay → Sustain) while the key is
held. note_off jumps to Release from whatever stage is current, starting from
the current level so a quick tap does not click. note_on always restarts from
zero, which is what a retriggered chord should sound like.

Per-sample step sizes come from the stage time and the sample rate:

    step = distance / (time_seconds * sample_rate)

Release is the one stage that must land exactly on zero, so it counts samples
from a snapshot taken at note_off instead of stepping.

A chord held indefinitely sits in Sustain. With the default patch (decay 0,
sustain 1.0) that is full level until the key comes up.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,

    stage: EnvelopeStage,
    level: f32,

    release_from: f32,
    release_samples: u32,
    release_elapsed: u32,
}

impl Envelope {
    /// Times in seconds; `sustain` is a level in 0.0..=1.0.
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(MIN_TIME),
            decay: decay.max(MIN_TIME),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(MIN_TIME),
            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_from: 0.0,
            release_samples: 1,
            release_elapsed: 0,
        }
    }

    pub fn note_on(&mut self) {
        self.level = 0.0;
        self.release_elapsed = 0;
        self.stage = EnvelopeStage::Attack;
    }

    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeStage::Idle | EnvelopeStage::Release) {
            return;
        }

        self.release_from = self.level;
        self.release_samples = (self.release * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed = 0;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => self.level = 0.0,
            EnvelopeStage::Attack => {
                self.level += 1.0 / (self.attack * ctx.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.level -= (1.0 - self.sustain) / (self.decay * ctx.sample_rate);
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Sustain => self.level = self.sustain,
            EnvelopeStage::Release => {
                self.release_elapsed = self.release_elapsed.saturating_add(1);
                let remaining = 1.0 - self.release_elapsed as f32 / self.release_samples as f32;
                self.level = (self.release_from * remaining).max(0.0);
                if self.release_elapsed >= self.release_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}
