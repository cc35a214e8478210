#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::Waveform;

/// Share of full scale each voice gets before the volume setting applies.
///
/// Seven held triads sum 21 voices, so a single voice stays well below 1.0.
const VOICE_HEADROOM: f32 = 0.25;

/// Sound of the chord voices: oscillator, envelope, level and pool size.
///
/// ```ignore
/// let config = SynthConfig::default()
///     .with_waveform(Waveform::Triangle)
///     .with_envelope(0.05, 0.1, 0.8, 0.5)
///     .with_volume_db(-8.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub waveform: Waveform,
    /// Seconds from silence to full level.
    pub attack: f32,
    /// Seconds from full level to the sustain level.
    pub decay: f32,
    /// Held level, 0.0..=1.0.
    pub sustain: f32,
    /// Seconds to fade out after the key comes up.
    pub release: f32,
    /// Output level in decibels.
    pub volume_db: f32,
    /// Size of the voice pool.
    pub max_polyphony: usize,
    /// MIDI velocity used for every chord note.
    pub velocity: u8,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sawtooth,
            attack: 0.02,
            decay: 0.0,
            sustain: 1.0,
            release: 0.3,
            volume_db: -5.0,
            max_polyphony: 32,
            velocity: 100,
        }
    }
}

impl SynthConfig {
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_envelope(mut self, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        self.attack = attack;
        self.decay = decay;
        self.sustain = sustain;
        self.release = release;
        self
    }

    pub fn with_volume_db(mut self, volume_db: f32) -> Self {
        self.volume_db = volume_db;
        self
    }

    pub fn with_max_polyphony(mut self, voices: usize) -> Self {
        self.max_polyphony = voices.max(1);
        self
    }

    pub fn with_velocity(mut self, velocity: u8) -> Self {
        self.velocity = velocity.min(127);
        self
    }

    /// Linear gain applied to each voice.
    pub fn voice_gain(&self) -> f32 {
        VOICE_HEADROOM * 10.0_f32.powf(self.volume_db / 20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_chord_patch() {
        let config = SynthConfig::default();
        assert_eq!(config.waveform, Waveform::Sawtooth);
        assert_eq!(config.max_polyphony, 32);
        assert_eq!(config.sustain, 1.0);
        assert_eq!(config.decay, 0.0);
    }

    #[test]
    fn zero_db_is_plain_headroom() {
        let config = SynthConfig::default().with_volume_db(0.0);
        assert!((config.voice_gain() - VOICE_HEADROOM).abs() < 1e-6);
    }

    #[test]
    fn minus_six_db_roughly_halves() {
        let config = SynthConfig::default().with_volume_db(-6.0);
        let ratio = config.voice_gain() / VOICE_HEADROOM;
        assert!((ratio - 0.501).abs() < 0.01);
    }

    #[test]
    fn builders_clamp_nonsense() {
        let config = SynthConfig::default()
            .with_max_polyphony(0)
            .with_velocity(200);
        assert_eq!(config.max_polyphony, 1);
        assert_eq!(config.velocity, 127);
    }
}
