#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{f32::consts::TAU, fmt, str::FromStr};

use thiserror::Error;

use crate::graph::node::RenderCtx;

/*
Phase-Accumulator Oscillator
============================

The oscillator keeps a phase in [0, 1) and advances it by frequency /
sample_rate every sample. Each waveform is a function of that phase:

  sine       sin(2π·phase)
  sawtooth   2·phase - 1                 (bright, all harmonics)
  square     +1 for phase < 0.5, else -1 (hollow, odd harmonics)
  triangle   1 - 4·|phase - 0.5|         (soft, weak odd harmonics)

The naive sawtooth and square jump instantly, which aliases badly at high
pitches. PolyBLEP smooths each discontinuity with a two-sample polynomial
correction, which is cheap enough to run per voice.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    Sine,
    #[default]
    Sawtooth,
    Square,
    Triangle,
}

impl Waveform {
    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown waveform `{0}` (expected sine, sawtooth, square or triangle)")]
pub struct ParseWaveformError(String);

impl FromStr for Waveform {
    type Err = ParseWaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "square" | "sqr" => Ok(Waveform::Square),
            "triangle" | "tri" => Ok(Waveform::Triangle),
            _ => Err(ParseWaveformError(s.to_string())),
        }
    }
}

/// Two-sample polynomial correction around a unit step at phase 0.
#[inline]
fn poly_blep(phase: f32, step: f32) -> f32 {
    if phase < step {
        let t = phase / step;
        t + t - t * t - 1.0
    } else if phase > 1.0 - step {
        let t = (phase - 1.0) / step;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}

pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Restart the cycle so every note begins from the same point.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn sample(&self, step: f32) -> f32 {
        let phase = self.phase;
        match self.waveform {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Sawtooth => 2.0 * phase - 1.0 - poly_blep(phase, step),
            Waveform::Square => {
                let naive = if phase < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(phase, step) - poly_blep((phase + 0.5) % 1.0, step)
            }
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }

    /// Fill `out` with the waveform at `ctx.frequency`.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let step = (ctx.frequency / ctx.sample_rate).clamp(0.0, 0.5);
        for sample in out.iter_mut() {
            *sample = self.sample(step);
            self.phase += step;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }
        }
    }
}
