#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/*
Natural Pitches
===============

The chord player only ever sounds the seven white-key notes, so a pitch is a
natural letter plus an octave. Accidentals never appear in C major.

MIDI numbering follows the usual convention where Middle C (C4) is 60:

    note_number = 12 * (octave + 1) + semitone

with semitone offsets C=0, D=2, E=4, F=5, G=7, A=9, B=11.
*/

/// Number of letters in the natural (C major) scale.
pub const SCALE_LEN: usize = 7;

/// One of the seven natural note letters, in scale order starting from C.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// All letters in scale order (C D E F G A B).
    pub const ALL: [NoteName; SCALE_LEN] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// Letter at `index` in the scale, wrapping past B back to C.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % SCALE_LEN]
    }

    /// Position of this letter in the scale (C = 0, B = 6).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Semitones above C within one octave.
    pub const fn semitone(self) -> u8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A natural note in a specific octave, e.g. `E3`.
///
/// Displays as its pitch name, which is also how the renderer refers to it in
/// logs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub name: NoteName,
    pub octave: i8,
}

impl Pitch {
    pub const fn new(name: NoteName, octave: i8) -> Self {
        Self { name, octave }
    }

    /// MIDI note number, clamped to the valid 0..=127 range.
    pub fn midi_note(self) -> u8 {
        let note = 12 * (self.octave as i16 + 1) + self.name.semitone() as i16;
        note.clamp(0, 127) as u8
    }

    /// Equal-tempered frequency in Hz (A4 = 440 Hz).
    pub fn frequency(self) -> f32 {
        440.0 * 2.0_f32.powf((self.midi_note() as f32 - 69.0) / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}
