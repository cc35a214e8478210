#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;

use super::pitch::{NoteName, Pitch, SCALE_LEN};

/*
Diatonic Triads
===============

Every chord here is stacked from the C major scale itself: root, the scale
note two steps up (the third) and the scale note four steps up (the fifth).

    degree   I   ii  iii  IV  V   vi  vii°
    root     C   D   E    F   G   A   B
    third    E   F   G    A   B   C   D
    fifth    G   A   B    C   D   E   F

Because all seven chords borrow notes from one scale, the same scale offsets
{0, 2, 4} produce every quality. Major, minor and diminished fall out of where
the half steps (E-F, B-C) land; quality is a label, never an input to the
interval math.

Voicing keeps each triad compact: the root sits in the base octave, and a
third or fifth whose letter wrapped past B moves up one octave. So F Major is
F3 A3 C4 and B Diminished is B3 D4 F4.
*/

/// Octave the root of every triad is voiced in.
pub const BASE_OCTAVE: i8 = 3;

/// Scale steps from the root to the third.
const THIRD_STEPS: usize = 2;
/// Scale steps from the root to the fifth.
const FIFTH_STEPS: usize = 4;

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    pub fn label(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diatonic triad bound to one scale degree.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    /// Roman numeral, e.g. `IV` or `vii°`.
    pub numeral: &'static str,
    /// Display name, e.g. `F Major`.
    pub name: &'static str,
    pub quality: ChordQuality,
    pub root: NoteName,
    /// Root, third, fifth in ascending order.
    pub pitches: [Pitch; 3],
}

impl Chord {
    const fn diatonic(
        numeral: &'static str,
        name: &'static str,
        quality: ChordQuality,
        degree: usize,
    ) -> Self {
        Self {
            numeral,
            name,
            quality,
            root: NoteName::from_index(degree),
            pitches: build_triad(degree, quality),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.numeral)
    }
}

/// Scale note `steps` above `root_index`, bumped an octave if it wrapped.
const fn scale_tone(root_index: usize, steps: usize) -> Pitch {
    let index = (root_index + steps) % SCALE_LEN;
    let octave = if index < root_index {
        BASE_OCTAVE + 1
    } else {
        BASE_OCTAVE
    };
    Pitch::new(NoteName::from_index(index), octave)
}

/// Build the triad on scale degree `root_index` (0 = C .. 6 = B).
///
/// `root_index` wraps modulo 7. The quality does not change which notes are
/// chosen; it is accepted so callers state the chord they expect.
pub const fn build_triad(root_index: usize, _quality: ChordQuality) -> [Pitch; 3] {
    let root_index = root_index % SCALE_LEN;
    [
        Pitch::new(NoteName::from_index(root_index), BASE_OCTAVE),
        scale_tone(root_index, THIRD_STEPS),
        scale_tone(root_index, FIFTH_STEPS),
    ]
}

/// The seven chords of C major, indexed by scale degree (key 1 is index 0).
pub static DIATONIC_CHORDS: [Chord; SCALE_LEN] = [
    Chord::diatonic("I", "C Major", ChordQuality::Major, 0),
    Chord::diatonic("ii", "D Minor", ChordQuality::Minor, 1),
    Chord::diatonic("iii", "E Minor", ChordQuality::Minor, 2),
    Chord::diatonic("IV", "F Major", ChordQuality::Major, 3),
    Chord::diatonic("V", "G Major", ChordQuality::Major, 4),
    Chord::diatonic("vi", "A Minor", ChordQuality::Minor, 5),
    Chord::diatonic("vii°", "B Diminished", ChordQuality::Diminished, 6),
];

/// A validated key identity in `1..=7`.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordKey(u8);

impl ChordKey {
    pub const ALL: [ChordKey; SCALE_LEN] = [
        ChordKey(1),
        ChordKey(2),
        ChordKey(3),
        ChordKey(4),
        ChordKey(5),
        ChordKey(6),
        ChordKey(7),
    ];

    /// Returns `None` for anything outside `1..=7`.
    pub fn new(key: i32) -> Option<Self> {
        (1..=SCALE_LEN as i32)
            .contains(&key)
            .then_some(Self(key as u8))
    }

    /// Map a typed character ('1'..'7') to its key.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|digit| Self::new(digit as i32))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn chord(self) -> &'static Chord {
        &DIATONIC_CHORDS[(self.0 - 1) as usize]
    }
}

impl fmt::Display for ChordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Look up the chord for a key identity; `None` for anything but 1..=7.
pub fn chord_by_key(key: i32) -> Option<&'static Chord> {
    ChordKey::new(key).map(ChordKey::chord)
}
