/// Note events for the polyphonic synth.
///
/// `group` tags every voice with the chord key that started it, so releasing
/// one key never silences a shared pitch held by another key.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    NoteOn { group: u8, note: u8, velocity: u8 },
    NoteOff { group: u8, note: u8 },
}

/// A message stamped with the absolute output frame it takes effect at.
///
/// Frames at or before the synth's current position apply at the start of
/// the next block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimedMessage {
    pub frame: u64,
    pub message: SynthMessage,
}

impl TimedMessage {
    pub fn new(frame: u64, message: SynthMessage) -> Self {
        Self { frame, message }
    }

    /// Take effect as soon as the synth sees it.
    pub fn immediate(message: SynthMessage) -> Self {
        Self { frame: 0, message }
    }
}
