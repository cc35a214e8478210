//! The chord voice: oscillator → ADSR envelope → gain.

use crate::{
    config::SynthConfig,
    graph::{envelope::EnvNode, extensions::NodeExt, node::GraphNode, oscillator::OscNode},
    synth::factory::VoiceFactory,
};

/// One voice of the chord patch described by `config`.
pub fn chord_voice(config: &SynthConfig) -> impl GraphNode {
    OscNode::new(config.waveform)
        .amplify(EnvNode::adsr(
            config.attack,
            config.decay,
            config.sustain,
            config.release,
        ))
        .gain(config.voice_gain())
}

/// Factory handing out `chord_voice`s for a `PolySynth` pool.
pub fn voice_factory(config: SynthConfig) -> impl VoiceFactory {
    move || chord_voice(&config)
}
