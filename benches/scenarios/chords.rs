//! Benchmarks for the polyphonic synth with chords held.
//!
//! Each chord is three voices, so "3_chords" mixes nine oscillators. Voices
//! are started once and stay at sustain for the whole run.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use echord::synth::{factory::VoiceFactory, patch, PolySynth, SynthMessage, TimedMessage};
use echord::{ChordKey, SynthConfig};
use rtrb::RingBuffer;

use crate::BLOCK_SIZES;

/// A synth with `keys` held from frame 0.
fn synth_holding(keys: &[i32]) -> PolySynth<impl VoiceFactory> {
    let config = SynthConfig::default();
    let (mut tx, rx) = RingBuffer::new(64);
    for key in keys.iter().filter_map(|&k| ChordKey::new(k)) {
        for pitch in key.chord().pitches {
            let _ = tx.push(TimedMessage::immediate(SynthMessage::NoteOn {
                group: key.number(),
                note: pitch.midi_note(),
                velocity: config.velocity,
            }));
        }
    }
    // Producer dropped; the queued messages stay readable.
    PolySynth::new(48_000.0, config.max_polyphony, patch::voice_factory(config), rx)
}

pub fn bench_chords(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chords");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Idle pool: cost of walking free voices
        let mut idle = synth_holding(&[]);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render_block(black_box(&mut buffer));
            })
        });

        // One chord (I)
        let mut single = synth_holding(&[1]);
        group.bench_with_input(BenchmarkId::new("1_chord", size), &size, |b, _| {
            b.iter(|| {
                single.render_block(black_box(&mut buffer));
            })
        });

        // I + IV + V held together
        let mut triple = synth_holding(&[1, 4, 5]);
        group.bench_with_input(BenchmarkId::new("3_chords", size), &size, |b, _| {
            b.iter(|| {
                triple.render_block(black_box(&mut buffer));
            })
        });

        // All seven keys: 21 of the default 32 voices
        let mut all = synth_holding(&[1, 2, 3, 4, 5, 6, 7]);
        group.bench_with_input(BenchmarkId::new("7_chords", size), &size, |b, _| {
            b.iter(|| {
                all.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
