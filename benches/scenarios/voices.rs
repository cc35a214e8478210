//! Benchmarks for a single chord voice (oscillator → envelope → gain).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use echord::dsp::Waveform;
use echord::graph::node::{GraphNode, RenderCtx};
use echord::synth::patch;
use echord::SynthConfig;

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = RenderCtx::from_note(48_000.0, 52, 100.0); // E3

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Default patch: sawtooth held at sustain
        let config = SynthConfig::default();
        let mut saw = patch::chord_voice(&config);
        saw.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                saw.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Cheapest waveform for comparison
        let config = SynthConfig::default().with_waveform(Waveform::Sine);
        let mut sine = patch::chord_voice(&config);
        sine.note_on(&ctx);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                sine.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
