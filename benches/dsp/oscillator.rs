//! Benchmarks for band-limited oscillators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use echord::dsp::{OscillatorBlock, Waveform};
use echord::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    // C3, the lowest root any chord uses
    let ctx = RenderCtx::from_note(48_000.0, 48, 100.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sawtooth and square pay for PolyBLEP corrections; sine and
        // triangle are computed directly
        for waveform in [
            Waveform::Sine,
            Waveform::Sawtooth,
            Waveform::Square,
            Waveform::Triangle,
        ] {
            let mut osc = OscillatorBlock::new(waveform);
            group.bench_with_input(BenchmarkId::new(waveform.label(), size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }
    }

    group.finish();
}
