//! Benchmarks for the chord patch envelope.
//!
//! Uses the default `SynthConfig` shape: short attack, no decay, full
//! sustain, 0.3 s release. Attack and release states are rebuilt per
//! iteration so every measurement sees the same stage.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use echord::dsp::Envelope;
use echord::graph::node::RenderCtx;
use echord::SynthConfig;

use crate::BLOCK_SIZES;

fn patch_envelope(config: &SynthConfig) -> Envelope {
    Envelope::adsr(config.attack, config.decay, config.sustain, config.release)
}

/// Envelope `samples` into its attack.
fn pressed(config: &SynthConfig, ctx: &RenderCtx, samples: usize) -> Envelope {
    let mut env = patch_envelope(config);
    env.note_on();
    for _ in 0..samples {
        env.next_sample(ctx);
    }
    env
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let config = SynthConfig::default();
    let ctx = RenderCtx::from_note(48_000.0, 48, config.velocity as f32);
    let attack_samples = (config.attack * ctx.sample_rate) as usize;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Key just went down
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter_batched(
                || pressed(&config, &ctx, 0),
                |mut env| env.render(black_box(&mut buffer), black_box(&ctx)),
                BatchSize::SmallInput,
            )
        });

        // Chord held: decay 0 and sustain 1.0 means a flat line at full level
        let mut held = pressed(&config, &ctx, attack_samples + 8);
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                held.render(black_box(&mut buffer), black_box(&ctx));
            })
        });

        // Key up after sustain reached
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let mut env = pressed(&config, &ctx, attack_samples + 8);
                    env.note_off(&ctx);
                    env
                },
                |mut env| env.render(black_box(&mut buffer), black_box(&ctx)),
                BatchSize::SmallInput,
            )
        });

        // Quick tap: released halfway up, fading from that snapshot level
        group.bench_with_input(BenchmarkId::new("tap_release", size), &size, |b, _| {
            b.iter_batched(
                || {
                    let mut env = pressed(&config, &ctx, attack_samples / 2);
                    env.note_off(&ctx);
                    env
                },
                |mut env| env.render(black_box(&mut buffer), black_box(&ctx)),
                BatchSize::SmallInput,
            )
        });

        // Key pressed again while the previous chord is still fading
        let mut retrigger = pressed(&config, &ctx, attack_samples + 8);
        retrigger.note_off(&ctx);
        group.bench_with_input(BenchmarkId::new("retrigger", size), &size, |b, _| {
            b.iter(|| {
                retrigger.note_on();
                retrigger.render(black_box(&mut buffer), black_box(&ctx));
                retrigger.note_off(&ctx);
            })
        });
    }

    group.finish();
}
