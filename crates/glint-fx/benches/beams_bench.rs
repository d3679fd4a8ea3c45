//! Benchmarks for the beams effect tick and render paths.
//!
//! Performance budgets at 20 ticks per second:
//! - update: well under 1ms for a 120x30 banner
//! - render (ANSI): under 5ms for 120x30
//!
//! Run with: cargo bench -p glint-fx --bench beams_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glint_fx::BeamsEffect;
use std::hint::black_box;

const BANNER: &str = "
  ____ _     ___ _   _ _____
 / ___| |   |_ _| \\ | |_   _|
| |  _| |    | ||  \\| | | |
| |_| | |___ | || |\\  | | |
 \\____|_____|___|_| \\_| |_|";

// =============================================================================
// Tick
// =============================================================================

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("beams/update");

    for (w, h) in [(40u16, 8u16), (80, 24), (120, 30)] {
        let mut fx = BeamsEffect::with_seed(w, h, BANNER, 7);
        group.throughput(Throughput::Elements(fx.characters().len() as u64));
        group.bench_with_input(
            BenchmarkId::new("tick", format!("{w}x{h}")),
            &(),
            |b, _| {
                b.iter(|| {
                    fx.update();
                    black_box(fx.phase());
                })
            },
        );
    }

    group.finish();
}

// =============================================================================
// Render
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("beams/render");

    for (w, h) in [(40u16, 8u16), (80, 24), (120, 30)] {
        let mut fx = BeamsEffect::with_seed(w, h, BANNER, 7);
        // Mid-beams, so the frame has a mix of lit, fading and hidden cells.
        for _ in 0..30 {
            fx.update();
        }
        group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));
        group.bench_with_input(
            BenchmarkId::new("frame", format!("{w}x{h}")),
            &fx,
            |b, fx| b.iter(|| black_box(fx.render_frame())),
        );
        group.bench_with_input(
            BenchmarkId::new("ansi", format!("{w}x{h}")),
            &fx,
            |b, fx| b.iter(|| black_box(fx.render())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_render);
criterion_main!(benches);
