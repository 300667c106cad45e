//! Benchmarks for the per-frame displacement pass.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wavefield::{DisplacementEngine, ParticleSet, Strategy};

fn bench_displacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("displacement");

    for count in [50_000usize, 500_000] {
        let base = ParticleSet::random(count, 10.0, Some(1));

        for strategy in [Strategy::Sequential, Strategy::Parallel] {
            let engine = DisplacementEngine::new(strategy);
            let mut set = base.clone();
            let mut t = 0.0f32;
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), count),
                &count,
                |b, _| {
                    b.iter(|| {
                        t += 1.0 / 60.0;
                        engine.update(black_box(t), &mut set);
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_upload_signal(c: &mut Criterion) {
    let mut set = ParticleSet::random(50_000, 10.0, Some(2));
    let engine = DisplacementEngine::new(Strategy::Parallel);

    c.bench_function("update_then_take_dirty_50k", |b| {
        b.iter(|| {
            engine.update(black_box(1.5), &mut set);
            black_box(set.take_dirty())
        })
    });
}

criterion_group!(benches, bench_displacement, bench_upload_signal);
criterion_main!(benches);
