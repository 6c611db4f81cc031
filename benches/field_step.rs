//! Benchmark for the brute-force particle step at the population cap.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion};

use backdrop::field::{FieldParams, ParticleField};
use backdrop::Vec2;

fn field_step(c: &mut Criterion) {
    // A viewport large enough to hit the population cap.
    let mut field = ParticleField::new(20000.0, 20000.0, FieldParams::default());
    assert_eq!(field.particles().len(), 1024);

    c.bench_function("step_1024_particles", |b| {
        b.iter(|| field.step(Some(Vec2::new(10000.0, 10000.0))))
    });

    c.bench_function("links_1024_particles", |b| b.iter(|| field.links()));
}

criterion_group!(benches, field_step);
criterion_main!(benches);
