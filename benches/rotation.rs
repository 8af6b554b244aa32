//! Benchmarks for the rotation engine.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use twister::controller::{NamedMove, RotationController};
use twister::facelets::format_faces;
use twister::store::CubeStore;

const FRAME: Duration = Duration::from_micros(16_667);

/// Benchmark one animated quarter turn, from request to snap.
fn bench_quarter_turn(c: &mut Criterion) {
    c.bench_function("quarter_turn", |b| {
        let mut controller = RotationController::default();
        b.iter(|| {
            controller.request_move(black_box(NamedMove::RightCw));
            controller.tick_until_idle(FRAME);
        })
    });
}

/// Benchmark turning every face four times.
fn bench_full_cycles(c: &mut Criterion) {
    c.bench_function("four_turns_per_face", |b| {
        b.iter(|| {
            let mut controller = RotationController::default();
            for named in NamedMove::ALL.into_iter().step_by(2) {
                for _ in 0..4 {
                    controller.request_move(named);
                    controller.tick_until_idle(FRAME);
                }
            }
            controller
        })
    });
}

/// Benchmark creating the 27 cubelets.
fn bench_initialize(c: &mut Criterion) {
    c.bench_function("initialize", |b| b.iter(CubeStore::initialize));
}

/// Benchmark formatting the faces for display.
fn bench_format_faces(c: &mut Criterion) {
    let store = CubeStore::initialize();
    c.bench_function("format_faces", |b| b.iter(|| format_faces(black_box(&store))));
}

criterion_group!(
    benches,
    bench_quarter_turn,
    bench_full_cycles,
    bench_initialize,
    bench_format_faces
);
criterion_main!(benches);
