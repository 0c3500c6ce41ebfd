//! ABS Benchmarks
//!
//! Criterion benchmarks for each controller's per-tick cost.

use criterion::{Criterion, criterion_group, criterion_main};
use racebot_abs::prelude::*;

fn braking_input() -> AbsInput {
    AbsInput::new(25.0, [40.0, 41.0, 38.5, 39.0], 0.3)
}

fn bench_threshold(c: &mut Criterion) {
    let state = ThresholdState::default();
    let input = braking_input();

    c.bench_function("threshold_abs", |b| {
        b.iter(|| threshold_abs(std::hint::black_box(&input), std::hint::black_box(&state)))
    });
}

fn bench_pid(c: &mut Criterion) {
    let mut state = PidState::default();
    let input = braking_input();

    c.bench_function("pid_abs", |b| {
        b.iter(|| pid_abs(std::hint::black_box(&input), std::hint::black_box(&mut state)))
    });
}

fn bench_npid(c: &mut Criterion) {
    let mut state = NpidState::default();
    let input = braking_input();

    c.bench_function("npid_abs", |b| {
        b.iter(|| npid_abs(std::hint::black_box(&input), std::hint::black_box(&mut state)))
    });
}

fn bench_controller_dispatch(c: &mut Criterion) {
    let mut abs = AbsController::Npid(NpidState::default());
    let input = braking_input();

    c.bench_function("abs_controller_apply", |b| {
        b.iter(|| abs.apply(std::hint::black_box(&input)))
    });
}

criterion_group!(benches, bench_threshold, bench_pid, bench_npid, bench_controller_dispatch);
criterion_main!(benches);
