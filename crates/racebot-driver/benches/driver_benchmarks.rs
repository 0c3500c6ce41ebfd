//! Driver Benchmarks
//!
//! Criterion benchmarks for a full tick and for the mode selector alone.

use criterion::{Criterion, criterion_group, criterion_main};
use racebot_driver::prelude::*;
use racebot_test_helpers::prelude::*;

fn cornering_frame() -> SensorFrame {
    SensorFrame::builder()
        .speed_x(62.0)
        .speed_y(1.5)
        .angle(0.05)
        .track_pos(-0.2)
        .track(fan_with_peak(35.0, 12, 120.0))
        .wheel_spin([120.0, 121.0, 118.0, 119.5])
        .rpm(7200.0)
        .gear(4)
        .dist_raced(1_500.0)
        .build()
}

fn bench_tick(c: &mut Criterion) {
    let frame = cornering_frame();
    for abs in [
        AbsConfig::Disabled,
        AbsConfig::Pid(PidGains::default()),
        AbsConfig::Npid(NpidGains::default()),
    ] {
        let mut driver = must(Driver::new(DriverConfig::default().with_abs(abs)));
        let name = format!("driver_tick_{}", abs.build().kind());
        c.bench_function(&name, |b| b.iter(|| driver.tick(std::hint::black_box(&frame))));
    }
}

fn bench_selector(c: &mut Criterion) {
    let frame = cornering_frame();
    let params = StuckParams::default();
    let mut selector = ModeSelector::new();

    c.bench_function("mode_selector_update", |b| {
        b.iter(|| selector.update(std::hint::black_box(&frame), &params, 0))
    });
}

criterion_group!(benches, bench_tick, bench_selector);
criterion_main!(benches);
