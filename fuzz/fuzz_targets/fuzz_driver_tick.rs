//! Fuzzes the driver tick path with arbitrary sensor frames.
//!
//! Every 4-byte chunk of the input becomes one `f32` sensor reading, so NaN,
//! infinities and subnormals all reach the selector, the policies and each
//! ABS variant. The emitted command must always be in range.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_driver_tick

#![no_main]

use libfuzzer_sys::fuzz_target;
use racebot_driver::prelude::*;

/// Floats consumed per frame: 10 scalars, 19 range finders, 4 wheels.
const FLOATS_PER_FRAME: usize = 10 + TRACK_SENSORS + 4;

fn frame_from(floats: &[f32]) -> Option<SensorFrame> {
    let (scalars, rest) = floats.split_at_checked(10)?;
    let (track, wheels) = rest.split_at_checked(TRACK_SENSORS)?;
    let &[speed_x, speed_y, angle, track_pos, rpm, gear, dist_raced, damage, lap, _] = scalars
    else {
        return None;
    };
    Some(SensorFrame {
        speed_x,
        speed_y,
        angle,
        track_pos,
        track: track.try_into().ok()?,
        wheel_spin: wheels.get(..4)?.try_into().ok()?,
        rpm,
        gear: gear.to_bits() as i32,
        dist_raced,
        damage,
        cur_lap_time: lap,
    })
}

fuzz_target!(|data: &[u8]| {
    let Some((&selector, body)) = data.split_first() else {
        return;
    };
    let abs = match selector % 4 {
        0 => AbsConfig::Disabled,
        1 => AbsConfig::Threshold(ThresholdState::default()),
        2 => AbsConfig::Pid(PidGains::default()),
        _ => AbsConfig::Npid(NpidGains::default()),
    };
    let Ok(mut driver) = Driver::new(DriverConfig::default().with_abs(abs)) else {
        return;
    };
    if selector & 0x80 != 0 {
        driver.observe_surface(if selector & 0x40 != 0 { "DIRT" } else { "ROAD" });
    }

    let floats: Vec<f32> = body
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    for chunk in floats.chunks_exact(FLOATS_PER_FRAME) {
        if let Some(frame) = frame_from(chunk) {
            let cmd = driver.tick(&frame);
            assert!(cmd.is_valid(), "{cmd:?} from {frame:?}");
        }
    }
    let _ = driver.shutdown();
});
