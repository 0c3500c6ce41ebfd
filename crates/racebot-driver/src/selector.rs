//! Mode selector state machine.
//!
//! Runs once per tick, before any policy. The only memory it keeps is the
//! low-speed counter, the elapsed-ticks-in-Stuck counter and the track
//! position captured when the current stuck episode began.

use core::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::frame::{FORWARD_SENSOR, SensorFrame};
use crate::params::StuckParams;
use crate::policy::DrivingMode;

/// Conservative "pointing back toward the track" predicate.
///
/// Deliberately partial: most position/heading pairs return `false`.
///
/// ```
/// use racebot_driver::selector::right_way;
///
/// assert!(right_way(0.5, 0.3));
/// assert!(!right_way(0.5, -0.3));
/// assert!(!right_way(0.0, 0.0));
/// ```
pub fn right_way(track_pos: f32, angle: f32) -> bool {
    (track_pos < 0.0 && angle > -FRAC_PI_2 && angle < 0.0)
        || (track_pos > 0.0 && angle < FRAC_PI_2 && angle > 0.0)
        || (track_pos > 1.0 && angle > 0.0)
        || (track_pos < -1.0 && angle < 0.0)
}

/// InsideTrack or OutOfTrack, ignoring stuck detection.
///
/// On track means `track_pos` in (−1, 1). Room ahead means the forward
/// sensor reads more than 0, or reads at least 0 and no less than both of
/// its ±10° neighbours.
pub fn track_mode(frame: &SensorFrame) -> DrivingMode {
    let center = frame.forward();
    let left = frame.track_sensor(FORWARD_SENSOR - 1);
    let right = frame.track_sensor(FORWARD_SENSOR + 1);
    let room_ahead = center > 0.0 || (center >= 0.0 && center >= left && center >= right);
    if frame.is_on_track() && room_ahead {
        DrivingMode::InsideTrack
    } else {
        DrivingMode::OutOfTrack
    }
}

/// A change of active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Mode active on the previous tick
    pub from: DrivingMode,
    /// Mode active from this tick on
    pub to: DrivingMode,
    /// Tick index at which the change happened
    pub tick: u64,
}

/// Hysteresis state deciding the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModeSelector {
    mode: DrivingMode,
    low_speed_ticks: u32,
    stuck_ticks: u32,
    stuck_reference: Option<f32>,
}

impl ModeSelector {
    /// Selector starting in InsideTrack with cleared counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active mode.
    pub fn mode(&self) -> DrivingMode {
        self.mode
    }

    /// Consecutive slow ticks counted so far.
    pub fn low_speed_ticks(&self) -> u32 {
        self.low_speed_ticks
    }

    /// Ticks spent in Stuck since entering it, 0 on the entry tick.
    pub fn stuck_ticks(&self) -> u32 {
        self.stuck_ticks
    }

    /// Track position captured on entering Stuck.
    pub fn stuck_reference(&self) -> Option<f32> {
        self.stuck_reference
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Evaluate this tick's frame and switch mode if needed.
    ///
    /// Returns the transition when the active mode changed.
    pub fn update(
        &mut self,
        frame: &SensorFrame,
        params: &StuckParams,
        tick: u64,
    ) -> Option<Transition> {
        let facing_right_way = right_way(frame.track_pos, frame.angle);

        if frame.speed_x < params.stuck_speed {
            self.low_speed_ticks = self.low_speed_ticks.saturating_add(1);
        } else {
            self.low_speed_ticks = 0;
        }
        if facing_right_way {
            self.low_speed_ticks = 0;
        }

        let next = if self.mode == DrivingMode::Stuck {
            self.stuck_ticks = self.stuck_ticks.saturating_add(1);
            if facing_right_way || self.stuck_ticks > params.max_ticks_stuck {
                self.low_speed_ticks = 0;
                self.stuck_ticks = 0;
                self.stuck_reference = None;
                track_mode(frame)
            } else {
                DrivingMode::Stuck
            }
        } else if self.low_speed_ticks > params.max_ticks_in_slow_speed
            && frame.dist_raced > params.min_distance_raced
        {
            self.stuck_ticks = 0;
            self.stuck_reference = Some(frame.track_pos);
            DrivingMode::Stuck
        } else {
            track_mode(frame)
        };

        let from = self.mode;
        self.mode = next;
        (from != next).then_some(Transition {
            from,
            to: next,
            tick,
        })
    }
}
