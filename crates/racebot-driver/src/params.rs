//! Per-mode tunable parameters and the ROAD/DIRT presets.
//!
//! The presets are fixed values tuned offline. They are data here, never
//! derived at runtime.

use racebot_errors::ValidationError;
use racebot_errors::validation::{check_finite, check_range};
use serde::{Deserialize, Serialize};

/// Parameters of the InsideTrack policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsideTrackParams {
    /// Gear engaged when the car reports neutral or reverse
    pub start_gear: i32,
    /// First gear of the high band
    pub low_gear_limit: i32,
    /// Downshift threshold inside the low band
    pub low_rpm: f32,
    /// Downshift threshold inside the high band
    pub average_rpm: f32,
    /// Upshift threshold
    pub high_rpm: f32,
    /// Target speed with no clearance ahead
    pub base_speed: f32,
    /// Target speed gained per unit of clearance
    pub speed_factor: f32,
}

impl Default for InsideTrackParams {
    fn default() -> Self {
        Self {
            start_gear: 1,
            low_gear_limit: 4,
            low_rpm: 1500.0,
            average_rpm: 4000.0,
            high_rpm: 9000.0,
            base_speed: 83.0,
            speed_factor: 1.4,
        }
    }
}

impl InsideTrackParams {
    /// Check ranges and rpm ordering.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=6).contains(&self.start_gear) {
            return Err(ValidationError::out_of_range(
                "inside_track.start_gear",
                self.start_gear,
                1,
                6,
            ));
        }
        if !(1..=7).contains(&self.low_gear_limit) {
            return Err(ValidationError::out_of_range(
                "inside_track.low_gear_limit",
                self.low_gear_limit,
                1,
                7,
            ));
        }
        check_range("inside_track.low_rpm", self.low_rpm, 0.0, 30_000.0)?;
        check_range("inside_track.average_rpm", self.average_rpm, 0.0, 30_000.0)?;
        check_range("inside_track.high_rpm", self.high_rpm, 0.0, 30_000.0)?;
        if self.low_rpm >= self.high_rpm || self.average_rpm >= self.high_rpm {
            return Err(ValidationError::constraint(
                "inside_track: low_rpm and average_rpm must be below high_rpm",
            ));
        }
        check_range("inside_track.base_speed", self.base_speed, 0.0, 1_000.0)?;
        check_range("inside_track.speed_factor", self.speed_factor, 0.0, 100.0)
    }
}

/// Parameters of the OutOfTrack policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutOfTrackParams {
    /// Lateral speed above which a light brake is applied
    pub max_skidding: f32,
    /// Throttle lost per unit of lateral speed
    pub negative_accel_percent: f32,
    /// At or above this speed the reported gear is kept
    pub velocity_gear_4: f32,
    /// At or above this speed third gear is used
    pub velocity_gear_3: f32,
    /// At or above this speed second gear is used
    pub velocity_gear_2: f32,
    /// Heading beyond which the car steers back toward the track
    pub max_return_angle: f32,
    /// Heading below which the car steers away from the edge
    pub min_return_angle: f32,
}

impl Default for OutOfTrackParams {
    fn default() -> Self {
        Self {
            max_skidding: 3.0,
            negative_accel_percent: 0.1,
            velocity_gear_4: 90.0,
            velocity_gear_3: 70.0,
            velocity_gear_2: 40.0,
            max_return_angle: 0.7,
            min_return_angle: 0.5,
        }
    }
}

impl OutOfTrackParams {
    /// Check that every field is finite and non-negative.
    ///
    /// Gear thresholds and return angles are not required to be ordered; the
    /// tuned presets do not order them.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("out_of_track.max_skidding", self.max_skidding, 0.0, 1_000.0)?;
        check_range(
            "out_of_track.negative_accel_percent",
            self.negative_accel_percent,
            0.0,
            10.0,
        )?;
        check_range("out_of_track.velocity_gear_4", self.velocity_gear_4, 0.0, 1_000.0)?;
        check_range("out_of_track.velocity_gear_3", self.velocity_gear_3, 0.0, 1_000.0)?;
        check_range("out_of_track.velocity_gear_2", self.velocity_gear_2, 0.0, 1_000.0)?;
        check_finite("out_of_track.max_return_angle", self.max_return_angle)?;
        check_finite("out_of_track.min_return_angle", self.min_return_angle)
    }
}

/// Parameters of stuck detection and the Stuck policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StuckParams {
    /// Speeds below this count as slow
    pub stuck_speed: f32,
    /// No stuck detection before this distance has been raced
    pub min_distance_raced: f32,
    /// Escape valve: ticks in Stuck after which control is handed back
    pub max_ticks_stuck: u32,
    /// Consecutive slow ticks needed to declare the car stuck
    pub max_ticks_in_slow_speed: u32,
}

impl Default for StuckParams {
    fn default() -> Self {
        Self {
            stuck_speed: 5.0,
            min_distance_raced: 100.0,
            max_ticks_stuck: 300,
            max_ticks_in_slow_speed: 50,
        }
    }
}

impl StuckParams {
    /// Check ranges.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("stuck.stuck_speed", self.stuck_speed, 0.0, 100.0)?;
        check_range("stuck.min_distance_raced", self.min_distance_raced, 0.0, 1.0e7)?;
        if self.max_ticks_stuck == 0 {
            return Err(ValidationError::out_of_range(
                "stuck.max_ticks_stuck",
                0,
                1,
                u32::MAX,
            ));
        }
        Ok(())
    }
}

/// A full bundle of mode parameters, swapped atomically between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// InsideTrack parameters
    pub inside_track: InsideTrackParams,
    /// OutOfTrack parameters
    pub out_of_track: OutOfTrackParams,
    /// Stuck parameters
    pub stuck: StuckParams,
}

impl ParameterSet {
    /// Hand-tuned defaults used until a surface has been recognized.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Preset tuned for asphalt tracks.
    pub fn road() -> Self {
        Self {
            inside_track: InsideTrackParams {
                start_gear: 1,
                low_gear_limit: 2,
                low_rpm: 6956.0,
                average_rpm: 3728.0,
                high_rpm: 9411.0,
                base_speed: 84.131,
                speed_factor: 0.973_418,
            },
            out_of_track: OutOfTrackParams {
                max_skidding: 32.0151,
                negative_accel_percent: 0.146_842,
                velocity_gear_4: 165.0,
                velocity_gear_3: 129.0,
                velocity_gear_2: 368.0,
                max_return_angle: 0.159_876,
                min_return_angle: 0.083_912_9,
            },
            stuck: StuckParams::default(),
        }
    }

    /// Preset tuned for dirt tracks.
    pub fn dirt() -> Self {
        Self {
            inside_track: InsideTrackParams {
                start_gear: 1,
                low_gear_limit: 4,
                low_rpm: 1796.0,
                average_rpm: 1857.0,
                high_rpm: 4340.0,
                base_speed: 94.5951,
                speed_factor: 0.962_757,
            },
            out_of_track: OutOfTrackParams {
                max_skidding: 395.807,
                negative_accel_percent: 0.043_957_7,
                velocity_gear_4: 114.0,
                velocity_gear_3: 113.0,
                velocity_gear_2: 251.0,
                max_return_angle: 0.075_342_6,
                min_return_angle: 0.534_217,
            },
            stuck: StuckParams::default(),
        }
    }

    /// Validate every mode's parameters.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.inside_track.validate()?;
        self.out_of_track.validate()?;
        self.stuck.validate()
    }
}
