//! Per-tick sensor snapshot.

use core::f32::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Number of range finders in the track sensor fan.
pub const TRACK_SENSORS: usize = 19;

/// Index of the range finder pointing along the car axis (0°).
pub const FORWARD_SENSOR: usize = 9;

/// Angular spacing between neighbouring range finders (10°).
pub const SENSOR_SPACING: f32 = PI / 18.0;

/// Angle of range finder `index` relative to the car axis, in radians.
///
/// Index 0 is −90°, index 9 is 0° and index 18 is +90°.
#[expect(clippy::cast_precision_loss, reason = "sensor indices are below 19")]
pub fn sensor_angle(index: usize) -> f32 {
    -FRAC_PI_2 + index as f32 * SENSOR_SPACING
}

/// Everything the car perceives during one tick.
///
/// Produced by the simulator boundary, read-only for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorFrame {
    /// Longitudinal speed
    pub speed_x: f32,
    /// Lateral speed
    pub speed_y: f32,
    /// Angle between the car axis and the track tangent, in (−π, π]
    pub angle: f32,
    /// Signed lateral position, 0 on the centerline, |pos| > 1 off track
    pub track_pos: f32,
    /// Range finder distances, index 0 at −90° through index 18 at +90°
    pub track: [f32; TRACK_SENSORS],
    /// Wheel angular velocities in rad/s
    pub wheel_spin: [f32; 4],
    /// Engine speed
    pub rpm: f32,
    /// Gear currently engaged, −1 reverse, 0 neutral
    pub gear: i32,
    /// Distance covered since the start of the race
    pub dist_raced: f32,
    /// Accumulated damage
    pub damage: f32,
    /// Time into the current lap, in seconds
    pub cur_lap_time: f32,
}

impl SensorFrame {
    /// Start building a frame from all-zero readings.
    pub fn builder() -> SensorFrameBuilder {
        SensorFrameBuilder::default()
    }

    /// Reading of range finder `index`, 0 when the index is out of range.
    #[inline]
    pub fn track_sensor(&self, index: usize) -> f32 {
        self.track.get(index).copied().unwrap_or(0.0)
    }

    /// Reading of the range finder pointing straight ahead.
    #[inline]
    pub fn forward(&self) -> f32 {
        self.track_sensor(FORWARD_SENSOR)
    }

    /// Whether the car is within the track edges, `track_pos` in (−1, 1).
    #[inline]
    pub fn is_on_track(&self) -> bool {
        self.track_pos > -1.0 && self.track_pos < 1.0
    }
}

/// Builder for [`SensorFrame`], used by the ingestion boundary and tests.
///
/// # Example
///
/// ```
/// use racebot_driver::SensorFrame;
///
/// let frame = SensorFrame::builder()
///     .speed_x(20.0)
///     .track([50.0; 19])
///     .dist_raced(120.0)
///     .build();
/// assert!(frame.is_on_track());
/// assert!((frame.forward() - 50.0).abs() < f32::EPSILON);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SensorFrameBuilder {
    frame: SensorFrame,
}

impl SensorFrameBuilder {
    /// Longitudinal speed.
    pub fn speed_x(mut self, v: f32) -> Self {
        self.frame.speed_x = v;
        self
    }

    /// Lateral speed.
    pub fn speed_y(mut self, v: f32) -> Self {
        self.frame.speed_y = v;
        self
    }

    /// Heading angle relative to the track axis.
    pub fn angle(mut self, a: f32) -> Self {
        self.frame.angle = a;
        self
    }

    /// Signed lateral track position.
    pub fn track_pos(mut self, p: f32) -> Self {
        self.frame.track_pos = p;
        self
    }

    /// All 19 range finder readings.
    pub fn track(mut self, track: [f32; TRACK_SENSORS]) -> Self {
        self.frame.track = track;
        self
    }

    /// Wheel angular velocities.
    pub fn wheel_spin(mut self, spin: [f32; 4]) -> Self {
        self.frame.wheel_spin = spin;
        self
    }

    /// Engine rpm.
    pub fn rpm(mut self, rpm: f32) -> Self {
        self.frame.rpm = rpm;
        self
    }

    /// Engaged gear.
    pub fn gear(mut self, gear: i32) -> Self {
        self.frame.gear = gear;
        self
    }

    /// Cumulative distance raced.
    pub fn dist_raced(mut self, d: f32) -> Self {
        self.frame.dist_raced = d;
        self
    }

    /// Accumulated damage.
    pub fn damage(mut self, d: f32) -> Self {
        self.frame.damage = d;
        self
    }

    /// Current lap time.
    pub fn cur_lap_time(mut self, t: f32) -> Self {
        self.frame.cur_lap_time = t;
        self
    }

    /// Finish the frame.
    pub fn build(self) -> SensorFrame {
        self.frame
    }
}
