//! Actuator command emitted once per tick.

use serde::{Deserialize, Serialize};

/// Highest forward gear the car accepts.
pub const MAX_GEAR: i32 = 6;

/// Reverse gear.
pub const REVERSE_GEAR: i32 = -1;

/// Pedal, steering and gearbox command for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActuatorCommand {
    /// Throttle in `[0, 1]`
    pub accel: f32,
    /// Brake in `[0, 1]`
    pub brake: f32,
    /// Steering in `[-1, 1]`, positive turns left
    pub steer: f32,
    /// Gear in `{-1, 0, 1..=6}`
    pub gear: i32,
    /// Clutch in `[0, 1]`
    pub clutch: f32,
}

fn unit(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

impl ActuatorCommand {
    /// Force every field into its legal range.
    ///
    /// Non-finite pedal and steering values become 0.
    ///
    /// # Example
    ///
    /// ```
    /// use racebot_driver::ActuatorCommand;
    ///
    /// let cmd = ActuatorCommand { accel: -0.4, steer: 2.0, gear: 9, ..Default::default() }.clamped();
    /// assert!(cmd.accel.abs() < f32::EPSILON);
    /// assert!((cmd.steer - 1.0).abs() < f32::EPSILON);
    /// assert_eq!(cmd.gear, 6);
    /// ```
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            accel: unit(self.accel),
            brake: unit(self.brake),
            steer: if self.steer.is_finite() {
                self.steer.clamp(-1.0, 1.0)
            } else {
                0.0
            },
            gear: self.gear.clamp(REVERSE_GEAR, MAX_GEAR),
            clutch: unit(self.clutch),
        }
    }

    /// Whether every field is already within its legal range.
    pub fn is_valid(&self) -> bool {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        in_unit(self.accel)
            && in_unit(self.brake)
            && in_unit(self.clutch)
            && (-1.0..=1.0).contains(&self.steer)
            && (REVERSE_GEAR..=MAX_GEAR).contains(&self.gear)
    }
}
