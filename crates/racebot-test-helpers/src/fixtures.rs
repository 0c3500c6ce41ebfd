//! Sensor fixtures shared by the controller and driver tests.

const FAN_SIZE: usize = 19;

/// Wheel spin (rad/s) that produces the given slip at `speed` (m/s).
///
/// # Example
///
/// ```rust
/// use racebot_test_helpers::fixtures::wheel_spin_for;
///
/// let spin = wheel_spin_for(20.0, 1.0, 0.4836);
/// assert!(spin.iter().all(|w| w.abs() < f32::EPSILON));
/// ```
pub fn wheel_spin_for(speed: f32, slip: f32, radius: f32) -> [f32; 4] {
    [speed * (1.0 - slip) / radius; 4]
}

/// A fan where every range finder reads `distance`.
pub fn uniform_fan(distance: f32) -> [f32; FAN_SIZE] {
    [distance; FAN_SIZE]
}

/// A fan reading `base` everywhere except `peak` at `index`.
///
/// Out-of-range indices leave the fan uniform.
pub fn fan_with_peak(base: f32, index: usize, peak: f32) -> [f32; FAN_SIZE] {
    let mut fan = uniform_fan(base);
    if let Some(slot) = fan.get_mut(index) {
        *slot = peak;
    }
    fan
}
