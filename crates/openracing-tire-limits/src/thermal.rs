//! Tire surface temperature update.
//!
//! One explicit Euler step: frictional heating proportional to force times
//! sliding speed, Newtonian cooling towards ambient.

/// Heating per unit of `(|Fx| + |Fy|) · speed` (°C / (N·m)).
pub const HEAT_GAIN: f64 = 0.0005;

/// Fraction of the excess over ambient shed per second.
pub const COOLING_RATE: f64 = 0.01;

/// Temperature after `dt` seconds.
///
/// The result is not clamped; callers re-validate the updated
/// [`TireState`](crate::TireState) before the next evaluation.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::thermal::next_temperature;
///
/// let t = next_temperature(80.0, 30.0, 2000.0, 1500.0, 25.0, 1.0);
/// assert!((t - 131.95).abs() < 1e-9);
/// ```
pub fn next_temperature(
    temperature: f64,
    speed: f64,
    fx: f64,
    fy: f64,
    ambient: f64,
    dt: f64,
) -> f64 {
    let heating = HEAT_GAIN * (fx.abs() + fy.abs()) * speed.abs();
    let cooling = COOLING_RATE * (temperature - ambient);
    temperature + (heating - cooling) * dt
}
