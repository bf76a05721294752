//! Tunable parameters of the limit checks.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Default cross-axis coupling of the combined-slip check.
pub const DEFAULT_COUPLING_FACTOR: f64 = 0.3;

/// Largest accepted coupling factor.
pub const MAX_COUPLING_FACTOR: f64 = 0.5;

/// Default ellipse usage above which a tire is reported as `Warning`.
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.85;

/// Default slip angle of peak lateral force (degrees).
pub const DEFAULT_OPTIMAL_SLIP_ANGLE_DEG: f64 = 8.0;

/// Parameters of the combined-slip and stability checks.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::LimitConfig;
///
/// let config: LimitConfig = serde_json::from_str(r#"{ "coupling_factor": 0.4 }"#)?;
/// assert!((config.coupling_factor - 0.4).abs() < 1e-12);
/// assert!((config.warning_threshold - 0.85).abs() < 1e-12);
/// assert!(config.validate().is_ok());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// How strongly demand on one axis reduces capacity on the other, `[0, 0.5]`.
    pub coupling_factor: f64,
    /// Ellipse usage above which status becomes `Warning`, `[0, 1]`.
    pub warning_threshold: f64,
    /// Slip angle of peak lateral force (degrees), positive.
    pub optimal_slip_angle_deg: f64,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            coupling_factor: DEFAULT_COUPLING_FACTOR,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            optimal_slip_angle_deg: DEFAULT_OPTIMAL_SLIP_ANGLE_DEG,
        }
    }
}

impl LimitConfig {
    /// Sets the coupling factor (unchecked until [`validate`](Self::validate)).
    pub fn with_coupling_factor(mut self, coupling_factor: f64) -> Self {
        self.coupling_factor = coupling_factor;
        self
    }

    /// Sets the warning threshold (unchecked until [`validate`](Self::validate)).
    pub fn with_warning_threshold(mut self, warning_threshold: f64) -> Self {
        self.warning_threshold = warning_threshold;
        self
    }

    /// Sets the optimal slip angle in degrees.
    pub fn with_optimal_slip_angle_deg(mut self, degrees: f64) -> Self {
        self.optimal_slip_angle_deg = degrees;
        self
    }

    /// Optimal slip angle in radians.
    pub fn optimal_slip_angle_rad(&self) -> f64 {
        self.optimal_slip_angle_deg.to_radians()
    }

    /// Check every parameter against its band.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] for the first parameter that
    /// is non-finite or out of band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.coupling_factor.is_finite()
            || !(0.0..=MAX_COUPLING_FACTOR).contains(&self.coupling_factor)
        {
            return Err(ConfigError::invalid(
                "coupling_factor",
                self.coupling_factor,
                "must be in [0, 0.5]",
            ));
        }
        if !self.warning_threshold.is_finite() || !(0.0..=1.0).contains(&self.warning_threshold) {
            return Err(ConfigError::invalid(
                "warning_threshold",
                self.warning_threshold,
                "must be in [0, 1]",
            ));
        }
        if !self.optimal_slip_angle_deg.is_finite()
            || self.optimal_slip_angle_deg <= 0.0
            || self.optimal_slip_angle_deg >= 90.0
        {
            return Err(ConfigError::invalid(
                "optimal_slip_angle_deg",
                self.optimal_slip_angle_deg,
                "must be in (0, 90)",
            ));
        }
        Ok(())
    }
}

/// Clamp a per-call coupling factor to `[0, 0.5]`; NaN falls back to the default.
pub fn clamp_coupling_factor(coupling_factor: f64) -> f64 {
    clamp_or_default(
        "coupling_factor",
        coupling_factor,
        0.0,
        MAX_COUPLING_FACTOR,
        DEFAULT_COUPLING_FACTOR,
    )
}

/// Clamp a per-call warning threshold to `[0, 1]`; NaN falls back to the default.
pub fn clamp_warning_threshold(warning_threshold: f64) -> f64 {
    clamp_or_default(
        "warning_threshold",
        warning_threshold,
        0.0,
        1.0,
        DEFAULT_WARNING_THRESHOLD,
    )
}

fn clamp_or_default(name: &'static str, value: f64, min: f64, max: f64, default: f64) -> f64 {
    if value.is_nan() {
        warn!(parameter = name, fallback = default, "NaN limit parameter replaced by default");
        return default;
    }
    let clamped = value.clamp(min, max);
    if (clamped - value).abs() > 0.0 {
        warn!(parameter = name, value, clamped, "limit parameter clamped");
    }
    clamped
}
