//! Operator-facing stability verdict and force-angle margin.
//!
//! Status is driven by the friction ellipse alone; the combined-slip usage is
//! reported alongside as a secondary diagnostic.

use core::f64::consts::FRAC_PI_2;
use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::clamp_warning_threshold;
use crate::friction::EffectiveFriction;
use crate::limits::LimitResult;
use crate::state::ValidatedTireState;
use crate::usage::{DEGENERATE_EPSILON, Usage};

/// Stability classification, ordered from safest to least safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StabilityStatus {
    /// Ellipse usage at or below the warning threshold.
    Stable,
    /// Within the ellipse but above the warning threshold.
    Warning,
    /// Outside the friction ellipse.
    Unstable,
}

impl StabilityStatus {
    /// Derive status from an ellipse result.
    pub fn from_ellipse(ellipse: &LimitResult, warning_threshold: f64) -> Self {
        if !ellipse.within_limit {
            StabilityStatus::Unstable
        } else if ellipse.usage.exceeds(warning_threshold) {
            StabilityStatus::Warning
        } else {
            StabilityStatus::Stable
        }
    }

    /// `true` when a controller must reduce the commanded force.
    pub fn requires_force_reduction(&self) -> bool {
        matches!(self, StabilityStatus::Unstable)
    }
}

impl fmt::Display for StabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StabilityStatus::Stable => "stable",
            StabilityStatus::Warning => "warning",
            StabilityStatus::Unstable => "unstable",
        })
    }
}

/// Combined stability report for one force pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilityAssessment {
    /// Verdict from the friction ellipse.
    pub status: StabilityStatus,
    /// Friction-ellipse usage.
    pub ellipse_usage: Usage,
    /// Combined-slip usage (diagnostic only).
    pub combined_usage: Usage,
    /// `max_force_at_angle - current_force` (N). Negative when exceeded.
    pub force_margin: f64,
    /// Margin as a percentage of `max_force_at_angle`.
    pub force_margin_pct: f64,
    /// Direction of the applied force, `atan2(Fy, Fx)` (degrees).
    pub force_angle_deg: f64,
    /// Largest force the ellipse allows in that direction (N).
    pub max_force_at_angle: f64,
    /// Magnitude of the applied force, `hypot(Fx, Fy)` (N).
    pub current_force: f64,
}

/// Direction of the force pair in radians.
///
/// A numerically zero `Fx` is pure lateral demand: `±π/2` by the sign of
/// `Fy`, and `0` when `Fy` is zero as well.
pub fn force_angle(fx: f64, fy: f64) -> f64 {
    if fx.abs() < DEGENERATE_EPSILON {
        if fy > 0.0 {
            FRAC_PI_2
        } else if fy < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        }
    } else {
        fy.atan2(fx)
    }
}

/// Radius of the friction ellipse along `angle`:
/// `Fz / sqrt((cos θ / mu_x)² + (sin θ / mu_y)²)`.
///
/// Zero when either coefficient is numerically zero.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::stability::max_force_at_angle;
///
/// // Circle: same radius in every direction.
/// assert!((max_force_at_angle(4000.0, 1.0, 1.0, 0.3) - 4000.0).abs() < 1e-9);
/// // Pure lateral direction picks the lateral axis.
/// let lateral = max_force_at_angle(4000.0, 1.2, 0.9, std::f64::consts::FRAC_PI_2);
/// assert!((lateral - 3600.0).abs() < 1e-6);
/// // No capacity on one axis means no capacity at all.
/// assert!(max_force_at_angle(4000.0, 0.0, 1.0, 1.0).abs() < f64::EPSILON);
/// ```
pub fn max_force_at_angle(vertical_load: f64, mu_x: f64, mu_y: f64, angle: f64) -> f64 {
    if mu_x.abs() < DEGENERATE_EPSILON || mu_y.abs() < DEGENERATE_EPSILON {
        return 0.0;
    }
    let (sin, cos) = angle.sin_cos();
    let x = cos / mu_x;
    let y = sin / mu_y;
    vertical_load / (x * x + y * y).sqrt()
}

/// Build the stability report from already-computed limit results.
///
/// `ellipse` and `combined` must have been computed from the same `friction`
/// and force pair. `warning_threshold` is clamped to `[0, 1]`.
pub fn assess(
    state: &ValidatedTireState,
    friction: &EffectiveFriction,
    ellipse: &LimitResult,
    combined: &LimitResult,
    fx: f64,
    fy: f64,
    warning_threshold: f64,
) -> StabilityAssessment {
    let warning_threshold = clamp_warning_threshold(warning_threshold);
    let status = StabilityStatus::from_ellipse(ellipse, warning_threshold);

    let angle = force_angle(fx, fy);
    let max_force = max_force_at_angle(state.vertical_load(), friction.mu_x, friction.mu_y, angle);
    let current_force = fx.hypot(fy);
    let force_margin = max_force - current_force;
    let force_margin_pct = if max_force > DEGENERATE_EPSILON {
        100.0 * force_margin / max_force
    } else if current_force < DEGENERATE_EPSILON {
        0.0
    } else {
        -100.0
    };

    trace!(
        %status,
        ellipse_usage = %ellipse.usage,
        combined_usage = %combined.usage,
        force_margin,
        "tire stability assessed"
    );

    StabilityAssessment {
        status,
        ellipse_usage: ellipse.usage,
        combined_usage: combined.usage,
        force_margin,
        force_margin_pct,
        force_angle_deg: angle.to_degrees(),
        max_force_at_angle: max_force,
        current_force,
    }
}
