//! Friction-ellipse and combined-slip limit checks.
//!
//! Both checks consume the same [`EffectiveFriction`] and never fail: zero
//! maxima resolve to [`Usage::Unbounded`] with `within_limit = false`.

use core::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::clamp_coupling_factor;
use crate::friction::EffectiveFriction;
use crate::state::ValidatedTireState;
use crate::usage::Usage;

/// Floor of the combined-slip reduction factors. Coupling never removes more
/// than half of an axis' capacity.
pub const MIN_COUPLING_REDUCTION: f64 = 0.5;

/// Floor of the slip-angle efficiency.
pub const MIN_SLIP_EFFICIENCY: f64 = 0.6;

/// Efficiency lost per optimal-slip-angle beyond the optimum.
const SLIP_EFFICIENCY_DECAY: f64 = 0.2;

/// Which limit model produced a [`LimitResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitModel {
    /// Independent per-axis maxima bounding an ellipse.
    FrictionEllipse,
    /// Per-axis maxima reduced by demand on the other axis.
    CombinedSlip,
}

/// Per-axis usage and the maxima it was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    /// Longitudinal usage, `|Fx| / fx_max`.
    pub usage_x: Usage,
    /// Lateral usage, `|Fy| / fy_max`.
    pub usage_y: Usage,
    /// Longitudinal maximum (N).
    pub fx_max: f64,
    /// Lateral maximum (N).
    pub fy_max: f64,
}

/// Coupling diagnostics of the combined-slip check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedSlipDetail {
    /// Coupling factor actually applied, after clamping.
    pub coupling_factor: f64,
    /// `mu_x * Fz` before coupling (N).
    pub fx_max_nominal: f64,
    /// `mu_y * Fz` before coupling (N).
    pub fy_max_nominal: f64,
    /// Longitudinal usage of the nominal maximum.
    pub nominal_usage_x: Usage,
    /// Lateral usage of the nominal maximum.
    pub nominal_usage_y: Usage,
    /// Longitudinal capacity multiplier from lateral demand, `[0.5, 1]`.
    pub longitudinal_reduction: f64,
    /// Lateral capacity multiplier from longitudinal demand, `[0.5, 1]`.
    pub lateral_reduction: f64,
    /// Lateral capacity multiplier from slip angle, `[0.6, 1]`.
    pub slip_efficiency: f64,
}

/// Model-specific part of a [`LimitResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum LimitDetail {
    /// Friction ellipse has no extra diagnostics.
    FrictionEllipse,
    /// Combined-slip coupling diagnostics.
    CombinedSlip(CombinedSlipDetail),
}

/// Outcome of one limit check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitResult {
    /// `true` when the applied force pair is on or inside the limit surface.
    pub within_limit: bool,
    /// Combined usage, `sqrt((Fx/Fx_max)² + (Fy/Fy_max)²)`.
    pub usage: Usage,
    /// Per-axis breakdown.
    pub axes: AxisLimits,
    /// Model-specific diagnostics.
    pub detail: LimitDetail,
}

impl LimitResult {
    /// Limit model that produced this result.
    pub fn model(&self) -> LimitModel {
        match self.detail {
            LimitDetail::FrictionEllipse => LimitModel::FrictionEllipse,
            LimitDetail::CombinedSlip(_) => LimitModel::CombinedSlip,
        }
    }

    /// Coupling diagnostics, for combined-slip results.
    pub fn combined_slip(&self) -> Option<&CombinedSlipDetail> {
        match &self.detail {
            LimitDetail::CombinedSlip(detail) => Some(detail),
            LimitDetail::FrictionEllipse => None,
        }
    }
}

/// Classical friction ellipse with independent maxima `mu_x·Fz`, `mu_y·Fz`.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::{
///     EffectiveFriction, TireCompound, TireState, Usage, friction_ellipse_limit_with,
/// };
///
/// let state = TireState::new(4000.0, TireCompound::Performance).validate()?;
/// let friction = EffectiveFriction::from_coefficients(1.0, 1.0);
///
/// let result = friction_ellipse_limit_with(&state, &friction, 1200.0, 1600.0);
/// assert!(result.within_limit);
/// assert!((result.usage.value().unwrap_or(f64::NAN) - 0.5).abs() < 1e-12);
///
/// let dead = EffectiveFriction::from_coefficients(0.0, 1.0);
/// let result = friction_ellipse_limit_with(&state, &dead, 10.0, 0.0);
/// assert!(!result.within_limit);
/// assert_eq!(result.usage, Usage::Unbounded);
/// # Ok::<(), openracing_tire_limits::ValidationError>(())
/// ```
pub fn friction_ellipse_limit_with(
    state: &ValidatedTireState,
    friction: &EffectiveFriction,
    fx: f64,
    fy: f64,
) -> LimitResult {
    let fz = state.vertical_load();
    let fx_max = friction.mu_x * fz;
    let fy_max = friction.mu_y * fz;

    let axes = AxisLimits {
        usage_x: Usage::of(fx, fx_max),
        usage_y: Usage::of(fy, fy_max),
        fx_max,
        fy_max,
    };
    let (usage, within_limit) = combine(&axes, "friction_ellipse");

    LimitResult {
        within_limit,
        usage,
        axes,
        detail: LimitDetail::FrictionEllipse,
    }
}

/// Coupling-aware check: demand on one axis shrinks the other axis' maximum,
/// and lateral capacity is further scaled by slip-angle efficiency.
///
/// `coupling_factor` is clamped to `[0, 0.5]`; `optimal_slip_angle` is in
/// radians and must be positive.
pub fn combined_slip_limit_with(
    state: &ValidatedTireState,
    friction: &EffectiveFriction,
    fx: f64,
    fy: f64,
    coupling_factor: f64,
    optimal_slip_angle: f64,
) -> LimitResult {
    let coupling_factor = clamp_coupling_factor(coupling_factor);
    let fz = state.vertical_load();
    let fx_max_nominal = friction.mu_x * fz;
    let fy_max_nominal = friction.mu_y * fz;

    let nominal_usage_x = Usage::of(fx, fx_max_nominal);
    let nominal_usage_y = Usage::of(fy, fy_max_nominal);

    let lateral_reduction = coupling_reduction(coupling_factor, nominal_usage_x);
    let longitudinal_reduction = coupling_reduction(coupling_factor, nominal_usage_y);
    let slip_efficiency = slip_angle_efficiency(state.slip_angle(), optimal_slip_angle);

    let fx_max = fx_max_nominal * longitudinal_reduction;
    let fy_max = fy_max_nominal * lateral_reduction * slip_efficiency;

    let axes = AxisLimits {
        usage_x: Usage::of(fx, fx_max),
        usage_y: Usage::of(fy, fy_max),
        fx_max,
        fy_max,
    };
    let (usage, within_limit) = combine(&axes, "combined_slip");

    LimitResult {
        within_limit,
        usage,
        axes,
        detail: LimitDetail::CombinedSlip(CombinedSlipDetail {
            coupling_factor,
            fx_max_nominal,
            fy_max_nominal,
            nominal_usage_x,
            nominal_usage_y,
            longitudinal_reduction,
            lateral_reduction,
            slip_efficiency,
        }),
    }
}

/// Capacity multiplier on one axis from usage of the other, `[0.5, 1]`.
///
/// Unbounded usage drives the multiplier to its floor unless coupling is off.
pub fn coupling_reduction(coupling_factor: f64, other_axis_usage: Usage) -> f64 {
    match other_axis_usage {
        Usage::Bounded(u) => (1.0 - coupling_factor * u).clamp(MIN_COUPLING_REDUCTION, 1.0),
        Usage::Unbounded if coupling_factor > 0.0 => MIN_COUPLING_REDUCTION,
        Usage::Unbounded => 1.0,
    }
}

/// Lateral capacity multiplier from slip angle, `[0.6, 1]`.
///
/// Rises as `sin(π·α / (2·α_opt))` up to the optimum and decays linearly
/// by 20% per optimum beyond it.
pub fn slip_angle_efficiency(slip_angle: f64, optimal_slip_angle: f64) -> f64 {
    let angle = slip_angle.abs();
    let efficiency = if angle <= optimal_slip_angle {
        (FRAC_PI_2 * angle / optimal_slip_angle).sin()
    } else {
        1.0 - SLIP_EFFICIENCY_DECAY * (angle - optimal_slip_angle) / optimal_slip_angle
    };
    efficiency.clamp(MIN_SLIP_EFFICIENCY, 1.0)
}

/// Combined usage and the `value² <= 1` verdict.
///
/// The verdict is taken on the squared sum so it never disagrees with the
/// rounding of the square root. When the squared sum overflows, the norm
/// falls back to `hypot`, which is unbounded only if the norm itself is.
fn combine(axes: &AxisLimits, model: &'static str) -> (Usage, bool) {
    match (axes.usage_x, axes.usage_y) {
        (Usage::Bounded(ux), Usage::Bounded(uy)) => {
            let squared = ux * ux + uy * uy;
            if squared.is_finite() {
                (Usage::Bounded(squared.sqrt()), squared <= 1.0)
            } else {
                (Usage::norm(axes.usage_x, axes.usage_y), false)
            }
        }
        _ => {
            debug!(
                model,
                fx_max = axes.fx_max,
                fy_max = axes.fy_max,
                "force demand against zero capacity"
            );
            (Usage::Unbounded, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::TireCompound;
    use crate::error::ValidationError;
    use crate::state::TireState;
    use approx::assert_relative_eq;

    const OPTIMAL: f64 = 8.0 * core::f64::consts::PI / 180.0;

    fn state(slip_angle: f64) -> Result<ValidatedTireState, ValidationError> {
        TireState::new(4000.0, TireCompound::Performance)
            .with_slip(0.0, slip_angle)
            .validate()
    }

    #[test]
    fn test_ellipse_reference_example() -> Result<(), ValidationError> {
        let friction = EffectiveFriction::from_coefficients(1.1, 1.1);
        let r = friction_ellipse_limit_with(&state(0.0)?, &friction, 1500.0, 2000.0);
        assert!(r.within_limit);
        assert_eq!(r.model(), LimitModel::FrictionEllipse);
        assert_relative_eq!(r.axes.fx_max, 4400.0, epsilon = 1e-9);
        assert_relative_eq!(r.axes.fy_max, 4400.0, epsilon = 1e-9);
        let usage = r.usage.value().unwrap_or(f64::NAN);
        assert_relative_eq!(usage, 2500.0 / 4400.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_ellipse_zero_force_on_dead_axis_is_zero() -> Result<(), ValidationError> {
        let friction = EffectiveFriction::from_coefficients(0.0, 1.0);
        let r = friction_ellipse_limit_with(&state(0.0)?, &friction, 0.0, 1000.0);
        assert!(r.within_limit);
        assert_eq!(r.axes.usage_x, Usage::ZERO);
        Ok(())
    }

    #[test]
    fn test_ellipse_signs_do_not_matter() -> Result<(), ValidationError> {
        let s = state(0.0)?;
        let friction = EffectiveFriction::from_coefficients(1.1, 1.0);
        let a = friction_ellipse_limit_with(&s, &friction, 1500.0, -2000.0);
        let b = friction_ellipse_limit_with(&s, &friction, -1500.0, 2000.0);
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_slip_efficiency_curve() {
        assert_relative_eq!(slip_angle_efficiency(0.0, OPTIMAL), MIN_SLIP_EFFICIENCY);
        assert_relative_eq!(slip_angle_efficiency(OPTIMAL, OPTIMAL), 1.0);
        assert_relative_eq!(slip_angle_efficiency(-OPTIMAL, OPTIMAL), 1.0);
        assert_relative_eq!(
            slip_angle_efficiency(OPTIMAL / 2.0, OPTIMAL),
            (core::f64::consts::FRAC_PI_4).sin(),
            epsilon = 1e-12
        );
        assert_relative_eq!(slip_angle_efficiency(1.5 * OPTIMAL, OPTIMAL), 0.9, epsilon = 1e-12);
        assert_relative_eq!(slip_angle_efficiency(10.0 * OPTIMAL, OPTIMAL), MIN_SLIP_EFFICIENCY);
    }

    #[test]
    fn test_coupling_reduction_bounds() {
        assert_relative_eq!(coupling_reduction(0.3, Usage::ZERO), 1.0);
        assert_relative_eq!(coupling_reduction(0.3, Usage::Bounded(0.5)), 0.85, epsilon = 1e-12);
        assert_relative_eq!(coupling_reduction(0.5, Usage::Bounded(3.0)), MIN_COUPLING_REDUCTION);
        assert_relative_eq!(coupling_reduction(0.3, Usage::Unbounded), MIN_COUPLING_REDUCTION);
        assert_relative_eq!(coupling_reduction(0.0, Usage::Unbounded), 1.0);
    }

    #[test]
    fn test_combined_is_stricter_than_ellipse() -> Result<(), Box<dyn std::error::Error>> {
        let s = state(OPTIMAL)?;
        let friction = EffectiveFriction::from_coefficients(1.1, 1.1);
        let ellipse = friction_ellipse_limit_with(&s, &friction, 2000.0, 2000.0);
        let combined = combined_slip_limit_with(&s, &friction, 2000.0, 2000.0, 0.3, OPTIMAL);
        assert!(combined.usage > ellipse.usage);

        let detail = combined
            .combined_slip()
            .copied()
            .ok_or("missing combined-slip detail")?;
        let nominal = 2000.0 / 4400.0;
        assert_relative_eq!(detail.lateral_reduction, 1.0 - 0.3 * nominal, epsilon = 1e-12);
        assert_relative_eq!(detail.longitudinal_reduction, 1.0 - 0.3 * nominal, epsilon = 1e-12);
        assert_relative_eq!(detail.slip_efficiency, 1.0);
        assert_relative_eq!(
            combined.axes.fx_max,
            4400.0 * detail.longitudinal_reduction,
            epsilon = 1e-9
        );
        Ok(())
    }

    #[test]
    fn test_combined_clamps_coupling() -> Result<(), ValidationError> {
        let s = state(OPTIMAL)?;
        let friction = EffectiveFriction::from_coefficients(1.1, 1.1);
        let r = combined_slip_limit_with(&s, &friction, 1000.0, 1000.0, 7.0, OPTIMAL);
        let coupling = r.combined_slip().map(|d| d.coupling_factor).unwrap_or(f64::NAN);
        assert_relative_eq!(coupling, 0.5);
        Ok(())
    }

    #[test]
    fn test_combined_zero_capacity_is_unbounded() -> Result<(), ValidationError> {
        let s = state(OPTIMAL)?;
        let friction = EffectiveFriction::from_coefficients(1.0, 0.0);
        let r = combined_slip_limit_with(&s, &friction, 0.0, 50.0, 0.3, OPTIMAL);
        assert!(!r.within_limit);
        assert!(r.usage.is_unbounded());
        assert_eq!(r.model(), LimitModel::CombinedSlip);
        Ok(())
    }

    #[test]
    fn test_huge_force_never_reports_infinite_usage() -> Result<(), ValidationError> {
        let s = state(OPTIMAL)?;
        let friction = EffectiveFriction::from_coefficients(1.1, 1.1);
        let r = friction_ellipse_limit_with(&s, &friction, 1e200, 0.0);
        assert!(!r.within_limit);
        let usage = r.usage.value().unwrap_or(f64::NAN);
        assert!(usage.is_finite());
        assert_relative_eq!(usage, 1e200 / 4400.0, max_relative = 1e-12);

        let starved = EffectiveFriction::from_coefficients(1e-6, 1e-6);
        for r in [
            friction_ellipse_limit_with(&s, &starved, f64::MAX, f64::MAX),
            combined_slip_limit_with(&s, &starved, f64::MAX, f64::MAX, 0.3, OPTIMAL),
        ] {
            assert!(!r.within_limit);
            assert!(r.usage.is_unbounded());
        }
        Ok(())
    }
}
