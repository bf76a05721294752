//! Limit usage with an explicit unbounded sentinel.
//!
//! A usage is the applied force as a fraction of the available force. When
//! the available force is numerically zero and the applied force is not,
//! the fraction has no finite value; that case is [`Usage::Unbounded`]
//! instead of relying on IEEE infinity.

use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Magnitudes below this are treated as zero in every denominator check.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Fraction of a force limit in use.
///
/// Ordered so that `Unbounded` is greater than any bounded value.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::Usage;
///
/// assert_eq!(Usage::of(2000.0, 4000.0), Usage::Bounded(0.5));
/// assert_eq!(Usage::of(-2000.0, 4000.0), Usage::Bounded(0.5));
/// assert_eq!(Usage::of(0.0, 0.0), Usage::ZERO);
/// assert_eq!(Usage::of(100.0, 0.0), Usage::Unbounded);
///
/// assert!(Usage::Unbounded > Usage::Bounded(1e12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Usage {
    /// Finite, non-negative fraction.
    Bounded(f64),
    /// Non-zero demand against zero capacity.
    Unbounded,
}

impl Usage {
    /// No demand.
    pub const ZERO: Usage = Usage::Bounded(0.0);

    /// Usage of `force` against `max`, by magnitude.
    ///
    /// A numerically zero `max` yields [`Usage::ZERO`] for zero force and
    /// [`Usage::Unbounded`] otherwise. A ratio too large to represent is
    /// also [`Usage::Unbounded`].
    pub fn of(force: f64, max: f64) -> Usage {
        let force = force.abs();
        if max.abs() < DEGENERATE_EPSILON {
            if force < DEGENERATE_EPSILON {
                Usage::ZERO
            } else {
                Usage::Unbounded
            }
        } else {
            Usage::from_ratio(force / max.abs())
        }
    }

    /// Euclidean norm of two per-axis usages: `hypot(ux, uy)`.
    ///
    /// Unbounded if either axis is, or if the norm overflows.
    pub fn norm(x: Usage, y: Usage) -> Usage {
        match (x, y) {
            (Usage::Bounded(ux), Usage::Bounded(uy)) => Usage::from_ratio(ux.hypot(uy)),
            _ => Usage::Unbounded,
        }
    }

    /// `Bounded(ratio)` for finite ratios, `Unbounded` otherwise.
    pub(crate) fn from_ratio(ratio: f64) -> Usage {
        if ratio.is_finite() {
            Usage::Bounded(ratio)
        } else {
            Usage::Unbounded
        }
    }

    /// The finite fraction, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Usage::Bounded(u) => Some(*u),
            Usage::Unbounded => None,
        }
    }

    /// `true` for [`Usage::Unbounded`].
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Usage::Unbounded)
    }

    /// `true` when the usage is at or below `limit`.
    pub fn is_within(&self, limit: f64) -> bool {
        match self {
            Usage::Bounded(u) => *u <= limit,
            Usage::Unbounded => false,
        }
    }

    /// `true` when the usage is strictly above `threshold`.
    pub fn exceeds(&self, threshold: f64) -> bool {
        match self {
            Usage::Bounded(u) => *u > threshold,
            Usage::Unbounded => true,
        }
    }

    /// Factor in `[0, 1]` that brings the applied forces back onto the limit.
    ///
    /// `1` when within the limit, `1 / usage` when over it, `0` when there is
    /// no capacity at all. ABS and traction control scale their commanded
    /// brake pressure or torque by this.
    ///
    /// ```
    /// use openracing_tire_limits::Usage;
    ///
    /// assert!((Usage::Bounded(0.7).force_scale() - 1.0).abs() < f64::EPSILON);
    /// assert!((Usage::Bounded(1.25).force_scale() - 0.8).abs() < 1e-12);
    /// assert!(Usage::Unbounded.force_scale().abs() < f64::EPSILON);
    /// ```
    pub fn force_scale(&self) -> f64 {
        match self {
            Usage::Bounded(u) if *u <= 1.0 => 1.0,
            Usage::Bounded(u) => 1.0 / u,
            Usage::Unbounded => 0.0,
        }
    }
}

impl Default for Usage {
    fn default() -> Self {
        Usage::ZERO
    }
}

impl PartialOrd for Usage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Usage::Bounded(a), Usage::Bounded(b)) => a.partial_cmp(b),
            (Usage::Bounded(_), Usage::Unbounded) => Some(Ordering::Less),
            (Usage::Unbounded, Usage::Bounded(_)) => Some(Ordering::Greater),
            (Usage::Unbounded, Usage::Unbounded) => Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Usage::Bounded(u) => write!(f, "{:.1}%", u * 100.0),
            Usage::Unbounded => f.write_str("unbounded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_over_zero_is_zero() {
        assert_eq!(Usage::of(0.0, 0.0), Usage::ZERO);
        assert_eq!(Usage::of(1e-12, 1e-12), Usage::ZERO);
    }

    #[test]
    fn test_norm_propagates_unbounded() {
        assert_eq!(Usage::norm(Usage::Unbounded, Usage::ZERO), Usage::Unbounded);
        let unit = Usage::norm(Usage::Bounded(0.6), Usage::Bounded(0.8));
        assert_eq!(unit.value().map(|u| (u - 1.0).abs() < 1e-12), Some(true));
    }

    #[test]
    fn test_overflowing_ratio_is_unbounded() {
        assert_eq!(Usage::of(1e300, 1e-8), Usage::Unbounded);
        assert_eq!(Usage::of(f64::MAX, 0.5), Usage::Unbounded);
        assert_eq!(
            Usage::norm(Usage::Bounded(f64::MAX), Usage::Bounded(f64::MAX)),
            Usage::Unbounded
        );
        let large = Usage::norm(Usage::Bounded(1e200), Usage::Bounded(1e200));
        assert!(large.value().is_some_and(f64::is_finite));
    }

    #[test]
    fn test_within_and_exceeds() {
        assert!(Usage::Bounded(1.0).is_within(1.0));
        assert!(!Usage::Bounded(1.0).exceeds(1.0));
        assert!(Usage::Unbounded.exceeds(1e300));
        assert!(!Usage::Unbounded.is_within(f64::MAX));
    }

    #[test]
    fn test_display() {
        assert_eq!(Usage::Bounded(0.5682).to_string(), "56.8%");
        assert_eq!(Usage::Unbounded.to_string(), "unbounded");
    }

    #[test]
    fn test_serde_tagged() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&Usage::Bounded(0.5))?,
            r#"{"kind":"bounded","value":0.5}"#
        );
        assert_eq!(serde_json::to_string(&Usage::Unbounded)?, r#"{"kind":"unbounded"}"#);
        Ok(())
    }
}
