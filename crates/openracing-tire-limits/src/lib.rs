//! Tire friction limits for OpenRacing
//!
//! Estimates how much longitudinal and lateral force a tire can sustain in
//! its current physical state, and how close an applied force pair is to
//! that limit.
//!
//! # Overview
//!
//! - [`TireState`]: raw tire condition, validated into a [`ValidatedTireState`]
//! - [`FrictionModelTable`]: per-compound empirical constants
//! - [`EffectiveFriction`]: working `mu_x`/`mu_y` after load, temperature,
//!   wear and pressure effects
//! - [`friction_ellipse_limit`]: primary, independent-axis limit check
//! - [`combined_slip_limit`]: coupling-aware secondary check
//! - [`stability_assessment`]: stable / warning / unstable verdict with the
//!   force margin in the current force direction
//!
//! # RT Safety
//!
//! Every operation is a pure, bounded, non-blocking computation over `Copy`
//! values: no allocation on success, no locks, no shared mutable state.
//! [`TireLimits`] may be shared across threads freely. Zero-capacity
//! geometry never fails; it resolves to [`Usage::Unbounded`] or a zero
//! force capacity.
//!
//! # Example
//!
//! ```
//! use openracing_tire_limits::{
//!     StabilityStatus, TireCompound, TireState, friction_ellipse_limit, stability_assessment,
//! };
//!
//! let state = TireState::new(4000.0, TireCompound::Performance)
//!     .with_temperature(80.0)
//!     .with_pressure(200.0);
//!
//! let ellipse = friction_ellipse_limit(&state, 1500.0, 2000.0)?;
//! assert!(ellipse.within_limit);
//! assert!((ellipse.usage.value().unwrap_or(f64::NAN) - 0.568).abs() < 1e-3);
//!
//! let report = stability_assessment(&state, 4000.0, 3500.0, 0.85)?;
//! assert_eq!(report.status, StabilityStatus::Unstable);
//! assert!(report.force_margin < 0.0);
//! # Ok::<(), openracing_tire_limits::TireLimitError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod compound;
pub mod config;
pub mod corners;
pub mod error;
pub mod evaluator;
pub mod friction;
pub mod limits;
pub mod model;
pub mod prelude;
pub mod stability;
pub mod state;
pub mod thermal;
pub mod usage;
pub mod wear;

pub use compound::TireCompound;
pub use config::LimitConfig;
pub use error::{ConfigError, ErrorSeverity, Result, TireLimitError, ValidationError};
pub use evaluator::{Evaluation, TireLimits};
pub use friction::EffectiveFriction;
pub use limits::{
    AxisLimits, CombinedSlipDetail, LimitDetail, LimitModel, LimitResult, combined_slip_limit_with,
    friction_ellipse_limit_with,
};
pub use model::{FrictionModel, FrictionModelTable, TemperatureWindow};
pub use stability::{StabilityAssessment, StabilityStatus};
pub use state::{TireState, ValidatedTireState};
pub use usage::Usage;

/// Validate a raw tire state.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the offending field and bound.
pub fn validate(state: &TireState) -> std::result::Result<ValidatedTireState, ValidationError> {
    state.validate()
}

/// Effective friction from the standard table.
///
/// # Errors
///
/// Returns [`TireLimitError::Validation`] if the state is rejected.
pub fn effective_friction(state: &TireState) -> Result<EffectiveFriction> {
    TireLimits::STANDARD.effective_friction(state)
}

/// Friction-ellipse check against the standard table.
///
/// # Errors
///
/// Returns [`TireLimitError::Validation`] if the state is rejected or a
/// force is not finite.
pub fn friction_ellipse_limit(state: &TireState, fx: f64, fy: f64) -> Result<LimitResult> {
    TireLimits::STANDARD.friction_ellipse_limit(state, fx, fy)
}

/// Combined-slip check against the standard table.
///
/// `coupling_factor` is clamped to `[0, 0.5]`; the usual value is
/// [`config::DEFAULT_COUPLING_FACTOR`].
///
/// # Errors
///
/// Returns [`TireLimitError::Validation`] if the state is rejected or a
/// force is not finite.
pub fn combined_slip_limit(
    state: &TireState,
    fx: f64,
    fy: f64,
    coupling_factor: f64,
) -> Result<LimitResult> {
    TireLimits::STANDARD.combined_slip_limit(state, fx, fy, coupling_factor)
}

/// Stability assessment against the standard table.
///
/// `warning_threshold` is clamped to `[0, 1]`; the usual value is
/// [`config::DEFAULT_WARNING_THRESHOLD`].
///
/// # Errors
///
/// Returns [`TireLimitError::Validation`] if the state is rejected or a
/// force is not finite.
pub fn stability_assessment(
    state: &TireState,
    fx: f64,
    fy: f64,
    warning_threshold: f64,
) -> Result<StabilityAssessment> {
    TireLimits::STANDARD.stability_assessment(state, fx, fy, warning_threshold)
}
