//! Immutable friction table plus limit configuration.
//!
//! [`TireLimits`] owns no mutable state; one instance can be shared by any
//! number of threads evaluating tires concurrently.

use serde::Serialize;
use tracing::trace;

use crate::config::LimitConfig;
use crate::error::{ConfigError, Result, ValidationError};
use crate::friction::{EffectiveFriction, effective_friction};
use crate::limits::{LimitResult, combined_slip_limit_with, friction_ellipse_limit_with};
use crate::model::{FrictionModel, FrictionModelTable};
use crate::stability::{StabilityAssessment, assess};
use crate::state::{TireState, ValidatedTireState, require_finite};

/// Everything computed for one state and force pair, from a single
/// [`EffectiveFriction`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// The validated input state.
    pub state: ValidatedTireState,
    /// Working friction coefficients.
    pub friction: EffectiveFriction,
    /// Friction-ellipse check.
    pub ellipse: LimitResult,
    /// Combined-slip check.
    pub combined: LimitResult,
    /// Stability verdict.
    pub stability: StabilityAssessment,
}

/// Validated friction table and limit configuration.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::{LimitConfig, StabilityStatus, TireCompound, TireLimits, TireState};
///
/// let config = LimitConfig::default().with_warning_threshold(0.8);
/// let limits = TireLimits::new(Default::default(), config)?;
/// let state = TireState::new(4000.0, TireCompound::Performance);
///
/// let eval = limits.evaluate(&state, 1500.0, 2000.0)?;
/// assert!(eval.ellipse.within_limit);
/// assert_eq!(eval.stability.status, StabilityStatus::Stable);
///
/// let eval = limits.evaluate(&state, 4000.0, 3500.0)?;
/// assert_eq!(eval.stability.status, StabilityStatus::Unstable);
/// # Ok::<(), openracing_tire_limits::TireLimitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TireLimits {
    table: FrictionModelTable,
    config: LimitConfig,
}

impl Default for TireLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TireLimits {
    /// Standard friction table with default limit configuration.
    pub const STANDARD: TireLimits = TireLimits {
        table: FrictionModelTable::STANDARD,
        config: LimitConfig {
            coupling_factor: crate::config::DEFAULT_COUPLING_FACTOR,
            warning_threshold: crate::config::DEFAULT_WARNING_THRESHOLD,
            optimal_slip_angle_deg: crate::config::DEFAULT_OPTIMAL_SLIP_ANGLE_DEG,
        },
    };

    /// Build from a custom table and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any table model or configuration parameter
    /// is invalid. There is no fallback profile.
    pub fn new(
        table: FrictionModelTable,
        config: LimitConfig,
    ) -> std::result::Result<Self, ConfigError> {
        table.validate()?;
        config.validate()?;
        Ok(Self { table, config })
    }

    /// The friction table.
    pub fn table(&self) -> &FrictionModelTable {
        &self.table
    }

    /// The limit configuration.
    pub fn config(&self) -> &LimitConfig {
        &self.config
    }

    /// Friction model for the state's compound.
    pub fn model_for(&self, state: &ValidatedTireState) -> &FrictionModel {
        self.table.get(state.compound())
    }

    /// Validate a raw state.
    ///
    /// # Errors
    ///
    /// See [`TireState::validate`].
    pub fn validate(
        &self,
        state: &TireState,
    ) -> std::result::Result<ValidatedTireState, ValidationError> {
        state.validate()
    }

    /// Effective friction for a raw state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the state is rejected.
    pub fn effective_friction(&self, state: &TireState) -> Result<EffectiveFriction> {
        let state = state.validate()?;
        Ok(effective_friction(&state, self.model_for(&state)))
    }

    /// Friction-ellipse check.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the state is rejected or a force is
    /// not finite.
    pub fn friction_ellipse_limit(
        &self,
        state: &TireState,
        fx: f64,
        fy: f64,
    ) -> Result<LimitResult> {
        let state = state.validate()?;
        check_forces(fx, fy)?;
        let friction = effective_friction(&state, self.model_for(&state));
        Ok(friction_ellipse_limit_with(&state, &friction, fx, fy))
    }

    /// Combined-slip check with an explicit coupling factor (clamped to `[0, 0.5]`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the state is rejected or a force is
    /// not finite.
    pub fn combined_slip_limit(
        &self,
        state: &TireState,
        fx: f64,
        fy: f64,
        coupling_factor: f64,
    ) -> Result<LimitResult> {
        let state = state.validate()?;
        check_forces(fx, fy)?;
        let friction = effective_friction(&state, self.model_for(&state));
        Ok(combined_slip_limit_with(
            &state,
            &friction,
            fx,
            fy,
            coupling_factor,
            self.config.optimal_slip_angle_rad(),
        ))
    }

    /// Stability assessment with an explicit warning threshold (clamped to `[0, 1]`).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the state is rejected or a force is
    /// not finite.
    pub fn stability_assessment(
        &self,
        state: &TireState,
        fx: f64,
        fy: f64,
        warning_threshold: f64,
    ) -> Result<StabilityAssessment> {
        let config = self.config.with_warning_threshold(warning_threshold);
        Ok(self.evaluate_validated(state.validate()?, fx, fy, &config)?.stability)
    }

    /// Validate once, compute friction once, run every check.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the state is rejected or a force is
    /// not finite.
    pub fn evaluate(&self, state: &TireState, fx: f64, fy: f64) -> Result<Evaluation> {
        self.evaluate_validated(state.validate()?, fx, fy, &self.config)
    }

    fn evaluate_validated(
        &self,
        state: ValidatedTireState,
        fx: f64,
        fy: f64,
        config: &LimitConfig,
    ) -> Result<Evaluation> {
        check_forces(fx, fy)?;
        let friction = effective_friction(&state, self.model_for(&state));
        let ellipse = friction_ellipse_limit_with(&state, &friction, fx, fy);
        let combined = combined_slip_limit_with(
            &state,
            &friction,
            fx,
            fy,
            config.coupling_factor,
            config.optimal_slip_angle_rad(),
        );
        let stability = assess(
            &state,
            &friction,
            &ellipse,
            &combined,
            fx,
            fy,
            config.warning_threshold,
        );
        trace!(
            compound = %state.compound(),
            mu_x = friction.mu_x,
            mu_y = friction.mu_y,
            "tire limits evaluated"
        );
        Ok(Evaluation {
            state,
            friction,
            ellipse,
            combined,
            stability,
        })
    }
}

fn check_forces(fx: f64, fy: f64) -> std::result::Result<(), ValidationError> {
    require_finite("fx", fx)?;
    require_finite("fy", fy)
}
