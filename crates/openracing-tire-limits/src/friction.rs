//! Effective friction coefficients from tire state.
//!
//! ```text
//! mu_axis = clamp(base_mu_axis * (Fz / Fz_ref)^exp_axis
//!                 * temp_factor * wear_factor * pressure_factor, 0.1, 2.0)
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{FrictionModel, TemperatureWindow};
use crate::state::ValidatedTireState;

/// Lowest effective friction coefficient the model will report.
pub const MU_MIN: f64 = 0.1;

/// Highest effective friction coefficient the model will report.
pub const MU_MAX: f64 = 2.0;

/// Floor of the pressure factor. Pressure deviation never costs more than 20% grip.
pub const PRESSURE_FACTOR_MIN: f64 = 0.8;

/// Working friction coefficients and the factors that produced them.
///
/// Recomputed for every evaluation; one value is shared by every limit check
/// within the same evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveFriction {
    /// Longitudinal coefficient, in `[MU_MIN, MU_MAX]`.
    pub mu_x: f64,
    /// Lateral coefficient, in `[MU_MIN, MU_MAX]`.
    pub mu_y: f64,
    /// `Fz / reference_load`.
    pub load_ratio: f64,
    /// Temperature multiplier.
    pub temp_factor: f64,
    /// Wear multiplier.
    pub wear_factor: f64,
    /// Pressure multiplier, in `[PRESSURE_FACTOR_MIN, 1]`.
    pub pressure_factor: f64,
    /// Table longitudinal coefficient at reference load.
    pub base_mu_x: f64,
    /// Table lateral coefficient at reference load.
    pub base_mu_y: f64,
    /// Table reference load (N).
    pub reference_load: f64,
}

impl EffectiveFriction {
    /// Friction with the given coefficients and neutral factors.
    ///
    /// The coefficients are taken as-is (not clamped), which lets callers
    /// drive the limit checks into degenerate geometry on purpose.
    ///
    /// # Examples
    ///
    /// ```
    /// use openracing_tire_limits::EffectiveFriction;
    ///
    /// let dry = EffectiveFriction::from_coefficients(1.2, 1.1);
    /// assert!((dry.mu_x - 1.2).abs() < f64::EPSILON);
    /// assert!((dry.temp_factor - 1.0).abs() < f64::EPSILON);
    /// ```
    pub fn from_coefficients(mu_x: f64, mu_y: f64) -> Self {
        Self {
            mu_x,
            mu_y,
            load_ratio: 1.0,
            temp_factor: 1.0,
            wear_factor: 1.0,
            pressure_factor: 1.0,
            base_mu_x: mu_x,
            base_mu_y: mu_y,
            reference_load: 0.0,
        }
    }

    /// Product of the temperature, wear and pressure factors.
    pub fn condition_factor(&self) -> f64 {
        self.temp_factor * self.wear_factor * self.pressure_factor
    }
}

/// Derive effective friction for a validated state.
///
/// Pure: identical inputs always produce identical outputs.
pub fn effective_friction(state: &ValidatedTireState, model: &FrictionModel) -> EffectiveFriction {
    let load_ratio = state.vertical_load() / model.reference_load;
    let mu_x_load = model.base_mu_x * load_ratio.powf(model.load_exponent_x);
    let mu_y_load = model.base_mu_y * load_ratio.powf(model.load_exponent_y);

    let temp_factor = temperature_factor(&model.temperature, state.temperature());
    let wear_factor = wear_factor(model.wear_sensitivity, state.wear());
    let pressure_factor = pressure_factor(
        model.pressure_optimal,
        model.pressure_sensitivity,
        state.pressure(),
    );
    let condition = temp_factor * wear_factor * pressure_factor;

    EffectiveFriction {
        mu_x: (mu_x_load * condition).clamp(MU_MIN, MU_MAX),
        mu_y: (mu_y_load * condition).clamp(MU_MIN, MU_MAX),
        load_ratio,
        temp_factor,
        wear_factor,
        pressure_factor,
        base_mu_x: model.base_mu_x,
        base_mu_y: model.base_mu_y,
        reference_load: model.reference_load,
    }
}

/// Piecewise-linear temperature multiplier.
///
/// Clamped to `cold_factor` below `cold` and `hot_factor` above `hot`,
/// rising linearly to `1.0` at `optimal` and falling linearly after it.
pub fn temperature_factor(window: &TemperatureWindow, temperature: f64) -> f64 {
    if temperature <= window.cold {
        window.cold_factor
    } else if temperature >= window.hot {
        window.hot_factor
    } else if temperature <= window.optimal {
        let t = (temperature - window.cold) / (window.optimal - window.cold);
        window.cold_factor + (1.0 - window.cold_factor) * t
    } else {
        let t = (temperature - window.optimal) / (window.hot - window.optimal);
        1.0 + (window.hot_factor - 1.0) * t
    }
}

/// Linear grip loss with wear.
pub fn wear_factor(wear_sensitivity: f64, wear: f64) -> f64 {
    1.0 - wear_sensitivity * wear
}

/// Grip loss proportional to the deviation from optimal pressure,
/// clamped to `[PRESSURE_FACTOR_MIN, 1]`.
pub fn pressure_factor(pressure_optimal: f64, sensitivity: f64, pressure: f64) -> f64 {
    (1.0 - sensitivity * (pressure - pressure_optimal).abs()).clamp(PRESSURE_FACTOR_MIN, 1.0)
}
