//! Tire physical state and its validation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compound::TireCompound;
use crate::error::ValidationError;

/// Accepted tire temperature band (°C).
pub const TEMPERATURE_RANGE_C: (f64, f64) = (-50.0, 150.0);

/// Accepted wear band (0 = new, 1 = fully worn).
pub const WEAR_RANGE: (f64, f64) = (0.0, 1.0);

/// Accepted inflation pressure band (kPa).
pub const PRESSURE_RANGE_KPA: (f64, f64) = (100.0, 400.0);

/// Raw snapshot of one tire's physical condition, as supplied by the caller.
///
/// Nothing downstream accepts a `TireState` directly; it must first pass
/// [`TireState::validate`].
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::{TireCompound, TireState};
///
/// let state = TireState::new(4000.0, TireCompound::Performance)
///     .with_temperature(80.0)
///     .with_pressure(200.0)
///     .with_slip(0.05, 0.02);
///
/// let validated = state.validate()?;
/// assert!((validated.vertical_load() - 4000.0).abs() < f64::EPSILON);
///
/// let err = state.with_wear(1.2).validate();
/// assert!(err.is_err());
/// # Ok::<(), openracing_tire_limits::ValidationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireState {
    /// Vertical load Fz (N).
    pub vertical_load: f64,
    /// Slip ratio κ (dimensionless).
    pub slip_ratio: f64,
    /// Slip angle α (rad).
    pub slip_angle: f64,
    /// Tire temperature (°C).
    pub temperature: f64,
    /// Wear fraction (0 = new, 1 = fully worn).
    pub wear: f64,
    /// Inflation pressure (kPa).
    pub pressure: f64,
    /// Compound family.
    #[serde(default)]
    pub compound: TireCompound,
}

impl TireState {
    /// A fresh tire at its compound's optimal temperature and pressure,
    /// rolling straight with no slip.
    pub fn new(vertical_load: f64, compound: TireCompound) -> Self {
        let model = *crate::FrictionModelTable::STANDARD.get(compound);
        Self {
            vertical_load,
            slip_ratio: 0.0,
            slip_angle: 0.0,
            temperature: model.temperature.optimal,
            wear: 0.0,
            pressure: model.pressure_optimal,
            compound,
        }
    }

    /// Sets the vertical load (N).
    pub fn with_vertical_load(mut self, vertical_load: f64) -> Self {
        self.vertical_load = vertical_load;
        self
    }

    /// Sets slip ratio and slip angle (rad).
    pub fn with_slip(mut self, slip_ratio: f64, slip_angle: f64) -> Self {
        self.slip_ratio = slip_ratio;
        self.slip_angle = slip_angle;
        self
    }

    /// Sets the temperature (°C).
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the wear fraction.
    pub fn with_wear(mut self, wear: f64) -> Self {
        self.wear = wear;
        self
    }

    /// Sets the inflation pressure (kPa).
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    /// Check every field against its physical band.
    ///
    /// Values are never corrected: the first violation is returned.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NotFinite`] for NaN or infinite fields
    /// - [`ValidationError::NotPositive`] if `vertical_load <= 0`
    /// - [`ValidationError::OutOfRange`] for temperature, wear or pressure
    ///   outside their bands
    pub fn validate(&self) -> Result<ValidatedTireState, ValidationError> {
        self.check().inspect_err(|e| debug!(error = %e, "rejected tire state"))?;
        Ok(ValidatedTireState { state: *self })
    }

    fn check(&self) -> Result<(), ValidationError> {
        require_finite("vertical_load", self.vertical_load)?;
        if self.vertical_load <= 0.0 {
            return Err(ValidationError::NotPositive {
                field: "vertical_load",
                value: self.vertical_load,
            });
        }
        require_finite("slip_ratio", self.slip_ratio)?;
        require_finite("slip_angle", self.slip_angle)?;
        require_in_range("temperature", self.temperature, TEMPERATURE_RANGE_C)?;
        require_in_range("wear", self.wear, WEAR_RANGE)?;
        require_in_range("pressure", self.pressure, PRESSURE_RANGE_KPA)?;
        Ok(())
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_in_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, value, min, max))
    }
}

/// A [`TireState`] that passed validation.
///
/// Can only be obtained from [`TireState::validate`], so every derived
/// computation may assume `Fz > 0` and in-band temperature, wear and
/// pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedTireState {
    state: TireState,
}

impl ValidatedTireState {
    /// Vertical load Fz (N), strictly positive.
    pub fn vertical_load(&self) -> f64 {
        self.state.vertical_load
    }

    /// Slip ratio κ.
    pub fn slip_ratio(&self) -> f64 {
        self.state.slip_ratio
    }

    /// Slip angle α (rad).
    pub fn slip_angle(&self) -> f64 {
        self.state.slip_angle
    }

    /// Temperature (°C).
    pub fn temperature(&self) -> f64 {
        self.state.temperature
    }

    /// Wear fraction in `[0, 1]`.
    pub fn wear(&self) -> f64 {
        self.state.wear
    }

    /// Pressure (kPa).
    pub fn pressure(&self) -> f64 {
        self.state.pressure
    }

    /// Compound family.
    pub fn compound(&self) -> TireCompound {
        self.state.compound
    }

    /// The underlying raw state.
    pub fn as_state(&self) -> &TireState {
        &self.state
    }
}

impl From<ValidatedTireState> for TireState {
    fn from(value: ValidatedTireState) -> Self {
        value.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TireState {
        TireState::new(4000.0, TireCompound::Performance)
    }

    #[test]
    fn test_reference_state_is_valid() -> Result<(), ValidationError> {
        let v = base().validate()?;
        assert!((v.temperature() - 80.0).abs() < f64::EPSILON);
        assert!((v.pressure() - 200.0).abs() < f64::EPSILON);
        assert_eq!(v.compound(), TireCompound::Performance);
        Ok(())
    }

    #[test]
    fn test_zero_load_rejected() {
        let err = base().with_vertical_load(0.0).validate();
        assert_eq!(
            err,
            Err(ValidationError::NotPositive {
                field: "vertical_load",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        for t in [-50.0, 150.0] {
            assert!(base().with_temperature(t).validate().is_ok());
        }
        for w in [0.0, 1.0] {
            assert!(base().with_wear(w).validate().is_ok());
        }
        for p in [100.0, 400.0] {
            assert!(base().with_pressure(p).validate().is_ok());
        }
    }

    #[test]
    fn test_each_field_named_in_error() {
        let cases = [
            (base().with_temperature(150.5), "temperature"),
            (base().with_temperature(-51.0), "temperature"),
            (base().with_wear(-0.01), "wear"),
            (base().with_pressure(99.0), "pressure"),
            (base().with_pressure(401.0), "pressure"),
            (base().with_slip(f64::NAN, 0.0), "slip_ratio"),
            (base().with_slip(0.0, f64::INFINITY), "slip_angle"),
            (base().with_vertical_load(f64::NAN), "vertical_load"),
        ];
        for (state, field) in cases {
            assert_eq!(state.validate().err().map(|e| e.field()), Some(field));
        }
    }

    #[test]
    fn test_validation_does_not_correct() -> Result<(), ValidationError> {
        let raw = base().with_wear(0.4).with_slip(0.1, -0.05);
        let v = raw.validate()?;
        assert_eq!(TireState::from(v), raw);
        Ok(())
    }
}
