//! Per-compound empirical friction constants.
//!
//! [`FrictionModelTable::STANDARD`] is the process-wide table. Custom tables
//! are validated when built; an invalid table is a fatal [`ConfigError`].

use serde::{Deserialize, Serialize};

use crate::compound::TireCompound;
use crate::error::ConfigError;
use crate::state::{PRESSURE_RANGE_KPA, TEMPERATURE_RANGE_C};

/// Temperature breakpoints and the grip multipliers at the cold and hot ends.
///
/// The multiplier at `optimal` is always `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureWindow {
    /// Cold breakpoint (°C). Grip is `cold_factor` at and below it.
    pub cold: f64,
    /// Optimal operating temperature (°C).
    pub optimal: f64,
    /// Hot breakpoint (°C). Grip is `hot_factor` at and above it.
    pub hot: f64,
    /// Multiplier at the cold breakpoint, in `(0, 1]`.
    pub cold_factor: f64,
    /// Multiplier at the hot breakpoint, in `(0, 1]`.
    pub hot_factor: f64,
}

/// Empirical friction constants for one compound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionModel {
    /// Longitudinal friction coefficient at the reference load.
    pub base_mu_x: f64,
    /// Lateral friction coefficient at the reference load.
    pub base_mu_y: f64,
    /// Load at which the base coefficients were measured (N).
    pub reference_load: f64,
    /// Longitudinal load-sensitivity exponent (typically negative).
    pub load_exponent_x: f64,
    /// Lateral load-sensitivity exponent (typically negative).
    pub load_exponent_y: f64,
    /// Temperature breakpoints.
    pub temperature: TemperatureWindow,
    /// Fractional grip lost at full wear.
    pub wear_sensitivity: f64,
    /// Inflation pressure with no grip penalty (kPa).
    pub pressure_optimal: f64,
    /// Grip lost per kPa of deviation from `pressure_optimal`.
    pub pressure_sensitivity: f64,
}

impl FrictionModel {
    /// Check every constant is finite and inside its physical band.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming the first offending
    /// constant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("base_mu_x", self.base_mu_x),
            ("base_mu_y", self.base_mu_y),
            ("reference_load", self.reference_load),
            ("load_exponent_x", self.load_exponent_x),
            ("load_exponent_y", self.load_exponent_y),
            ("temperature.cold", self.temperature.cold),
            ("temperature.optimal", self.temperature.optimal),
            ("temperature.hot", self.temperature.hot),
            ("temperature.cold_factor", self.temperature.cold_factor),
            ("temperature.hot_factor", self.temperature.hot_factor),
            ("wear_sensitivity", self.wear_sensitivity),
            ("pressure_optimal", self.pressure_optimal),
            ("pressure_sensitivity", self.pressure_sensitivity),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, value, "must be finite"));
            }
        }

        if self.base_mu_x <= 0.0 {
            return Err(ConfigError::invalid("base_mu_x", self.base_mu_x, "must be positive"));
        }
        if self.base_mu_y <= 0.0 {
            return Err(ConfigError::invalid("base_mu_y", self.base_mu_y, "must be positive"));
        }
        if self.reference_load <= 0.0 {
            return Err(ConfigError::invalid(
                "reference_load",
                self.reference_load,
                "must be positive",
            ));
        }

        let t = &self.temperature;
        if !(TEMPERATURE_RANGE_C.0..=TEMPERATURE_RANGE_C.1).contains(&t.optimal) {
            return Err(ConfigError::invalid(
                "temperature.optimal",
                t.optimal,
                "must lie within the validated temperature band",
            ));
        }
        if t.cold >= t.optimal {
            return Err(ConfigError::invalid(
                "temperature.cold",
                t.cold,
                "must be below the optimal temperature",
            ));
        }
        if t.hot <= t.optimal {
            return Err(ConfigError::invalid(
                "temperature.hot",
                t.hot,
                "must be above the optimal temperature",
            ));
        }
        for (name, factor) in [
            ("temperature.cold_factor", t.cold_factor),
            ("temperature.hot_factor", t.hot_factor),
        ] {
            if factor <= 0.0 || factor > 1.0 {
                return Err(ConfigError::invalid(name, factor, "must be in (0, 1]"));
            }
        }

        if !(0.0..1.0).contains(&self.wear_sensitivity) {
            return Err(ConfigError::invalid(
                "wear_sensitivity",
                self.wear_sensitivity,
                "must be in [0, 1)",
            ));
        }
        if !(PRESSURE_RANGE_KPA.0..=PRESSURE_RANGE_KPA.1).contains(&self.pressure_optimal) {
            return Err(ConfigError::invalid(
                "pressure_optimal",
                self.pressure_optimal,
                "must lie within the validated pressure band",
            ));
        }
        if self.pressure_sensitivity < 0.0 {
            return Err(ConfigError::invalid(
                "pressure_sensitivity",
                self.pressure_sensitivity,
                "must be non-negative",
            ));
        }
        Ok(())
    }
}

/// One [`FrictionModel`] per [`TireCompound`].
///
/// Each compound is a named field, so adding a compound without a model is a
/// compile error rather than a missing-key lookup at runtime.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::{FrictionModelTable, TireCompound};
///
/// let table = FrictionModelTable::STANDARD;
/// let slick = table.get(TireCompound::RaceSlick);
/// assert!(slick.base_mu_y > table.get(TireCompound::Street).base_mu_y);
///
/// let mut wet = *table.get(TireCompound::Rain);
/// wet.base_mu_x = 0.75;
/// let tuned = table.with_model(TireCompound::Rain, wet)?;
/// assert!((tuned.get(TireCompound::Rain).base_mu_x - 0.75).abs() < 1e-12);
/// # Ok::<(), openracing_tire_limits::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionModelTable {
    /// All-season road tire.
    pub street: FrictionModel,
    /// Summer performance tire.
    pub performance: FrictionModel,
    /// Racing slick.
    pub race_slick: FrictionModel,
    /// Wet weather tire.
    pub rain: FrictionModel,
    /// Cold weather tire.
    pub winter: FrictionModel,
}

impl FrictionModelTable {
    /// Standard constants, derived from published tire test trends.
    pub const STANDARD: FrictionModelTable = FrictionModelTable {
        street: FrictionModel {
            base_mu_x: 0.90,
            base_mu_y: 0.88,
            reference_load: 4000.0,
            load_exponent_x: -0.10,
            load_exponent_y: -0.12,
            temperature: TemperatureWindow {
                cold: 0.0,
                optimal: 45.0,
                hot: 100.0,
                cold_factor: 0.85,
                hot_factor: 0.85,
            },
            wear_sensitivity: 0.20,
            pressure_optimal: 230.0,
            pressure_sensitivity: 0.002,
        },
        performance: FrictionModel {
            base_mu_x: 1.10,
            base_mu_y: 1.10,
            reference_load: 4000.0,
            load_exponent_x: -0.12,
            load_exponent_y: -0.15,
            temperature: TemperatureWindow {
                cold: 20.0,
                optimal: 80.0,
                hot: 120.0,
                cold_factor: 0.80,
                hot_factor: 0.85,
            },
            wear_sensitivity: 0.20,
            pressure_optimal: 200.0,
            pressure_sensitivity: 0.0025,
        },
        race_slick: FrictionModel {
            base_mu_x: 1.40,
            base_mu_y: 1.45,
            reference_load: 3500.0,
            load_exponent_x: -0.18,
            load_exponent_y: -0.20,
            temperature: TemperatureWindow {
                cold: 50.0,
                optimal: 95.0,
                hot: 130.0,
                cold_factor: 0.60,
                hot_factor: 0.75,
            },
            wear_sensitivity: 0.30,
            pressure_optimal: 170.0,
            pressure_sensitivity: 0.004,
        },
        rain: FrictionModel {
            base_mu_x: 0.70,
            base_mu_y: 0.72,
            reference_load: 4000.0,
            load_exponent_x: -0.08,
            load_exponent_y: -0.10,
            temperature: TemperatureWindow {
                cold: 5.0,
                optimal: 45.0,
                hot: 85.0,
                cold_factor: 0.85,
                hot_factor: 0.70,
            },
            wear_sensitivity: 0.25,
            pressure_optimal: 210.0,
            pressure_sensitivity: 0.002,
        },
        winter: FrictionModel {
            base_mu_x: 0.60,
            base_mu_y: 0.60,
            reference_load: 4000.0,
            load_exponent_x: -0.06,
            load_exponent_y: -0.08,
            temperature: TemperatureWindow {
                cold: -25.0,
                optimal: 0.0,
                hot: 30.0,
                cold_factor: 0.80,
                hot_factor: 0.75,
            },
            wear_sensitivity: 0.30,
            pressure_optimal: 220.0,
            pressure_sensitivity: 0.002,
        },
    };

    /// Model for a compound.
    pub fn get(&self, compound: TireCompound) -> &FrictionModel {
        match compound {
            TireCompound::Street => &self.street,
            TireCompound::Performance => &self.performance,
            TireCompound::RaceSlick => &self.race_slick,
            TireCompound::Rain => &self.rain,
            TireCompound::Winter => &self.winter,
        }
    }

    fn get_mut(&mut self, compound: TireCompound) -> &mut FrictionModel {
        match compound {
            TireCompound::Street => &mut self.street,
            TireCompound::Performance => &mut self.performance,
            TireCompound::RaceSlick => &mut self.race_slick,
            TireCompound::Rain => &mut self.rain,
            TireCompound::Winter => &mut self.winter,
        }
    }

    /// Copy of this table with one compound's model replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `model` fails validation.
    pub fn with_model(
        &self,
        compound: TireCompound,
        model: FrictionModel,
    ) -> Result<Self, ConfigError> {
        model.validate().map_err(|e| qualify(compound, e))?;
        let mut table = *self;
        *table.get_mut(compound) = model;
        Ok(table)
    }

    /// Validate every model, e.g. after deserializing a table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] with the parameter name
    /// prefixed by the compound (`"rain.base_mu_x"`).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for compound in TireCompound::ALL {
            self.get(compound)
                .validate()
                .map_err(|e| qualify(compound, e))?;
        }
        Ok(())
    }

    /// Iterate `(compound, model)` pairs in [`TireCompound::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TireCompound, &FrictionModel)> {
        TireCompound::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Default for FrictionModelTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn qualify(compound: TireCompound, err: ConfigError) -> ConfigError {
    match err {
        ConfigError::InvalidParameter {
            name,
            value,
            reason,
        } => ConfigError::InvalidParameter {
            name: format!("{compound}.{name}"),
            value,
            reason,
        },
        other => other,
    }
}
