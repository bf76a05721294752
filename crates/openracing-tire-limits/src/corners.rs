//! Four-corner view: one evaluation per wheel and axle capacity totals.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluator::{Evaluation, TireLimits};
use crate::stability::StabilityStatus;
use crate::state::TireState;
use crate::usage::Usage;

/// Wheel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// Front left.
    FrontLeft,
    /// Front right.
    FrontRight,
    /// Rear left.
    RearLeft,
    /// Rear right.
    RearRight,
}

impl Corner {
    /// All corners, front axle first.
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::RearLeft,
        Corner::RearRight,
    ];

    /// Short label (`FL`, `FR`, `RL`, `RR`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::FrontLeft => "FL",
            Corner::FrontRight => "FR",
            Corner::RearLeft => "RL",
            Corner::RearRight => "RR",
        }
    }

    /// `true` for the two front wheels.
    pub fn is_front(&self) -> bool {
        matches!(self, Corner::FrontLeft | Corner::FrontRight)
    }

    /// `true` for the two rear wheels.
    pub fn is_rear(&self) -> bool {
        !self.is_front()
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State and applied forces at one wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerLoad {
    /// Tire state.
    pub state: TireState,
    /// Longitudinal force (N).
    pub fx: f64,
    /// Lateral force (N).
    pub fy: f64,
}

impl CornerLoad {
    /// Pair a tire state with the forces applied to it.
    pub fn new(state: TireState, fx: f64, fy: f64) -> Self {
        Self { state, fx, fy }
    }
}

/// Per-wheel inputs for the whole vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleLoads {
    /// Front left wheel.
    pub front_left: CornerLoad,
    /// Front right wheel.
    pub front_right: CornerLoad,
    /// Rear left wheel.
    pub rear_left: CornerLoad,
    /// Rear right wheel.
    pub rear_right: CornerLoad,
}

impl VehicleLoads {
    /// Load at one corner.
    pub fn get(&self, corner: Corner) -> &CornerLoad {
        match corner {
            Corner::FrontLeft => &self.front_left,
            Corner::FrontRight => &self.front_right,
            Corner::RearLeft => &self.rear_left,
            Corner::RearRight => &self.rear_right,
        }
    }
}

/// Summed force capacity of one axle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxleCapacity {
    /// Σ Fz (N).
    pub vertical_load: f64,
    /// Σ mu_x·Fz: braking / traction capacity (N).
    pub longitudinal: f64,
    /// Σ mu_y·Fz: cornering capacity (N).
    pub lateral: f64,
}

impl AxleCapacity {
    fn add(&mut self, eval: &Evaluation) {
        let fz = eval.state.vertical_load();
        self.vertical_load += fz;
        self.longitudinal += eval.friction.mu_x * fz;
        self.lateral += eval.friction.mu_y * fz;
    }

    /// Load-weighted lateral coefficient of the axle.
    pub fn average_mu_y(&self) -> f64 {
        if self.vertical_load > 0.0 {
            self.lateral / self.vertical_load
        } else {
            0.0
        }
    }
}

/// Evaluations for every wheel plus vehicle-level summaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleAssessment {
    /// Front left evaluation.
    pub front_left: Evaluation,
    /// Front right evaluation.
    pub front_right: Evaluation,
    /// Rear left evaluation.
    pub rear_left: Evaluation,
    /// Rear right evaluation.
    pub rear_right: Evaluation,
    /// Front axle capacity.
    pub front_axle: AxleCapacity,
    /// Rear axle capacity.
    pub rear_axle: AxleCapacity,
    /// Least stable corner; the first in [`Corner::ALL`] order on ties.
    pub worst_corner: Corner,
    /// Status of `worst_corner`.
    pub worst_status: StabilityStatus,
}

impl VehicleAssessment {
    /// Evaluation of one corner.
    pub fn get(&self, corner: Corner) -> &Evaluation {
        match corner {
            Corner::FrontLeft => &self.front_left,
            Corner::FrontRight => &self.front_right,
            Corner::RearLeft => &self.rear_left,
            Corner::RearRight => &self.rear_right,
        }
    }

    /// `(corner, evaluation)` pairs in [`Corner::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Corner, &Evaluation)> {
        Corner::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl TireLimits {
    /// Evaluate all four corners with this table and configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, in [`Corner::ALL`] order.
    ///
    /// # Examples
    ///
    /// ```
    /// use openracing_tire_limits::corners::{Corner, CornerLoad, VehicleLoads};
    /// use openracing_tire_limits::{StabilityStatus, TireCompound, TireLimits, TireState};
    ///
    /// let tire = |fz| TireState::new(fz, TireCompound::Performance);
    /// let loads = VehicleLoads {
    ///     front_left: CornerLoad::new(tire(3000.0), -1500.0, 800.0),
    ///     front_right: CornerLoad::new(tire(5000.0), -2500.0, 1800.0),
    ///     rear_left: CornerLoad::new(tire(3500.0), -600.0, 700.0),
    ///     rear_right: CornerLoad::new(tire(4500.0), -900.0, 1300.0),
    /// };
    ///
    /// let vehicle = TireLimits::STANDARD.assess_vehicle(&loads)?;
    /// assert_eq!(vehicle.worst_corner, Corner::FrontRight);
    /// assert!(vehicle.front_axle.lateral > 0.0);
    /// # Ok::<(), openracing_tire_limits::TireLimitError>(())
    /// ```
    pub fn assess_vehicle(&self, loads: &VehicleLoads) -> Result<VehicleAssessment> {
        let eval = |corner: Corner| {
            let load = loads.get(corner);
            self.evaluate(&load.state, load.fx, load.fy)
        };
        let front_left = eval(Corner::FrontLeft)?;
        let front_right = eval(Corner::FrontRight)?;
        let rear_left = eval(Corner::RearLeft)?;
        let rear_right = eval(Corner::RearRight)?;

        let mut front_axle = AxleCapacity::default();
        front_axle.add(&front_left);
        front_axle.add(&front_right);
        let mut rear_axle = AxleCapacity::default();
        rear_axle.add(&rear_left);
        rear_axle.add(&rear_right);

        let (worst_corner, worst_status) = worst_of([
            (Corner::FrontLeft, &front_left),
            (Corner::FrontRight, &front_right),
            (Corner::RearLeft, &rear_left),
            (Corner::RearRight, &rear_right),
        ]);

        Ok(VehicleAssessment {
            front_left,
            front_right,
            rear_left,
            rear_right,
            front_axle,
            rear_axle,
            worst_corner,
            worst_status,
        })
    }
}

/// Highest status wins; ties go to the higher ellipse usage, then to the
/// earlier corner.
fn worst_of(evals: [(Corner, &Evaluation); 4]) -> (Corner, StabilityStatus) {
    let mut worst = (Corner::FrontLeft, StabilityStatus::Stable, Usage::ZERO);
    for (i, (corner, e)) in evals.into_iter().enumerate() {
        let status = e.stability.status;
        let usage = e.ellipse.usage;
        if i == 0 || status > worst.1 || (status == worst.1 && usage > worst.2) {
            worst = (corner, status, usage);
        }
    }
    (worst.0, worst.1)
}
