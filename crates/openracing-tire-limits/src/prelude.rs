//! Prelude for the tire limits crate.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//!
//! ```
//! use openracing_tire_limits::prelude::*;
//!
//! let state = TireState::new(4000.0, TireCompound::Performance);
//! let report = stability_assessment(&state, 1500.0, 2000.0, DEFAULT_WARNING_THRESHOLD)?;
//! assert_eq!(report.status, StabilityStatus::Stable);
//! # Ok::<(), TireLimitError>(())
//! ```

pub use crate::compound::TireCompound;
pub use crate::config::{DEFAULT_COUPLING_FACTOR, DEFAULT_WARNING_THRESHOLD, LimitConfig};
pub use crate::error::{ConfigError, TireLimitError, ValidationError};
pub use crate::evaluator::{Evaluation, TireLimits};
pub use crate::friction::EffectiveFriction;
pub use crate::limits::{LimitModel, LimitResult};
pub use crate::stability::{StabilityAssessment, StabilityStatus};
pub use crate::state::{TireState, ValidatedTireState};
pub use crate::usage::Usage;
pub use crate::{
    combined_slip_limit, effective_friction, friction_ellipse_limit, stability_assessment, validate,
};
