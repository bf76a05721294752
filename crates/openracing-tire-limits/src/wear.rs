//! Tire wear progression with distance.

use serde::{Deserialize, Serialize};

use crate::state::WEAR_RANGE;

/// Wear per kilometre at medium hardness.
pub const WEAR_RATE_PER_KM: f64 = 0.0001;

/// Compound hardness, scaling the wear rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundHardness {
    /// 0.8x wear rate.
    Soft,
    /// Reference wear rate, 1.0x.
    #[default]
    Medium,
    /// 1.2x wear rate.
    Hard,
}

impl CompoundHardness {
    /// Wear-rate multiplier.
    pub fn factor(&self) -> f64 {
        match self {
            CompoundHardness::Soft => 0.8,
            CompoundHardness::Medium => 1.0,
            CompoundHardness::Hard => 1.2,
        }
    }
}

/// Wear after driving `distance_km`, clamped to `[0, 1]`.
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::wear::{next_wear, CompoundHardness};
///
/// let w = next_wear(0.0, 5.0, CompoundHardness::Medium);
/// assert!((w - 0.0005).abs() < 1e-12);
/// assert!((next_wear(0.9999, 100.0, CompoundHardness::Hard) - 1.0).abs() < f64::EPSILON);
/// ```
pub fn next_wear(wear: f64, distance_km: f64, hardness: CompoundHardness) -> f64 {
    let rate = WEAR_RATE_PER_KM * hardness.factor();
    (wear + rate * distance_km).clamp(WEAR_RANGE.0, WEAR_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hardness_scales_rate() {
        let soft = next_wear(0.1, 100.0, CompoundHardness::Soft);
        let hard = next_wear(0.1, 100.0, CompoundHardness::Hard);
        assert_relative_eq!(soft, 0.108, epsilon = 1e-12);
        assert_relative_eq!(hard, 0.112, epsilon = 1e-12);
    }

    #[test]
    fn test_never_leaves_band() {
        assert_relative_eq!(next_wear(0.0, -1e6, CompoundHardness::Medium), 0.0);
        assert_relative_eq!(next_wear(0.5, 1e9, CompoundHardness::Soft), 1.0);
    }
}
