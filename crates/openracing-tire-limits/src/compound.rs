//! Tire compound classification.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tire compound families known to the friction model table.
///
/// The set is closed: every compound has exactly one entry in
/// [`FrictionModelTable`](crate::FrictionModelTable).
///
/// # Examples
///
/// ```
/// use openracing_tire_limits::TireCompound;
///
/// let compound: TireCompound = "race_slick".parse()?;
/// assert_eq!(compound, TireCompound::RaceSlick);
/// assert_eq!(compound.to_string(), "race_slick");
///
/// assert!("gravel".parse::<TireCompound>().is_err());
/// # Ok::<(), openracing_tire_limits::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TireCompound {
    /// All-season road tire.
    Street,
    /// Summer performance tire.
    #[default]
    Performance,
    /// Racing slick.
    RaceSlick,
    /// Wet weather tire.
    Rain,
    /// Cold weather tire.
    Winter,
}

impl TireCompound {
    /// Every compound, in table order.
    pub const ALL: [TireCompound; 5] = [
        TireCompound::Street,
        TireCompound::Performance,
        TireCompound::RaceSlick,
        TireCompound::Rain,
        TireCompound::Winter,
    ];

    /// Stable identifier, matching the serde name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TireCompound::Street => "street",
            TireCompound::Performance => "performance",
            TireCompound::RaceSlick => "race_slick",
            TireCompound::Rain => "rain",
            TireCompound::Winter => "winter",
        }
    }
}

impl fmt::Display for TireCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TireCompound {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TireCompound::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownCompound(s.to_string()))
    }
}
