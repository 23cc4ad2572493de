//! Emergency Severity Index acuity levels.

use std::fmt;

use crate::CoreError;

/// ESI triage level: 1 (resuscitation, most urgent) to 5 (non-urgent).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum AcuityLevel {
    /// Resuscitation.
    Level1,
    /// Emergent.
    Level2,
    /// Urgent.
    Level3,
    /// Less urgent.
    Level4,
    /// Non-urgent.
    Level5,
}

impl AcuityLevel {
    pub const ALL: [AcuityLevel; 5] = [
        AcuityLevel::Level1,
        AcuityLevel::Level2,
        AcuityLevel::Level3,
        AcuityLevel::Level4,
        AcuityLevel::Level5,
    ];

    /// Numeric ESI level (1–5).
    pub fn level(self) -> u8 {
        match self {
            AcuityLevel::Level1 => 1,
            AcuityLevel::Level2 => 2,
            AcuityLevel::Level3 => 3,
            AcuityLevel::Level4 => 4,
            AcuityLevel::Level5 => 5,
        }
    }

    /// Base triage score before wait-time and vital-sign adjustments.
    pub fn base_score(self) -> f64 {
        match self {
            AcuityLevel::Level1 => 100.0,
            AcuityLevel::Level2 => 80.0,
            AcuityLevel::Level3 => 60.0,
            AcuityLevel::Level4 => 40.0,
            AcuityLevel::Level5 => 20.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AcuityLevel::Level1 => "resuscitation",
            AcuityLevel::Level2 => "emergent",
            AcuityLevel::Level3 => "urgent",
            AcuityLevel::Level4 => "less urgent",
            AcuityLevel::Level5 => "non-urgent",
        }
    }
}

impl TryFrom<u8> for AcuityLevel {
    type Error = CoreError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(AcuityLevel::Level1),
            2 => Ok(AcuityLevel::Level2),
            3 => Ok(AcuityLevel::Level3),
            4 => Ok(AcuityLevel::Level4),
            5 => Ok(AcuityLevel::Level5),
            n => Err(CoreError::InvalidAcuity(n)),
        }
    }
}

impl From<AcuityLevel> for u8 {
    fn from(level: AcuityLevel) -> u8 {
        level.level()
    }
}

impl fmt::Display for AcuityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ESI-{}", self.level())
    }
}
