//! Vital-sign readings consumed by triage scoring.
//!
//! Every reading is optional: intake often records only a subset, and a
//! missing reading contributes no abnormality penalty.  Blood pressure is
//! parsed once at the boundary from the charted `"systolic/diastolic"` text,
//! so scoring itself never fails.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Arterial blood pressure in mmHg.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BloodPressure {
    pub systolic:  u16,
    pub diastolic: u16,
}

impl BloodPressure {
    pub fn new(systolic: u16, diastolic: u16) -> Self {
        Self { systolic, diastolic }
    }
}

impl FromStr for BloodPressure {
    type Err = CoreError;

    /// Parse `"120/80"` (surrounding whitespace tolerated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidBloodPressure(s.to_owned());
        let (sys, dia) = s.trim().split_once('/').ok_or_else(invalid)?;
        let systolic = sys.trim().parse::<u16>().map_err(|_| invalid())?;
        let diastolic = dia.trim().parse::<u16>().map_err(|_| invalid())?;
        Ok(Self { systolic, diastolic })
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// One set of vital signs taken at triage.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VitalSigns {
    /// Beats per minute.
    pub heart_rate: Option<f64>,
    pub blood_pressure: Option<BloodPressure>,
    /// SpO2 percentage.
    pub oxygen_saturation: Option<f64>,
    /// Breaths per minute.
    pub respiratory_rate: Option<f64>,
    pub temperature_c: Option<f64>,
}

impl VitalSigns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heart_rate(mut self, bpm: f64) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    pub fn with_blood_pressure(mut self, bp: BloodPressure) -> Self {
        self.blood_pressure = Some(bp);
        self
    }

    pub fn with_oxygen_saturation(mut self, spo2: f64) -> Self {
        self.oxygen_saturation = Some(spo2);
        self
    }

    pub fn with_respiratory_rate(mut self, rr: f64) -> Self {
        self.respiratory_rate = Some(rr);
        self
    }

    pub fn with_temperature_c(mut self, temp: f64) -> Self {
        self.temperature_c = Some(temp);
        self
    }

    /// `true` if no reading has been recorded.
    pub fn is_empty(&self) -> bool {
        self.heart_rate.is_none()
            && self.blood_pressure.is_none()
            && self.oxygen_saturation.is_none()
            && self.respiratory_rate.is_none()
            && self.temperature_c.is_none()
    }
}
