//! Unit tests for er-core primitives.

#[cfg(test)]
mod ids {
    use std::collections::HashMap;

    use crate::{PatientId, ResourceId};

    #[test]
    fn display_is_the_raw_string() {
        assert_eq!(PatientId::from("P000007").to_string(), "P000007");
    }

    #[test]
    fn borrow_str_lookup() {
        let mut map = HashMap::new();
        map.insert(PatientId::from("P1"), 3);
        assert_eq!(map.get("P1"), Some(&3));
    }

    #[test]
    fn patient_becomes_resource_vertex() {
        let r: ResourceId = PatientId::from("P9").into();
        assert_eq!(r.as_str(), "P9");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(PatientId::from("P000001") < PatientId::from("P000002"));
    }
}

#[cfg(test)]
mod acuity {
    use crate::{AcuityLevel, CoreError};

    #[test]
    fn base_scores() {
        let scores: Vec<f64> = AcuityLevel::ALL.iter().map(|a| a.base_score()).collect();
        assert_eq!(scores, vec![100.0, 80.0, 60.0, 40.0, 20.0]);
    }

    #[test]
    fn try_from_in_range() {
        for n in 1..=5u8 {
            let level = AcuityLevel::try_from(n).unwrap();
            assert_eq!(level.level(), n);
            assert_eq!(u8::from(level), n);
        }
    }

    #[test]
    fn try_from_out_of_range() {
        assert!(matches!(AcuityLevel::try_from(0), Err(CoreError::InvalidAcuity(0))));
        assert!(matches!(AcuityLevel::try_from(6), Err(CoreError::InvalidAcuity(6))));
    }

    #[test]
    fn display() {
        assert_eq!(AcuityLevel::Level2.to_string(), "ESI-2");
    }
}

#[cfg(test)]
mod vitals {
    use crate::{BloodPressure, CoreError, VitalSigns};

    #[test]
    fn parse_blood_pressure() {
        let bp: BloodPressure = "120/80".parse().unwrap();
        assert_eq!(bp, BloodPressure::new(120, 80));
        let bp: BloodPressure = " 85 / 50 ".parse().unwrap();
        assert_eq!(bp.systolic, 85);
        assert_eq!(bp.to_string(), "85/50");
    }

    #[test]
    fn reject_malformed_blood_pressure() {
        for bad in ["120", "120/", "/80", "abc/def", "120-80", ""] {
            let err = bad.parse::<BloodPressure>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidBloodPressure(_)), "{bad:?}");
        }
    }

    #[test]
    fn builder_and_emptiness() {
        assert!(VitalSigns::new().is_empty());
        let v = VitalSigns::new().with_heart_rate(72.0).with_oxygen_saturation(98.0);
        assert!(!v.is_empty());
        assert_eq!(v.heart_rate, Some(72.0));
        assert!(v.blood_pressure.is_none());
    }
}

#[cfg(test)]
mod clock {
    use crate::clock::whole_minutes_between;
    use crate::{Clock, ManualClock};

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::from_unix_secs(1_700_000_000);
        let start = clock.now();
        clock.advance_minutes(45);
        assert_eq!(whole_minutes_between(start, clock.now()), 45);
        clock.advance_secs(59);
        assert_eq!(whole_minutes_between(start, clock.now()), 45);
    }

    #[test]
    fn elapsed_never_negative() {
        let clock = ManualClock::from_unix_secs(1_700_000_000);
        let later = clock.now() + chrono::Duration::minutes(10);
        assert_eq!(whole_minutes_between(later, clock.now()), 0);
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, FlowConfig};

    #[test]
    fn defaults_validate() {
        let cfg = FlowConfig::default();
        assert_eq!(cfg.waiting_room.average_treatment_minutes, 30);
        assert_eq!(cfg.triage.max_wait_points, 20.0);
        assert_eq!(cfg.resources.max_patients_per_provider, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_treatment_minutes() {
        let mut cfg = FlowConfig::default();
        cfg.waiting_room.average_treatment_minutes = 0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_negative_wait_weight() {
        let mut cfg = FlowConfig::default();
        cfg.triage.wait_points_per_minute = -1.0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }
}
