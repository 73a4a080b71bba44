//! Wearable vitals: bar levels, critical flags and simulated readings.

use rand::Rng;
use scope_model::HealthData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalLevel {
    Nominal,
    Caution,
    Critical,
}

/// One row of the vitals panel.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalReading {
    pub label: &'static str,
    pub value: String,
    /// Bar fill, 0..=100.
    pub percentage: u16,
    pub level: VitalLevel,
    pub critical: bool,
}

fn bar(value: f64) -> u16 {
    value.clamp(0.0, 100.0).round() as u16
}

fn level_above(value: f64, caution: f64, critical: f64) -> VitalLevel {
    if value > critical {
        VitalLevel::Critical
    } else if value > caution {
        VitalLevel::Caution
    } else {
        VitalLevel::Nominal
    }
}

fn level_below(value: f64, caution: f64, critical: f64) -> VitalLevel {
    if value < critical {
        VitalLevel::Critical
    } else if value < caution {
        VitalLevel::Caution
    } else {
        VitalLevel::Nominal
    }
}

pub fn vital_readings(h: &HealthData) -> Vec<VitalReading> {
    let hr = f64::from(h.heart_rate);
    let o2 = f64::from(h.blood_oxygen);
    let stress = f64::from(h.stress);
    let battery = f64::from(h.battery);
    let armor = f64::from(h.armor_integrity);

    vec![
        VitalReading {
            label: "HEART RATE",
            value: format!("{} BPM", h.heart_rate),
            percentage: bar(hr / 200.0 * 100.0),
            level: if hr > 120.0 { VitalLevel::Critical } else { VitalLevel::Nominal },
            critical: !(50.0..=120.0).contains(&hr),
        },
        VitalReading {
            label: "BODY TEMP",
            value: format!("{:.1}°C", h.body_temp),
            percentage: bar((h.body_temp - 35.0) / 5.0 * 100.0),
            level: if h.body_temp > 38.0 { VitalLevel::Critical } else { VitalLevel::Nominal },
            critical: h.body_temp > 38.5,
        },
        VitalReading {
            label: "BLOOD O2",
            value: format!("{}%", h.blood_oxygen),
            percentage: bar(o2),
            level: level_below(o2, 100.0, 90.0),
            critical: o2 < 90.0,
        },
        VitalReading {
            label: "STRESS",
            value: format!("{}%", h.stress),
            percentage: bar(stress),
            level: level_above(stress, 50.0, 70.0),
            critical: stress > 80.0,
        },
        VitalReading {
            label: "BATTERY",
            value: format!("{}%", h.battery),
            percentage: bar(battery),
            level: level_below(battery, 30.0, 20.0),
            critical: battery < 20.0,
        },
        VitalReading {
            label: "ARMOR",
            value: format!("{}%", h.armor_integrity),
            percentage: bar(armor),
            level: level_below(armor, 60.0, 50.0),
            critical: armor < 50.0,
        },
    ]
}

/// Plausible resting readings with a little jitter.
pub fn simulate_health<R: Rng>(rng: &mut R) -> HealthData {
    HealthData {
        heart_rate: 82 + rng.gen_range(0..10),
        body_temp: 36.8 + rng.gen::<f64>() * 0.4,
        blood_oxygen: 96 + rng.gen_range(0..3),
        stress: 35 + rng.gen_range(0..20),
        battery: 73,
        armor_integrity: 88,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nominal() -> HealthData {
        HealthData {
            heart_rate: 85,
            body_temp: 37.0,
            blood_oxygen: 100,
            stress: 40,
            battery: 73,
            armor_integrity: 88,
        }
    }

    #[test]
    fn resting_vitals_are_not_critical() {
        let r = vital_readings(&nominal());
        assert_eq!(r.len(), 6);
        assert!(r.iter().all(|v| !v.critical));
        assert!(r.iter().all(|v| v.level == VitalLevel::Nominal));
    }

    #[test]
    fn thresholds() {
        let h = HealthData {
            heart_rate: 45,
            body_temp: 38.7,
            blood_oxygen: 88,
            stress: 85,
            battery: 15,
            armor_integrity: 55,
        };
        let r = vital_readings(&h);
        assert!(r[0].critical, "low heart rate");
        assert_eq!(r[0].level, VitalLevel::Nominal);
        assert!(r[1].critical && r[1].level == VitalLevel::Critical);
        assert!(r[2].critical);
        assert!(r[3].critical);
        assert!(r[4].critical);
        assert!(!r[5].critical);
        assert_eq!(r[5].level, VitalLevel::Caution);
    }

    #[test]
    fn stress_between_bands() {
        let mut h = nominal();
        h.stress = 75;
        let r = &vital_readings(&h)[3];
        assert_eq!(r.level, VitalLevel::Critical);
        assert!(!r.critical);
    }

    #[test]
    fn bar_is_clamped() {
        let mut h = nominal();
        h.body_temp = 45.0;
        h.heart_rate = 500;
        let r = vital_readings(&h);
        assert_eq!(r[0].percentage, 100);
        assert_eq!(r[1].percentage, 100);
        h.body_temp = 30.0;
        assert_eq!(vital_readings(&h)[1].percentage, 0);
    }

    #[test]
    fn simulated_values_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let h = simulate_health(&mut rng);
            assert!((82..92).contains(&h.heart_rate));
            assert!((36.8..37.2).contains(&h.body_temp));
            assert!((96..99).contains(&h.blood_oxygen));
            assert!((35..55).contains(&h.stress));
            assert!(vital_readings(&h).iter().all(|v| !v.critical));
        }
    }
}
