//! Advisory rule derivation
//!
//! Threshold rules that turn the raw record and the classifier score into
//! recommendations, flagged risk factors, and a follow-up horizon. Rules
//! are evaluated independently; every matching rule fires, in a fixed
//! order.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::report::{Category, FactorLevel, Priority, Recommendation, RiskFactor};
use crate::data::HealthRecord;
use crate::error::AssessmentError;

/// Derive recommendations from the record and the risk score.
pub fn recommendations(
    record: &HealthRecord,
    risk_score: f64,
) -> Result<Vec<Recommendation>, AssessmentError> {
    let mut recommendations = Vec::new();

    let bmi = record.number("bmi")?;
    if bmi > 25.0 {
        recommendations.push(Recommendation {
            category: Category::Lifestyle,
            action: "Consider a balanced diet and regular exercise".to_string(),
            priority: if bmi > 30.0 {
                Priority::High
            } else {
                Priority::Medium
            },
        });
    }

    let systolic = record.number("blood_pressure_systolic")?;
    let diastolic = record.number("blood_pressure_diastolic")?;
    if systolic > 140.0 || diastolic > 90.0 {
        recommendations.push(Recommendation {
            category: Category::Medical,
            action: "Monitor blood pressure regularly and consult healthcare provider"
                .to_string(),
            priority: Priority::High,
        });
    }

    if risk_score > 0.7 {
        recommendations.push(Recommendation {
            category: Category::Urgent,
            action: "Schedule immediate consultation with healthcare provider".to_string(),
            priority: Priority::High,
        });
    }

    Ok(recommendations)
}

/// Flag out-of-range vitals as risk factors.
pub fn risk_factors(record: &HealthRecord) -> Result<Vec<RiskFactor>, AssessmentError> {
    let mut factors = Vec::new();

    let bmi = record.number("bmi")?;
    if bmi > 25.0 {
        factors.push(RiskFactor {
            factor: "BMI".to_string(),
            level: FactorLevel::High,
            value: json!(bmi),
        });
    }

    let systolic = record.number("blood_pressure_systolic")?;
    if systolic > 140.0 {
        let diastolic = record.number("blood_pressure_diastolic")?;
        factors.push(RiskFactor {
            factor: "Blood Pressure".to_string(),
            level: FactorLevel::High,
            value: json!(format!("{systolic}/{diastolic}")),
        });
    }

    let oxygen_saturation = record.number("oxygen_saturation")?;
    if oxygen_saturation < 95.0 {
        factors.push(RiskFactor {
            factor: "Oxygen Saturation".to_string(),
            level: FactorLevel::Low,
            value: json!(oxygen_saturation),
        });
    }

    Ok(factors)
}

/// Follow-up horizon from the risk score.
///
/// Note the strict comparisons: a score of exactly 0.7 gets the 30-day
/// horizon even though the same score lands in the HIGH tier.
pub fn next_checkup(risk_score: f64, now: DateTime<Utc>) -> DateTime<Utc> {
    if risk_score > 0.7 {
        now + Duration::days(7)
    } else if risk_score > 0.3 {
        now + Duration::days(30)
    } else {
        now + Duration::days(90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bmi: f64, systolic: f64, diastolic: f64, spo2: f64) -> HealthRecord {
        let mut record = HealthRecord::new();
        record.set_number("age", 50.0);
        record.set_string("gender", "female");
        record.set_number("bmi", bmi);
        record.set_number("blood_pressure_systolic", systolic);
        record.set_number("blood_pressure_diastolic", diastolic);
        record.set_number("heart_rate", 72.0);
        record.set_number("temperature", 36.7);
        record.set_number("oxygen_saturation", spo2);
        record
    }

    #[test]
    fn test_healthy_record_yields_no_advice() {
        let record = record(22.0, 118.0, 76.0, 99.0);

        assert!(recommendations(&record, 0.1).unwrap().is_empty());
        assert!(risk_factors(&record).unwrap().is_empty());
    }

    #[test]
    fn test_all_recommendation_rules_fire_in_order() {
        let record = record(32.0, 150.0, 95.0, 98.0);
        let recs = recommendations(&record, 0.8).unwrap();

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].category, Category::Lifestyle);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[1].category, Category::Medical);
        assert_eq!(recs[2].category, Category::Urgent);
    }

    #[test]
    fn test_bmi_priority_splits_at_30() {
        let medium = recommendations(&record(27.0, 118.0, 76.0, 99.0), 0.1).unwrap();
        assert_eq!(medium[0].priority, Priority::Medium);

        let boundary = recommendations(&record(30.0, 118.0, 76.0, 99.0), 0.1).unwrap();
        assert_eq!(boundary[0].priority, Priority::Medium);

        let high = recommendations(&record(30.5, 118.0, 76.0, 99.0), 0.1).unwrap();
        assert_eq!(high[0].priority, Priority::High);
    }

    #[test]
    fn test_diastolic_alone_triggers_medical_advice() {
        let recs = recommendations(&record(22.0, 120.0, 95.0, 99.0), 0.1).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, Category::Medical);
    }

    #[test]
    fn test_all_risk_factor_rules_fire_in_order() {
        let factors = risk_factors(&record(26.0, 145.0, 88.0, 92.0)).unwrap();

        assert_eq!(factors.len(), 3);
        assert_eq!(factors[0].factor, "BMI");
        assert_eq!(factors[0].value, json!(26.0));
        assert_eq!(factors[1].factor, "Blood Pressure");
        assert_eq!(factors[1].value, json!("145/88"));
        assert_eq!(factors[2].factor, "Oxygen Saturation");
        assert_eq!(factors[2].level, FactorLevel::Low);
    }

    #[test]
    fn test_checkup_horizons_are_boundary_exact() {
        let now = Utc::now();

        assert_eq!(next_checkup(0.71, now), now + Duration::days(7));
        // 0.7 falls through to the 30-day horizon, unlike the HIGH tier cut.
        assert_eq!(next_checkup(0.7, now), now + Duration::days(30));
        assert_eq!(next_checkup(0.31, now), now + Duration::days(30));
        assert_eq!(next_checkup(0.3, now), now + Duration::days(90));
        assert_eq!(next_checkup(0.1, now), now + Duration::days(90));
    }
}
