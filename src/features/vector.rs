//! Health record vectorization

use crate::data::HealthRecord;
use crate::error::AssessmentError;

/// Record keys that must be present for an assessment.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "age",
    "gender",
    "bmi",
    "blood_pressure_systolic",
    "blood_pressure_diastolic",
    "heart_rate",
    "temperature",
    "oxygen_saturation",
];

/// Column names of the feature vector, in encoding order.
pub const FEATURE_NAMES: [&str; 8] = [
    "age",
    "gender_is_male",
    "bmi",
    "blood_pressure_systolic",
    "blood_pressure_diastolic",
    "heart_rate",
    "temperature",
    "oxygen_saturation",
];

/// Encode a record into the raw (unscaled) feature vector.
///
/// Gender maps to a binary indicator, case-insensitively; every other field
/// passes through as-is. Fields are not range-checked. The first missing
/// required field aborts encoding.
pub fn vectorize_raw(record: &HealthRecord) -> Result<Vec<f64>, AssessmentError> {
    for field in REQUIRED_FIELDS {
        if !record.contains(field) {
            return Err(AssessmentError::MissingField(field));
        }
    }

    let gender_is_male = if record.string("gender")?.eq_ignore_ascii_case("male") {
        1.0
    } else {
        0.0
    };

    Ok(vec![
        record.number("age")?,
        gender_is_male,
        record.number("bmi")?,
        record.number("blood_pressure_systolic")?,
        record.number("blood_pressure_diastolic")?,
        record.number("heart_rate")?,
        record.number("temperature")?,
        record.number("oxygen_saturation")?,
    ])
}
