//! Error types for health risk assessment.

use thiserror::Error;

/// Errors raised while preparing or scoring a health record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// A required input field is absent from the record.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but cannot be read as the expected type.
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField {
        /// The offending field name
        field: String,
        /// What was wrong with the value
        reason: String,
    },

    /// The classifier produced an unusable prediction.
    #[error("Classifier error: {0}")]
    Classifier(String),
}

/// Coarse failure category reported to callers.
///
/// Every failure shares one wire shape; the kind tag keeps bad input
/// distinguishable from internal faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The input record failed validation.
    Validation,
    /// Anything else that went wrong during scoring.
    Unexpected,
}

impl AssessmentError {
    /// Map an error to the caller-facing failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssessmentError::MissingField(_) => ErrorKind::Validation,
            AssessmentError::InvalidField { .. } | AssessmentError::Classifier(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = AssessmentError::MissingField("bmi");
        assert_eq!(err.to_string(), "Missing required field: bmi");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_invalid_field_is_unexpected() {
        let err = AssessmentError::InvalidField {
            field: "age".to_string(),
            reason: "expected a number".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
