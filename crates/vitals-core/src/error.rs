#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("configuration unavailable ({origin}): {reason}")]
    ConfigUnavailable { origin: String, reason: String },

    #[error("invalid reference table: {0}")]
    InvalidReference(String),

    #[error("invalid questionnaire: {0}")]
    InvalidQuestionnaire(String),

    #[error("invalid referral table: {0}")]
    InvalidReferral(String),

    #[error("failed to parse value: {0}")]
    ParseError(String),

    #[error("profile is incomplete, missing: {}", .missing.join(", "))]
    IncompleteProfile { missing: Vec<&'static str> },

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("invalid meal: {0}")]
    InvalidMeal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VitalsError {
    pub(crate) fn unavailable(origin: impl Into<String>, reason: impl ToString) -> Self {
        VitalsError::ConfigUnavailable {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}
