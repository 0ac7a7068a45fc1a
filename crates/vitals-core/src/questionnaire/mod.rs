pub mod outcome;
pub mod schema;
pub mod scorer;

pub use outcome::{CategoryScore, NarrativeRule, QuestionnaireOutcome};
pub use scorer::{score, Responses};

use crate::error::VitalsError;
use schema::QuestionnaireDef;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Load a questionnaire definition from a JSON file.
pub fn load_questionnaire(path: &Path) -> Result<QuestionnaireDef, VitalsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VitalsError::unavailable(path.display().to_string(), e))?;
    parse_questionnaire(&content, path)
}

/// Parse a questionnaire definition from a JSON string.
pub fn parse_questionnaire(json: &str, source: &Path) -> Result<QuestionnaireDef, VitalsError> {
    let questionnaire: QuestionnaireDef = serde_json::from_str(json)
        .map_err(|e| VitalsError::unavailable(source.display().to_string(), e))?;
    validate_questionnaire(&questionnaire)?;
    info!(
        questionnaire = %questionnaire.name,
        questions = questionnaire.questions.len(),
        "loaded questionnaire"
    );
    Ok(questionnaire)
}

/// Parse a questionnaire definition from a JSON string (no file path context).
pub fn parse_questionnaire_str(json: &str) -> Result<QuestionnaireDef, VitalsError> {
    let questionnaire: QuestionnaireDef = serde_json::from_str(json).map_err(VitalsError::Json)?;
    validate_questionnaire(&questionnaire)?;
    Ok(questionnaire)
}

/// Validate that a questionnaire definition is well-formed.
pub fn validate_questionnaire(questionnaire: &QuestionnaireDef) -> Result<(), VitalsError> {
    if questionnaire.questions.is_empty() {
        return Err(VitalsError::InvalidQuestionnaire(
            "questions must not be empty".into(),
        ));
    }

    let mut ids = HashSet::new();
    for question in &questionnaire.questions {
        if question.id.is_empty() {
            return Err(VitalsError::InvalidQuestionnaire(
                "question id must not be empty".into(),
            ));
        }
        if !ids.insert(question.id.as_str()) {
            return Err(VitalsError::InvalidQuestionnaire(format!(
                "duplicate question id '{}'",
                question.id
            )));
        }
        if question.options.is_empty() {
            return Err(VitalsError::InvalidQuestionnaire(format!(
                "question '{}' has no options",
                question.id
            )));
        }
        if !questionnaire.feedback.contains_key(&question.category) {
            return Err(VitalsError::InvalidQuestionnaire(format!(
                "question '{}' uses category '{}' which has no feedback",
                question.id, question.category
            )));
        }
    }

    for (category, feedback) in &questionnaire.feedback {
        if feedback.bands.is_empty() {
            return Err(VitalsError::InvalidQuestionnaire(format!(
                "category '{}' has no feedback bands",
                category
            )));
        }
        // Bands are scanned top-down, so thresholds must not increase.
        if feedback
            .bands
            .windows(2)
            .any(|pair| pair[1].threshold > pair[0].threshold)
        {
            return Err(VitalsError::InvalidQuestionnaire(format!(
                "category '{}' bands must be ordered from highest to lowest threshold",
                category
            )));
        }
    }

    let rules = &questionnaire.narrative;
    if rules.multiple_low.min_categories == 0 || rules.multiple_high.min_categories == 0 {
        return Err(VitalsError::InvalidQuestionnaire(
            "narrative min_categories must be at least 1".into(),
        ));
    }
    if let Some(rule) = &rules.stress_motivation {
        for category in [&rule.stress_category, &rule.motivation_category] {
            if !questionnaire.feedback.contains_key(category) {
                return Err(VitalsError::InvalidQuestionnaire(format!(
                    "stress/motivation rule references unknown category '{}'",
                    category
                )));
            }
        }
    }

    Ok(())
}
