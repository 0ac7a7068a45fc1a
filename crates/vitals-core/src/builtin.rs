use crate::error::VitalsError;
use crate::questionnaire::schema::QuestionnaireDef;
use crate::questionnaire::validate_questionnaire;
use crate::reference::schema::ReferenceTable;
use crate::reference::validate_reference_table;
use crate::referral::{validate_referral_table, ReferralTable};

const REFERENCE_RANGES_JSON: &str = include_str!("../../../data/reference-ranges.json");
const QUESTIONNAIRE_JSON: &str = include_str!("../../../data/questionnaire.json");
const REFERRAL_JSON: &str = include_str!("../../../data/referral.json");

/// The builtin adult reference ranges.
pub fn reference_table() -> Result<ReferenceTable, VitalsError> {
    let table: ReferenceTable = serde_json::from_str(REFERENCE_RANGES_JSON)
        .map_err(|e| VitalsError::unavailable("builtin:reference", e))?;
    validate_reference_table(&table)?;
    Ok(table)
}

/// The builtin weekly mood and stress questionnaire.
pub fn questionnaire() -> Result<QuestionnaireDef, VitalsError> {
    let questionnaire: QuestionnaireDef = serde_json::from_str(QUESTIONNAIRE_JSON)
        .map_err(|e| VitalsError::unavailable("builtin:questionnaire", e))?;
    validate_questionnaire(&questionnaire)?;
    Ok(questionnaire)
}

/// The builtin complaint-to-clinic table.
pub fn referral_table() -> Result<ReferralTable, VitalsError> {
    let table: ReferralTable = serde_json::from_str(REFERRAL_JSON)
        .map_err(|e| VitalsError::unavailable("builtin:referral", e))?;
    validate_referral_table(&table)?;
    Ok(table)
}
