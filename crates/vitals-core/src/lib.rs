pub mod builtin;
pub mod energy;
pub mod error;
pub mod lab;
pub mod meals;
pub mod model;
pub mod parsing;
pub mod questionnaire;
pub mod reference;
pub mod referral;

use error::VitalsError;
use lab::LabReport;
use model::LabSubmission;
use questionnaire::schema::QuestionnaireDef;
use questionnaire::{QuestionnaireOutcome, Responses};
use reference::schema::ReferenceTable;

/// Evaluate a blood test against a reference table.
///
/// Returns the structured report; call [`LabReport::render`] for the text
/// block stored alongside the test result.
pub fn evaluate_lab(
    submission: &LabSubmission,
    table: &ReferenceTable,
) -> Result<LabReport, VitalsError> {
    lab::evaluate(submission, table)
}

/// Score a questionnaire response.
pub fn score_questionnaire(
    responses: &Responses,
    questionnaire: &QuestionnaireDef,
) -> Result<QuestionnaireOutcome, VitalsError> {
    questionnaire::score(responses, questionnaire)
}
