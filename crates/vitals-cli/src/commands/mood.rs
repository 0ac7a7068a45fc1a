use std::path::PathBuf;
use vitals_core::error::VitalsError;
use vitals_core::questionnaire::Responses;

use crate::config::TableConfig;
use crate::output;

pub fn run(
    input_file: PathBuf,
    questionnaire: Option<PathBuf>,
    tables: &TableConfig,
    output_format: &str,
) -> Result<(), VitalsError> {
    let questionnaire = super::questionnaire(questionnaire, tables)?;

    let json = std::fs::read_to_string(&input_file)?;
    let responses: Responses = serde_json::from_str(&json)?;
    let outcome = vitals_core::score_questionnaire(&responses, &questionnaire)?;

    match output_format {
        "json" => output::json::print(&outcome)?,
        _ => output::text::print_mood(&outcome),
    }

    Ok(())
}
