use std::path::PathBuf;
use tracing::info;
use vitals_core::error::VitalsError;
use vitals_core::model::LabSubmission;

use crate::config::TableConfig;
use crate::output;

pub fn run(
    input_file: PathBuf,
    reference: Option<PathBuf>,
    tables: &TableConfig,
    output_format: &str,
    show_all: bool,
) -> Result<(), VitalsError> {
    let table = super::reference_table(reference, tables)?;

    let json = std::fs::read_to_string(&input_file)?;
    let submission: LabSubmission = serde_json::from_str(&json)?;
    if submission.is_empty() {
        info!(file = %input_file.display(), "submission contains no values");
    }

    let report = vitals_core::evaluate_lab(&submission, &table)?;

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::text::print_lab(&report, show_all),
    }

    Ok(())
}
