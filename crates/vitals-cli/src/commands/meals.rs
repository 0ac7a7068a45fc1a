use rust_decimal::Decimal;
use std::path::PathBuf;
use vitals_core::error::VitalsError;
use vitals_core::meals::{summarize, Meal};

use crate::output;

pub fn run(
    input_file: PathBuf,
    daily_goal: Option<Decimal>,
    output_format: &str,
) -> Result<(), VitalsError> {
    let json = std::fs::read_to_string(&input_file)?;
    let meals: Vec<Meal> = serde_json::from_str(&json)?;
    for meal in &meals {
        meal.validate()?;
    }

    let summary = summarize(&meals, daily_goal);

    match output_format {
        "json" => output::json::print(&summary)?,
        _ => output::text::print_meals(&meals, &summary),
    }

    Ok(())
}
