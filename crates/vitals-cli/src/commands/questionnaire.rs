use std::path::Path;
use vitals_core::error::VitalsError;

use crate::config::TableConfig;

pub fn show(tables: &TableConfig) -> Result<(), VitalsError> {
    let q = super::questionnaire(None, tables)?;

    println!("{} (v{})", q.name, q.version);
    if let Some(ref desc) = q.description {
        println!("{}", desc);
    }
    println!();

    for category in q.categories() {
        println!("[{}]", category);
        for question in q.questions.iter().filter(|qq| qq.category == category) {
            println!("  {}  {}", question.id, question.text);
            for option in &question.options {
                println!("        {} = {}", option.value, option.label);
            }
        }
        println!();
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), VitalsError> {
    let q = vitals_core::questionnaire::load_questionnaire(file)?;
    println!(
        "Valid: {} (v{}), {} questions in {} categories",
        q.name,
        q.version,
        q.questions.len(),
        q.categories().len()
    );
    Ok(())
}
