use vitals_core::error::VitalsError;

use crate::config::TableConfig;

pub fn run(complaint: &str, city: Option<&str>, tables: &TableConfig) -> Result<(), VitalsError> {
    let table = super::referral_table(tables)?;

    if complaint.trim().eq_ignore_ascii_case("list") {
        println!("Known complaints:\n");
        for c in table.complaints() {
            println!("  {c}");
        }
        return Ok(());
    }

    let clinics = table.recommend(complaint, city);
    if clinics.is_empty() {
        println!("No clinic suggestion for '{}'.", complaint.trim());
        println!("Run `vitals referral list` to see known complaints.");
        return Ok(());
    }

    println!("Suggested clinics for '{}':\n", complaint.trim());
    for (i, clinic) in clinics.iter().enumerate() {
        println!("  {}. {}", i + 1, clinic);
    }
    Ok(())
}
