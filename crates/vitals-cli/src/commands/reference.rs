use std::path::Path;
use vitals_core::error::VitalsError;
use vitals_core::model::LabCategory;
use vitals_core::reference::schema::{ReferenceTable, Tracking};

use crate::config::TableConfig;

pub fn list(tables: &TableConfig) -> Result<(), VitalsError> {
    let table = super::reference_table(None, tables)?;
    print!("{}", format_list(&table));
    Ok(())
}

fn format_list(table: &ReferenceTable) -> String {
    let mut out = format!("{} (v{})\n", table.name, table.version);
    if let Some(ref desc) = table.description {
        out.push_str(&format!("{}\n", desc));
    }
    out.push('\n');

    for category in LabCategory::ALL {
        let entries = table.entries(category);
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("  {}:\n", category));
        for entry in entries {
            out.push_str(&format!(
                "    {:<14} {:<22} {} {}\n",
                entry.key,
                entry.name,
                entry.range_label(),
                entry.unit.as_deref().unwrap_or("")
            ));
        }
        out.push('\n');
    }
    out
}

pub fn explain(category: &str, tables: &TableConfig) -> Result<(), VitalsError> {
    let Some(category) = LabCategory::from_str_loose(category) else {
        return Err(VitalsError::InvalidReference(format!(
            "unknown category '{}', expected hemogram, biochemistry or vitamins",
            category
        )));
    };
    let table = super::reference_table(None, tables)?;
    print!("{}", format_explanation(&table, category));
    Ok(())
}

fn format_explanation(table: &ReferenceTable, category: LabCategory) -> String {
    let mut out = format!("{} tests in {} (version {})\n\n", category, table.name, table.version);

    let entries = table.entries(category);
    let max_name = entries.iter().map(|e| e.name.len()).max().unwrap_or(20);
    out.push_str(&format!(
        "  {:<width$}  {:<14}  Unit\n",
        "Test",
        "Range",
        width = max_name
    ));
    out.push_str(&format!("  {}\n", "-".repeat(max_name + 26)));
    for entry in entries {
        out.push_str(&format!(
            "  {:<width$}  {:<14}  {}\n",
            entry.name,
            entry.range_label(),
            entry.unit.as_deref().unwrap_or("-"),
            width = max_name
        ));
        if let Some(ref note) = entry.note {
            out.push_str(&format!("    {}\n", note));
        }
    }

    for group in table.groups.iter().filter(|g| g.category == category) {
        let members: Vec<&str> = table
            .entries(category)
            .iter()
            .filter(|e| group.covers(category, &e.key))
            .map(|e| e.name.as_str())
            .collect();
        let tracked = match group.tracking {
            Tracking::Both => "low and high values",
            Tracking::LowOnly => "low values only",
        };
        out.push_str(&format!(
            "\nThe {} ({}) is reported as one combined comment, tracking {}.\n",
            group.name,
            members.join(", "),
            tracked
        ));
    }
    out
}

pub fn validate(file: &Path) -> Result<(), VitalsError> {
    let table = vitals_core::reference::load_reference_table(file)?;
    println!(
        "Valid: {} (v{}), {} tests, {} groups",
        table.name,
        table.version,
        table.test_count(),
        table.groups.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::builtin;

    #[test]
    fn explanation_describes_groups() {
        let table = builtin::reference_table().unwrap();
        let text = format_explanation(&table, LabCategory::Biochemistry);
        assert!(text.contains("Fasting Glucose"));
        assert!(text.contains("lipid panel"));
        assert!(text.contains("tracking low and high values"));
    }

    #[test]
    fn explanation_without_groups() {
        let table = builtin::reference_table().unwrap();
        let text = format_explanation(&table, LabCategory::Hemogram);
        assert!(text.contains("Hemoglobin"));
        assert!(!text.contains("combined comment"));
    }

    #[test]
    fn list_prints_each_unit_once() {
        let table = builtin::reference_table().unwrap();
        let text = format_list(&table);
        let hgb = text.lines().find(|l| l.trim_start().starts_with("hgb")).unwrap();
        assert!(hgb.contains("12 - 17 g/dL"));
        assert_eq!(hgb.matches("g/dL").count(), 1);
    }

    #[test]
    fn unknown_category_rejected() {
        let err = explain("urine", &TableConfig::default()).unwrap_err();
        assert!(matches!(err, VitalsError::InvalidReference(_)));
    }
}
