pub mod schema;

use crate::error::VitalsError;
use crate::model::LabCategory;
use crate::parsing::normalize_label;
use schema::ReferenceTable;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Load a reference table from a JSON file.
pub fn load_reference_table(path: &Path) -> Result<ReferenceTable, VitalsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VitalsError::unavailable(path.display().to_string(), e))?;
    parse_reference_table(&content, path)
}

/// Parse a reference table from a JSON string.
pub fn parse_reference_table(json: &str, source: &Path) -> Result<ReferenceTable, VitalsError> {
    let table: ReferenceTable = serde_json::from_str(json)
        .map_err(|e| VitalsError::unavailable(source.display().to_string(), e))?;
    validate_reference_table(&table)?;
    info!(
        table = %table.name,
        version = %table.version,
        tests = table.test_count(),
        "loaded reference table"
    );
    Ok(table)
}

/// Parse a reference table from a JSON string (no file path context).
pub fn parse_reference_table_str(json: &str) -> Result<ReferenceTable, VitalsError> {
    let table: ReferenceTable = serde_json::from_str(json).map_err(VitalsError::Json)?;
    validate_reference_table(&table)?;
    Ok(table)
}

/// Validate that a reference table is well-formed.
pub fn validate_reference_table(table: &ReferenceTable) -> Result<(), VitalsError> {
    if table.test_count() == 0 {
        return Err(VitalsError::InvalidReference(
            "no tests defined in any category".into(),
        ));
    }

    for group in &table.groups {
        if !group.comment.contains("{findings}") {
            return Err(VitalsError::InvalidReference(format!(
                "group '{}' comment must contain a {{findings}} placeholder",
                group.name
            )));
        }
        for key in &group.tests {
            if table.entry(group.category, key).is_none() {
                return Err(VitalsError::InvalidReference(format!(
                    "group '{}' references unknown {} test '{}'",
                    group.name,
                    group.category.as_str(),
                    key
                )));
            }
        }
    }

    for category in LabCategory::ALL {
        let mut seen = HashSet::new();
        for entry in table.entries(category) {
            if entry.key.is_empty() {
                return Err(VitalsError::InvalidReference(format!(
                    "{} test with empty key",
                    category.as_str()
                )));
            }

            if normalize_label(&entry.key) != entry.key {
                return Err(VitalsError::InvalidReference(format!(
                    "test key '{}' is not canonical (expected '{}')",
                    entry.key,
                    normalize_label(&entry.key)
                )));
            }

            if !seen.insert(entry.key.as_str()) {
                return Err(VitalsError::InvalidReference(format!(
                    "duplicate {} test '{}'",
                    category.as_str(),
                    entry.key
                )));
            }

            let memberships = table
                .groups
                .iter()
                .filter(|g| g.covers(category, &entry.key))
                .count();
            if memberships > 1 {
                return Err(VitalsError::InvalidReference(format!(
                    "test '{}' belongs to more than one group",
                    entry.key
                )));
            }

            match (entry.min, entry.max) {
                (None, None) => {
                    return Err(VitalsError::InvalidReference(format!(
                        "test '{}' has neither min nor max",
                        entry.key
                    )));
                }
                (Some(min), Some(max)) if min > max => {
                    return Err(VitalsError::InvalidReference(format!(
                        "test '{}' has min {} greater than max {}",
                        entry.key, min, max
                    )));
                }
                _ => {}
            }

            // Grouped tests are reported through the group comment.
            if memberships == 1 {
                continue;
            }

            let has_comment = |c: Option<&schema::Commentary>| {
                c.and_then(|c| c.comment.as_deref())
                    .is_some_and(|s| !s.trim().is_empty())
            };
            if entry.min.is_some() && !has_comment(entry.low.as_ref()) {
                return Err(VitalsError::InvalidReference(format!(
                    "test '{}' has a min but no low comment",
                    entry.key
                )));
            }
            if entry.max.is_some() && !has_comment(entry.high.as_ref()) {
                return Err(VitalsError::InvalidReference(format!(
                    "test '{}' has a max but no high comment",
                    entry.key
                )));
            }
        }
    }

    Ok(())
}
