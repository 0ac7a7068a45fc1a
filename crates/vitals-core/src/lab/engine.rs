use crate::error::VitalsError;
use crate::lab::outcome::{LabReport, TestResult, TestStatus};
use crate::model::{FieldValues, LabCategory, LabSubmission};
use crate::parsing::{normalize_label, parse_value};
use crate::reference::schema::{RangeBand, ReferenceEntry, ReferenceTable, Tracking};
use std::collections::BTreeMap;
use tracing::debug;

/// Evaluate a lab submission against a reference table.
///
/// Tests are visited category by category in reference-table order. A field
/// that cannot be parsed is recorded as a comment and does not stop the rest
/// of the evaluation. Fields without a reference entry are skipped.
pub fn evaluate(
    submission: &LabSubmission,
    table: &ReferenceTable,
) -> Result<LabReport, VitalsError> {
    if table.test_count() == 0 {
        return Err(VitalsError::unavailable(
            table.name.clone(),
            "reference table defines no tests",
        ));
    }

    let mut report = LabReport::default();
    // Status list per aggregate group, e.g. ["high LDL", "low HDL"]
    let mut findings: Vec<Vec<String>> = vec![Vec::new(); table.groups.len()];

    for category in LabCategory::ALL {
        let Some(fields) = submission.category(category) else {
            continue;
        };
        let values = canonical_fields(fields);

        for key in values.keys() {
            if table.entry(category, key).is_none() {
                debug!(category = category.as_str(), field = %key, "no reference entry, skipping");
            }
        }

        for entry in table.entries(category) {
            let Some(&raw) = values.get(entry.key.as_str()) else {
                continue;
            };
            let group_idx = table.group_of(category, &entry.key);

            let value = match parse_value(raw) {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(e) => {
                    report.comments.push(format!(
                        "Could not analyze the value for {}: {}",
                        entry.name, e
                    ));
                    report.results.push(test_result(
                        category,
                        entry,
                        raw,
                        None,
                        TestStatus::Unreadable,
                        group_idx.map(|i| table.groups[i].name.clone()),
                    ));
                    continue;
                }
            };

            let band = entry.classify(value);
            let status = match band {
                RangeBand::Below => TestStatus::Low,
                RangeBand::Within => TestStatus::Normal,
                RangeBand::Above => TestStatus::High,
            };

            match group_idx {
                Some(idx) => {
                    let group = &table.groups[idx];
                    match band {
                        RangeBand::Below => findings[idx].push(format!("low {}", entry.name)),
                        RangeBand::Above if group.tracking == Tracking::Both => {
                            findings[idx].push(format!("high {}", entry.name))
                        }
                        _ => {}
                    }
                }
                None => apply_commentary(&mut report, entry, band),
            }

            debug!(
                category = category.as_str(),
                test = %entry.key,
                %value,
                %status,
                "evaluated"
            );
            report.results.push(test_result(
                category,
                entry,
                raw,
                Some(value),
                status,
                group_idx.map(|i| table.groups[i].name.clone()),
            ));
        }

        // Combined comments for the groups of this category
        for (group, status_list) in table.groups.iter().zip(findings.iter()) {
            if group.category != category || status_list.is_empty() {
                continue;
            }
            report
                .comments
                .push(group.comment.replace("{findings}", &status_list.join(", ")));
            report.add_lifestyle(&group.lifestyle);
        }
    }

    if report.comments.is_empty() {
        report.comments.push(table.all_normal.comment.clone());
        report.add_lifestyle(&table.all_normal.lifestyle);
    }

    Ok(report)
}

/// Submitted non-blank fields keyed by canonical test key.
fn canonical_fields(fields: &FieldValues) -> BTreeMap<String, &str> {
    let mut out = BTreeMap::new();
    for (label, value) in fields {
        let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        let key = normalize_label(label);
        if out.contains_key(&key) {
            debug!(field = %label, key = %key, "duplicate field for the same test, keeping first");
            continue;
        }
        out.insert(key, value);
    }
    out
}

fn apply_commentary(report: &mut LabReport, entry: &ReferenceEntry, band: RangeBand) {
    let Some(commentary) = entry.commentary(band) else {
        return;
    };
    if let Some(comment) = commentary.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        report.comments.push(comment.to_string());
    }
    // Within-range commentary never carries recommendations into the report.
    if band != RangeBand::Within {
        report.add_recommendations(&commentary.recommendations);
    }
}

fn test_result(
    category: LabCategory,
    entry: &ReferenceEntry,
    raw: &str,
    value: Option<rust_decimal::Decimal>,
    status: TestStatus,
    group: Option<String>,
) -> TestResult {
    TestResult {
        category,
        key: entry.key.clone(),
        name: entry.name.clone(),
        raw_value: raw.to_string(),
        value,
        unit: entry.unit.clone(),
        range: entry.range_label(),
        status,
        group,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::schema::{AggregateGroup, Commentary, NormalSummary};
    use rust_decimal_macros::dec;

    fn commentary(comment: &str, recs: &[&str]) -> Option<Commentary> {
        Some(Commentary {
            comment: Some(comment.into()),
            recommendations: recs.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn entry(key: &str, name: &str, min: Option<&str>, max: Option<&str>) -> ReferenceEntry {
        ReferenceEntry {
            key: key.into(),
            name: name.into(),
            unit: None,
            min: min.map(|v| v.parse().unwrap()),
            max: max.map(|v| v.parse().unwrap()),
            low: commentary(&format!("Low {name}."), &["Consult your doctor", "Eat iron-rich foods"]),
            normal: None,
            high: commentary(&format!("High {name}."), &["Consult your doctor", "Stay hydrated"]),
            note: None,
        }
    }

    fn make_table() -> ReferenceTable {
        let mut hgb = entry("hgb", "Hemoglobin", Some("12"), Some("17"));
        hgb.normal = commentary("Hemoglobin is normal.", &["Should not appear"]);
        ReferenceTable {
            name: "Test".into(),
            description: None,
            version: "1.0".into(),
            hemogram: vec![hgb, entry("wbc", "White Blood Cells", Some("4"), Some("11"))],
            biochemistry: vec![
                entry("glucose", "Glucose", Some("70"), Some("100")),
                entry("hdl", "HDL", Some("40"), None),
                entry("ldl", "LDL", None, Some("100")),
            ],
            vitamins: vec![
                entry("vitamin_d", "Vitamin D", Some("30"), Some("100")),
                entry("b12", "Vitamin B12", Some("200"), Some("900")),
            ],
            groups: vec![
                AggregateGroup {
                    name: "lipids".into(),
                    category: LabCategory::Biochemistry,
                    tests: vec!["hdl".into(), "ldl".into()],
                    tracking: Tracking::Both,
                    comment: "Lipid profile: {findings}.".into(),
                    lifestyle: vec!["Limit saturated fat".into()],
                },
                AggregateGroup {
                    name: "micronutrients".into(),
                    category: LabCategory::Vitamins,
                    tests: vec![],
                    tracking: Tracking::LowOnly,
                    comment: "Deficiencies: {findings}.".into(),
                    lifestyle: vec!["Eat a varied diet".into()],
                },
            ],
            all_normal: NormalSummary {
                comment: "All values are within the reference range.".into(),
                lifestyle: vec!["Keep up your healthy habits".into()],
            },
        }
    }

    #[test]
    fn test_low_value_emits_low_commentary() {
        let submission = LabSubmission::default().with(LabCategory::Hemogram, "hgb", "10");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.comments, vec!["Low Hemoglobin."]);
        assert_eq!(
            report.recommendations,
            vec!["Consult your doctor", "Eat iron-rich foods"]
        );
        assert_eq!(report.results[0].status, TestStatus::Low);
        assert_eq!(report.results[0].value, Some(dec!(10)));
    }

    #[test]
    fn test_within_range_emits_only_normal_comment() {
        let submission = LabSubmission::default().with(LabCategory::Hemogram, "hgb", "14");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.comments, vec!["Hemoglobin is normal."]);
        assert!(report.recommendations.is_empty());
        assert!(report.lifestyle.is_empty());
    }

    #[test]
    fn test_boundaries_are_within_range() {
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "hgb", "12")
            .with(LabCategory::Hemogram, "wbc", "11");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert!(report.results.iter().all(|r| r.status == TestStatus::Normal));
    }

    #[test]
    fn test_shared_recommendations_deduplicated() {
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "hgb", "10")
            .with(LabCategory::Biochemistry, "glucose", "130");
        let report = evaluate(&submission, &make_table()).unwrap();
        let count = report
            .recommendations
            .iter()
            .filter(|r| *r == "Consult your doctor")
            .count();
        assert_eq!(count, 1);
        assert!(report.recommendations.contains(&"Stay hydrated".to_string()));
        assert_eq!(report.comments, vec!["Low Hemoglobin.", "High Glucose."]);
    }

    #[test]
    fn test_unparseable_value_recorded_and_processing_continues() {
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "hgb", "abc")
            .with(LabCategory::Hemogram, "wbc", "20");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.comments.len(), 2);
        assert!(report.comments[0].starts_with("Could not analyze the value for Hemoglobin:"));
        assert!(report.comments[0].contains("abc"));
        assert_eq!(report.comments[1], "High White Blood Cells.");
        assert_eq!(report.results[0].status, TestStatus::Unreadable);
    }

    #[test]
    fn test_lipid_deviations_aggregated() {
        let submission = LabSubmission::default()
            .with(LabCategory::Biochemistry, "hdl", "35")
            .with(LabCategory::Biochemistry, "ldl", "160");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.comments, vec!["Lipid profile: low HDL, high LDL."]);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.lifestyle, vec!["Limit saturated fat"]);
        assert!(report
            .results
            .iter()
            .all(|r| r.group.as_deref() == Some("lipids")));
    }

    #[test]
    fn test_vitamin_group_tracks_only_low() {
        let submission = LabSubmission::default()
            .with(LabCategory::Vitamins, "vitamin_d", "15")
            .with(LabCategory::Vitamins, "b12", "1200");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.comments, vec!["Deficiencies: low Vitamin D."]);
        assert_eq!(report.lifestyle, vec!["Eat a varied diet"]);
    }

    #[test]
    fn test_high_vitamin_alone_falls_back_to_all_normal() {
        let submission = LabSubmission::default().with(LabCategory::Vitamins, "b12", "1200");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(
            report.comments,
            vec!["All values are within the reference range."]
        );
        assert_eq!(report.results[0].status, TestStatus::High);
    }

    #[test]
    fn test_empty_submission_reports_all_normal() {
        let report = evaluate(&LabSubmission::default(), &make_table()).unwrap();
        assert_eq!(
            report.comments,
            vec!["All values are within the reference range."]
        );
        assert_eq!(report.lifestyle, vec!["Keep up your healthy habits"]);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_unknown_and_blank_fields_skipped() {
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "mcv", "70")
            .with(LabCategory::Hemogram, "wbc", " ");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.comments.len(), 1);
    }

    #[test]
    fn test_field_labels_are_normalized() {
        let submission =
            LabSubmission::default().with(LabCategory::Hemogram, "Hemoglobin (g/dL)", "9,5");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.results[0].key, "hgb");
        assert_eq!(report.results[0].value, Some(dec!(9.5)));
    }

    #[test]
    fn test_placeholder_values_are_reported_unreadable() {
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "hgb", "n/a")
            .with(LabCategory::Hemogram, "wbc", "-");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.comments.len(), 2);
        assert!(report.comments[0].starts_with("Could not analyze the value for Hemoglobin:"));
        assert!(report.comments[1].starts_with("Could not analyze the value for White Blood Cells:"));
        assert!(report
            .results
            .iter()
            .all(|r| r.status == TestStatus::Unreadable));
    }

    #[test]
    fn test_missing_bound_never_triggers_commentary() {
        let mut table = make_table();
        // Both carry low and high commentary, but only one bound each
        table.biochemistry.push(entry("crp", "CRP", None, Some("5")));
        table.hemogram.push(entry("retic", "Reticulocytes", Some("0.5"), None));
        let submission = LabSubmission::default()
            .with(LabCategory::Biochemistry, "crp", "-40")
            .with(LabCategory::Hemogram, "retic", "99");

        let report = evaluate(&submission, &table).unwrap();
        assert_eq!(
            report.comments,
            vec!["All values are within the reference range."]
        );
        assert!(report.recommendations.is_empty());
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| r.status == TestStatus::Normal));
    }

    #[test]
    fn test_duplicate_labels_keep_first_field() {
        // "Hemoglobin" sorts before "hgb", so its value is used
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "hgb", "10")
            .with(LabCategory::Hemogram, "Hemoglobin", "15");
        let report = evaluate(&submission, &make_table()).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].value, Some(dec!(15)));
        assert_eq!(report.results[0].raw_value, "15");
    }

    #[test]
    fn test_empty_table_is_config_unavailable() {
        let mut table = make_table();
        table.hemogram.clear();
        table.biochemistry.clear();
        table.vitamins.clear();
        let err = evaluate(&LabSubmission::default(), &table).unwrap_err();
        assert!(matches!(err, VitalsError::ConfigUnavailable { .. }));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let submission = LabSubmission::default()
            .with(LabCategory::Hemogram, "hgb", "10")
            .with(LabCategory::Biochemistry, "ldl", "160")
            .with(LabCategory::Vitamins, "vitamin_d", "12");
        let table = make_table();
        let first = evaluate(&submission, &table).unwrap().render();
        let second = evaluate(&submission, &table).unwrap().render();
        assert_eq!(first, second);
    }
}
