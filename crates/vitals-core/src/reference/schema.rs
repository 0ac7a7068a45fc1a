use crate::model::LabCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference ranges and commentary for every supported blood test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    #[serde(default)]
    pub hemogram: Vec<ReferenceEntry>,
    #[serde(default)]
    pub biochemistry: Vec<ReferenceEntry>,
    #[serde(default)]
    pub vitamins: Vec<ReferenceEntry>,
    /// Tests whose deviations are reported together instead of one by one.
    #[serde(default)]
    pub groups: Vec<AggregateGroup>,
    /// Used when a submission produces no comments at all.
    pub all_normal: NormalSummary,
}

impl ReferenceTable {
    pub fn entries(&self, category: LabCategory) -> &[ReferenceEntry] {
        match category {
            LabCategory::Hemogram => &self.hemogram,
            LabCategory::Biochemistry => &self.biochemistry,
            LabCategory::Vitamins => &self.vitamins,
        }
    }

    pub fn entry(&self, category: LabCategory, key: &str) -> Option<&ReferenceEntry> {
        self.entries(category).iter().find(|e| e.key == key)
    }

    pub fn test_count(&self) -> usize {
        LabCategory::ALL
            .iter()
            .map(|&c| self.entries(c).len())
            .sum()
    }

    /// Index of the aggregate group a test belongs to, if any.
    pub fn group_of(&self, category: LabCategory, key: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.covers(category, key))
    }
}

/// A single blood test with its reference range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Canonical field key (e.g. "hgb").
    pub key: String,
    /// Display name (e.g. "Hemoglobin").
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub min: Option<Decimal>,
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Commentary when the value is below `min`.
    #[serde(default)]
    pub low: Option<Commentary>,
    /// Commentary when the value is within range.
    #[serde(default)]
    pub normal: Option<Commentary>,
    /// Commentary when the value is above `max`.
    #[serde(default)]
    pub high: Option<Commentary>,
    #[serde(default)]
    pub note: Option<String>,
}

impl ReferenceEntry {
    /// Position of a value relative to this test's range.
    ///
    /// A missing bound never triggers, so a value is only below or above
    /// range when the corresponding bound exists.
    pub fn classify(&self, value: Decimal) -> RangeBand {
        match (self.min, self.max) {
            (Some(min), _) if value < min => RangeBand::Below,
            (_, Some(max)) if value > max => RangeBand::Above,
            _ => RangeBand::Within,
        }
    }

    pub fn commentary(&self, band: RangeBand) -> Option<&Commentary> {
        match band {
            RangeBand::Below => self.low.as_ref(),
            RangeBand::Within => self.normal.as_ref(),
            RangeBand::Above => self.high.as_ref(),
        }
    }

    /// Range without the unit, e.g. "12 - 17", "<= 100".
    pub fn range_label(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} - {}", min, max),
            (Some(min), None) => format!(">= {}", min),
            (None, Some(max)) => format!("<= {}", max),
            (None, None) => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBand {
    Below,
    Within,
    Above,
}

/// Comment and recommendations attached to one side of a range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commentary {
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Which deviations an aggregate group reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracking {
    #[default]
    Both,
    LowOnly,
}

/// A set of tests summarized in one combined comment (e.g. a lipid panel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateGroup {
    pub name: String,
    pub category: LabCategory,
    /// Member test keys. Empty means every test in `category`.
    #[serde(default)]
    pub tests: Vec<String>,
    #[serde(default)]
    pub tracking: Tracking,
    /// Combined comment; `{findings}` is replaced with the status list.
    pub comment: String,
    /// Shared lifestyle recommendations added when anything deviates.
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

impl AggregateGroup {
    pub fn covers(&self, category: LabCategory, key: &str) -> bool {
        self.category == category && (self.tests.is_empty() || self.tests.iter().any(|t| t == key))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalSummary {
    pub comment: String,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(min: Option<Decimal>, max: Option<Decimal>) -> ReferenceEntry {
        ReferenceEntry {
            key: "hgb".into(),
            name: "Hemoglobin".into(),
            unit: Some("g/dL".into()),
            min,
            max,
            low: None,
            normal: None,
            high: None,
            note: None,
        }
    }

    #[test]
    fn test_range_label_has_no_unit() {
        assert_eq!(entry(Some(dec!(12)), Some(dec!(17))).range_label(), "12 - 17");
        assert_eq!(entry(Some(dec!(40)), None).range_label(), ">= 40");
        assert_eq!(entry(None, Some(dec!(100))).range_label(), "<= 100");
    }

    #[test]
    fn test_classify_bounds_inclusive() {
        let e = entry(Some(dec!(12)), Some(dec!(17)));
        assert_eq!(e.classify(dec!(12)), RangeBand::Within);
        assert_eq!(e.classify(dec!(17)), RangeBand::Within);
        assert_eq!(e.classify(dec!(11.9)), RangeBand::Below);
        assert_eq!(e.classify(dec!(17.1)), RangeBand::Above);
    }

    #[test]
    fn test_missing_bound_is_never_crossed() {
        assert_eq!(entry(None, Some(dec!(100))).classify(dec!(-5)), RangeBand::Within);
        assert_eq!(entry(Some(dec!(40)), None).classify(dec!(9000)), RangeBand::Within);
    }
}
