use crate::model::LabCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const REPORT_TITLE: &str = "BLOOD TEST EVALUATION";
pub const DIVIDER: &str = "==================================================";
pub const DISCLAIMER: &str = "Note: This evaluation is for informational purposes only and does not \
replace professional medical advice. Please discuss your results with your doctor.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Low,
    Normal,
    High,
    /// The submitted value could not be read as a number.
    Unreadable,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Low => write!(f, "low"),
            TestStatus::Normal => write!(f, "normal"),
            TestStatus::High => write!(f, "high"),
            TestStatus::Unreadable => write!(f, "unreadable"),
        }
    }
}

/// Outcome for a single submitted test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub category: LabCategory,
    /// Canonical test key.
    pub key: String,
    /// Display name from the reference table.
    pub name: String,
    /// Value as it was entered.
    pub raw_value: String,
    /// Parsed value, absent when unreadable.
    pub value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reference range for display, e.g. "12 - 17 g/dL".
    pub range: String,
    pub status: TestStatus,
    /// Name of the aggregate group that reported this test, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Structured evaluation of one lab submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabReport {
    /// Assessment comments in evaluation order.
    pub comments: Vec<String>,
    /// General recommendations, deduplicated in insertion order.
    pub recommendations: Vec<String>,
    /// Lifestyle recommendations, deduplicated in insertion order.
    pub lifestyle: Vec<String>,
    #[serde(default)]
    pub results: Vec<TestResult>,
}

impl LabReport {
    pub(crate) fn add_recommendations<'a>(&mut self, items: impl IntoIterator<Item = &'a String>) {
        for item in items {
            push_unique(&mut self.recommendations, item);
        }
    }

    pub(crate) fn add_lifestyle<'a>(&mut self, items: impl IntoIterator<Item = &'a String>) {
        for item in items {
            push_unique(&mut self.lifestyle, item);
        }
    }

    /// Results that fell outside their reference range or could not be read.
    pub fn abnormal(&self) -> impl Iterator<Item = &TestResult> {
        self.results
            .iter()
            .filter(|r| r.status != TestStatus::Normal)
    }

    /// Render the report as the text block stored with a test result.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(REPORT_TITLE);
        out.push('\n');
        out.push_str(DIVIDER);
        out.push('\n');

        if !self.comments.is_empty() {
            out.push_str("\nASSESSMENT:\n");
            for comment in &self.comments {
                out.push_str("- ");
                out.push_str(comment);
                out.push('\n');
            }
        }

        if !self.recommendations.is_empty() {
            out.push_str("\nRECOMMENDATIONS:\n");
            for rec in &self.recommendations {
                out.push_str("\u{2022} ");
                out.push_str(rec);
                out.push('\n');
            }
        }

        if !self.lifestyle.is_empty() {
            out.push_str("\nLIFESTYLE RECOMMENDATIONS:\n");
            for rec in &self.lifestyle {
                out.push_str("\u{2022} ");
                out.push_str(rec);
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(DISCLAIMER);
        out.push('\n');
        out
    }
}

impl fmt::Display for LabReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
