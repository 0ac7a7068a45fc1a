use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Score and feedback for one questionnaire category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Mean of the answered values, rounded to two decimals.
    #[serde(rename = "avg")]
    pub average: Decimal,
    /// Number of answered questions in the category.
    pub answered: usize,
    pub text: String,
    pub emoji: String,
}

/// Which narrative rule produced the overall message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeRule {
    MultipleLow,
    StressMotivation,
    MultipleHigh,
    Suggestions,
    Default,
}

impl fmt::Display for NarrativeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeRule::MultipleLow => write!(f, "multiple low categories"),
            NarrativeRule::StressMotivation => write!(f, "high stress with low motivation"),
            NarrativeRule::MultipleHigh => write!(f, "multiple high categories"),
            NarrativeRule::Suggestions => write!(f, "per-category suggestions"),
            NarrativeRule::Default => write!(f, "default"),
        }
    }
}

/// Full result of scoring a questionnaire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireOutcome {
    /// Only categories with at least one answer appear here.
    pub categories: BTreeMap<String, CategoryScore>,
    pub narrative: String,
    pub narrative_rule: NarrativeRule,
}
