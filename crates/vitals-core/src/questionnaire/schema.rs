use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A wellbeing questionnaire: questions, feedback bands and narrative rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub questions: Vec<Question>,
    /// Category name -> feedback bands.
    pub feedback: BTreeMap<String, CategoryFeedback>,
    pub narrative: NarrativeRules,
}

impl QuestionnaireDef {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Distinct categories in question order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !out.contains(&q.category.as_str()) {
                out.push(&q.category);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: i64,
}

/// Feedback scale for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedback {
    /// Bands from highest to lowest threshold; the last one is the floor.
    pub bands: Vec<FeedbackBand>,
    /// Suggestion offered when the category average is low.
    #[serde(default)]
    pub low_suggestion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackBand {
    /// Inclusive lower bound of the band.
    pub threshold: Decimal,
    pub text: String,
    #[serde(default)]
    pub emoji: String,
}

/// Cross-category rules that choose the overall narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeRules {
    /// Averages strictly below this count as low.
    #[serde(default = "default_low_average")]
    pub low_average: Decimal,
    /// Averages strictly above this count as high.
    #[serde(default = "default_high_average")]
    pub high_average: Decimal,
    /// Averages strictly below this pull in the category's low suggestion.
    #[serde(default = "default_suggestion_average")]
    pub suggestion_average: Decimal,
    pub multiple_low: CountRule,
    #[serde(default)]
    pub stress_motivation: Option<StressMotivationRule>,
    pub multiple_high: CountRule,
    pub default: String,
}

/// Fires when at least `min_categories` categories meet the condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountRule {
    pub min_categories: usize,
    pub text: String,
}

/// Fires when stress is high while motivation is low.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressMotivationRule {
    #[serde(default = "default_stress_category")]
    pub stress_category: String,
    pub stress_above: Decimal,
    #[serde(default = "default_motivation_category")]
    pub motivation_category: String,
    pub motivation_below: Decimal,
    pub text: String,
}

fn default_low_average() -> Decimal {
    Decimal::new(12, 1)
}

fn default_high_average() -> Decimal {
    Decimal::new(22, 1)
}

fn default_suggestion_average() -> Decimal {
    Decimal::new(15, 1)
}

fn default_stress_category() -> String {
    "stress".to_string()
}

fn default_motivation_category() -> String {
    "motivation".to_string()
}
