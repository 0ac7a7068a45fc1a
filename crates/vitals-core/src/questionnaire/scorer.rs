use crate::error::VitalsError;
use crate::questionnaire::outcome::{CategoryScore, NarrativeRule, QuestionnaireOutcome};
use crate::questionnaire::schema::{FeedbackBand, QuestionnaireDef};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Selected option value per question id.
pub type Responses = BTreeMap<String, i64>;

/// Score a questionnaire response.
///
/// Averages are computed per category over answered questions only, then
/// each category is matched against its feedback bands and one narrative
/// is chosen by the rules in `questionnaire.narrative`.
pub fn score(
    responses: &Responses,
    questionnaire: &QuestionnaireDef,
) -> Result<QuestionnaireOutcome, VitalsError> {
    if questionnaire.questions.is_empty() || questionnaire.feedback.is_empty() {
        return Err(VitalsError::unavailable(
            questionnaire.name.clone(),
            "questionnaire defines no questions or feedback",
        ));
    }

    for id in responses.keys() {
        if questionnaire.question(id).is_none() {
            debug!(question = %id, "response for unknown question, ignoring");
        }
    }

    // category -> (sum, count)
    let mut totals: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
    for question in &questionnaire.questions {
        let Some(&value) = responses.get(&question.id) else {
            continue;
        };
        if !question.options.iter().any(|o| o.value == value) {
            warn!(question = %question.id, value, "answer is not one of the question's options");
        }
        let slot = totals.entry(question.category.as_str()).or_default();
        slot.0 = slot.0.checked_add(value).ok_or_else(|| {
            VitalsError::ParseError(format!(
                "answer {} to question '{}' overflows the '{}' total",
                value, question.id, question.category
            ))
        })?;
        slot.1 += 1;
    }

    let mut categories = BTreeMap::new();
    for (category, (sum, count)) in totals {
        let average = (Decimal::from(sum) / Decimal::from(count as u64)).round_dp(2);
        let feedback = questionnaire.feedback.get(category).ok_or_else(|| {
            VitalsError::InvalidQuestionnaire(format!(
                "no feedback configured for category '{}'",
                category
            ))
        })?;
        let band = select_band(&feedback.bands, average).ok_or_else(|| {
            VitalsError::InvalidQuestionnaire(format!(
                "category '{}' has no feedback bands",
                category
            ))
        })?;
        categories.insert(
            category.to_string(),
            CategoryScore {
                average,
                answered: count,
                text: band.text.clone(),
                emoji: band.emoji.clone(),
            },
        );
    }

    let (narrative_rule, narrative) = choose_narrative(&categories, questionnaire);
    debug!(categories = categories.len(), rule = %narrative_rule, "scored questionnaire");

    Ok(QuestionnaireOutcome {
        categories,
        narrative,
        narrative_rule,
    })
}

/// First band whose threshold is at or below the average, else the last band.
pub fn select_band(bands: &[FeedbackBand], average: Decimal) -> Option<&FeedbackBand> {
    bands
        .iter()
        .find(|band| band.threshold <= average)
        .or_else(|| bands.last())
}

fn choose_narrative(
    categories: &BTreeMap<String, CategoryScore>,
    questionnaire: &QuestionnaireDef,
) -> (NarrativeRule, String) {
    let rules = &questionnaire.narrative;
    let average_of = |name: &str| categories.get(name).map(|c| c.average);

    let low_count = categories
        .values()
        .filter(|c| c.average < rules.low_average)
        .count();
    if low_count >= rules.multiple_low.min_categories {
        return (NarrativeRule::MultipleLow, rules.multiple_low.text.clone());
    }

    if let Some(rule) = &rules.stress_motivation {
        let stress = average_of(rule.stress_category.as_str());
        let motivation = average_of(rule.motivation_category.as_str());
        if let (Some(stress), Some(motivation)) = (stress, motivation) {
            if stress > rule.stress_above && motivation < rule.motivation_below {
                return (NarrativeRule::StressMotivation, rule.text.clone());
            }
        }
    }

    let high_count = categories
        .values()
        .filter(|c| c.average > rules.high_average)
        .count();
    if high_count >= rules.multiple_high.min_categories {
        return (NarrativeRule::MultipleHigh, rules.multiple_high.text.clone());
    }

    let suggestions: Vec<&str> = questionnaire
        .categories()
        .into_iter()
        .filter(|&name| average_of(name).is_some_and(|avg| avg < rules.suggestion_average))
        .filter_map(|name| {
            questionnaire
                .feedback
                .get(name)
                .and_then(|f| f.low_suggestion.as_deref())
        })
        .collect();

    if suggestions.is_empty() {
        (NarrativeRule::Default, rules.default.clone())
    } else {
        (NarrativeRule::Suggestions, suggestions.join("\n"))
    }
}
