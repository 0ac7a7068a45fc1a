use vitals_core::energy::EnergyBudget;
use vitals_core::lab::{LabReport, TestResult, TestStatus};
use vitals_core::meals::{DailySummary, Meal};
use vitals_core::questionnaire::QuestionnaireOutcome;

pub fn print_lab(report: &LabReport, show_all: bool) {
    print!("{}", format_lab(report, show_all));
}

/// The rendered report, followed by a per-test table. Only tests outside
/// their range (or unreadable) are listed unless `show_all` is set.
pub fn format_lab(report: &LabReport, show_all: bool) -> String {
    let mut out = report.render();
    let rows: Vec<&TestResult> = if show_all {
        report.results.iter().collect()
    } else {
        report.abnormal().collect()
    };
    if rows.is_empty() {
        return out;
    }

    let max_name = rows.iter().map(|r| r.name.len()).max().unwrap_or(10);

    out.push_str(if show_all { "\nTests:\n" } else { "\nOut of range:\n" });
    for r in rows {
        let marker = match r.status {
            TestStatus::Low => "LOW",
            TestStatus::High => "HIGH",
            TestStatus::Unreadable => "??",
            TestStatus::Normal => "",
        };
        let value = match r.value {
            Some(v) => v.to_string(),
            None => r.raw_value.clone(),
        };
        out.push_str(&format!(
            "  {:<width$}  {:>8} {:<8}  [{}]  {}\n",
            r.name,
            value,
            r.unit.as_deref().unwrap_or(""),
            r.range,
            marker,
            width = max_name
        ));
    }
    out
}

pub fn print_mood(outcome: &QuestionnaireOutcome) {
    print!("{}", format_mood(outcome));
}

pub fn format_mood(outcome: &QuestionnaireOutcome) -> String {
    let mut out = String::new();
    if outcome.categories.is_empty() {
        out.push_str("No answered questions.\n\n");
    }

    let max_name = outcome.categories.keys().map(|k| k.len()).max().unwrap_or(8);
    for (name, score) in &outcome.categories {
        out.push_str(&format!(
            "  {:<width$}  {:>4}  {} {}\n",
            name,
            score.average,
            score.emoji,
            score.text,
            width = max_name
        ));
    }
    if !outcome.categories.is_empty() {
        out.push('\n');
    }
    out.push_str(&outcome.narrative);
    out.push('\n');
    out
}

pub fn print_energy(budget: &EnergyBudget) {
    print!("{}", format_energy(budget));
}

pub fn format_energy(budget: &EnergyBudget) -> String {
    format!(
        "  BMR:             {} kcal\n  TDEE:            {} kcal ({})\n  Daily target:    {} kcal ({})\n",
        budget.bmr, budget.tdee, budget.activity, budget.daily_calories, budget.goal
    )
}

pub fn print_meals(meals: &[Meal], summary: &DailySummary) {
    print!("{}", format_meals(meals, summary));
}

pub fn format_meals(meals: &[Meal], summary: &DailySummary) -> String {
    let mut out = String::new();
    let max_name = meals.iter().map(|m| m.food_name.len()).max().unwrap_or(10);

    let mut sorted: Vec<&Meal> = meals.iter().collect();
    sorted.sort_by_key(|m| m.meal_type);
    for meal in sorted {
        out.push_str(&format!(
            "  {:<9}  {:<width$}  {:>6} kcal\n",
            meal.meal_type.to_string(),
            meal.food_name,
            meal.calories,
            width = max_name
        ));
    }
    if !meals.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!(
        "  Total: {} kcal  (protein {} g, carbs {} g, fat {} g)\n",
        summary.calories, summary.protein, summary.carbs, summary.fat
    ));
    if let (Some(goal), Some(remaining)) = (summary.daily_goal, summary.remaining) {
        if remaining.is_sign_negative() {
            out.push_str(&format!(
                "  Goal: {} kcal, over by {} kcal\n",
                goal,
                remaining.abs()
            ));
        } else {
            out.push_str(&format!("  Goal: {} kcal, {} kcal remaining\n", goal, remaining));
        }
    }
    out
}
