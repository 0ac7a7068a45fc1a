use rust_decimal::Decimal;
use vitals_core::energy::{energy_budget, ActivityLevel, Goal, ProfileInput, Sex};
use vitals_core::error::VitalsError;

use crate::output;

/// Build a profile from command-line flags. Unrecognized activity levels and
/// goals fall back to their defaults.
pub fn profile_from_args(
    sex: Option<String>,
    age: Option<u32>,
    weight: Option<Decimal>,
    height: Option<Decimal>,
    activity: Option<String>,
    goal: Option<String>,
) -> ProfileInput {
    ProfileInput {
        sex: sex.as_deref().map(Sex::from_str_loose),
        age_years: age,
        weight_kg: weight,
        height_cm: height,
        activity: activity.as_deref().map(ActivityLevel::from_str_loose),
        goal: goal.as_deref().map(Goal::from_str_loose),
    }
}

pub fn run(profile: ProfileInput, output_format: &str) -> Result<(), VitalsError> {
    let budget = energy_budget(&profile)?;

    match output_format {
        "json" => output::json::print(&budget)?,
        _ => output::text::print_energy(&budget),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_profile() {
        let profile = profile_from_args(
            Some("Male".into()),
            Some(30),
            Some(Decimal::from(70)),
            Some(Decimal::from(175)),
            Some("very active".into()),
            Some("gain".into()),
        );
        assert_eq!(profile.sex, Some(Sex::Male));
        assert_eq!(profile.activity, Some(ActivityLevel::VeryActive));
        assert_eq!(profile.goal, Some(Goal::GainWeight));
    }

    #[test]
    fn missing_flags_are_reported() {
        let profile = profile_from_args(None, Some(30), None, None, None, None);
        let err = run(profile, "text").unwrap_err();
        assert_eq!(
            err.to_string(),
            "profile is incomplete, missing: sex, weight, height"
        );
    }

    #[test]
    fn oversized_weight_is_an_error() {
        let profile = profile_from_args(
            Some("female".into()),
            Some(45),
            Some(Decimal::MAX),
            Some(Decimal::from(165)),
            None,
            None,
        );
        let err = run(profile, "text").unwrap_err();
        assert!(err.to_string().starts_with("invalid profile: weight"));
    }
}
