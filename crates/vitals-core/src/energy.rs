//! Calorie needs from a user profile.
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE scales it by an activity
//! multiplier and the daily target shifts TDEE by 500 kcal for weight goals.

use crate::error::VitalsError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Anything other than "male" uses the female constant.
    pub fn from_str_loose(s: &str) -> Sex {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Sex::Male,
            _ => Sex::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(&self) -> Decimal {
        match self {
            ActivityLevel::Sedentary => Decimal::new(12, 1),
            ActivityLevel::LightlyActive => Decimal::new(1375, 3),
            ActivityLevel::ModeratelyActive => Decimal::new(155, 2),
            ActivityLevel::VeryActive => Decimal::new(1725, 3),
            ActivityLevel::ExtraActive => Decimal::new(19, 1),
        }
    }

    /// Unknown levels fall back to sedentary.
    pub fn from_str_loose(s: &str) -> ActivityLevel {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "lightly_active" | "light" => ActivityLevel::LightlyActive,
            "moderately_active" | "moderate" => ActivityLevel::ModeratelyActive,
            "very_active" | "active" => ActivityLevel::VeryActive,
            "extra_active" | "extra" => ActivityLevel::ExtraActive,
            _ => ActivityLevel::Sedentary,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::LightlyActive => write!(f, "lightly active"),
            ActivityLevel::ModeratelyActive => write!(f, "moderately active"),
            ActivityLevel::VeryActive => write!(f, "very active"),
            ActivityLevel::ExtraActive => write!(f, "extra active"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    #[default]
    Maintain,
    GainWeight,
}

impl Goal {
    pub fn calorie_adjustment(&self) -> Decimal {
        match self {
            Goal::LoseWeight => Decimal::from(-500),
            Goal::Maintain => Decimal::ZERO,
            Goal::GainWeight => Decimal::from(500),
        }
    }

    /// Unknown goals fall back to maintain.
    pub fn from_str_loose(s: &str) -> Goal {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "lose_weight" | "lose" => Goal::LoseWeight,
            "gain_weight" | "gain" => Goal::GainWeight,
            _ => Goal::Maintain,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::LoseWeight => write!(f, "lose weight"),
            Goal::Maintain => write!(f, "maintain"),
            Goal::GainWeight => write!(f, "gain weight"),
        }
    }
}

/// Profile fields as stored for a user; any of them may still be unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub weight_kg: Option<Decimal>,
    #[serde(default)]
    pub height_cm: Option<Decimal>,
    #[serde(default)]
    pub activity: Option<ActivityLevel>,
    #[serde(default)]
    pub goal: Option<Goal>,
}

/// A profile with everything the energy equations need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyProfile {
    pub sex: Sex,
    pub age_years: u32,
    pub weight_kg: Decimal,
    pub height_cm: Decimal,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

impl TryFrom<&ProfileInput> for EnergyProfile {
    type Error = VitalsError;

    fn try_from(input: &ProfileInput) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        if input.sex.is_none() {
            missing.push("sex");
        }
        if input.age_years.is_none() {
            missing.push("age");
        }
        if input.weight_kg.is_none() {
            missing.push("weight");
        }
        if input.height_cm.is_none() {
            missing.push("height");
        }

        let (Some(sex), Some(age_years), Some(weight_kg), Some(height_cm)) =
            (input.sex, input.age_years, input.weight_kg, input.height_cm)
        else {
            return Err(VitalsError::IncompleteProfile { missing });
        };

        check_range("age", Decimal::from(age_years), MAX_AGE_YEARS)?;
        check_range("weight", weight_kg, MAX_WEIGHT_KG)?;
        check_range("height", height_cm, MAX_HEIGHT_CM)?;

        Ok(EnergyProfile {
            sex,
            age_years,
            weight_kg,
            height_cm,
            activity: input.activity.unwrap_or_default(),
            goal: input.goal.unwrap_or_default(),
        })
    }
}

const MAX_AGE_YEARS: i64 = 130;
const MAX_WEIGHT_KG: i64 = 700;
const MAX_HEIGHT_CM: i64 = 300;

// Keeps the energy equations well inside Decimal's range.
fn check_range(field: &str, value: Decimal, max: i64) -> Result<(), VitalsError> {
    if value <= Decimal::ZERO || value > Decimal::from(max) {
        return Err(VitalsError::InvalidProfile(format!(
            "{} must be above 0 and at most {}, got {}",
            field, max, value
        )));
    }
    Ok(())
}

impl EnergyProfile {
    /// Basal metabolic rate in kcal/day.
    pub fn bmr(&self) -> Decimal {
        let base = Decimal::from(10) * self.weight_kg + Decimal::new(625, 2) * self.height_cm
            - Decimal::from(5) * Decimal::from(self.age_years);
        match self.sex {
            Sex::Male => base + Decimal::from(5),
            Sex::Female => base - Decimal::from(161),
        }
    }

    /// Total daily energy expenditure in kcal/day.
    pub fn tdee(&self) -> Decimal {
        self.bmr() * self.activity.multiplier()
    }

    /// Calorie target for the profile's goal.
    pub fn daily_calories(&self) -> Decimal {
        self.tdee() + self.goal.calorie_adjustment()
    }

    pub fn budget(&self) -> EnergyBudget {
        EnergyBudget {
            bmr: self.bmr().round(),
            tdee: self.tdee().round(),
            daily_calories: self.daily_calories().round(),
            activity: self.activity,
            goal: self.goal,
        }
    }
}

/// Rounded calorie figures for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBudget {
    pub bmr: Decimal,
    pub tdee: Decimal,
    pub daily_calories: Decimal,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

/// Compute the rounded energy budget for a stored profile.
pub fn energy_budget(input: &ProfileInput) -> Result<EnergyBudget, VitalsError> {
    EnergyProfile::try_from(input).map(|profile| profile.budget())
}
