use crate::error::VitalsError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "Breakfast"),
            MealType::Lunch => write!(f, "Lunch"),
            MealType::Dinner => write!(f, "Dinner"),
            MealType::Snack => write!(f, "Snack"),
        }
    }
}

const MAX_ITEM_CALORIES: i64 = 20_000;
const MAX_ITEM_GRAMS: i64 = 5_000;

/// A logged food item. Macros are in grams and optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: Decimal,
    #[serde(default)]
    pub protein: Option<Decimal>,
    #[serde(default)]
    pub carbs: Option<Decimal>,
    #[serde(default)]
    pub fat: Option<Decimal>,
}

impl Meal {
    pub fn new(
        meal_type: MealType,
        food_name: &str,
        calories: Decimal,
    ) -> Result<Meal, VitalsError> {
        let meal = Meal {
            meal_type,
            food_name: food_name.trim().to_string(),
            calories,
            protein: None,
            carbs: None,
            fat: None,
        };
        meal.validate()?;
        Ok(meal)
    }

    pub fn with_macros(
        mut self,
        protein: Option<Decimal>,
        carbs: Option<Decimal>,
        fat: Option<Decimal>,
    ) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    pub fn validate(&self) -> Result<(), VitalsError> {
        if self.food_name.trim().is_empty() {
            return Err(VitalsError::InvalidMeal("food name must not be empty".into()));
        }
        if self.calories <= Decimal::ZERO {
            return Err(VitalsError::InvalidMeal(format!(
                "'{}' must have positive calories, got {}",
                self.food_name, self.calories
            )));
        }
        if self.calories > Decimal::from(MAX_ITEM_CALORIES) {
            return Err(VitalsError::InvalidMeal(format!(
                "'{}' has {} kcal, more than {} for one item",
                self.food_name, self.calories, MAX_ITEM_CALORIES
            )));
        }
        for (name, value) in [("protein", self.protein), ("carbs", self.carbs), ("fat", self.fat)] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(VitalsError::InvalidMeal(format!(
                    "'{}' has negative {}",
                    self.food_name, name
                )));
            }
            if value.is_some_and(|v| v > Decimal::from(MAX_ITEM_GRAMS)) {
                return Err(VitalsError::InvalidMeal(format!(
                    "'{}' has more than {} g of {}",
                    self.food_name, MAX_ITEM_GRAMS, name
                )));
            }
        }
        Ok(())
    }
}

/// Totals for one day of logged meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub meal_count: usize,
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<Decimal>,
    /// Goal minus eaten calories; negative when over the goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
}

/// Sum a day's meals. Missing macros count as zero.
pub fn summarize(meals: &[Meal], daily_goal: Option<Decimal>) -> DailySummary {
    let mut summary = DailySummary {
        meal_count: meals.len(),
        daily_goal,
        ..Default::default()
    };
    for meal in meals {
        summary.calories += meal.calories;
        summary.protein += meal.protein.unwrap_or_default();
        summary.carbs += meal.carbs.unwrap_or_default();
        summary.fat += meal.fat.unwrap_or_default();
    }
    summary.remaining = daily_goal.map(|goal| goal - summary.calories);
    summary
}
