use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw form values for one lab category, keyed by field name.
///
/// A `None` or blank value means the field was left empty on the form.
pub type FieldValues = BTreeMap<String, Option<String>>;

/// The fixed groups a blood test is entered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabCategory {
    Hemogram,
    Biochemistry,
    Vitamins,
}

impl LabCategory {
    /// Categories in evaluation order.
    pub const ALL: [LabCategory; 3] = [
        LabCategory::Hemogram,
        LabCategory::Biochemistry,
        LabCategory::Vitamins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabCategory::Hemogram => "hemogram",
            LabCategory::Biochemistry => "biochemistry",
            LabCategory::Vitamins => "vitamins",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<LabCategory> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "hemogram" | "hematology" | "cbc" => Some(LabCategory::Hemogram),
            "biochemistry" | "chemistry" | "biochem" => Some(LabCategory::Biochemistry),
            "vitamins" | "vitamin" | "minerals" => Some(LabCategory::Vitamins),
            _ => None,
        }
    }
}

impl fmt::Display for LabCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabCategory::Hemogram => write!(f, "Hemogram"),
            LabCategory::Biochemistry => write!(f, "Biochemistry"),
            LabCategory::Vitamins => write!(f, "Vitamins & Minerals"),
        }
    }
}

/// A blood test as submitted from the entry form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabSubmission {
    #[serde(default)]
    pub hemogram: Option<FieldValues>,
    #[serde(default)]
    pub biochemistry: Option<FieldValues>,
    #[serde(default)]
    pub vitamins: Option<FieldValues>,
}

impl LabSubmission {
    pub fn category(&self, category: LabCategory) -> Option<&FieldValues> {
        match category {
            LabCategory::Hemogram => self.hemogram.as_ref(),
            LabCategory::Biochemistry => self.biochemistry.as_ref(),
            LabCategory::Vitamins => self.vitamins.as_ref(),
        }
    }

    fn category_mut(&mut self, category: LabCategory) -> &mut FieldValues {
        let slot = match category {
            LabCategory::Hemogram => &mut self.hemogram,
            LabCategory::Biochemistry => &mut self.biochemistry,
            LabCategory::Vitamins => &mut self.vitamins,
        };
        slot.get_or_insert_with(BTreeMap::new)
    }

    /// Record a raw value for a field, creating the category if needed.
    pub fn set(&mut self, category: LabCategory, field: &str, value: impl Into<String>) {
        self.category_mut(category)
            .insert(field.to_string(), Some(value.into()));
    }

    /// Builder-style variant of [`LabSubmission::set`].
    pub fn with(mut self, category: LabCategory, field: &str, value: impl Into<String>) -> Self {
        self.set(category, field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        LabCategory::ALL.iter().all(|&c| {
            self.category(c)
                .map(|fields| {
                    fields
                        .values()
                        .all(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
                })
                .unwrap_or(true)
        })
    }
}
