//! Complaint-to-clinic referral as an ordered rule table.

use crate::error::VitalsError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralTable {
    pub name: String,
    pub version: String,
    /// Tried in order; the first matching complaint wins.
    pub rules: Vec<ReferralRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralRule {
    pub complaint: String,
    pub clinics: Vec<String>,
}

impl ReferralTable {
    /// Clinics for a complaint, each tagged with the city when one is given.
    ///
    /// Unknown complaints yield an empty list.
    pub fn recommend(&self, complaint: &str, city: Option<&str>) -> Vec<String> {
        let wanted = normalize_complaint(complaint);
        let Some(rule) = self
            .rules
            .iter()
            .find(|r| normalize_complaint(&r.complaint) == wanted)
        else {
            return Vec::new();
        };

        match city.map(str::trim).filter(|c| !c.is_empty()) {
            Some(city) => rule
                .clinics
                .iter()
                .map(|clinic| format!("{} ({})", clinic, city))
                .collect(),
            None => rule.clinics.clone(),
        }
    }

    pub fn complaints(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.complaint.as_str())
    }
}

fn normalize_complaint(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Load a referral table from a JSON file.
pub fn load_referral_table(path: &Path) -> Result<ReferralTable, VitalsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VitalsError::unavailable(path.display().to_string(), e))?;
    let table: ReferralTable = serde_json::from_str(&content)
        .map_err(|e| VitalsError::unavailable(path.display().to_string(), e))?;
    validate_referral_table(&table)?;
    Ok(table)
}

/// Parse a referral table from a JSON string.
pub fn parse_referral_table_str(json: &str) -> Result<ReferralTable, VitalsError> {
    let table: ReferralTable = serde_json::from_str(json).map_err(VitalsError::Json)?;
    validate_referral_table(&table)?;
    Ok(table)
}

pub fn validate_referral_table(table: &ReferralTable) -> Result<(), VitalsError> {
    if table.rules.is_empty() {
        return Err(VitalsError::InvalidReferral("rules must not be empty".into()));
    }
    let mut seen = HashSet::new();
    for rule in &table.rules {
        let key = normalize_complaint(&rule.complaint);
        if key.is_empty() {
            return Err(VitalsError::InvalidReferral(
                "complaint must not be empty".into(),
            ));
        }
        if rule.clinics.is_empty() {
            return Err(VitalsError::InvalidReferral(format!(
                "complaint '{}' lists no clinics",
                rule.complaint
            )));
        }
        if !seen.insert(key) {
            return Err(VitalsError::InvalidReferral(format!(
                "duplicate complaint '{}'",
                rule.complaint
            )));
        }
    }
    Ok(())
}
