use std::collections::HashMap;
use std::sync::LazyLock;

/// Normalize a lab field label to a canonical reference key.
///
/// Steps:
/// 1. Strip a trailing unit in parentheses: "Glucose (mg/dL)" -> "Glucose"
/// 2. Lowercase
/// 3. Replace spaces, hyphens and punctuation with underscores
/// 4. Collapse multiple underscores
/// 5. Look up in alias map
pub fn normalize_label(raw: &str) -> String {
    let mut s = raw.trim().to_string();

    if let Some(idx) = s.rfind('(') {
        if s.ends_with(')') && idx > 0 && looks_like_unit(&s[idx + 1..s.len() - 1]) {
            s = s[..idx].trim_end().to_string();
        }
    }

    s = s.to_lowercase();

    let mut normalized = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            normalized.push(c);
        } else {
            normalized.push('_');
        }
    }

    let mut result = String::with_capacity(normalized.len());
    let mut prev_underscore = true; // skip leading underscores
    for c in normalized.chars() {
        if c == '_' {
            if !prev_underscore {
                result.push('_');
            }
            prev_underscore = true;
        } else {
            result.push(c);
            prev_underscore = false;
        }
    }
    if result.ends_with('_') {
        result.pop();
    }

    match ALIASES.get(result.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => result,
    }
}

fn looks_like_unit(s: &str) -> bool {
    s.contains('/') || s.contains('%') || matches!(s.trim(), "U/L" | "fL" | "pg" | "mmol")
}

static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Hemogram
    m.insert("hemoglobin", "hgb");
    m.insert("haemoglobin", "hgb");
    m.insert("hb", "hgb");
    m.insert("white_blood_cells", "wbc");
    m.insert("leukocytes", "wbc");
    m.insert("red_blood_cells", "rbc");
    m.insert("erythrocytes", "rbc");
    m.insert("hematocrit", "hct");
    m.insert("haematocrit", "hct");
    m.insert("platelets", "plt");
    m.insert("thrombocytes", "plt");

    // Biochemistry
    m.insert("fasting_glucose", "glucose");
    m.insert("blood_sugar", "glucose");
    m.insert("sgpt", "alt");
    m.insert("sgot", "ast");
    m.insert("total_cholesterol", "cholesterol");
    m.insert("hdl_cholesterol", "hdl");
    m.insert("hdl_c", "hdl");
    m.insert("ldl_cholesterol", "ldl");
    m.insert("ldl_c", "ldl");
    m.insert("triglyceride", "triglycerides");
    m.insert("tg", "triglycerides");
    m.insert("c_reactive_protein", "crp");

    // Vitamins & minerals
    m.insert("vitamin_d3", "vitamin_d");
    m.insert("25_oh_vitamin_d", "vitamin_d");
    m.insert("vit_d", "vitamin_d");
    m.insert("vitamin_b12", "b12");
    m.insert("cobalamin", "b12");
    m.insert("folic_acid", "folate");
    m.insert("serum_iron", "iron");
    m.insert("fe", "iron");
    m.insert("mg", "magnesium");

    m
});
