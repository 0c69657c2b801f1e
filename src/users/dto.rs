use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// BMI derived from current weight (kg) and height (cm), rounded to two
/// decimals. Never stored; recomputed on every read.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let (weight, height) = (weight_kg?, height_cm?);
    if height <= 0.0 || weight <= 0.0 {
        return None;
    }
    let height_m = height / 100.0;
    Some((weight / (height_m * height_m) * 100.0).round() / 100.0)
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight: Option<f64>,
    pub goal_weight: Option<f64>,
    pub activity_level: Option<String>,
    pub calorie_goal: Option<i32>,
    pub bmi: Option<f64>,
    pub preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub intolerances: Vec<String>,
    pub is_premium: bool,
}

/// PUT /user/profile body. The three sets fully replace the stored ones.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub weight: Option<f64>,
    pub calorie_goal: Option<i32>,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub intolerances: Vec<String>,
}

/// POST /questionnaire body, submitted once after registration.
#[derive(Debug, Deserialize)]
pub struct QuestionnaireRequest {
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub intolerances: Vec<String>,
    pub calorie_goal: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubstitutionRequest {
    pub original_name: String,
    pub preferred_name: String,
}

#[derive(Debug, Serialize)]
pub struct SubstitutionResponse {
    pub id: Uuid,
    pub original_name: String,
    pub preferred_name: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_matches_reference_formula() {
        // 70 kg at 175 cm -> 70 / 1.75^2 = 22.857... -> 22.86
        assert_eq!(bmi(Some(70.0), Some(175.0)), Some(22.86));
        assert_eq!(bmi(Some(90.5), Some(180.0)), Some(27.93));
    }

    #[test]
    fn bmi_requires_both_measurements() {
        assert_eq!(bmi(None, Some(175.0)), None);
        assert_eq!(bmi(Some(70.0), None), None);
    }

    #[test]
    fn bmi_rejects_degenerate_height() {
        assert_eq!(bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(bmi(Some(-1.0), Some(175.0)), None);
    }
}
