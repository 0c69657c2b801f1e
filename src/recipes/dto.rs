use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipes::repo::{IngredientLine, RecipeSummary};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub author_id: Option<Uuid>,
}

/// Query string for the filtered + paginated listing. Accepts both the
/// camelCase names the web client sends and snake_case.
#[derive(Debug, Deserialize)]
pub struct TopPicksQuery {
    #[serde(alias = "mealType")]
    pub meal_type: Option<String>,
    /// Comma-separated list; every tag must match.
    #[serde(alias = "dietaryPreferences")]
    pub dietary_preferences: Option<String>,
    #[serde(alias = "maxTotalTime")]
    pub max_total_time: Option<i32>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl TopPicksQuery {
    pub fn preference_list(&self) -> Vec<String> {
        self.dietary_preferences
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedRecipes {
    pub recipes: Vec<RecipeSummary>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_recipes: i64,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author_id: Option<Uuid>,
    pub status: String,
    pub ingredients: Vec<IngredientLine>,
    pub equipment: Vec<String>,
    pub instructions: Vec<String>,
    pub servings: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub tags: Vec<String>,
    pub created_at: time::OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Free-text lines, e.g. "2 cups flour".
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub servings: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_list_splits_and_trims() {
        let q = TopPicksQuery {
            meal_type: None,
            dietary_preferences: Some("vegan, gluten-free ,,".into()),
            max_total_time: None,
            page: None,
            limit: None,
        };
        assert_eq!(q.preference_list(), vec!["vegan", "gluten-free"]);
    }

    #[test]
    fn preference_list_empty_when_absent() {
        let q = TopPicksQuery {
            meal_type: None,
            dietary_preferences: None,
            max_total_time: None,
            page: None,
            limit: None,
        };
        assert!(q.preference_list().is_empty());
    }

    #[test]
    fn camel_case_aliases_deserialize() {
        let q: TopPicksQuery = serde_json::from_str(
            r#"{"mealType":"dinner","dietaryPreferences":"vegan","maxTotalTime":30}"#,
        )
        .unwrap();
        assert_eq!(q.meal_type.as_deref(), Some("dinner"));
        assert_eq!(q.max_total_time, Some(30));
    }
}
