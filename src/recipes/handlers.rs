use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    recipes::{
        dto::{CreateRecipeRequest, ListQuery, PaginatedRecipes, RecipeDetail, TopPicksQuery},
        query::{self, RecipeFilter},
        repo::{self, NewRecipe, Recipe},
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/toppicks", get(top_picks))
        .route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/recipes", post(create_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<repo::RecipeSummary>>, ApiError> {
    let filter = RecipeFilter {
        search: q.search,
        author_id: q.author_id,
        ..Default::default()
    };
    let recipes = repo::list_all(&state.db, &filter).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn top_picks(
    State(state): State<AppState>,
    Query(q): Query<TopPicksQuery>,
) -> Result<Json<PaginatedRecipes>, ApiError> {
    let (page, limit) = query::normalize_page(q.page, q.limit);
    let filter = RecipeFilter {
        meal_type: q.meal_type.clone(),
        dietary_preferences: q.preference_list(),
        max_total_time: q.max_total_time,
        author_id: None,
        search: None,
    };

    let total_recipes = repo::count_filtered(&state.db, &filter).await?;
    let recipes = repo::list_filtered(&state.db, &filter, limit, query::page_offset(page, limit)).await?;

    Ok(Json(PaginatedRecipes {
        recipes,
        current_page: page,
        total_pages: query::total_pages(total_recipes, limit),
        total_recipes,
    }))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let recipe = Recipe::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    let ingredients = repo::ingredient_lines(&state.db, &recipe).await?;
    let tags = repo::tags_for_recipe(&state.db, recipe.id).await?;

    Ok(Json(detail(recipe, ingredients, tags)))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetail>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }
    if payload.ingredients.iter().all(|l| l.trim().is_empty()) {
        return Err(ApiError::validation("At least one ingredient is required"));
    }

    let recipe = Recipe::create(
        &state.db,
        NewRecipe {
            title: payload.title.trim(),
            description: payload.description.as_deref(),
            image_url: payload.image_url.as_deref(),
            author_id: user_id,
            ingredient_lines: &payload.ingredients,
            equipment: &payload.equipment,
            instructions: &payload.instructions,
            servings: payload.servings.as_deref(),
            prep_time_minutes: payload.prep_time_minutes,
            cook_time_minutes: payload.cook_time_minutes,
            total_time_minutes: payload.total_time_minutes,
            tags: &payload.tags,
        },
    )
    .await?;

    let ingredients = repo::ingredient_lines(&state.db, &recipe).await?;
    let tags = repo::tags_for_recipe(&state.db, recipe.id).await?;

    info!(user_id = %user_id, recipe_id = %recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(detail(recipe, ingredients, tags))))
}

fn detail(
    recipe: Recipe,
    ingredients: Vec<repo::IngredientLine>,
    tags: Vec<String>,
) -> RecipeDetail {
    RecipeDetail {
        id: recipe.id,
        title: recipe.title,
        description: recipe.description,
        image_url: recipe.image_url,
        author_id: recipe.author_id,
        status: recipe.status,
        ingredients,
        equipment: string_list(recipe.equipment),
        instructions: string_list(recipe.instructions),
        servings: recipe.servings,
        prep_time_minutes: recipe.prep_time_minutes,
        cook_time_minutes: recipe.cook_time_minutes,
        total_time_minutes: recipe.total_time_minutes,
        tags,
        created_at: recipe.created_at,
    }
}

fn string_list(value: Option<serde_json::Value>) -> Vec<String> {
    match value {
        Some(serde_json::Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|e| e.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_list_extracts_only_strings() {
        let value = json!(["whisk", 2, "bowl"]);
        assert_eq!(string_list(Some(value)), vec!["whisk", "bowl"]);
    }

    #[test]
    fn string_list_handles_missing_column() {
        assert!(string_list(None).is_empty());
        assert!(string_list(Some(json!("oops"))).is_empty());
    }
}
