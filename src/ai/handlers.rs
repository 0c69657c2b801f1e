use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    ai::{
        dto::{ChatReply, ChatRequest, GeneratedRecipe, ModifyRecipeRequest, RecipeChatRequest},
        prompts, repo,
        response::parse_generated_recipe,
    },
    auth::AuthUser,
    error::ApiError,
    recipes::repo::{ingredient_lines, Recipe},
    state::AppState,
    users::repo::Substitution,
};

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/recipe", post(chat_recipe))
        .route("/recipes/:id/modify", post(modify_recipe))
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    let prompt = prompts::chat_prompt(payload.message.trim());
    let reply = state.ai.generate(&prompt).await.map_err(|e| {
        error!(error = %e, "chat generation failed");
        ApiError::Internal(e)
    })?;

    repo::log_interaction(&state.db, None, &payload.message, &reply, "chat", None).await?;
    Ok(Json(ChatReply { reply }))
}

#[instrument(skip(state, payload))]
pub async fn chat_recipe(
    State(state): State<AppState>,
    Json(payload): Json<RecipeChatRequest>,
) -> Result<Json<GeneratedRecipe>, ApiError> {
    if payload.ingredients.trim().is_empty() {
        return Err(ApiError::validation("Ingredients are required"));
    }

    let prompt = prompts::recipe_from_ingredients_prompt(payload.ingredients.trim());
    let raw = state.ai.generate(&prompt).await.map_err(|e| {
        error!(error = %e, "recipe generation failed");
        ApiError::Internal(e)
    })?;

    finish_recipe_response(&state, None, &payload.ingredients, raw, "recipe_generation").await
}

#[instrument(skip(state, payload))]
pub async fn modify_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(payload): Json<ModifyRecipeRequest>,
) -> Result<Json<GeneratedRecipe>, ApiError> {
    let request = payload.modification_prompt.trim();
    if request.is_empty() {
        return Err(ApiError::validation("Modification prompt is required"));
    }

    let recipe = Recipe::find_by_id(&state.db, recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Original recipe not found."))?;

    let ingredients = ingredient_lines(&state.db, &recipe).await?;
    let subs = Substitution::list_for_user(&state.db, user_id).await?;

    let prompt = prompts::modification_prompt(&recipe, &ingredients, &subs, request);
    let raw = state.ai.generate(&prompt).await.map_err(|e| {
        error!(error = %e, recipe_id = %recipe.id, "recipe modification failed");
        ApiError::Internal(e)
    })?;

    let logged_query = format!(
        "Modification Request: {request} (Original Recipe ID: {}, Title: {})",
        recipe.id, recipe.title
    );
    finish_recipe_response(&state, Some(user_id), &logged_query, raw, "recipe_modification").await
}

/// Shared tail of every recipe-producing call: strip fences, parse, and
/// record the interaction. A parse failure is logged with an `*_error`
/// type that keeps the raw text, and surfaces as a 502 distinct from
/// transport failures.
async fn finish_recipe_response(
    state: &AppState,
    user_id: Option<Uuid>,
    query: &str,
    raw: String,
    interaction_type: &str,
) -> Result<Json<GeneratedRecipe>, ApiError> {
    match parse_generated_recipe(&raw) {
        Ok(recipe) => {
            repo::log_interaction(&state.db, user_id, query, &raw, interaction_type, None).await?;
            info!(interaction_type, "generated recipe parsed");
            Ok(Json(recipe))
        }
        Err(e) => {
            warn!(error = %e, interaction_type, "model returned unparseable recipe");
            repo::log_interaction(
                &state.db,
                user_id,
                query,
                &raw,
                &format!("{interaction_type}_error"),
                Some("AI JSON parsing failed"),
            )
            .await?;
            Err(ApiError::UpstreamFormat(
                "AI failed to return valid recipe format. Please try again.".into(),
            ))
        }
    }
}
