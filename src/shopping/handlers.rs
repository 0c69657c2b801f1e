use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    recipes::repo::{ingredient_lines, Recipe},
    shopping::{
        dto::{GenerateRequest, GenerateResponse, UpdateItemRequest},
        generator::{build_list_items, SourcedIngredient},
        repo::{self, ShoppingListItem},
    },
    state::AppState,
    users::dto::MessageResponse,
    users::repo::Substitution,
};

pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-list", get(list_items))
        .route("/shopping-list/generate", post(generate))
        .route(
            "/shopping-list/items/:id",
            put(update_item).delete(delete_item),
        )
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ShoppingListItem>>, ApiError> {
    let items = ShoppingListItem::list_for_user(&state.db, user_id).await?;
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !ShoppingListItem::set_purchased(&state.db, id, user_id, payload.is_purchased).await? {
        return Err(ApiError::not_found("Item not found or not owned by user"));
    }
    Ok(Json(MessageResponse {
        message: "Item updated successfully.".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !ShoppingListItem::delete_owned(&state.db, id, user_id).await? {
        return Err(ApiError::not_found("Item not found or not owned by user"));
    }
    Ok(Json(MessageResponse {
        message: "Item deleted successfully.".into(),
    }))
}

/// Regenerates the user's list from a set of recipe ids. The previous list
/// is always replaced, never appended to, so repeating the same request is
/// idempotent.
#[instrument(skip(state, payload))]
pub async fn generate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), ApiError> {
    if payload.recipe_ids.is_empty() {
        return Err(ApiError::validation(
            "recipe_ids must be a non-empty array",
        ));
    }

    let mut gathered: Vec<SourcedIngredient> = Vec::new();
    for recipe_id in &payload.recipe_ids {
        let Some(recipe) = Recipe::find_by_id(&state.db, *recipe_id).await? else {
            warn!(user_id = %user_id, recipe_id = %recipe_id, "recipe not found, skipping");
            continue;
        };
        for line in ingredient_lines(&state.db, &recipe).await? {
            gathered.push(SourcedIngredient {
                name: line.name,
                quantity: line.quantity,
                source_recipe_id: recipe.id,
            });
        }
    }

    let subs = Substitution::list_for_user(&state.db, user_id).await?;
    let items = build_list_items(gathered, &subs);
    let item_count = repo::replace_for_user(&state.db, user_id, &items).await?;

    info!(user_id = %user_id, item_count, "shopping list regenerated");
    if item_count == 0 {
        return Ok((
            StatusCode::OK,
            Json(GenerateResponse {
                message: "No ingredients found for the selected recipes. Shopping list is empty."
                    .into(),
                item_count,
            }),
        ));
    }

    Ok((
        StatusCode::CREATED,
        Json(GenerateResponse {
            message: "Shopping list generated successfully.".into(),
            item_count,
        }),
    ))
}
