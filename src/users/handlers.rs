use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{repo::User, AuthUser},
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            bmi, CreateSubstitutionRequest, MessageResponse, ProfileResponse,
            QuestionnaireRequest, SubstitutionResponse, UpdateProfileRequest,
        },
        repo::{self, PreferenceSets, Substitution},
    },
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(get_profile).put(update_profile))
        .route("/questionnaire", post(submit_questionnaire))
}

pub fn substitution_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user/substitutions",
            get(list_substitutions).post(create_substitution),
        )
        .route("/user/substitutions/:id", delete(delete_substitution))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let sets = repo::fetch_preference_sets(&state.db, user_id).await?;

    Ok(Json(ProfileResponse {
        bmi: bmi(user.current_weight, user.height_cm),
        name: user.name,
        last_name: user.last_name,
        email: user.email,
        age: user.age,
        height_cm: user.height_cm,
        weight: user.current_weight,
        goal_weight: user.goal_weight,
        activity_level: user.activity_level,
        calorie_goal: user.calorie_goal,
        preferences: sets.preferences,
        allergies: sets.allergies,
        intolerances: sets.intolerances,
        is_premium: user.is_premium,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.db.begin().await?;

    let updated = sqlx::query(
        "UPDATE users SET current_weight = COALESCE($1, current_weight), \
         calorie_goal = COALESCE($2, calorie_goal) WHERE id = $3",
    )
    .bind(payload.weight)
    .bind(payload.calorie_goal)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    let sets = PreferenceSets {
        preferences: payload.preferences,
        allergies: payload.allergies,
        intolerances: payload.intolerances,
    };
    repo::replace_preference_sets(&mut tx, user_id, &sets).await?;

    tx.commit().await?;

    info!(user_id = %user_id, "profile updated");
    Ok(Json(MessageResponse {
        message: "Profile updated successfully.".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn submit_questionnaire(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<QuestionnaireRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.db.begin().await?;

    let sets = PreferenceSets {
        preferences: payload.preferences,
        allergies: payload.allergies,
        intolerances: payload.intolerances,
    };
    repo::replace_preference_sets(&mut tx, user_id, &sets).await?;

    sqlx::query("UPDATE users SET calorie_goal = $1 WHERE id = $2")
        .bind(payload.calorie_goal)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(user_id = %user_id, "questionnaire saved");
    Ok(Json(MessageResponse {
        message: "Preferences saved successfully.".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_substitutions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SubstitutionResponse>>, ApiError> {
    let subs = Substitution::list_for_user(&state.db, user_id).await?;
    let items = subs
        .into_iter()
        .map(|s| SubstitutionResponse {
            id: s.id,
            original_name: s.original_name,
            preferred_name: s.preferred_name,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn create_substitution(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateSubstitutionRequest>,
) -> Result<(StatusCode, Json<SubstitutionResponse>), ApiError> {
    let original = payload.original_name.trim();
    let preferred = payload.preferred_name.trim();
    if original.is_empty() || preferred.is_empty() {
        return Err(ApiError::validation(
            "Missing original_name or preferred_name",
        ));
    }

    let sub = Substitution::create(&state.db, user_id, original, preferred).await?;
    info!(user_id = %user_id, substitution_id = %sub.id, "substitution added");
    Ok((
        StatusCode::CREATED,
        Json(SubstitutionResponse {
            id: sub.id,
            original_name: sub.original_name,
            preferred_name: sub.preferred_name,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_substitution(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Ownership is part of the delete predicate; a foreign id looks absent.
    if !Substitution::delete_owned(&state.db, id, user_id).await? {
        warn!(user_id = %user_id, substitution_id = %id, "substitution delete missed");
        return Err(ApiError::not_found(
            "Substitution not found or not owned by user",
        ));
    }
    Ok(Json(MessageResponse {
        message: "Substitution deleted successfully".into(),
    }))
}
