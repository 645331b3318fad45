use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateGoalRequest, UpdateGoalRequest},
    repo,
    repo_types::Goal,
};
use crate::{auth::AuthUser, error::AppError, extract::ResourceId, state::AppState};

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/:id",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}

fn goal_not_found() -> AppError {
    AppError::not_found("Goal not found")
}

#[instrument(skip(state))]
pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(goals))
}

#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ResourceId(goal_id): ResourceId,
) -> Result<Json<Goal>, AppError> {
    repo::get(&state.db, user_id, goal_id)
        .await?
        .map(Json)
        .ok_or_else(goal_not_found)
}

#[instrument(skip(state, payload))]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Title is required"));
    }

    let goal = repo::create(
        &state.db,
        user_id,
        title,
        payload.description.as_deref(),
        payload.category_id,
    )
    .await?
    .ok_or_else(|| {
        warn!(user_id, category_id = ?payload.category_id, "goal references unknown category");
        AppError::not_found("Category not found")
    })?;

    info!(user_id, goal_id = goal.id, "goal created");
    Ok((StatusCode::CREATED, Json(goal)))
}

#[instrument(skip(state, payload))]
pub async fn update_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ResourceId(goal_id): ResourceId,
    Json(payload): Json<UpdateGoalRequest>,
) -> Result<&'static str, AppError> {
    if payload.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }
    let title = payload.title.as_deref().map(str::trim);
    if title.is_some_and(str::is_empty) {
        return Err(AppError::validation("Title is required"));
    }

    let touched = repo::update(
        &state.db,
        user_id,
        goal_id,
        title,
        payload.description.as_ref().map(Option::as_deref),
        payload.completed,
    )
    .await?;
    if touched == 0 {
        return Err(goal_not_found());
    }

    info!(user_id, goal_id, "goal updated");
    Ok("Goal updated successfully")
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ResourceId(goal_id): ResourceId,
) -> Result<&'static str, AppError> {
    if repo::delete(&state.db, user_id, goal_id).await? == 0 {
        return Err(goal_not_found());
    }
    info!(user_id, goal_id, "goal deleted");
    Ok("Goal deleted successfully")
}
