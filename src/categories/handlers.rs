use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CategoryRequest, CreatedCategoryResponse},
    repo,
    repo_types::Category,
};
use crate::{auth::AuthUser, error::AppError, extract::ResourceId, state::AppState};

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(rename_category)
                .delete(delete_category),
        )
}

fn category_not_found() -> AppError {
    AppError::not_found("Category not found")
}

fn category_name(payload: &CategoryRequest) -> Result<&str, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Category name is required"));
    }
    Ok(name)
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(repo::list_by_user(&state.db, user_id).await?))
}

#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ResourceId(category_id): ResourceId,
) -> Result<Json<Category>, AppError> {
    repo::get(&state.db, user_id, category_id)
        .await?
        .map(Json)
        .ok_or_else(category_not_found)
}

#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CreatedCategoryResponse>), AppError> {
    let name = category_name(&payload)?;
    let category = repo::create(&state.db, user_id, name).await?;
    info!(user_id, category_id = category.id, "category created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedCategoryResponse {
            id: category.id,
            name: category.name,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn rename_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ResourceId(category_id): ResourceId,
    Json(payload): Json<CategoryRequest>,
) -> Result<&'static str, AppError> {
    let name = category_name(&payload)?;
    if repo::rename(&state.db, user_id, category_id, name).await? == 0 {
        return Err(category_not_found());
    }
    info!(user_id, category_id, "category renamed");
    Ok("Category updated successfully")
}

#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ResourceId(category_id): ResourceId,
) -> Result<&'static str, AppError> {
    if repo::delete(&state.db, user_id, category_id).await? == 0 {
        return Err(category_not_found());
    }
    info!(user_id, category_id, "category deleted");
    Ok("Category deleted successfully")
}
