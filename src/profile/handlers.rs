use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        services::{is_valid_email, normalize_email, require},
        AuthUser,
    },
    error::AppError,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(ProfileResponse {
        name: user.name,
        email: user.email,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<&'static str, AppError> {
    require(&payload.name, "Name")?;
    require(&payload.email, "Email")?;
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(user_id, email = %email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }

    if !state
        .users
        .update_profile(user_id, payload.name.trim(), &email)
        .await?
    {
        return Err(AppError::not_found("User not found"));
    }
    info!(user_id, "profile updated");
    Ok("Profile updated successfully")
}
