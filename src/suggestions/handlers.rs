use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{auth::AuthUser, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

pub fn suggestion_routes() -> Router<AppState> {
    Router::new().route("/suggestions", post(get_suggestion))
}

#[instrument(skip(state, payload))]
pub async fn get_suggestion(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let prompt = payload.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::validation("Prompt is required"));
    }

    info!(user_id, prompt_len = prompt.len(), "requesting suggestion");
    let suggestion = state.completions.complete(prompt).await.map_err(|e| {
        error!(error = %e, user_id, "completion failed");
        AppError::ExternalService {
            message: "Failed to generate suggestion".into(),
            detail: format!("{:#}", e),
        }
    })?;

    Ok(Json(SuggestionResponse { suggestion }))
}
