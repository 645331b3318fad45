use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{dto::Report, repo};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/report", get(get_report))
}

#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Report>, AppError> {
    let row = repo::completion_counts(&state.db, user_id).await?;
    Ok(Json(Report::from(row)))
}
