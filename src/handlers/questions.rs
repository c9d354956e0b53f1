// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{error::AppError, models::question::PoolQuery, state::AppState};

/// Lists the subjects available in the question pool.
pub async fn list_subjects(State(state): State<AppState>) -> impl IntoResponse {
    let subjects: Vec<String> = state
        .question_pool
        .subjects()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(subjects)
}

/// Browses the question pool by `subject` and/or `grade`, answers included.
/// Admin only.
pub async fn search_pool(
    State(state): State<AppState>,
    Query(query): Query<PoolQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Entries borrow from the pool, so serialize before `state` is dropped.
    let entries = serde_json::to_value(state.question_pool.search(&query))
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(entries))
}
