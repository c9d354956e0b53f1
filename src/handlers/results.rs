// src/handlers/results.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    models::{result::ResultFilter, user::Role},
    state::AppState,
    utils::jwt::CurrentUser,
};

/// Lists exam results, optionally for a single exam.
/// Admins see every result; students only their own.
pub async fn list_results(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(filter): Query<ResultFilter>,
) -> impl IntoResponse {
    let owner = match user.role {
        Role::Admin => None,
        Role::Student => Some(user.username.as_str()),
    };

    Json(state.results.list_results(owner, filter.exam_id).await)
}
