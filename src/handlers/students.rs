// src/handlers/students.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{CreateStudentRequest, Role, UpdateStudentRequest, User, UserPatch},
    state::AppState,
    utils::hash::hash_password,
};

/// Resolves `username` to a student account; admins and unknown names are 404.
async fn find_student(state: &AppState, username: &str) -> Result<User, AppError> {
    state
        .users
        .find_user(username)
        .await
        .filter(User::is_student)
        .ok_or(AppError::NotFound("Student not found".to_string()))
}

/// Lists all students.
/// Admin only.
pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.users.list_users(Some(Role::Student)).await)
}

/// Fetches one student's profile.
/// Admin only.
pub async fn get_student(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(find_student(&state, &username).await?))
}

/// Creates a student account.
/// Admin only.
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .users
        .insert_user(User {
            username: payload.username,
            full_name: payload.full_name,
            email: payload.email,
            disabled: false,
            role: Role::Student,
            grade: Some(payload.grade),
            hashed_password: hash_password(&payload.password)?,
        })
        .await?;

    tracing::info!(username = %user.username, "Student created by admin");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates a student. Only the supplied fields change.
/// Admin only.
pub async fn update_student(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    find_student(&state, &username).await?;

    let hashed_password = match payload.password {
        Some(password) => Some(hash_password(&password)?),
        None => None,
    };

    let user = state
        .users
        .update_user(
            &username,
            UserPatch {
                full_name: payload.full_name,
                email: payload.email,
                hashed_password,
                disabled: payload.disabled,
                grade: payload.grade,
            },
        )
        .await?;

    Ok(Json(user))
}

/// Deletes a student account. Their results stay in the log.
/// Admin only.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    find_student(&state, &username).await?;
    state.users.delete_user(&username).await?;

    tracing::info!(username = %username, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
