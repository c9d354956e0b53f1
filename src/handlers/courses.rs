// src/handlers/courses.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::course::{CoursePayload, CreateCourseRequest},
    state::AppState,
    utils::html::{sanitize, sanitize_opt},
};

fn sanitized(payload: CoursePayload) -> CoursePayload {
    CoursePayload {
        name: sanitize(&payload.name),
        description: sanitize_opt(payload.description),
    }
}

/// Lists all courses.
pub async fn list_courses(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.courses.list_courses().await)
}

/// Fetches a single course by ID.
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let course = state
        .courses
        .find_course(id)
        .await
        .ok_or(AppError::NotFound("Course not found".to_string()))?;

    Ok(Json(course))
}

/// Creates a course. A supplied id that is already taken is a 400.
/// Admin only.
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (id, course) = payload.into_parts();
    let course = state.courses.insert_course(id, sanitized(course)).await?;

    tracing::info!(course_id = course.id, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// Replaces a course's name and description.
/// Admin only.
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CoursePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let course = state.courses.replace_course(id, sanitized(payload)).await?;

    Ok(Json(course))
}

/// Deletes a course by ID.
/// Admin only. Exams referencing the course are left untouched.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.courses.delete_course(id).await?;

    tracing::info!(course_id = id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
