// src/handlers/exams.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        exam::{CreateExamRequest, ExamFilter, ExamPayload, PublicExam},
        result::{ExamResult, ExamSubmission, TakeExamRequest},
    },
    state::AppState,
    utils::{html::sanitize, jwt::CurrentUser},
};

/// Validates an exam body, checks its course exists and sanitizes free text.
async fn prepare(state: &AppState, payload: ExamPayload) -> Result<ExamPayload, AppError> {
    payload.validate()?;

    if state.courses.find_course(payload.course_id).await.is_none() {
        return Err(AppError::BadRequest(format!(
            "Course {} does not exist",
            payload.course_id
        )));
    }

    Ok(ExamPayload {
        title: sanitize(&payload.title),
        description: sanitize(&payload.description),
        ..payload
    })
}

/// Lists exams, optionally filtered by `course_id` and/or `grade`.
/// The answer key is never included.
pub async fn list_exams(
    State(state): State<AppState>,
    Query(filter): Query<ExamFilter>,
) -> impl IntoResponse {
    let exams: Vec<PublicExam> = state
        .exams
        .list_exams(&filter)
        .await
        .iter()
        .map(PublicExam::from)
        .collect();

    Json(exams)
}

/// Fetches a single exam without its answer key.
pub async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = state
        .exams
        .find_exam(id)
        .await
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(PublicExam::from(&exam)))
}

/// Fetches a single exam including the correct option of every question.
/// Admin only.
pub async fn get_exam_with_answers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam = state
        .exams
        .find_exam(id)
        .await
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    Ok(Json(exam))
}

/// Creates an exam.
/// Admin only.
pub async fn create_exam(
    State(state): State<AppState>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (id, exam) = payload.into_parts();
    let exam = prepare(&state, exam).await?;
    let exam = state.exams.insert_exam(id, exam).await?;

    tracing::info!(exam_id = exam.id, questions = exam.questions.len(), "Exam created");
    Ok((StatusCode::CREATED, Json(exam)))
}

/// Replaces an exam's content, questions included.
/// Admin only. Results already recorded keep their original scores.
pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ExamPayload>,
) -> Result<impl IntoResponse, AppError> {
    let exam = prepare(&state, payload).await?;
    let exam = state.exams.replace_exam(id, exam).await?;

    Ok(Json(exam))
}

/// Deletes an exam by ID.
/// Admin only.
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.exams.delete_exam(id).await?;

    tracing::info!(exam_id = id, "Exam deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Scores a student's attempt and appends it to the result log.
///
/// * `answers[i]` is compared with the answer key of question `i`.
/// * Missing trailing answers count as wrong; extra ones are ignored.
/// * Score = floor(100 * correct / question count).
///
/// The response carries the answer key for the submitted exam so the
/// student can review each question.
///
/// Student only.
pub async fn take_exam(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<TakeExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let exam = state
        .exams
        .find_exam(req.exam_id)
        .await
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let score = exam.score(&req.answers);
    let review = exam.review(&req.answers);

    let result = state
        .results
        .append_result(ExamResult {
            username: user.username,
            exam_id: exam.id,
            score,
            answers: req.answers,
            submitted_at: Utc::now(),
        })
        .await;

    tracing::info!(
        username = %result.username,
        exam_id = result.exam_id,
        score = result.score,
        "Exam submitted"
    );
    Ok(Json(ExamSubmission { result, review }))
}
