// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::exam::GradedQuestion;

/// Scored record of one exam attempt by one user.
/// Results form an append-only log; retakes add new records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub username: String,
    pub exam_id: i64,
    /// Percentage (0-100), rounded down.
    pub score: u8,
    pub answers: Vec<i64>,
    pub submitted_at: DateTime<Utc>,
}

/// Response to a submission: the stored result plus a per-question review.
#[derive(Debug, Serialize)]
pub struct ExamSubmission {
    #[serde(flatten)]
    pub result: ExamResult,
    pub review: Vec<GradedQuestion>,
}

/// DTO for submitting an exam attempt.
/// `answers[i]` is the chosen option index for question `i`.
#[derive(Debug, Deserialize)]
pub struct TakeExamRequest {
    pub exam_id: i64,
    pub answers: Vec<i64>,
}

/// Query parameters for listing results.
#[derive(Debug, Default, Deserialize)]
pub struct ResultFilter {
    pub exam_id: Option<i64>,
}
