//! Repository contracts for the platform's data.
//!
//! Handlers only talk to these traits; [`memory::InMemoryStore`] is the
//! process-local implementation wired up at startup.

use std::fmt;

use async_trait::async_trait;

use crate::models::{
    course::{Course, CoursePayload},
    exam::{Exam, ExamFilter, ExamPayload},
    result::ExamResult,
    user::{Role, User, UserPatch},
};

pub mod memory;

pub use memory::InMemoryStore;

/// Failures a repository can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same key already exists.
    Duplicate(String),
    /// No record matches the key.
    NotFound(String),
    /// No free id remains above the current maximum.
    IdsExhausted(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate(msg)
            | StoreError::NotFound(msg)
            | StoreError::IdsExhausted(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, username: &str) -> Option<User>;

    /// Lists users ordered by username, optionally restricted to one role.
    async fn list_users(&self, role: Option<Role>) -> Vec<User>;

    /// Fails with `Duplicate` if the username is taken.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    async fn update_user(&self, username: &str, patch: UserPatch) -> StoreResult<User>;

    async fn delete_user(&self, username: &str) -> StoreResult<User>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_courses(&self) -> Vec<Course>;

    async fn find_course(&self, id: i64) -> Option<Course>;

    /// Inserts under `id`, or under the next free id when `None`.
    async fn insert_course(&self, id: Option<i64>, course: CoursePayload) -> StoreResult<Course>;

    async fn replace_course(&self, id: i64, course: CoursePayload) -> StoreResult<Course>;

    async fn delete_course(&self, id: i64) -> StoreResult<Course>;
}

#[async_trait]
pub trait ExamRepository: Send + Sync {
    async fn list_exams(&self, filter: &ExamFilter) -> Vec<Exam>;

    async fn find_exam(&self, id: i64) -> Option<Exam>;

    /// Inserts under `id`, or under the next free id when `None`.
    async fn insert_exam(&self, id: Option<i64>, exam: ExamPayload) -> StoreResult<Exam>;

    async fn replace_exam(&self, id: i64, exam: ExamPayload) -> StoreResult<Exam>;

    async fn delete_exam(&self, id: i64) -> StoreResult<Exam>;
}

#[async_trait]
pub trait ResultRepository: Send + Sync {
    async fn append_result(&self, result: ExamResult) -> ExamResult;

    /// Lists results in submission order, optionally filtered by user and exam.
    async fn list_results(&self, username: Option<&str>, exam_id: Option<i64>) -> Vec<ExamResult>;
}
