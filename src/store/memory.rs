//! Lock-protected in-memory repositories.
//!
//! Each collection sits behind its own `RwLock`. Existence checks and the
//! mutation they guard always happen under a single write guard.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    CourseRepository, ExamRepository, ResultRepository, StoreError, StoreResult, UserRepository,
};
use crate::models::{
    course::{Course, CoursePayload},
    exam::{Exam, ExamFilter, ExamPayload},
    result::ExamResult,
    user::{Role, User, UserPatch},
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, User>>,
    courses: RwLock<BTreeMap<i64, Course>>,
    exams: RwLock<BTreeMap<i64, Exam>>,
    results: RwLock<Vec<ExamResult>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolves the key for a new record: the requested id if free,
/// otherwise one past the current maximum. Nothing is assigned once the
/// maximum is `i64::MAX`.
fn claim_id<V>(map: &BTreeMap<i64, V>, requested: Option<i64>, kind: &str) -> StoreResult<i64> {
    match requested {
        Some(id) if map.contains_key(&id) => {
            Err(StoreError::Duplicate(format!("{kind} with id {id} already exists")))
        }
        Some(id) => Ok(id),
        None => match map.keys().next_back() {
            None => Ok(1),
            Some(last) => last.checked_add(1).ok_or_else(|| {
                StoreError::IdsExhausted(format!("No {} id left above {last}; supply one", kind.to_lowercase()))
            }),
        },
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }

    async fn list_users(&self, role: Option<Role>) -> Vec<User> {
        let users = self.users.read().await;
        let mut list: Vec<User> = users
            .values()
            .filter(|u| role.is_none_or(|r| r == u.role))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.username.cmp(&b.username));
        list
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::Duplicate(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, username: &str, patch: UserPatch) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(username)
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()))?;
        patch.apply(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, username: &str) -> StoreResult<User> {
        self.users
            .write()
            .await
            .remove(username)
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()))
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn list_courses(&self) -> Vec<Course> {
        self.courses.read().await.values().cloned().collect()
    }

    async fn find_course(&self, id: i64) -> Option<Course> {
        self.courses.read().await.get(&id).cloned()
    }

    async fn insert_course(&self, id: Option<i64>, course: CoursePayload) -> StoreResult<Course> {
        let mut courses = self.courses.write().await;
        let id = claim_id(&courses, id, "Course")?;
        let course = Course {
            id,
            name: course.name,
            description: course.description,
        };
        courses.insert(id, course.clone());
        Ok(course)
    }

    async fn replace_course(&self, id: i64, course: CoursePayload) -> StoreResult<Course> {
        let mut courses = self.courses.write().await;
        let slot = courses
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Course not found".to_string()))?;
        slot.name = course.name;
        slot.description = course.description;
        Ok(slot.clone())
    }

    async fn delete_course(&self, id: i64) -> StoreResult<Course> {
        self.courses
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound("Course not found".to_string()))
    }
}

#[async_trait]
impl ExamRepository for InMemoryStore {
    async fn list_exams(&self, filter: &ExamFilter) -> Vec<Exam> {
        self.exams
            .read()
            .await
            .values()
            .filter(|exam| filter.matches(exam))
            .cloned()
            .collect()
    }

    async fn find_exam(&self, id: i64) -> Option<Exam> {
        self.exams.read().await.get(&id).cloned()
    }

    async fn insert_exam(&self, id: Option<i64>, exam: ExamPayload) -> StoreResult<Exam> {
        let mut exams = self.exams.write().await;
        let id = claim_id(&exams, id, "Exam")?;
        let exam = Exam {
            id,
            title: exam.title,
            description: exam.description,
            course_id: exam.course_id,
            grade: exam.grade,
            questions: exam.questions,
        };
        exams.insert(id, exam.clone());
        Ok(exam)
    }

    async fn replace_exam(&self, id: i64, exam: ExamPayload) -> StoreResult<Exam> {
        let mut exams = self.exams.write().await;
        let slot = exams
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("Exam not found".to_string()))?;
        *slot = Exam {
            id,
            title: exam.title,
            description: exam.description,
            course_id: exam.course_id,
            grade: exam.grade,
            questions: exam.questions,
        };
        Ok(slot.clone())
    }

    async fn delete_exam(&self, id: i64) -> StoreResult<Exam> {
        self.exams
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound("Exam not found".to_string()))
    }
}

#[async_trait]
impl ResultRepository for InMemoryStore {
    async fn append_result(&self, result: ExamResult) -> ExamResult {
        self.results.write().await.push(result.clone());
        result
    }

    async fn list_results(&self, username: Option<&str>, exam_id: Option<i64>) -> Vec<ExamResult> {
        self.results
            .read()
            .await
            .iter()
            .filter(|r| username.is_none_or(|u| u == r.username))
            .filter(|r| exam_id.is_none_or(|id| id == r.exam_id))
            .cloned()
            .collect()
    }
}
