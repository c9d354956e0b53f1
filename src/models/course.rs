// src/models/course.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A subject offered on the platform (e.g., "Mathematics").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Mutable fields of a course.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CoursePayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// DTO for creating a course. The id is assigned when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(range(min = 1))]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl CreateCourseRequest {
    pub fn into_parts(self) -> (Option<i64>, CoursePayload) {
        (
            self.id,
            CoursePayload {
                name: self.name,
                description: self.description,
            },
        )
    }
}
