// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Usernames are restricted to a URL-safe alphabet since they appear in paths.
pub static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid username regex"));

/// Governs endpoint authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

/// A platform account. The username is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
    pub role: Role,

    /// School grade (9-12). Only students carry one.
    pub grade: Option<u8>,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub hashed_password: String,
}

impl User {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

/// Partial modification applied atomically by the user store.
#[derive(Debug, Default)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub disabled: Option<bool>,
    pub grade: Option<u8>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(full_name) = self.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(email) = self.email {
            user.email = Some(email);
        }
        if let Some(hashed_password) = self.hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(disabled) = self.disabled {
            user.disabled = disabled;
        }
        if let Some(grade) = self.grade {
            user.grade = Some(grade);
        }
    }
}

/// DTO for creating a student, used both by self-registration and by admins.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username length must be between 3 and 50 characters."
        ),
        regex(
            path = *USERNAME_REGEX,
            message = "Username may only contain letters, digits, '.', '_' and '-'."
        )
    )]
    pub username: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email address."))]
    pub email: Option<String>,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
    #[validate(range(min = 9, max = 12, message = "Grade must be between 9 and 12."))]
    pub grade: u8,
}

/// DTO for updating a student. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email address."))]
    pub email: Option<String>,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: Option<String>,
    pub disabled: Option<bool>,
    #[validate(range(min = 9, max = 12, message = "Grade must be between 9 and 12."))]
    pub grade: Option<u8>,
}

/// Form body of the token endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// DTO for a user changing their own password.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub new_password: String,
}
