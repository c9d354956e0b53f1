// src/handlers/auth.rs

use axum::{Extension, Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{
        ChangePasswordRequest, CreateStudentRequest, LoginRequest, Role, TokenResponse, User,
        UserPatch,
    },
    state::AppState,
    utils::{
        hash::{hash_password, verify_password},
        jwt::{CurrentUser, sign_jwt},
    },
};

/// Self-registration. New accounts are always students.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
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

    tracing::info!(username = %user.username, "Student registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a bearer token.
///
/// Takes an `application/x-www-form-urlencoded` body with
/// `username` and `password`. Unknown users, wrong passwords and
/// disabled accounts all yield 401.
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invalid = || AppError::AuthError("Incorrect username or password".to_string());

    let Some(user) = state.users.find_user(&payload.username).await else {
        tracing::warn!(username = %payload.username, "Login failed: unknown user");
        return Err(invalid());
    };

    if !verify_password(&payload.password, &user.hashed_password)? {
        tracing::warn!(username = %user.username, "Login failed: wrong password");
        return Err(invalid());
    }

    if user.disabled {
        return Err(AppError::AuthError("Inactive user".to_string()));
    }

    let token = sign_jwt(
        &user.username,
        &state.config.jwt_secret,
        state.config.jwt_expiration,
    )?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Returns the caller's profile.
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}

/// Lets any authenticated user change their own password.
/// The current password must be supplied.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !verify_password(&payload.current_password, &user.hashed_password)? {
        return Err(AppError::AuthError("Current password is incorrect".to_string()));
    }

    state
        .users
        .update_user(
            &user.username,
            UserPatch {
                hashed_password: Some(hash_password(&payload.new_password)?),
                ..Default::default()
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
