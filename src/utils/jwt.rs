// src/utils/jwt.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::{Role, User},
    state::AppState,
};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - the username.
    pub sub: String,
    /// Issued-at as Unix timestamp.
    pub iat: usize,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// The authenticated caller, resolved from the token subject.
/// Inserted into request extensions by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Signs a new HS256 access token for `username`.
pub fn sign_jwt(username: &str, secret: &str, expiration_seconds: u64) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: username.to_owned(),
        iat: now,
        exp: now + expiration_seconds as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies signature and expiry of a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::AuthError("Could not validate credentials".to_string())
    })?;

    Ok(token_data.claims)
}

/// Axum Middleware: Authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and resolves the
/// subject to a stored user. Unknown or disabled users are rejected.
/// On success injects `CurrentUser` into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    let claims = verify_jwt(token, &state.config.jwt_secret)?;

    let user = state
        .users
        .find_user(&claims.sub)
        .await
        .ok_or_else(|| AppError::AuthError("Could not validate credentials".to_string()))?;

    if user.disabled {
        return Err(AppError::AuthError("Inactive user".to_string()));
    }

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Axum Middleware: Role Authorization.
///
/// Must be used AFTER `auth_middleware`; the required role is the layer's state:
/// `middleware::from_fn_with_state(Role::Admin, require_role)`.
/// Callers with any other role get 403 Forbidden.
pub async fn require_role(
    State(required): State<Role>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let CurrentUser(user) = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    if user.role != required {
        tracing::warn!(
            username = %user.username,
            required = required.as_str(),
            path = %req.uri().path(),
            "Role check failed"
        );
        return Err(AppError::Forbidden(format!(
            "This action requires the {} role",
            required.as_str()
        )));
    }

    Ok(next.run(req).await)
}
