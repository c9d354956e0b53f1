// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Lowest grade a student can be enrolled in.
pub const MIN_GRADE: u8 = 9;
/// Highest grade a student can be enrolled in.
pub const MAX_GRADE: u8 = 12;

/// Access token lifetime when `JWT_EXPIRATION` is unset (60 minutes).
pub const DEFAULT_JWT_EXPIRATION: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub log_dir: String,
    /// Populate the store with demo accounts, courses and exams at startup.
    pub seed_demo_data: bool,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Per-IP throttling on the token endpoint.
    pub login_rate_limit: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:5173".to_string(),
                    "http://localhost:5174".to_string(),
                ]
            });

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        Self {
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            cors_origins,
            log_dir,
            seed_demo_data: env_flag("SEED_DEMO_DATA", true),
            admin_username: env::var("ADMIN_USERNAME").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            login_rate_limit: env_flag("LOGIN_RATE_LIMIT", true),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
