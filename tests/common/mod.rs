// tests/common/mod.rs

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use exam_platform::{
    config::Config,
    routes,
    seed::{question_pool, seed_demo_data},
    state::AppState,
    store::InMemoryStore,
};

pub const JWT_SECRET: &str = "test_secret_for_integration_tests";

pub fn test_config() -> Config {
    Config {
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        log_dir: "logs".to_string(),
        seed_demo_data: true,
        admin_username: None,
        admin_password: None,
        login_rate_limit: false,
    }
}

/// Spawns the app with the demo dataset on a random port.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app() -> String {
    spawn_app_with(test_config()).await
}

/// Same as [`spawn_app`] with a custom configuration. Peer addresses are
/// exposed to the router the same way `main` does it.
pub async fn spawn_app_with(config: Config) -> String {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::in_memory(config, store, question_pool());
    seed_demo_data(&state).await.expect("Failed to seed demo data");

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    address
}

/// Logs in through the form-encoded token endpoint and returns the bearer token.
pub async fn login(client: &reqwest::Client, address: &str, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/token", address))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Login failed");

    assert_eq!(response.status().as_u16(), 200, "login as {username}");

    let body: serde_json::Value = response.json().await.expect("Failed to parse login json");
    assert_eq!(body["token_type"], "bearer");
    body["access_token"]
        .as_str()
        .expect("Token not found")
        .to_string()
}

pub async fn admin_token(client: &reqwest::Client, address: &str) -> String {
    login(client, address, "admin", "admin123").await
}

pub async fn student_token(client: &reqwest::Client, address: &str) -> String {
    login(client, address, "student", "student123").await
}

pub fn unique_name(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}
