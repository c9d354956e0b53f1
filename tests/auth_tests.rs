// tests/auth_tests.rs

mod common;

use chrono::Utc;
use common::{
    JWT_SECRET, admin_token, login, spawn_app, spawn_app_with, student_token, test_config,
    unique_name,
};
use exam_platform::utils::jwt::Claims;
use jsonwebtoken::{EncodingKey, Header, encode};

fn registration(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "full_name": "New Student",
        "email": "new.student@example.com",
        "password": password,
        "grade": 10
    })
}

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_returns_profile_without_hash() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_name("u");

    let response = client
        .post(format!("{}/register", address))
        .json(&registration(&username, "password123"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["role"], "student");
    assert_eq!(body["grade"], 10);
    assert_eq!(body["disabled"], false);
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn register_duplicate_username_fails() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/register", address))
        .json(&registration("student", "password123"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn register_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Username too short
    let response = client
        .post(format!("{}/register", address))
        .json(&registration("yo", "password123"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // Grade outside 9-12
    let mut body = registration(&unique_name("u"), "password123");
    body["grade"] = serde_json::json!(7);
    let response = client
        .post(format!("{}/register", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn login_then_me_returns_same_user() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_name("u");

    client
        .post(format!("{}/register", address))
        .json(&registration(&username, "password123"))
        .send()
        .await
        .expect("Register failed");

    let token = login(&client, &address, &username, "password123").await;

    let me: serde_json::Value = client
        .get(format!("{}/users/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(me["username"], username.as_str());
    assert_eq!(me["role"], "student");
}

#[tokio::test]
async fn wrong_password_is_401_with_bearer_challenge() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for (username, password) in [("student", "nope"), ("ghost", "student123")] {
        let response = client
            .post(format!("{}/token", address))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 401);
        assert_eq!(response.headers()["www-authenticate"], "Bearer");
    }
}

#[tokio::test]
async fn missing_or_malformed_header_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/users/me", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .get(format!("{}/users/me", address))
        .header("Authorization", "Token abc")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = student_token(&client, &address).await;

    // Re-sign the same claims with another key, keeping the structure valid.
    let now = Utc::now().timestamp() as usize;
    let forged = encode(
        &Header::default(),
        &Claims {
            sub: "admin".to_string(),
            iat: now,
            exp: now + 600,
        },
        &EncodingKey::from_secret(b"not-the-server-secret"),
    )
    .unwrap();

    // Graft an admin payload onto the genuine header and signature.
    let genuine: Vec<&str> = token.split('.').collect();
    let forged_payload = forged.split('.').nth(1).unwrap();
    let grafted = format!("{}.{}.{}", genuine[0], forged_payload, genuine[2]);

    for bad in [forged, grafted, "not.a.jwt".to_string()] {
        let response = client
            .get(format!("{}/users/me", address))
            .bearer_auth(&bad)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401);
    }
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let now = Utc::now().timestamp() as usize;
    let expired = encode(
        &Header::default(),
        &Claims {
            sub: "student".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        },
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = client
        .get(format!("{}/users/me", address))
        .bearer_auth(&expired)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn token_of_deleted_user_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_name("u");

    client
        .post(format!("{}/register", address))
        .json(&registration(&username, "password123"))
        .send()
        .await
        .unwrap();
    let token = login(&client, &address, &username, "password123").await;

    let admin = admin_token(&client, &address).await;
    let response = client
        .delete(format!("{}/students/{}", address, username))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/users/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn disabled_student_cannot_log_in() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let admin = admin_token(&client, &address).await;

    let response = client
        .put(format!("{}/students/student2", address))
        .bearer_auth(&admin)
        .json(&serde_json::json!({ "disabled": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .post(format!("{}/token", address))
        .form(&[("username", "student2"), ("password", "student2123")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn change_password_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let username = unique_name("u");

    client
        .post(format!("{}/register", address))
        .json(&registration(&username, "password123"))
        .send()
        .await
        .unwrap();
    let token = login(&client, &address, &username, "password123").await;

    // Wrong current password
    let response = client
        .put(format!("{}/users/me/password", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "current_password": "wrong",
            "new_password": "brand-new-pass"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = client
        .put(format!("{}/users/me/password", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "current_password": "password123",
            "new_password": "brand-new-pass"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .post(format!("{}/token", address))
        .form(&[("username", username.as_str()), ("password", "password123")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    login(&client, &address, &username, "brand-new-pass").await;
}

#[tokio::test]
async fn token_endpoint_throttles_bursts() {
    let address = spawn_app_with(exam_platform::config::Config {
        login_rate_limit: true,
        ..test_config()
    })
    .await;
    let client = reqwest::Client::new();

    // Within the burst, logins go through normally.
    let token = login(&client, &address, "student", "student123").await;
    assert!(!token.is_empty());

    let mut statuses = Vec::new();
    for _ in 0..10 {
        let response = client
            .post(format!("{}/token", address))
            .form(&[("username", "nobody"), ("password", "wrong")])
            .send()
            .await
            .unwrap();
        statuses.push(response.status().as_u16());
    }

    assert_eq!(statuses[0], 401);
    assert!(statuses.contains(&429), "statuses: {statuses:?}");
    assert!(statuses.iter().all(|s| *s == 401 || *s == 429));

    // Other routes are not throttled.
    let response = client.get(format!("{}/courses", address)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
