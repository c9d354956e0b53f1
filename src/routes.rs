// src/routes.rs

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, courses, exams, index, questions, results, students},
    models::user::Role,
    state::AppState,
    utils::jwt::{auth_middleware, require_role},
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Wraps `router` so every matched route requires a valid token and,
/// if given, a specific role. Layers run outside in: auth first, then role.
fn protect(router: Router<AppState>, state: &AppState, role: Option<Role>) -> Router<AppState> {
    let router = match role {
        Some(role) => router.route_layer(middleware::from_fn_with_state(role, require_role)),
        None => router,
    };
    router.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Assembles the main application router.
///
/// * Public: landing page, token, registration, catalog reads.
/// * Authenticated: profile and results.
/// * Admin: every catalog/student mutation and the answer keys.
/// * Student: exam submission.
pub fn create_router(state: AppState) -> Router {
    let mut token_routes = Router::new().route("/token", post(auth::login));

    if state.config.login_rate_limit {
        let governor_conf = GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("static rate limit configuration is valid");
        token_routes = token_routes.layer(GovernorLayer::new(Arc::new(governor_conf)));
    }

    let public_routes = Router::new()
        .route("/", get(index::welcome))
        .route("/register", post(auth::register))
        .route("/courses", get(courses::list_courses))
        .route("/courses/{id}", get(courses::get_course))
        .route("/exams", get(exams::list_exams))
        .route("/exams/{id}", get(exams::get_exam))
        .route("/questions/subjects", get(questions::list_subjects))
        .merge(token_routes);

    let user_routes = Router::new()
        .route("/users/me", get(auth::me))
        .route("/users/me/password", put(auth::change_password))
        .route("/results", get(results::list_results));

    let admin_routes = Router::new()
        .route("/courses", post(courses::create_course))
        .route(
            "/courses/{id}",
            put(courses::update_course).delete(courses::delete_course),
        )
        .route("/exams", post(exams::create_exam))
        .route(
            "/exams/{id}",
            put(exams::update_exam).delete(exams::delete_exam),
        )
        .route("/exams/{id}/answers", get(exams::get_exam_with_answers))
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/{username}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .route("/questions", get(questions::search_pool));

    let student_routes = Router::new().route("/take_exam", post(exams::take_exam));

    Router::new()
        .merge(public_routes)
        .merge(protect(user_routes, &state, None))
        .merge(protect(admin_routes, &state, Some(Role::Admin)))
        .merge(protect(student_routes, &state, Some(Role::Student)))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_origins)),
        )
        .with_state(state)
}
