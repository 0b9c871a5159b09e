// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{CreateJobRequest, JobPosting, LoginRequest, RegisterRequest, User},
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod jobs;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/users/me", get(users::get_current_user))
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/saved", get(jobs::saved_jobs))
        .route("/jobs/{job_id}/save", post(jobs::save_job))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        auth::register,
        auth::login,
        users::get_current_user,
        jobs::list_jobs,
        jobs::create_job,
        jobs::save_job,
        jobs::saved_jobs
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            auth::LoginResponse,
            users::UserMeResponse,
            JobPosting,
            CreateJobRequest,
            health::ReadyResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Auth", description = "Registration and token issuance"),
        (name = "Users", description = "Authenticated user information"),
        (name = "Jobs", description = "Job postings and saved jobs")
    )
)]
struct ApiDoc;
