// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Job posting endpoints.
//!
//! Creation is institution-gated; saving is candidate-gated; listing only
//! requires authentication.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::{Auth, CandidateOnly, InstitutionOnly};
use crate::error::ApiError;
use crate::models::{CreateJobRequest, JobPosting};
use crate::state::AppState;

/// List all job postings.
#[utoipa::path(
    get,
    path = "/v1/jobs",
    tag = "Jobs",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All job postings", body = [JobPosting]),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_jobs(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Json<Vec<JobPosting>> {
    Json(state.store.read().await.list_jobs())
}

/// Publish a new job posting. Institution accounts only.
#[utoipa::path(
    post,
    path = "/v1/jobs",
    tag = "Jobs",
    security(("bearer" = [])),
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Posting created", body = JobPosting),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not an institution account"),
    )
)]
pub async fn create_job(
    InstitutionOnly(user): InstitutionOnly,
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobPosting>), ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }

    let job = state.store.write().await.create_job(user.user_id, request);
    tracing::info!(job_id = %job.id, institution_id = user.user_id, "job posting created");
    Ok((StatusCode::CREATED, Json(job)))
}

/// Save a job posting to the candidate's list. Candidate accounts only.
#[utoipa::path(
    post,
    path = "/v1/jobs/{job_id}/save",
    tag = "Jobs",
    security(("bearer" = [])),
    params(("job_id" = String, Path, description = "Job posting id")),
    responses(
        (status = 204, description = "Posting saved"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a candidate account"),
        (status = 404, description = "Posting not found"),
        (status = 422, description = "Posting already saved"),
    )
)]
pub async fn save_job(
    CandidateOnly(user): CandidateOnly,
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.write().await.save_job(user.user_id, &job_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the candidate's saved job postings.
#[utoipa::path(
    get,
    path = "/v1/jobs/saved",
    tag = "Jobs",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Saved job postings", body = [JobPosting]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a candidate account"),
    )
)]
pub async fn saved_jobs(
    CandidateOnly(user): CandidateOnly,
    State(state): State<AppState>,
) -> Json<Vec<JobPosting>> {
    Json(state.store.read().await.saved_jobs(user.user_id))
}
