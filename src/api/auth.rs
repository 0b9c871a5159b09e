// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Registration and login endpoints (the token issuance path).

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{password, UserType};
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::state::AppState;

/// Response for a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// The signed bearer token.
    pub token: String,
    /// Always "Bearer".
    pub token_type: String,
    /// Requested token lifetime in seconds.
    pub expires_in: i64,
    /// The authenticated account.
    pub user: User,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(ApiError::bad_request("name and email are required"));
    }
    if request.password.len() < 8 {
        return Err(ApiError::bad_request(
            "password must be at least 8 characters",
        ));
    }

    // Accepted case-insensitively, stored canonical.
    let tipo_usuario = UserType::from_str(&request.tipo_usuario)
        .ok_or_else(|| ApiError::bad_request("tipo_usuario must be CANDIDATO or INSTITUICAO"))?;

    let password_hash = password::hash(&request.password)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))?;

    let user = state.store.write().await.insert_user(
        request.name.trim(),
        request.email.trim(),
        tipo_usuario,
        password_hash,
    )?;

    tracing::info!(user_id = user.id, tipo_usuario = %user.tipo_usuario, "account registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate and receive a bearer token.
///
/// The failure message is identical for unknown emails and wrong
/// passwords, so this endpoint cannot be used to enumerate accounts.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid email or password"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .read()
        .await
        .user_by_email(&request.email)
        .ok_or_else(ApiError::invalid_credentials)?;

    if !password::verify(&request.password, &user.password_hash) {
        return Err(ApiError::invalid_credentials());
    }

    let token = state
        .tokens
        .issue_default(user.id, user.tipo_usuario)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    tracing::debug!(user_id = user.id, "token issued");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.default_ttl_secs(),
        user,
    }))
}
