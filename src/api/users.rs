// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! User endpoints.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{Auth, AuthenticatedUser, UserType};

/// Response for GET /v1/users/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// User's unique ID.
    pub user_id: u64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account-type discriminator.
    pub tipo_usuario: UserType,
}

impl From<AuthenticatedUser> for UserMeResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            tipo_usuario: user.user_type,
        }
    }
}

/// Get the current authenticated user's information.
///
/// Returns the identity resolved from the bearer token's subject, as the
/// user directory currently knows it.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserMeResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<UserMeResponse> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_me_response_from_authenticated_user() {
        let user = AuthenticatedUser {
            user_id: 42,
            user_type: UserType::Candidato,
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            expires_at: Some(1_700_003_600),
        };

        let response: UserMeResponse = user.into();
        assert_eq!(response.user_id, 42);
        assert_eq!(response.tipo_usuario, UserType::Candidato);
        assert_eq!(response.email, "ana@example.com");
    }
}
