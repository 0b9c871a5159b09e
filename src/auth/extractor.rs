// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! `CandidateOnly` and `InstitutionOnly` additionally gate on the account
//! type. Any verification failure collapses to the same generic 401 via
//! [`AuthError`]; gate failures are 403.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Extracts the bearer token from the `Authorization` header, verifies it,
/// requires a `sub` claim, and resolves the subject with a fresh lookup in
/// the user directory. The resolved identity is attached to the request's
/// extensions so that stacked extractors on the same request reuse it;
/// nothing survives the request.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Reuse an identity already resolved earlier in this request.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        let claims = state.tokens.verify(token)?;

        // `verify` leaves subject presence to this boundary.
        let subject = claims.sub.ok_or(AuthError::MissingSubject)?;

        // Fresh directory lookup on every request; a miss fails closed.
        let user = state
            .store
            .read()
            .await
            .user_by_id(subject)
            .ok_or(AuthError::UnknownSubject)?;

        let authed = AuthenticatedUser::from_parts(&user, &claims);
        tracing::trace!(
            user_id = authed.user_id,
            user_type = %authed.user_type,
            expires_at = ?authed.expires_at,
            "request authenticated"
        );
        parts.extensions.insert(authed.clone());

        Ok(Auth(authed))
    }
}

/// Extractor that requires a candidate account.
pub struct CandidateOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for CandidateOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_candidate() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(CandidateOnly(user))
    }
}

/// Extractor that requires an institution account.
pub struct InstitutionOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for InstitutionOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.is_institution() {
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(InstitutionOnly(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenService, UserType};
    use crate::config::AuthConfig;
    use crate::models::User;
    use crate::store::InMemoryStore;
    use axum::http::Request;

    /// App state with one candidate and one institution seeded.
    fn test_state() -> (AppState, User, User) {
        let mut store = InMemoryStore::new();
        let candidate = store
            .insert_user("Ana", "ana@example.com", UserType::Candidato, "hash")
            .unwrap();
        let institution = store
            .insert_user("Casa Verde", "rh@casaverde.org", UserType::Instituicao, "hash")
            .unwrap();

        let tokens = TokenService::new(AuthConfig::new("test-secret").unwrap());
        (AppState::new(store, tokens), candidate, institution)
    }

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let (state, _, _) = test_state();
        let mut parts = parts_with_header(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn non_bearer_header_is_rejected() {
        let (state, _, _) = test_state();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn valid_token_resolves_the_directory_record() {
        let (state, candidate, _) = test_state();
        let token = state
            .tokens
            .issue_default(candidate.id, candidate.tipo_usuario)
            .unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id, candidate.id);
        assert_eq!(user.user_type, UserType::Candidato);
        assert_eq!(user.email, "ana@example.com");
    }

    #[tokio::test]
    async fn token_for_deleted_user_fails_closed() {
        let (state, _, _) = test_state();
        // Signed and temporally valid, but no directory record for sub 999.
        let token = state.tokens.issue_default(999, UserType::Candidato).unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::UnknownSubject)));
    }

    #[tokio::test]
    async fn garbage_token_is_unauthenticated_not_a_crash() {
        let (state, _, _) = test_state();
        let mut parts = parts_with_header(Some("Bearer not.a.token".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::Malformed)));
    }

    #[tokio::test]
    async fn extensions_take_precedence_over_the_header() {
        let (state, candidate, _) = test_state();
        let mut parts = parts_with_header(None);

        let resolved = AuthenticatedUser {
            user_id: candidate.id,
            user_type: candidate.tipo_usuario,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            expires_at: None,
        };
        parts.extensions.insert(resolved);

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id, candidate.id);
    }

    #[tokio::test]
    async fn candidate_gate_rejects_institutions() {
        let (state, _, institution) = test_state();
        let token = state
            .tokens
            .issue_default(institution.id, institution.tipo_usuario)
            .unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = CandidateOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn institution_gate_rejects_candidates() {
        let (state, candidate, _) = test_state();
        let token = state
            .tokens
            .issue_default(candidate.id, candidate.tipo_usuario)
            .unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let result = InstitutionOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));

        // The same token passes the matching gate.
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));
        let result = CandidateOnly::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn directory_record_wins_over_stale_token_discriminator() {
        let (state, candidate, _) = test_state();
        // Token claims the institution type, but the directory says candidate.
        let token = state
            .tokens
            .issue_default(candidate.id, UserType::Instituicao)
            .unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let Auth(user) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_type, UserType::Candidato);
    }
}
