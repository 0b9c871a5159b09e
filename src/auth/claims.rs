// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Token claims and the authenticated-user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user_type::UserType;
use crate::models::User;

/// Claim set carried inside a signed token.
///
/// All reserved claims are optional at the type level: `verify` returns the
/// claim set as-is and leaves presence requirements (notably `sub`) to the
/// request authenticator. Unrecognized claims are preserved in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject identifier (the authenticated user's id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<u64>,

    /// Account-type discriminator, canonical UPPERCASE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_usuario: Option<UserType>,

    /// Issued-at instant (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not-before instant (Unix seconds); equal to `iat` at issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Expiration instant (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Per-issuance unique identifier (128 random bits, base64url).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Issuer; present only when statically configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience; present only when statically configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Caller-supplied extra claims, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Claim names that issuance computes itself.
///
/// Caller-supplied extra claims colliding with these are dropped, so a
/// caller can never extend its own expiry or reassign the subject.
pub const RESERVED_CLAIMS: [&str; 8] = [
    "sub",
    "tipo_usuario",
    "iat",
    "nbf",
    "exp",
    "jti",
    "iss",
    "aud",
];

/// The identity resolved for one request.
///
/// Built by the request authenticator after signature verification and a
/// fresh user-directory lookup. Lives in the request's extensions only;
/// nothing is cached across requests.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user id (the token's `sub` claim).
    pub user_id: u64,

    /// Account-type discriminator from the directory record.
    pub user_type: UserType,

    /// Display name from the directory record.
    pub name: String,

    /// Email from the directory record.
    pub email: String,

    /// Token expiration (Unix seconds, used for logging, not serialized).
    #[serde(skip)]
    pub expires_at: Option<i64>,
}

impl AuthenticatedUser {
    /// Combine the directory record with the verified claim set.
    ///
    /// The discriminator comes from the directory, not the token: an
    /// account-type change takes effect on the next request rather than at
    /// the token's natural expiry.
    pub fn from_parts(user: &User, claims: &Claims) -> Self {
        Self {
            user_id: user.id,
            user_type: user.tipo_usuario,
            name: user.name.clone(),
            email: user.email.clone(),
            expires_at: claims.exp,
        }
    }

    /// Check whether this user is a candidate account.
    pub fn is_candidate(&self) -> bool {
        self.user_type == UserType::Candidato
    }

    /// Check whether this user is an institution account.
    pub fn is_institution(&self) -> bool {
        self.user_type == UserType::Instituicao
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 42,
            name: "Ana Souza".to_string(),
            email: "ana@example.com".to_string(),
            tipo_usuario: UserType::Candidato,
            password_hash: "$argon2id$test".to_string(),
        }
    }

    #[test]
    fn from_parts_uses_directory_discriminator() {
        let user = sample_user();
        let claims = Claims {
            sub: Some(42),
            // Stale discriminator in the token must not win.
            tipo_usuario: Some(UserType::Instituicao),
            exp: Some(1_700_003_600),
            ..Claims::default()
        };

        let authed = AuthenticatedUser::from_parts(&user, &claims);
        assert_eq!(authed.user_id, 42);
        assert_eq!(authed.user_type, UserType::Candidato);
        assert!(authed.is_candidate());
        assert!(!authed.is_institution());
        assert_eq!(authed.expires_at, Some(1_700_003_600));
    }

    #[test]
    fn unknown_claims_land_in_extra() {
        let json = r#"{"sub":7,"tipo_usuario":"CANDIDATO","escopo":"leitura"}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, Some(7));
        assert_eq!(claims.extra["escopo"], "leitura");
    }

    #[test]
    fn absent_claims_are_not_serialized() {
        let claims = Claims {
            sub: Some(1),
            ..Claims::default()
        };
        let json = serde_json::to_string(&claims).unwrap();
        assert_eq!(json, r#"{"sub":1}"#);
    }
}
