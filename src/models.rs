// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Users**: platform accounts, discriminated into candidates and
//!   institutions
//! - **Job Postings**: support roles published by institutions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::UserType;

// =============================================================================
// User Models
// =============================================================================

/// A platform account in the user directory.
///
/// The password hash never leaves the server: it is skipped on
/// serialization and is only consulted by the login handler.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct User {
    /// Unique identifier; the `sub` claim of issued tokens.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login email, unique within the directory.
    pub email: String,
    /// Account-type discriminator (canonical UPPERCASE).
    pub tipo_usuario: UserType,
    /// Argon2 PHC string; never serialized.
    #[serde(skip)]
    pub password_hash: String,
}

/// Request to register a new account.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Account type; accepted case-insensitively, stored canonical.
    pub tipo_usuario: String,
}

/// Request to authenticate with email and password.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

// =============================================================================
// Job Posting Models
// =============================================================================

/// A support role published by an institution.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct JobPosting {
    /// Unique identifier for this posting.
    pub id: String,
    /// The institution account that published it.
    pub institution_id: u64,
    /// Role title.
    pub title: String,
    /// Role description.
    pub description: String,
    /// City or "remoto".
    pub location: String,
    /// Accessibility accommodations offered for this role.
    pub accessibility_features: Vec<String>,
}

/// Request to publish a new job posting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateJobRequest {
    /// Role title.
    pub title: String,
    /// Role description.
    pub description: String,
    /// City or "remoto".
    pub location: String,
    /// Accessibility accommodations offered for this role.
    #[serde(default)]
    pub accessibility_features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            name: "Casa Verde".to_string(),
            email: "rh@casaverde.org".to_string(),
            tipo_usuario: UserType::Instituicao,
            password_hash: "$argon2id$secret".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains(r#""tipo_usuario":"INSTITUICAO""#));
    }

    #[test]
    fn create_job_request_defaults_accessibility_features() {
        let json = r#"{"title":"Apoio escolar","description":"...","location":"remoto"}"#;
        let request: CreateJobRequest = serde_json::from_str(json).unwrap();
        assert!(request.accessibility_features.is_empty());
    }
}
