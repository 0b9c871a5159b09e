// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Authentication errors.
//!
//! Every per-request verification failure collapses to the same generic
//! HTTP 401 body. The precise reason is logged server-side only: exposing
//! which check failed (signature vs. expiry vs. issuer) would hand an
//! attacker a verification oracle.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication failure.
///
/// The variants mirror the verification steps so that logs can name the
/// exact unmet condition, even though the HTTP response never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Structural or encoding failure (segment count, base64url, JSON, typ)
    Malformed,
    /// Header `alg` is not the single pinned algorithm
    UnsupportedAlgorithm,
    /// Recomputed MAC does not match the signature segment
    BadSignature,
    /// `nbf` or `iat` lies beyond the clock-skew tolerance
    NotYetValid,
    /// `exp` lies in the past beyond the clock-skew tolerance
    Expired,
    /// `iss` does not equal the configured issuer
    IssuerMismatch,
    /// `aud` does not equal the configured audience
    AudienceMismatch,
    /// Verified claims carry no `sub`
    MissingSubject,
    /// `sub` resolved to no user-directory record
    UnknownSubject,
    /// Authenticated, but the account type is not allowed here
    InsufficientPermissions,
    /// Unexpected internal failure (serialization, MAC init)
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Stable identifier for this error, for structured logs only.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::Malformed => "malformed_token",
            AuthError::UnsupportedAlgorithm => "unsupported_algorithm",
            AuthError::BadSignature => "bad_signature",
            AuthError::NotYetValid => "token_not_yet_valid",
            AuthError::Expired => "token_expired",
            AuthError::IssuerMismatch => "issuer_mismatch",
            AuthError::AudienceMismatch => "audience_mismatch",
            AuthError::MissingSubject => "missing_subject",
            AuthError::UnknownSubject => "unknown_subject",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::Malformed => write!(f, "Token is malformed"),
            AuthError::UnsupportedAlgorithm => write!(f, "Token algorithm is not supported"),
            AuthError::BadSignature => write!(f, "Token signature is invalid"),
            AuthError::NotYetValid => write!(f, "Token is not yet valid"),
            AuthError::Expired => write!(f, "Token has expired"),
            AuthError::IssuerMismatch => write!(f, "Token issuer is invalid"),
            AuthError::AudienceMismatch => write!(f, "Token audience is invalid"),
            AuthError::MissingSubject => write!(f, "Token carries no subject"),
            AuthError::UnknownSubject => write!(f, "Token subject is unknown"),
            AuthError::InsufficientPermissions => {
                write!(f, "Insufficient permissions for this operation")
            }
            AuthError::Internal(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Reason stays in the logs; the wire sees only the status class.
        tracing::debug!(error_code = self.error_code(), reason = %self, "authentication failed");

        let body = match status {
            StatusCode::FORBIDDEN => AuthErrorBody { error: "Forbidden" },
            StatusCode::INTERNAL_SERVER_ERROR => AuthErrorBody {
                error: "Internal server error",
            },
            _ => AuthErrorBody {
                error: "Unauthorized",
            },
        };

        (status, Json(body)).into_response()
    }
}
