// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the Vagas Inclusivas API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in with email and password (`POST /v1/auth/login`)
//! 2. Server issues an HMAC-SHA256-signed three-segment token carrying
//!    `sub`, `tipo_usuario`, and a validity window
//! 3. Client sends `Authorization: Bearer <token>` on every request
//! 4. Server:
//!    - verifies structure, pinned algorithm, signature, and time claims
//!    - resolves `sub` against the user directory (fresh lookup per request)
//!    - gates type-specific routes on the resolved discriminator
//!
//! ## Security
//!
//! - The signing secret is mandatory at startup; there is no unsigned mode
//! - `alg` is pinned to HS256 exact-string, defeating `"alg":"none"`
//! - Signature comparison is constant-time, before any claim is trusted
//! - Clock skew tolerance is 60 seconds
//! - Every failure is a generic 401; the reason is only logged server-side
//! - No revocation store: tokens are bearer-valid until `exp`, logout is
//!   client-side token discard

pub mod claims;
pub mod codec;
pub mod error;
pub mod extractor;
pub mod password;
pub mod token;
pub mod user_type;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::{Auth, CandidateOnly, InstitutionOnly};
pub use token::TokenService;
pub use user_type::UserType;
