// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Token issuance and verification.
//!
//! The wire format is the usual three-segment signed token:
//!
//! ```text
//! base64url(header JSON) . base64url(claims JSON) . base64url(HMAC-SHA256)
//! ```
//!
//! with the header pinned to `{"alg":"HS256","typ":"JWT"}`. The MAC is
//! computed over the two already-encoded segments joined by a dot, keyed by
//! the process-wide secret from [`AuthConfig`].
//!
//! Verification runs a fixed sequence of checks and short-circuits on the
//! first unmet condition. The signature is always checked before any claim
//! value is trusted; in particular a token that is both expired and forged
//! reports the forgery.
//!
//! The service is stateless apart from its immutable configuration and is
//! safe to share across request handlers without locking.

use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::claims::{Claims, RESERVED_CLAIMS};
use super::codec;
use super::error::AuthError;
use super::user_type::UserType;
use crate::config::AuthConfig;

type HmacSha256 = Hmac<Sha256>;

/// The single supported signing algorithm. Compared exact-string on
/// verification; `"none"`, other hashes, and case variants are all
/// rejected before the signature is even looked at.
pub const SUPPORTED_ALG: &str = "HS256";

/// The expected `typ` header value.
pub const TOKEN_TYPE: &str = "JWT";

/// Allowed clock drift between issuer and verifier, in both directions.
pub const CLOCK_SKEW_LEEWAY_SECS: i64 = 60;

/// Fixed margin subtracted from `exp` at issuance, so a token issued for
/// `ttl` seconds expires at `iat + ttl - 2`.
pub const ISSUANCE_MARGIN_SECS: i64 = 2;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    #[serde(default)]
    alg: String,
    #[serde(default)]
    typ: String,
}

/// Stateless issuer/verifier of signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    /// Create a service around an already-validated configuration.
    ///
    /// [`AuthConfig`] construction is the single place the non-empty-secret
    /// invariant is enforced, so no per-call secret check is needed here.
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The configured default token lifetime in seconds.
    pub fn default_ttl_secs(&self) -> i64 {
        self.config.default_ttl_secs
    }

    /// Issue a token with the configured default lifetime and no extra
    /// claims.
    pub fn issue_default(&self, subject_id: u64, user_type: UserType) -> Result<String, AuthError> {
        self.issue(
            subject_id,
            user_type,
            self.config.default_ttl_secs,
            serde_json::Map::new(),
        )
    }

    /// Issue a signed token for `subject_id`.
    ///
    /// The claim set is `sub`, `tipo_usuario`, `iat`, `nbf` (= `iat`),
    /// `exp` (= `iat + ttl_secs` minus the issuance margin), a fresh random
    /// `jti`, the configured `iss`/`aud` when present, and the caller's
    /// `extra_claims`. Reserved claim names always win: colliding entries
    /// in `extra_claims` are dropped, so a caller cannot extend its own
    /// expiry or reassign the subject.
    pub fn issue(
        &self,
        subject_id: u64,
        user_type: UserType,
        ttl_secs: i64,
        mut extra_claims: serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, AuthError> {
        let now = unix_now();

        for reserved in RESERVED_CLAIMS {
            if extra_claims.remove(reserved).is_some() {
                tracing::debug!(claim = reserved, "dropping reserved claim from extra_claims");
            }
        }

        let claims = Claims {
            sub: Some(subject_id),
            tipo_usuario: Some(user_type),
            iat: Some(now),
            nbf: Some(now),
            exp: Some(now + ttl_secs - ISSUANCE_MARGIN_SECS),
            jti: Some(fresh_jti()),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            extra: extra_claims,
        };

        let header = Header {
            alg: SUPPORTED_ALG.to_string(),
            typ: TOKEN_TYPE.to_string(),
        };

        let header_segment = codec::encode_segment(&to_json(&header)?);
        let claims_segment = codec::encode_segment(&to_json(&claims)?);
        let signing_input = format!("{header_segment}.{claims_segment}");
        let signature_segment = codec::encode_segment(&self.sign(signing_input.as_bytes())?);

        Ok(format!("{signing_input}.{signature_segment}"))
    }

    /// Verify a token and return its claim set.
    ///
    /// Checks, in order: segment count, segment decoding, structural
    /// decoding of header and claims, `alg` pinning, `typ`, signature
    /// (constant-time), `nbf`, `iat`, `exp` (each with the clock-skew
    /// leeway), then configured issuer and audience. Presence of `sub` is
    /// deliberately not enforced here; that boundary belongs to the
    /// request authenticator.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let segments: Vec<&str> = token.split('.').collect();
        let (header_segment, claims_segment, signature_segment) = match segments.as_slice() {
            [header, claims, signature] => (*header, *claims, *signature),
            _ => return Err(AuthError::Malformed),
        };

        let header_bytes = codec::decode_segment(header_segment).map_err(|_| AuthError::Malformed)?;
        let claims_bytes = codec::decode_segment(claims_segment).map_err(|_| AuthError::Malformed)?;
        let signature = codec::decode_segment(signature_segment).map_err(|_| AuthError::Malformed)?;

        let header: Header =
            serde_json::from_slice(&header_bytes).map_err(|_| AuthError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&claims_bytes).map_err(|_| AuthError::Malformed)?;

        if header.alg != SUPPORTED_ALG {
            return Err(AuthError::UnsupportedAlgorithm);
        }
        if header.typ != TOKEN_TYPE {
            return Err(AuthError::Malformed);
        }

        let signing_input = format!("{header_segment}.{claims_segment}");
        let mut mac = HmacSha256::new_from_slice(self.config.secret())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        // Mac::verify_slice is a constant-time comparison.
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let now = unix_now();
        if let Some(nbf) = claims.nbf {
            if now + CLOCK_SKEW_LEEWAY_SECS < nbf {
                return Err(AuthError::NotYetValid);
            }
        }
        if let Some(iat) = claims.iat {
            // A forged future-dated iat is as suspect as a future nbf.
            if now + CLOCK_SKEW_LEEWAY_SECS < iat {
                return Err(AuthError::NotYetValid);
            }
        }
        if let Some(exp) = claims.exp {
            if now - CLOCK_SKEW_LEEWAY_SECS >= exp {
                return Err(AuthError::Expired);
            }
        }

        if let Some(ref issuer) = self.config.issuer {
            if claims.iss.as_deref() != Some(issuer.as_str()) {
                return Err(AuthError::IssuerMismatch);
            }
        }
        if let Some(ref audience) = self.config.audience {
            if claims.aud.as_deref() != Some(audience.as_str()) {
                return Err(AuthError::AudienceMismatch);
            }
        }

        Ok(claims)
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>, AuthError> {
        let mut mac = HmacSha256::new_from_slice(self.config.secret())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        mac.update(signing_input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// 128 bits from the OS CSPRNG, base64url-encoded.
fn fresh_jti() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    codec::encode_segment(&bytes)
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, AuthError> {
    serde_json::to_vec(value).map_err(|e| AuthError::Internal(e.to_string()))
}
