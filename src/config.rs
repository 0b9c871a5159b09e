// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and is
//! immutable thereafter. The signing secret is mandatory: without it the
//! process refuses to start rather than fall back to an unsigned or
//! default-keyed mode.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC signing secret for bearer tokens | Required |
//! | `JWT_ISSUER` | `iss` claim stamped into and required of tokens | Optional |
//! | `JWT_AUDIENCE` | `aud` claim stamped into and required of tokens | Optional |
//! | `JWT_TTL_SECS` | Default token lifetime in seconds | `86400` |
//! | `SEED_DEMO_DATA` | Seed a demo candidate and institution when set | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the mandatory HMAC signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the optional expected issuer.
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";

/// Environment variable name for the optional expected audience.
pub const JWT_AUDIENCE_ENV: &str = "JWT_AUDIENCE";

/// Environment variable name for the default token lifetime override.
pub const JWT_TTL_ENV: &str = "JWT_TTL_SECS";

/// Default token lifetime when neither the environment nor the caller
/// overrides it: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Fatal configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The signing secret is unset or empty. Never downgraded to a
    /// per-request failure.
    #[error("JWT_SECRET is not set; refusing to start without a signing secret")]
    MissingSecret,
    /// The TTL override is not a parseable number of seconds.
    #[error("JWT_TTL_SECS is not a valid number of seconds: {0}")]
    InvalidTtl(String),
}

/// Immutable token-engine configuration, injected into the
/// [`TokenService`](crate::auth::TokenService) at construction.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: Vec<u8>,
    /// Expected `iss` claim; stamped at issuance and required at
    /// verification when present.
    pub issuer: Option<String>,
    /// Expected `aud` claim; same contract as `issuer`.
    pub audience: Option<String>,
    /// Token lifetime used when the caller does not pass one explicitly.
    pub default_ttl_secs: i64,
}

impl AuthConfig {
    /// Create a configuration around a signing secret.
    ///
    /// This is the single place the "fatal if missing" invariant lives: an
    /// empty secret is rejected here, so every constructed `AuthConfig` is
    /// known-good for signing.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self {
            secret,
            issuer: None,
            audience: None,
            default_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        })
    }

    /// Set the expected issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the expected audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Override the default token lifetime.
    pub fn with_default_ttl(mut self, ttl_secs: i64) -> Self {
        self.default_ttl_secs = ttl_secs;
        self
    }

    /// The raw signing secret. Guaranteed non-empty.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Load the configuration from the environment.
    ///
    /// Returns [`ConfigError::MissingSecret`] when `JWT_SECRET` is unset or
    /// empty; callers treat that as a startup abort.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var(JWT_SECRET_ENV).unwrap_or_default();
        let mut config = Self::new(secret)?;

        if let Ok(issuer) = env::var(JWT_ISSUER_ENV) {
            if !issuer.is_empty() {
                config = config.with_issuer(issuer);
            }
        }
        if let Ok(audience) = env::var(JWT_AUDIENCE_ENV) {
            if !audience.is_empty() {
                config = config.with_audience(audience);
            }
        }
        if let Ok(ttl) = env::var(JWT_TTL_ENV) {
            let ttl_secs: i64 = ttl.parse().map_err(|_| ConfigError::InvalidTtl(ttl))?;
            config = config.with_default_ttl(ttl_secs);
        }

        Ok(config)
    }
}
