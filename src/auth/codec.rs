// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! URL-safe base64 codec for token segments.
//!
//! Tokens are three dot-joined segments, each encoded as unpadded base64url
//! (`+` → `-`, `/` → `_`, trailing `=` stripped). Decoding is strict: any
//! character outside the base64url alphabet, any padding character, and any
//! non-canonical trailing bits are rejected.

use base64ct::{Base64UrlUnpadded, Encoding};

/// A segment could not be decoded as unpadded base64url.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("segment is not valid unpadded base64url")]
pub struct DecodeError;

/// Encode raw bytes as an unpadded base64url segment.
///
/// Total: every byte string has exactly one encoding.
pub fn encode_segment(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode an unpadded base64url segment back to raw bytes.
///
/// Callers must treat a [`DecodeError`] as "token malformed", never as a
/// crash condition.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, DecodeError> {
    Base64UrlUnpadded::decode_vec(segment).map_err(|_| DecodeError)
}
