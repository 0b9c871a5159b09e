// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! Account-type discriminator.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account type of a platform user.
///
/// The discriminator travels inside the token as the `tipo_usuario` claim
/// and gates access to type-specific resources:
///
/// - `Candidato` - a candidate looking for a support role
/// - `Instituicao` - an institution publishing job postings
///
/// The canonical wire form is UPPERCASE (`"CANDIDATO"` / `"INSTITUICAO"`).
/// Parsing is case-insensitive so that legacy mixed-case records normalize
/// to the canonical form instead of failing comparisons downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    /// Candidate account (applies to and saves job postings)
    Candidato,
    /// Institution account (creates and manages job postings)
    Instituicao,
}

impl UserType {
    /// Parse a discriminator from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<UserType> {
        match s.to_uppercase().as_str() {
            "CANDIDATO" => Some(UserType::Candidato),
            "INSTITUICAO" => Some(UserType::Instituicao),
            _ => None,
        }
    }

    /// Canonical wire form of the discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Candidato => "CANDIDATO",
            UserType::Instituicao => "INSTITUICAO",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(UserType::from_str("CANDIDATO"), Some(UserType::Candidato));
        assert_eq!(UserType::from_str("candidato"), Some(UserType::Candidato));
        assert_eq!(UserType::from_str("Instituicao"), Some(UserType::Instituicao));
        assert_eq!(UserType::from_str("unknown"), None);
    }

    #[test]
    fn serializes_to_canonical_uppercase() {
        assert_eq!(
            serde_json::to_string(&UserType::Candidato).unwrap(),
            r#""CANDIDATO""#
        );
        assert_eq!(
            serde_json::to_string(&UserType::Instituicao).unwrap(),
            r#""INSTITUICAO""#
        );
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(UserType::Candidato.to_string(), "CANDIDATO");
        assert_eq!(UserType::Instituicao.to_string(), "INSTITUICAO");
    }
}
