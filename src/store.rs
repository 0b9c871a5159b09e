// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

//! In-memory user directory and job board.
//!
//! This is the "user directory" collaborator of the authentication engine:
//! the request authenticator resolves every verified `sub` claim here with
//! a fresh lookup per request. Emails are normalized to lowercase so that
//! login and uniqueness checks are case-insensitive.

use std::collections::HashMap;

use uuid::Uuid;

use crate::auth::UserType;
use crate::error::ApiError;
use crate::models::{CreateJobRequest, JobPosting, User};

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<u64, User>,
    next_user_id: u64,
    jobs: HashMap<String, JobPosting>,
    // candidate id -> saved job ids, insertion order preserved
    saved_jobs: HashMap<u64, Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user, assigning the next id.
    ///
    /// Fails with 409 when the email is already registered.
    pub fn insert_user(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        tipo_usuario: UserType,
        password_hash: impl Into<String>,
    ) -> Result<User, ApiError> {
        let email = email.into().to_lowercase();
        if self.users.values().any(|user| user.email == email) {
            return Err(ApiError::conflict("Email is already registered"));
        }

        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            name: name.into(),
            email,
            tipo_usuario,
            password_hash: password_hash.into(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Look up a user by id (the `findById` boundary of the authenticator).
    pub fn user_by_id(&self, id: u64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    /// Look up a user by email, case-insensitively.
    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let email = email.to_lowercase();
        self.users.values().find(|user| user.email == email).cloned()
    }

    /// Publish a job posting on behalf of an institution.
    pub fn create_job(&mut self, institution_id: u64, request: CreateJobRequest) -> JobPosting {
        let id = Uuid::new_v4().to_string();
        let job = JobPosting {
            id: id.clone(),
            institution_id,
            title: request.title,
            description: request.description,
            location: request.location,
            accessibility_features: request.accessibility_features,
        };
        self.jobs.insert(id, job.clone());
        job
    }

    pub fn list_jobs(&self) -> Vec<JobPosting> {
        self.jobs.values().cloned().collect()
    }

    /// Save a job posting to a candidate's list.
    pub fn save_job(&mut self, candidate_id: u64, job_id: &str) -> Result<(), ApiError> {
        if !self.jobs.contains_key(job_id) {
            return Err(ApiError::not_found("Job posting not found"));
        }

        let saved = self.saved_jobs.entry(candidate_id).or_default();
        if saved.iter().any(|id| id == job_id) {
            return Err(ApiError::unprocessable("Job posting is already saved"));
        }
        saved.push(job_id.to_string());
        Ok(())
    }

    /// Jobs saved by a candidate, in the order they were saved.
    pub fn saved_jobs(&self, candidate_id: u64) -> Vec<JobPosting> {
        self.saved_jobs
            .get(&candidate_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.jobs.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_request(title: &str) -> CreateJobRequest {
        CreateJobRequest {
            title: title.to_string(),
            description: "Apoio em sala de aula".to_string(),
            location: "remoto".to_string(),
            accessibility_features: vec!["leitor de tela".to_string()],
        }
    }

    #[test]
    fn insert_user_assigns_sequential_ids() {
        let mut store = InMemoryStore::new();
        let first = store
            .insert_user("Ana", "ana@example.com", UserType::Candidato, "hash")
            .unwrap();
        let second = store
            .insert_user("Casa Verde", "rh@casaverde.org", UserType::Instituicao, "hash")
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn duplicate_email_conflicts_case_insensitively() {
        let mut store = InMemoryStore::new();
        store
            .insert_user("Ana", "ana@example.com", UserType::Candidato, "hash")
            .unwrap();
        let err = store
            .insert_user("Outra", "ANA@Example.com", UserType::Candidato, "hash")
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);
    }

    #[test]
    fn user_lookups_by_id_and_email() {
        let mut store = InMemoryStore::new();
        let ana = store
            .insert_user("Ana", "Ana@Example.com", UserType::Candidato, "hash")
            .unwrap();

        assert_eq!(store.user_by_id(ana.id), Some(ana.clone()));
        assert!(store.user_by_id(999).is_none());
        // Stored lowercase, looked up case-insensitively.
        assert_eq!(store.user_by_email("ana@example.COM"), Some(ana));
    }

    #[test]
    fn save_job_requires_existing_posting() {
        let mut store = InMemoryStore::new();
        let err = store.save_job(1, "missing").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn save_job_rejects_duplicates() {
        let mut store = InMemoryStore::new();
        let job = store.create_job(2, job_request("Apoio escolar"));

        store.save_job(1, &job.id).unwrap();
        let err = store.save_job(1, &job.id).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(store.saved_jobs(1), vec![job]);
        assert!(store.saved_jobs(99).is_empty());
    }

    #[test]
    fn list_jobs_returns_all_postings() {
        let mut store = InMemoryStore::new();
        store.create_job(2, job_request("Apoio escolar"));
        store.create_job(2, job_request("Intérprete de Libras"));
        assert_eq!(store.list_jobs().len(), 2);
    }
}
