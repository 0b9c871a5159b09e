// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Vagas Inclusivas

mod api;
mod auth;
mod config;
mod error;
mod models;
mod state;
mod store;

#[cfg(not(test))]
use std::{env, net::SocketAddr};

#[cfg(not(test))]
use api::router;
#[cfg(not(test))]
use auth::{TokenService, UserType};
#[cfg(not(test))]
use config::AuthConfig;
#[cfg(not(test))]
use state::AppState;
#[cfg(not(test))]
use store::InMemoryStore;
#[cfg(not(test))]
use tracing_subscriber::EnvFilter;

#[cfg(not(test))]
#[tokio::main]
async fn main() {
    init_tracing();

    // A missing signing secret aborts startup. There is no unsigned mode.
    let auth_config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let mut store = InMemoryStore::new();
    if env::var("SEED_DEMO_DATA").is_ok() {
        seed_demo_data(&mut store);
    }

    let state = AppState::new(store, TokenService::new(auth_config));
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Vagas Inclusivas API listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

#[cfg(not(test))]
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(not(test))]
fn seed_demo_data(store: &mut InMemoryStore) {
    // Demo accounts for local development only; both log in with "demo1234".
    let hash = auth::password::hash("demo1234").expect("Failed to hash demo password");
    let results = [
        store.insert_user(
            "Ana Souza",
            "candidato@demo.local",
            UserType::Candidato,
            hash.clone(),
        ),
        store.insert_user(
            "Instituto Casa Verde",
            "instituicao@demo.local",
            UserType::Instituicao,
            hash,
        ),
    ];
    for result in results {
        match result {
            Ok(user) => tracing::info!(user_id = user.id, email = %user.email, "seeded demo user"),
            Err(e) => tracing::warn!(error = %e.message, "failed to seed demo user"),
        }
    }
}

#[cfg(not(test))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
