//! MediReminder REST service
//!
//! Architecture:
//! - domain: entity contract, errors, dose-window rule
//! - repository: storage traits + in-memory implementation
//! - commands: axum handlers
//!
//! Medications and the global history log live in memory and are lost on
//! restart.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
mod commands;

use config::Config;
use domain::DoseRule;
use repository::{InMemoryMedicationRepository, MedicationRepository};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn MedicationRepository>,
    pub dose_rule: Option<DoseRule>,
}

impl AppState {
    pub fn new(repo: Arc<dyn MedicationRepository>, dose_rule: Option<DoseRule>) -> Self {
        Self { repo, dose_rule }
    }

    pub fn in_memory(dose_rule: Option<DoseRule>) -> Self {
        Self::new(Arc::new(InMemoryMedicationRepository::new()), dose_rule)
    }
}

/// Build the `/api` router with CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/medications",
            get(commands::list_medications).post(commands::create_medication),
        )
        .route(
            "/medications/{id}",
            get(commands::get_medication)
                .put(commands::update_medication)
                .delete(commands::delete_medication),
        )
        .route("/medications/{id}/taken", post(commands::mark_taken))
        .route("/medications/{id}/snooze", post(commands::snooze))
        .route("/medications/{id}/skip", post(commands::skip))
        .route(
            "/history",
            get(commands::list_history).delete(commands::clear_history),
        );

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM
pub async fn run(config: Config) -> anyhow::Result<()> {
    let dose_rule = config.dose_rule();
    match config.dose_window_minutes {
        Some(minutes) => info!("Dose-window rule enabled: {} minutes", minutes),
        None => info!("Dose-window rule disabled"),
    }

    let app = build_router(AppState::in_memory(dose_rule));

    let address = config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
