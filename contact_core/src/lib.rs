//! Core library for the portfolio contact service: configuration, validation,
//! mail delivery, the HTTP contact handler, and the client submission controller.

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod sanitize;
pub mod validation;

pub use client::{
    ClientError, ContactApi, ContactForm, FieldErrors, HttpContactApi, SubmissionController,
    SubmissionStatus,
};
pub use config::{AppConfig, CorsConfig, MailConfig, ServerConfig};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use mail::{MailError, MailTransport, OutgoingEmail, SmtpMailer};
pub use models::{ContactPayload, Field, FieldError, ServerResponse};
pub use validation::{ContactDraft, ContactSubmission};

use axum::Router;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub mail: Arc<MailConfig>,
    pub mailer: Arc<dyn MailTransport>,
}

impl AppState {
    pub fn new(mail: MailConfig, mailer: Arc<dyn MailTransport>) -> Self {
        Self {
            app_name: "Portfolio Contact Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mail: Arc::new(mail),
            mailer,
        }
    }

    /// State backed by the SMTP transport described in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let mailer = SmtpMailer::new(config.mail.clone());
        Self::new(config.mail.clone(), Arc::new(mailer))
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.mail.send_timeout_seconds)
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
