//! Route table

use super::{contact::handle_contact, health::handle_health};
use crate::AppState;
use axum::{
    routing::{any, get},
    Router,
};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handle_health))
        // Every method reaches the handler so it can answer 405 with its own body.
        .route("/api/contact", any(handle_contact))
}
