//! Health probe for the hosting runtime

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /health");

    Json(serde_json::json!({
        "success": true,
        "status": "healthy",
        "app": state.app_name,
        "version": state.version,
        "mail_configured": state.mail.is_configured(),
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}
