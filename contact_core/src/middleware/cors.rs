//! CORS (Cross-Origin Resource Sharing) middleware configuration

use crate::config::CorsConfig;
use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub fn cors_layer(allowed_origin: &str) -> Option<CorsLayer> {
    let origin: HeaderValue = allowed_origin.trim_end_matches('/').parse().ok()?;

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([
                HeaderName::from_static("content-type"),
                HeaderName::from_static("accept"),
            ])
            .max_age(Duration::from_secs(3600)),
    )
}

pub fn cors_layer_permissive() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// The configured origin, or the permissive policy when none is set or it does not parse.
pub fn cors_layer_from_config(config: &CorsConfig) -> CorsLayer {
    match config.allowed_origin.as_deref().map(str::trim) {
        Some(origin) if !origin.is_empty() => cors_layer(origin).unwrap_or_else(|| {
            tracing::warn!("Ignoring unparseable CORS origin {:?}", origin);
            cors_layer_permissive()
        }),
        _ => cors_layer_permissive(),
    }
}
