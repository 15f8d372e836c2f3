//! Request logging middleware configuration

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier},
    trace::{DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer},
};
use tracing::{field, info_span};

pub fn logging_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
    DefaultOnBodyChunk,
    DefaultOnEos,
    impl OnFailure<ServerErrorsFailureClass> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let origin = request
                .headers()
                .get(header::ORIGIN)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");

            // submission_id is recorded by the contact handler once a payload validates.
            info_span!(
                "contact_request",
                method = %request.method(),
                path = %request.uri().path(),
                origin,
                submission_id = field::Empty,
            )
        })
        .on_request(|request: &Request<Body>, _span: &tracing::Span| {
            tracing::debug!(
                content_length = request
                    .headers()
                    .get(header::CONTENT_LENGTH)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("0"),
                "contact request received"
            );
        })
        .on_response(|response: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            let status = response.status();
            let latency_ms = latency.as_millis();

            // 4xx is the submitter's input or method; only 5xx means mail or config trouble.
            if status.is_server_error() {
                tracing::error!(status = status.as_u16(), latency_ms, "contact request failed");
            } else if status.is_client_error() {
                tracing::info!(status = status.as_u16(), latency_ms, "contact request rejected");
            } else {
                tracing::info!(status = status.as_u16(), latency_ms, "contact request handled");
            }
        })
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                tracing::error!(latency_ms = latency.as_millis(), %error, "contact request errored");
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, routing::post, Router};
    use tower::ServiceExt;
    use tracing::Span;

    #[tokio::test]
    async fn test_request_span_exposes_submission_id() {
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry());

        let app = Router::new()
            .route(
                "/api/contact",
                post(|| async { Span::current().has_field("submission_id").to_string() }),
            )
            .layer(logging_layer());

        let request = Request::post("/api/contact")
            .header(header::ORIGIN, "https://portfolio.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        assert_eq!(&bytes[..], b"true");
    }
}
