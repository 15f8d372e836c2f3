mod common;

use common::{mail_config, state_with, FakeMailer};
use contact_core::{
    client::{controller::NETWORK_ERROR_MESSAGE, SubmitOutcome},
    create_app, Field, HttpContactApi, MailConfig, MailError, SubmissionController,
    SubmissionStatus,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_server(mail: MailConfig, mailer: Arc<FakeMailer>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_app(state_with(mail, mailer));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn fill(controller: &mut SubmissionController<HttpContactApi>, name: &str, email: &str, message: &str) {
    controller.update_field(Field::Name, name);
    controller.update_field(Field::Email, email);
    controller.update_field(Field::Message, message);
}

#[tokio::test]
async fn test_submission_round_trip() {
    let mailer = FakeMailer::new();
    let addr = spawn_server(mail_config(), mailer.clone()).await;
    let api = HttpContactApi::from_base_url(&format!("http://{}", addr)).unwrap();
    let mut controller = SubmissionController::new(api);

    fill(&mut controller, "John Doe", "john@example.com", "Hello there from the test suite");
    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Completed(SubmissionStatus::Success));
    assert_eq!(
        controller.submit_message(),
        "Message sent successfully! I'll get back to you soon."
    );
    assert!(controller.form().name.is_empty());
    assert_eq!(mailer.attempts().len(), 2);
}

#[tokio::test]
async fn test_server_validation_surfaces_combined_message() {
    let mailer = FakeMailer::new();
    let addr = spawn_server(mail_config(), mailer.clone()).await;
    let api = HttpContactApi::from_base_url(&format!("http://{}", addr)).unwrap();
    let mut controller = SubmissionController::new(api);

    // Passes the looser client rules, fails the server's length bounds.
    fill(&mut controller, "J", "john@example.com", "Hi");
    controller.submit().await;

    assert_eq!(controller.status(), SubmissionStatus::Error);
    assert_eq!(
        controller.submit_message(),
        "Validation error: Name must be between 2 and 100 characters, Message must be between 10 and 1000 characters"
    );
    assert_eq!(controller.form().name, "J");
    assert!(mailer.attempts().is_empty());
}

#[tokio::test]
async fn test_server_failure_message_reaches_client() {
    let mailer = FakeMailer::scripted(vec![Err(MailError::Authentication("535".to_string()))]);
    let addr = spawn_server(mail_config(), mailer).await;
    let api = HttpContactApi::from_base_url(&format!("http://{}", addr)).unwrap();
    let mut controller = SubmissionController::new(api);

    fill(&mut controller, "John Doe", "john@example.com", "Hello there from the test suite");
    controller.submit().await;

    assert_eq!(controller.status(), SubmissionStatus::Error);
    assert_eq!(
        controller.submit_message(),
        "Email service is temporarily unavailable. Please try again later."
    );
}

#[tokio::test]
async fn test_unreachable_server_reports_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpContactApi::from_base_url(&format!("http://{}", addr)).unwrap();
    let mut controller = SubmissionController::new(api);

    fill(&mut controller, "John Doe", "john@example.com", "Hello there from the test suite");
    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Completed(SubmissionStatus::Error));
    assert_eq!(controller.submit_message(), NETWORK_ERROR_MESSAGE);
    assert!(!controller.is_submitting());
}
