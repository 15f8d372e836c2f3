use super::{EmailAddress, OutgoingEmail};
use crate::sanitize::{escape_html, html_paragraph};
use crate::validation::ContactSubmission;
use chrono::{DateTime, Utc};

fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// The message to the site owner. Replies go straight to the submitter.
pub fn notification_email(
    submission: &ContactSubmission,
    recipient: &str,
    received_at: DateTime<Utc>,
) -> OutgoingEmail {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let received = received_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let text_body = format!(
        "New contact form submission\n\nName: {}\nEmail: {}\nReceived: {}\n\nMessage:\n{}\n",
        submission.name, submission.email, received, submission.message
    );

    let html_body = format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">",
            "<h2>New Contact Form Submission</h2>",
            "<p><strong>Name:</strong> {name}</p>",
            "<p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>",
            "<p><strong>Received:</strong> {received}</p>",
            "<h3>Message</h3>",
            "<p style=\"white-space: normal;\">{message}</p>",
            "</div>"
        ),
        name = name,
        email = email,
        received = received,
        message = html_paragraph(&submission.message),
    );

    OutgoingEmail {
        to: EmailAddress::new(recipient),
        reply_to: Some(EmailAddress::named(
            single_line(&submission.name),
            submission.email.clone(),
        )),
        subject: format!(
            "New contact form submission from {}",
            single_line(&submission.name)
        ),
        text_body,
        html_body,
    }
}

/// Confirmation sent back to the submitter.
pub fn auto_reply_email(submission: &ContactSubmission) -> OutgoingEmail {
    let text_body = format!(
        "Hi {},\n\nThank you for reaching out! I have received your message and will get back to you as soon as possible.\n\nYour message:\n{}\n\nBest regards\n",
        submission.name, submission.message
    );

    let html_body = format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px;\">",
            "<h2>Thank you for contacting me!</h2>",
            "<p>Hi {name},</p>",
            "<p>I have received your message and will get back to you as soon as possible.</p>",
            "<blockquote>{message}</blockquote>",
            "<p>Best regards</p>",
            "</div>"
        ),
        name = escape_html(&submission.name),
        message = html_paragraph(&submission.message),
    );

    OutgoingEmail {
        to: EmailAddress::named(single_line(&submission.name), submission.email.clone()),
        reply_to: None,
        subject: "Thank you for contacting me".to_string(),
        text_body,
        html_body,
    }
}
