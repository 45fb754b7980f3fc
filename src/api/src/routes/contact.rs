use crate::domain::{
    ContactFormData, ContactNotification, ContactSubmission, EmailClient, EmailClientError,
    EmailMessage, ValidationError,
};
use crate::startup::ContactInbox;
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Serialize;

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to send email")]
    DeliveryError(#[source] EmailClientError),
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ContactResponse {
    message: &'static str,
    id: String,
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::DeliveryError(_) | ContactError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Only the top-level message leaves the process; causes stay in the logs.
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(body, email_client, inbox),
    fields(
        sender_email = tracing::field::Empty,
        sender_name = tracing::field::Empty
    )
)]
pub async fn submit_contact_form(
    body: web::Bytes,
    email_client: web::Data<dyn EmailClient>,
    inbox: web::Data<ContactInbox>,
) -> Result<HttpResponse, ContactError> {
    let form: ContactFormData =
        serde_json::from_slice(&body).context("Failed to decode the contact form payload")?;

    let submission: ContactSubmission = form.try_into()?;

    let span = tracing::Span::current();
    span.record("sender_email", tracing::field::display(&submission.email));
    span.record("sender_name", tracing::field::display(&submission.name));

    let notification = ContactNotification::render(&submission)
        .context("Failed to render the contact notification")?;

    let email = EmailMessage {
        to: inbox.0.clone(),
        reply_to: submission.email.as_ref().to_owned(),
        subject: notification.subject,
        html_content: notification.html_content,
        text_content: notification.text_content,
    };

    let delivery_id = email_client.send_email(&email).await.map_err(|e| {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            error.transient = e.is_transient(),
            "The email provider did not accept the contact notification",
        );
        ContactError::DeliveryError(e)
    })?;

    Ok(HttpResponse::Ok().json(ContactResponse {
        message: "Email sent successfully",
        id: delivery_id,
    }))
}
