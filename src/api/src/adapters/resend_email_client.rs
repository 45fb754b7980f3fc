use crate::domain::{EmailClient, EmailClientError, EmailMessage};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delivers email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendEmailClient {
    http_client: Client,
    base_url: String,
    sender: String,
    authorization_token: Secret<String>,
}

impl ResendEmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    reply_to: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize, Default)]
struct ResendErrorBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

#[async_trait]
impl EmailClient for ResendEmailClient {
    #[tracing::instrument(
        name = "Sending an email through Resend",
        skip(self, email),
        fields(recipient = %email.to, reply_to = %email.reply_to)
    )]
    async fn send_email(&self, email: &EmailMessage) -> Result<String, EmailClientError> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: [email.to.as_str()],
            subject: &email.subject,
            html: &email.html_content,
            text: &email.text_content,
            reply_to: &email.reply_to,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<ResendErrorBody>()
                .await
                .unwrap_or_default();

            return Err(EmailClientError::Rejected {
                status: status.as_u16(),
                name: body.name,
                message: body.message,
            });
        }

        let body: SendEmailResponse = response.json().await?;
        tracing::info!(delivery_id = %body.id, "Email accepted by the provider");

        Ok(body.id)
    }
}
