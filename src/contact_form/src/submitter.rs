use crate::form::ContactForm;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    #[error("The contact endpoint answered {status}")]
    Rejected { status: u16, reason: Option<String> },
    #[error("Failed to reach the contact endpoint")]
    Network(#[from] reqwest::Error),
}

impl SubmissionError {
    /// The reason supplied by the endpoint, if it sent one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            SubmissionError::Rejected { reason, .. } => reason.as_deref(),
            SubmissionError::Network(_) => None,
        }
    }
}

/// Delivers a filled-in form to wherever submissions are handled.
#[async_trait]
pub trait SubmitContact: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<(), SubmissionError>;
}

#[async_trait]
impl<T: SubmitContact + ?Sized> SubmitContact for std::sync::Arc<T> {
    async fn submit(&self, form: &ContactForm) -> Result<(), SubmissionError> {
        (**self).submit(form).await
    }
}

/// Posts the form as JSON to `{base_url}/api/contact`.
#[derive(Clone)]
pub struct HttpContactSubmitter {
    http_client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpContactSubmitter {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SubmitContact for HttpContactSubmitter {
    #[tracing::instrument(name = "Posting the contact form", skip(self, form), fields(endpoint = %self.endpoint))]
    async fn submit(&self, form: &ContactForm) -> Result<(), SubmissionError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reason = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);

        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}
