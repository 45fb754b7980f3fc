use crate::utils::error_chain_fmt;
use async_trait::async_trait;

/// A fully rendered message ready to be handed to the email provider.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

#[derive(thiserror::Error)]
pub enum EmailClientError {
    #[error("The email provider rejected the message ({status} {name}): {message}")]
    Rejected {
        status: u16,
        name: String,
        message: String,
    },
    #[error("Failed to reach the email provider")]
    Transport(#[from] reqwest::Error),
}

impl EmailClientError {
    /// Whether the same message could plausibly succeed if sent again later.
    /// Only used to enrich logs; nothing is retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
        }
    }
}

impl std::fmt::Debug for EmailClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    /// Hands the message to the provider and returns its delivery identifier.
    async fn send_email(&self, email: &EmailMessage) -> Result<String, EmailClientError>;
}
