use crate::domain::sender_email::SenderEmail;
use serde::Deserialize;

/// Raw contact form payload. Fields stay optional so that absent values
/// surface as validation failures rather than decoding errors.
#[derive(Deserialize, Debug, Default)]
pub struct ContactFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingRequiredFields,
    #[error("Invalid email format")]
    InvalidEmailFormat,
}

#[derive(Debug)]
pub struct ContactSubmission {
    pub name: String,
    pub email: SenderEmail,
    pub company: Option<String>,
    pub message: String,
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        let (name, email, message) = match (
            non_empty(value.name),
            non_empty(value.email),
            non_empty(value.message),
        ) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            _ => return Err(ValidationError::MissingRequiredFields),
        };

        let email = SenderEmail::parse(email).map_err(|e| {
            tracing::debug!(error.message = %e, "Rejecting contact form submission");
            ValidationError::InvalidEmailFormat
        })?;

        Ok(Self {
            name,
            email,
            company: non_empty(value.company),
            message,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
