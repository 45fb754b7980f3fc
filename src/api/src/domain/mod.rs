mod contact_notification;
mod contact_submission;
pub mod email_client;
mod sender_email;

pub use contact_notification::ContactNotification;
pub use contact_submission::{ContactFormData, ContactSubmission, ValidationError};
pub use email_client::{EmailClient, EmailClientError, EmailMessage};
pub use sender_email::SenderEmail;
