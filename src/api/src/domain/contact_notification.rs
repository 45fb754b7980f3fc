use crate::domain::contact_submission::ContactSubmission;
use askama::Template;

#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    company: Option<&'a str>,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    company: Option<&'a str>,
    message: &'a str,
}

/// The email sent to the agency inbox for one contact form submission.
pub struct ContactNotification {
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

impl ContactNotification {
    pub fn render(submission: &ContactSubmission) -> Result<Self, askama::Error> {
        let name = submission.name.as_str();
        let email = submission.email.as_ref();
        let company = submission.company.as_deref();
        let message = submission.message.as_str();

        let html_content = ContactNotificationHtml {
            name,
            email,
            company,
            message,
        }
        .render()?;

        let text_content = ContactNotificationText {
            name,
            email,
            company,
            message,
        }
        .render()?;

        Ok(Self {
            subject: format!("New Contact Form Submission from {}", name),
            html_content,
            text_content,
        })
    }
}
