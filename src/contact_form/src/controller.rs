use crate::form::{ContactForm, Field};
use crate::status::FormStatus;
use crate::submitter::SubmitContact;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a success or failure message stays up before the form goes idle.
pub const RESET_DELAY: Duration = Duration::from_secs(5);

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent. We'll get back to you within 24 hours.";

pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing was sent.
    Ignored,
    /// Required fields are empty; nothing was sent.
    Incomplete(Vec<Field>),
    /// The request finished and the form reached this terminal status.
    Completed(FormStatus),
}

/// Owns the form state and the lifecycle of a single contact form.
///
/// The status reset timer belongs to the controller: it is aborted when a new
/// submission starts and when the controller is dropped, so no update lands
/// after the form is gone.
pub struct FormController<S> {
    form: watch::Sender<ContactForm>,
    status: Arc<watch::Sender<FormStatus>>,
    submitter: S,
    reset_delay: Duration,
    reset_task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: SubmitContact> FormController<S> {
    pub fn new(submitter: S) -> Self {
        Self::with_reset_delay(submitter, RESET_DELAY)
    }

    pub fn with_reset_delay(submitter: S, reset_delay: Duration) -> Self {
        let (form, _) = watch::channel(ContactForm::default());
        let (status, _) = watch::channel(FormStatus::Idle);

        Self {
            form,
            status: Arc::new(status),
            submitter,
            reset_delay,
            reset_task: Mutex::new(None),
        }
    }

    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.form.send_modify(|form| form.set(field, value));
    }

    pub fn form(&self) -> ContactForm {
        self.form.borrow().clone()
    }

    pub fn status(&self) -> FormStatus {
        self.status.borrow().clone()
    }

    /// Observe every status transition.
    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if *self.status.borrow() == FormStatus::Sending {
            return SubmitOutcome::Ignored;
        }

        let form = self.form();
        let missing = form.missing_required();
        if !missing.is_empty() {
            return SubmitOutcome::Incomplete(missing);
        }

        let started = self.status.send_if_modified(|status| {
            if *status == FormStatus::Sending {
                false
            } else {
                *status = FormStatus::Sending;
                true
            }
        });
        if !started {
            return SubmitOutcome::Ignored;
        }
        self.cancel_reset();

        let status = match self.submitter.submit(&form).await {
            Ok(()) => {
                tracing::info!("Contact form submitted");
                self.form.send_replace(ContactForm::default());
                FormStatus::Succeeded(SUCCESS_MESSAGE.to_string())
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "Contact form submission failed");
                let message = e.reason().unwrap_or(FAILURE_MESSAGE).to_string();
                FormStatus::Failed(message)
            }
        };

        self.status.send_replace(status.clone());
        self.schedule_reset();

        SubmitOutcome::Completed(status)
    }

    fn schedule_reset(&self) {
        let status = Arc::clone(&self.status);
        let delay = self.reset_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.send_replace(FormStatus::Idle);
        });

        let previous = self
            .reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_reset(&self) {
        let pending = self
            .reset_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.abort();
        }
    }
}

impl<S> Drop for FormController<S> {
    fn drop(&mut self) {
        let pending = self
            .reset_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = pending {
            pending.abort();
        }
    }
}
