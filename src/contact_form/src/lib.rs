//! Client-side state for the contact form: field values, the submission
//! lifecycle and the request that hands a form to the contact endpoint.

mod controller;
mod form;
mod status;
mod submitter;

pub use controller::{FormController, SubmitOutcome, FAILURE_MESSAGE, RESET_DELAY, SUCCESS_MESSAGE};
pub use form::{ContactForm, Field, UnknownField};
pub use status::FormStatus;
pub use submitter::{HttpContactSubmitter, SubmissionError, SubmitContact};
