/// What the form currently shows to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Succeeded(String),
    Failed(String),
}

impl FormStatus {
    /// Terminal states fall back to `Idle` after the reset delay.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FormStatus::Succeeded(_) | FormStatus::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormStatus::Succeeded(message) | FormStatus::Failed(message) => Some(message),
            FormStatus::Idle | FormStatus::Sending => None,
        }
    }
}
