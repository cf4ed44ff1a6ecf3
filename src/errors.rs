use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use crate::wizard::steps::StepId;

/// Contract violations and I/O failures raised by the wizard.
///
/// Field-level validation failures are not represented here; they are
/// returned as data through [`crate::wizard::StepOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Step {requested} is not active (current step is {active})")]
    StepNotActive { requested: StepId, active: StepId },
    #[error("Input does not belong to step {step}")]
    InputMismatch { step: StepId },
    #[error("Wizard already finished")]
    AlreadyFinished,
    #[error("Wizard not finished yet")]
    NotFinished,
    #[error("Index {index} out of range for {len} linked accounts")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Linked account not found: {0}")]
    EntryNotFound(Uuid),
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),
    #[error("Select a platform first")]
    NoPlatformSelected,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Aggregate incomplete: {0} missing")]
    IncompleteAggregate(&'static str),
    #[error("Submission failed: {0}")]
    Submission(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, WizardError>;

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        WizardError::Storage(err.to_string())
    }
}

impl From<crate::services::SubmissionError> for WizardError {
    fn from(err: crate::services::SubmissionError) -> Self {
        WizardError::Submission(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        WizardError::Storage(err.to_string())
    }
}
