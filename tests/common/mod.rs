#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use once_cell::sync::Lazy;
use setup_wizard::{
    schema::{RawInput, StepInput},
    services::{SubmissionError, Submitter},
    wizard::FinishedAggregate,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn raw(pairs: &[(&str, &str)]) -> RawInput {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn business_raw() -> RawInput {
    raw(&[
        ("business_name", "Acme Ltd"),
        ("company_number", "12345678"),
        ("state", "CA"),
        ("city", "LA"),
        ("post_code", "90001"),
    ])
}

pub fn business_input() -> StepInput {
    StepInput::BusinessInfo(business_raw())
}

pub fn contact_input() -> StepInput {
    StepInput::ContactDetails(raw(&[
        ("contact_name", "Jo Bloggs"),
        ("email", "jo@acme.co.uk"),
        ("phone", "07123 456789"),
    ]))
}

pub const VALID_ANSWERS: &str = r#"{
    "business_info": {
        "business_name": "Acme Ltd",
        "company_number": "12345678",
        "state": "CA",
        "city": "LA",
        "post_code": "90001"
    },
    "contact_details": {
        "contact_name": "Jo Bloggs",
        "email": "jo@acme.co.uk",
        "phone": "07123 456789"
    },
    "link_accounts": [
        { "platform": "Facebook", "url": "https://fb.com/acme" }
    ]
}"#;

/// Keeps every submitted aggregate for later inspection.
#[derive(Clone, Default)]
pub struct RecordingSubmitter {
    pub received: Arc<Mutex<Vec<FinishedAggregate>>>,
}

impl Submitter for RecordingSubmitter {
    fn submit(&mut self, aggregate: &FinishedAggregate) -> Result<(), SubmissionError> {
        self.received
            .lock()
            .expect("lock received aggregates")
            .push(aggregate.clone());
        Ok(())
    }
}

pub struct FailingSubmitter;

impl Submitter for FailingSubmitter {
    fn submit(&mut self, _aggregate: &FinishedAggregate) -> Result<(), SubmissionError> {
        Err(SubmissionError::Rejected("endpoint unavailable".into()))
    }
}

/// Submits valid business and contact details, leaving the wizard on the
/// link-accounts step.
pub fn advance(wizard: &mut setup_wizard::wizard::WizardController) {
    use setup_wizard::wizard::StepId;
    wizard
        .submit_step(StepId::BusinessInfo, business_input())
        .expect("business info accepted");
    wizard
        .submit_step(StepId::ContactDetails, contact_input())
        .expect("contact details accepted");
}
