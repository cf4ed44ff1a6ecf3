//! Wizard State controller.
//!
//! Owns the current step and the aggregate. Both change only through
//! [`WizardController::submit_step`] and [`WizardController::go_back`].
//! Validation failures come back as [`StepOutcome::Rejected`]; `Err` is
//! reserved for callers breaking the contract (wrong step, finished wizard).

use serde::Serialize;
use tracing::{debug, error, info};

use crate::errors::{Result, WizardError};
use crate::schema::{self, FieldErrors, RawInput, StepInput};
use crate::services::{LoggingSubmitter, Submitter};
use crate::wizard::aggregate::{FinishedAggregate, WizardAggregate};
use crate::wizard::finalize::Finalizer;
use crate::wizard::link_accounts::LinkAccountManager;
use crate::wizard::steps::{self, StepDescriptor, StepId};

/// Position and accumulated data of one wizard session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardState {
    current_step: StepId,
    aggregate: WizardAggregate,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: StepId::FIRST,
            aggregate: WizardAggregate::default(),
        }
    }
}

impl WizardState {
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    pub fn aggregate(&self) -> &WizardAggregate {
        &self.aggregate
    }

    /// A step counts as completed once the wizard has moved past it.
    pub fn is_completed(&self, step: StepId) -> bool {
        self.current_step > step
    }
}

/// Progress indicator entry for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    pub id: StepId,
    pub name: &'static str,
    pub completed: bool,
    pub active: bool,
}

/// Result of submitting the active step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Input accepted; the wizard moved on.
    Advanced { from: StepId, to: StepId },
    /// Input rejected; nothing changed.
    Rejected(FieldErrors),
    /// Last data step accepted and the aggregate finalised.
    Completed {
        aggregate: FinishedAggregate,
        delivered: bool,
    },
}

pub struct WizardController {
    state: WizardState,
    submitter: Box<dyn Submitter>,
    finished: Option<FinishedAggregate>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(Box::new(LoggingSubmitter))
    }
}

impl WizardController {
    pub fn new(submitter: Box<dyn Submitter>) -> Self {
        Self {
            state: WizardState::default(),
            submitter,
            finished: None,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> StepId {
        self.state.current_step
    }

    pub fn current_descriptor(&self) -> &'static StepDescriptor {
        steps::descriptor(self.state.current_step)
    }

    pub fn aggregate(&self) -> &WizardAggregate {
        &self.state.aggregate
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn finished(&self) -> Option<&FinishedAggregate> {
        self.finished.as_ref()
    }

    pub fn is_completed(&self, step: StepId) -> bool {
        self.state.is_completed(step)
    }

    pub fn progress(&self) -> Vec<StepStatus> {
        steps::steps()
            .iter()
            .map(|step| StepStatus {
                id: step.id,
                name: step.name,
                completed: self.state.is_completed(step.id),
                active: self.state.current_step == step.id,
            })
            .collect()
    }

    /// Form values to pre-populate `step` with; empty until it was accepted.
    pub fn defaults_for(&self, step: StepId) -> RawInput {
        let aggregate = &self.state.aggregate;
        match step {
            StepId::BusinessInfo => aggregate
                .business_info()
                .map(|record| record.to_raw())
                .unwrap_or_default(),
            StepId::ContactDetails => aggregate
                .contact_details()
                .map(|record| record.to_raw())
                .unwrap_or_default(),
            StepId::LinkAccounts | StepId::AccessPermissions => RawInput::new(),
        }
    }

    /// Editor for the link-accounts step, seeded with accepted entries.
    pub fn link_account_editor(&self) -> LinkAccountManager {
        LinkAccountManager::from_entries(
            self.state
                .aggregate
                .link_accounts()
                .map(<[_]>::to_vec)
                .unwrap_or_default(),
        )
    }

    /// Validates `input` for the active step. On success the record replaces
    /// the step's slot and the wizard advances; on failure nothing changes.
    pub fn submit_step(&mut self, step: StepId, input: StepInput) -> Result<StepOutcome> {
        if self.finished.is_some() {
            return Err(WizardError::AlreadyFinished);
        }
        let active = self.state.current_step;
        if step != active {
            return Err(WizardError::StepNotActive {
                requested: step,
                active,
            });
        }
        if input.step() != step {
            return Err(WizardError::InputMismatch { step });
        }

        let record = match schema::validate(&input) {
            Ok(record) => record,
            Err(errors) => {
                let fields: Vec<&str> = errors.fields().collect();
                debug!(step = step.number(), ?fields, "Step rejected");
                return Ok(StepOutcome::Rejected(errors));
            }
        };

        let mut aggregate = self.state.aggregate.clone();
        aggregate.merge(record);
        let next = step.next();

        if steps::descriptor(next).is_terminal() {
            let finished = Finalizer::finalize(&aggregate)?;
            self.state.aggregate = aggregate;
            self.state.current_step = next;
            self.finished = Some(finished.clone());
            info!(step = step.number(), "Wizard finished");

            let delivered = match self.submitter.submit(&finished) {
                Ok(()) => true,
                Err(err) => {
                    error!(error = %err, "Submission failed");
                    false
                }
            };
            return Ok(StepOutcome::Completed {
                aggregate: finished,
                delivered,
            });
        }

        self.state.aggregate = aggregate;
        self.state.current_step = next;
        info!(
            step = step.number(),
            name = steps::descriptor(step).name,
            "Step accepted"
        );
        Ok(StepOutcome::Advanced {
            from: step,
            to: next,
        })
    }

    /// Hands the finished aggregate to the submitter again, typically after
    /// a [`StepOutcome::Completed`] with `delivered: false`.
    pub fn retry_submission(&mut self) -> Result<()> {
        let finished = self.finished.as_ref().ok_or(WizardError::NotFinished)?;
        self.submitter.submit(finished)?;
        info!("Submission retried");
        Ok(())
    }

    /// Moves one step back without touching any data. No-op on the first
    /// step and once the wizard is finished.
    pub fn go_back(&mut self) -> StepId {
        if self.finished.is_none() {
            let previous = self.state.current_step.previous();
            if previous != self.state.current_step {
                debug!(from = self.state.current_step.number(), to = previous.number(), "Back");
            }
            self.state.current_step = previous;
        }
        self.state.current_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LinkAccountEntry;

    fn raw(pairs: &[(&str, &str)]) -> RawInput {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn business() -> StepInput {
        StepInput::BusinessInfo(raw(&[
            ("business_name", "Acme Ltd"),
            ("company_number", "12345678"),
            ("state", "CA"),
            ("city", "LA"),
            ("post_code", "90001"),
        ]))
    }

    fn contact() -> StepInput {
        StepInput::ContactDetails(raw(&[
            ("contact_name", "Jo Bloggs"),
            ("email", "jo@acme.co.uk"),
            ("phone", "07123 456789"),
        ]))
    }

    #[test]
    fn new_wizard_starts_at_first_step() {
        let wizard = WizardController::default();
        assert_eq!(wizard.current_step(), StepId::BusinessInfo);
        assert_eq!(wizard.aggregate(), &WizardAggregate::default());
        assert!(!wizard.is_finished());
    }

    #[test]
    fn valid_submit_advances_and_populates_slot() {
        let mut wizard = WizardController::default();
        let outcome = wizard.submit_step(StepId::BusinessInfo, business()).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                from: StepId::BusinessInfo,
                to: StepId::ContactDetails
            }
        );
        assert!(wizard.aggregate().is_populated(StepId::BusinessInfo));
        assert!(wizard.is_completed(StepId::BusinessInfo));
        assert!(!wizard.aggregate().is_populated(StepId::ContactDetails));
    }

    #[test]
    fn invalid_submit_changes_nothing() {
        let mut wizard = WizardController::default();
        wizard.submit_step(StepId::BusinessInfo, business()).unwrap();
        let before = wizard.state().clone();

        let outcome = wizard
            .submit_step(
                StepId::ContactDetails,
                StepInput::ContactDetails(raw(&[
                    ("contact_name", "Jo"),
                    ("email", "not-an-email"),
                    ("phone", "1"),
                ])),
            )
            .unwrap();
        match outcome {
            StepOutcome::Rejected(errors) => assert!(errors.contains("email")),
            other => panic!("Unexpected outcome: {:?}", other),
        }
        assert_eq!(wizard.state(), &before);
        assert_eq!(wizard.current_step(), StepId::ContactDetails);
    }

    #[test]
    fn only_active_step_accepts_input() {
        let mut wizard = WizardController::default();
        let err = wizard.submit_step(StepId::ContactDetails, contact()).unwrap_err();
        assert!(matches!(
            err,
            WizardError::StepNotActive {
                requested: StepId::ContactDetails,
                active: StepId::BusinessInfo
            }
        ));
        let err = wizard.submit_step(StepId::BusinessInfo, contact()).unwrap_err();
        assert!(matches!(err, WizardError::InputMismatch { .. }));
    }

    #[test]
    fn go_back_on_first_step_is_noop() {
        let mut wizard = WizardController::default();
        assert_eq!(wizard.go_back(), StepId::BusinessInfo);
        assert_eq!(wizard.go_back(), StepId::BusinessInfo);
    }

    #[test]
    fn back_navigation_keeps_entered_values() {
        let mut wizard = WizardController::default();
        wizard.submit_step(StepId::BusinessInfo, business()).unwrap();
        wizard.go_back();
        assert_eq!(wizard.current_step(), StepId::BusinessInfo);

        let defaults = wizard.defaults_for(StepId::BusinessInfo);
        assert_eq!(
            defaults.get("business_name").map(String::as_str),
            Some("Acme Ltd")
        );
        assert_eq!(
            defaults.get("country").map(String::as_str),
            Some("United Kingdom")
        );
        assert!(wizard.aggregate().is_populated(StepId::BusinessInfo));
        assert!(!wizard.is_completed(StepId::BusinessInfo));
    }

    #[test]
    fn progress_marks_completed_and_active() {
        let mut wizard = WizardController::default();
        wizard.submit_step(StepId::BusinessInfo, business()).unwrap();
        let progress = wizard.progress();
        assert!(progress[0].completed && !progress[0].active);
        assert!(!progress[1].completed && progress[1].active);
        assert!(progress[2..].iter().all(|s| !s.completed && !s.active));
    }

    #[test]
    fn finishing_locks_the_wizard() {
        let mut wizard = WizardController::default();
        wizard.submit_step(StepId::BusinessInfo, business()).unwrap();
        wizard.submit_step(StepId::ContactDetails, contact()).unwrap();
        let entries = vec![LinkAccountEntry::new("facebook", "https://fb.com/acme")];
        let outcome = wizard
            .submit_step(StepId::LinkAccounts, StepInput::LinkAccounts(entries))
            .unwrap();
        assert!(matches!(
            outcome,
            StepOutcome::Completed { delivered: true, .. }
        ));
        assert_eq!(wizard.current_step(), StepId::AccessPermissions);
        assert!(wizard.is_completed(StepId::LinkAccounts));

        assert_eq!(wizard.go_back(), StepId::AccessPermissions);
        let err = wizard
            .submit_step(StepId::AccessPermissions, StepInput::LinkAccounts(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, WizardError::AlreadyFinished));
    }
}
