//! Wizard controller and the pieces it coordinates.

pub mod aggregate;
pub mod finalize;
pub mod link_accounts;
pub mod state;
pub mod steps;

pub use aggregate::{FinishedAggregate, WizardAggregate};
pub use finalize::Finalizer;
pub use link_accounts::{LinkAccountManager, LinkAccountRow};
pub use state::{StepOutcome, StepStatus, WizardController, WizardState};
pub use steps::{StepDescriptor, StepId, StepKind};
