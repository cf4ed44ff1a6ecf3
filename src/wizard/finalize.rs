//! Aggregate Finalizer: turns the populated aggregate into its immutable
//! snapshot.

use chrono::{DateTime, Utc};

use crate::errors::{Result, WizardError};
use crate::wizard::aggregate::{FinishedAggregate, WizardAggregate};

pub struct Finalizer;

impl Finalizer {
    /// Copies the three populated slots into a [`FinishedAggregate`].
    pub fn finalize(aggregate: &WizardAggregate) -> Result<FinishedAggregate> {
        Self::finalize_at(aggregate, Utc::now())
    }

    pub fn finalize_at(
        aggregate: &WizardAggregate,
        completed_at: DateTime<Utc>,
    ) -> Result<FinishedAggregate> {
        let business_info = aggregate
            .business_info()
            .cloned()
            .ok_or(WizardError::IncompleteAggregate("business info"))?;
        let contact_details = aggregate
            .contact_details()
            .cloned()
            .ok_or(WizardError::IncompleteAggregate("contact details"))?;
        let link_accounts = aggregate
            .link_accounts()
            .map(<[_]>::to_vec)
            .ok_or(WizardError::IncompleteAggregate("link accounts"))?;
        Ok(FinishedAggregate::new(
            business_info,
            contact_details,
            link_accounts,
            completed_at,
        ))
    }
}
