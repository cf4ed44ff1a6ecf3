//! The aggregate record assembled across steps, and its finished snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::{BusinessInfoRecord, ContactDetailsRecord, LinkAccountEntry, StepRecord};
use crate::wizard::steps::StepId;

/// Validated output of every accepted step. A slot stays `None` until its
/// step passes validation; it never holds partial data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WizardAggregate {
    business_info: Option<BusinessInfoRecord>,
    contact_details: Option<ContactDetailsRecord>,
    link_accounts: Option<Vec<LinkAccountEntry>>,
}

impl WizardAggregate {
    pub fn business_info(&self) -> Option<&BusinessInfoRecord> {
        self.business_info.as_ref()
    }

    pub fn contact_details(&self) -> Option<&ContactDetailsRecord> {
        self.contact_details.as_ref()
    }

    pub fn link_accounts(&self) -> Option<&[LinkAccountEntry]> {
        self.link_accounts.as_deref()
    }

    pub fn is_populated(&self, step: StepId) -> bool {
        match step {
            StepId::BusinessInfo => self.business_info.is_some(),
            StepId::ContactDetails => self.contact_details.is_some(),
            StepId::LinkAccounts => self.link_accounts.is_some(),
            StepId::AccessPermissions => false,
        }
    }

    /// Replaces the slot for the record's step.
    pub(crate) fn merge(&mut self, record: StepRecord) {
        match record {
            StepRecord::BusinessInfo(record) => self.business_info = Some(record),
            StepRecord::ContactDetails(record) => self.contact_details = Some(record),
            StepRecord::LinkAccounts(entries) => self.link_accounts = Some(entries),
        }
    }
}

/// Immutable copy of a completed aggregate, handed to the submission
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedAggregate {
    business_info: BusinessInfoRecord,
    contact_details: ContactDetailsRecord,
    link_accounts: Vec<LinkAccountEntry>,
    completed_at: DateTime<Utc>,
}

impl FinishedAggregate {
    pub(crate) fn new(
        business_info: BusinessInfoRecord,
        contact_details: ContactDetailsRecord,
        link_accounts: Vec<LinkAccountEntry>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            business_info,
            contact_details,
            link_accounts,
            completed_at,
        }
    }

    pub fn business_info(&self) -> &BusinessInfoRecord {
        &self.business_info
    }

    pub fn contact_details(&self) -> &ContactDetailsRecord {
        &self.contact_details
    }

    pub fn link_accounts(&self) -> &[LinkAccountEntry] {
        &self.link_accounts
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
