//! Step Definition Registry: the fixed, ordered list of wizard steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{self, FormDescriptor};

/// Wizard step identifier. The discriminant is the 1-based step number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StepId {
    BusinessInfo = 1,
    ContactDetails = 2,
    LinkAccounts = 3,
    AccessPermissions = 4,
}

impl StepId {
    pub const FIRST: StepId = StepId::BusinessInfo;
    pub const LAST: StepId = StepId::AccessPermissions;

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(StepId::BusinessInfo),
            2 => Some(StepId::ContactDetails),
            3 => Some(StepId::LinkAccounts),
            4 => Some(StepId::AccessPermissions),
            _ => None,
        }
    }

    /// Following step, clamped to the last one.
    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    /// Preceding step, clamped to the first one.
    pub fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// What a step collects and how it is validated.
#[derive(Debug, Clone, Copy)]
pub enum StepKind {
    /// Single form validated as a whole.
    Form(fn() -> &'static FormDescriptor),
    /// Repeated (platform, url) entries edited through the link-account manager.
    Collection(fn() -> &'static FormDescriptor),
    /// Display-only confirmation reached once the aggregate is finished.
    Terminal,
}

#[derive(Debug, Clone, Copy)]
pub struct StepDescriptor {
    pub id: StepId,
    pub name: &'static str,
    pub kind: StepKind,
}

impl StepDescriptor {
    pub fn form(&self) -> Option<&'static FormDescriptor> {
        match self.kind {
            StepKind::Form(form) | StepKind::Collection(form) => Some(form()),
            StepKind::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::Terminal)
    }
}

static STEPS: [StepDescriptor; 4] = [
    StepDescriptor {
        id: StepId::BusinessInfo,
        name: "Business Info",
        kind: StepKind::Form(schema::business_info_form),
    },
    StepDescriptor {
        id: StepId::ContactDetails,
        name: "Contact details",
        kind: StepKind::Form(schema::contact_details_form),
    },
    StepDescriptor {
        id: StepId::LinkAccounts,
        name: "Link Account",
        kind: StepKind::Collection(schema::link_account_form),
    },
    StepDescriptor {
        id: StepId::AccessPermissions,
        name: "Access and Permissions",
        kind: StepKind::Terminal,
    },
];

pub fn steps() -> &'static [StepDescriptor] {
    &STEPS
}

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn descriptor(id: StepId) -> &'static StepDescriptor {
    &STEPS[usize::from(id.number()) - 1]
}
