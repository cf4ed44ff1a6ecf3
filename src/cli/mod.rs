//! Terminal front-end for the onboarding wizard.

pub mod engine;
pub mod interaction;
pub mod output;
pub mod render;

pub use engine::{WizardEngine, WizardRun};
pub use interaction::{
    FieldPrompt, FieldResponse, LinkAction, ScriptedAnswers, ScriptedInteraction, ScriptedLink,
    TerminalInteraction, WizardInteraction,
};
