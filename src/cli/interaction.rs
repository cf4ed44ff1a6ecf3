//! Input sources for the wizard engine.
//!
//! [`TerminalInteraction`] prompts through dialoguer. [`ScriptedInteraction`]
//! replays a JSON answers file and gives up as soon as an answer is rejected,
//! since a script cannot correct itself.

use std::{collections::VecDeque, fs, path::Path};

use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::Deserialize;

use crate::cli::output;
use crate::errors::{Result, WizardError};
use crate::reference;
use crate::schema::{FieldDescriptor, FieldKind, RawInput};
use crate::services::AddressCandidate;
use crate::wizard::{LinkAccountRow, StepId};

const BACK_COMMAND: &str = ":back";
const QUIT_COMMAND: &str = ":quit";

/// Everything the front-end needs to ask for one field.
pub struct FieldPrompt<'a> {
    pub step: StepId,
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<&'a str>,
    /// Message from the last rejected submission of this field.
    pub error: Option<&'a str>,
    pub index: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldResponse {
    Value(String),
    /// Previous field, or previous step when on the first field.
    Back,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    Add { platform: String, url: String },
    Remove(usize),
    /// Submit the current list.
    Continue,
    Back,
    Cancel,
}

pub trait WizardInteraction {
    fn prompt_field(&mut self, prompt: &FieldPrompt<'_>) -> FieldResponse;

    /// Picks one of the suggested addresses; `None` keeps the typed text.
    fn choose_address(&mut self, candidates: &[AddressCandidate]) -> Option<usize>;

    fn link_action(&mut self, rows: &[LinkAccountRow], last_error: Option<&str>) -> LinkAction;
}

pub struct TerminalInteraction {
    theme: ColorfulTheme,
}

impl Default for TerminalInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn prompt_label(prompt: &FieldPrompt<'_>) -> String {
        let marker = if prompt.descriptor.is_required() { " *" } else { "" };
        format!(
            "[{}/{}] {}{}",
            prompt.index + 1,
            prompt.total,
            prompt.descriptor.label,
            marker
        )
    }

    fn prompt_choice(&self, prompt: &FieldPrompt<'_>, options: &[&'static str]) -> FieldResponse {
        let mut items: Vec<&str> = options.to_vec();
        items.push("< Back");
        let default_index = prompt
            .default
            .and_then(|current| options.iter().position(|option| *option == current))
            .unwrap_or(0);

        match Select::with_theme(&self.theme)
            .with_prompt(Self::prompt_label(prompt))
            .items(&items)
            .default(default_index)
            .interact()
        {
            Ok(index) if index < options.len() => FieldResponse::Value(options[index].to_string()),
            Ok(_) => FieldResponse::Back,
            Err(_) => FieldResponse::Cancel,
        }
    }

    fn prompt_text(&self, prompt: &FieldPrompt<'_>) -> FieldResponse {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(Self::prompt_label(prompt))
            .allow_empty(true);
        if let Some(default) = prompt.default {
            input = input.with_initial_text(default);
        }
        match input.interact_text() {
            Ok(value) => match value.trim() {
                BACK_COMMAND => FieldResponse::Back,
                QUIT_COMMAND => FieldResponse::Cancel,
                _ => FieldResponse::Value(value),
            },
            Err(_) => FieldResponse::Cancel,
        }
    }

    fn prompt_new_account(&self) -> Option<LinkAction> {
        let names: Vec<&str> = reference::platforms().iter().map(|p| p.name).collect();
        let platform = Select::with_theme(&self.theme)
            .with_prompt("Search profile")
            .items(&names)
            .default(0)
            .interact()
            .ok()?;
        let url = Input::<String>::with_theme(&self.theme)
            .with_prompt("Add web address")
            .interact_text()
            .ok()?;
        Some(LinkAction::Add {
            platform: names[platform].to_string(),
            url,
        })
    }

    fn prompt_removal(&self, rows: &[LinkAccountRow]) -> Option<LinkAction> {
        let items: Vec<String> = rows
            .iter()
            .map(|row| format!("{} {}", row.platform, row.url))
            .collect();
        Select::with_theme(&self.theme)
            .with_prompt("Remove which account?")
            .items(&items)
            .default(0)
            .interact()
            .ok()
            .map(LinkAction::Remove)
    }
}

impl WizardInteraction for TerminalInteraction {
    fn prompt_field(&mut self, prompt: &FieldPrompt<'_>) -> FieldResponse {
        if let Some(error) = prompt.error {
            output::warning(format!("{}: {}", prompt.descriptor.label, error));
        }
        if prompt.index == 0 {
            output::info(format!(
                "Type {} to go back or {} to leave the wizard.",
                BACK_COMMAND, QUIT_COMMAND
            ));
        }
        if let Some(help) = prompt.descriptor.help {
            output::info(help);
        }
        match &prompt.descriptor.kind {
            FieldKind::Choice(options) => self.prompt_choice(prompt, options),
            _ => self.prompt_text(prompt),
        }
    }

    fn choose_address(&mut self, candidates: &[AddressCandidate]) -> Option<usize> {
        let mut items: Vec<&str> = candidates.iter().map(|c| c.description.as_str()).collect();
        items.push("Keep what I typed");
        match Select::with_theme(&self.theme)
            .with_prompt("Did you mean")
            .items(&items)
            .default(0)
            .interact()
        {
            Ok(index) if index < candidates.len() => Some(index),
            _ => None,
        }
    }

    fn link_action(&mut self, rows: &[LinkAccountRow], _last_error: Option<&str>) -> LinkAction {
        let mut entries = vec![LinkMenuEntry::Connect];
        if !rows.is_empty() {
            entries.push(LinkMenuEntry::Remove);
        }
        entries.extend([LinkMenuEntry::Continue, LinkMenuEntry::Back, LinkMenuEntry::Quit]);

        let labels: Vec<&str> = entries.iter().map(|entry| entry.label()).collect();
        let choice = match Select::with_theme(&self.theme)
            .with_prompt("Social profiles")
            .items(&labels)
            .default(0)
            .interact()
        {
            Ok(index) => entries[index],
            Err(_) => return LinkAction::Cancel,
        };

        match choice {
            LinkMenuEntry::Connect => self.prompt_new_account().unwrap_or(LinkAction::Cancel),
            LinkMenuEntry::Remove => self.prompt_removal(rows).unwrap_or(LinkAction::Cancel),
            LinkMenuEntry::Continue => LinkAction::Continue,
            LinkMenuEntry::Back => LinkAction::Back,
            LinkMenuEntry::Quit => LinkAction::Cancel,
        }
    }
}

#[derive(Clone, Copy)]
enum LinkMenuEntry {
    Connect,
    Remove,
    Continue,
    Back,
    Quit,
}

impl LinkMenuEntry {
    fn label(self) -> &'static str {
        match self {
            LinkMenuEntry::Connect => "Connect an account",
            LinkMenuEntry::Remove => "Remove an account",
            LinkMenuEntry::Continue => "Continue",
            LinkMenuEntry::Back => "Back",
            LinkMenuEntry::Quit => "Quit",
        }
    }
}

/// One linked account in an answers file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedLink {
    pub platform: String,
    pub url: String,
}

/// Contents of an answers file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptedAnswers {
    pub business_info: RawInput,
    pub contact_details: RawInput,
    pub link_accounts: Vec<ScriptedLink>,
    /// Index into the address suggestions; absent keeps the typed address.
    pub address_choice: Option<usize>,
}

pub struct ScriptedInteraction {
    answers: ScriptedAnswers,
    links: VecDeque<ScriptedLink>,
}

impl ScriptedInteraction {
    pub fn new(answers: ScriptedAnswers) -> Self {
        let links = answers.link_accounts.iter().cloned().collect();
        Self { answers, links }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let answers = serde_json::from_str(&data)
            .map_err(|err| WizardError::Config(format!("{}: {}", path.display(), err)))?;
        Ok(Self::new(answers))
    }

    fn answers_for(&self, step: StepId) -> Option<&RawInput> {
        match step {
            StepId::BusinessInfo => Some(&self.answers.business_info),
            StepId::ContactDetails => Some(&self.answers.contact_details),
            StepId::LinkAccounts | StepId::AccessPermissions => None,
        }
    }
}

impl WizardInteraction for ScriptedInteraction {
    fn prompt_field(&mut self, prompt: &FieldPrompt<'_>) -> FieldResponse {
        if prompt.error.is_some() {
            return FieldResponse::Cancel;
        }
        let value = self
            .answers_for(prompt.step)
            .and_then(|answers| answers.get(prompt.descriptor.key))
            .cloned()
            .unwrap_or_default();
        FieldResponse::Value(value)
    }

    fn choose_address(&mut self, candidates: &[AddressCandidate]) -> Option<usize> {
        self.answers
            .address_choice
            .filter(|index| *index < candidates.len())
    }

    fn link_action(&mut self, _rows: &[LinkAccountRow], last_error: Option<&str>) -> LinkAction {
        if last_error.is_some() {
            return LinkAction::Cancel;
        }
        match self.links.pop_front() {
            Some(link) => LinkAction::Add {
                platform: link.platform,
                url: link.url,
            },
            None => LinkAction::Continue,
        }
    }
}
