//! Drives a [`WizardController`] from a [`WizardInteraction`].

use tracing::{debug, warn};

use crate::cli::interaction::{FieldPrompt, FieldResponse, LinkAction, WizardInteraction};
use crate::cli::{output, render};
use crate::errors::{Result, WizardError};
use crate::reference::{self, Country};
use crate::schema::{FieldErrors, FormDescriptor, RawInput, StepInput};
use crate::services::{attach_logo, AddressLookup, FilePreviewRenderer, PreviewRenderer};
use crate::wizard::{FinishedAggregate, StepId, StepKind, StepOutcome, WizardController};

/// How a wizard run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardRun {
    Finished {
        aggregate: FinishedAggregate,
        delivered: bool,
    },
    Cancelled,
}

enum StepFlow {
    Continue,
    Cancelled,
    Completed {
        aggregate: FinishedAggregate,
        delivered: bool,
    },
}

enum Collected {
    Done,
    Back,
    Cancel,
}

pub struct WizardEngine {
    lookup: AddressLookup,
    renderer: Box<dyn PreviewRenderer>,
    address_country: Option<&'static Country>,
}

impl Default for WizardEngine {
    fn default() -> Self {
        Self::new(AddressLookup::disabled(), Box::new(FilePreviewRenderer))
    }
}

impl WizardEngine {
    pub fn new(lookup: AddressLookup, renderer: Box<dyn PreviewRenderer>) -> Self {
        Self {
            lookup,
            renderer,
            address_country: None,
        }
    }

    /// Restricts address suggestions to `country` regardless of the form value.
    pub fn with_address_country(mut self, country: Option<&'static Country>) -> Self {
        self.address_country = country;
        self
    }

    pub fn run<I: WizardInteraction>(
        &self,
        controller: &mut WizardController,
        interaction: &mut I,
    ) -> Result<WizardRun> {
        if controller.is_finished() {
            return Err(WizardError::AlreadyFinished);
        }

        loop {
            output::info(render::progress_line(&controller.progress()));
            let step = controller.current_step();
            let descriptor = controller.current_descriptor();
            output::section(descriptor.name);

            let flow = match descriptor.kind {
                StepKind::Form(form) => self.run_form(controller, step, form(), interaction)?,
                StepKind::Collection(_) => self.run_links(controller, interaction)?,
                StepKind::Terminal => return Err(WizardError::AlreadyFinished),
            };

            match flow {
                StepFlow::Continue => continue,
                StepFlow::Cancelled => {
                    output::warning("Setup cancelled; nothing was submitted.");
                    return Ok(WizardRun::Cancelled);
                }
                StepFlow::Completed {
                    aggregate,
                    delivered,
                } => {
                    output::info(render::progress_line(&controller.progress()));
                    output::section(controller.current_descriptor().name);
                    output::lines(&render::terminal_step());
                    output::section("Summary");
                    output::lines(&render::summary(&aggregate));
                    if delivered {
                        output::success("Onboarding details submitted.");
                    } else {
                        output::error("Onboarding details could not be submitted.");
                    }
                    return Ok(WizardRun::Finished {
                        aggregate,
                        delivered,
                    });
                }
            }
        }
    }

    fn run_form<I: WizardInteraction>(
        &self,
        controller: &mut WizardController,
        step: StepId,
        form: &FormDescriptor,
        interaction: &mut I,
    ) -> Result<StepFlow> {
        let mut values = controller.defaults_for(step);
        let mut errors = FieldErrors::new();

        loop {
            match self.collect_fields(step, form, &mut values, &errors, interaction) {
                Collected::Done => {}
                Collected::Back => {
                    controller.go_back();
                    return Ok(StepFlow::Continue);
                }
                Collected::Cancel => return Ok(StepFlow::Cancelled),
            }

            match controller.submit_step(step, form_input(step, values.clone())?)? {
                StepOutcome::Advanced { .. } => {
                    output::success(format!("{} saved.", form.name));
                    return Ok(StepFlow::Continue);
                }
                StepOutcome::Rejected(found) => {
                    for (field, error) in found.iter() {
                        let label = form.field(field).map(|f| f.label).unwrap_or(field);
                        output::warning(format!("{}: {}", label, error));
                    }
                    errors = found;
                }
                StepOutcome::Completed {
                    aggregate,
                    delivered,
                } => {
                    return Ok(StepFlow::Completed {
                        aggregate,
                        delivered,
                    })
                }
            }
        }
    }

    fn collect_fields<I: WizardInteraction>(
        &self,
        step: StepId,
        form: &FormDescriptor,
        values: &mut RawInput,
        errors: &FieldErrors,
        interaction: &mut I,
    ) -> Collected {
        let total = form.fields.len();
        let mut index = 0;
        while index < total {
            let field = &form.fields[index];
            let default = values.get(field.key).cloned();
            let prompt = FieldPrompt {
                step,
                descriptor: field,
                default: default.as_deref(),
                error: errors.message(field.key),
                index,
                total,
            };
            match interaction.prompt_field(&prompt) {
                FieldResponse::Value(value) => {
                    let value = self.assist(field.key, value, values, interaction);
                    values.insert(field.key.to_string(), value);
                    index += 1;
                }
                FieldResponse::Back if index > 0 => index -= 1,
                FieldResponse::Back if step != StepId::FIRST => return Collected::Back,
                FieldResponse::Back => {}
                FieldResponse::Cancel => return Collected::Cancel,
            }
        }
        Collected::Done
    }

    /// Applies logo preview and address suggestions to a freshly typed value.
    fn assist<I: WizardInteraction>(
        &self,
        key: &str,
        value: String,
        values: &RawInput,
        interaction: &mut I,
    ) -> String {
        match key {
            "logo" if !value.trim().is_empty() => {
                match attach_logo(self.renderer.as_ref(), &value) {
                    Some(preview) => {
                        output::success(format!(
                            "Logo attached ({}, {} bytes)",
                            preview.media_type, preview.size_bytes
                        ));
                        preview.source
                    }
                    None => {
                        output::warning("Logo could not be previewed; leaving it unset.");
                        String::new()
                    }
                }
            }
            "country" => {
                let typed = value.trim();
                if typed.is_empty() || reference::find_country(typed).is_some() {
                    return value;
                }
                match reference::search_countries(typed).as_slice() {
                    [single] => {
                        output::info(format!("Country: {}", single.name));
                        single.name.to_string()
                    }
                    _ => value,
                }
            }
            "address" => {
                let country = self
                    .address_country
                    .or_else(|| values.get("country").and_then(|c| reference::find_country(c)))
                    .unwrap_or_else(reference::default_country);
                let candidates = self.lookup.suggestions(&value, country);
                if candidates.is_empty() {
                    return value;
                }
                let Some(index) = interaction.choose_address(&candidates) else {
                    return value;
                };
                match candidates.get(index) {
                    Some(candidate) => {
                        let selection = self.lookup.select(candidate);
                        if let Some(coordinates) = selection.coordinates {
                            debug!(lat = coordinates.lat, lng = coordinates.lng, "Address located");
                        }
                        selection.address
                    }
                    None => {
                        warn!(
                            index,
                            len = candidates.len(),
                            "Address choice out of range; keeping typed address"
                        );
                        value
                    }
                }
            }
            _ => value,
        }
    }

    fn run_links<I: WizardInteraction>(
        &self,
        controller: &mut WizardController,
        interaction: &mut I,
    ) -> Result<StepFlow> {
        let mut editor = controller.link_account_editor();
        let mut last_error: Option<String> = None;

        loop {
            let rows = editor.rows();
            output::lines(&render::link_rows(&rows));

            match interaction.link_action(&rows, last_error.as_deref()) {
                LinkAction::Add { platform, url } => {
                    let added = editor
                        .select_platform(&platform)
                        .and_then(|_| editor.add_entry(&url));
                    last_error = match added {
                        Ok(_) => {
                            output::success("Account connected.");
                            None
                        }
                        Err(err) => {
                            let message = match (&err, reference::suggest_platform(&platform)) {
                                (WizardError::UnknownPlatform(_), Some(suggestion)) => {
                                    format!("{}. Did you mean '{}'?", err, suggestion.name)
                                }
                                _ => err.to_string(),
                            };
                            output::warning(&message);
                            Some(message)
                        }
                    };
                }
                LinkAction::Remove(index) => {
                    last_error = match editor.remove_entry(index) {
                        Ok(removed) => {
                            output::info(format!("Removed {}", removed.url));
                            None
                        }
                        Err(err) => {
                            output::warning(&err);
                            Some(err.to_string())
                        }
                    };
                }
                LinkAction::Continue => {
                    match controller.submit_step(StepId::LinkAccounts, editor.to_input())? {
                        StepOutcome::Completed {
                            aggregate,
                            delivered,
                        } => {
                            return Ok(StepFlow::Completed {
                                aggregate,
                                delivered,
                            })
                        }
                        StepOutcome::Advanced { .. } => return Ok(StepFlow::Continue),
                        StepOutcome::Rejected(errors) => {
                            output::warning(&errors);
                            last_error = Some(errors.to_string());
                        }
                    }
                }
                LinkAction::Back => {
                    controller.go_back();
                    return Ok(StepFlow::Continue);
                }
                LinkAction::Cancel => return Ok(StepFlow::Cancelled),
            }
        }
    }
}

fn form_input(step: StepId, values: RawInput) -> Result<StepInput> {
    match step {
        StepId::BusinessInfo => Ok(StepInput::BusinessInfo(values)),
        StepId::ContactDetails => Ok(StepInput::ContactDetails(values)),
        StepId::LinkAccounts | StepId::AccessPermissions => {
            Err(WizardError::InputMismatch { step })
        }
    }
}
