//! Declarative field descriptors and the validators behind them.
//!
//! A [`FormDescriptor`] lists the fields of one step in display order. Running
//! [`FormDescriptor::check`] over raw input yields either the cleaned values
//! (trimmed, optional fields explicit) or one message per failing field.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

/// Raw, untyped values for a single step keyed by field name.
pub type RawInput = BTreeMap<String, String>;

/// Cleaned values produced by a successful check. `None` marks an optional
/// field left blank.
pub type CleanValues = BTreeMap<&'static str, Option<String>>;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid email pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldErrorKind {
    /// A required value was empty or absent.
    MissingField,
    /// A value was present but did not match the expected grammar.
    InvalidFormat,
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn missing(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::MissingField,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::InvalidFormat,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors for one step, at most one per field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    entries: Vec<(String, ValidationError)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` for `field` unless that field already failed.
    pub fn insert(&mut self, field: impl Into<String>, error: ValidationError) {
        let field = field.into();
        if self.entries.iter().any(|(key, _)| *key == field) {
            return;
        }
        self.entries.push((field, error));
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.entries
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, error)| error)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.entries
            .iter()
            .map(|(key, error)| (key.as_str(), error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// How the presentation layer should collect a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Url,
    Choice(Vec<&'static str>),
}

/// Built-in validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Accepts any non-empty text.
    None,
    Email(&'static str),
    Url(&'static str),
}

impl Validator {
    fn validate(&self, input: &str) -> Result<String, ValidationError> {
        match self {
            Validator::None => Ok(input.to_string()),
            Validator::Email(message) => {
                if EMAIL_PATTERN.is_match(input) {
                    Ok(input.to_string())
                } else {
                    Err(ValidationError::invalid(*message))
                }
            }
            Validator::Url(message) => {
                parse_url(input).ok_or_else(|| ValidationError::invalid(*message))
            }
        }
    }
}

/// Returns the input when it parses as an absolute URL with a host.
pub fn parse_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    match Url::parse(trimmed) {
        Ok(url) if url.host().is_some() => Some(trimmed.to_string()),
        _ => None,
    }
}

pub fn is_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input.trim())
}

/// How a blank value is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// Blank fails with the given message.
    Required(&'static str),
    /// Blank resolves to `None`.
    Optional,
    /// Blank resolves to the given constant.
    DefaultTo(&'static str),
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
    pub help: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    /// Required free-text field failing with `message` when blank.
    pub fn required(key: &'static str, label: &'static str, message: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            presence: Presence::Required(message),
            help: None,
            validator: Validator::None,
        }
    }

    pub fn optional(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            presence: Presence::Optional,
            help: None,
            validator: Validator::None,
        }
    }

    pub fn with_validator(mut self, kind: FieldKind, validator: Validator) -> Self {
        self.kind = kind;
        self.validator = validator;
        self
    }

    pub fn with_default(mut self, value: &'static str) -> Self {
        self.presence = Presence::DefaultTo(value);
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn is_required(&self) -> bool {
        matches!(self.presence, Presence::Required(_))
    }

    /// Validates one raw value; `None` in the result means "left blank".
    pub fn check(&self, raw: Option<&str>) -> Result<Option<String>, ValidationError> {
        let value = raw.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return match &self.presence {
                Presence::Required(message) => Err(ValidationError::missing(*message)),
                Presence::Optional => Ok(None),
                Presence::DefaultTo(default) => Ok(Some((*default).to_string())),
            };
        }
        self.validator.validate(value).map(Some)
    }
}

/// Metadata describing one step's form, including field order.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Checks every field; errors accumulate across fields, never within one.
    pub fn check(&self, raw: &RawInput) -> Result<CleanValues, FieldErrors> {
        let mut values = CleanValues::new();
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            match field.check(raw.get(field.key).map(String::as_str)) {
                Ok(value) => {
                    values.insert(field.key, value);
                }
                Err(err) => errors.insert(field.key, err),
            }
        }
        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }
}
