//! Per-step schemas and the pure validator dispatching over them.

use once_cell::sync::Lazy;

use super::fields::{
    parse_url, CleanValues, FieldDescriptor, FieldErrors, FieldKind, FormDescriptor, RawInput,
    ValidationError, Validator,
};
use super::records::{BusinessInfoRecord, ContactDetailsRecord, LinkAccountEntry, PostalAddress};
use crate::reference::{self, DEFAULT_COUNTRY};
use crate::wizard::steps::StepId;

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const INVALID_URL: &str = "Invalid URL";
pub const PLATFORM_REQUIRED: &str = "Platform is required";
pub const UNKNOWN_PLATFORM: &str = "Unknown platform";

static BUSINESS_INFO_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    let countries = reference::countries().iter().map(|c| c.name).collect();
    FormDescriptor::new(
        "General details",
        vec![
            FieldDescriptor::required(
                "business_name",
                "Business name",
                "Business name is required",
            ),
            FieldDescriptor::required(
                "company_number",
                "Company Number",
                "Company number is required",
            ),
            FieldDescriptor::optional("country", "Country")
                .with_validator(FieldKind::Choice(countries), Validator::None)
                .with_default(DEFAULT_COUNTRY),
            FieldDescriptor::optional("vat_number", "VAT Number"),
            FieldDescriptor::optional("logo", "Upload your Logo")
                .with_help("Path to an image file; leave blank to skip."),
            FieldDescriptor::optional("address", "Address")
                .with_help("Type part of an address to get suggestions."),
            FieldDescriptor::optional("apartment", "Apt. / Unit no."),
            FieldDescriptor::required("state", "State", "State is required"),
            FieldDescriptor::required("city", "City", "City is required"),
            FieldDescriptor::required("post_code", "Post code", "Post code is required"),
        ],
    )
});

static CONTACT_DETAILS_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    FormDescriptor::new(
        "Contact details",
        vec![
            FieldDescriptor::required(
                "contact_name",
                "Primary Contact Name",
                "Primary contact name is required",
            ),
            FieldDescriptor::required("email", "Primary Contact Email", INVALID_EMAIL)
                .with_validator(FieldKind::Email, Validator::Email(INVALID_EMAIL)),
            FieldDescriptor::required("phone", "Contact Number", "Contact number is required"),
            FieldDescriptor::optional("landline", "Landline (Optional)"),
        ],
    )
});

static LINK_ACCOUNT_FORM: Lazy<FormDescriptor> = Lazy::new(|| {
    let platforms = reference::platforms().iter().map(|p| p.name).collect();
    FormDescriptor::new(
        "Social Profile",
        vec![
            FieldDescriptor::required("platform", "Search profile", PLATFORM_REQUIRED)
                .with_validator(FieldKind::Choice(platforms), Validator::None),
            FieldDescriptor::required("url", "Add web address", INVALID_URL)
                .with_validator(FieldKind::Url, Validator::Url(INVALID_URL)),
        ],
    )
});

pub fn business_info_form() -> &'static FormDescriptor {
    &BUSINESS_INFO_FORM
}

pub fn contact_details_form() -> &'static FormDescriptor {
    &CONTACT_DETAILS_FORM
}

pub fn link_account_form() -> &'static FormDescriptor {
    &LINK_ACCOUNT_FORM
}

/// Raw input for one step, tagged with the step it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    BusinessInfo(RawInput),
    ContactDetails(RawInput),
    LinkAccounts(Vec<LinkAccountEntry>),
}

impl StepInput {
    pub fn step(&self) -> StepId {
        match self {
            StepInput::BusinessInfo(_) => StepId::BusinessInfo,
            StepInput::ContactDetails(_) => StepId::ContactDetails,
            StepInput::LinkAccounts(_) => StepId::LinkAccounts,
        }
    }
}

/// Validated output of one step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepRecord {
    BusinessInfo(BusinessInfoRecord),
    ContactDetails(ContactDetailsRecord),
    LinkAccounts(Vec<LinkAccountEntry>),
}

impl StepRecord {
    pub fn step(&self) -> StepId {
        match self {
            StepRecord::BusinessInfo(_) => StepId::BusinessInfo,
            StepRecord::ContactDetails(_) => StepId::ContactDetails,
            StepRecord::LinkAccounts(_) => StepId::LinkAccounts,
        }
    }
}

/// Validates one step's input. Pure: depends only on the input and the schema.
pub fn validate(input: &StepInput) -> Result<StepRecord, FieldErrors> {
    match input {
        StepInput::BusinessInfo(raw) => validate_business_info(raw).map(StepRecord::BusinessInfo),
        StepInput::ContactDetails(raw) => {
            validate_contact_details(raw).map(StepRecord::ContactDetails)
        }
        StepInput::LinkAccounts(entries) => {
            validate_link_accounts(entries).map(StepRecord::LinkAccounts)
        }
    }
}

fn take(values: &mut CleanValues, key: &str) -> Option<String> {
    values.remove(key).flatten()
}

pub fn validate_business_info(raw: &RawInput) -> Result<BusinessInfoRecord, FieldErrors> {
    let mut values = business_info_form().check(raw)?;
    let country = take(&mut values, "country").unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let country = reference::find_country(&country)
        .map(|known| known.name.to_string())
        .unwrap_or(country);

    Ok(BusinessInfoRecord {
        business_name: take(&mut values, "business_name").unwrap_or_default(),
        company_number: take(&mut values, "company_number").unwrap_or_default(),
        vat_number: take(&mut values, "vat_number"),
        logo: take(&mut values, "logo"),
        address: PostalAddress {
            street: take(&mut values, "address"),
            apartment: take(&mut values, "apartment"),
            state: take(&mut values, "state").unwrap_or_default(),
            city: take(&mut values, "city").unwrap_or_default(),
            post_code: take(&mut values, "post_code").unwrap_or_default(),
        },
        country,
    })
}

pub fn validate_contact_details(raw: &RawInput) -> Result<ContactDetailsRecord, FieldErrors> {
    let mut values = contact_details_form().check(raw)?;
    Ok(ContactDetailsRecord {
        contact_name: take(&mut values, "contact_name").unwrap_or_default(),
        email: take(&mut values, "email").unwrap_or_default(),
        phone: take(&mut values, "phone").unwrap_or_default(),
        landline: take(&mut values, "landline"),
    })
}

/// Re-checks a collected list of linked accounts. Platforms are normalised to
/// their reference id; entry ids are preserved.
pub fn validate_link_accounts(
    entries: &[LinkAccountEntry],
) -> Result<Vec<LinkAccountEntry>, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut accepted = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let platform_key = format!("link_accounts[{index}].platform");
        let url_key = format!("link_accounts[{index}].url");

        let platform = if entry.platform.trim().is_empty() {
            errors.insert(platform_key, ValidationError::missing(PLATFORM_REQUIRED));
            None
        } else if let Some(known) = reference::resolve_platform(&entry.platform) {
            Some(known.id)
        } else {
            errors.insert(platform_key, ValidationError::invalid(UNKNOWN_PLATFORM));
            None
        };

        let url = parse_url(&entry.url);
        if url.is_none() {
            errors.insert(url_key, ValidationError::invalid(INVALID_URL));
        }

        if let (Some(platform), Some(url)) = (platform, url) {
            accepted.push(LinkAccountEntry {
                id: entry.id,
                platform: platform.to_string(),
                url,
            });
        }
    }

    if errors.is_empty() {
        Ok(accepted)
    } else {
        Err(errors)
    }
}
