//! Typed records produced by the step validators.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fields::RawInput;

/// Postal address captured on the business-info step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub apartment: Option<String>,
    pub state: String,
    pub city: String,
    pub post_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfoRecord {
    pub business_name: String,
    pub company_number: String,
    pub vat_number: Option<String>,
    /// Reference to an uploaded logo (path or upload handle).
    pub logo: Option<String>,
    pub address: PostalAddress,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetailsRecord {
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub landline: Option<String>,
}

/// One connected social profile. `id` is assigned on insertion and stays
/// stable while other entries are added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAccountEntry {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
}

impl LinkAccountEntry {
    pub fn new(platform: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            platform: platform.into(),
            url: url.into(),
        }
    }
}

fn put(raw: &mut RawInput, key: &str, value: &str) {
    raw.insert(key.to_string(), value.to_string());
}

fn put_opt(raw: &mut RawInput, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        put(raw, key, value);
    }
}

impl BusinessInfoRecord {
    /// Renders the record back into form values for pre-population.
    pub fn to_raw(&self) -> RawInput {
        let mut raw = RawInput::new();
        put(&mut raw, "business_name", &self.business_name);
        put(&mut raw, "company_number", &self.company_number);
        put_opt(&mut raw, "vat_number", &self.vat_number);
        put_opt(&mut raw, "logo", &self.logo);
        put_opt(&mut raw, "address", &self.address.street);
        put_opt(&mut raw, "apartment", &self.address.apartment);
        put(&mut raw, "state", &self.address.state);
        put(&mut raw, "city", &self.address.city);
        put(&mut raw, "post_code", &self.address.post_code);
        put(&mut raw, "country", &self.country);
        raw
    }
}

impl ContactDetailsRecord {
    pub fn to_raw(&self) -> RawInput {
        let mut raw = RawInput::new();
        put(&mut raw, "contact_name", &self.contact_name);
        put(&mut raw, "email", &self.email);
        put(&mut raw, "phone", &self.phone);
        put_opt(&mut raw, "landline", &self.landline);
        raw
    }
}
