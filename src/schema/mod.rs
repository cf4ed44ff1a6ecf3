//! Field Validator: declarative step schemas and the typed records they yield.

pub mod fields;
pub mod records;
pub mod validate;

pub use fields::{
    FieldDescriptor, FieldErrorKind, FieldErrors, FieldKind, FormDescriptor, Presence, RawInput,
    ValidationError, Validator,
};
pub use records::{BusinessInfoRecord, ContactDetailsRecord, LinkAccountEntry, PostalAddress};
pub use validate::{
    business_info_form, contact_details_form, link_account_form, validate, StepInput, StepRecord,
};
