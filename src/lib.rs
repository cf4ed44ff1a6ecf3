#![doc(test(attr(deny(warnings))))]

//! Setup Wizard drives a four-step business onboarding flow: it validates
//! each step, keeps the accumulated answers, and hands a finished aggregate
//! to a submission target.

pub mod cli;
pub mod config;
pub mod errors;
pub mod reference;
pub mod schema;
pub mod services;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup log.
pub fn init() {
    init_with_filter(None);
}

/// Like [`init`], using `filter` when `RUST_LOG` is not set.
pub fn init_with_filter(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Setup wizard tracing initialized.");
    });
}
