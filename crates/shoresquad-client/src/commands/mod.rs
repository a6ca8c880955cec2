//! Command handlers.
//!
//! Each sub-module groups the handlers for one part of the page. Handlers
//! take an [`AppHandle`], report their outcome to the user with a toast,
//! and push re-rendered markup to the frontend.
//!
//! [`AppHandle`]: crate::state::AppHandle

pub mod crews;
pub mod location;
pub mod map;
pub mod scheduling;
pub mod ui;
pub mod weather;

use shoresquad_shared::ValidationError;
use shoresquad_store::StoreError;

use crate::state::AppHandle;

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const MSG_SAVE_FAILED: &str = "Could not save your changes";

/// Tell the user why a store mutation did not happen.
pub(crate) fn report_store_error(app: &AppHandle, err: &StoreError) {
    match err {
        StoreError::Validation(v) => {
            tracing::debug!(error = %v, "validation failed");
            app.notifier().warning(validation_message(v));
        }
        other => {
            tracing::error!(error = %other, "store write failed");
            app.notifier().error(MSG_SAVE_FAILED);
        }
    }
}

fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::MissingField(_) => MSG_FILL_ALL_FIELDS.to_string(),
        ValidationError::InvalidDate(_) => "Please pick a valid date".to_string(),
        ValidationError::InvalidCrewId(_) | ValidationError::UnknownCrew(_) => {
            "Please choose an existing crew".to_string()
        }
    }
}
