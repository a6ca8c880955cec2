use thiserror::Error;

use crate::types::CrewId;

/// A user-supplied form failed validation. No state was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid crew id: {0:?}")]
    InvalidCrewId(String),

    #[error("Unknown crew: {0}")]
    UnknownCrew(CrewId),
}
