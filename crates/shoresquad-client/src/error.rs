use thiserror::Error;

use shoresquad_store::StoreError;

use crate::location::LocationError;
use crate::weather::WeatherError;

/// Why a command did not complete. By the time a command returns one of
/// these the user has already been shown a toast describing it.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Location unavailable: {0}")]
    Location(#[from] LocationError),

    #[error("Location has not been set")]
    NoLocation,

    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    #[error("No form is open")]
    NoOpenForm,

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("State lock poisoned")]
    LockPoisoned,
}
