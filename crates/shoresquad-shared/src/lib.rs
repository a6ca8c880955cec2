//! # shoresquad-shared
//!
//! Types, constants and validation errors shared by the ShoreSquad store
//! and client crates.

pub mod constants;
pub mod error;
pub mod format;
pub mod types;

pub use error::ValidationError;
pub use types::{CrewId, EventId, GeoLocation, Severity, WeatherReport};
