//! Device geolocation.
//!
//! A [`Geolocator`] answers a position request exactly once through a
//! oneshot channel, the same shape as a browser success/error callback pair.
//! Requests cannot be cancelled and are never retried.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;

use shoresquad_shared::GeoLocation;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

pub type PositionReply = oneshot::Receiver<Result<GeoLocation, LocationError>>;

pub trait Geolocator: Send + Sync {
    /// Ask for the current position once, with default accuracy.
    fn request_position(&self) -> PositionReply;
}

/// Geolocator that always answers with the same outcome.
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    outcome: Result<GeoLocation, LocationError>,
}

impl FixedGeolocator {
    pub fn new(outcome: Result<GeoLocation, LocationError>) -> Self {
        Self { outcome }
    }

    pub fn located(location: GeoLocation) -> Self {
        Self::new(Ok(location))
    }

    pub fn unsupported() -> Self {
        Self::new(Err(LocationError::Unsupported))
    }

    pub fn denied() -> Self {
        Self::new(Err(LocationError::PermissionDenied))
    }
}

impl Geolocator for FixedGeolocator {
    fn request_position(&self) -> PositionReply {
        let (tx, rx) = oneshot::channel();
        // The receiver is still in scope, so this send cannot fail.
        let _ = tx.send(self.outcome.clone());
        rx
    }
}
