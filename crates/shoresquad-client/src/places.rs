//! Nearby-beach search.
//!
//! There is no real places backend; [`SimulatedPlaces`] waits a fixed delay
//! and reports a fixed number of beaches.

use std::time::Duration;

use futures::future::BoxFuture;

use shoresquad_shared::constants::{BEACH_SEARCH_DELAY_MS, BEACH_SEARCH_RESULT_COUNT};
use shoresquad_shared::GeoLocation;

pub trait PlacesProvider: Send + Sync {
    /// Number of beaches found near `near`, or near nothing in particular
    /// when the location is unknown.
    fn find_nearby_beaches(&self, near: Option<GeoLocation>) -> BoxFuture<'_, usize>;
}

#[derive(Debug, Clone)]
pub struct SimulatedPlaces {
    delay: Duration,
    count: usize,
}

impl SimulatedPlaces {
    pub fn new(delay: Duration, count: usize) -> Self {
        Self { delay, count }
    }
}

impl Default for SimulatedPlaces {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(BEACH_SEARCH_DELAY_MS),
            BEACH_SEARCH_RESULT_COUNT,
        )
    }
}

impl PlacesProvider for SimulatedPlaces {
    fn find_nearby_beaches(&self, _near: Option<GeoLocation>) -> BoxFuture<'_, usize> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.count
        })
    }
}
