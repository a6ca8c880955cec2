use tracing::{info, warn};

use shoresquad_shared::GeoLocation;

use crate::error::CommandError;
use crate::events::Region;
use crate::location::LocationError;
use crate::state::AppHandle;

pub const MSG_LOCATION_UNSUPPORTED: &str = "Your device does not support location services";
pub const MSG_ENABLE_LOCATION: &str = "Please enable location services for better experience";

/// Ask for the device position once per session.
///
/// On success the location is stored and the map is re-rendered with the
/// coordinates. On failure the location stays unset and the user is told
/// why. A second call returns the first call's result without asking again.
pub async fn request_location(app: &AppHandle) -> Result<GeoLocation, CommandError> {
    {
        let mut guard = app.state()?;
        if guard.location_requested {
            return guard.location.ok_or(CommandError::NoLocation);
        }
        guard.location_requested = true;
    }

    let reply = app.services().geolocator.request_position();
    let outcome = match reply.await {
        Ok(outcome) => outcome,
        Err(_) => Err(LocationError::Unavailable(
            "geolocator dropped the request".to_string(),
        )),
    };

    match outcome {
        Ok(location) => {
            let html = {
                let mut guard = app.state()?;
                guard.location = Some(location);
                guard.render(Region::Map)
            };
            info!(
                lat = location.latitude,
                lng = location.longitude,
                accuracy = location.accuracy,
                "User location"
            );
            app.emit_region(Region::Map, html);
            Ok(location)
        }
        Err(LocationError::Unsupported) => {
            warn!("Geolocation not supported");
            app.notifier().warning(MSG_LOCATION_UNSUPPORTED);
            Err(LocationError::Unsupported.into())
        }
        Err(e) => {
            warn!(error = %e, "Location error");
            app.notifier().info(MSG_ENABLE_LOCATION);
            Err(e.into())
        }
    }
}
