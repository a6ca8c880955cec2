pub mod chrome;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod location;
pub mod notify;
pub mod places;
pub mod render;
pub mod state;
pub mod weather;

use shoresquad_shared::constants::APP_NAME;
use shoresquad_shared::GeoLocation;
use shoresquad_store::{CommunityStore, Database, Persistence, StoreError};
use tokio::task::JoinHandle;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;
use crate::error::CommandError;
use crate::events::Region;
use crate::location::FixedGeolocator;
use crate::state::{AppHandle, Services};
use crate::weather::OpenWeatherMap;

pub const MSG_LOAD_FAILED: &str = "Saved data could not be read";

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("shoresquad_client_lib=debug,shoresquad_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Open the community store the configuration asks for. Nothing is loaded
/// yet; see [`startup`].
pub fn open_store(config: &ClientConfig) -> Result<CommunityStore, StoreError> {
    let persistence = if config.in_memory {
        Persistence::in_memory()
    } else {
        let db = match &config.db_path {
            Some(path) => Database::open_at(path)?,
            None => Database::new()?,
        };
        tracing::info!(path = ?db.path(), "Local storage opened");
        Persistence::new(db)
    };
    Ok(CommunityStore::new(persistence, config.user_name.clone()))
}

/// Wire up the geolocator, weather provider and toast timing.
pub fn services_from_config(config: &ClientConfig) -> Services {
    let geolocator = match config.location {
        Some(location) => FixedGeolocator::located(location),
        None => FixedGeolocator::unsupported(),
    };

    let mut services = Services::demo().with_geolocator(geolocator);
    services.toast_duration = config.toast_duration();

    if let Some(key) = &config.weather_api_key {
        match OpenWeatherMap::new(key.clone(), config.weather_api_url.clone(), config.weather_timeout()) {
            Ok(live) => services = services.with_weather(live),
            Err(e) => tracing::warn!(error = %e, "Live weather unavailable, using demo data"),
        }
    }

    tracing::debug!(weather = services.weather.name(), "Services configured");
    services
}

/// Bring the app to its initial screen.
///
/// Saved crews and events are loaded and every list view is rendered. The
/// one-time location request starts in the background; its handle is
/// returned so a host can wait for it. Must be called inside a tokio
/// runtime.
pub fn startup(
    app: &AppHandle,
) -> Result<JoinHandle<Result<GeoLocation, CommandError>>, CommandError> {
    tracing::info!("{APP_NAME} initialized");

    let loaded = app.state()?.store.load_all();
    match loaded {
        Ok(()) => {
            let guard = app.state()?;
            tracing::info!(
                crews = guard.store.list_crews().len(),
                events = guard.store.list_events().len(),
                "Saved data loaded"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load saved data");
            app.notifier().error(MSG_LOAD_FAILED);
        }
    }

    for region in [Region::CrewList, Region::EventList, Region::Map] {
        app.refresh(region)?;
    }

    let handle = app.clone();
    Ok(tokio::spawn(async move {
        commands::location::request_location(&handle).await
    }))
}
