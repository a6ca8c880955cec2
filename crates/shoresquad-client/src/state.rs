//! Application state shared across all commands.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<>>` inside an [`AppHandle`], which
//! also carries the frontend and the external collaborators. Commands lock
//! the state, do their synchronous work, and release the lock before any
//! `.await`.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;

use shoresquad_shared::constants::{TOAST_DURATION_MS, TOAST_FADE_MS};
use shoresquad_shared::{GeoLocation, WeatherReport};
use shoresquad_store::CommunityStore;

use crate::chrome::{LazyImages, Modal, ModalPurpose, NavMenu};
use crate::error::CommandError;
use crate::events::{emit_event, Frontend, Region, RegionPayload, EVENT_REGION_UPDATED};
use crate::location::{FixedGeolocator, Geolocator};
use crate::notify::Notifier;
use crate::places::{PlacesProvider, SimulatedPlaces};
use crate::render;
use crate::weather::{DemoWeather, WeatherProvider};

/// Central application state.
pub struct AppState {
    /// Crews and events, mirrored to local storage.
    pub store: CommunityStore,

    /// Set at most once per session, by the location request.
    pub location: Option<GeoLocation>,

    /// Whether the one-shot location request has been issued.
    pub location_requested: bool,

    /// Last weather report shown on the weather card.
    pub weather: Option<WeatherReport>,

    pub modal: Modal,
    pub nav: NavMenu,
    pub lazy_images: LazyImages,
}

impl AppState {
    pub fn new(store: CommunityStore) -> Self {
        Self {
            store,
            location: None,
            location_requested: false,
            weather: None,
            modal: Modal::new(),
            nav: NavMenu::default(),
            lazy_images: LazyImages::default(),
        }
    }

    /// Render one region from the current state.
    pub fn render(&self, region: Region) -> String {
        match region {
            Region::CrewList => render::render_crews(self.store.list_crews()),
            Region::EventList => render::render_events(self.store.list_events()),
            Region::Map => render::render_map(self.location.as_ref()),
            Region::WeatherCard => self
                .weather
                .as_ref()
                .map(render::render_weather)
                .unwrap_or_default(),
            Region::ModalForm => match self.modal.purpose() {
                Some(ModalPurpose::CreateCrew) => render::render_crew_form(),
                Some(ModalPurpose::ScheduleEvent) => {
                    render::render_event_form(self.store.list_crews())
                }
                None => String::new(),
            },
        }
    }
}

/// External collaborators the app talks to.
#[derive(Clone)]
pub struct Services {
    pub geolocator: Arc<dyn Geolocator>,
    pub weather: Arc<dyn WeatherProvider>,
    pub places: Arc<dyn PlacesProvider>,
    pub toast_duration: Duration,
    pub toast_fade: Duration,
}

impl Services {
    /// Demo wiring: no geolocation, canned weather, simulated beach search.
    pub fn demo() -> Self {
        Self {
            geolocator: Arc::new(FixedGeolocator::unsupported()),
            weather: Arc::new(DemoWeather),
            places: Arc::new(SimulatedPlaces::default()),
            toast_duration: Duration::from_millis(TOAST_DURATION_MS),
            toast_fade: Duration::from_millis(TOAST_FADE_MS),
        }
    }

    pub fn with_geolocator(mut self, geolocator: impl Geolocator + 'static) -> Self {
        self.geolocator = Arc::new(geolocator);
        self
    }

    pub fn with_weather(mut self, weather: impl WeatherProvider + 'static) -> Self {
        self.weather = Arc::new(weather);
        self
    }

    pub fn with_places(mut self, places: impl PlacesProvider + 'static) -> Self {
        self.places = Arc::new(places);
        self
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::demo()
    }
}

/// Cheap-to-clone handle passed to every command.
#[derive(Clone)]
pub struct AppHandle {
    state: Arc<Mutex<AppState>>,
    frontend: Arc<dyn Frontend>,
    notifier: Notifier,
    services: Services,
}

impl AppHandle {
    pub fn new(state: AppState, frontend: Arc<dyn Frontend>, services: Services) -> Self {
        let notifier = Notifier::with_timing(
            frontend.clone(),
            services.toast_duration,
            services.toast_fade,
        );
        Self {
            state: Arc::new(Mutex::new(state)),
            frontend,
            notifier,
            services,
        }
    }

    pub fn state(&self) -> Result<MutexGuard<'_, AppState>, CommandError> {
        self.state.lock().map_err(|e| {
            tracing::error!(error = %e, "Lock poisoned");
            CommandError::LockPoisoned
        })
    }

    pub fn frontend(&self) -> &dyn Frontend {
        self.frontend.as_ref()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn emit<S: Serialize>(&self, event: &str, payload: S) {
        emit_event(self.frontend(), event, payload);
    }

    /// Send already-rendered markup for `region` to the frontend.
    pub fn emit_region(&self, region: Region, html: String) {
        self.emit(
            EVENT_REGION_UPDATED,
            RegionPayload {
                region,
                element_id: region.element_id(),
                html,
            },
        );
    }

    /// Re-render `region` from the current state and send it.
    pub fn refresh(&self, region: Region) -> Result<(), CommandError> {
        let html = self.state()?.render(region);
        self.emit_region(region, html);
        Ok(())
    }
}
