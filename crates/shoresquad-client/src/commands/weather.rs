use tracing::{error, info, warn};

use shoresquad_shared::WeatherReport;

use crate::error::CommandError;
use crate::events::Region;
use crate::state::AppHandle;

pub const MSG_NEED_LOCATION: &str = "Enable location to fetch weather";
pub const MSG_WEATHER_FETCHED: &str = "Weather fetched! ☀️";
pub const MSG_WEATHER_FAILED: &str = "Could not fetch weather";

/// Fetch the weather for the session location and show it on the card.
///
/// Without a location nothing is requested. A provider failure leaves the
/// card as it was.
pub async fn fetch_weather(app: &AppHandle) -> Result<WeatherReport, CommandError> {
    let location = app.state()?.location;
    let Some(location) = location else {
        warn!("weather requested without a location");
        app.notifier().warning(MSG_NEED_LOCATION);
        return Err(CommandError::NoLocation);
    };

    let provider = app.services().weather.clone();
    let report = match provider.fetch(&location).await {
        Ok(report) => report,
        Err(e) => {
            error!(provider = provider.name(), error = %e, "weather fetch failed");
            app.notifier().error(MSG_WEATHER_FAILED);
            return Err(e.into());
        }
    };

    let html = {
        let mut guard = app.state()?;
        guard.weather = Some(report.clone());
        guard.render(Region::WeatherCard)
    };
    app.emit_region(Region::WeatherCard, html);
    app.notifier().success(MSG_WEATHER_FETCHED);

    info!(
        provider = provider.name(),
        temp = report.temperature_c,
        condition = %report.condition,
        "Weather data"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::future::BoxFuture;
    use shoresquad_shared::GeoLocation;
    use shoresquad_store::{CommunityStore, Persistence};

    use super::*;
    use crate::events::RecordingFrontend;
    use crate::state::{AppState, Services};
    use crate::weather::{WeatherError, WeatherProvider};

    struct DownWeather;

    impl WeatherProvider for DownWeather {
        fn name(&self) -> &'static str {
            "down"
        }

        fn fetch<'a>(
            &'a self,
            _location: &'a GeoLocation,
        ) -> BoxFuture<'a, Result<WeatherReport, WeatherError>> {
            Box::pin(async { Err(WeatherError::Status(503)) })
        }
    }

    fn app(services: Services, located: bool) -> (Arc<RecordingFrontend>, AppHandle) {
        let frontend = Arc::new(RecordingFrontend::new());
        let store = CommunityStore::new(Persistence::in_memory(), "Beach Warrior");
        let mut state = AppState::new(store);
        if located {
            state.location = Some(GeoLocation::new(1.3, 103.9, 10.0));
        }
        let app = AppHandle::new(state, frontend.clone(), services);
        (frontend, app)
    }

    #[tokio::test]
    async fn demo_weather_fills_the_card() {
        let (frontend, app) = app(Services::demo(), true);

        let report = fetch_weather(&app).await.unwrap();
        assert_eq!(report, WeatherReport::demo());

        let card = frontend.last_region(Region::WeatherCard).unwrap();
        assert!(card.contains("28°C"));
        assert!(card.contains("Sunny"));
        assert!(card.contains("65%"));
        assert!(card.contains("12 km/h"));
        assert_eq!(
            frontend.toasts(),
            vec![("success".to_string(), MSG_WEATHER_FETCHED.to_string())]
        );
    }

    #[tokio::test]
    async fn no_location_warns_without_fetching() {
        let (frontend, app) = app(Services::demo(), false);

        assert!(matches!(
            fetch_weather(&app).await,
            Err(CommandError::NoLocation)
        ));
        assert_eq!(frontend.last_region(Region::WeatherCard), None);
        assert_eq!(frontend.toasts()[0].0, "warning");
    }

    #[tokio::test]
    async fn provider_failure_keeps_previous_card() {
        let (frontend, app) = app(Services::demo().with_weather(DownWeather), true);
        app.state().unwrap().weather = Some(WeatherReport::demo());

        assert!(matches!(
            fetch_weather(&app).await,
            Err(CommandError::Weather(WeatherError::Status(503)))
        ));
        assert_eq!(app.state().unwrap().weather, Some(WeatherReport::demo()));
        assert_eq!(frontend.last_region(Region::WeatherCard), None);
        assert_eq!(
            frontend.toasts(),
            vec![("error".to_string(), MSG_WEATHER_FAILED.to_string())]
        );
    }
}
