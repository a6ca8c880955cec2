//! Weather providers.
//!
//! [`DemoWeather`] returns a fixed payload and is what the app uses unless a
//! weather API key is configured. [`OpenWeatherMap`] calls the live API and
//! normalizes its response field by field, falling back to the demo value
//! for anything missing.

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use shoresquad_shared::constants::{
    DEMO_CONDITION, DEMO_HUMIDITY_PCT, DEMO_TEMPERATURE_C, DEMO_WIND_SPEED_KMH,
};
use shoresquad_shared::{GeoLocation, WeatherReport};

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather service responded {0}")]
    Status(u16),

    #[error("Invalid response from weather service: {0}")]
    InvalidResponse(String),
}

pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch<'a>(&'a self, location: &'a GeoLocation) -> BoxFuture<'a, Result<WeatherReport, WeatherError>>;
}

// ============================================================================
// Demo
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoWeather;

impl WeatherProvider for DemoWeather {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn fetch<'a>(&'a self, _location: &'a GeoLocation) -> BoxFuture<'a, Result<WeatherReport, WeatherError>> {
        Box::pin(async { Ok(WeatherReport::demo()) })
    }
}

// ============================================================================
// Live
// ============================================================================

/// Accepts both the flat demo shape and the provider's nested shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeather {
    temp: Option<f64>,
    condition: Option<String>,
    humidity: Option<f64>,
    /// km/h
    wind_speed: Option<f64>,
    main: Option<RawMain>,
    weather: Option<Vec<RawCondition>>,
    wind: Option<RawWind>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    main: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWind {
    /// m/s with metric units
    speed: Option<f64>,
}

impl From<RawWeather> for WeatherReport {
    fn from(raw: RawWeather) -> Self {
        let main = raw.main.unwrap_or_default();

        let temperature_c = raw.temp.or(main.temp).unwrap_or(DEMO_TEMPERATURE_C);

        let condition = raw
            .condition
            .or_else(|| {
                raw.weather
                    .unwrap_or_default()
                    .into_iter()
                    .next()
                    .and_then(|c| c.main)
            })
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEMO_CONDITION.to_string());

        let humidity_pct = raw
            .humidity
            .or(main.humidity)
            .map(|h| h.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(DEMO_HUMIDITY_PCT);

        let wind_speed_kmh = raw
            .wind_speed
            .or_else(|| raw.wind.and_then(|w| w.speed).map(|ms| ms * 3.6))
            .unwrap_or(DEMO_WIND_SPEED_KMH);

        Self {
            temperature_c,
            condition,
            humidity_pct,
            wind_speed_kmh,
        }
    }
}

/// Normalize a weather response body.
pub fn parse_weather(body: &str) -> Result<WeatherReport, WeatherError> {
    let raw: RawWeather =
        serde_json::from_str(body).map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
    Ok(raw.into())
}

pub struct OpenWeatherMap {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherMap {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn request(&self, location: &GeoLocation) -> RequestBuilder {
        self.client
            .get(self.base_url.trim_end_matches('/'))
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
    }
}

impl WeatherProvider for OpenWeatherMap {
    fn name(&self) -> &'static str {
        "openweathermap"
    }

    fn fetch<'a>(&'a self, location: &'a GeoLocation) -> BoxFuture<'a, Result<WeatherReport, WeatherError>> {
        Box::pin(async move {
            debug!(lat = location.latitude, lon = location.longitude, "requesting live weather");

            let resp = self.request(location).send().await?;
            let status = resp.status();
            if !status.is_success() {
                warn!(status = status.as_u16(), "weather service error");
                return Err(WeatherError::Status(status.as_u16()));
            }

            let body = resp.text().await?;
            parse_weather(&body)
        })
    }
}

impl std::fmt::Debug for OpenWeatherMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMap")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
