//! Client configuration loaded from environment variables.
//!
//! Every setting has a default, so the host starts with no configuration
//! at all: demo weather, no device location, storage in the platform data
//! directory.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use shoresquad_shared::constants::{DEFAULT_USER_NAME, TOAST_DURATION_MS};
use shoresquad_shared::GeoLocation;

use crate::weather::DEFAULT_WEATHER_API_URL;

pub const DEFAULT_WEATHER_TIMEOUT_MS: u64 = 10_000;

/// Accuracy reported for a configured position when none is given.
pub const DEFAULT_ACCURACY_M: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Name recorded as the first member of new crews and events.
    /// Env: `SHORESQUAD_USER_NAME`
    /// Default: `"Beach Warrior"`
    pub user_name: String,

    /// SQLite file backing local storage.
    /// Env: `SHORESQUAD_DB_PATH`
    /// Default: `shoresquad.db` in the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory; nothing survives a restart.
    /// Env: `SHORESQUAD_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// Position the geolocator reports. Unset means the device has no
    /// location support.
    /// Env: `SHORESQUAD_LATITUDE`, `SHORESQUAD_LONGITUDE`, `SHORESQUAD_ACCURACY`
    pub location: Option<GeoLocation>,

    /// Enables the live weather provider.
    /// Env: `WEATHER_API_KEY`
    pub weather_api_key: Option<String>,

    /// Env: `WEATHER_API_URL`
    pub weather_api_url: String,

    /// Env: `WEATHER_TIMEOUT_MS`
    /// Default: `10000`
    pub weather_timeout_ms: u64,

    /// How long a toast stays fully visible.
    /// Env: `TOAST_DURATION_MS`
    /// Default: `3000`
    pub toast_duration_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            db_path: None,
            in_memory: false,
            location: None,
            weather_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            weather_timeout_ms: DEFAULT_WEATHER_TIMEOUT_MS,
            toast_duration_ms: TOAST_DURATION_MS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = var("SHORESQUAD_USER_NAME") {
            let name = name.trim();
            if name.is_empty() {
                warn!("Empty SHORESQUAD_USER_NAME, using default");
            } else {
                config.user_name = name.to_string();
            }
        }

        if let Some(path) = var("SHORESQUAD_DB_PATH") {
            if !path.is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = var("SHORESQUAD_IN_MEMORY") {
            config.in_memory = val == "true" || val == "1";
        }

        config.location = location_from_vars(&var);

        if let Some(key) = var("WEATHER_API_KEY") {
            if !key.is_empty() {
                config.weather_api_key = Some(key);
            }
        }

        if let Some(url) = var("WEATHER_API_URL") {
            if !url.is_empty() {
                config.weather_api_url = url;
            }
        }

        if let Some(ms) = parse_var::<u64>(&var, "WEATHER_TIMEOUT_MS") {
            config.weather_timeout_ms = ms;
        }

        if let Some(ms) = parse_var::<u64>(&var, "TOAST_DURATION_MS") {
            config.toast_duration_ms = ms;
        }

        config
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_millis(self.weather_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

fn parse_var<T: FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = var(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(value = %raw, "Invalid {name}, using default");
            None
        }
    }
}

fn location_from_vars(var: &impl Fn(&str) -> Option<String>) -> Option<GeoLocation> {
    let lat = parse_var::<f64>(var, "SHORESQUAD_LATITUDE");
    let lng = parse_var::<f64>(var, "SHORESQUAD_LONGITUDE");
    let accuracy = parse_var::<f64>(var, "SHORESQUAD_ACCURACY").unwrap_or(DEFAULT_ACCURACY_M);

    match (lat, lng) {
        (Some(lat), Some(lng)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) => {
            Some(GeoLocation::new(lat, lng, accuracy))
        }
        (None, None) => None,
        _ => {
            warn!("Incomplete or out-of-range location, device location disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn no_vars_gives_defaults() {
        assert_eq!(from(&[]), ClientConfig::default());
        let config = ClientConfig::default();
        assert_eq!(config.user_name, "Beach Warrior");
        assert_eq!(config.toast_duration(), Duration::from_secs(3));
        assert!(config.location.is_none());
        assert!(config.weather_api_key.is_none());
    }

    #[test]
    fn overrides_apply() {
        let config = from(&[
            ("SHORESQUAD_USER_NAME", " Shelly "),
            ("SHORESQUAD_DB_PATH", "/tmp/squad.db"),
            ("SHORESQUAD_IN_MEMORY", "true"),
            ("WEATHER_API_KEY", "abc"),
            ("WEATHER_TIMEOUT_MS", "2500"),
            ("TOAST_DURATION_MS", "1000"),
        ]);
        assert_eq!(config.user_name, "Shelly");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/squad.db")));
        assert!(config.in_memory);
        assert_eq!(config.weather_api_key.as_deref(), Some("abc"));
        assert_eq!(config.weather_timeout(), Duration::from_millis(2500));
        assert_eq!(config.toast_duration_ms, 1000);
    }

    #[test]
    fn invalid_numbers_keep_defaults() {
        let config = from(&[("TOAST_DURATION_MS", "soon"), ("WEATHER_TIMEOUT_MS", "-1")]);
        assert_eq!(config.toast_duration_ms, TOAST_DURATION_MS);
        assert_eq!(config.weather_timeout_ms, DEFAULT_WEATHER_TIMEOUT_MS);
    }

    #[test]
    fn location_needs_both_coordinates() {
        let config = from(&[
            ("SHORESQUAD_LATITUDE", "1.3048"),
            ("SHORESQUAD_LONGITUDE", "103.9318"),
        ]);
        assert_eq!(
            config.location,
            Some(GeoLocation::new(1.3048, 103.9318, DEFAULT_ACCURACY_M))
        );

        assert!(from(&[("SHORESQUAD_LATITUDE", "1.3")]).location.is_none());
        assert!(from(&[
            ("SHORESQUAD_LATITUDE", "91"),
            ("SHORESQUAD_LONGITUDE", "0")
        ])
        .location
        .is_none());
    }
}
