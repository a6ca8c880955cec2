/// Application name
pub const APP_NAME: &str = "ShoreSquad";

/// Display name used when no user name is configured
pub const DEFAULT_USER_NAME: &str = "Beach Warrior";

/// Storage key holding the JSON-encoded crew list
pub const CREWS_KEY: &str = "shoresquad_crews";

/// Storage key holding the JSON-encoded event list
pub const EVENTS_KEY: &str = "shoresquad_events";

/// How long a toast stays fully visible, in milliseconds
pub const TOAST_DURATION_MS: u64 = 3_000;

/// Length of the toast fade-out transition, in milliseconds
pub const TOAST_FADE_MS: u64 = 300;

/// Simulated latency of the nearby-beach search, in milliseconds
pub const BEACH_SEARCH_DELAY_MS: u64 = 1_500;

/// Number of beaches the simulated search reports
pub const BEACH_SEARCH_RESULT_COUNT: usize = 5;

/// Demo weather payload, also used as per-field fallbacks for live data
pub const DEMO_TEMPERATURE_C: f64 = 28.0;
pub const DEMO_CONDITION: &str = "Sunny";
pub const DEMO_HUMIDITY_PCT: u8 = 65;
pub const DEMO_WIND_SPEED_KMH: f64 = 12.0;

/// Decimal places used when displaying coordinates
pub const COORDINATE_PRECISION: usize = 4;
