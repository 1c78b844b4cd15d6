/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("nws-weather-mcp/", env!("CARGO_PKG_VERSION"));

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Media type requested from the NWS API
pub const GEO_JSON: &str = "application/geo+json";

/// Upper bound on a single outbound request, connect through body
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of forecast periods rendered by `get_forecast`
pub const MAX_FORECAST_PERIODS: usize = 5;

pub const UNKNOWN: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_INSTRUCTIONS: &str = "No specific instructions provided";

pub const ALERTS_UNAVAILABLE: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";

pub const ALERT_SEPARATOR: &str = "\n---\n";
pub const PERIOD_SEPARATOR: &str = "\n---\n\n";
