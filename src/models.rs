use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{NO_DESCRIPTION, NO_INSTRUCTIONS, UNKNOWN};

// ============================================================================
// Alerts (/alerts/active/area/{state})
// ============================================================================

/// GeoJSON feature collection of active alerts.
///
/// `features` stays optional so a document without it can be told apart
/// from one with an empty list. Elements are kept raw and decoded one at a
/// time, so a malformed feature never hides its neighbours.
#[derive(Debug, Deserialize)]
pub struct AlertCollection {
    pub features: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default, deserialize_with = "properties_or_default")]
    pub properties: AlertProperties,
}

impl From<Value> for AlertFeature {
    /// Anything that is not a feature object renders as all fallbacks
    fn from(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Alert attributes. Every field is optional; absent or `null` values are
/// rendered with the fallback returned by the matching accessor. Non-string
/// scalars are kept in their JSON text form.
#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    #[serde(default, deserialize_with = "lenient_text")]
    pub event: Option<String>,
    #[serde(rename = "areaDesc", default, deserialize_with = "lenient_text")]
    pub area_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub instruction: Option<String>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// `null` or a non-object `properties` value is treated as missing
fn properties_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<AlertProperties, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl AlertProperties {
    /// Falls back to `"Unknown"`
    pub fn event(&self) -> &str {
        self.event.as_deref().unwrap_or(UNKNOWN)
    }

    /// Falls back to `"Unknown"`
    pub fn area(&self) -> &str {
        self.area_desc.as_deref().unwrap_or(UNKNOWN)
    }

    /// Falls back to `"Unknown"`
    pub fn severity(&self) -> &str {
        self.severity.as_deref().unwrap_or(UNKNOWN)
    }

    /// Falls back to `"No description available"`
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// Falls back to `"No specific instructions provided"`
    pub fn instructions(&self) -> &str {
        self.instruction.as_deref().unwrap_or(NO_INSTRUCTIONS)
    }
}

// ============================================================================
// Forecast (/points/{lat},{lon} -> properties.forecast)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PointResponse {
    pub properties: PointProperties,
}

#[derive(Debug, Deserialize)]
pub struct PointProperties {
    /// Absolute URL of the gridpoint forecast
    pub forecast: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: serde_json::Number,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    #[serde(rename = "windDirection")]
    pub wind_direction: String,
    #[serde(rename = "detailedForecast")]
    pub detailed_forecast: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter US state code (e.g. CA, NY)
    pub state: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    pub latitude: f64,
    /// Longitude of the location
    pub longitude: f64,
}
