use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::constants::ALERTS_UNAVAILABLE;
use crate::error::WeatherError;
use crate::fetch::Fetcher;
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{
    AlertCollection, AlertFeature, ForecastResponse, GetAlertsRequest, GetForecastRequest, PointResponse,
};

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    fetcher: Fetcher,
    api_base: String,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            api_base: config.api_base().to_string(),
            tool_router: Self::tool_router(),
        })
    }

    /// Active alerts for a state, rendered as text.
    ///
    /// Never fails: any upstream problem degrades to a fixed message.
    pub async fn alerts(&self, state: &str) -> String {
        let url = format!("{}/alerts/active/area/{}", self.api_base, state);

        let data = match self.fetcher.get_json(&url).await {
            Ok(data) => data,
            Err(_) => return ALERTS_UNAVAILABLE.to_string(),
        };

        // `{}`, `null` and non-object bodies all end up in the fallback arms
        match serde_json::from_value::<AlertCollection>(data) {
            Ok(AlertCollection {
                features: Some(features),
            }) => {
                let features: Vec<AlertFeature> =
                    features.into_iter().map(AlertFeature::from).collect();
                format_alerts(&features)
            }
            Ok(AlertCollection { features: None }) => ALERTS_UNAVAILABLE.to_string(),
            Err(e) => {
                tracing::warn!(state, error = %e, "alerts response has unexpected shape");
                ALERTS_UNAVAILABLE.to_string()
            }
        }
    }

    /// Next forecast periods for a coordinate pair, rendered as text.
    ///
    /// Resolves the gridpoint forecast URL first, then fetches it. Any fetch
    /// failure or missing nested field is returned as an error.
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<String, WeatherError> {
        let points_url = format!("{}/points/{},{}", self.api_base, latitude, longitude);
        let point: PointResponse = decode("points", self.fetcher.get_json(&points_url).await?)?;

        let forecast_url = point.properties.forecast;
        let forecast: ForecastResponse =
            decode("forecast", self.fetcher.get_json(&forecast_url).await?)?;

        Ok(format_forecast(&forecast.properties.periods))
    }
}

fn decode<T: DeserializeOwned>(what: &'static str, data: Value) -> Result<T, WeatherError> {
    serde_json::from_value(data).map_err(|source| WeatherError::UnexpectedShape { what, source })
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts from the US National Weather Service API. \
                Use get_alerts with a two-letter state code, or get_forecast with a \
                latitude and longitude inside the US."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    #[tool(description = "Get weather alerts for a US state. Provide a two-letter state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting alerts for state: {}", request.state);

        let formatted = self.alerts(&request.state).await;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Get weather forecast for a location. Provide latitude and longitude (e.g. latitude: 40.7128, longitude: -74.0060 for New York).")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let formatted = self
            .forecast(request.latitude, request.longitude)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "forecast failed");
                McpError::from(e)
            })?;

        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_reports_what_was_malformed() {
        let err = decode::<PointResponse>("points", json!({ "properties": {} })).unwrap_err();
        match err {
            WeatherError::UnexpectedShape { what, .. } => assert_eq!(what, "points"),
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_router_lists_both_tools() {
        let weather = Weather::new(&Config::default()).unwrap();
        let mut names: Vec<_> = weather
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["get_alerts", "get_forecast"]);
    }

    #[tokio::test]
    async fn get_alerts_tool_returns_text_content() {
        let config = Config {
            api_base: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let weather = Weather::new(&config).unwrap();
        let result = weather
            .get_alerts(Parameters(GetAlertsRequest {
                state: "CA".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
        let text = &result.content[0].as_text().unwrap().text;
        assert_eq!(text, ALERTS_UNAVAILABLE);
    }

    #[tokio::test]
    async fn get_forecast_tool_surfaces_failures_as_errors() {
        let config = Config {
            api_base: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let weather = Weather::new(&config).unwrap();
        let err = weather
            .get_forecast(Parameters(GetForecastRequest {
                latitude: 38.9,
                longitude: -77.0,
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("127.0.0.1:1/points/38.9,-77"));
    }
}
