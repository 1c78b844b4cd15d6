use std::fmt;

use reqwest::StatusCode;
use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Why an outbound request produced no usable document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    Network,
    Timeout,
    HttpStatus,
    Decode,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::HttpStatus => "http-status",
            Self::Decode => "decode",
        };
        f.write_str(tag)
    }
}

/// Failed fetch from the upstream API
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed with status: {status}")]
    Status { url: String, status: StatusCode },

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Classifies a reqwest error raised while sending or reading a body
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            Self::Timeout { url, source }
        } else if source.is_decode() {
            Self::Decode { url, source }
        } else {
            Self::Network { url, source }
        }
    }

    pub fn kind(&self) -> FetchFailure {
        match self {
            Self::Timeout { .. } => FetchFailure::Timeout,
            Self::Network { .. } => FetchFailure::Network,
            Self::Status { .. } => FetchFailure::HttpStatus,
            Self::Decode { .. } => FetchFailure::Decode,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Network { url, .. }
            | Self::Status { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }
}

/// Failure of a weather tool operation
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected {what} response: {source}")]
    UnexpectedShape {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<WeatherError> for McpError {
    fn from(err: WeatherError) -> Self {
        McpError::internal_error(err.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_tags() {
        assert_eq!(FetchFailure::Network.to_string(), "network");
        assert_eq!(FetchFailure::Timeout.to_string(), "timeout");
        assert_eq!(FetchFailure::HttpStatus.to_string(), "http-status");
        assert_eq!(FetchFailure::Decode.to_string(), "decode");
    }

    #[test]
    fn status_error_reports_url_and_kind() {
        let err = FetchError::Status {
            url: "https://api.weather.gov/points/0,0".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.kind(), FetchFailure::HttpStatus);
        assert_eq!(err.url(), "https://api.weather.gov/points/0,0");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn shape_error_becomes_internal_mcp_error() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let err = WeatherError::UnexpectedShape {
            what: "points",
            source,
        };
        let mcp: McpError = err.into();
        assert_eq!(mcp.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(mcp.message.starts_with("unexpected points response"));
    }
}
