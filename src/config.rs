use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::{DEFAULT_TIMEOUT_SECS, NWS_API_BASE, USER_AGENT};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Transport the MCP server is exposed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// MCP streamable HTTP, mounted at `/mcp`
    #[default]
    StreamableHttp,
}

impl FromStr for Transport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "streamable-http" => Ok(Self::StreamableHttp),
            other => anyhow::bail!("unknown transport '{other}', expected 'stdio' or 'http'"),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::StreamableHttp => f.write_str("streamable-http"),
        }
    }
}

/// Server configuration, handed to [`crate::server::serve`] at startup.
///
/// The tools themselves only see `api_base`, `user_agent` and
/// `request_timeout`; the remaining fields belong to the transport.
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
    pub api_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_base: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Socket address the HTTP transport binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid bind host '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// API base without a trailing slash, ready for path concatenation
    pub fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_server() {
        let config = Config::default();
        assert_eq!(config.transport, Transport::StreamableHttp);
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert_eq!(config.api_base(), "https://api.weather.gov");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let config = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        let err = config.bind_addr().unwrap_err();
        assert!(err.to_string().contains("not a host"));
    }

    #[test]
    fn api_base_trims_trailing_slash() {
        let config = Config {
            api_base: "http://127.0.0.1:1234/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_base(), "http://127.0.0.1:1234");
    }

    #[test]
    fn transport_parsing() {
        assert_eq!("stdio".parse::<Transport>().unwrap(), Transport::Stdio);
        assert_eq!("HTTP".parse::<Transport>().unwrap(), Transport::StreamableHttp);
        assert_eq!(
            "streamable-http".parse::<Transport>().unwrap(),
            Transport::StreamableHttp
        );
        assert!("sse".parse::<Transport>().is_err());
    }
}
