use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use nws_weather_mcp::{constants, server, Config, Transport, Weather};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// MCP server for National Weather Service alerts and forecasts
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Transport to serve on: `http` (streamable HTTP) or `stdio`
    #[arg(long, env = "WEATHER_TRANSPORT", default_value = "http")]
    transport: Transport,

    /// Address to bind the HTTP transport to
    #[arg(long, env = "WEATHER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP transport
    #[arg(long, env = "WEATHER_PORT", default_value_t = 8000)]
    port: u16,

    /// Base URL of the NWS API
    #[arg(long, env = "NWS_API_BASE", default_value = constants::NWS_API_BASE)]
    api_base: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "WEATHER_TIMEOUT_SECS", default_value_t = constants::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "WEATHER_LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            transport: self.transport,
            host: self.host,
            port: self.port,
            api_base: self.api_base,
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stderr keeps stdout free for the stdio transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.into_config();
    let weather = Weather::new(&config)?;
    server::serve(weather, &config).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
