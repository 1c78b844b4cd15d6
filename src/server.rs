use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::ServiceExt;
use tokio::net::TcpListener;

use crate::config::{Config, Transport};
use crate::service::Weather;

/// Runs the weather tools over the configured transport until shutdown
pub async fn serve(weather: Weather, config: &Config) -> Result<()> {
    tracing::info!(transport = %config.transport, "Starting MCP weather server");

    match config.transport {
        Transport::Stdio => serve_stdio(weather).await,
        Transport::StreamableHttp => serve_http(weather, config).await,
    }
}

async fn serve_stdio(weather: Weather) -> Result<()> {
    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;
    Ok(())
}

async fn serve_http(weather: Weather, config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("MCP endpoint listening on http://{}/mcp", listener.local_addr()?);

    axum::serve(listener, router(weather))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

/// HTTP routes: the MCP streamable endpoint at `/mcp` and `/health`
pub fn router(weather: Weather) -> Router {
    let service = StreamableHttpService::new(
        move || Ok(weather.clone()),
        Arc::new(LocalSessionManager::default()),
        Default::default(),
    );

    Router::new()
        .nest_service("/mcp", service)
        .route("/health", axum::routing::get(health_check))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_endpoint() {
        assert_eq!(health_check().await, "OK");
    }

    #[tokio::test]
    async fn health_route_is_served() {
        let weather = Weather::new(&Config::default()).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router(weather)).await.unwrap();
        });

        let body = reqwest::get(format!("http://{}/health", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "OK");

        handle.abort();
    }
}
