//! MCP server exposing US National Weather Service alerts and forecasts.
//!
//! Two tools are registered with the rmcp tool router:
//!
//! - `get_alerts(state)` returns active alerts for a two-letter state code and
//!   never fails; upstream problems degrade to a fixed message.
//! - `get_forecast(latitude, longitude)` resolves the gridpoint for the
//!   coordinates and renders the next five forecast periods. Upstream
//!   failures are reported to the caller as tool errors.

pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod models;
pub mod server;
pub mod service;

pub use config::{Config, Transport};
pub use error::{FetchError, FetchFailure, WeatherError};
pub use service::Weather;
