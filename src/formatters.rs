use crate::constants::{ALERT_SEPARATOR, MAX_FORECAST_PERIODS, NO_ACTIVE_ALERTS, PERIOD_SEPARATOR};
use crate::models::{AlertFeature, AlertProperties, ForecastPeriod};

/// Formats a single alert as a labelled block
pub fn format_alert(props: &AlertProperties) -> String {
    format!(
        "\nEvent: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}\n",
        props.event(),
        props.area(),
        props.severity(),
        props.description(),
        props.instructions()
    )
}

/// Formats weather alerts into a human-readable string
pub fn format_alerts(features: &[AlertFeature]) -> String {
    if features.is_empty() {
        return NO_ACTIVE_ALERTS.to_string();
    }

    features
        .iter()
        .map(|feature| format_alert(&feature.properties))
        .collect::<Vec<_>>()
        .join(ALERT_SEPARATOR)
}

/// Formats one forecast period
pub fn format_period(period: &ForecastPeriod) -> String {
    format!(
        "{}:\nTemperature: {}\u{00b0}F\nWind: {} {}\nForecast: {}\n",
        period.name,
        period.temperature,
        period.wind_speed,
        period.wind_direction,
        period.detailed_forecast
    )
}

/// Formats the leading forecast periods into a human-readable string
pub fn format_forecast(periods: &[ForecastPeriod]) -> String {
    periods
        .iter()
        .take(MAX_FORECAST_PERIODS)
        .map(format_period)
        .collect::<Vec<_>>()
        .join(PERIOD_SEPARATOR)
}
