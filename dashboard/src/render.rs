use crate::history::{History, stats};
use chrono::{Local, TimeZone};
use common::errors::AppError;
use common::models::Reading;
use std::fmt::Write;

/// Plain-text dashboard: one card per city in the configured order.
pub fn render_dashboard(readings: &[Reading], history: &History) -> String {
    let mut out = String::new();

    for reading in readings {
        let city_stats = stats(history, &reading.city, Some(reading));

        let _ = writeln!(
            out,
            "{} {} {}",
            reading.city,
            condition_glyph(&reading.condition),
            reading.condition
        );
        let _ = writeln!(
            out,
            "  {:.1}°C (feels like {:.1}°C)",
            reading.temperature, reading.feels_like
        );
        let _ = writeln!(
            out,
            "  avg {:.1}°C  max {:.1}°C  min {:.1}°C  ({} readings today)",
            city_stats.average, city_stats.max, city_stats.min, city_stats.count
        );
        let _ = writeln!(out, "  last updated {}", format_local_time(reading.timestamp));
        let _ = writeln!(out);
    }

    out
}

/// Shown in place of the dashboard when a fetch cycle fails; the previously
/// rendered readings stay on screen until the next successful cycle.
pub fn render_error(error: &AppError) -> String {
    format!("Weather update failed: {}\n", error)
}

fn format_local_time(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

fn condition_glyph(condition: &str) -> &'static str {
    match condition.to_lowercase().as_str() {
        "clear" => "☀",
        "rain" => "☔",
        "snow" => "❄",
        _ => "🌬",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::merge;
    use chrono::Local;

    #[test]
    fn dashboard_card_shows_reading_and_stats() {
        let now = Local::now();
        let reading = Reading {
            city: "Chennai".to_string(),
            condition: "Clear".to_string(),
            temperature: 31.5,
            feels_like: 34.0,
            timestamp: now.timestamp(),
        };
        let history = merge(&History::default(), &[reading.clone()], now);

        let rendered = render_dashboard(&[reading], &history);

        assert!(rendered.contains("Chennai ☀ Clear"));
        assert!(rendered.contains("31.5°C (feels like 34.0°C)"));
        assert!(rendered.contains("avg 31.5°C  max 31.5°C  min 31.5°C  (1 readings today)"));
    }

    #[test]
    fn unmapped_conditions_get_the_wind_glyph() {
        assert_eq!(condition_glyph("Haze"), "🌬");
        assert_eq!(condition_glyph("rain"), "☔");
    }
}
