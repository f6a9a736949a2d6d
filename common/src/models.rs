use serde::{Deserialize, Serialize};

/// One city's weather observation at a point in time.
///
/// Temperatures are rounded to one decimal place when the reading is
/// constructed, so every downstream consumer sees the same value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reading {
    pub city: String,
    pub condition: String,
    pub temperature: f64,
    pub feels_like: f64,
    /// Source-provided observation time, seconds since epoch.
    pub timestamp: i64,
}

/// The subset of a [`Reading`] retained for intraday trends.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryRecord {
    pub temperature: f64,
    pub timestamp: i64,
}

/// Derived intraday statistics for one city.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Stats {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

impl Stats {
    /// Stats for a city with no history and no current reading.
    pub fn zero() -> Self {
        Self {
            average: 0.0,
            max: 0.0,
            min: 0.0,
            count: 0,
        }
    }

    /// Single-point stats derived from one current reading.
    pub fn single(temperature: f64) -> Self {
        Self {
            average: temperature,
            max: temperature,
            min: temperature,
            count: 1,
        }
    }
}

/// Round a temperature to one decimal place.
///
/// All displayed temperatures and derived stats go through this at the point
/// of computation, so repeated reads of unchanged state are bit-identical.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(28.04), 28.0);
        assert_eq!(round1(28.05), 28.1);
        assert_eq!(round1(-3.25), -3.3);
        assert_eq!(round1(31.5), 31.5);
    }

    #[test]
    fn round1_is_stable_under_repetition() {
        let once = round1(27.333333);
        assert_eq!(round1(once), once);
    }
}
