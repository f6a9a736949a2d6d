use chrono::{DateTime, Local, NaiveDate, TimeZone};
use common::models::{HistoryRecord, Reading, Stats, round1};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-city, day-scoped retention of temperature readings.
///
/// Invariants held after every [`merge`]: within one city, timestamps are
/// unique and ascending, and every record falls on the same local calendar
/// day as the `now` passed to the last merge. Records from a previous day
/// linger until the next merge purges them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct History(HashMap<String, Vec<HistoryRecord>>);

impl History {
    pub fn records(&self, city: &str) -> Option<&[HistoryRecord]> {
        self.0.get(city).map(|r| r.as_slice())
    }
}

/// Merge freshly fetched readings into a history.
///
/// Copy-on-write: the input is left untouched and a new value is returned,
/// so callers may keep references to the prior state. Re-merging a reading
/// whose timestamp is already recorded for its city is a no-op, and the
/// result does not depend on how readings are batched across calls.
///
/// `now` is an explicit parameter rather than a clock read, so the
/// day-boundary purge is deterministic under test.
pub fn merge(history: &History, readings: &[Reading], now: DateTime<Local>) -> History {
    let mut merged = history.clone();
    let today = now.date_naive();

    for reading in readings {
        let records = merged.0.entry(reading.city.clone()).or_default();

        if !records.iter().any(|r| r.timestamp == reading.timestamp) {
            records.push(HistoryRecord {
                temperature: reading.temperature,
                timestamp: reading.timestamp,
            });
        }

        records.retain(|r| local_day(r.timestamp) == Some(today));
        records.sort_by_key(|r| r.timestamp);
    }

    merged
}

/// Intraday statistics for one city.
///
/// Falls back to a single-point stat from `current` when the city has no
/// history, and to the zero stat when there is no current reading either.
pub fn stats(history: &History, city: &str, current: Option<&Reading>) -> Stats {
    match history.records(city) {
        Some(records) if !records.is_empty() => {
            let sum: f64 = records.iter().map(|r| r.temperature).sum();
            let max = records
                .iter()
                .map(|r| r.temperature)
                .fold(f64::NEG_INFINITY, f64::max);
            let min = records
                .iter()
                .map(|r| r.temperature)
                .fold(f64::INFINITY, f64::min);

            Stats {
                average: round1(sum / records.len() as f64),
                max: round1(max),
                min: round1(min),
                count: records.len(),
            }
        }
        _ => match current {
            Some(reading) => Stats::single(reading.temperature),
            None => Stats::zero(),
        },
    }
}

fn local_day(timestamp: i64) -> Option<NaiveDate> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.date_naive())
}
