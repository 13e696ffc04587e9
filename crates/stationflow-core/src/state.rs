use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use stationflow_events::{Event, SampleReading};

/// The temperature extremes observed for one station in the current
/// accumulation epoch. Invariant: `high >= low`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationRange {
    pub high: f64,
    pub low: f64,
}

impl StationRange {
    pub fn new(temperature: f64) -> Self {
        Self {
            high: temperature,
            low: temperature,
        }
    }

    /// Widen the range to include `temperature`. Strict comparisons: a
    /// reading equal to an existing bound changes nothing.
    pub fn widen(&mut self, temperature: f64) {
        if temperature > self.high {
            self.high = temperature;
        }
        if temperature < self.low {
            self.low = temperature;
        }
    }
}

/// Accumulated state for one processing run: per-station temperature ranges
/// for the current epoch, plus the most recent sample timestamp seen.
///
/// Owned exclusively by one [`EventStream`](crate::EventStream); never
/// shared across runs or threads, never persisted.
#[derive(Debug, Clone, Default)]
pub struct ProcessorState {
    stations: BTreeMap<String, StationRange>,
    last_timestamp: Option<i64>,
}

impl ProcessorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stations(&self) -> &BTreeMap<String, StationRange> {
        &self.stations
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    /// Fold one sample into the state. The timestamp is recorded whenever
    /// present, even when the reading is too incomplete to update a range.
    pub fn observe(&mut self, reading: &SampleReading) {
        if let Some(timestamp) = reading.timestamp {
            self.last_timestamp = Some(timestamp);
        }
        if let (Some(station), Some(temperature)) = (reading.station(), reading.temperature) {
            self.stations
                .entry(station.to_owned())
                .and_modify(|range| range.widen(temperature))
                .or_insert_with(|| StationRange::new(temperature));
        }
    }

    /// Synthesize a snapshot record, or `None` when there is nothing to
    /// report: both accumulated stations and a timestamp are required. The
    /// returned record is a point-in-time copy; later accumulation does not
    /// touch it.
    pub fn snapshot(&self) -> Option<Event> {
        let as_of = self.last_timestamp?;
        if self.stations.is_empty() {
            return None;
        }

        let stations: Map<String, Value> = self
            .stations
            .iter()
            .map(|(name, range)| (name.clone(), json!({ "high": range.high, "low": range.low })))
            .collect();

        let mut record = Event::new();
        record.insert("type".to_owned(), Value::from("snapshot"));
        record.insert("asOf".to_owned(), Value::from(as_of));
        record.insert("stations".to_owned(), Value::Object(stations));
        Some(record)
    }

    /// Start a new accumulation epoch and synthesize the reset confirmation.
    /// The last seen timestamp survives the reset; with none seen yet the
    /// confirmation reports `asOf: 0`.
    pub fn reset(&mut self) -> Event {
        let as_of = self.last_timestamp.unwrap_or(0);
        self.stations.clear();

        let mut record = Event::new();
        record.insert("type".to_owned(), Value::from("reset"));
        record.insert("asOf".to_owned(), Value::from(as_of));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(station: &str, temperature: f64, timestamp: i64) -> SampleReading {
        SampleReading {
            station_name: Some(station.to_owned()),
            temperature: Some(temperature),
            timestamp: Some(timestamp),
        }
    }

    #[test]
    fn widen_only_moves_past_the_bounds() {
        let mut range = StationRange::new(20.0);
        range.widen(25.0);
        assert_eq!(range, StationRange { high: 25.0, low: 20.0 });

        range.widen(25.0);
        range.widen(20.0);
        assert_eq!(range, StationRange { high: 25.0, low: 20.0 });

        range.widen(-3.5);
        assert_eq!(range, StationRange { high: 25.0, low: -3.5 });
    }

    #[test]
    fn observe_records_timestamp_even_for_invalid_readings() {
        let mut state = ProcessorState::new();
        state.observe(&SampleReading {
            station_name: None,
            temperature: Some(25.0),
            timestamp: Some(1000),
        });

        assert_eq!(state.last_timestamp(), Some(1000));
        assert!(state.stations().is_empty());
    }

    #[test]
    fn observe_ignores_empty_station_names_and_missing_temperatures() {
        let mut state = ProcessorState::new();
        state.observe(&SampleReading {
            station_name: Some(String::new()),
            temperature: Some(25.0),
            timestamp: None,
        });
        state.observe(&SampleReading {
            station_name: Some("Station1".to_owned()),
            temperature: None,
            timestamp: None,
        });

        assert!(state.stations().is_empty());
        assert_eq!(state.last_timestamp(), None);
    }

    #[test]
    fn snapshot_requires_stations_and_timestamp() {
        let mut state = ProcessorState::new();
        assert!(state.snapshot().is_none());

        // Timestamp but no stations.
        state.observe(&SampleReading {
            station_name: None,
            temperature: None,
            timestamp: Some(1000),
        });
        assert!(state.snapshot().is_none());

        // Stations but no timestamp.
        let mut state = ProcessorState::new();
        state.observe(&SampleReading {
            station_name: Some("Station1".to_owned()),
            temperature: Some(25.0),
            timestamp: None,
        });
        assert!(state.snapshot().is_none());

        state.observe(&reading("Station1", 30.0, 1000));
        assert!(state.snapshot().is_some());
    }

    #[test]
    fn reset_clears_stations_but_keeps_the_timestamp() {
        let mut state = ProcessorState::new();
        state.observe(&reading("Station1", 25.0, 1000));

        let confirmation = state.reset();
        assert_eq!(confirmation.get("asOf"), Some(&serde_json::json!(1000)));
        assert!(state.stations().is_empty());
        assert_eq!(state.last_timestamp(), Some(1000));
    }

    #[test]
    fn reset_without_timestamp_reports_zero() {
        let mut state = ProcessorState::new();
        let confirmation = state.reset();
        assert_eq!(confirmation.get("asOf"), Some(&serde_json::json!(0)));
    }
}
