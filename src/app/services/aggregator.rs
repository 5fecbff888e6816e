//! Record aggregation for logger output
//!
//! Merges records from every logger file into one row per adjusted
//! timestamp, then back-fills the slow-changing wet/dry fields so that each
//! row reports the state that applies to it.

use crate::app::models::{AggregatedRow, Record};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::debug;

/// Accumulates records into timestamp-keyed rows
#[derive(Debug, Default)]
pub struct RecordAggregator {
    rows: BTreeMap<NaiveDateTime, AggregatedRow>,
    records_merged: usize,
}

impl RecordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge records into the table
    ///
    /// A record landing on an existing timestamp is absorbed into that row,
    /// so records added later win for the fields they carry.
    pub fn add_records<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.records_merged += 1;
            self.rows
                .entry(record.adjusted_time)
                .and_modify(|row| row.absorb(&record))
                .or_insert_with(|| AggregatedRow::from_record(&record));
        }
    }

    /// Number of distinct timestamps so far
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of records merged so far
    pub fn records_merged(&self) -> usize {
        self.records_merged
    }

    /// Back-fill and return the rows in ascending timestamp order
    pub fn finish(self) -> Vec<AggregatedRow> {
        let mut rows: Vec<AggregatedRow> = self.rows.into_values().collect();
        backfill_wet_state(&mut rows);

        debug!(
            "Aggregated {} records into {} rows",
            self.records_merged,
            rows.len()
        );

        rows
    }
}

/// Wet-temperature summary carried between rows
struct WetTemperature {
    min: Option<String>,
    max: Option<String>,
    mean: Option<String>,
    samples: Option<String>,
}

impl WetTemperature {
    fn from_row(row: &AggregatedRow) -> Self {
        Self {
            min: row.wet_temp_min.clone(),
            max: row.wet_temp_max.clone(),
            mean: row.wet_temp_mean.clone(),
            samples: row.wet_temp_samples.clone(),
        }
    }

    fn fill(&self, row: &mut AggregatedRow) {
        row.wet_temp_min = self.min.clone();
        row.wet_temp_max = self.max.clone();
        row.wet_temp_mean = self.mean.clone();
        row.wet_temp_samples = self.samples.clone();
    }
}

/// Carry wet-temperature summaries and wet/dry state backwards in time
///
/// `rows` must be in ascending timestamp order. Walking from the latest row,
/// each row without a value takes the one from the nearest later row that
/// has it. Rows after the last known value stay blank. Duration is not
/// carried.
pub fn backfill_wet_state(rows: &mut [AggregatedRow]) {
    let mut wet_temperature: Option<WetTemperature> = None;
    let mut wet_dry: Option<String> = None;

    for row in rows.iter_mut().rev() {
        if row.has_wet_temperature() {
            wet_temperature = Some(WetTemperature::from_row(row));
        }
        if let Some(state) = &wet_temperature {
            state.fill(row);
        }

        if row.wet_dry.is_some() {
            wet_dry = row.wet_dry.clone();
        }
        if wet_dry.is_some() {
            row.wet_dry = wet_dry.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Measurement;
    use chrono::{Duration, NaiveDate};

    fn minute(m: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 10, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::minutes(m)
    }

    fn record(m: i64, measurement: Measurement) -> Record {
        Record {
            original_time: minute(m),
            adjusted_time: minute(m),
            local_time: minute(m) - Duration::hours(4),
            measurement,
        }
    }

    fn temp(m: i64, value: &str) -> Record {
        record(m, Measurement::Temperature(value.to_string()))
    }

    fn light(m: i64, value: &str) -> Record {
        record(m, Measurement::Light(value.to_string()))
    }

    fn wet_dry(m: i64, duration: &str, state: &str) -> Record {
        record(
            m,
            Measurement::WetDry {
                duration: duration.to_string(),
                state: state.to_string(),
            },
        )
    }

    fn wet_temp(m: i64, min: &str) -> Record {
        record(
            m,
            Measurement::WetTemperature {
                min: min.to_string(),
                max: "20.0".to_string(),
                mean: "19.0".to_string(),
                samples: "12".to_string(),
            },
        )
    }

    #[test]
    fn test_merge_by_timestamp_with_blanks() {
        let mut aggregator = RecordAggregator::new();
        aggregator.add_records(vec![temp(1, "10"), temp(3, "30")]);
        aggregator.add_records(vec![light(2, "200"), light(3, "300")]);

        assert_eq!(aggregator.records_merged(), 4);
        assert_eq!(aggregator.row_count(), 3);

        let rows = aggregator.finish();
        let times: Vec<_> = rows.iter().map(|r| r.adjusted_time).collect();
        assert_eq!(times, vec![minute(1), minute(2), minute(3)]);

        assert_eq!(rows[0].temperature.as_deref(), Some("10"));
        assert_eq!(rows[0].light, None);
        assert_eq!(rows[1].temperature, None);
        assert_eq!(rows[1].light.as_deref(), Some("200"));
        assert_eq!(rows[2].temperature.as_deref(), Some("30"));
        assert_eq!(rows[2].light.as_deref(), Some("300"));
    }

    #[test]
    fn test_rows_sorted_regardless_of_input_order() {
        let mut aggregator = RecordAggregator::new();
        aggregator.add_records(vec![temp(5, "a"), temp(1, "b"), temp(3, "c")]);

        let rows = aggregator.finish();

        assert!(rows.windows(2).all(|w| w[0].adjusted_time < w[1].adjusted_time));
    }

    #[test]
    fn test_later_record_wins_for_same_field() {
        let mut aggregator = RecordAggregator::new();
        aggregator.add_records(vec![temp(1, "10")]);
        aggregator.add_records(vec![temp(1, "11")]);

        let rows = aggregator.finish();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].temperature.as_deref(), Some("11"));
    }

    #[test]
    fn test_later_record_sets_original_time() {
        let mut late = light(1, "5");
        late.original_time = minute(0);

        let mut aggregator = RecordAggregator::new();
        aggregator.add_records(vec![temp(1, "10"), late]);

        let rows = aggregator.finish();

        assert_eq!(rows[0].original_time, minute(0));
        assert_eq!(rows[0].adjusted_time, minute(1));
    }

    #[test]
    fn test_wet_dry_state_backfills_from_later_rows() {
        let mut aggregator = RecordAggregator::new();
        aggregator.add_records(vec![temp(1, "10"), temp(2, "11"), temp(4, "12"), temp(6, "13")]);
        aggregator.add_records(vec![wet_dry(3, "120", "wet"), wet_dry(5, "60", "dry")]);

        let rows = aggregator.finish();
        let states: Vec<_> = rows.iter().map(|r| r.wet_dry.as_deref()).collect();
        let durations: Vec<_> = rows.iter().map(|r| r.duration.as_deref()).collect();

        assert_eq!(
            states,
            vec![Some("wet"), Some("wet"), Some("wet"), Some("dry"), Some("dry"), None]
        );
        // Duration stays on the transition rows only
        assert_eq!(
            durations,
            vec![None, None, Some("120"), None, Some("60"), None]
        );
    }

    #[test]
    fn test_wet_temperature_group_backfills_together() {
        let mut aggregator = RecordAggregator::new();
        aggregator.add_records(vec![light(1, "1"), light(2, "2"), light(3, "3")]);
        aggregator.add_records(vec![wet_temp(2, "17.5")]);

        let rows = aggregator.finish();

        assert_eq!(rows[0].wet_temp_min.as_deref(), Some("17.5"));
        assert_eq!(rows[0].wet_temp_max.as_deref(), Some("20.0"));
        assert_eq!(rows[0].wet_temp_mean.as_deref(), Some("19.0"));
        assert_eq!(rows[0].wet_temp_samples.as_deref(), Some("12"));
        assert_eq!(rows[1].wet_temp_min.as_deref(), Some("17.5"));
        assert!(!rows[2].has_wet_temperature());
        assert_eq!(rows[2].wet_temp_samples, None);
    }

    #[test]
    fn test_empty_aggregator() {
        let rows = RecordAggregator::new().finish();
        assert!(rows.is_empty());
    }
}
