// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observations and dataset helpers.
//!
//! An [`Observation`] is one timestamped record with any number of named numeric fields. The
//! timestamp keeps its source UTC offset for display, while all matching and ordering uses the
//! canonical UTC epoch second from [`Observation::timestamp`].

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset};

/// Field name to display label.
///
/// Fields without an entry are labeled with their own name.
pub type LabelDict = BTreeMap<String, String>;

/// Returns the display label for `field`.
pub fn label_for<'a>(labels: &'a LabelDict, field: &'a str) -> &'a str {
    labels.get(field).map_or(field, String::as_str)
}

/// One timestamped weather record.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    time: DateTime<FixedOffset>,
    values: BTreeMap<String, f64>,
}

impl Observation {
    /// Creates an observation with no fields.
    pub fn new(time: DateTime<FixedOffset>) -> Self {
        Self {
            time,
            values: BTreeMap::new(),
        }
    }

    /// Creates an observation from a UTC epoch second, displayed in `offset`.
    ///
    /// Returns `None` if `secs` is out of range.
    pub fn from_timestamp(secs: i64, offset: FixedOffset) -> Option<Self> {
        let utc = DateTime::from_timestamp(secs, 0)?;
        Some(Self::new(utc.with_timezone(&offset)))
    }

    /// Adds a field value.
    ///
    /// Non-finite values are stored but read back as missing.
    pub fn with_value(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    /// Sets a field value in place.
    pub fn set_value(&mut self, field: impl Into<String>, value: f64) {
        self.values.insert(field.into(), value);
    }

    /// The timestamp in its source offset.
    pub fn time(&self) -> DateTime<FixedOffset> {
        self.time
    }

    /// The canonical timestamp: UTC epoch seconds.
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }

    /// Returns a field value, or `None` if it is absent or not finite.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied().filter(|v| v.is_finite())
    }

    /// Iterates over all stored fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Returns the `(min, max)` of a field, ignoring missing values.
pub fn extent(data: &[Observation], field: &str) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in data.iter().filter_map(|o| o.value(field)) {
        min = min.min(v);
        max = max.max(v);
    }
    (min <= max).then_some((min, max))
}

/// Returns the arithmetic mean of a field, ignoring missing values.
pub fn mean(data: &[Observation], field: &str) -> Option<f64> {
    let (sum, n) = data
        .iter()
        .filter_map(|o| o.value(field))
        .fold((0.0, 0_usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Returns the `(earliest, latest)` canonical timestamps.
pub fn time_extent(data: &[Observation]) -> Option<(i64, i64)> {
    let min = data.iter().map(Observation::timestamp).min()?;
    let max = data.iter().map(Observation::timestamp).max()?;
    Some((min, max))
}

/// Returns a copy of `data` sorted ascending by canonical timestamp.
///
/// The sort is stable, so observations sharing a timestamp keep their input order.
pub fn sorted_by_time(data: &[Observation]) -> Vec<Observation> {
    let mut out = data.to_vec();
    out.sort_by_key(Observation::timestamp);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn at(secs: i64, offset_hours: i32) -> Observation {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        Observation::from_timestamp(secs, offset).unwrap()
    }

    #[test]
    fn same_instant_in_different_offsets_matches_canonically() {
        let a = at(1_709_600_400, -5);
        let b = at(1_709_600_400, 0);
        assert_ne!(a.time().offset(), b.time().offset());
        assert_eq!(a.timestamp(), b.timestamp());
    }

    #[test]
    fn non_finite_values_read_as_missing() {
        let o = at(0, 0)
            .with_value("t", f64::NAN)
            .with_value("h", f64::INFINITY)
            .with_value("d", 3.5);
        assert_eq!(o.value("t"), None);
        assert_eq!(o.value("h"), None);
        assert_eq!(o.value("d"), Some(3.5));
        assert_eq!(o.value("absent"), None);
    }

    #[test]
    fn extent_and_mean_skip_missing_values() {
        let data = vec![
            at(0, 0).with_value("t", 10.0),
            at(1, 0).with_value("t", f64::NAN),
            at(2, 0),
            at(3, 0).with_value("t", 30.0),
        ];
        assert_eq!(extent(&data, "t"), Some((10.0, 30.0)));
        assert_eq!(mean(&data, "t"), Some(20.0));
        assert_eq!(extent(&data, "x"), None);
        assert_eq!(mean(&data, "x"), None);
    }

    #[test]
    fn sort_is_stable_by_canonical_time() {
        let data = vec![
            at(7200, 0).with_value("k", 1.0),
            at(0, 0).with_value("k", 2.0),
            at(7200, 3).with_value("k", 3.0),
        ];
        let sorted = sorted_by_time(&data);
        let keys: Vec<f64> = sorted.iter().filter_map(|o| o.value("k")).collect();
        assert_eq!(keys, vec![2.0, 1.0, 3.0]);
        assert_eq!(time_extent(&data), Some((0, 7200)));
    }

    #[test]
    fn labels_fall_back_to_field_name() {
        let mut labels = LabelDict::new();
        labels.insert("dewpoint".into(), "Dew point (°F)".into());
        assert_eq!(label_for(&labels, "dewpoint"), "Dew point (°F)");
        assert_eq!(label_for(&labels, "humidity"), "humidity");
    }
}
