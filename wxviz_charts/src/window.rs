// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliding window over a sorted observation history.
//!
//! The window starts as the earliest `capacity` observations. Each [`SlidingWindow::advance`]
//! looks up the hour after the last windowed observation in the history. If that hour exists
//! and carries a value for the metric, the window slides by one; otherwise it resets to its
//! initial state.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::ChartError;
use crate::observation::{Observation, sorted_by_time};

/// Seconds between consecutive window points.
pub const STEP_SECONDS: i64 = 3600;

/// Default window capacity.
pub const DEFAULT_CAPACITY: usize = 50;

/// Why an advance fell back to the initial window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    /// No observation in the history has the candidate timestamp.
    NotFound,
    /// The observation exists but has no value for the metric.
    MissingValue,
}

/// Outcome of [`SlidingWindow::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowUpdate {
    /// The window slid forward to include `timestamp`.
    Advanced {
        /// Canonical timestamp of the appended observation.
        timestamp: i64,
    },
    /// The candidate could not be used and the window was reset.
    Reset {
        /// The candidate timestamp that was looked up.
        missing: i64,
        /// Why the candidate was rejected.
        reason: ResetReason,
    },
}

/// A fixed-capacity, time-ordered window over an observation history.
#[derive(Clone, Debug)]
pub struct SlidingWindow {
    metric: String,
    capacity: usize,
    history: Vec<Observation>,
    index: HashMap<i64, usize>,
    window: Vec<Observation>,
}

impl SlidingWindow {
    /// Creates a window over `dataset` for `metric`.
    ///
    /// The history is a sorted copy of `dataset`. When several observations share a canonical
    /// timestamp, lookups resolve to the first one in sorted order. A `capacity` of zero is
    /// treated as one.
    pub fn new(
        dataset: &[Observation],
        metric: impl Into<String>,
        capacity: usize,
    ) -> Result<Self, ChartError> {
        if dataset.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let metric = metric.into();
        if dataset.iter().all(|o| o.value(&metric).is_none()) {
            return Err(ChartError::MissingMetric { field: metric });
        }

        let history = sorted_by_time(dataset);
        let mut index = HashMap::with_capacity(history.len());
        for (i, o) in history.iter().enumerate() {
            index.entry(o.timestamp()).or_insert(i);
        }

        let mut out = Self {
            metric,
            capacity: capacity.max(1),
            history,
            index,
            window: Vec::new(),
        };
        out.reset();
        Ok(out)
    }

    /// Restores the initial window: the earliest `capacity` observations.
    pub fn reset(&mut self) {
        let n = self.capacity.min(self.history.len());
        self.window.clear();
        self.window.extend_from_slice(&self.history[..n]);
    }

    /// The timestamp the next advance will look for.
    pub fn candidate_next(&self) -> Option<i64> {
        self.window.last().map(|o| o.timestamp() + STEP_SECONDS)
    }

    /// Exact lookup of a canonical timestamp in the history.
    pub fn lookup(&self, timestamp: i64) -> Option<&Observation> {
        self.index.get(&timestamp).map(|&i| &self.history[i])
    }

    /// Slides the window forward by one step, or resets it.
    pub fn advance(&mut self) -> WindowUpdate {
        let Some(candidate) = self.candidate_next() else {
            self.reset();
            return WindowUpdate::Reset {
                missing: 0,
                reason: ResetReason::NotFound,
            };
        };

        let next = match self.lookup(candidate) {
            None => Err(ResetReason::NotFound),
            Some(o) if o.value(&self.metric).is_none() => Err(ResetReason::MissingValue),
            Some(o) => Ok(o.clone()),
        };

        match next {
            Ok(observation) => {
                if self.window.len() >= self.capacity {
                    self.window.remove(0);
                }
                self.window.push(observation);
                WindowUpdate::Advanced {
                    timestamp: candidate,
                }
            }
            Err(reason) => {
                log::debug!(
                    "window for `{}` reset: {reason:?} at timestamp {candidate}",
                    self.metric
                );
                self.reset();
                WindowUpdate::Reset {
                    missing: candidate,
                    reason,
                }
            }
        }
    }

    /// The observations currently in the window, ascending by time.
    pub fn window(&self) -> &[Observation] {
        &self.window
    }

    /// The full sorted history.
    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    /// The window capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The metric the window tracks.
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// The `(min, max)` canonical timestamps of the current window.
    pub fn time_domain(&self) -> Option<(i64, i64)> {
        Some((self.window.first()?.timestamp(), self.window.last()?.timestamp()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use chrono::FixedOffset;

    use super::*;

    pub(crate) const T0: i64 = 1_709_600_400;

    /// Hourly observations starting at `T0`, with `metric = 20 + i`.
    pub(crate) fn hourly(n: usize, metric: &str) -> Vec<Observation> {
        let offset = FixedOffset::west_opt(6 * 3600).unwrap();
        (0..n)
            .map(|i| {
                Observation::from_timestamp(T0 + i as i64 * STEP_SECONDS, offset)
                    .unwrap()
                    .with_value(metric, 20.0 + i as f64)
            })
            .collect()
    }

    fn timestamps(w: &SlidingWindow) -> Vec<i64> {
        w.window().iter().map(Observation::timestamp).collect()
    }

    #[test]
    fn initial_window_is_earliest_capacity_sorted() {
        let mut data = hourly(60, "t");
        data.reverse();
        let w = SlidingWindow::new(&data, "t", 50).unwrap();
        assert_eq!(w.window().len(), 50);
        let ts = timestamps(&w);
        assert_eq!(ts[0], T0);
        assert!(ts.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn advances_keep_capacity_and_order() {
        let data = hourly(80, "t");
        let sorted: Vec<i64> = data.iter().map(Observation::timestamp).collect();
        let mut w = SlidingWindow::new(&data, "t", 50).unwrap();
        for n in 1..=25 {
            let update = w.advance();
            assert!(matches!(update, WindowUpdate::Advanced { .. }), "{update:?}");
            let ts = timestamps(&w);
            assert_eq!(ts.len(), 50);
            assert!(ts.windows(2).all(|p| p[0] < p[1]));
            assert_eq!(ts[0], sorted[n], "earliest after {n} updates");
        }
    }

    #[test]
    fn missing_next_timestamp_resets_to_initial_state() {
        let mut data = hourly(55, "t");
        // Drop the hour right after the initial window.
        data.remove(50);
        let mut w = SlidingWindow::new(&data, "t", 50).unwrap();
        let initial = timestamps(&w);
        let update = w.advance();
        assert_eq!(
            update,
            WindowUpdate::Reset {
                missing: T0 + 50 * STEP_SECONDS,
                reason: ResetReason::NotFound,
            }
        );
        assert_eq!(timestamps(&w), initial);
    }

    #[test]
    fn missing_value_resets_to_initial_state() {
        let mut data = hourly(55, "t");
        data[50] = Observation::new(data[50].time()).with_value("other", 1.0);
        let mut w = SlidingWindow::new(&data, "t", 50).unwrap();
        assert!(matches!(
            w.advance(),
            WindowUpdate::Reset {
                reason: ResetReason::MissingValue,
                ..
            }
        ));
        assert_eq!(timestamps(&w)[0], T0);
        assert_eq!(w.window().len(), 50);
    }

    #[test]
    fn lookup_matches_across_offsets() {
        let data = hourly(3, "t");
        let w = SlidingWindow::new(&data, "t", 2).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let shifted = Observation::from_timestamp(T0 + STEP_SECONDS, utc).unwrap();
        let found = w.lookup(shifted.timestamp()).unwrap();
        assert_eq!(found.value("t"), Some(21.0));
        assert_eq!(w.candidate_next(), Some(T0 + 2 * STEP_SECONDS));
    }

    #[test]
    fn short_history_grows_then_resets() {
        let data = hourly(3, "t");
        let mut w = SlidingWindow::new(&data, "t", 50).unwrap();
        assert_eq!(w.window().len(), 3);
        assert!(matches!(w.advance(), WindowUpdate::Reset { .. }));
        assert_eq!(w.window().len(), 3);
    }

    #[test]
    fn rejects_empty_and_metricless_datasets() {
        assert_eq!(
            SlidingWindow::new(&[], "t", 50).unwrap_err(),
            ChartError::EmptyDataset
        );
        let data = hourly(3, "t");
        assert_eq!(
            SlidingWindow::new(&data, "wind", 50).unwrap_err(),
            ChartError::MissingMetric {
                field: "wind".into()
            }
        );
    }
}
