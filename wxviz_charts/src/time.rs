// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time ticks and date formatting.
//!
//! Times are epoch seconds as `f64`. Formatting happens in the observations' own offset, so a
//! forecast for Chicago labels its axis in Chicago hours wherever it is rendered.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::{DateTime, FixedOffset, Timelike};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Tooltip date format for the line chart.
pub const HOUR_MINUTE_DATE: &str = "%H:%M, %B %A %-d, %Y";
/// Tooltip date format for the scatter chart.
pub const HOUR_MINUTE_SECOND_DATE: &str = "%H:%M:%S, %B %A %-d, %Y";

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;

/// Round steps in seconds, from one second up to a week.
const TIME_STEPS: [f64; 15] = [
    1.0,
    5.0,
    15.0,
    30.0,
    MINUTE,
    5.0 * MINUTE,
    15.0 * MINUTE,
    30.0 * MINUTE,
    HOUR,
    3.0 * HOUR,
    6.0 * HOUR,
    12.0 * HOUR,
    DAY,
    2.0 * DAY,
    7.0 * DAY,
];

/// Multiples of a round time step between `lo` and `hi` (epoch seconds), inclusive.
///
/// The step is the smallest entry of the step table at least `(hi - lo) / count`; spans that
/// outgrow a week step in whole days. Values are multiples in the timeline they are given in,
/// so callers shift by the display offset first to get local hours.
pub fn time_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 0 || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
    if lo == hi {
        return alloc::vec![lo];
    }
    let target = (hi - lo) / count as f64;
    let step = TIME_STEPS
        .iter()
        .copied()
        .find(|s| *s >= target)
        .unwrap_or_else(|| (target / DAY).ceil() * DAY);

    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    if last < first {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a non-negative integer count capped at 10k"
    )]
    let n = (last - first).min(10_000.0) as u32;
    (0..=n).map(|i| (first + f64::from(i)) * step).collect()
}

/// Converts epoch seconds into a datetime in the given offset.
pub fn datetime_at(secs: f64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    if !secs.is_finite() {
        return None;
    }
    let secs = secs.round().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    let secs = secs as i64;
    Some(DateTime::from_timestamp(secs, 0)?.with_timezone(&offset))
}

/// Formats a time tick (epoch seconds) in the display offset.
///
/// Ticks at local midnight, or any tick when the step is a day or more, show the weekday and
/// day of month (`Wed 06`). Other ticks show the hour (`06 PM`).
pub fn format_time_tick(v: f64, step: f64, offset: FixedOffset) -> String {
    let Some(dt) = datetime_at(v, offset) else {
        return alloc::format!("{v}");
    };
    let midnight = dt.hour() == 0 && dt.minute() == 0;
    if step >= DAY || midnight {
        dt.format("%a %d").to_string()
    } else if step < HOUR {
        dt.format("%I:%M").to_string()
    } else {
        dt.format("%I %p").to_string()
    }
}

/// Formats a datetime with a strftime-style pattern.
pub fn format_datetime(dt: DateTime<FixedOffset>, pattern: &str) -> String {
    dt.format(pattern).to_string()
}

/// Formats an inclusive date range, e.g. `March 5 - March 7, 2024`.
pub fn format_date_range(first: DateTime<FixedOffset>, last: DateTime<FixedOffset>) -> String {
    alloc::format!(
        "{} - {}, {}",
        first.format("%B %-d"),
        last.format("%B %-d"),
        last.format("%Y")
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn cst() -> FixedOffset {
        FixedOffset::west_opt(6 * 3600).unwrap()
    }

    #[test]
    fn two_day_span_ticks_every_six_hours() {
        let ticks = time_ticks(0.0, 2.0 * DAY, 8);
        assert_eq!(ticks.len(), 9);
        assert_eq!(ticks[1] - ticks[0], 6.0 * HOUR);
        assert_eq!(ticks.last(), Some(&(2.0 * DAY)));
    }

    #[test]
    fn ticks_start_at_the_first_multiple_inside() {
        let ticks = time_ticks(1.5 * HOUR, 13.0 * HOUR, 4);
        assert_eq!(ticks, std::vec![3.0 * HOUR, 6.0 * HOUR, 9.0 * HOUR, 12.0 * HOUR]);
    }

    #[test]
    fn long_spans_fall_back_to_whole_days() {
        let ticks = time_ticks(0.0, 400.0 * DAY, 5);
        let step = ticks[1] - ticks[0];
        assert_eq!(step, 80.0 * DAY);
    }

    #[test]
    fn tick_labels_use_display_offset() {
        // 2024-03-05T00:00:00-06:00
        let midnight = 1_709_618_400.0;
        assert_eq!(format_time_tick(midnight, 6.0 * 3600.0, cst()), "Tue 05");
        assert_eq!(
            format_time_tick(midnight + 18.0 * 3600.0, 6.0 * 3600.0, cst()),
            "06 PM"
        );
    }

    #[test]
    fn tooltip_and_range_formats() {
        let dt = datetime_at(1_709_618_400.0 + 13.5 * 3600.0, cst()).unwrap();
        assert_eq!(
            format_datetime(dt, HOUR_MINUTE_DATE),
            "13:30, March Tuesday 5, 2024"
        );
        assert_eq!(
            format_datetime(dt, HOUR_MINUTE_SECOND_DATE),
            "13:30:00, March Tuesday 5, 2024"
        );
        let last = datetime_at(1_709_618_400.0 + 2.0 * DAY, cst()).unwrap();
        assert_eq!(format_date_range(dt, last), "March 5 - March 7, 2024");
    }
}
