// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! Scales map data values into scene coordinates. Linear scales cover metric axes; time scales
//! are linear over canonical epoch seconds and produce ticks aligned to the display offset.

extern crate alloc;

use alloc::vec::Vec;

use chrono::{FixedOffset, Offset, Utc};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::time;

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(y),
            Self::Time(s) => s.invert(y),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }
}

impl From<ScaleLinear> for ScaleContinuous {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTime> for ScaleContinuous {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extends the domain outward to round values, so that it starts and ends on a tick for
    /// roughly `count` ticks.
    ///
    /// A degenerate or non-finite domain is left unchanged.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut lo, mut hi) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut previous = None;
        // The step can change once the bounds move; a few passes settle it.
        for _ in 0..10 {
            let Some(step) = tick_increment(lo, hi, count) else {
                break;
            };
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                lo = (lo / step).floor() * step;
                hi = (hi / step).ceil() * step;
            } else {
                lo = (lo * step).ceil() / step;
                hi = (hi * step).floor() / step;
            }
            previous = Some(step);
        }
        self.domain = if reversed { (hi, lo) } else { (lo, hi) };
        self
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (x - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (y - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns about `count` round tick values inside the domain, in domain order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Tick values on a 1/2/5 step between `start` and `stop`.
fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reversed = stop < start;
    let (lo, hi) = if reversed { (stop, start) } else { (start, stop) };
    let Some(spec) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }
    let n = (spec.last - spec.first).min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "a non-negative integer count capped at 10k"
    )]
    let n = n as u32;
    let mut out: Vec<f64> = (0..=n).map(|i| spec.value(spec.first + f64::from(i))).collect();
    if reversed {
        out.reverse();
    }
    out
}

/// Tick step for `count` ticks over `[start, stop]`.
///
/// Steps below 1 are returned negated as their reciprocal (`-10.0` for a 0.1 step), which
/// keeps the arithmetic in integers.
fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    tick_spec(start, stop, count as f64).map(|spec| spec.inc)
}

/// Tick positions are `value(first..=last)`.
#[derive(Clone, Copy, Debug)]
struct TickSpec {
    first: f64,
    last: f64,
    inc: f64,
}

impl TickSpec {
    fn value(&self, i: f64) -> f64 {
        if self.inc < 0.0 { i / -self.inc } else { i * self.inc }
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    const E10: f64 = 7.0710678118654755; // sqrt(50)
    const E5: f64 = 3.1622776601683795; // sqrt(10)
    const E2: f64 = core::f64::consts::SQRT_2;

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let spec = if power < 0.0 {
        let inc = 10_f64.powf(-power) / factor;
        let mut first = (start * inc).round();
        let mut last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        TickSpec {
            first,
            last,
            inc: -inc,
        }
    } else {
        let inc = 10_f64.powf(power) * factor;
        let mut first = (start / inc).round();
        let mut last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        TickSpec { first, last, inc }
    };
    if spec.last < spec.first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some(spec)
}

/// A time scale: a linear scale over canonical epoch seconds.
///
/// Ticks are aligned to the display offset, so an hourly step lands on local hours rather than
/// UTC ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
    utc_offset: i32,
}

impl ScaleTime {
    /// Creates a new time scale over epoch seconds.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
            utc_offset: 0,
        }
    }

    /// Sets the display offset in seconds east of UTC used for tick alignment.
    pub fn with_utc_offset(mut self, seconds: i32) -> Self {
        self.utc_offset = seconds;
        self
    }

    /// The display offset in seconds east of UTC.
    pub fn utc_offset(&self) -> i32 {
        self.utc_offset
    }

    /// The display offset as a chrono offset; out-of-range values fall back to UTC.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset).unwrap_or_else(|| Utc.fix())
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back to a timestamp.
    pub fn invert(&self, y: f64) -> f64 {
        self.inner.invert(y)
    }

    /// Returns tick timestamps that fall inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let off = f64::from(self.utc_offset);
        let (d0, d1) = self.inner.domain();
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        time::time_ticks(lo + off, hi + off, count)
            .into_iter()
            .map(|t| t - off)
            .filter(|t| *t >= lo && *t <= hi)
            .collect()
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_map_and_invert_are_inverse() {
        let s = ScaleLinear::new((0.0, 50.0), (300.0, 0.0));
        assert_eq!(s.map(0.0), 300.0);
        assert_eq!(s.map(50.0), 0.0);
        assert!((s.invert(s.map(12.5)) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = ScaleLinear::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(s.map(5.0), 10.0);
    }

    #[test]
    fn nice_domain_extends_to_round_values() {
        let s = ScaleLinear::new((0.13, 9.7), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (0.0, 10.0));
        let s = ScaleLinear::new((12.0, 87.0), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (10.0, 90.0));
        let s = ScaleLinear::new((87.0, 12.0), (0.0, 100.0)).nice(10);
        assert_eq!(s.domain(), (90.0, 10.0));
    }

    #[test]
    fn nice_leaves_degenerate_domain_alone() {
        let s = ScaleLinear::new((4.0, 4.0), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain(), (4.0, 4.0));
    }

    #[test]
    fn ticks_stay_inside_the_domain() {
        let s = ScaleLinear::new((0.5, 9.5), (0.0, 1.0));
        assert_eq!(
            s.ticks(10),
            std::vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
        let s = ScaleLinear::new((0.0, 60.0), (0.0, 1.0));
        assert_eq!(s.ticks(6), std::vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    }

    #[test]
    fn fractional_ticks_are_exact_decimals() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 1.0));
        let t = s.ticks(10);
        assert_eq!(t.len(), 11);
        assert_eq!(t[3], 0.3);
        assert_eq!(t[7], 0.7);
    }

    #[test]
    fn reversed_domain_ticks_descend() {
        let s = ScaleLinear::new((10.0, 0.0), (0.0, 1.0));
        assert_eq!(s.ticks(2), std::vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn time_ticks_stay_inside_domain_and_align_to_offset() {
        // 2024-03-05T00:00:00-06:00 to 49 hours later.
        let t0 = 1_709_618_400.0;
        let s = ScaleTime::new((t0, t0 + 49.0 * 3600.0), (0.0, 500.0)).with_utc_offset(-6 * 3600);
        let ticks = s.ticks(8);
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|t| *t >= t0 && *t <= t0 + 49.0 * 3600.0));
        // Local midnight is a tick.
        assert!(ticks.contains(&t0));
    }
}
