// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and tooltips.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats `v` with exactly `decimals` digits after the point (`d3.format(".Nf")`).
///
/// Negative zero prints as `0`.
pub fn format_fixed(v: f64, decimals: usize) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let s = alloc::format!("{v:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return String::from(&s[1..]);
    }
    s
}

/// Formats a tick value using just enough decimals to distinguish ticks `step` apart.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    format_fixed(v, decimals_for_step(step))
}

fn decimals_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    let d = (-step.log10()).ceil().clamp(0.0, 12.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to a small non-negative range"
    )]
    {
        d as usize
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn fixed_formatting_matches_precision() {
        assert_eq!(format_fixed(3.14159, 2), "3.14");
        assert_eq!(format_fixed(71.0, 1), "71.0");
        assert_eq!(format_fixed(-0.01, 1), "0.0");
        assert_eq!(format_fixed(-2.5, 1), "-2.5");
    }

    #[test]
    fn tick_decimals_follow_step() {
        assert_eq!(format_tick_with_step(20.0, 10.0), "20");
        assert_eq!(format_tick_with_step(0.5, 0.5), "0.5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
    }
}
