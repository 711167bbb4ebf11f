// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equal-width binning.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Number of histogram bins.
pub const BIN_COUNT: usize = 14;

/// A half-open interval `[x0, x1)` and the rows that fall inside it.
///
/// The last bin of a [`bin`] call is closed on the right.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    /// Lower edge.
    pub x0: f64,
    /// Upper edge.
    pub x1: f64,
    /// Row indices of the binned values.
    pub rows: Vec<usize>,
}

impl Bin {
    /// Number of values in the bin.
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Splits `domain` into `count` equal-width bins and assigns each value to one.
///
/// Values are indexed by their position in `values`. Missing or non-finite values and values
/// outside the domain are skipped.
pub fn bin(
    values: impl IntoIterator<Item = Option<f64>>,
    domain: (f64, f64),
    count: usize,
) -> Vec<Bin> {
    let (lo, hi) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };
    let count = count.max(1);
    let width = (hi - lo) / count as f64;
    let edge = |k: usize| if k == count { hi } else { lo + width * k as f64 };
    let mut bins: Vec<Bin> = (0..count)
        .map(|k| Bin {
            x0: edge(k),
            x1: edge(k + 1),
            rows: Vec::new(),
        })
        .collect();

    for (row, v) in values.into_iter().enumerate() {
        let Some(v) = v.filter(|v| v.is_finite()) else {
            continue;
        };
        if v < lo || v > hi {
            continue;
        }
        let mut k = if width > 0.0 {
            let guess = ((v - lo) / width).floor().clamp(0.0, (count - 1) as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the bin range")]
            {
                guess as usize
            }
        } else {
            0
        };
        // Settle against the stored edges so values on an edge land in the upper bin.
        while k > 0 && v < bins[k].x0 {
            k -= 1;
        }
        while k + 1 < count && v >= bins[k + 1].x0 {
            k += 1;
        }
        bins[k].rows.push(row);
    }
    bins
}
