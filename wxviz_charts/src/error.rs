// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;

/// Errors raised while building a chart.
///
/// Construction is the only fallible step. Once built, charts never fail: missing values are
/// skipped or break line continuity instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// The dataset has no observations.
    #[error("the dataset is empty")]
    EmptyDataset,
    /// No observation carries a value for a requested field.
    #[error("no observation has a value for `{field}`")]
    MissingMetric {
        /// The requested field name.
        field: String,
    },
    /// The plot area left after margins is empty or not finite.
    #[error("invalid chart dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested outer width.
        width: f64,
        /// Requested outer height.
        height: f64,
    },
}
