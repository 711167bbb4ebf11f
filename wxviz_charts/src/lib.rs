// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Weather chart building blocks for `wxviz_core`.
//!
//! This crate turns a dataset of timestamped [`Observation`]s into stable-identity
//! `wxviz_core::Mark`s:
//! - **Scales** map data values into chart coordinates (linear, time, two-color).
//! - **Guides** (axes, titles) are generated as ordinary marks.
//! - **Charts** ([`LineChart`], [`ScatterChart`], [`Histogram`]) compute a full mark set per
//!   frame and answer hover queries with a [`Hover`].
//!
//! Layout is pure. Effects go through the [`ChartSurface`] trait, driven by a [`ChartView`]
//! that diffs frames with a `wxviz_core::Scene` and forwards transitions.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bin;
mod color;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod histogram;
pub mod layer;
mod layout;
mod line_chart;
mod line_mark;
mod measure;
mod observation;
mod point_mark;
mod primitives;
mod scale;
mod scatter;
mod surface;
mod time;
mod title;
mod tooltip;
mod voronoi;
mod window;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle};
pub use bin::{BIN_COUNT, Bin, bin};
pub use color::{
    BAR_FILL, ColorScaleLinear, DARK_SLATE_GRAY, FREEZING_FILL, MAROON, MEAN_STROKE, SERIES_GOLD,
    SKY_BLUE,
};
pub use error::ChartError;
pub use format::{format_fixed, format_tick_with_step};
pub use histogram::{Histogram, HistogramSpec};
pub use layer::Layer;
pub use layout::{Dimensions, EM_PX, Margins};
pub use line_chart::{LineChart, LineChartSpec, TRANSITION_MS, UPDATE_INTERVAL_MS, UpdateInterval};
pub use line_mark::LineMarkSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer, text_box};
pub use observation::{LabelDict, Observation, extent, label_for, mean, sorted_by_time, time_extent};
pub use point_mark::{PointMarkSpec, circle_path};
pub use primitives::{RectMarkSpec, RuleMarkSpec, TextMarkSpec};
pub use scale::{ScaleContinuous, ScaleLinear, ScaleTime};
pub use scatter::{ScatterChart, ScatterChartSpec};
pub use surface::{Chart, ChartSurface, ChartView};
pub use time::{
    HOUR_MINUTE_DATE, HOUR_MINUTE_SECOND_DATE, datetime_at, format_date_range, format_datetime,
    format_time_tick, time_ticks,
};
pub use title::TitleSpec;
pub use tooltip::{Hover, TOOLTIP_FONT_SIZE, Tooltip, TooltipField, TooltipShift};
pub use voronoi::{Cell, Voronoi};
pub use window::{DEFAULT_CAPACITY, ResetReason, STEP_SECONDS, SlidingWindow, WindowUpdate};
