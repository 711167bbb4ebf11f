// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint layers for chart-generated marks.
//!
//! A [`Layer`] pairs the `z_index` a mark paints at with the role tag (`class`) a surface can
//! style or hit-test by. Every mark a chart emits goes through one of the constants below, so
//! paint order is the same across the line chart, scatter plot, and histogram.
//!
//! Surfaces sort by `(z_index, MarkId)`; marks sharing a layer keep id order.

use wxviz_core::MarkBuilder;

/// Paint order plus role tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layer {
    /// Paint order; higher paints later.
    pub z_index: i32,
    /// Role tag carried on the mark.
    pub class: Option<&'static str>,
}

impl Layer {
    /// An untagged layer at `z_index`.
    pub const fn new(z_index: i32) -> Self {
        Self {
            z_index,
            class: None,
        }
    }

    /// The same paint order with a different role tag.
    pub const fn with_class(self, class: &'static str) -> Self {
        Self {
            z_index: self.z_index,
            class: Some(class),
        }
    }

    pub(crate) fn apply(self, builder: MarkBuilder) -> MarkBuilder {
        let builder = builder.z_index(self.z_index);
        match self.class {
            Some(class) => builder.class(class),
            None => builder,
        }
    }
}

/// The shaded region below the freezing threshold.
pub const THRESHOLD_BAND: Layer = Layer::new(-100).with_class("threshold");
/// Histogram bars; they double as hover targets.
pub const BARS: Layer = Layer::new(0).with_class("hover-target");
/// The line chart series.
pub const LINE: Layer = Layer::new(10).with_class("line");
/// The histogram mean marker.
pub const MEAN_RULE: Layer = Layer::new(15).with_class("mean");
/// Scatter dots.
pub const DOTS: Layer = Layer::new(20).with_class("dot");

/// Axis domain lines and ticks.
pub const AXIS_RULES: Layer = Layer::new(30).with_class("axis");
/// Axis tick labels.
pub const AXIS_LABELS: Layer = Layer::new(40).with_class("tick-label");
/// Axis titles.
pub const AXIS_TITLES: Layer = Layer::new(50).with_class("axis-title");

/// Chart titles and subtitles.
pub const TITLES: Layer = Layer::new(80).with_class("title");
/// Hover highlights, above the data.
pub const HIGHLIGHT: Layer = Layer::new(85).with_class("highlight");
/// Transparent pointer targets; topmost so they receive the pointer.
pub const HOVER_TARGETS: Layer = Layer::new(90).with_class("hover-target");
