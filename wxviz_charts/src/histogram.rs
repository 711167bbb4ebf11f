// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A histogram of one metric with a mean marker.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use wxviz_core::{Mark, MarkId};

use crate::axis::AxisSpec;
use crate::bin::{BIN_COUNT, Bin, bin};
use crate::color::{BAR_FILL, MEAN_STROKE};
use crate::error::ChartError;
use crate::format::format_fixed;
use crate::layer;
use crate::layout::{Dimensions, Margins};
use crate::observation::{LabelDict, Observation, extent, label_for, mean};
use crate::primitives::{RectMarkSpec, RuleMarkSpec};
use crate::scale::ScaleLinear;
use crate::surface::Chart;
use crate::tooltip::{Hover, Tooltip, TooltipShift};

const MARGINS: Margins = Margins::new(50.0, 10.0, 50.0, 30.0);
const BAR_PADDING: f64 = 1.0;
/// How far the mean rule reaches above the plot.
const MEAN_OVERHANG: f64 = 20.0;

const MEAN_ID: MarkId = MarkId(1);
const X_AXIS_BASE: u64 = 100;
const BAR_NS: u64 = 0x68;

/// Configuration for a [`Histogram`].
#[derive(Clone, Debug)]
pub struct HistogramSpec {
    metric: String,
    width: f64,
    labels: LabelDict,
    tooltip_id: String,
}

impl HistogramSpec {
    /// Creates a spec for `metric` in a `width × 0.4·width` box.
    pub fn new(metric: impl Into<String>, width: f64) -> Self {
        Self {
            metric: metric.into(),
            width,
            labels: LabelDict::new(),
            tooltip_id: String::from("tooltip02"),
        }
    }

    /// Sets field display labels for the axis title.
    pub fn with_labels(mut self, labels: LabelDict) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the tooltip container id.
    pub fn with_tooltip_id(mut self, id: impl Into<String>) -> Self {
        self.tooltip_id = id.into();
        self
    }

    /// Builds the histogram over `data`.
    pub fn build(self, data: &[Observation]) -> Result<Histogram, ChartError> {
        Histogram::new(self, data)
    }
}

/// A built histogram.
#[derive(Clone, Debug)]
pub struct Histogram {
    spec: HistogramSpec,
    dims: Dimensions,
    x_scale: ScaleLinear,
    y_scale: ScaleLinear,
    bins: Vec<Bin>,
    mean: f64,
}

impl Histogram {
    /// Bins the metric and builds scales.
    pub fn new(spec: HistogramSpec, data: &[Observation]) -> Result<Self, ChartError> {
        if data.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let dims = Dimensions::new(spec.width, 0.4 * spec.width, MARGINS)?;
        let plot = dims.plot();
        let missing = || ChartError::MissingMetric {
            field: spec.metric.clone(),
        };
        let domain = extent(data, &spec.metric).ok_or_else(missing)?;
        let mean = mean(data, &spec.metric).ok_or_else(missing)?;

        let x_scale = ScaleLinear::new(domain, (plot.x0, plot.x1)).nice(10);
        let bins = bin(
            data.iter().map(|o| o.value(&spec.metric)),
            x_scale.domain(),
            BIN_COUNT,
        );
        let max_count = bins.iter().map(Bin::count).max().unwrap_or(0);
        let y_scale =
            ScaleLinear::new((0.0, max_count.max(1) as f64), (plot.y1, plot.y0)).nice(10);

        Ok(Self {
            spec,
            dims,
            x_scale,
            y_scale,
            bins,
            mean,
        })
    }

    /// The bins, left to right.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Mean of the metric over present values.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The x-scale.
    pub fn x_scale(&self) -> ScaleLinear {
        self.x_scale
    }

    /// The y-scale (count).
    pub fn y_scale(&self) -> ScaleLinear {
        self.y_scale
    }

    /// Scene rectangle of bin `i`'s bar.
    pub fn bar_rect(&self, i: usize) -> Option<Rect> {
        let b = self.bins.get(i)?;
        let x0 = self.x_scale.map(b.x0) + BAR_PADDING;
        let w = (self.x_scale.map(b.x1) - self.x_scale.map(b.x0) - BAR_PADDING).max(0.0);
        let bottom = self.dims.plot().y1;
        Some(Rect::new(
            x0,
            self.y_scale.map(b.count() as f64),
            x0 + w,
            bottom,
        ))
    }
}

impl Chart for Histogram {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn marks(&self) -> Vec<Mark> {
        let dims = self.dims;
        let plot = dims.plot();
        let mut out = Vec::with_capacity(self.bins.len() + 16);

        for i in 0..self.bins.len() {
            let Some(rect) = self.bar_rect(i) else {
                continue;
            };
            out.push(
                RectMarkSpec::new(MarkId::for_row(BAR_NS, i as u64), rect)
                    .with_fill(BAR_FILL)
                    .mark(),
            );
        }

        let x = self.x_scale.map(self.mean);
        out.push(
            RuleMarkSpec::vertical(MEAN_ID, x, plot.y0 - MEAN_OVERHANG, plot.y1)
                .with_stroke(MEAN_STROKE, dims.stroke_width(0.005, 5.0))
                .with_layer(layer::MEAN_RULE)
                .mark(),
        );

        let label_size = dims.font_size(0.004, 1.3);
        out.extend(
            AxisSpec::bottom(X_AXIS_BASE, self.x_scale)
                .with_font_sizes(label_size, label_size)
                .with_title(label_for(&self.spec.labels, &self.spec.metric))
                .with_title_offset(MARGINS.bottom - 10.0)
                .marks(plot),
        );
        out
    }

    fn hover(&self, pointer: Point) -> Option<Hover> {
        let (i, rect) = (0..self.bins.len())
            .filter_map(|i| Some((i, self.bar_rect(i)?)))
            .find(|(_, r)| {
                r.height() > 0.0
                    && pointer.x >= r.x0
                    && pointer.x <= r.x1
                    && pointer.y >= r.y0
                    && pointer.y <= r.y1
            })?;
        let b = &self.bins[i];
        let tooltip = Tooltip::new(
            self.spec.tooltip_id.clone(),
            Point::new(rect.center().x, rect.y0),
            TooltipShift::new(350.0, 350.0),
        )
        .with_field("count", alloc::format!("{}", b.count()))
        .with_field(
            "range",
            alloc::format!("{} - {}", format_fixed(b.x0, 1), format_fixed(b.x1, 1)),
        );
        Some(Hover {
            tooltip,
            highlight: Vec::new(),
        })
    }

    fn tooltip_id(&self) -> &str {
        &self.spec.tooltip_id
    }
}
