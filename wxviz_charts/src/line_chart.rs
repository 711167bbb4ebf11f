// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scrolling line chart over a [`SlidingWindow`].
//!
//! The y-scale is fixed from the full history when the chart is built. The x-scale spans the
//! current window and is recomputed on every tick. Each successful tick also yields a
//! transition that starts the line shifted right by one step (measured under the previous
//! x-scale) and eases it back, so the line appears to scroll left.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use wxviz_core::{Easing, Mark, MarkId, Transition};

use crate::axis::{AxisSpec, StrokeStyle};
use crate::color::{FREEZING_FILL, SERIES_GOLD};
use crate::error::ChartError;
use crate::format::format_fixed;
use crate::layer;
use crate::layout::{Dimensions, Margins};
use crate::line_mark::LineMarkSpec;
use crate::observation::{LabelDict, Observation, extent, label_for};
use crate::point_mark::PointMarkSpec;
use crate::primitives::RectMarkSpec;
use crate::scale::{ScaleLinear, ScaleTime};
use crate::surface::Chart;
use crate::time::{HOUR_MINUTE_DATE, format_date_range, format_datetime};
use crate::title::TitleSpec;
use crate::tooltip::{Hover, Tooltip, TooltipShift};
use crate::window::{DEFAULT_CAPACITY, SlidingWindow, WindowUpdate};

/// Duration of the scroll transition.
pub const TRANSITION_MS: f64 = 1000.0;
/// Period between window advances.
pub const UPDATE_INTERVAL_MS: f64 = 1500.0;

const MARGINS: Margins = Margins::new(90.0, 15.0, 70.0, 60.0);

const BAND_ID: MarkId = MarkId(1);
const LINE_ID: MarkId = MarkId(2);
const LISTEN_ID: MarkId = MarkId(3);
const TITLE_ID: MarkId = MarkId(10);
const X_AXIS_BASE: u64 = 100;
const Y_AXIS_BASE: u64 = 20_000;
const HIGHLIGHT_NS: u64 = 0x4c;

/// Decides when the next tick is due from a caller-supplied clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateInterval {
    period_ms: f64,
    next_ms: Option<f64>,
}

impl Default for UpdateInterval {
    fn default() -> Self {
        Self::new(UPDATE_INTERVAL_MS)
    }
}

impl UpdateInterval {
    /// Creates an interval with the given period.
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next_ms: None,
        }
    }

    /// The period in milliseconds.
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Returns `true` when a tick is due at `now_ms`.
    ///
    /// The first call arms the interval. Missed periods collapse into a single tick.
    pub fn due(&mut self, now_ms: f64) -> bool {
        match self.next_ms {
            None => {
                self.next_ms = Some(now_ms + self.period_ms);
                false
            }
            Some(next) if now_ms >= next => {
                let mut following = next + self.period_ms;
                if following <= now_ms {
                    following = now_ms + self.period_ms;
                }
                self.next_ms = Some(following);
                true
            }
            Some(_) => false,
        }
    }
}

/// Configuration for a [`LineChart`].
#[derive(Clone, Debug)]
pub struct LineChartSpec {
    metric: String,
    width: f64,
    height: f64,
    labels: LabelDict,
    tooltip_id: String,
    capacity: usize,
    threshold: Option<f64>,
    title: String,
    unit: String,
}

impl LineChartSpec {
    /// Creates a spec for `metric` in a `width × height` box.
    pub fn new(metric: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            metric: metric.into(),
            width,
            height,
            labels: LabelDict::new(),
            tooltip_id: String::from("tooltip00"),
            capacity: DEFAULT_CAPACITY,
            threshold: Some(32.0),
            title: String::from("Hourly Temperature (°F)"),
            unit: String::from("°F"),
        }
    }

    /// Sets field display labels. A labeled metric gets a y-axis title.
    pub fn with_labels(mut self, labels: LabelDict) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the tooltip container id.
    pub fn with_tooltip_id(mut self, id: impl Into<String>) -> Self {
        self.tooltip_id = id.into();
        self
    }

    /// Sets the window capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the value below which the plot is shaded, or `None` for no band.
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the unit suffix used in the tooltip.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Builds the chart over `data`.
    pub fn build(self, data: &[Observation]) -> Result<LineChart, ChartError> {
        LineChart::new(self, data)
    }
}

/// A scrolling line chart.
#[derive(Clone, Debug)]
pub struct LineChart {
    spec: LineChartSpec,
    dims: Dimensions,
    window: SlidingWindow,
    y_scale: ScaleLinear,
    x_scale: ScaleTime,
    subtitle: String,
}

impl LineChart {
    /// Builds the chart and its initial window.
    pub fn new(spec: LineChartSpec, data: &[Observation]) -> Result<Self, ChartError> {
        let dims = Dimensions::new(spec.width, spec.height, MARGINS)?;
        let window = SlidingWindow::new(data, spec.metric.clone(), spec.capacity)?;
        let plot = dims.plot();

        let (lo, hi) = extent(window.history(), &spec.metric).ok_or_else(|| {
            ChartError::MissingMetric {
                field: spec.metric.clone(),
            }
        })?;
        let y0 = lo.min(0.0);
        let mut y1 = if hi > 0.0 { hi * 1.2 } else { 0.0 };
        if y1 <= y0 {
            y1 = y0 + 1.0;
        }
        let y_scale = ScaleLinear::new((y0, y1), (plot.y1, plot.y0));

        let history = window.history();
        let subtitle = match (history.first(), history.last()) {
            (Some(first), Some(last)) => format_date_range(first.time(), last.time()),
            _ => String::new(),
        };

        let x_scale = x_scale_for(&window, plot);
        Ok(Self {
            spec,
            dims,
            window,
            y_scale,
            x_scale,
            subtitle,
        })
    }

    /// The sliding window.
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// The current x-scale (epoch seconds to scene x).
    pub fn x_scale(&self) -> ScaleTime {
        self.x_scale
    }

    /// The y-scale (metric to scene y), fixed at build time.
    pub fn y_scale(&self) -> ScaleLinear {
        self.y_scale
    }

    /// Id of the line mark, the one that receives scroll transitions.
    pub fn line_id(&self) -> MarkId {
        LINE_ID
    }

    /// Advances the window and recomputes the x-scale.
    ///
    /// Returns the window outcome and the transitions to start, all at `now_ms`. Only an
    /// advance that keeps at least two points produces a transition; a reset jumps.
    pub fn tick(&mut self, now_ms: f64) -> (WindowUpdate, Vec<(MarkId, Transition)>) {
        let previous = self.x_scale;
        let previous_len = self.window.window().len();
        let update = self.window.advance();
        self.x_scale = x_scale_for(&self.window, self.dims.plot());

        let mut transitions = Vec::new();
        let points = self.window.window();
        if matches!(update, WindowUpdate::Advanced { .. }) && previous_len >= 2 && points.len() >= 2
        {
            let a = &points[points.len() - 2];
            let b = &points[points.len() - 1];
            let dx = previous.map(b.timestamp() as f64) - previous.map(a.timestamp() as f64);
            transitions.push((
                LINE_ID,
                Transition::settle_from(Vec2::new(dx, 0.0), now_ms, TRANSITION_MS)
                    .with_easing(Easing::CubicInOut),
            ));
        }
        (update, transitions)
    }

    fn line_points(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        let metric = self.window.metric();
        self.window
            .window()
            .iter()
            .map(move |o| (o.timestamp() as f64, o.value(metric)))
    }

    fn threshold_band(&self, plot: Rect) -> Option<Mark> {
        let threshold = self.spec.threshold?;
        let top = self.y_scale.map(threshold).clamp(plot.y0, plot.y1);
        Some(
            RectMarkSpec::new(BAND_ID, Rect::new(plot.x0, top, plot.x1, plot.y1))
                .with_fill(FREEZING_FILL)
                .with_layer(layer::THRESHOLD_BAND)
                .mark(),
        )
    }
}

fn x_scale_for(window: &SlidingWindow, plot: Rect) -> ScaleTime {
    let (t0, t1) = window.time_domain().unwrap_or((0, 0));
    let offset = window
        .window()
        .last()
        .map_or(0, |o| o.time().offset().local_minus_utc());
    ScaleTime::new((t0 as f64, t1 as f64), (plot.x0, plot.x1)).with_utc_offset(offset)
}

impl Chart for LineChart {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn marks(&self) -> Vec<Mark> {
        let dims = self.dims;
        let plot = dims.plot();
        let mut out = Vec::new();

        out.extend(self.threshold_band(plot));

        out.push(
            LineMarkSpec::new(LINE_ID, self.x_scale.into(), self.y_scale.into())
                .with_stroke(StrokeStyle::solid(SERIES_GOLD, 2.0))
                .with_clip(plot)
                .mark(self.line_points()),
        );

        let label_size = dims.font_size(0.0022, 1.3);
        out.extend(
            AxisSpec::bottom(X_AXIS_BASE, self.x_scale)
                .with_tick_count(8)
                .with_font_sizes(label_size, label_size)
                .with_title("Time")
                .with_title_offset(MARGINS.bottom - 20.0)
                .marks(plot),
        );
        let mut y_axis = AxisSpec::left(Y_AXIS_BASE, self.y_scale)
            .with_tick_count(6)
            .with_font_sizes(label_size, label_size);
        if self.spec.labels.contains_key(&self.spec.metric) {
            y_axis = y_axis
                .with_title(label_for(&self.spec.labels, &self.spec.metric))
                .with_title_offset(MARGINS.left - 15.0);
        }
        out.extend(y_axis.marks(plot));

        out.extend(
            TitleSpec::new(
                TITLE_ID,
                self.spec.title.clone(),
                dims.from_plot(Point::new(0.0, -50.0)),
            )
            .with_subtitle(self.subtitle.clone(), dims.from_plot(Point::new(0.0, -20.0)))
            .with_font_sizes(dims.font_size(0.002, 2.0), dims.font_size(0.0018, 1.8))
            .marks(),
        );

        out.push(
            RectMarkSpec::new(LISTEN_ID, plot)
                .with_fill(Color::TRANSPARENT)
                .with_layer(layer::HOVER_TARGETS)
                .mark(),
        );
        out
    }

    fn hover(&self, pointer: Point) -> Option<Hover> {
        let plot = self.dims.plot();
        if !plot.contains(pointer) {
            return None;
        }
        let t = self.x_scale.invert(pointer.x);
        let metric = self.window.metric();
        let (obs, value) = self
            .window
            .window()
            .iter()
            .filter_map(|o| Some((o, o.value(metric)?)))
            .min_by(|(a, _), (b, _)| {
                let da = (a.timestamp() as f64 - t).abs();
                let db = (b.timestamp() as f64 - t).abs();
                da.total_cmp(&db)
            })?;

        let at = Point::new(
            self.x_scale.map(obs.timestamp() as f64),
            self.y_scale.map(value),
        );
        let tooltip = Tooltip::new(
            self.spec.tooltip_id.clone(),
            at,
            TooltipShift::new(-50.0, 1000.0),
        )
        .with_field("date", format_datetime(obs.time(), HOUR_MINUTE_DATE))
        .with_field(
            "temperature",
            alloc::format!("{}{}", format_fixed(value, 1), self.spec.unit),
        );
        let highlight = PointMarkSpec::new(HIGHLIGHT_NS)
            .with_radius(4.0)
            .with_fill(Color::WHITE)
            .with_stroke(SERIES_GOLD, 2.0)
            .with_layer(layer::HIGHLIGHT)
            .mark(0, at);
        Some(Hover {
            tooltip,
            highlight: alloc::vec![highlight],
        })
    }

    fn tooltip_id(&self) -> &str {
        &self.spec.tooltip_id
    }
}
