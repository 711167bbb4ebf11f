// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A static scatter plot with Voronoi hover targets.
//!
//! Every plotted row gets a dot and a transparent Voronoi cell. Because the cells partition the
//! plot, the pointer always hovers the nearest dot without having to hit its few pixels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Color;
use wxviz_core::{Mark, MarkId};

use crate::axis::AxisSpec;
use crate::color::{ColorScaleLinear, DARK_SLATE_GRAY, MAROON, SKY_BLUE};
use crate::error::ChartError;
use crate::format::format_fixed;
use crate::layer;
use crate::layout::{Dimensions, Margins};
use crate::observation::{LabelDict, Observation, extent, label_for};
use crate::point_mark::PointMarkSpec;
use crate::scale::ScaleLinear;
use crate::surface::Chart;
use crate::time::{HOUR_MINUTE_SECOND_DATE, format_datetime};
use crate::title::TitleSpec;
use crate::tooltip::{Hover, Tooltip, TooltipShift};
use crate::voronoi::Voronoi;

const MARGINS: Margins = Margins::new(60.0, 10.0, 70.0, 70.0);

const TITLE_ID: MarkId = MarkId(10);
const X_AXIS_BASE: u64 = 100;
const Y_AXIS_BASE: u64 = 20_000;
const DOT_NS: u64 = 0x5c;
const CELL_NS: u64 = 0x5d;
const HIGHLIGHT_NS: u64 = 0x5e;

/// Configuration for a [`ScatterChart`].
#[derive(Clone, Debug)]
pub struct ScatterChartSpec {
    x_metric: String,
    y_metric: String,
    color_metric: String,
    width: f64,
    labels: LabelDict,
    tooltip_id: String,
}

impl ScatterChartSpec {
    /// Creates a spec plotting `x` against `y`, colored by `color`, in a `width × width` box.
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        color: impl Into<String>,
        width: f64,
    ) -> Self {
        Self {
            x_metric: x.into(),
            y_metric: y.into(),
            color_metric: color.into(),
            width,
            labels: LabelDict::new(),
            tooltip_id: String::from("tooltip01"),
        }
    }

    /// Sets field display labels for the axis titles.
    pub fn with_labels(mut self, labels: LabelDict) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the tooltip container id.
    pub fn with_tooltip_id(mut self, id: impl Into<String>) -> Self {
        self.tooltip_id = id.into();
        self
    }

    /// Builds the chart over `data`.
    pub fn build(self, data: &[Observation]) -> Result<ScatterChart, ChartError> {
        ScatterChart::new(self, data)
    }
}

#[derive(Clone, Debug)]
struct Dot {
    row: usize,
    at: Point,
    x: f64,
    y: f64,
    c: f64,
}

/// A built scatter plot.
#[derive(Debug)]
pub struct ScatterChart {
    spec: ScatterChartSpec,
    dims: Dimensions,
    x_scale: ScaleLinear,
    y_scale: ScaleLinear,
    color_scale: ColorScaleLinear,
    data: Vec<Observation>,
    dots: Vec<Dot>,
    voronoi: Voronoi,
}

impl ScatterChart {
    /// Builds scales, dots and the Voronoi partition.
    ///
    /// Rows missing any of the three metrics are not plotted.
    pub fn new(spec: ScatterChartSpec, data: &[Observation]) -> Result<Self, ChartError> {
        if data.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        let dims = Dimensions::new(spec.width, spec.width, MARGINS)?;
        let plot = dims.plot();
        let metric_extent = |field: &str| {
            extent(data, field).ok_or_else(|| ChartError::MissingMetric {
                field: field.into(),
            })
        };
        let x_scale =
            ScaleLinear::new(metric_extent(&spec.x_metric)?, (plot.x0, plot.x1)).nice(10);
        let y_scale =
            ScaleLinear::new(metric_extent(&spec.y_metric)?, (plot.y1, plot.y0)).nice(10);
        let color_scale = ColorScaleLinear::new(
            metric_extent(&spec.color_metric)?,
            SKY_BLUE,
            DARK_SLATE_GRAY,
        );

        let dots: Vec<Dot> = data
            .iter()
            .enumerate()
            .filter_map(|(row, o)| {
                let x = o.value(&spec.x_metric)?;
                let y = o.value(&spec.y_metric)?;
                let c = o.value(&spec.color_metric)?;
                Some(Dot {
                    row,
                    at: Point::new(x_scale.map(x), y_scale.map(y)),
                    x,
                    y,
                    c,
                })
            })
            .collect();
        let sites: Vec<Point> = dots.iter().map(|d| d.at).collect();
        let voronoi = Voronoi::new(&sites, plot);
        log::debug!(
            "scatter of `{}` vs `{}`: {} of {} rows plotted",
            spec.y_metric,
            spec.x_metric,
            dots.len(),
            data.len()
        );

        Ok(Self {
            spec,
            dims,
            x_scale,
            y_scale,
            color_scale,
            data: data.to_vec(),
            dots,
            voronoi,
        })
    }

    /// The x-scale.
    pub fn x_scale(&self) -> ScaleLinear {
        self.x_scale
    }

    /// The y-scale.
    pub fn y_scale(&self) -> ScaleLinear {
        self.y_scale
    }

    /// The color scale.
    pub fn color_scale(&self) -> ColorScaleLinear {
        self.color_scale
    }

    /// Scene position of dataset row `row`, if it is plotted.
    pub fn dot_position(&self, row: usize) -> Option<Point> {
        self.dots.iter().find(|d| d.row == row).map(|d| d.at)
    }

    /// Dataset row of the dot whose Voronoi cell contains `pointer`.
    pub fn nearest_row(&self, pointer: Point) -> Option<usize> {
        let b = self.voronoi.bounds();
        if !(pointer.x >= b.x0 && pointer.x <= b.x1 && pointer.y >= b.y0 && pointer.y <= b.y1) {
            return None;
        }
        self.voronoi.find(pointer).map(|i| self.dots[i].row)
    }

    /// The Voronoi partition over plotted dots, in plotting order.
    pub fn voronoi(&self) -> &Voronoi {
        &self.voronoi
    }
}

impl Chart for ScatterChart {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn marks(&self) -> Vec<Mark> {
        let dims = self.dims;
        let plot = dims.plot();
        let mut out = Vec::new();

        let dot_spec = PointMarkSpec::new(DOT_NS).with_radius(4.0);
        out.extend(dot_spec.marks(
            self.dots
                .iter()
                .map(|d| (d.row as u64, d.at, self.color_scale.map(d.c))),
        ));

        let label_size = dims.font_size(0.004, 1.3);
        out.extend(
            AxisSpec::bottom(X_AXIS_BASE, self.x_scale)
                .with_font_sizes(label_size, label_size)
                .with_title(label_for(&self.spec.labels, &self.spec.x_metric))
                .with_title_offset(MARGINS.bottom - 10.0)
                .marks(plot),
        );
        out.extend(
            AxisSpec::left(Y_AXIS_BASE, self.y_scale)
                .with_tick_count(5)
                .with_font_sizes(label_size, label_size)
                .with_title(label_for(&self.spec.labels, &self.spec.y_metric))
                .with_title_offset(MARGINS.left - 25.0)
                .marks(plot),
        );
        out.extend(
            TitleSpec::new(
                TITLE_ID,
                "Scatter plot",
                dims.from_plot(Point::new(-4.0, -30.0)),
            )
            .with_font_sizes(dims.font_size(0.004, 2.0), dims.font_size(0.004, 2.0))
            .marks(),
        );

        for (i, d) in self.dots.iter().enumerate() {
            let Some(path) = self.voronoi.cell_path(i) else {
                continue;
            };
            out.push(
                layer::HOVER_TARGETS
                    .apply(Mark::builder(MarkId::for_row(CELL_NS, d.row as u64)).path())
                    .path_const(path)
                    .fill_const(Color::TRANSPARENT)
                    .stroke_brush_const(Color::TRANSPARENT)
                    .stroke_width_const(0.0)
                    .build(),
            );
        }
        out
    }

    fn hover(&self, pointer: Point) -> Option<Hover> {
        let row = self.nearest_row(pointer)?;
        let dot = self.dots.iter().find(|d| d.row == row)?;
        let obs = &self.data[row];

        let tooltip = Tooltip::new(
            self.spec.tooltip_id.clone(),
            dot.at,
            TooltipShift::new(-45.0, -90.0),
        )
        .with_field("scatXmetric", format_fixed(dot.x, 2))
        .with_field("scatYmetric", format_fixed(dot.y, 2))
        .with_field("scatCmetric", format_fixed(dot.c, 2))
        .with_field(
            "scatTime",
            format_datetime(obs.time(), HOUR_MINUTE_SECOND_DATE),
        );
        let highlight = PointMarkSpec::new(HIGHLIGHT_NS)
            .with_radius(7.0)
            .with_fill(MAROON)
            .with_layer(layer::HIGHLIGHT)
            .mark(0, dot.at);
        Some(Hover {
            tooltip,
            highlight: alloc::vec![highlight],
        })
    }

    fn tooltip_id(&self) -> &str {
        &self.spec.tooltip_id
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::FixedOffset;
    use wxviz_core::MarkPayload;

    use super::*;
    use crate::window::tests::T0;

    fn data() -> Vec<Observation> {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        (0..120_i64)
            .map(|i| {
                let t = i as f64;
                Observation::from_timestamp(T0 + i * 3600, offset)
                    .unwrap()
                    .with_value("dewpoint", 20.0 + (t * 7.3) % 40.0)
                    .with_value("humidity", 30.0 + (t * 11.7) % 60.0)
                    .with_value("cloud_cover", (t * 3.1) % 100.0)
            })
            .collect()
    }

    fn chart(data: &[Observation]) -> ScatterChart {
        ScatterChartSpec::new("dewpoint", "humidity", "cloud_cover", 400.0)
            .build(data)
            .unwrap()
    }

    #[test]
    fn each_dot_hovers_itself() {
        let data = data();
        let c = chart(&data);
        for row in 0..data.len() {
            let at = c.dot_position(row).unwrap();
            assert_eq!(c.nearest_row(at), Some(row), "row {row}");
            let hover = c.hover(at).unwrap();
            let expected = format_fixed(data[row].value("humidity").unwrap(), 2);
            assert_eq!(hover.tooltip.field("scatYmetric"), Some(expected.as_str()));
        }
    }

    #[test]
    fn color_field_reports_the_color_metric() {
        let data = data();
        let c = chart(&data);
        let at = c.dot_position(7).unwrap();
        let hover = c.hover(at).unwrap();
        let expected = format_fixed(data[7].value("cloud_cover").unwrap(), 2);
        assert_eq!(hover.tooltip.field("scatCmetric"), Some(expected.as_str()));
        assert!(hover.tooltip.field("scatTime").unwrap().contains("March"));
    }

    #[test]
    fn rows_missing_a_metric_get_no_dot() {
        let mut data = data();
        data[3] = Observation::new(data[3].time()).with_value("dewpoint", 25.0);
        let c = chart(&data);
        assert!(c.dot_position(3).is_none());
        assert_eq!(c.voronoi().len(), data.len() - 1);
        assert!(
            !c.marks()
                .iter()
                .any(|m| m.id == MarkId::for_row(DOT_NS, 3))
        );
    }

    #[test]
    fn cells_cover_the_plot_and_axes_use_labels() {
        let data = data();
        let mut labels = LabelDict::new();
        labels.insert("dewpoint".into(), "Dew point (°F)".into());
        let c = ScatterChartSpec::new("dewpoint", "humidity", "cloud_cover", 400.0)
            .with_labels(labels)
            .build(&data)
            .unwrap();
        let marks = c.marks();
        let cells = marks
            .iter()
            .filter(|m| m.class == Some("hover-target"))
            .count();
        assert_eq!(cells, data.len());
        let texts: Vec<&str> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Dew point (°F)"));
        assert!(texts.contains(&"humidity"));
        assert!(texts.contains(&"Scatter plot"));
        assert!(c.hover(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn missing_metric_is_an_error() {
        let err = ScatterChartSpec::new("dewpoint", "nope", "cloud_cover", 400.0)
            .build(&data())
            .unwrap_err();
        assert_eq!(
            err,
            ChartError::MissingMetric {
                field: "nope".into()
            }
        );
    }
}
