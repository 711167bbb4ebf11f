// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] pairs an instantiated continuous scale with an orientation and generates a
//! domain line, ticks, tick labels and an optional title. Charts lay axes out with fixed
//! margins, so the title sits a fixed `title_offset` away from the plot edge.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;
use wxviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::layer;
use crate::primitives::{RuleMarkSpec, TextMarkSpec};
use crate::scale::ScaleContinuous;
use crate::time::format_time_tick;

/// Paint and width for a stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// A stroke of `brush` at `stroke_width`.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Rule and label styling; black 1px rules, 10px labels, 11px title.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Domain line and ticks.
    pub rule: StrokeStyle,
    /// Tick label paint.
    pub label_fill: Brush,
    /// Tick label size.
    pub label_font_size: f64,
    /// Title paint.
    pub title_fill: Brush,
    /// Title size.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Which plot edge the axis runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Below the plot; labels hang under the ticks.
    Bottom,
    /// Left of the plot; labels end before the ticks.
    Left,
}

type TickFormatter = Arc<dyn Fn(f64, f64) -> String + Send + Sync>;

/// An axis along one edge of a plot.
///
/// Mark ids are derived from `id_base`: the domain line uses the base itself, tick `i` uses
/// `base + 1 + i`, its label `base + 1000 + i`, and the title `base + 9000`. Ticks keep their
/// ids while the scale moves, so a sliding window updates labels in place.
#[derive(Clone)]
pub struct AxisSpec {
    /// First id of the block this axis allocates from.
    pub id_base: u64,
    /// Scale whose range is in plot coordinates.
    pub scale: ScaleContinuous,
    /// Plot edge.
    pub orient: AxisOrient,
    /// Target tick count; the scale picks round values near it.
    pub tick_count: usize,
    /// Tick length.
    pub tick_size: f64,
    /// Space between a tick and its label.
    pub tick_padding: f64,
    /// Paint and sizes.
    pub style: AxisStyle,
    /// Title text.
    pub title: Option<String>,
    /// Distance from the plot edge to the title anchor.
    pub title_offset: f64,
    /// Label formatter, called with `(value, step)`.
    pub tick_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("orient", &self.orient)
            .field("scale", &self.scale)
            .field("tick_count", &self.tick_count)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl AxisSpec {
    /// Creates an axis with 10 ticks of size 6, no title, and the default style.
    ///
    /// Time scales default to [`format_time_tick`] in the scale's display offset; linear
    /// scales print just enough decimals for the tick step.
    pub fn new(id_base: u64, scale: impl Into<ScaleContinuous>, orient: AxisOrient) -> Self {
        let scale = scale.into();
        let tick_formatter: Option<TickFormatter> = match scale {
            ScaleContinuous::Time(t) => {
                let offset = t.offset();
                Some(Arc::new(move |v, step| format_time_tick(v, step, offset)))
            }
            ScaleContinuous::Linear(_) => None,
        };
        Self {
            id_base,
            scale,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            title: None,
            title_offset: 40.0,
            tick_formatter,
        }
    }

    /// An axis below the plot.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleContinuous>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// An axis left of the plot.
    pub fn left(id_base: u64, scale: impl Into<ScaleContinuous>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Sets the target tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Replaces the label formatter.
    pub fn with_tick_formatter(
        mut self,
        f: impl Fn(f64, f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Sets label and title font sizes.
    pub fn with_font_sizes(mut self, label: f64, title: f64) -> Self {
        self.style.label_font_size = label;
        self.style.title_font_size = title;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets how far the title sits from the plot edge.
    pub fn with_title_offset(mut self, title_offset: f64) -> Self {
        self.title_offset = title_offset;
        self
    }

    /// Id of the title mark.
    pub fn title_id(&self) -> MarkId {
        MarkId::from_raw(self.id_base + 9000)
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Domain line, ticks, labels, and title for `plot`.
    ///
    /// Ticks whose position falls outside the plot are skipped.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let ticks = self.scale.ticks(self.tick_count);
        let step = tick_step(&ticks);
        let tick_size = self.tick_size.abs();
        let gap = tick_size + self.tick_padding.max(0.0);
        let rule = &self.style.rule;

        let mut out = Vec::new();

        let domain = match self.orient {
            AxisOrient::Bottom => {
                RuleMarkSpec::horizontal(MarkId::from_raw(self.id_base), plot.y1, plot.x0, plot.x1)
            }
            AxisOrient::Left => {
                RuleMarkSpec::vertical(MarkId::from_raw(self.id_base), plot.x0, plot.y0, plot.y1)
            }
        };
        out.push(
            domain
                .with_stroke(rule.brush.clone(), rule.stroke_width)
                .mark(),
        );

        for (i, v) in ticks.iter().copied().enumerate() {
            let pos = self.scale.map(v);
            let inside = match self.orient {
                AxisOrient::Bottom => pos >= plot.x0 - 1.0e-9 && pos <= plot.x1 + 1.0e-9,
                AxisOrient::Left => pos >= plot.y0 - 1.0e-9 && pos <= plot.y1 + 1.0e-9,
            };
            if !inside {
                continue;
            }
            let tick_id = MarkId::from_raw(self.id_base + 1 + i as u64);
            let label_id = MarkId::from_raw(self.id_base + 1000 + i as u64);
            let label = self.format_tick(v, step);

            let (tick, text) = match self.orient {
                AxisOrient::Bottom => (
                    RuleMarkSpec::vertical(tick_id, pos, plot.y1, plot.y1 + tick_size),
                    TextMarkSpec::new(label_id, (pos, plot.y1 + gap), label)
                        .with_alignment(TextAnchor::Middle, TextBaseline::Hanging),
                ),
                AxisOrient::Left => (
                    RuleMarkSpec::horizontal(tick_id, pos, plot.x0 - tick_size, plot.x0),
                    TextMarkSpec::new(label_id, (plot.x0 - gap, pos), label)
                        .with_alignment(TextAnchor::End, TextBaseline::Middle),
                ),
            };
            out.push(
                tick.with_stroke(rule.brush.clone(), rule.stroke_width)
                    .mark(),
            );
            out.push(
                text.with_style(self.style.label_font_size, self.style.label_fill.clone())
                    .with_layer(layer::AXIS_LABELS)
                    .mark(),
            );
        }

        if let Some(title) = &self.title {
            let spec = match self.orient {
                AxisOrient::Bottom => TextMarkSpec::new(
                    self.title_id(),
                    (0.5 * (plot.x0 + plot.x1), plot.y1 + self.title_offset),
                    title.clone(),
                ),
                AxisOrient::Left => TextMarkSpec::new(
                    self.title_id(),
                    (plot.x0 - self.title_offset, 0.5 * (plot.y0 + plot.y1)),
                    title.clone(),
                )
                .with_angle(-90.0),
            };
            out.push(
                spec.with_alignment(TextAnchor::Middle, TextBaseline::Middle)
                    .with_style(self.style.title_font_size, self.style.title_fill.clone())
                    .with_layer(layer::AXIS_TITLES)
                    .mark(),
            );
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use wxviz_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::scale::{ScaleLinear, ScaleTime};

    fn texts(marks: &[Mark]) -> Vec<(MarkId, String)> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((m.id, t.text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn left_axis_labels_every_tick_inside_the_plot() {
        let plot = Rect::new(60.0, 90.0, 585.0, 330.0);
        let scale = ScaleLinear::new((0.0, 60.0), (plot.y1, plot.y0));
        let marks = AxisSpec::left(100, scale).with_tick_count(6).marks(plot);
        let labels: Vec<String> = texts(&marks).into_iter().map(|(_, t)| t).collect();
        assert_eq!(labels, ["0", "10", "20", "30", "40", "50", "60"]);
        assert!(marks.iter().any(|m| m.id == MarkId::from_raw(100)));
    }

    #[test]
    fn custom_formatter_is_used() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let scale = ScaleLinear::new((0.0, 10.0), (plot.x0, plot.x1));
        let marks = AxisSpec::bottom(1, scale)
            .with_tick_count(3)
            .with_tick_formatter(|_v, _step| String::from("X"))
            .marks(plot);
        let labels = texts(&marks);
        assert!(!labels.is_empty());
        assert!(labels.iter().all(|(_, t)| t == "X"));
    }

    #[test]
    fn titles_sit_at_fixed_offsets() {
        let plot = Rect::new(70.0, 60.0, 290.0, 230.0);
        let scale = ScaleLinear::new((0.0, 1.0), (plot.x0, plot.x1));
        let bottom = AxisSpec::bottom(1, scale)
            .with_title("Dew point")
            .with_title_offset(60.0);
        let marks = bottom.marks(plot);
        let title = marks.iter().find(|m| m.id == bottom.title_id()).unwrap();
        let MarkPayload::Text(t) = &title.payload else {
            panic!("title is not text");
        };
        assert_eq!(t.pos.y, plot.y1 + 60.0);
        assert_eq!(t.pos.x, 180.0);

        let left = AxisSpec::left(2000, ScaleLinear::new((0.0, 1.0), (plot.y1, plot.y0)))
            .with_title("Humidity")
            .with_title_offset(45.0);
        let marks = left.marks(plot);
        let title = marks.iter().find(|m| m.id == left.title_id()).unwrap();
        let MarkPayload::Text(t) = &title.payload else {
            panic!("title is not text");
        };
        assert_eq!(t.pos.x, plot.x0 - 45.0);
        assert_eq!(t.angle, -90.0);
    }

    #[test]
    fn time_axis_defaults_to_clock_labels() {
        let plot = Rect::new(0.0, 0.0, 500.0, 100.0);
        // 2024-03-05T00:00:00-06:00 through the next noon.
        let t0 = 1_709_618_400.0;
        let scale = ScaleTime::new((t0, t0 + 12.0 * 3600.0), (plot.x0, plot.x1))
            .with_utc_offset(-6 * 3600);
        let marks = AxisSpec::bottom(1, scale).with_tick_count(4).marks(plot);
        let labels: Vec<String> = texts(&marks).into_iter().map(|(_, t)| t).collect();
        assert_eq!(labels, ["Tue 05", "03 AM", "06 AM", "09 AM", "12 PM"]);
        assert!(
            marks
                .iter()
                .filter(|m| m.kind == MarkKind::Path)
                .all(|m| m.bounds().is_some())
        );
    }
}
