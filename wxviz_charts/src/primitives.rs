// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constant-geometry marks: filled rects, stroked rules, and text.
//!
//! These are the pieces guides and overlays are made of (threshold band, histogram bars, axis
//! ticks, the mean marker, labels). Each spec takes a [`Layer`] for paint order and role.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use wxviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::layer::{self, Layer};
use crate::measure::{TextMeasurer, text_box};

/// A filled rectangle.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Geometry, normalized to non-negative size.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Paint order and role.
    pub layer: Layer,
}

impl RectMarkSpec {
    /// A rect on the [`layer::BARS`] layer.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect: rect.abs(),
            fill: Brush::default(),
            layer: layer::BARS,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Moves the rect to another layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Builds the mark.
    pub fn mark(&self) -> Mark {
        self.layer
            .apply(Mark::builder(self.id).rect())
            .rect_const(self.rect)
            .fill_brush_const(self.fill.clone())
            .build()
    }
}

/// A straight stroked segment.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// One end.
    pub from: Point,
    /// The other end.
    pub to: Point,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
    /// Paint order and role.
    pub layer: Layer,
}

impl RuleMarkSpec {
    /// A 1px black rule on the [`layer::AXIS_RULES`] layer.
    pub fn new(id: MarkId, from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Self {
            id,
            from: from.into(),
            to: to.into(),
            stroke: Brush::Solid(css::BLACK),
            stroke_width: 1.0,
            layer: layer::AXIS_RULES,
        }
    }

    /// A rule at height `y` from `x0` to `x1`.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, (x0, y), (x1, y))
    }

    /// A rule at `x` from `y0` to `y1`.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, (x, y0), (x, y1))
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Moves the rule to another layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Builds the mark as a two-point path.
    pub fn mark(&self) -> Mark {
        let mut segment = BezPath::new();
        segment.move_to(self.from);
        segment.line_to(self.to);
        self.layer
            .apply(Mark::builder(self.id).path())
            .path_const(segment)
            .fill_const(Color::TRANSPARENT)
            .stroke_brush_const(self.stroke.clone())
            .stroke_width_const(self.stroke_width)
            .build()
    }
}

/// One line of unshaped text.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor point.
    pub pos: Point,
    /// Content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Rotation in degrees about `pos`.
    pub angle: f64,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Paint order and role.
    pub layer: Layer,
}

impl TextMarkSpec {
    /// Black 12px text, start-anchored on the alphabetic baseline, on the
    /// [`layer::TITLES`] layer.
    pub fn new(id: MarkId, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            id,
            pos: pos.into(),
            text: text.into(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::Solid(css::BLACK),
            layer: layer::TITLES,
        }
    }

    /// Sets font size and fill together.
    pub fn with_style(mut self, font_size: f64, fill: impl Into<Brush>) -> Self {
        self.font_size = font_size;
        self.fill = fill.into();
        self
    }

    /// Sets horizontal and vertical alignment.
    pub fn with_alignment(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    /// Rotates the text about its anchor.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Moves the text to another layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Approximate unrotated extent.
    pub fn bounds(&self, measurer: &dyn TextMeasurer) -> Rect {
        text_box(
            measurer,
            &self.text,
            self.pos,
            self.font_size,
            self.anchor,
            self.baseline,
        )
    }

    /// Builds the mark.
    pub fn mark(&self) -> Mark {
        self.layer
            .apply(Mark::builder(self.id).text())
            .x_const(self.pos.x)
            .y_const(self.pos.y)
            .text_const(self.text.clone())
            .font_size_const(self.font_size)
            .angle_const(self.angle)
            .text_anchor(self.anchor)
            .text_baseline(self.baseline)
            .fill_brush_const(self.fill.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use wxviz_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn inverted_rect_is_normalized() {
        let m = RectMarkSpec::new(MarkId::from_raw(1), Rect::new(10.0, 20.0, 0.0, 5.0)).mark();
        let MarkPayload::Rect(r) = &m.payload else {
            panic!("expected a rect payload");
        };
        assert_eq!(r.rect, Rect::new(0.0, 5.0, 10.0, 20.0));
        assert_eq!(m.class, Some("hover-target"));
    }

    #[test]
    fn rule_is_a_stroked_two_point_path() {
        let m = RuleMarkSpec::vertical(MarkId::from_raw(2), 5.0, 0.0, 10.0)
            .with_stroke(css::RED, 3.0)
            .with_layer(layer::MEAN_RULE)
            .mark();
        assert_eq!(m.kind, MarkKind::Path);
        assert_eq!(m.z_index, layer::MEAN_RULE.z_index);
        assert_eq!(m.bounds(), Some(Rect::new(5.0, 0.0, 5.0, 10.0)));
    }

    #[test]
    fn text_bounds_follow_alignment() {
        let spec = TextMarkSpec::new(MarkId::from_raw(3), (50.0, 50.0), "12 PM")
            .with_style(10.0, css::BLACK)
            .with_alignment(TextAnchor::Middle, TextBaseline::Hanging);
        let b = spec.bounds(&HeuristicTextMeasurer);
        assert!((b.center().x - 50.0).abs() < 1e-9);
        assert_eq!(b.y0, 50.0);
        assert_eq!(spec.mark().class, Some("title"));
    }
}
