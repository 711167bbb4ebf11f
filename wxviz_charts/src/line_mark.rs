// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

extern crate alloc;

use kurbo::{BezPath, Rect};
use peniko::Color;
use wxviz_core::{Mark, MarkId};

use crate::axis::StrokeStyle;
use crate::layer::{self, Layer};
use crate::scale::ScaleContinuous;

/// A line through `(x, y)` data points.
///
/// This generates a single [`wxviz_core::MarkKind::Path`] mark. Points whose `y` is `None` are
/// undefined: the path breaks there and resumes with a new sub-path at the next defined point.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable id for the mark emitted by this spec.
    pub id: MarkId,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Stroke style for the line.
    pub stroke: StrokeStyle,
    /// Optional clip rectangle.
    pub clip: Option<Rect>,
    /// Paint order and role.
    pub layer: Layer,
}

impl LineMarkSpec {
    /// Creates a line mark spec with a black stroke at width 1.
    pub fn new(id: MarkId, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id,
            x_scale,
            y_scale,
            stroke: StrokeStyle::default(),
            clip: None,
            layer: layer::LINE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Clips the line to `rect`.
    pub fn with_clip(mut self, rect: Rect) -> Self {
        self.clip = Some(rect);
        self
    }

    /// Moves the line to another layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Builds the scene-space path for `points`.
    pub fn path(&self, points: impl IntoIterator<Item = (f64, Option<f64>)>) -> BezPath {
        let mut p = BezPath::new();
        let mut pen_down = false;
        for (x, y) in points {
            let Some(y) = y else {
                pen_down = false;
                continue;
            };
            let pt = (self.x_scale.map(x), self.y_scale.map(y));
            if pen_down {
                p.line_to(pt);
            } else {
                p.move_to(pt);
                pen_down = true;
            }
        }
        p
    }

    /// Generates the line mark.
    pub fn mark(&self, points: impl IntoIterator<Item = (f64, Option<f64>)>) -> Mark {
        let mut b = self
            .layer
            .apply(Mark::builder(self.id).path())
            .path_const(self.path(points))
            .fill_const(Color::TRANSPARENT)
            .stroke_brush_const(self.stroke.brush.clone())
            .stroke_width_const(self.stroke.stroke_width);
        if let Some(clip) = self.clip {
            b = b.clip_const(clip);
        }
        b.build()
    }
}
