// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Circle, Point, Shape};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use wxviz_core::{Mark, MarkId};

use crate::layer::{self, Layer};

/// Returns a circle path centered at `center`.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    // Tolerance is in scene units; sub-pixel is plenty for dots.
    Circle::new(center, radius).path_elements(0.1).collect()
}

/// Circles positioned in scene space, one per row.
///
/// Each circle's id is `MarkId::for_row(namespace, row_key)`, so ids stay stable across frames
/// as long as row keys do.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Id namespace for the generated marks.
    pub namespace: u64,
    /// Circle radius in scene coordinates.
    pub radius: f64,
    /// Default fill paint.
    pub fill: Brush,
    /// Optional outline paint and width.
    pub stroke: Option<(Brush, f64)>,
    /// Paint order and role.
    pub layer: Layer,
}

impl PointMarkSpec {
    /// Radius 4, black fill, on the [`layer::DOTS`] layer.
    pub fn new(namespace: u64) -> Self {
        Self {
            namespace,
            radius: 4.0,
            fill: Brush::Solid(css::BLACK),
            stroke: None,
            layer: layer::DOTS,
        }
    }

    /// Sets the circle radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the default fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Adds an outline.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = Some((stroke.into(), width));
        self
    }

    /// Moves the circles to another layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Generates one circle at `center` with the default fill.
    pub fn mark(&self, row_key: u64, center: Point) -> Mark {
        self.mark_with_fill(row_key, center, self.fill.clone())
    }

    /// Generates one circle at `center` with an explicit fill.
    pub fn mark_with_fill(&self, row_key: u64, center: Point, fill: impl Into<Brush>) -> Mark {
        let b = self
            .layer
            .apply(Mark::builder(MarkId::for_row(self.namespace, row_key)).path())
            .path_const(circle_path(center, self.radius))
            .fill_brush_const(fill);
        let b = match &self.stroke {
            Some((brush, width)) => b.stroke_brush_const(brush.clone()).stroke_width_const(*width),
            None => b.stroke_brush_const(Color::TRANSPARENT).stroke_width_const(0.0),
        };
        b.build()
    }

    /// Generates circles for `(row_key, center, fill)` triples.
    pub fn marks(&self, points: impl IntoIterator<Item = (u64, Point, Color)>) -> Vec<Mark> {
        points
            .into_iter()
            .map(|(row_key, center, fill)| self.mark_with_fill(row_key, center, fill))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn circles_use_row_ids_and_radius() {
        let spec = PointMarkSpec::new(0x30).with_radius(4.0);
        let marks = spec.marks(vec![
            (0, Point::new(10.0, 10.0), Color::BLACK),
            (7, Point::new(50.0, 20.0), Color::WHITE),
        ]);
        assert_eq!(marks[1].id, MarkId::for_row(0x30, 7));
        let b = marks[0].bounds().unwrap();
        assert!((b.width() - 8.0).abs() < 0.2);
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(b.x0 >= 5.0 && b.x1 <= 15.0 && b.y0 >= 5.0 && b.y1 <= 15.0, "{b:?}");
    }
}
