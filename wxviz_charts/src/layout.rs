// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! Every chart is an outer `width × height` box with fixed margins around a plot rectangle
//! (the "bounds"). All mark coordinates are in the outer box, so the plot rectangle starts at
//! `(margin.left, margin.top)`.
//!
//! Font sizes scale with the outer width and are capped, so small charts get small text and
//! wide charts do not get huge text.

use kurbo::{Point, Rect};

use crate::error::ChartError;

/// Pixels per `em` used when turning relative font sizes into scene units.
pub const EM_PX: f64 = 16.0;

/// Per-side margins around the plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Outer chart size plus margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Margins around the plot.
    pub margin: Margins,
}

impl Dimensions {
    /// Creates dimensions, rejecting sizes that leave no finite, positive plot area.
    pub fn new(width: f64, height: f64, margin: Margins) -> Result<Self, ChartError> {
        let out = Self {
            width,
            height,
            margin,
        };
        let (bw, bh) = (out.bounded_width(), out.bounded_height());
        if !(bw.is_finite() && bh.is_finite() && bw > 0.0 && bh > 0.0) {
            return Err(ChartError::InvalidDimensions { width, height });
        }
        Ok(out)
    }

    /// Width of the plot rectangle.
    pub fn bounded_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plot rectangle.
    pub fn bounded_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// The plot rectangle in outer coordinates.
    pub fn plot(&self) -> Rect {
        Rect::new(
            self.margin.left,
            self.margin.top,
            self.width - self.margin.right,
            self.height - self.margin.bottom,
        )
    }

    /// The outer rectangle.
    pub fn view(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Converts a point relative to the plot origin into outer coordinates.
    pub fn from_plot(&self, p: Point) -> Point {
        Point::new(p.x + self.margin.left, p.y + self.margin.top)
    }

    /// Font size in scene units: `factor × width` em, capped at `cap_em`.
    pub fn font_size(&self, factor: f64, cap_em: f64) -> f64 {
        (factor * self.width).min(cap_em) * EM_PX
    }

    /// Stroke width: `factor × width`, capped at `cap`.
    pub fn stroke_width(&self, factor: f64, cap: f64) -> f64 {
        (factor * self.width).min(cap)
    }
}
