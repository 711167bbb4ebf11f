// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark payloads.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;

use crate::builder::MarkBuilder;
use crate::id::MarkId;

/// The geometric kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned filled rectangle.
    Rect,
    /// A filled and/or stroked path.
    Path,
    /// A single line of unshaped text.
    Text,
}

/// Horizontal anchor for text marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `x` is the start of the text.
    #[default]
    Start,
    /// `x` is the center of the text.
    Middle,
    /// `x` is the end of the text.
    End,
}

/// Vertical baseline for text marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// `y` is the vertical middle of the text.
    #[default]
    Middle,
    /// `y` is the alphabetic baseline.
    Alphabetic,
    /// `y` is the hanging baseline (top of the text).
    Hanging,
    /// `y` is the ideographic baseline.
    Ideographic,
}

/// Rectangle payload.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// Path payload.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables stroking.
    pub stroke_width: f64,
    /// Optional clip rectangle in scene coordinates.
    pub clip: Option<Rect>,
}

/// Text payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The evaluated contents of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectPayload),
    /// A path.
    Path(PathPayload),
    /// A line of text.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds for rects and paths.
    ///
    /// Text has no bounds without a text measurer, so this returns `None` for text.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }
}

/// A retained mark: stable id, paint order and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity across frames.
    pub id: MarkId,
    /// Geometric kind (always matches `payload`).
    pub kind: MarkKind,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Optional role tag for display backends (e.g. `"hover-target"`).
    pub class: Option<&'static str>,
    /// Evaluated contents.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark with the given id.
    ///
    /// The builder defaults to a rectangle; call [`MarkBuilder::path`] or
    /// [`MarkBuilder::text`] to switch kinds.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder::new(id)
    }

    /// Returns the mark bounds, see [`MarkPayload::bounds`].
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }
}
