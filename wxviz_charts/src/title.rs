// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles live in the top margin at fixed offsets from the plot origin and are rendered as one
//! or two text marks. The subtitle mark uses the title id plus one.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use wxviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::primitives::TextMarkSpec;

/// A chart-level title with an optional subtitle.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Title anchor position in scene coordinates.
    pub pos: Point,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Optional subtitle text and its anchor position.
    pub subtitle: Option<(String, Point)>,
    /// Subtitle font size in scene coordinates.
    pub subtitle_font_size: f64,
    /// Fill paint shared by title and subtitle.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
}

impl TitleSpec {
    /// Creates a start-anchored black title.
    pub fn new(id: MarkId, text: impl Into<String>, pos: impl Into<Point>) -> Self {
        Self {
            id,
            text: text.into(),
            pos: pos.into(),
            font_size: 16.0,
            subtitle: None,
            subtitle_font_size: 14.0,
            fill: Brush::Solid(css::BLACK),
            anchor: TextAnchor::Start,
        }
    }

    /// Sets the subtitle text and position.
    pub fn with_subtitle(mut self, text: impl Into<String>, pos: impl Into<Point>) -> Self {
        self.subtitle = Some((text.into(), pos.into()));
        self
    }

    /// Sets title and subtitle font sizes.
    pub fn with_font_sizes(mut self, title: f64, subtitle: f64) -> Self {
        self.font_size = title;
        self.subtitle_font_size = subtitle;
        self
    }

    /// Rough scene bounds of the title block, for layout checks.
    pub fn bounds(&self, measurer: &dyn TextMeasurer) -> Rect {
        self.lines()
            .map(|line| line.bounds(measurer))
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::from_origin_size(self.pos, (0.0, 0.0)))
    }

    /// Emits the title marks.
    pub fn marks(&self) -> Vec<Mark> {
        self.lines().map(|line| line.mark()).collect()
    }

    fn lines(&self) -> impl Iterator<Item = TextMarkSpec> {
        let line = |id: MarkId, pos: Point, text: &str, font_size: f64| {
            TextMarkSpec::new(id, pos, text)
                .with_style(font_size, self.fill.clone())
                .with_alignment(self.anchor, TextBaseline::Alphabetic)
        };
        let title = line(self.id, self.pos, &self.text, self.font_size);
        let subtitle = self.subtitle.as_ref().map(|(sub, pos)| {
            line(
                MarkId::from_raw(self.id.0.wrapping_add(1)),
                *pos,
                sub,
                self.subtitle_font_size,
            )
        });
        core::iter::once(title).chain(subtitle)
    }
}
