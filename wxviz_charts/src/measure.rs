// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement.
//!
//! Text marks carry unshaped strings; sizing tooltips and title blocks only needs a rough
//! extent, which a [`TextMeasurer`] supplies.

use kurbo::{Point, Rect};
use wxviz_core::{TextAnchor, TextBaseline};

/// Measures unshaped single-line text.
pub trait TextMeasurer {
    /// Returns `(width, line_height)` in scene units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Average-advance estimate: 0.6em per character, 1.2em line height.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let advance = 0.6 * font_size;
        (advance * text.chars().count() as f64, 1.2 * font_size)
    }
}

/// The box a line of text covers when drawn at `pos` with the given alignment.
pub fn text_box(
    measurer: &dyn TextMeasurer,
    text: &str,
    pos: Point,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
) -> Rect {
    let (w, h) = measurer.measure(text, font_size);
    let x0 = match anchor {
        TextAnchor::Start => pos.x,
        TextAnchor::Middle => pos.x - 0.5 * w,
        TextAnchor::End => pos.x - w,
    };
    // Share of the line box above `pos.y`.
    let above = match baseline {
        TextBaseline::Alphabetic => 0.8,
        TextBaseline::Ideographic => 1.0,
        TextBaseline::Middle => 0.5,
        TextBaseline::Hanging => 0.0,
    };
    Rect::new(x0, pos.y - above * h, x0 + w, pos.y + (1.0 - above) * h)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn anchors_and_baselines_place_the_box() {
        let m = HeuristicTextMeasurer;
        let at = Point::new(100.0, 50.0);
        // "abcd" at 10px: 24 wide, 12 tall.
        let start = text_box(&m, "abcd", at, 10.0, TextAnchor::Start, TextBaseline::Hanging);
        assert_eq!(start, Rect::new(100.0, 50.0, 124.0, 62.0));

        let end = text_box(&m, "abcd", at, 10.0, TextAnchor::End, TextBaseline::Middle);
        assert_eq!(end, Rect::new(76.0, 44.0, 100.0, 56.0));

        let mid = text_box(&m, "abcd", at, 10.0, TextAnchor::Middle, TextBaseline::Alphabetic);
        assert!((mid.center().x - 100.0).abs() < 1e-9);
        assert!((mid.y1 - (50.0 + 0.2 * 12.0)).abs() < 1e-9);
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let (w, _) = HeuristicTextMeasurer.measure("°F", 10.0);
        assert!((w - 12.0).abs() < 1e-9);
    }
}
