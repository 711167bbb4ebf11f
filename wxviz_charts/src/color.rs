// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named colors and a linear color scale.

use peniko::Color;

use crate::scale::ScaleLinear;

pub use peniko::color::palette::css::{DARK_SLATE_GRAY, MAROON, SKY_BLUE};

/// Line series stroke.
pub const SERIES_GOLD: Color = Color::from_rgb8(0xaf, 0x93, 0x58);
/// Freezing band fill.
pub const FREEZING_FILL: Color = Color::from_rgb8(0xe0, 0xf3, 0xf3);
/// Histogram bar fill.
pub const BAR_FILL: Color = Color::from_rgb8(0x9f, 0xd3, 0xc7);
/// Mean rule stroke.
pub const MEAN_STROKE: Color = Color::from_rgb8(0x14, 0x28, 0x50);

/// Maps a numeric domain onto a two-color gradient (straight sRGB interpolation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScaleLinear {
    scale: ScaleLinear,
    from: Color,
    to: Color,
}

impl ColorScaleLinear {
    /// Creates a color scale mapping `domain.0` to `from` and `domain.1` to `to`.
    pub fn new(domain: (f64, f64), from: Color, to: Color) -> Self {
        Self {
            scale: ScaleLinear::new(domain, (0.0, 1.0)),
            from,
            to,
        }
    }

    /// Returns the color for `v`; values outside the domain extrapolate and then clamp per
    /// channel.
    pub fn map(&self, v: f64) -> Color {
        let t = self.scale.map(v);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "interpolation parameter only needs f32 precision"
        )]
        let t = t as f32;
        let a = self.from.components;
        let b = self.to.components;
        let mut out = [0.0_f32; 4];
        for (i, c) in out.iter_mut().enumerate() {
            *c = (a[i] * (1.0 - t) + b[i] * t).clamp(0.0, 1.0);
        }
        Color::new(out)
    }

    /// Returns the numeric domain.
    pub fn domain(&self) -> (f64, f64) {
        self.scale.domain()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn endpoints_map_to_range_colors() {
        let s = ColorScaleLinear::new((0.0, 100.0), SKY_BLUE, DARK_SLATE_GRAY);
        assert_eq!(s.map(0.0), SKY_BLUE);
        assert_eq!(s.map(100.0), DARK_SLATE_GRAY);
        let mid = s.map(50.0).to_rgba8();
        assert!((i32::from(mid.r) - (0x87 + 0x2f) / 2).abs() <= 1, "{mid:?}");
    }

    #[test]
    fn scatter_palette_is_the_css_palette() {
        let rgb = |c: Color| {
            let c = c.to_rgba8();
            (c.r, c.g, c.b, c.a)
        };
        assert_eq!(rgb(SKY_BLUE), (0x87, 0xce, 0xeb, 0xff));
        assert_eq!(rgb(DARK_SLATE_GRAY), (0x2f, 0x4f, 0x4f, 0xff));
        assert_eq!(rgb(MAROON), (0x80, 0x00, 0x00, 0xff));
    }
}
