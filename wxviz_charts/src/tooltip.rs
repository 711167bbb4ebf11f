// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content and placement.
//!
//! A [`Tooltip`] is a named container holding a few named text fields. It is positioned at an
//! anchor in chart coordinates and then shifted by a percentage of its own size, the way a CSS
//! `translate(x%, y%)` shifts an element.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use wxviz_core::Mark;

use crate::measure::TextMeasurer;

/// One named text field inside a tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipField {
    /// Field element id, e.g. `date`.
    pub id: &'static str,
    /// Formatted text.
    pub text: String,
}

/// Self-relative shift, in percent of the tooltip's own width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipShift {
    /// Horizontal shift in percent of the tooltip width.
    pub x_percent: f64,
    /// Vertical shift in percent of the tooltip height.
    pub y_percent: f64,
}

impl TooltipShift {
    /// Creates a shift.
    pub const fn new(x_percent: f64, y_percent: f64) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }
}

/// Tooltip content plus where it goes.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Id of the tooltip container.
    pub container_id: String,
    /// Fields in display order.
    pub fields: Vec<TooltipField>,
    /// Anchor in chart coordinates (the hovered datum plus margins).
    pub anchor: Point,
    /// Self-relative shift applied after anchoring.
    pub shift: TooltipShift,
}

/// Padding around tooltip text, in scene units.
const PADDING: f64 = 6.0;
/// Tooltip text size, in scene units.
pub const TOOLTIP_FONT_SIZE: f64 = 12.0;

impl Tooltip {
    /// Creates an empty tooltip.
    pub fn new(container_id: impl Into<String>, anchor: Point, shift: TooltipShift) -> Self {
        Self {
            container_id: container_id.into(),
            fields: Vec::new(),
            anchor,
            shift,
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, id: &'static str, text: impl Into<String>) -> Self {
        self.fields.push(TooltipField {
            id,
            text: text.into(),
        });
        self
    }

    /// Returns the text of field `id`.
    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.text.as_str())
    }

    /// Size of the tooltip box: the widest field plus padding, one line per field.
    pub fn size(&self, measurer: &dyn TextMeasurer) -> (f64, f64) {
        let (mut w, mut h) = (0.0_f64, 0.0_f64);
        for f in &self.fields {
            let (fw, fh) = measurer.measure(&f.text, TOOLTIP_FONT_SIZE);
            w = w.max(fw);
            h += fh;
        }
        (w + 2.0 * PADDING, h + 2.0 * PADDING)
    }

    /// The tooltip box in chart coordinates, after the self-relative shift.
    pub fn placement(&self, measurer: &dyn TextMeasurer) -> Rect {
        let (w, h) = self.size(measurer);
        let x0 = self.anchor.x + w * self.shift.x_percent / 100.0;
        let y0 = self.anchor.y + h * self.shift.y_percent / 100.0;
        Rect::new(x0, y0, x0 + w, y0 + h)
    }
}

/// The result of a hover hit-test: what to show and what to highlight.
#[derive(Clone, Debug)]
pub struct Hover {
    /// Tooltip to show.
    pub tooltip: Tooltip,
    /// Extra marks drawn while hovering (highlight dots, focus circles).
    pub highlight: Vec<Mark>,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn placement_shifts_by_own_size() {
        let t = Tooltip::new("tooltip00", Point::new(100.0, 50.0), TooltipShift::new(-50.0, 0.0))
            .with_field("date", "12:00")
            .with_field("temperature", "31.0°F");
        let (w, h) = t.size(&HeuristicTextMeasurer);
        let r = t.placement(&HeuristicTextMeasurer);
        assert!((r.x0 - (100.0 - 0.5 * w)).abs() < 1e-9);
        assert!((r.center().x - 100.0).abs() < 1e-9);
        assert_eq!(r.y0, 50.0);
        assert!((r.height() - h).abs() < 1e-9);
        assert_eq!(t.field("temperature"), Some("31.0°F"));
        assert_eq!(t.field("count"), None);
    }
}
