// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between pure chart layout and a display.
//!
//! A [`Chart`] computes marks and answers hover queries without touching any display. A
//! [`ChartSurface`] applies scene diffs, animates transitions, and shows tooltips. A
//! [`ChartView`] owns one of each plus the retained [`Scene`] that turns successive mark
//! sets into diffs, so the surface is mutated in place rather than rebuilt.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;
use wxviz_core::{Mark, MarkDiff, MarkId, Scene, Transition};

use crate::layout::Dimensions;
use crate::line_chart::LineChart;
use crate::tooltip::{Hover, Tooltip};
use crate::window::WindowUpdate;

/// A chart that can lay itself out and hit-test a pointer.
pub trait Chart {
    /// Outer size and margins.
    fn dimensions(&self) -> Dimensions;

    /// The full mark set for the current state.
    fn marks(&self) -> Vec<Mark>;

    /// What to show when the pointer is at `pointer` (chart coordinates), if anything.
    fn hover(&self, pointer: Point) -> Option<Hover>;

    /// Id of the tooltip container this chart writes into.
    fn tooltip_id(&self) -> &str;
}

/// An effectful display target.
pub trait ChartSurface {
    /// Applies enter/update/exit changes in order.
    fn apply_diffs(&mut self, diffs: &[MarkDiff]);

    /// Starts (or replaces) the positional transition on mark `id`.
    fn start_transition(&mut self, id: MarkId, transition: &Transition);

    /// Fills and positions a tooltip, then makes it visible.
    fn show_tooltip(&mut self, tooltip: &Tooltip);

    /// Hides the tooltip container `container_id`.
    fn hide_tooltip(&mut self, container_id: &str);
}

/// A chart bound to a surface.
#[derive(Debug)]
pub struct ChartView<C, S> {
    chart: C,
    surface: S,
    scene: Scene,
    highlight: Vec<Mark>,
    tooltip_visible: bool,
}

impl<C: Chart, S: ChartSurface> ChartView<C, S> {
    /// Binds `chart` to `surface`. Nothing is drawn until [`ChartView::render`].
    pub fn new(chart: C, surface: S) -> Self {
        Self {
            chart,
            surface,
            scene: Scene::new(),
            highlight: Vec::new(),
            tooltip_visible: false,
        }
    }

    /// Draws the chart's current marks plus any hover highlight.
    pub fn render(&mut self) {
        let mut marks = self.chart.marks();
        marks.extend(self.highlight.iter().cloned());
        self.present(marks, Vec::new());
    }

    /// Diffs `marks` against the previous frame, applies the diffs, then starts `transitions`.
    ///
    /// A transition on a mark that already has one replaces it.
    pub fn present(
        &mut self,
        marks: Vec<Mark>,
        transitions: impl IntoIterator<Item = (MarkId, Transition)>,
    ) {
        let diffs = self.scene.tick(marks);
        if !diffs.is_empty() {
            self.surface.apply_diffs(&diffs);
        }
        for (id, transition) in transitions {
            if self.scene.mark(id).is_none() {
                continue;
            }
            self.scene.start_transition(id, transition);
            self.surface.start_transition(id, &transition);
        }
    }

    /// Hit-tests `pointer` and shows or hides the tooltip and highlight.
    pub fn pointer_move(&mut self, pointer: Point) {
        match self.chart.hover(pointer) {
            Some(Hover { tooltip, highlight }) => {
                self.highlight = highlight;
                self.render();
                self.surface.show_tooltip(&tooltip);
                self.tooltip_visible = true;
            }
            None => self.pointer_leave(),
        }
    }

    /// Hides the tooltip and removes the highlight.
    pub fn pointer_leave(&mut self) {
        if !self.tooltip_visible && self.highlight.is_empty() {
            return;
        }
        self.highlight.clear();
        self.render();
        if self.tooltip_visible {
            self.surface.hide_tooltip(self.chart.tooltip_id());
            self.tooltip_visible = false;
        }
    }

    /// The bound chart.
    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// The retained scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ChartSurface> ChartView<LineChart, S> {
    /// Advances the line chart's window one step and presents the new frame.
    ///
    /// Settled transitions are dropped from the scene first.
    pub fn tick(&mut self, now_ms: f64) -> WindowUpdate {
        self.scene.retire_transitions(now_ms);
        let (update, transitions) = self.chart.tick(now_ms);
        let mut marks = self.chart.marks();
        marks.extend(self.highlight.iter().cloned());
        self.present(marks, transitions);
        update
    }
}
