// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An SVG-backed [`ChartSurface`] for `wxviz_charts_demo`.
//!
//! Diffs are applied to a retained element map. Transitions become SMIL `animateTransform`
//! elements and tooltips become absolutely positioned HTML boxes next to the SVG.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Brush;
use wxviz_charts::{ChartSurface, HeuristicTextMeasurer, TOOLTIP_FONT_SIZE, Tooltip};
use wxviz_core::{Easing, MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline, Transition};

#[derive(Debug)]
struct Element {
    z_index: i32,
    class: Option<&'static str>,
    payload: MarkPayload,
}

#[derive(Debug)]
pub(crate) struct SvgSurface {
    view_box: Rect,
    elements: HashMap<MarkId, Element>,
    transitions: HashMap<MarkId, Transition>,
    tooltips: BTreeMap<String, Tooltip>,
}

impl SvgSurface {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            elements: HashMap::new(),
            transitions: HashMap::new(),
            tooltips: BTreeMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn tooltip(&self, container_id: &str) -> Option<&Tooltip> {
        self.tooltips.get(container_id)
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box;
        let mut out = String::new();

        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );

        let mut ids: Vec<_> = self.elements.keys().copied().collect();
        ids.sort_by_key(|id| (self.elements[id].z_index, id.0));

        for id in ids {
            let animate = self.transitions.get(&id).map(animate_transform);
            write_element(&mut out, id, &self.elements[&id], animate.as_deref());
        }

        out.push_str("</svg>\n");
        out
    }

    /// Visible tooltips as positioned HTML boxes, in chart coordinates.
    pub(crate) fn tooltips_html(&self) -> String {
        let mut out = String::new();
        for tooltip in self.tooltips.values() {
            let r = tooltip.placement(&HeuristicTextMeasurer);
            let _ = write!(
                out,
                r#"<div class="tooltip" id="{}" style="left:{:.1}px;top:{:.1}px;min-width:{:.1}px;font-size:{}px">"#,
                escape_xml(&tooltip.container_id),
                r.x0,
                r.y0,
                r.width(),
                TOOLTIP_FONT_SIZE,
            );
            for field in &tooltip.fields {
                let _ = write!(
                    out,
                    r#"<div id="{}">{}</div>"#,
                    field.id,
                    escape_xml(&field.text)
                );
            }
            out.push_str("</div>\n");
        }
        out
    }
}

impl ChartSurface for SvgSurface {
    fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            let (id, z_index, class, payload) = match diff {
                MarkDiff::Exit { id, .. } => {
                    self.elements.remove(id);
                    self.transitions.remove(id);
                    continue;
                }
                MarkDiff::Enter {
                    id,
                    z_index,
                    class,
                    new,
                    ..
                } => (*id, *z_index, *class, new),
                MarkDiff::Update {
                    id,
                    new_z_index,
                    class,
                    new,
                    ..
                } => (*id, *new_z_index, *class, new),
            };
            // New geometry ends any running animation; a fresh one arrives after the diffs.
            self.transitions.remove(&id);
            self.elements.insert(
                id,
                Element {
                    z_index,
                    class,
                    payload: (**payload).clone(),
                },
            );
        }
    }

    fn start_transition(&mut self, id: MarkId, transition: &Transition) {
        self.transitions.insert(id, *transition);
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        self.tooltips.insert(tooltip.container_id.clone(), tooltip.clone());
    }

    fn hide_tooltip(&mut self, container_id: &str) {
        self.tooltips.remove(container_id);
    }
}

fn write_element(out: &mut String, id: MarkId, element: &Element, animate: Option<&str>) {
    match &element.payload {
        MarkPayload::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_class_attr(out, element.class);
            write_paint_attr(out, "fill", &r.fill);
            close_element(out, "rect", animate);
        }
        MarkPayload::Text(t) => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}" text-anchor="{}""#,
                t.pos.x,
                t.pos.y,
                t.font_size,
                baseline_name(t.baseline),
                anchor_name(t.anchor),
            );
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            write_class_attr(out, element.class);
            write_paint_attr(out, "fill", &t.fill);
            let _ = writeln!(
                out,
                ">{}{}</text>",
                escape_xml(&t.text),
                animate.unwrap_or_default()
            );
        }
        MarkPayload::Path(p) => {
            // The clip stays put while the path slides underneath it.
            if let Some(clip) = p.clip {
                let _ = write!(
                    out,
                    r#"<clipPath id="clip-{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip-{id})">"#,
                    clip.x0,
                    clip.y0,
                    clip.width(),
                    clip.height(),
                    id = id.0,
                );
            }
            let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
            write_class_attr(out, element.class);
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
            }
            close_element(out, "path", animate);
            if p.clip.is_some() {
                out.push_str("</g>\n");
            }
        }
    }
}

fn baseline_name(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
        TextBaseline::Ideographic => "ideographic",
        TextBaseline::Middle => "middle",
    }
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn animate_transform(t: &Transition) -> String {
    let timing = match t.easing {
        Easing::Linear => String::new(),
        Easing::CubicInOut => {
            String::from(r#" calcMode="spline" keyTimes="0;1" keySplines="0.645 0.045 0.355 1""#)
        }
    };
    format!(
        r#"<animateTransform attributeName="transform" type="translate" from="{} {}" to="{} {}" begin="{}ms" dur="{}ms" fill="freeze"{timing}/>"#,
        t.from.x, t.from.y, t.to.x, t.to.y, t.start_ms, t.duration_ms
    )
}

fn close_element(out: &mut String, tag: &str, animate: Option<&str>) {
    if let Some(animate) = animate {
        let _ = writeln!(out, ">{animate}</{tag}>");
    } else {
        out.push_str("/>\n");
    }
}

fn write_class_attr(out: &mut String, class: Option<&'static str>) {
    if let Some(class) = class {
        let _ = write!(out, r#" class="{class}""#);
    }
}

/// Solid colors only; gradients and images are never emitted by the charts.
fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let Brush::Solid(color) = brush else {
        let _ = write!(out, r#" {name}="none""#);
        return;
    };
    let c = color.to_rgba8();
    let _ = write!(out, r##" {name}="#{:02x}{:02x}{:02x}""##, c.r, c.g, c.b);
    if c.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(c.a) / 255.0);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Point, Vec2};
    use peniko::color::palette::css;
    use chrono::FixedOffset;
    use wxviz_charts::{ChartView, LineChartSpec, Observation, TooltipShift, WindowUpdate};
    use wxviz_core::{Mark, Scene};

    use super::*;

    fn line(id: u64) -> Mark {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 10.0));
        Mark::builder(MarkId::from_raw(id))
            .path()
            .z_index(1)
            .path_const(path)
            .stroke_brush_const(css::GOLD)
            .stroke_width_const(2.0)
            .clip_const(Rect::new(0.0, 0.0, 5.0, 5.0))
            .class("line")
            .build()
    }

    #[test]
    fn transitions_become_smil_and_clips_wrap_the_path() {
        let mut scene = Scene::new();
        let mut surface = SvgSurface::new(Rect::new(0.0, 0.0, 20.0, 20.0));
        surface.apply_diffs(&scene.tick([line(7)]));
        surface.start_transition(
            MarkId::from_raw(7),
            &Transition::settle_from(Vec2::new(12.5, 0.0), 1500.0, 1000.0),
        );
        let svg = surface.to_svg_string();
        assert!(svg.contains(r#"<g clip-path="url(#clip-7)">"#), "{svg}");
        assert!(svg.contains(r#"class="line""#), "{svg}");
        assert!(
            svg.contains(r#"from="12.5 0" to="0 0" begin="1500ms" dur="1000ms""#),
            "{svg}"
        );
    }

    #[test]
    fn exit_drops_the_element_and_its_transition() {
        let mut scene = Scene::new();
        let mut surface = SvgSurface::new(Rect::new(0.0, 0.0, 20.0, 20.0));
        surface.apply_diffs(&scene.tick([line(7)]));
        surface.start_transition(
            MarkId::from_raw(7),
            &Transition::settle_from(Vec2::new(1.0, 0.0), 0.0, 10.0),
        );
        surface.apply_diffs(&scene.tick(Vec::new()));
        assert_eq!(surface.len(), 0);
        assert!(!surface.to_svg_string().contains("animateTransform"));
    }

    #[test]
    fn tooltips_show_and_hide_by_container() {
        let mut surface = SvgSurface::new(Rect::new(0.0, 0.0, 20.0, 20.0));
        let tooltip = Tooltip::new("tooltip02", Point::new(5.0, 5.0), TooltipShift::new(0.0, 0.0))
            .with_field("count", "3")
            .with_field("range", "1.0 - 2.0");
        surface.show_tooltip(&tooltip);
        let html = surface.tooltips_html();
        assert!(html.contains(r#"id="tooltip02""#), "{html}");
        assert!(html.contains(r#"<div id="range">1.0 - 2.0</div>"#), "{html}");
        surface.hide_tooltip("tooltip02");
        assert!(surface.tooltip("tooltip02").is_none());
        assert!(surface.tooltips_html().is_empty());
    }

    #[test]
    fn reset_frame_drops_the_previous_scroll() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let data: Vec<Observation> = (0..5)
            .map(|i| {
                Observation::from_timestamp(1_709_600_400 + i * 3600, offset)
                    .unwrap()
                    .with_value("temperature", 30.0 + i as f64)
            })
            .collect();
        let chart = LineChartSpec::new("temperature", 600.0, 300.0)
            .with_capacity(4)
            .build(&data)
            .unwrap();
        let line = chart.line_id();
        let mut view = ChartView::new(chart, SvgSurface::new(Rect::new(0.0, 0.0, 600.0, 300.0)));
        view.render();

        assert!(matches!(view.tick(1500.0), WindowUpdate::Advanced { .. }));
        assert!(view.scene().transition(line).is_some());
        assert_eq!(view.surface().to_svg_string().matches("<animateTransform").count(), 1);

        assert!(matches!(view.tick(3000.0), WindowUpdate::Reset { .. }));
        assert!(view.scene().transition(line).is_none());
        assert_eq!(view.surface().to_svg_string().matches("<animateTransform").count(), 0);
    }

    #[test]
    fn update_without_a_new_transition_stops_animating() {
        let mut scene = Scene::new();
        let mut surface = SvgSurface::new(Rect::new(0.0, 0.0, 20.0, 20.0));
        surface.apply_diffs(&scene.tick([line(7)]));
        surface.start_transition(
            MarkId::from_raw(7),
            &Transition::settle_from(Vec2::new(3.0, 0.0), 0.0, 10.0),
        );
        let moved = Mark::builder(MarkId::from_raw(7))
            .path()
            .z_index(2)
            .path_const(BezPath::new())
            .class("line")
            .build();
        surface.apply_diffs(&scene.tick([moved]));
        assert_eq!(surface.len(), 1);
        assert!(!surface.to_svg_string().contains("animateTransform"));
    }
}
