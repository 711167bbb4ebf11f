// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-page HTML report.

use std::fmt::Write as _;

use crate::svg::escape_xml;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
    /// Positioned tooltip boxes drawn over the SVG.
    pub(crate) overlay: String,
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em; color: #222; }
section { margin-bottom: 3em; }
.chart { position: relative; display: inline-block; }
.tooltip { position: absolute; background: white; border: 1px solid #ccc; border-radius: 4px;
  padding: 6px; pointer-events: none; white-space: nowrap; }
.hover-target { cursor: crosshair; }
"#;

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let title = escape_xml(title);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>"
    );
    for section in sections {
        let _ = writeln!(
            out,
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n<div class=\"chart\">\n{}{}</div>\n</section>",
            escape_xml(&section.title),
            escape_xml(&section.description),
            section.svg,
            section.overlay,
        );
    }
    out.push_str("</body>\n</html>\n");
    out
}
