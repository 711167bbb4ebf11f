// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! wxviz-charts-demo - render the weather charts to an HTML report

mod html;
mod svg;

use std::error::Error;
use std::f64::consts::TAU;
use std::path::PathBuf;
use std::process;

use chrono::FixedOffset;
use clap::Parser;
use kurbo::{Point, Vec2};
use wxviz_charts::{
    Chart, ChartView, HistogramSpec, LabelDict, LineChartSpec, Observation, ScatterChartSpec,
    UpdateInterval, WindowUpdate, label_for,
};
use wxviz_forecast::observations::{
    self, DEWPOINT, HUMIDITY, PRECIPITATION_PROBABILITY, TEMPERATURE, WIND_SPEED,
};

use crate::html::HtmlSection;
use crate::svg::SvgSurface;

/// Simulated animation frame length.
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Render the line, scatter, and histogram charts to a standalone HTML page
#[derive(Parser, Debug)]
#[command(name = "wxviz-charts-demo")]
#[command(version, about, long_about = None)]
struct Args {
    /// Hourly forecast JSON as written by `wxviz-forecast` (synthetic data if omitted)
    #[arg(long, value_name = "FILE")]
    forecast: Option<PathBuf>,

    /// Field shown by the line chart and the histogram
    #[arg(long, default_value = TEMPERATURE)]
    metric: String,

    /// Scatter x field
    #[arg(long, default_value = TEMPERATURE)]
    x: String,

    /// Scatter y field
    #[arg(long, default_value = DEWPOINT)]
    y: String,

    /// Scatter color field
    #[arg(long, default_value = HUMIDITY)]
    color: String,

    /// Number of line chart updates to play before taking the snapshot
    #[arg(long, default_value_t = 20, value_name = "N")]
    ticks: usize,

    /// Chart width in pixels
    #[arg(long, default_value_t = 720.0, value_name = "W")]
    width: f64,

    /// Output file
    #[arg(long, default_value = "wxviz_charts_demo.html", value_name = "FILE")]
    out: PathBuf,
}

fn main() {
    pretty_env_logger::formatted_timed_builder()
        .filter_module("wxviz_charts_demo", log::LevelFilter::Info)
        .filter_module("wxviz_charts", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let data = match &args.forecast {
        Some(path) => {
            let body = std::fs::read(path)?;
            let data = observations::from_forecast(&body)?;
            log::info!("loaded {} observations from {}", data.len(), path.display());
            data
        }
        None => {
            log::info!("no --forecast given, using synthetic observations");
            synthetic_observations(100)
        }
    };
    let labels = observations::default_labels();

    let sections = vec![
        line_section(args, &data, &labels)?,
        scatter_section(args, &data, &labels)?,
        histogram_section(args, &data, &labels)?,
    ];

    let html = html::render_report("wxviz charts demo", &sections);
    std::fs::write(&args.out, html)?;
    log::info!("wrote {}", args.out.display());
    Ok(())
}

/// Four days of hourly readings with a daily cycle, starting 2024-03-04 19:00 -06:00.
fn synthetic_observations(hours: i64) -> Vec<Observation> {
    const START: i64 = 1_709_600_400;
    let Some(offset) = FixedOffset::west_opt(6 * 3600) else {
        return Vec::new();
    };
    (0..hours)
        .filter_map(|h| {
            let phase = TAU * (h as f64 - 15.0) / 24.0;
            let jitter = (h as f64 * 1.7).sin() * 2.0;
            let temperature = 45.0 + 12.0 * phase.sin() + jitter;
            let humidity = 65.0 - 20.0 * phase.sin() + jitter * 3.0;
            let o = Observation::from_timestamp(START + h * 3600, offset)?
                .with_value(TEMPERATURE, temperature)
                .with_value(DEWPOINT, temperature - 6.0 - 4.0 * (h as f64 * 0.3).cos())
                .with_value(HUMIDITY, humidity.clamp(0.0, 100.0))
                .with_value(PRECIPITATION_PROBABILITY, (h % 9 * 10) as f64)
                .with_value(WIND_SPEED, 4.0 + (h % 7) as f64);
            Some(o)
        })
        .collect()
}

fn line_section(
    args: &Args,
    data: &[Observation],
    labels: &LabelDict,
) -> Result<HtmlSection, Box<dyn Error>> {
    let chart = LineChartSpec::new(&args.metric, args.width, args.width * 0.6)
        .with_labels(labels.clone())
        .build(data)?;
    let view_box = chart.dimensions().view();
    let mut view = ChartView::new(chart, SvgSurface::new(view_box));
    view.render();

    let mut interval = UpdateInterval::default();
    let mut now = 0.0;
    let mut played = 0;
    interval.due(now);
    while played < args.ticks {
        now += FRAME_MS;
        if !interval.due(now) {
            continue;
        }
        played += 1;
        match view.tick(now) {
            WindowUpdate::Advanced { timestamp } => {
                log::debug!("t={now:.0}ms appended {timestamp}");
            }
            WindowUpdate::Reset { missing, reason } => {
                log::info!("t={now:.0}ms window reset: {missing} unusable ({reason:?})");
            }
        }
    }

    view.pointer_move(view.chart().dimensions().plot().center());
    log::debug!("line chart: {} elements", view.surface().len());
    Ok(HtmlSection {
        title: format!("Sliding window: {}", label_for(labels, &args.metric)),
        description: format!(
            "Snapshot after {played} updates; the line slides one step per update while the axes track the window."
        ),
        svg: view.surface().to_svg_string(),
        overlay: view.surface().tooltips_html(),
    })
}

fn scatter_section(
    args: &Args,
    data: &[Observation],
    labels: &LabelDict,
) -> Result<HtmlSection, Box<dyn Error>> {
    let chart = ScatterChartSpec::new(&args.x, &args.y, &args.color, args.width)
        .with_labels(labels.clone())
        .build(data)?;
    let view_box = chart.dimensions().view();
    let pointer = chart.dot_position(data.len() / 2);
    let mut view = ChartView::new(chart, SvgSurface::new(view_box));
    view.render();

    if let Some(p) = pointer {
        // Just off the dot; the Voronoi cell still owns it.
        view.pointer_move(p + Vec2::new(2.0, -2.0));
    }
    let tooltip_id = view.chart().tooltip_id().to_owned();
    log::debug!(
        "scatter: {} elements, tooltip shown: {}",
        view.surface().len(),
        view.surface().tooltip(&tooltip_id).is_some()
    );
    Ok(HtmlSection {
        title: format!(
            "{} vs {}",
            label_for(labels, &args.y),
            label_for(labels, &args.x)
        ),
        description: format!(
            "Colored by {}; hover targets are Voronoi cells around each dot.",
            label_for(labels, &args.color)
        ),
        svg: view.surface().to_svg_string(),
        overlay: view.surface().tooltips_html(),
    })
}

fn histogram_section(
    args: &Args,
    data: &[Observation],
    labels: &LabelDict,
) -> Result<HtmlSection, Box<dyn Error>> {
    let chart = HistogramSpec::new(&args.metric, args.width)
        .with_labels(labels.clone())
        .build(data)?;
    let view_box = chart.dimensions().view();
    let tallest = chart
        .bins()
        .iter()
        .enumerate()
        .max_by_key(|(_, b)| b.count())
        .and_then(|(i, _)| chart.bar_rect(i));
    let mean = chart.mean();
    let mut view = ChartView::new(chart, SvgSurface::new(view_box));
    view.render();

    if let Some(bar) = tallest {
        view.pointer_move(Point::new(bar.center().x, bar.y1 - 1.0));
    }
    Ok(HtmlSection {
        title: format!("Distribution: {}", label_for(labels, &args.metric)),
        description: format!("Mean {mean:.1}; the tallest bar is hovered."),
        svg: view.surface().to_svg_string(),
        overlay: view.surface().tooltips_html(),
    })
}
