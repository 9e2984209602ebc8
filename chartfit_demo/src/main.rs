// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lays out a handful of sample charts with `chartfit_layout` and writes them to
//! `chartfit_demo.html` as inline SVG.
//!
//! Dashed outlines show the plot rectangle and every claimed label box. Run with
//! `RUST_LOG=chartfit_layout=trace` to follow label placement decisions.

mod svg;

use std::error::Error;
use std::fmt::Write as _;

use chartfit_layout::{
    AxisConfig, AxisKind, AxisPlacement, AxisRange, AxisRole, AxisScale, CachedMeasurer,
    ContextError, FormatterChain, HeuristicTextMeasurer, LayoutConfig, NumberLocale,
    Orientation, PaddingRequest, PieCallout, PlacementOrientation, PlotLayout, RenderContext,
    Side, TextMeasurer, TickSet, axis_labels, category_ticks, datetime_to_days, format_number,
};
use chrono::NaiveDate;
use kurbo::{Arc, BezPath, Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;

use crate::svg::{Anchor, Baseline, SvgDoc};

const BOUNDS: Rect = Rect::new(0.0, 0.0, 480.0, 320.0);
const PALETTE: [&str; 6] = [
    "#4e79a7", "#f28e2b", "#59a14f", "#e15759", "#76b7b2", "#edc948",
];
const GRID: &str = "#e0e0e0";
const INK: &str = "#333333";
const GUIDE: &str = "#c0c0c0";

#[derive(Debug)]
struct Section {
    title: &'static str,
    notes: Vec<String>,
    svg: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let measurer = CachedMeasurer::new(HeuristicTextMeasurer);
    let sections = vec![
        column_demo(&measurer)?,
        bar_demo(&measurer)?,
        date_demo(&measurer)?,
        log_demo(&measurer)?,
        pie_demo(&measurer)?,
    ];
    tracing::info!(cached = measurer.len(), "text measurements cached");

    let html = render_report("chartfit demo", &sections);
    std::fs::write("chartfit_demo.html", html)?;
    tracing::info!(sections = sections.len(), "wrote chartfit_demo.html");
    Ok(())
}

/// Twelve months of two series; full month names force the category labels to rotate.
fn column_demo(measurer: &dyn TextMeasurer) -> Result<Section, ContextError> {
    let months: Vec<String> = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let series: [[f64; 12]; 2] = [
        [
            120.0, 135.0, 98.0, 160.0, 172.0, 181.0, 150.0, 143.0, 190.0, 210.0, 205.0, 240.0,
        ],
        [
            80.0, 72.0, -15.0, 60.0, 91.0, 110.0, 118.0, 104.0, 97.0, 130.0, 142.0, 155.0,
        ],
    ];

    let config = LayoutConfig::default().with_minor_ticks(1);
    let formatters = FormatterChain::new(config.number_locale)
        .with_series_formatter(1, |v, _| format!("{v:+.0}"));
    let values = series.iter().flatten().copied();
    let value_ticks = config.tick_generator().ticks(
        data_range(values, true),
        AxisKind::Linear,
        config.desired_ticks,
    );
    let category_range = AxisRange::categories(months.len(), true);
    let band_ticks = category_ticks(category_range);

    let request = PaddingRequest::new(BOUNDS)
        .with_base_padding(config.base_padding)
        .with_title(config.chart_title("Monthly orders"))
        .with_axis(
            config
                .axis(
                    AxisRole::Category,
                    labels_for(&config, &formatters, &band_ticks, AxisKind::Categorical, &months),
                )
                .with_title(config.axis_title("Month")),
        )
        .with_axis(
            config
                .axis(
                    AxisRole::Value,
                    labels_for(&config, &formatters, &value_ticks, AxisKind::Linear, &[]),
                )
                .with_title(config.axis_title("Orders")),
        );
    let ctx = RenderContext::new(measurer, &request, config)?.with_formatters(formatters);
    let x = ctx.scale(AxisKind::Categorical, category_range, Orientation::Horizontal);
    let y = ctx.scale(AxisKind::Linear, tick_range(&value_ticks), Orientation::Vertical);

    let mut doc = chart_frame(&ctx, &request);
    for minor in ctx.minor_ticks(value_ticks.values(), AxisKind::Linear) {
        let py = y.map(minor);
        doc.line(Point::new(ctx.plot().x0, py), Point::new(ctx.plot().x1, py), "#f2f2f2");
    }
    grid(&mut doc, ctx.plot(), &y, value_ticks.values());

    let band = x.band_width();
    let bar_width = band * 0.8 / series.len() as f64;
    let zero = y.map(0.0);
    let mut pass = ctx.begin_pass();
    let mut requested = 0;
    for (s, values) in series.iter().enumerate() {
        let format = ctx.formatters().resolve(Some(s));
        for (i, &v) in values.iter().enumerate() {
            let x0 = x.map(i as f64) - band * 0.4 + bar_width * s as f64;
            let top = y.map(v);
            doc.rect(
                Rect::new(x0, top.min(zero), x0 + bar_width, top.max(zero)),
                PALETTE[s],
            );
            requested += 1;
            let text = format(v, 0.0);
            let anchor = Point::new(x0 + bar_width / 2.0, top);
            if let Some(label) = pass.try_place_label(
                measurer,
                anchor,
                &text,
                PlacementOrientation::Vertical,
                v < 0.0,
            ) {
                data_label(&mut doc, &ctx, label.text_rect, &text);
            }
        }
    }
    let placed = pass.finish();
    for rect in placed.rects() {
        doc.outline(*rect, GUIDE);
    }

    draw_axes(&mut doc, measurer, &ctx, &request, &[&x, &y], &[&band_ticks, &value_ticks]);
    let mut notes = axis_notes(ctx.layout(), &request);
    notes.push(format!("placed {} of {requested} data labels", placed.len()));
    Ok(Section {
        title: "Column chart",
        notes,
        svg: doc.finish(),
    })
}

/// A bar chart: the category axis runs down the left and labels sit past the bar ends.
fn bar_demo(measurer: &dyn TextMeasurer) -> Result<Section, ContextError> {
    let languages: Vec<String> = [
        "Rust",
        "Go",
        "TypeScript",
        "A language with a very long name",
        "Zig",
        "OCaml",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let scores = [87.5, 64.0, 71.25, 12.0, 45.0, -8.5];

    let config = LayoutConfig::default();
    let formatters = FormatterChain::new(config.number_locale);
    let value_ticks = config.tick_generator().ticks(
        data_range(scores.iter().copied(), true),
        AxisKind::Linear,
        config.desired_ticks,
    );
    let category_range = AxisRange::categories(languages.len(), true);
    let band_ticks = category_ticks(category_range);

    let request = PaddingRequest::new(BOUNDS)
        .with_base_padding(config.base_padding)
        .with_swapped_orientation(true)
        .with_axis(config.axis(
            AxisRole::Category,
            labels_for(&config, &formatters, &band_ticks, AxisKind::Categorical, &languages),
        ))
        .with_axis(config.axis(
            AxisRole::Value,
            labels_for(&config, &formatters, &value_ticks, AxisKind::Linear, &[]),
        ));
    let ctx = RenderContext::new(measurer, &request, config)?.with_formatters(formatters);
    let categories = ctx.scale(AxisKind::Categorical, category_range, Orientation::Vertical);
    let values = ctx.scale(AxisKind::Linear, tick_range(&value_ticks), Orientation::Horizontal);

    let mut doc = chart_frame(&ctx, &request);
    grid(&mut doc, ctx.plot(), &values, value_ticks.values());

    let band = categories.band_width();
    let zero = values.map(0.0);
    let mut pass = ctx.begin_pass();
    for (i, &v) in scores.iter().enumerate() {
        let cy = categories.map(i as f64);
        let end = values.map(v);
        doc.rect(
            Rect::new(end.min(zero), cy - band * 0.35, end.max(zero), cy + band * 0.35),
            PALETTE[0],
        );
        if let Some(label) = pass.place_value_label(measurer, 0, &categories, &values, i as f64, v)
        {
            let text = ctx.formatters().format(Some(0), v, 0.0);
            data_label(&mut doc, &ctx, label.text_rect, &text);
        }
    }
    let placed = pass.finish();
    for rect in placed.rects() {
        doc.outline(*rect, GUIDE);
    }

    draw_axes(
        &mut doc,
        measurer,
        &ctx,
        &request,
        &[&categories, &values],
        &[&band_ticks, &value_ticks],
    );
    let mut notes = axis_notes(ctx.layout(), &request);
    notes.push(format!("placed {} of {} data labels", placed.len(), scores.len()));
    Ok(Section {
        title: "Bar chart (swapped axes)",
        notes,
        svg: doc.finish(),
    })
}

/// Four months of daily values on a date/time axis.
fn date_demo(measurer: &dyn TextMeasurer) -> Result<Section, ContextError> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(45_292.0, datetime_to_days);
    let points: Vec<(f64, f64)> = (0..120)
        .map(|i| {
            let t = f64::from(i);
            (start + t, 50.0 + 20.0 * (t / 7.0).sin() + 0.3 * t)
        })
        .collect();

    let config = LayoutConfig::default();
    let formatters = FormatterChain::new(config.number_locale);
    let generator = config.tick_generator();
    let date_range = data_range(points.iter().map(|p| p.0), false);
    let date_ticks = generator.ticks(date_range, AxisKind::DateTime, config.desired_ticks);
    let value_ticks = generator.ticks(
        data_range(points.iter().map(|p| p.1), false),
        AxisKind::Linear,
        config.desired_ticks,
    );

    let request = PaddingRequest::new(BOUNDS)
        .with_base_padding(config.base_padding)
        .with_title(config.chart_title("Daily active users (thousands)"))
        .with_axis(
            config
                .axis(
                    AxisRole::Category,
                    labels_for(&config, &formatters, &date_ticks, AxisKind::DateTime, &[]),
                )
                .with_between_ticks(false),
        )
        .with_axis(config.axis(
            AxisRole::Value,
            labels_for(&config, &formatters, &value_ticks, AxisKind::Linear, &[]),
        ));
    let ctx = RenderContext::new(measurer, &request, config)?.with_formatters(formatters);
    let x = ctx.scale(AxisKind::DateTime, date_range, Orientation::Horizontal);
    let y = ctx.scale(AxisKind::Linear, tick_range(&value_ticks), Orientation::Vertical);

    let mut doc = chart_frame(&ctx, &request);
    grid(&mut doc, ctx.plot(), &y, value_ticks.values());

    let mut line = BezPath::new();
    for (i, &(d, v)) in points.iter().enumerate() {
        let p = Point::new(x.map(d), y.map(v));
        if i == 0 {
            line.move_to(p);
        } else {
            line.line_to(p);
        }
    }
    doc.path(&line, "none", PALETTE[0]);

    let mut pass = ctx.begin_pass();
    for &(d, v) in points.iter().step_by(10) {
        if let Some(label) = pass.place_value_label(measurer, 0, &x, &y, d, v) {
            let text = ctx.formatters().format(Some(0), v, 1.0);
            data_label(&mut doc, &ctx, label.text_rect, &text);
        }
    }
    let placed = pass.finish();
    for rect in placed.rects() {
        doc.outline(*rect, GUIDE);
    }

    draw_axes(&mut doc, measurer, &ctx, &request, &[&x, &y], &[&date_ticks, &value_ticks]);
    let mut notes = axis_notes(ctx.layout(), &request);
    if let Some(unit) = date_ticks.date_unit {
        notes.push(format!("date ticks aligned to {unit:?}"));
    }
    Ok(Section {
        title: "Date/time axis",
        notes,
        svg: doc.finish(),
    })
}

/// Exponential growth on a logarithmic value axis with minor ticks.
fn log_demo(measurer: &dyn TextMeasurer) -> Result<Section, ContextError> {
    let points: Vec<(f64, f64)> = (0..=20)
        .map(|i| {
            let t = f64::from(i) * 0.5;
            (t, 0.8 * 10_f64.powf(t * 0.45))
        })
        .collect();

    let config = LayoutConfig::default().with_minor_ticks(4);
    let grouped = NumberLocale::new('.', Some(','));
    let formatters = FormatterChain::new(config.number_locale)
        .with_chart_formatter(move |v, step| format_number(v, step, grouped));
    let generator = config.tick_generator();
    let x_ticks = generator.ticks(
        data_range(points.iter().map(|p| p.0), false),
        AxisKind::Linear,
        config.desired_ticks,
    );
    let y_range = data_range(points.iter().map(|p| p.1), false);
    let y_ticks = generator.ticks(y_range, AxisKind::Logarithmic, config.desired_ticks);

    let request = PaddingRequest::new(BOUNDS)
        .with_base_padding(config.base_padding)
        .with_axis(
            config
                .axis(
                    AxisRole::Category,
                    labels_for(&config, &formatters, &x_ticks, AxisKind::Linear, &[]),
                )
                .with_between_ticks(false)
                .with_title(config.axis_title("Hours")),
        )
        .with_axis(
            config
                .axis(
                    AxisRole::Value,
                    labels_for(&config, &formatters, &y_ticks, AxisKind::Logarithmic, &[]),
                )
                .with_title(config.axis_title("Colony size")),
        );
    let ctx = RenderContext::new(measurer, &request, config)?.with_formatters(formatters);
    let x = ctx.scale(AxisKind::Linear, tick_range(&x_ticks), Orientation::Horizontal);
    let y = ctx.scale(AxisKind::Logarithmic, y_range, Orientation::Vertical);

    let mut doc = chart_frame(&ctx, &request);
    for minor in ctx.minor_ticks(y_ticks.values(), AxisKind::Logarithmic) {
        let py = y.map(minor);
        doc.line(Point::new(ctx.plot().x0, py), Point::new(ctx.plot().x1, py), "#f2f2f2");
    }
    grid(&mut doc, ctx.plot(), &y, y_ticks.values());

    let mut pass = ctx.begin_pass();
    for &(t, v) in &points {
        let p = Point::new(x.map(t), y.map(v));
        doc.rect(Rect::from_center_size(p, (5.0, 5.0)), PALETTE[2]);
        if let Some(label) = pass.place_value_label(measurer, 0, &x, &y, t, v) {
            let text = ctx.formatters().format(Some(0), v, 0.0);
            data_label(&mut doc, &ctx, label.text_rect, &text);
        }
    }
    let placed = pass.finish();

    draw_axes(&mut doc, measurer, &ctx, &request, &[&x, &y], &[&x_ticks, &y_ticks]);
    let mut notes = axis_notes(ctx.layout(), &request);
    notes.push(format!("placed {} of {} data labels", placed.len(), points.len()));
    Ok(Section {
        title: "Logarithmic axis",
        notes,
        svg: doc.finish(),
    })
}

/// Outside labels with leader lines; the thin slices crowd the right-hand column.
fn pie_demo(measurer: &dyn TextMeasurer) -> Result<Section, ContextError> {
    let slices = [
        ("Search", 38.0),
        ("Direct", 22.0),
        ("Social", 14.0),
        ("Email", 9.0),
        ("Referral", 6.0),
        ("Display ads", 4.0),
        ("Affiliates", 3.0),
        ("Podcasts", 2.0),
        ("Print", 1.0),
        ("Other", 1.0),
    ];
    let total: f64 = slices.iter().map(|s| s.1).sum();

    let config = LayoutConfig::default();
    let request = PaddingRequest::new(BOUNDS)
        .with_base_padding(config.base_padding)
        .with_title(config.chart_title("Traffic sources"));
    let ctx = RenderContext::new(measurer, &request, config)?;
    let plot = ctx.plot();
    let center = plot.center();
    let radius = 0.3 * plot.width().min(plot.height());

    let mut doc = chart_frame(&ctx, &request);
    let mut callouts = Vec::with_capacity(slices.len());
    let mut angle = -std::f64::consts::FRAC_PI_2;
    for (i, &(name, value)) in slices.iter().enumerate() {
        let sweep = value / total * std::f64::consts::TAU;
        let arc = Arc::new(center, Vec2::new(radius, radius), angle, sweep, 0.0);
        let mut wedge = BezPath::new();
        wedge.move_to(center);
        wedge.line_to(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        wedge.extend(arc.append_iter(0.1));
        wedge.close_path();
        doc.path(&wedge, PALETTE[i % PALETTE.len()], "#ffffff");

        let percent = format_number(value / total * 100.0, 0.1, ctx.formatters().locale());
        callouts.push(PieCallout::new(format!("{name} {percent}%"), angle + sweep / 2.0));
        angle += sweep;
    }

    let mut pass = ctx.begin_pass();
    let placed = pass.place_pie_callouts(measurer, center, radius, &callouts);
    for callout in &placed {
        doc.path(&callout.leader, "none", INK);
        let pad = ctx.config().data_label_padding;
        data_label(&mut doc, &ctx, callout.rect.inset(-pad), &callouts[callout.index].text);
        doc.outline(callout.rect, GUIDE);
    }

    Ok(Section {
        title: "Pie callouts",
        notes: vec![format!(
            "placed {} of {} callouts",
            placed.len(),
            callouts.len()
        )],
        svg: doc.finish(),
    })
}

/// `[min, max]` over finite `values`, optionally stretched to include zero.
fn data_range(values: impl Iterator<Item = f64>, include_zero: bool) -> AxisRange {
    let (mut min, mut max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }
    if min > max {
        return AxisRange::new(0.0, 1.0);
    }
    AxisRange::new(min, max)
}

/// The range enclosed by linear ticks, so the axis ends on a labelled value.
fn tick_range(ticks: &TickSet) -> AxisRange {
    match (ticks.values().first(), ticks.values().last()) {
        (Some(&first), Some(&last)) => AxisRange::new(first, last),
        _ => AxisRange::new(0.0, 1.0),
    }
}

fn labels_for(
    config: &LayoutConfig,
    formatters: &FormatterChain,
    ticks: &TickSet,
    kind: AxisKind,
    categories: &[String],
) -> Vec<String> {
    axis_labels(ticks, kind, categories, formatters, &config.date_patterns)
}

fn chart_frame(ctx: &RenderContext, request: &PaddingRequest) -> SvgDoc {
    let mut doc = SvgDoc::new(ctx.bounds());
    doc.rect(ctx.bounds(), "#ffffff");
    doc.outline(ctx.plot(), GUIDE);
    if let (Some(band), Some(title)) = (ctx.layout().title, &request.title) {
        doc.text(
            band.center(),
            &title.text,
            title.font_size,
            Anchor::Middle,
            Baseline::Middle,
            0.0,
        );
    }
    doc
}

fn grid(doc: &mut SvgDoc, plot: Rect, scale: &AxisScale, ticks: &[f64]) {
    for &t in ticks {
        let p = scale.map(t);
        match scale.orientation() {
            Orientation::Vertical => doc.line(Point::new(plot.x0, p), Point::new(plot.x1, p), GRID),
            Orientation::Horizontal => {
                doc.line(Point::new(p, plot.y0), Point::new(p, plot.y1), GRID);
            }
        }
    }
}

fn data_label(doc: &mut SvgDoc, ctx: &RenderContext, text_rect: Rect, text: &str) {
    doc.text(
        text_rect.center(),
        text,
        ctx.config().data_label_font_size,
        Anchor::Middle,
        Baseline::Middle,
        0.0,
    );
}

/// Draws every placed axis; `scales[i]` and `ticks[i]` belong to `request.axes[i]`.
fn draw_axes(
    doc: &mut SvgDoc,
    measurer: &dyn TextMeasurer,
    ctx: &RenderContext,
    request: &PaddingRequest,
    scales: &[&AxisScale],
    ticks: &[&TickSet],
) {
    for placement in &ctx.layout().axes {
        let i = placement.axis;
        let (Some(config), Some(scale), Some(axis_ticks)) =
            (request.axes.get(i), scales.get(i), ticks.get(i))
        else {
            continue;
        };
        draw_axis(doc, measurer, ctx.plot(), placement, config, scale, axis_ticks.values());
    }
}

fn draw_axis(
    doc: &mut SvgDoc,
    measurer: &dyn TextMeasurer,
    plot: Rect,
    placement: &AxisPlacement,
    config: &AxisConfig,
    scale: &AxisScale,
    ticks: &[f64],
) {
    let layout = &placement.labels;
    let rotated = layout.rotation_degrees != 0.0;
    let out = config.tick_length + config.label_gap;
    let (from, to) = match placement.side {
        Side::Bottom => (Point::new(plot.x0, plot.y1), Point::new(plot.x1, plot.y1)),
        Side::Top => (Point::new(plot.x0, plot.y0), Point::new(plot.x1, plot.y0)),
        Side::Left => (Point::new(plot.x0, plot.y0), Point::new(plot.x0, plot.y1)),
        Side::Right => (Point::new(plot.x1, plot.y0), Point::new(plot.x1, plot.y1)),
    };
    doc.line(from, to, INK);

    for (i, (&value, text)) in ticks.iter().zip(&config.labels).enumerate() {
        let p = scale.map(value);
        let (edge, normal) = match placement.side {
            Side::Bottom => (Point::new(p, plot.y1), Vec2::new(0.0, 1.0)),
            Side::Top => (Point::new(p, plot.y0), Vec2::new(0.0, -1.0)),
            Side::Left => (Point::new(plot.x0, p), Vec2::new(-1.0, 0.0)),
            Side::Right => (Point::new(plot.x1, p), Vec2::new(1.0, 0.0)),
        };
        doc.line(edge, edge + normal * config.tick_length, INK);
        if !layout.shows(i) {
            continue;
        }
        let (anchor, baseline) = match (placement.side, rotated) {
            (Side::Bottom, false) => (Anchor::Middle, Baseline::Hanging),
            (Side::Top, false) => (Anchor::Middle, Baseline::Alphabetic),
            (Side::Bottom | Side::Left, _) => (Anchor::End, Baseline::Middle),
            (Side::Top | Side::Right, _) => (Anchor::Start, Baseline::Middle),
        };
        let shown = layout.display_text(measurer, text, config.layout.font_weight);
        doc.text(
            edge + normal * out,
            &shown,
            layout.font_size,
            anchor,
            baseline,
            -layout.rotation_degrees,
        );
    }

    if let Some(title) = &config.title {
        let center = match placement.side {
            Side::Bottom | Side::Top => plot.center().x,
            Side::Left | Side::Right => plot.center().y,
        };
        let (pos, angle, baseline) = match placement.side {
            Side::Bottom => (
                Point::new(center, plot.y1 + placement.thickness),
                0.0,
                Baseline::Alphabetic,
            ),
            Side::Top => (Point::new(center, plot.y0 - placement.thickness), 0.0, Baseline::Hanging),
            Side::Left => (Point::new(plot.x0 - placement.thickness, center), -90.0, Baseline::Hanging),
            Side::Right => (Point::new(plot.x1 + placement.thickness, center), 90.0, Baseline::Hanging),
        };
        doc.text(pos, &title.text, title.font_size, Anchor::Middle, baseline, angle);
    }
}

fn axis_notes(layout: &PlotLayout, request: &PaddingRequest) -> Vec<String> {
    let p = layout.padding;
    let mut notes = vec![format!(
        "padding left {:.1}, top {:.1}, right {:.1}, bottom {:.1}",
        p.left, p.top, p.right, p.bottom
    )];
    for placement in &layout.axes {
        let role = request
            .axes
            .get(placement.axis)
            .map_or(AxisRole::Value, |a| a.role);
        let l = &placement.labels;
        notes.push(format!(
            "{role:?} axis on {:?}: font {:.1}px, rotation {}°, every {} label(s){}",
            placement.side,
            l.font_size,
            l.rotation_degrees,
            l.step,
            if l.use_ellipsis { ", trimmed" } else { "" },
        ));
    }
    notes
}

fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{0}</title></head>\n<body style=\"font-family: sans-serif\">\n<h1>{0}</h1>",
        svg::escape_xml(title)
    );
    for section in sections {
        let _ = writeln!(out, "<section>\n<h2>{}</h2>\n<ul>", svg::escape_xml(section.title));
        for note in &section.notes {
            let _ = writeln!(out, "<li>{}</li>", svg::escape_xml(note));
        }
        let _ = writeln!(out, "</ul>\n{}</section>", section.svg);
    }
    out.push_str("</body></html>\n");
    out
}
