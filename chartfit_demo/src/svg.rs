// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `chartfit_demo`.

use std::fmt::Write as _;

use kurbo::{BezPath, Point, Rect};

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Baseline {
    Middle,
    Hanging,
    Alphabetic,
}

#[derive(Debug)]
pub(crate) struct SvgDoc {
    view: Rect,
    body: String,
}

impl SvgDoc {
    pub(crate) fn new(view: Rect) -> Self {
        Self {
            view,
            body: String::new(),
        }
    }

    pub(crate) fn rect(&mut self, rect: Rect, fill: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        );
    }

    /// A rectangle outline, used to show reserved margins and label boxes.
    pub(crate) fn outline(&mut self, rect: Rect, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{stroke}" stroke-dasharray="2 2"/>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        );
    }

    pub(crate) fn line(&mut self, from: Point, to: Point, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{stroke}"/>"#,
            from.x, from.y, to.x, to.y,
        );
    }

    pub(crate) fn path(&mut self, path: &BezPath, fill: &str, stroke: &str) {
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="{fill}" stroke="{stroke}"/>"#,
            path.to_svg(),
        );
    }

    pub(crate) fn text(
        &mut self,
        pos: Point,
        text: &str,
        font_size: f64,
        anchor: Anchor,
        baseline: Baseline,
        angle: f64,
    ) {
        if text.is_empty() {
            return;
        }
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let baseline = match baseline {
            Baseline::Middle => "middle",
            Baseline::Hanging => "hanging",
            Baseline::Alphabetic => "alphabetic",
        };
        let _ = write!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-size="{font_size}" font-family="sans-serif" text-anchor="{anchor}" dominant-baseline="{baseline}""#,
            pos.x, pos.y,
        );
        if angle != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({angle} {:.2} {:.2})""#,
                pos.x, pos.y
            );
        }
        let _ = writeln!(self.body, ">{}</text>", escape_xml(text));
    }

    pub(crate) fn finish(self) -> String {
        let view = self.view;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\">\n{}</svg>\n",
            view.x0,
            view.y0,
            view.width(),
            view.height(),
            view.width(),
            view.height(),
            self.body,
        )
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
