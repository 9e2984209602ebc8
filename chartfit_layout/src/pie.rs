// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside labels for pie and doughnut slices.
//!
//! Each slice's label goes into a column on the slice's side of the pie. When a column's
//! labels cannot all stack inside the plot height, the latest callouts are dropped until
//! they can. The column is then sorted by the label's natural row and pushed apart twice:
//! once top to bottom, once bottom to top from the plot's lower edge. Labels that land on
//! an earlier claim are dropped. The survivors get an elbowed leader line from the slice
//! edge to the label.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use chartfit_text::{TextMeasurer, TextStyle};
use kurbo::{BezPath, Point, Rect, Vec2};

use crate::placement::PlacedLabels;

/// One slice that wants an outside label.
#[derive(Clone, Debug, PartialEq)]
pub struct PieCallout {
    /// Label text.
    pub text: String,
    /// The slice's mid angle in radians; `0` points right and angles grow clockwise on
    /// screen (y down).
    pub angle: f64,
}

impl PieCallout {
    /// Creates a callout.
    pub fn new(text: impl Into<String>, angle: f64) -> Self {
        Self {
            text: text.into(),
            angle,
        }
    }
}

/// A callout that was placed.
#[derive(Clone, Debug)]
pub struct PlacedCallout {
    /// Index into the callouts passed to [`PieLabeler::place`].
    pub index: usize,
    /// The claimed label rectangle.
    pub rect: Rect,
    /// Whether the label sits right of the pie.
    pub right: bool,
    /// Leader line: slice edge, elbow, label.
    pub leader: BezPath,
}

/// Lays out outside labels around one pie.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieLabeler {
    center: Point,
    radius: f64,
    elbow_length: f64,
    horizontal_length: f64,
    min_spacing: f64,
    padding: f64,
    style: TextStyle,
}

impl PieLabeler {
    /// A labeler for a pie at `center` with outer `radius`.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            elbow_length: 10.0,
            horizontal_length: 12.0,
            min_spacing: 2.0,
            padding: 2.0,
            style: TextStyle::default(),
        }
    }

    /// Sets the radial length of the first leader segment.
    #[must_use]
    pub fn with_elbow_length(mut self, length: f64) -> Self {
        self.elbow_length = length;
        self
    }

    /// Sets the horizontal distance from the elbow to the label.
    #[must_use]
    pub fn with_horizontal_length(mut self, length: f64) -> Self {
        self.horizontal_length = length;
        self
    }

    /// Sets the minimum vertical gap between labels in a column.
    #[must_use]
    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Sets the padding around label text.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the label text style.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    fn on_circle(&self, angle: f64, radius: f64) -> Point {
        self.center + Vec2::new(angle.cos(), angle.sin()) * radius
    }

    /// Places outside labels for `callouts`, claiming their rectangles in `placed`.
    ///
    /// Returns the placed callouts ordered by index; dropped callouts are absent.
    pub fn place(
        &self,
        measurer: &dyn TextMeasurer,
        callouts: &[PieCallout],
        plot: Rect,
        placed: &mut PlacedLabels,
    ) -> Vec<PlacedCallout> {
        let pad = self.padding.max(0.0);
        let spacing = self.min_spacing.max(0.0);
        let mut columns: [Vec<Pending>; 2] = [Vec::new(), Vec::new()];

        for (index, callout) in callouts.iter().enumerate() {
            if callout.text.is_empty() || !callout.angle.is_finite() {
                continue;
            }
            let metrics = measurer.measure(&callout.text, self.style);
            let edge = self.on_circle(callout.angle, self.radius);
            let elbow = self.on_circle(callout.angle, self.radius + self.elbow_length.max(0.0));
            let right = callout.angle.cos() >= 0.0;
            columns[usize::from(right)].push(Pending {
                index,
                right,
                edge,
                elbow,
                width: metrics.advance_width + 2.0 * pad,
                height: metrics.line_height() + 2.0 * pad,
                y: elbow.y,
            });
        }

        let mut out = Vec::new();
        for column in &mut columns {
            fit_column(column, plot.height(), spacing);
            column.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.index.cmp(&b.index)));
            spread(column, plot, spacing);
            for p in column.iter() {
                let rect = if p.right {
                    let x0 = p.elbow.x + self.horizontal_length;
                    Rect::new(x0, p.y - p.height / 2.0, x0 + p.width, p.y + p.height / 2.0)
                } else {
                    let x1 = p.elbow.x - self.horizontal_length;
                    Rect::new(x1 - p.width, p.y - p.height / 2.0, x1, p.y + p.height / 2.0)
                };
                if !placed.try_claim(rect, plot) {
                    tracing::trace!(index = p.index, "pie callout dropped");
                    continue;
                }
                let attach = Point::new(if p.right { rect.x0 } else { rect.x1 }, p.y);
                let mut leader = BezPath::new();
                leader.move_to(p.edge);
                leader.line_to(p.elbow);
                leader.line_to(attach);
                out.push(PlacedCallout {
                    index: p.index,
                    rect,
                    right: p.right,
                    leader,
                });
            }
        }
        out.sort_by_key(|c| c.index);
        tracing::debug!(
            requested = callouts.len(),
            placed = out.len(),
            "pie callouts placed"
        );
        out
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    index: usize,
    right: bool,
    edge: Point,
    elbow: Point,
    width: f64,
    height: f64,
    /// Label centre row.
    y: f64,
}

/// Keeps the longest prefix of an index-ordered column whose labels stack within
/// `available` height.
fn fit_column(column: &mut Vec<Pending>, available: f64, spacing: f64) {
    let mut used = 0.0;
    let mut keep = 0;
    for p in column.iter() {
        let gap = if keep == 0 { 0.0 } else { spacing };
        if used + gap + p.height > available {
            break;
        }
        used += gap + p.height;
        keep += 1;
    }
    if keep < column.len() {
        tracing::trace!(
            kept = keep,
            dropped = column.len() - keep,
            "pie column overflows the plot"
        );
        column.truncate(keep);
    }
}

/// Pushes a sorted column apart so neighbours keep `spacing` between them.
fn spread(column: &mut [Pending], plot: Rect, spacing: f64) {
    let Some(first) = column.first_mut() else {
        return;
    };
    first.y = first.y.max(plot.y0 + first.height / 2.0);
    for i in 1..column.len() {
        let (prev, cur) = (column[i - 1], column[i]);
        let min_y = prev.y + (prev.height + cur.height) / 2.0 + spacing;
        column[i].y = cur.y.max(min_y);
    }

    let last = column.len() - 1;
    column[last].y = column[last].y.min(plot.y1 - column[last].height / 2.0);
    for i in (0..last).rev() {
        let (cur, next) = (column[i], column[i + 1]);
        let max_y = next.y - (cur.height + next.height) / 2.0 - spacing;
        column[i].y = cur.y.min(max_y);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::f64::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::placement::{rect_within, rects_overlap};
    use chartfit_text::HeuristicTextMeasurer;
    use kurbo::PathEl;

    const M: HeuristicTextMeasurer = HeuristicTextMeasurer;
    const PLOT: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn labeler() -> PieLabeler {
        PieLabeler::new(Point::new(200.0, 150.0), 80.0).with_style(TextStyle::new(10.0))
    }

    fn assert_clean(callouts: &[PlacedCallout], placed: &PlacedLabels) {
        for (i, a) in placed.rects().iter().enumerate() {
            assert!(rect_within(*a, PLOT), "{a:?} leaves the plot");
            for b in &placed.rects()[i + 1..] {
                assert!(!rects_overlap(*a, *b), "{a:?} overlaps {b:?}");
            }
        }
        assert_eq!(callouts.len(), placed.len());
    }

    #[test]
    fn clustered_slices_are_pushed_apart() {
        let callouts: std::vec::Vec<_> = (0..5)
            .map(|i| PieCallout::new(std::format!("Slice {i}"), 0.02 * f64::from(i)))
            .collect();
        let mut placed = PlacedLabels::new();
        let out = labeler().place(&M, &callouts, PLOT, &mut placed);
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|c| c.right));
        assert_clean(&out, &placed);
        // Rows keep the slices' order.
        let rows: std::vec::Vec<_> = out.iter().map(|c| c.rect.center().y).collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{rows:?}");
    }

    #[test]
    fn slices_pick_the_column_on_their_side() {
        let callouts = [
            PieCallout::new("East", 0.0),
            PieCallout::new("West", PI),
            PieCallout::new("South", FRAC_PI_2 + 0.1),
        ];
        let mut placed = PlacedLabels::new();
        let out = labeler().place(&M, &callouts, PLOT, &mut placed);
        assert_eq!(out.len(), 3);
        assert!(out[0].right && out[0].rect.x0 > 200.0);
        assert!(!out[1].right && out[1].rect.x1 < 200.0);
        assert!(!out[2].right);
        assert_clean(&out, &placed);
    }

    #[test]
    fn leader_runs_from_edge_through_elbow_to_label() {
        let mut placed = PlacedLabels::new();
        let out = labeler().place(&M, &[PieCallout::new("East", 0.0)], PLOT, &mut placed);
        let els: std::vec::Vec<_> = out[0].leader.elements().to_vec();
        assert_eq!(els.len(), 3);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(280.0, 150.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(290.0, 150.0)));
        assert_eq!(els[2], PathEl::LineTo(Point::new(302.0, 150.0)));
        assert_eq!(out[0].rect.x0, 302.0);
    }

    #[test]
    fn overflowing_columns_drop_labels() {
        let callouts: std::vec::Vec<_> = (0..40)
            .map(|i| PieCallout::new(std::format!("Item {i}"), 0.01 * f64::from(i)))
            .collect();
        let mut placed = PlacedLabels::new();
        let out = labeler().place(&M, &callouts, PLOT, &mut placed);
        assert!(!out.is_empty());
        assert!(out.len() < callouts.len());
        assert_clean(&out, &placed);
    }

    #[test]
    fn crowded_columns_keep_the_earliest_callouts() {
        let callouts: std::vec::Vec<_> = (0..40)
            .map(|i| PieCallout::new(std::format!("Item {i}"), 0.01 * f64::from(i)))
            .collect();
        let mut placed = PlacedLabels::new();
        let out = labeler().place(&M, &callouts, PLOT, &mut placed);
        assert!(out.len() > 1);
        let indices: std::vec::Vec<_> = out.iter().map(|c| c.index).collect();
        let prefix: std::vec::Vec<_> = (0..out.len()).collect();
        assert_eq!(indices, prefix);
        assert_clean(&out, &placed);
    }

    #[test]
    fn earlier_placements_take_priority() {
        let mut placed = PlacedLabels::new();
        // Claim the spot where the "East" label would go.
        assert!(placed.try_claim(Rect::new(290.0, 130.0, 400.0, 170.0), PLOT));
        let out = labeler().place(&M, &[PieCallout::new("East", 0.0)], PLOT, &mut placed);
        assert!(out.is_empty());
        assert_eq!(placed.len(), 1);
    }
}
