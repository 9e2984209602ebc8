// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy, collision-aware placement of data labels.
//!
//! Labels are placed one at a time in creation order. Each label tries its preferred side
//! of the anchor, then the mirrored side, and is dropped if neither rectangle fits inside
//! the plot without touching the interior of an earlier label. Earlier labels therefore
//! win over later ones.

extern crate alloc;

use alloc::vec::Vec;

use chartfit_text::{TextMeasurer, TextStyle};
use kurbo::{Point, Rect, Size};

use crate::scale::AxisScale;

/// Tolerance for "inside the plot" checks.
const EPSILON: f64 = 1.0e-9;

/// Returns `true` if `a` and `b` share interior area; touching edges do not count.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Returns `true` if `inner` lies within `outer`.
pub fn rect_within(inner: Rect, outer: Rect) -> bool {
    inner.x0 >= outer.x0 - EPSILON
        && inner.y0 >= outer.y0 - EPSILON
        && inner.x1 <= outer.x1 + EPSILON
        && inner.y1 <= outer.y1 + EPSILON
}

/// The rectangles already claimed during one render pass.
///
/// Append-only: a rectangle is added only after it was checked against every rectangle
/// already present, so no two entries ever overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacedLabels {
    rects: Vec<Rect>,
}

impl PlacedLabels {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The placed rectangles, in placement order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of placed rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns `true` if `rect` overlaps any placed rectangle.
    pub fn collides(&self, rect: Rect) -> bool {
        self.rects.iter().any(|&r| rects_overlap(r, rect))
    }

    /// Claims `rect` if it lies inside `bounds` and collides with nothing.
    pub fn try_claim(&mut self, rect: Rect, bounds: Rect) -> bool {
        if !rect.is_finite() || !rect_within(rect, bounds) || self.collides(rect) {
            return false;
        }
        self.rects.push(rect);
        true
    }
}

/// Which way the chart's values grow from their anchors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementOrientation {
    /// Columns, lines, points: labels go above, falling back to below.
    #[default]
    Vertical,
    /// Horizontal bars: labels go to the right, falling back to the left.
    Horizontal,
}

impl PlacementOrientation {
    /// `[preferred, fallback]` sides; `inverted` (e.g. negative values) swaps them.
    pub fn sides(self, inverted: bool) -> [LabelSide; 2] {
        let sides = match self {
            Self::Vertical => [LabelSide::Above, LabelSide::Below],
            Self::Horizontal => [LabelSide::Right, LabelSide::Left],
        };
        if inverted {
            [sides[1], sides[0]]
        } else {
            sides
        }
    }
}

/// Where a label sits relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelSide {
    /// Centred above the anchor.
    Above,
    /// Centred below the anchor.
    Below,
    /// Vertically centred to the right of the anchor.
    Right,
    /// Vertically centred to the left of the anchor.
    Left,
}

/// A label that found a spot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedLabel {
    /// The claimed rectangle, padding included.
    pub rect: Rect,
    /// The side that was used.
    pub side: LabelSide,
    /// The text box inside the padding.
    pub text_rect: Rect,
}

/// Computes placement rectangles for data labels inside one plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacer {
    plot: Rect,
    offset: f64,
    padding: f64,
    style: TextStyle,
}

impl LabelPlacer {
    /// A placer for `plot` with a 4px offset and 2px padding.
    pub fn new(plot: Rect) -> Self {
        Self {
            plot,
            offset: 4.0,
            padding: 2.0,
            style: TextStyle::default(),
        }
    }

    /// Sets the distance between the anchor and the label rectangle.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the padding around the text inside the label rectangle.
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

    /// The plot rectangle labels must stay inside.
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// The label text style.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// The candidate rectangle of `size` on `side` of `anchor`.
    pub fn candidate(&self, anchor: Point, size: Size, side: LabelSide) -> Rect {
        let offset = self.offset.max(0.0);
        let (w, h) = (size.width, size.height);
        match side {
            LabelSide::Above => {
                let y1 = anchor.y - offset;
                Rect::new(anchor.x - w / 2.0, y1 - h, anchor.x + w / 2.0, y1)
            }
            LabelSide::Below => {
                let y0 = anchor.y + offset;
                Rect::new(anchor.x - w / 2.0, y0, anchor.x + w / 2.0, y0 + h)
            }
            LabelSide::Right => {
                let x0 = anchor.x + offset;
                Rect::new(x0, anchor.y - h / 2.0, x0 + w, anchor.y + h / 2.0)
            }
            LabelSide::Left => {
                let x1 = anchor.x - offset;
                Rect::new(x1 - w, anchor.y - h / 2.0, x1, anchor.y + h / 2.0)
            }
        }
    }

    /// Tries to place `text` next to `anchor`.
    ///
    /// The preferred side is tried first, then the fallback side; the first rectangle that
    /// is inside the plot and clear of `placed` is claimed and returned. `None` means the
    /// label is not drawn.
    pub fn try_place(
        &self,
        measurer: &dyn TextMeasurer,
        anchor: Point,
        text: &str,
        orientation: PlacementOrientation,
        inverted: bool,
        placed: &mut PlacedLabels,
    ) -> Option<PlacedLabel> {
        if text.is_empty() || !anchor.is_finite() {
            tracing::trace!(?anchor, "label has no text or no anchor");
            return None;
        }
        let metrics = measurer.measure(text, self.style);
        let pad = self.padding.max(0.0);
        let size = Size::new(
            metrics.advance_width + 2.0 * pad,
            metrics.line_height() + 2.0 * pad,
        );
        for side in orientation.sides(inverted) {
            let rect = self.candidate(anchor, size, side);
            if placed.try_claim(rect, self.plot) {
                return Some(PlacedLabel {
                    rect,
                    side,
                    text_rect: rect.inset(-pad),
                });
            }
            tracing::trace!(text, ?side, "label side rejected");
        }
        tracing::trace!(text, ?anchor, "label dropped");
        None
    }
}

/// The pixel anchor of a data point.
pub fn data_anchor(x_scale: &AxisScale, y_scale: &AxisScale, x: f64, y: f64) -> Point {
    let (px, py) = (x_scale.map(x), y_scale.map(y));
    match x_scale.orientation() {
        crate::scale::Orientation::Horizontal => Point::new(px, py),
        crate::scale::Orientation::Vertical => Point::new(py, px),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::{AxisKind, AxisRange, Orientation};
    use chartfit_text::HeuristicTextMeasurer;

    const M: HeuristicTextMeasurer = HeuristicTextMeasurer;
    const PLOT: Rect = Rect::new(0.0, 0.0, 200.0, 100.0);

    fn placer() -> LabelPlacer {
        LabelPlacer::new(PLOT)
            .with_offset(4.0)
            .with_padding(2.0)
            .with_style(TextStyle::new(10.0))
    }

    #[test]
    fn preferred_side_first() {
        let mut placed = PlacedLabels::new();
        let label = placer()
            .try_place(
                &M,
                Point::new(50.0, 50.0),
                "42",
                PlacementOrientation::Vertical,
                false,
                &mut placed,
            )
            .unwrap();
        assert_eq!(label.side, LabelSide::Above);
        // "42" is 12x10, padded to 16x14, ending 4px above the anchor.
        assert_eq!(label.rect, Rect::new(42.0, 32.0, 58.0, 46.0));
        assert_eq!(label.text_rect, Rect::new(44.0, 34.0, 56.0, 44.0));
        assert_eq!(placed.rects(), &[label.rect]);
    }

    #[test]
    fn crowded_neighbours_fall_back_then_drop() {
        let p = placer();
        let mut placed = PlacedLabels::new();
        let mut place = |x: f64| {
            p.try_place(
                &M,
                Point::new(x, 50.0),
                "42",
                PlacementOrientation::Vertical,
                false,
                &mut placed,
            )
            .map(|l| l.side)
        };
        assert_eq!(place(50.0), Some(LabelSide::Above));
        assert_eq!(place(52.0), Some(LabelSide::Below));
        assert_eq!(place(54.0), None);
        assert_eq!(placed.len(), 2);
        assert!(!rects_overlap(placed.rects()[0], placed.rects()[1]));
    }

    #[test]
    fn plot_edges_force_the_fallback() {
        let mut placed = PlacedLabels::new();
        let label = placer()
            .try_place(
                &M,
                Point::new(50.0, 5.0),
                "42",
                PlacementOrientation::Vertical,
                false,
                &mut placed,
            )
            .unwrap();
        assert_eq!(label.side, LabelSide::Below);

        // Wider than the plot on either side of the anchor.
        let none = placer().try_place(
            &M,
            Point::new(100.0, 50.0),
            &"x".repeat(40),
            PlacementOrientation::Horizontal,
            false,
            &mut placed,
        );
        assert!(none.is_none());
    }

    #[test]
    fn inverted_and_horizontal_sides() {
        let mut placed = PlacedLabels::new();
        let p = placer();
        let below = p
            .try_place(
                &M,
                Point::new(50.0, 50.0),
                "-3",
                PlacementOrientation::Vertical,
                true,
                &mut placed,
            )
            .unwrap();
        assert_eq!(below.side, LabelSide::Below);

        let right = p
            .try_place(
                &M,
                Point::new(120.0, 50.0),
                "7",
                PlacementOrientation::Horizontal,
                false,
                &mut placed,
            )
            .unwrap();
        assert_eq!(right.side, LabelSide::Right);
        assert_eq!(right.rect.x0, 124.0);
    }

    #[test]
    fn invalid_anchors_and_empty_text_are_rejected() {
        let mut placed = PlacedLabels::new();
        let p = placer();
        let o = PlacementOrientation::Vertical;
        assert!(p
            .try_place(&M, Point::new(f64::NAN, 5.0), "1", o, false, &mut placed)
            .is_none());
        assert!(p
            .try_place(&M, Point::new(50.0, 50.0), "", o, false, &mut placed)
            .is_none());
        assert!(placed.is_empty());
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rects_overlap(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(rects_overlap(a, Rect::new(9.0, 9.0, 20.0, 20.0)));
    }

    #[test]
    fn anchors_follow_the_scales() {
        let x = AxisScale::new(
            AxisKind::Linear,
            AxisRange::new(0.0, 10.0),
            PLOT,
            Orientation::Horizontal,
        );
        let y = AxisScale::new(
            AxisKind::Linear,
            AxisRange::new(0.0, 100.0),
            PLOT,
            Orientation::Vertical,
        );
        assert_eq!(data_anchor(&x, &y, 5.0, 25.0), Point::new(100.0, 75.0));
    }
}
