// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reserving plot margins for axes and titles.
//!
//! Label sizing depends on the space available to the plot, and the plot's size depends on
//! the labels around it. This module breaks the cycle with a single measurement pass: every
//! axis is measured against the chart bounds minus the base padding, and each side keeps
//! the largest footprint any axis needs there.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartfit_text::{FontWeight, TextMeasurer, TextStyle};
use kurbo::Rect;

use crate::label_layout::{
    LabelLayout, LabelLayoutOptions, max_label_size, resolve_label_layout, rotated_size,
};
use crate::scale::Orientation;

/// Plot margins in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Left margin.
    pub left: f64,
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
}

impl Padding {
    /// No margins.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates padding from its four sides; negative or NaN values become `0`.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: non_negative(left),
            top: non_negative(top),
            right: non_negative(right),
            bottom: non_negative(bottom),
        }
    }

    /// The same margin on every side.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// The margin on `side`.
    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    /// Raises the margin on `side` to at least `value`.
    pub fn reserve(&mut self, side: Side, value: f64) {
        let slot = match side {
            Side::Left => &mut self.left,
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
        };
        *slot = slot.max(non_negative(value));
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// `rect` shrunk by these margins; never inverted (collapses to zero size instead).
    pub fn inset(&self, rect: Rect) -> Rect {
        let rect = rect.abs();
        let x0 = rect.x0 + self.left;
        let y0 = rect.y0 + self.top;
        let x1 = (rect.x1 - self.right).max(x0);
        let y1 = (rect.y1 - self.bottom).max(y0);
        Rect::new(x0, y0, x1, y1)
    }
}

impl core::ops::Add for Padding {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.left + rhs.left,
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}

const fn non_negative(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

/// A side of the plot rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Left of the plot.
    Left,
    /// Above the plot.
    Top,
    /// Right of the plot.
    Right,
    /// Below the plot.
    Bottom,
}

impl Side {
    /// Direction an axis on this side runs (and its labels are laid out in).
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Top | Self::Bottom => Orientation::Horizontal,
            Self::Left | Self::Right => Orientation::Vertical,
        }
    }

    /// The two sides an axis on this side ends at.
    pub fn adjacent(self) -> [Self; 2] {
        match self {
            Self::Top | Self::Bottom => [Self::Left, Self::Right],
            Self::Left | Self::Right => [Self::Top, Self::Bottom],
        }
    }
}

/// What an axis shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisRole {
    /// The independent axis (categories, dates, x values).
    #[default]
    Category,
    /// The dependent axis (measured values).
    Value,
}

/// Title text for an axis or the whole chart.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitleConfig {
    /// Title text.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Space kept around the title.
    pub gap: f64,
}

impl TitleConfig {
    /// Creates a bold 12px title.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 12.0,
            font_weight: FontWeight::BOLD,
            gap: 4.0,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }

    /// Sets the gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    fn style(&self) -> TextStyle {
        TextStyle::new(self.font_size).with_weight(self.font_weight)
    }
}

/// One axis as the padding calculator sees it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisConfig {
    /// Category or value axis.
    pub role: AxisRole,
    /// Whether this is the secondary axis of its role (drawn on the opposite side).
    pub secondary: bool,
    /// Hidden axes reserve nothing.
    pub visible: bool,
    /// The formatted labels that will be drawn.
    pub labels: Vec<String>,
    /// Optional axis title.
    pub title: Option<TitleConfig>,
    /// Base label font size.
    pub label_font_size: f64,
    /// Tick mark length.
    pub tick_length: f64,
    /// Gap between tick marks and labels.
    pub label_gap: f64,
    /// Whether labels sit between ticks (centred in category bands).
    ///
    /// Labels that sit on ticks can overhang the plot's ends by half a label.
    pub between_ticks: bool,
    /// Label layout knobs; the orientation is set from the axis side.
    pub layout: LabelLayoutOptions,
}

impl AxisConfig {
    /// An axis with default styling.
    pub fn new(role: AxisRole, labels: Vec<String>) -> Self {
        Self {
            role,
            secondary: false,
            visible: true,
            labels,
            title: None,
            label_font_size: 10.0,
            tick_length: 5.0,
            label_gap: 3.0,
            between_ticks: role == AxisRole::Category,
            layout: LabelLayoutOptions::default(),
        }
    }

    /// A primary category axis.
    pub fn category(labels: Vec<String>) -> Self {
        Self::new(AxisRole::Category, labels)
    }

    /// A primary value axis.
    pub fn value(labels: Vec<String>) -> Self {
        Self::new(AxisRole::Value, labels)
    }

    /// Marks this axis as secondary.
    #[must_use]
    pub fn with_secondary(mut self, secondary: bool) -> Self {
        self.secondary = secondary;
        self
    }

    /// Shows or hides the axis.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the axis title.
    #[must_use]
    pub fn with_title(mut self, title: TitleConfig) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the base label font size.
    #[must_use]
    pub fn with_label_font_size(mut self, font_size: f64) -> Self {
        self.label_font_size = font_size;
        self
    }

    /// Sets the tick length.
    #[must_use]
    pub fn with_tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = tick_length;
        self
    }

    /// Sets the gap between ticks and labels.
    #[must_use]
    pub fn with_label_gap(mut self, label_gap: f64) -> Self {
        self.label_gap = label_gap;
        self
    }

    /// Sets whether labels sit between ticks.
    #[must_use]
    pub fn with_between_ticks(mut self, between_ticks: bool) -> Self {
        self.between_ticks = between_ticks;
        self
    }

    /// Sets the label layout knobs.
    #[must_use]
    pub fn with_layout(mut self, layout: LabelLayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// The side this axis is drawn on.
    ///
    /// Category axes run along the bottom and value axes along the left; secondary axes
    /// take the opposite side. Bar charts (`swapped`) exchange the two directions.
    pub fn side(&self, swapped: bool) -> Side {
        match (self.role, self.secondary, swapped) {
            (AxisRole::Category, false, false) | (AxisRole::Value, false, true) => Side::Bottom,
            (AxisRole::Category, true, false) | (AxisRole::Value, true, true) => Side::Top,
            (AxisRole::Category, false, true) | (AxisRole::Value, false, false) => Side::Left,
            (AxisRole::Category, true, true) | (AxisRole::Value, true, false) => Side::Right,
        }
    }
}

/// Everything the padding calculator needs for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddingRequest {
    /// Outer chart bounds.
    pub bounds: Rect,
    /// Margins the user always wants, before any axis text.
    pub base_padding: Padding,
    /// Bar charts swap the category and value directions.
    pub swap_orientation: bool,
    /// Optional chart title above everything.
    pub title: Option<TitleConfig>,
    /// Gap between axis labels and axis titles, relative to the label font size.
    pub title_gap_ratio: f64,
    /// The axes, in any order.
    pub axes: Vec<AxisConfig>,
}

impl PaddingRequest {
    /// A request with no axes and no base padding.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            base_padding: Padding::ZERO,
            swap_orientation: false,
            title: None,
            title_gap_ratio: 0.5,
            axes: Vec::new(),
        }
    }

    /// Sets the base padding.
    #[must_use]
    pub fn with_base_padding(mut self, padding: Padding) -> Self {
        self.base_padding = padding;
        self
    }

    /// Swaps category and value directions (horizontal bars).
    #[must_use]
    pub fn with_swapped_orientation(mut self, swapped: bool) -> Self {
        self.swap_orientation = swapped;
        self
    }

    /// Sets the chart title.
    #[must_use]
    pub fn with_title(mut self, title: TitleConfig) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the label-to-title gap ratio.
    #[must_use]
    pub fn with_title_gap_ratio(mut self, ratio: f64) -> Self {
        self.title_gap_ratio = ratio;
        self
    }

    /// Adds an axis.
    #[must_use]
    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axes.push(axis);
        self
    }
}

/// The resolved layout of one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisPlacement {
    /// Index into [`PaddingRequest::axes`].
    pub axis: usize,
    /// Side the axis is drawn on.
    pub side: Side,
    /// How its labels are drawn.
    pub labels: LabelLayout,
    /// Margin the axis needs on its side.
    pub thickness: f64,
}

/// Output of [`compute_padding`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlotLayout {
    /// Final margins, base padding included.
    pub padding: Padding,
    /// The plot rectangle (`bounds` inset by `padding`).
    pub plot: Rect,
    /// The chart title's band above the axes, if any.
    pub title: Option<Rect>,
    /// One entry per visible axis, in request order.
    pub axes: Vec<AxisPlacement>,
}

impl PlotLayout {
    /// The placement of the axis at `index` in the request, if it was visible.
    pub fn axis(&self, index: usize) -> Option<&AxisPlacement> {
        self.axes.iter().find(|a| a.axis == index)
    }
}

/// Computes the plot margins for `request` in one measurement pass.
///
/// Each visible axis resolves its label layout against `available / label_count`, where
/// `available` is the bounds minus the base padding along the axis. Its margin is the tick
/// length, the label gap, the labels' rotated thickness and, with a title, a gap of
/// `title_gap_ratio × label size` plus the title's line height. Sides keep the largest
/// margin any axis needs there. Value axes whose labels sit on ticks also reserve half a
/// label on the adjacent sides, and rotated titles on vertical value axes that are longer
/// than the available height reserve the excess above and below.
pub fn compute_padding(measurer: &dyn TextMeasurer, request: &PaddingRequest) -> PlotLayout {
    let available = request.base_padding.inset(request.bounds);
    let mut reserved = Padding::ZERO;
    let mut axes = Vec::with_capacity(request.axes.len());

    for (index, axis) in request.axes.iter().enumerate() {
        if !axis.visible {
            continue;
        }
        let side = axis.side(request.swap_orientation);
        let orientation = side.orientation();
        let length = orientation.length(available);
        let options = axis.layout.with_orientation(orientation);

        let labels = if axis.labels.is_empty() {
            LabelLayout::plain(axis.label_font_size, 0.0)
        } else {
            let spacing = length / axis.labels.len() as f64;
            resolve_label_layout(
                measurer,
                &axis.labels,
                spacing,
                axis.label_font_size,
                &options,
            )
        };

        let (label_w, label_h) = label_footprint(measurer, axis, &labels);
        let (along, across) = match orientation {
            Orientation::Horizontal => (label_w, label_h),
            Orientation::Vertical => (label_h, label_w),
        };
        let mut thickness = axis.tick_length.max(0.0);
        if !axis.labels.is_empty() {
            thickness += axis.label_gap.max(0.0) + across;
        }

        if let Some(title) = &axis.title {
            let metrics = measurer.measure(&title.text, title.style());
            thickness +=
                request.title_gap_ratio.max(0.0) * labels.font_size + metrics.line_height();
            if axis.role == AxisRole::Value && orientation == Orientation::Vertical {
                let overflow = (metrics.advance_width - length) / 2.0;
                for adjacent in side.adjacent() {
                    reserved.reserve(adjacent, overflow);
                }
            }
        }

        if axis.role == AxisRole::Value && !axis.between_ticks && !axis.labels.is_empty() {
            for adjacent in side.adjacent() {
                reserved.reserve(adjacent, along / 2.0);
            }
        }

        reserved.reserve(side, thickness);
        tracing::debug!(index, ?side, thickness, ?labels, "axis measured");
        axes.push(AxisPlacement {
            axis: index,
            side,
            labels,
            thickness,
        });
    }

    let mut title_rect = None;
    if let Some(title) = &request.title {
        let band = measurer.measure(&title.text, title.style()).line_height()
            + 2.0 * title.gap.max(0.0);
        let top = available.y0;
        reserved.top += band;
        title_rect = Some(Rect::new(available.x0, top, available.x1, top + band));
    }

    let padding = request.base_padding + reserved;
    let plot = padding.inset(request.bounds);
    tracing::debug!(?padding, ?plot, "computed plot padding");
    PlotLayout {
        padding,
        plot,
        title: title_rect,
        axes,
    }
}

/// Rotated `(width, height)` of the largest label as drawn under `layout`.
fn label_footprint(
    measurer: &dyn TextMeasurer,
    axis: &AxisConfig,
    layout: &LabelLayout,
) -> (f64, f64) {
    let style = TextStyle::new(layout.font_size).with_weight(axis.layout.font_weight);
    let (mut w, h) = max_label_size(measurer, &axis.labels, style);
    if layout.use_ellipsis {
        w = w.min(layout.max_label_width);
    }
    rotated_size(w, h, layout.rotation_degrees)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use chartfit_text::HeuristicTextMeasurer;

    const M: HeuristicTextMeasurer = HeuristicTextMeasurer;
    const BOUNDS: Rect = Rect::new(0.0, 0.0, 400.0, 300.0);

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| String::from(*s)).collect()
    }

    fn quarters() -> AxisConfig {
        AxisConfig::category(strings(&["Q1", "Q2", "Q3", "Q4"]))
    }

    fn percents() -> AxisConfig {
        AxisConfig::value(strings(&["0", "20", "40", "60", "80", "100"]))
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn no_axes_leave_only_base_padding() {
        let request = PaddingRequest::new(BOUNDS).with_base_padding(Padding::uniform(10.0));
        let layout = compute_padding(&M, &request);
        assert_eq!(layout.padding, Padding::uniform(10.0));
        assert_eq!(layout.plot, Rect::new(10.0, 10.0, 390.0, 290.0));
        assert!(layout.axes.is_empty());
    }

    #[test]
    fn column_chart_reserves_bottom_and_left() {
        let request = PaddingRequest::new(BOUNDS)
            .with_base_padding(Padding::uniform(10.0))
            .with_axis(quarters())
            .with_axis(percents());
        let layout = compute_padding(&M, &request);
        // Bottom: tick 5 + gap 3 + line 10. Left: 5 + 3 + "100" (18).
        assert_close(layout.padding.bottom, 28.0);
        assert_close(layout.padding.left, 36.0);
        // Value labels centred on the top tick overhang by half a line.
        assert_close(layout.padding.top, 15.0);
        assert_close(layout.padding.right, 10.0);
        assert_eq!(layout.plot, Rect::new(36.0, 15.0, 390.0, 272.0));
        assert_eq!(layout.axis(0).map(|a| a.side), Some(Side::Bottom));
        assert_eq!(layout.axis(1).map(|a| a.side), Some(Side::Left));
    }

    #[test]
    fn bar_chart_swaps_sides() {
        let request = PaddingRequest::new(BOUNDS)
            .with_swapped_orientation(true)
            .with_axis(quarters())
            .with_axis(percents());
        let layout = compute_padding(&M, &request);
        assert_eq!(layout.axis(0).map(|a| a.side), Some(Side::Left));
        assert_eq!(layout.axis(1).map(|a| a.side), Some(Side::Bottom));
        assert_close(layout.padding.left, 20.0);
        assert_close(layout.padding.bottom, 18.0);
        // Half of "100" hangs past the right end.
        assert_close(layout.padding.right, 9.0);
    }

    #[test]
    fn crowded_labels_rotate_and_thicken_the_margin() {
        let names: Vec<String> = (0..12).map(|i| std::format!("Category {i:02}")).collect();
        let request = PaddingRequest::new(BOUNDS).with_axis(AxisConfig::category(names));
        let layout = compute_padding(&M, &request);
        let bottom = layout.axis(0).unwrap();
        assert_eq!(bottom.labels.rotation_degrees, 90.0);
        // 11 chars at 6px become the margin thickness.
        assert_close(bottom.thickness, 5.0 + 3.0 + 66.0);
    }

    #[test]
    fn secondary_axes_and_hidden_axes() {
        let request = PaddingRequest::new(BOUNDS)
            .with_axis(percents().with_secondary(true))
            .with_axis(quarters().with_visible(false));
        let layout = compute_padding(&M, &request);
        assert_eq!(layout.axes.len(), 1);
        assert_eq!(layout.axes[0].side, Side::Right);
        assert_close(layout.padding.right, 26.0);
        assert_close(layout.padding.bottom, 5.0);
    }

    #[test]
    fn titles_reserve_their_band() {
        let request = PaddingRequest::new(BOUNDS)
            .with_title(TitleConfig::new("Revenue").with_font_size(20.0).with_gap(5.0))
            .with_axis(quarters().with_title(TitleConfig::new("Quarter")));
        let layout = compute_padding(&M, &request);
        assert_close(layout.padding.top, 30.0);
        assert_eq!(layout.title, Some(Rect::new(0.0, 0.0, 400.0, 30.0)));
        // 18 for the axis, 0.5 * 10 gap, 12 for the title line.
        assert_close(layout.padding.bottom, 35.0);
    }

    #[test]
    fn long_vertical_value_title_reserves_top_and_bottom() {
        let title = TitleConfig::new("x".repeat(60)).with_font_size(10.0);
        let request = PaddingRequest::new(Rect::new(0.0, 0.0, 400.0, 200.0))
            .with_axis(AxisConfig::value(vec![]).with_title(title));
        let layout = compute_padding(&M, &request);
        // Bold 10px: 6.5px per char, 390px of title against 200px of axis.
        assert_close(layout.padding.top, 95.0);
        assert_close(layout.padding.bottom, 95.0);
    }

    #[test]
    fn inset_never_inverts() {
        let tiny = Padding::uniform(80.0).inset(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tiny.width(), 0.0);
        assert_eq!(tiny.height(), 0.0);
        assert_eq!(Padding::new(-3.0, f64::NAN, 1.0, 2.0), Padding::new(0.0, 0.0, 1.0, 2.0));
    }
}
