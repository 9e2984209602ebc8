// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting a row (or column) of labels into the space each label gets.
//!
//! When the labels do not fit, the resolver tries a fixed cascade and keeps the first
//! remedy that works:
//! 1. the base font size as is,
//! 2. a smaller font, down to a floor,
//! 3. rotation by 45°, then 90°,
//! 4. ellipsis trimming at draw time,
//! 5. drawing only every `step`-th label.

extern crate alloc;

use alloc::borrow::Cow;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use chartfit_text::{ELLIPSIS, FontWeight, TextMeasurer, TextStyle, trim_to_width};

use crate::scale::Orientation;

/// The resolved presentation for one set of labels.
///
/// Produced once per axis per render and not modified afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelLayout {
    /// Font size to draw labels at.
    pub font_size: f64,
    /// Clockwise rotation in degrees: `0`, `45` or `90`.
    pub rotation_degrees: f64,
    /// Draw every `step`-th label (`step >= 1`).
    pub step: usize,
    /// Whether labels must be trimmed to [`max_label_width`](Self::max_label_width).
    pub use_ellipsis: bool,
    /// Unrotated width budget per label.
    ///
    /// The trimming budget when [`use_ellipsis`](Self::use_ellipsis) is set; otherwise the
    /// widest label's width at [`font_size`](Self::font_size).
    pub max_label_width: f64,
}

impl LabelLayout {
    /// Base-size, unrotated layout drawing every label.
    pub fn plain(font_size: f64, max_label_width: f64) -> Self {
        Self {
            font_size,
            rotation_degrees: 0.0,
            step: 1,
            use_ellipsis: false,
            max_label_width,
        }
    }

    /// Returns `true` if the label at `index` is drawn.
    pub fn shows(&self, index: usize) -> bool {
        index % self.step.max(1) == 0
    }

    /// The text to draw for `text` under this layout.
    pub fn display_text<'a>(
        &self,
        measurer: &dyn TextMeasurer,
        text: &'a str,
        font_weight: FontWeight,
    ) -> Cow<'a, str> {
        if self.use_ellipsis {
            let style = TextStyle::new(self.font_size).with_weight(font_weight);
            trim_to_width(measurer, text, style, self.max_label_width)
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self::plain(12.0, 0.0)
    }
}

/// Knobs for [`resolve_label_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LabelLayoutOptions {
    /// Direction labels are laid out in; widths are compared for horizontal rows, heights
    /// for vertical columns.
    pub orientation: Orientation,
    /// Subtracted from the per-label spacing so neighbours never touch.
    pub margin: f64,
    /// Lower bound for the shrunk font size.
    pub min_font_size: f64,
    /// Lower bound for the shrunk font size, relative to the base size.
    pub shrink_ratio: f64,
    /// Whether 45°/90° rotation may be used.
    pub allow_rotation: bool,
    /// Whether ellipsis trimming may be used.
    pub allow_ellipsis: bool,
    /// Weight labels are measured with.
    pub font_weight: FontWeight,
}

impl Default for LabelLayoutOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            margin: 4.0,
            min_font_size: 8.0,
            shrink_ratio: 0.7,
            allow_rotation: true,
            allow_ellipsis: true,
            font_weight: FontWeight::NORMAL,
        }
    }
}

impl LabelLayoutOptions {
    /// Sets the layout direction.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the spacing margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the shrink floor (`max(min_font_size, base * shrink_ratio)`).
    #[must_use]
    pub fn with_shrink_floor(mut self, min_font_size: f64, shrink_ratio: f64) -> Self {
        self.min_font_size = min_font_size;
        self.shrink_ratio = shrink_ratio;
        self
    }

    /// Allows or forbids rotation.
    #[must_use]
    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Allows or forbids ellipsis trimming.
    #[must_use]
    pub fn with_ellipsis(mut self, allow: bool) -> Self {
        self.allow_ellipsis = allow;
        self
    }

    /// Sets the measured font weight.
    #[must_use]
    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

/// Bounding box `(width, height)` of a `width × height` box rotated by `degrees`.
pub fn rotated_size(width: f64, height: f64, degrees: f64) -> (f64, f64) {
    if degrees == 0.0 {
        return (width, height);
    }
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    (width * cos + height * sin, width * sin + height * cos)
}

/// The widest label and the tallest line among `labels`.
pub fn max_label_size<S: AsRef<str>>(
    measurer: &dyn TextMeasurer,
    labels: &[S],
    style: TextStyle,
) -> (f64, f64) {
    labels.iter().fold((0.0_f64, 0.0_f64), |(w, h), label| {
        let m = measurer.measure(label.as_ref(), style);
        (w.max(m.advance_width), h.max(m.line_height()))
    })
}

/// Extent of the largest rotated label along the layout direction.
fn extent<S: AsRef<str>>(
    measurer: &dyn TextMeasurer,
    labels: &[S],
    style: TextStyle,
    degrees: f64,
    orientation: Orientation,
) -> f64 {
    let (w, h) = max_label_size(measurer, labels, style);
    let (rw, rh) = rotated_size(w, h, degrees);
    match orientation {
        Orientation::Horizontal => rw,
        Orientation::Vertical => rh,
    }
}

/// Decides font size, rotation, ellipsis and skipping for `labels`.
///
/// `spacing` is the pixel distance between neighbouring label anchors; the cascade compares
/// label extents against `spacing - options.margin`. Rotation is only tried at the base font
/// size. The final fallback keeps the base size and draws every
/// `ceil((extent + margin) / spacing)`-th label.
pub fn resolve_label_layout<S: AsRef<str>>(
    measurer: &dyn TextMeasurer,
    labels: &[S],
    spacing: f64,
    base_font_size: f64,
    options: &LabelLayoutOptions,
) -> LabelLayout {
    let base = TextStyle::new(base_font_size).with_weight(options.font_weight);
    if labels.is_empty() {
        return LabelLayout::plain(base_font_size, 0.0);
    }
    let (base_width, _) = max_label_size(measurer, labels, base);
    let available = spacing - options.margin;
    let orientation = options.orientation;

    // 1. Base size.
    let base_extent = extent(measurer, labels, base, 0.0, orientation);
    if base_extent <= available {
        return LabelLayout::plain(base_font_size, base_width);
    }
    tracing::trace!(base_extent, available, "labels overflow at base size");

    // 2. Shrink.
    let floor = options.min_font_size.max(base_font_size * options.shrink_ratio);
    if available > 0.0 && floor < base_font_size && base_extent > 0.0 {
        // Half-point steps keep the shrunk size stable across small spacing changes.
        let proportional = (base_font_size * available / base_extent * 2.0).floor() / 2.0;
        if proportional >= floor {
            let shrunk = base.with_font_size(proportional);
            if extent(measurer, labels, shrunk, 0.0, orientation) <= available {
                let (width, _) = max_label_size(measurer, labels, shrunk);
                let layout = LabelLayout::plain(proportional, width);
                tracing::debug!(?layout, "labels shrunk to fit");
                return layout;
            }
        }
        tracing::trace!(proportional, floor, "shrinking is not enough");
    }

    // 3. Rotate.
    if options.allow_rotation {
        for degrees in [45.0, 90.0] {
            let rotated = extent(measurer, labels, base, degrees, orientation);
            if rotated <= available {
                let layout = LabelLayout {
                    rotation_degrees: degrees,
                    ..LabelLayout::plain(base_font_size, base_width)
                };
                tracing::debug!(?layout, "labels rotated to fit");
                return layout;
            }
            tracing::trace!(degrees, rotated, "rotation is not enough");
        }
    }

    // 4. Ellipsis.
    if options.allow_ellipsis && available > 0.0 {
        let marker = measurer.measure(ELLIPSIS, base);
        let marker_extent = match orientation {
            Orientation::Horizontal => marker.advance_width,
            Orientation::Vertical => marker.line_height(),
        };
        if marker_extent <= available {
            let layout = LabelLayout {
                use_ellipsis: true,
                ..LabelLayout::plain(base_font_size, available)
            };
            tracing::debug!(?layout, "labels trimmed with ellipsis");
            return layout;
        }
        tracing::trace!(marker_extent, "ellipsis does not fit");
    }

    // 5. Skip.
    let step = skip_step(base_extent + options.margin, spacing, labels.len());
    let layout = LabelLayout {
        step,
        ..LabelLayout::plain(base_font_size, base_width)
    };
    tracing::debug!(?layout, "labels thinned out");
    layout
}

fn skip_step(needed: f64, spacing: f64, count: usize) -> usize {
    let fallback = count.max(1);
    if !(spacing > 0.0) || !needed.is_finite() {
        return fallback;
    }
    let step = (needed / spacing).ceil();
    if !(step >= 1.0) {
        return 1;
    }
    if step >= fallback as f64 {
        return fallback;
    }
    #[allow(clippy::cast_possible_truncation, reason = "bounded by `count` above")]
    {
        step as usize
    }
}
