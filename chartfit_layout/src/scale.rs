// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value ↔ pixel mapping.
//!
//! Every series painter and hit-tester goes through the same three steps:
//! transform the raw value for the axis kind, normalize it into `[0, 1]` across
//! the axis range, and interpolate across the plot rectangle.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::Rect;

/// The scale family governing value transformation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisKind {
    /// Identity transform over real numbers.
    #[default]
    Linear,
    /// `log10` transform; only strictly positive values are valid.
    Logarithmic,
    /// Linear over a serial day count (see [`days_to_datetime`](crate::days_to_datetime)).
    DateTime,
    /// Linear over category indices.
    Categorical,
}

impl AxisKind {
    /// Applies the axis transform (`log10` for logarithmic axes).
    pub fn transform(self, value: f64) -> f64 {
        match self {
            Self::Logarithmic => value.log10(),
            Self::Linear | Self::DateTime | Self::Categorical => value,
        }
    }

    /// Inverts [`transform`](Self::transform).
    pub fn untransform(self, transformed: f64) -> f64 {
        match self {
            Self::Logarithmic => 10_f64.powf(transformed),
            Self::Linear | Self::DateTime | Self::Categorical => transformed,
        }
    }

    /// Returns `true` if `value` can be placed on an axis of this kind.
    pub fn accepts(self, value: f64) -> bool {
        match self {
            Self::Logarithmic => value.is_finite() && value > 0.0,
            Self::Linear | Self::DateTime | Self::Categorical => value.is_finite(),
        }
    }
}

/// Which way an axis runs across the plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Values grow left to right.
    #[default]
    Horizontal,
    /// Values grow bottom to top (pixel y shrinks as values grow).
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Length of `rect` along this orientation.
    pub fn length(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.width(),
            Self::Vertical => rect.height(),
        }
    }
}

/// A `[min, max]` data range on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    /// Lower bound in data units.
    pub min: f64,
    /// Upper bound in data units.
    pub max: f64,
}

impl AxisRange {
    /// Creates a range as given (no normalization).
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The index range for `count` categories.
    ///
    /// With `between_ticks`, categories sit in the middle of their band and the range is
    /// `[-0.5, count - 0.5]`; otherwise categories sit on the range ends, `[0, count - 1]`.
    pub fn categories(count: usize, between_ticks: bool) -> Self {
        let last = count.saturating_sub(1) as f64;
        if between_ticks {
            Self::new(-0.5, last + 0.5)
        } else {
            Self::new(0.0, last)
        }
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns `true` if `value` lies within the range (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Swaps inverted bounds and widens degenerate ranges.
    ///
    /// - inverted (`max < min`): bounds are swapped;
    /// - equal bounds on a logarithmic axis: `min` is forced to `1` if non-positive and
    ///   `max` becomes `min * 10`;
    /// - equal bounds otherwise: `max` becomes `min + 1`.
    ///
    /// Non-finite bounds are returned untouched; callers check [`is_finite`](Self::is_finite).
    #[must_use]
    pub fn normalized(self, kind: AxisKind) -> Self {
        let Self { mut min, mut max } = self;
        if max < min {
            core::mem::swap(&mut min, &mut max);
        }
        if min == max {
            match kind {
                AxisKind::Logarithmic => {
                    if min <= 0.0 {
                        min = 1.0;
                    }
                    max = min * 10.0;
                }
                AxisKind::Linear | AxisKind::DateTime | AxisKind::Categorical => {
                    max = min + 1.0;
                }
            }
        }
        Self { min, max }
    }
}

/// Maps `value` into `[0, 1]` across `range`.
///
/// Returns `0` (the axis minimum) when the transformed value or either transformed bound
/// is NaN/infinite, when `kind` is logarithmic and `value <= 0`, or when the range has
/// zero width. An inverted range yields a reversed mapping.
pub fn normalize(value: f64, range: AxisRange, kind: AxisKind) -> f64 {
    if kind == AxisKind::Logarithmic && !(value > 0.0) {
        return 0.0;
    }
    let v = kind.transform(value);
    let lo = kind.transform(range.min);
    let hi = kind.transform(range.max);
    if !v.is_finite() || !lo.is_finite() || !hi.is_finite() {
        return 0.0;
    }
    let denom = hi - lo;
    if denom == 0.0 {
        return 0.0;
    }
    ((v - lo) / denom).clamp(0.0, 1.0)
}

/// Interpolates a normalized `t` across `rect`.
///
/// Horizontal axes run from `rect.x0` to `rect.x1`; vertical axes run from `rect.y1`
/// up to `rect.y0`, so larger values land on smaller pixel rows.
pub fn to_pixel(t: f64, rect: Rect, orientation: Orientation) -> f64 {
    match orientation {
        Orientation::Horizontal => rect.x0 + t * rect.width(),
        Orientation::Vertical => rect.y1 - t * rect.height(),
    }
}

/// Inverts [`to_pixel`]; the result is not clamped.
pub fn from_pixel(pixel: f64, rect: Rect, orientation: Orientation) -> f64 {
    let (offset, length) = match orientation {
        Orientation::Horizontal => (pixel - rect.x0, rect.width()),
        Orientation::Vertical => (rect.y1 - pixel, rect.height()),
    };
    if length == 0.0 { 0.0 } else { offset / length }
}

/// `to_pixel(normalize(value, range, kind), rect, orientation)`.
pub fn map_value_to_pixel(
    value: f64,
    range: AxisRange,
    kind: AxisKind,
    rect: Rect,
    orientation: Orientation,
) -> f64 {
    to_pixel(normalize(value, range, kind), rect, orientation)
}

/// A resolved axis: kind, normalized range, and the pixel span it maps onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale {
    kind: AxisKind,
    range: AxisRange,
    rect: Rect,
    orientation: Orientation,
}

impl AxisScale {
    /// Creates a scale; `range` is [normalized](AxisRange::normalized) for `kind`.
    pub fn new(kind: AxisKind, range: AxisRange, rect: Rect, orientation: Orientation) -> Self {
        Self {
            kind,
            range: range.normalized(kind),
            rect,
            orientation,
        }
    }

    /// The axis kind.
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// The normalized range.
    pub fn range(&self) -> AxisRange {
        self.range
    }

    /// The rectangle the axis spans.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The axis orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Maps a data value to a pixel coordinate along the axis.
    pub fn map(&self, value: f64) -> f64 {
        map_value_to_pixel(value, self.range, self.kind, self.rect, self.orientation)
    }

    /// Maps a pixel coordinate back to a data value (for hit-testing).
    ///
    /// Pixels outside the rectangle extrapolate. Returns the range minimum if the range
    /// cannot be transformed (e.g. non-positive bounds on a logarithmic axis).
    pub fn invert(&self, pixel: f64) -> f64 {
        let lo = self.kind.transform(self.range.min);
        let hi = self.kind.transform(self.range.max);
        if !lo.is_finite() || !hi.is_finite() {
            return self.range.min;
        }
        let t = from_pixel(pixel, self.rect, self.orientation);
        self.kind.untransform(lo + t * (hi - lo))
    }

    /// Pixel length of the axis.
    pub fn length(&self) -> f64 {
        self.orientation.length(self.rect)
    }

    /// Pixels covered by one data unit; for categorical axes, the width of one band.
    ///
    /// Meaningless for logarithmic axes, where it returns pixels per decade.
    pub fn unit_width(&self) -> f64 {
        let lo = self.kind.transform(self.range.min);
        let hi = self.kind.transform(self.range.max);
        let span = hi - lo;
        if !span.is_finite() || span == 0.0 {
            return 0.0;
        }
        self.length() / span.abs()
    }

    /// Pixel width of one category band; `0` for non-categorical axes.
    pub fn band_width(&self) -> f64 {
        match self.kind {
            AxisKind::Categorical => self.unit_width(),
            AxisKind::Linear | AxisKind::Logarithmic | AxisKind::DateTime => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const PLOT: Rect = Rect::new(10.0, 20.0, 110.0, 220.0);

    #[test]
    fn horizontal_mapping_interpolates_width() {
        let range = AxisRange::new(0.0, 10.0);
        let px = map_value_to_pixel(2.5, range, AxisKind::Linear, PLOT, Orientation::Horizontal);
        assert!((px - 35.0).abs() < 1e-9);
    }

    #[test]
    fn vertical_mapping_is_inverted() {
        let range = AxisRange::new(0.0, 10.0);
        let bottom = map_value_to_pixel(0.0, range, AxisKind::Linear, PLOT, Orientation::Vertical);
        let top = map_value_to_pixel(10.0, range, AxisKind::Linear, PLOT, Orientation::Vertical);
        assert!((bottom - 220.0).abs() < 1e-9);
        assert!((top - 20.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_clamps_and_rejects_invalid_values() {
        let range = AxisRange::new(0.0, 10.0);
        assert_eq!(normalize(-5.0, range, AxisKind::Linear), 0.0);
        assert_eq!(normalize(50.0, range, AxisKind::Linear), 1.0);
        assert_eq!(normalize(f64::NAN, range, AxisKind::Linear), 0.0);
        assert_eq!(normalize(f64::INFINITY, range, AxisKind::Linear), 0.0);
        assert_eq!(
            normalize(5.0, AxisRange::new(f64::NAN, 1.0), AxisKind::Linear),
            0.0
        );
        let log = AxisRange::new(1.0, 100.0);
        assert_eq!(normalize(0.0, log, AxisKind::Logarithmic), 0.0);
        assert_eq!(normalize(-3.0, log, AxisKind::Logarithmic), 0.0);
        assert!((normalize(10.0, log, AxisKind::Logarithmic) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_ranges_are_widened() {
        let lin = AxisRange::new(5.0, 5.0).normalized(AxisKind::Linear);
        assert_eq!(lin, AxisRange::new(5.0, 6.0));
        let log = AxisRange::new(3.0, 3.0).normalized(AxisKind::Logarithmic);
        assert_eq!(log, AxisRange::new(3.0, 30.0));
        let log0 = AxisRange::new(0.0, 0.0).normalized(AxisKind::Logarithmic);
        assert_eq!(log0, AxisRange::new(1.0, 10.0));
        let swapped = AxisRange::new(9.0, 1.0).normalized(AxisKind::Linear);
        assert_eq!(swapped, AxisRange::new(1.0, 9.0));
    }

    #[test]
    fn log_scale_maps_endpoints_to_range_and_inverts() {
        let s = AxisScale::new(
            AxisKind::Logarithmic,
            AxisRange::new(1.0, 100.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Orientation::Horizontal,
        );
        assert!((s.map(1.0) - 0.0).abs() < 1e-9);
        assert!((s.map(100.0) - 10.0).abs() < 1e-9);
        assert!((s.invert(5.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn categorical_bands_split_the_axis() {
        let s = AxisScale::new(
            AxisKind::Categorical,
            AxisRange::categories(4, true),
            PLOT,
            Orientation::Horizontal,
        );
        assert!((s.band_width() - 25.0).abs() < 1e-9);
        assert!((s.map(0.0) - 22.5).abs() < 1e-9);
        assert!((s.map(3.0) - 97.5).abs() < 1e-9);
    }
}
