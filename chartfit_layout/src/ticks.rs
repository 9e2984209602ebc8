// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation.
//!
//! Major ticks come from one of four generators, picked by [`AxisKind`]:
//! - linear: "nice number" stepping (1, 2 or 5 times a power of ten),
//! - logarithmic: whole decades, optionally with 2× and 5× multipliers,
//! - date/time: calendar-unit stepping (see [`date_ticks`](crate::date_ticks)),
//! - categorical: every category index.
//!
//! Every generator degrades to an empty [`TickSet`] on unusable input instead of failing.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use chrono::Weekday;
use smallvec::SmallVec;

use crate::scale::{AxisKind, AxisRange};
use crate::time::{self, DateTimeUnit};

/// Upper bound on the number of ticks a single generator will emit.
pub(crate) const MAX_TICKS: usize = 10_000;

/// Stack-first storage for tick values; typical axes never spill to the heap.
pub type TickBuf = SmallVec<[f64; 16]>;

/// The output of a tick generator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSet {
    /// Major tick values, ascending.
    pub major: TickBuf,
    /// Distance between consecutive ticks in data units (days for date/time axes).
    ///
    /// `0` when ticks are not evenly spaced (logarithmic axes).
    pub step: f64,
    /// The calendar unit the ticks were aligned to, for date/time axes.
    ///
    /// Drives the choice of date pattern when formatting labels. `None` if the range
    /// could not be read as calendar time and linear ticks were used instead.
    pub date_unit: Option<DateTimeUnit>,
}

impl TickSet {
    /// An empty tick set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no ticks.
    pub fn is_empty(&self) -> bool {
        self.major.is_empty()
    }

    /// Number of major ticks.
    pub fn len(&self) -> usize {
        self.major.len()
    }

    /// Major tick values.
    pub fn values(&self) -> &[f64] {
        &self.major
    }
}

/// Rounds `value` to a "nice" number: 1, 2, 5 or 10 times a power of ten.
///
/// With `round`, the mantissa snaps to the nearest nice value (thresholds 1.5, 3, 7);
/// otherwise it snaps up to the next nice value that is not smaller (thresholds 1, 2, 5).
/// Returns `0` for non-finite or non-positive input.
pub fn nice_number(value: f64, round: bool) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    let exponent = value.log10().floor();
    let magnitude = 10_f64.powf(exponent);
    let fraction = value / magnitude;
    let nice = if round {
        if fraction <= 1.5 {
            1.0
        } else if fraction <= 3.0 {
            2.0
        } else if fraction <= 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Nice-number ticks covering `range`.
///
/// The first tick is `floor(min / step) * step` and the last is `ceil(max / step) * step`,
/// so the ticks always enclose the range. Degenerate ranges are widened first.
pub fn linear_ticks(range: AxisRange, desired: usize) -> TickSet {
    let range = range.normalized(AxisKind::Linear);
    if !range.is_finite() {
        tracing::debug!(
            min = range.min,
            max = range.max,
            "linear range is not finite; no ticks"
        );
        return TickSet::empty();
    }
    let span = range.span();
    if !(span > 0.0) || !span.is_finite() {
        return TickSet::empty();
    }

    let intervals = desired.max(2) - 1;
    let nice_range = nice_number(span, false);
    let step = nice_number(nice_range / intervals as f64, true);
    if !(step > 0.0) || !step.is_finite() {
        return TickSet::empty();
    }

    let first = (range.min / step).floor() * step;
    let last = (range.max / step).ceil() * step;
    // Half a step of slack absorbs floating-point error at the upper end.
    let count = ((last - first) / step + 0.5).floor();
    if !count.is_finite() || count < 0.0 || count >= MAX_TICKS as f64 {
        return TickSet::empty();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by finite/non-negative checks and capped at MAX_TICKS"
    )]
    let count = count as usize;

    let major: TickBuf = (0..=count)
        .map(|i| snap_to_step(first + step * i as f64, step))
        .collect();
    // Steps below the precision of the bounds collapse into repeated values.
    if first + step == first || major.windows(2).any(|w| w[1] <= w[0]) {
        tracing::debug!(
            min = range.min,
            max = range.max,
            step,
            "tick step is below float precision; no ticks"
        );
        return TickSet::empty();
    }
    TickSet {
        major,
        step,
        date_unit: None,
    }
}

/// Decade ticks for a logarithmic axis.
///
/// When the range spans fewer decades than `desired`, each decade also gets its 2× and 5×
/// multiples. Values outside the range are discarded. Non-positive or non-finite bounds
/// yield no ticks.
pub fn log_ticks(range: AxisRange, desired: usize) -> TickSet {
    let range = range.normalized(AxisKind::Logarithmic);
    if !range.is_finite() || range.min <= 0.0 {
        tracing::debug!(
            min = range.min,
            max = range.max,
            "logarithmic range needs finite positive bounds; no ticks"
        );
        return TickSet::empty();
    }

    let min_power = decade(range.min.log10().floor());
    let max_power = decade(range.max.log10().ceil());
    let decades = usize::try_from(max_power - min_power).unwrap_or(0);
    let multipliers: &[f64] = if decades < desired {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };

    let lo = range.min * (1.0 - 1.0e-12);
    let hi = range.max * (1.0 + 1.0e-12);
    let mut major = TickBuf::new();
    for power in min_power..=max_power {
        let base = 10_f64.powi(power);
        for &m in multipliers {
            let v = m * base;
            if v >= lo && v <= hi {
                major.push(v);
            }
        }
    }
    major.sort_by(f64::total_cmp);
    TickSet {
        major,
        step: 0.0,
        date_unit: None,
    }
}

/// One tick per category index inside `range`.
pub fn category_ticks(range: AxisRange) -> TickSet {
    let range = range.normalized(AxisKind::Categorical);
    if !range.is_finite() {
        return TickSet::empty();
    }
    let first = range.min.ceil();
    let last = range.max.floor();
    if last < first || last - first >= MAX_TICKS as f64 {
        return TickSet::empty();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "bounded by MAX_TICKS above"
    )]
    let count = (last - first) as usize;
    let major = (0..=count).map(|i| first + i as f64).collect();
    TickSet {
        major,
        step: 1.0,
        date_unit: None,
    }
}

/// Minor ticks between consecutive major ticks.
///
/// Each interval is split into `minor_count + 1` equal segments in *transformed* space, so
/// logarithmic minor ticks are spaced geometrically. Intervals whose ends are not valid for
/// `kind` are skipped.
pub fn minor_ticks(major: &[f64], kind: AxisKind, minor_count: usize) -> Vec<f64> {
    let mut out = Vec::new();
    if minor_count == 0 {
        return out;
    }
    let segments = (minor_count + 1) as f64;
    for pair in major.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !kind.accepts(a) || !kind.accepts(b) {
            continue;
        }
        let (ta, tb) = (kind.transform(a), kind.transform(b));
        for i in 1..=minor_count {
            let v = kind.untransform(ta + (tb - ta) * i as f64 / segments);
            if kind.accepts(v) {
                out.push(v);
            }
        }
    }
    out
}

/// Picks and runs the tick generator for an axis kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickGenerator {
    /// First day of the week; weekly date ticks land on this weekday.
    pub first_day_of_week: Weekday,
}

impl Default for TickGenerator {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
        }
    }
}

impl TickGenerator {
    /// Creates a generator with Monday-first weeks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first day of the week used for weekly date ticks.
    #[must_use]
    pub fn with_first_day_of_week(mut self, first_day_of_week: Weekday) -> Self {
        self.first_day_of_week = first_day_of_week;
        self
    }

    /// Major ticks for `range` on an axis of `kind`, aiming for about `desired` ticks.
    pub fn ticks(&self, range: AxisRange, kind: AxisKind, desired: usize) -> TickSet {
        match kind {
            AxisKind::Linear => linear_ticks(range, desired),
            AxisKind::Logarithmic => log_ticks(range, desired),
            AxisKind::DateTime => time::date_ticks(range, desired, self.first_day_of_week),
            AxisKind::Categorical => category_ticks(range),
        }
    }

    /// Minor ticks; see [`minor_ticks`].
    pub fn minor_ticks(&self, major: &[f64], kind: AxisKind, minor_count: usize) -> Vec<f64> {
        minor_ticks(major, kind, minor_count)
    }
}

/// [`TickGenerator::ticks`] with Monday-first weeks.
pub fn get_ticks(range: AxisRange, kind: AxisKind, desired: usize) -> TickSet {
    TickGenerator::default().ticks(range, kind, desired)
}

/// Rounds away accumulated floating-point error below the step's precision.
pub(crate) fn snap_to_step(value: f64, step: f64) -> f64 {
    let decimals = 1.0 - step.log10().floor();
    if !(decimals > 0.0) || decimals > 15.0 {
        return value;
    }
    #[allow(clippy::cast_possible_truncation, reason = "bounded to 1..=15 above")]
    let scale = 10_f64.powi(decimals as i32);
    let snapped = (value * scale).round() / scale;
    if !snapped.is_finite() {
        value
    } else if snapped == 0.0 {
        // Normalizes `-0.0` so labels never read "-0".
        0.0
    } else {
        snapped
    }
}

fn decade(power: f64) -> i32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite positive f64 lies well inside i32"
    )]
    {
        power.clamp(-400.0, 400.0) as i32
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn assert_ticks(ticks: &TickSet, expected: &[f64]) {
        assert_eq!(ticks.len(), expected.len(), "{:?} vs {expected:?}", ticks.major);
        for (got, want) in ticks.values().iter().zip(expected) {
            assert!(
                (got - want).abs() <= 1.0e-9 * want.abs().max(1.0),
                "{:?} vs {expected:?}",
                ticks.major
            );
        }
    }

    #[test]
    fn nice_number_snaps_mantissa() {
        assert_eq!(nice_number(97.0, false), 100.0);
        assert_eq!(nice_number(25.0, true), 20.0);
        assert!((nice_number(0.034, true) - 0.05).abs() < 1e-15);
        assert_eq!(nice_number(1.4, true), 1.0);
        assert_eq!(nice_number(1.4, false), 2.0);
        assert_eq!(nice_number(-3.0, true), 0.0);
        assert_eq!(nice_number(f64::NAN, true), 0.0);
    }

    #[test]
    fn linear_ticks_cover_range_with_nice_step() {
        let ticks = get_ticks(AxisRange::new(0.0, 97.0), AxisKind::Linear, 5);
        assert_ticks(&ticks, &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(ticks.step, 20.0);
    }

    #[test]
    fn linear_ticks_snap_fractional_steps() {
        let ticks = get_ticks(AxisRange::new(0.1, 0.9), AxisKind::Linear, 5);
        assert_eq!(ticks.values(), &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn steps_below_float_precision_yield_no_ticks() {
        assert!(linear_ticks(AxisRange::new(1.0e16, 1.0e16 + 4.0), 5).is_empty());
        let wide = linear_ticks(AxisRange::new(1.0e16, 2.0e16), 5);
        assert!(wide.values().windows(2).all(|w| w[0] < w[1]));
        assert!(!wide.is_empty());
    }

    #[test]
    fn degenerate_linear_range_widens() {
        let ticks = get_ticks(AxisRange::new(5.0, 5.0), AxisKind::Linear, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.values()[0] <= 5.0);
        assert!(*ticks.values().last().unwrap() >= 6.0);
    }

    #[test]
    fn non_finite_ranges_yield_no_ticks() {
        for kind in [AxisKind::Linear, AxisKind::Logarithmic, AxisKind::Categorical] {
            assert!(get_ticks(AxisRange::new(f64::NAN, 1.0), kind, 5).is_empty());
            assert!(get_ticks(AxisRange::new(0.0, f64::INFINITY), kind, 5).is_empty());
        }
    }

    #[test]
    fn log_ticks_add_multipliers_for_short_ranges() {
        let ticks = get_ticks(AxisRange::new(1.0, 1000.0), AxisKind::Logarithmic, 5);
        assert_ticks(
            &ticks,
            &[1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0],
        );
    }

    #[test]
    fn log_ticks_use_pure_decades_for_long_ranges() {
        let ticks = get_ticks(AxisRange::new(0.01, 1.0e6), AxisKind::Logarithmic, 5);
        assert_ticks(
            &ticks,
            &[0.01, 0.1, 1.0, 10.0, 100.0, 1000.0, 1.0e4, 1.0e5, 1.0e6],
        );
    }

    #[test]
    fn log_ticks_reject_non_positive_bounds() {
        assert!(get_ticks(AxisRange::new(-1.0, 100.0), AxisKind::Logarithmic, 5).is_empty());
        assert!(get_ticks(AxisRange::new(0.0, 100.0), AxisKind::Logarithmic, 5).is_empty());
    }

    #[test]
    fn category_ticks_enumerate_indices() {
        let ticks = get_ticks(AxisRange::categories(4, true), AxisKind::Categorical, 2);
        assert_eq!(ticks.values(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn minor_ticks_are_geometric_on_log_axes() {
        let minor = minor_ticks(&[1.0, 100.0], AxisKind::Logarithmic, 1);
        assert_eq!(minor.len(), 1);
        assert!((minor[0] - 10.0).abs() < 1e-9);

        let linear = minor_ticks(&[0.0, 10.0, 20.0], AxisKind::Linear, 4);
        assert_eq!(linear, std::vec![2.0, 4.0, 6.0, 8.0, 12.0, 14.0, 16.0, 18.0]);
    }

    #[test]
    fn minor_ticks_skip_invalid_intervals() {
        let minor = minor_ticks(&[0.0, 10.0, 100.0], AxisKind::Logarithmic, 1);
        assert_eq!(minor.len(), 1);
        assert!((minor[0] - 31.622_776_601_683_793).abs() < 1e-6);
        assert!(minor_ticks(&[1.0, f64::NAN, 3.0], AxisKind::Linear, 1).is_empty());
    }
}
