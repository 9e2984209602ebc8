// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aware date/time ticks and date formatting.
//!
//! Date/time axes carry a numeric **serial day count**: whole days since 1899-12-30, with
//! the time of day as the fractional part (so `45292.5` is noon on 2024-01-01). Mapping to
//! pixels treats that count linearly; only tick generation and formatting look at the
//! calendar.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write as _;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Weekday};

use crate::scale::{AxisKind, AxisRange};
use crate::ticks::{MAX_TICKS, TickBuf, TickSet, linear_ticks, nice_number};

/// Days from 0001-01-01 (day 1 in the proleptic Gregorian calendar) to the serial epoch.
pub const EPOCH_CE_DAYS: i32 = 693_594;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Serial day counts beyond this magnitude are not treated as calendar time.
const MAX_SERIAL_DAYS: f64 = 1.0e8;

/// The calendar unit a date/time axis steps by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateTimeUnit {
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days.
    Day,
    /// Weeks.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl DateTimeUnit {
    /// All units, finest first.
    pub const ALL: [Self; 7] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    /// Picks the unit for a target tick spacing in days.
    ///
    /// Thresholds: up to a minute is seconds, up to an hour minutes, up to a day hours,
    /// up to a week days, up to a month weeks, up to a year months, years beyond.
    pub fn for_target_days(target_days: f64) -> Self {
        if target_days <= 1.0 / 1440.0 {
            Self::Second
        } else if target_days <= 1.0 / 24.0 {
            Self::Minute
        } else if target_days <= 1.0 {
            Self::Hour
        } else if target_days <= 7.0 {
            Self::Day
        } else if target_days <= 31.0 {
            Self::Week
        } else if target_days <= 365.0 {
            Self::Month
        } else {
            Self::Year
        }
    }

    /// Length of one unit in days (average lengths for months and years).
    pub fn days(self) -> f64 {
        match self {
            Self::Second => 1.0 / 86_400.0,
            Self::Minute => 1.0 / 1440.0,
            Self::Hour => 1.0 / 24.0,
            Self::Day => 1.0,
            Self::Week => 7.0,
            Self::Month => 30.436_875,
            Self::Year => 365.242_5,
        }
    }

    /// Picks a readable step, counted in this unit, for a target spacing in this unit.
    ///
    /// The smallest curated candidate not below the target wins; the largest candidate is
    /// used when the target exceeds them all. Years step by nice numbers instead.
    pub fn nice_step(self, target_units: f64) -> f64 {
        if self == Self::Year {
            return nice_number(target_units, true).max(1.0);
        }
        let candidates = self.step_candidates();
        candidates
            .iter()
            .copied()
            .find(|&c| c >= target_units)
            .unwrap_or(candidates[candidates.len() - 1])
    }

    /// The next finer `(unit, step)` to try after `step` of this unit produced too few
    /// ticks: a smaller step in the same unit, else the coarsest step of the next finer
    /// unit. `None` below one second.
    pub fn finer_step(self, step: f64) -> Option<(Self, f64)> {
        let smaller = if self == Self::Year {
            (step > 1.0).then(|| (step / 2.0).floor().max(1.0))
        } else {
            self.step_candidates().iter().rev().copied().find(|&c| c < step)
        };
        if let Some(smaller) = smaller {
            return Some((self, smaller));
        }
        let finer = match self {
            Self::Second => return None,
            Self::Minute => Self::Second,
            Self::Hour => Self::Minute,
            Self::Day => Self::Hour,
            Self::Week => Self::Day,
            Self::Month => Self::Week,
            Self::Year => Self::Month,
        };
        let candidates = finer.step_candidates();
        Some((finer, candidates[candidates.len() - 1]))
    }

    fn step_candidates(self) -> &'static [f64] {
        match self {
            Self::Second | Self::Minute => &[1.0, 2.0, 5.0, 10.0, 15.0, 30.0],
            Self::Hour => &[1.0, 2.0, 3.0, 4.0, 6.0, 12.0],
            Self::Day => &[1.0, 2.0, 3.0, 5.0, 7.0],
            Self::Week => &[1.0, 2.0, 3.0, 4.0],
            Self::Month | Self::Year => &[1.0, 2.0, 3.0, 4.0, 6.0],
        }
    }

    fn millis(self) -> Option<f64> {
        match self {
            Self::Second => Some(1_000.0),
            Self::Minute => Some(60_000.0),
            Self::Hour => Some(3_600_000.0),
            Self::Day => Some(MS_PER_DAY),
            Self::Week | Self::Month | Self::Year => None,
        }
    }
}

/// Converts a serial day count to a calendar date-time (millisecond precision).
///
/// Returns `None` for non-finite values and values too far from the epoch to be dates.
pub fn days_to_datetime(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() || days.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let whole = days.floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "|days| <= 1e8 fits in i32 and i64"
    )]
    let (day, ms) = (whole as i32, ((days - whole) * MS_PER_DAY).round() as i64);
    let date = NaiveDate::from_num_days_from_ce_opt(day.checked_add(EPOCH_CE_DAYS)?)?;
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_milliseconds(ms)?)
}

/// Converts a calendar date-time to a serial day count.
pub fn datetime_to_days(datetime: NaiveDateTime) -> f64 {
    let day = f64::from(datetime.date().num_days_from_ce() - EPOCH_CE_DAYS);
    let seconds = f64::from(datetime.time().num_seconds_from_midnight())
        + f64::from(datetime.time().nanosecond()) * 1.0e-9;
    day + seconds / 86_400.0
}

fn serial(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - i64::from(EPOCH_CE_DAYS)
}

/// Calendar-aligned ticks for a date/time axis.
///
/// Sub-day and day units step from the epoch in whole multiples of the step; weeks start
/// on `first_day_of_week`; months and years start on the first of a month/year whose
/// index is a multiple of the step. Only ticks inside the range are emitted. When that
/// leaves fewer than two ticks, smaller steps and then finer units are tried.
///
/// Ranges that cannot be read as calendar time fall back to [`linear_ticks`].
pub fn date_ticks(range: AxisRange, desired: usize, first_day_of_week: Weekday) -> TickSet {
    let range = range.normalized(AxisKind::DateTime);
    if !range.is_finite() {
        tracing::debug!(
            min = range.min,
            max = range.max,
            "date range is not finite; no ticks"
        );
        return TickSet::empty();
    }
    let (Some(start), Some(_)) = (days_to_datetime(range.min), days_to_datetime(range.max))
    else {
        tracing::debug!(
            min = range.min,
            max = range.max,
            "range is not calendar time; using linear ticks"
        );
        return linear_ticks(range, desired);
    };

    let target_days = range.span() / (desired.max(2) - 1) as f64;
    let mut unit = DateTimeUnit::for_target_days(target_days);
    let mut step = unit.nice_step(target_days / unit.days());
    tracing::debug!(?unit, step, target_days, "date tick unit");

    loop {
        match calendar_ticks(range, start, unit, step, first_day_of_week) {
            Some(major) if major.len() >= 2 => {
                return TickSet {
                    major,
                    step: step * unit.days(),
                    date_unit: Some(unit),
                };
            }
            // Too many ticks at this step; anything finer only adds more.
            None if unit.millis().is_some() => break,
            _ => {}
        }
        let Some((finer, finer_step)) = unit.finer_step(step) else {
            break;
        };
        tracing::trace!(
            ?unit,
            step,
            ?finer,
            finer_step,
            "too few date ticks; stepping finer"
        );
        (unit, step) = (finer, finer_step);
    }
    tracing::debug!(?unit, "calendar stepping failed; using linear ticks");
    linear_ticks(range, desired)
}

fn calendar_ticks(
    range: AxisRange,
    start: NaiveDateTime,
    unit: DateTimeUnit,
    step: f64,
    first_day_of_week: Weekday,
) -> Option<TickBuf> {
    match unit {
        DateTimeUnit::Week => week_ticks(range, step, first_day_of_week),
        DateTimeUnit::Month => month_ticks(range, start, step),
        DateTimeUnit::Year => year_ticks(range, start, step),
        DateTimeUnit::Second | DateTimeUnit::Minute | DateTimeUnit::Hour | DateTimeUnit::Day => {
            unit.millis().and_then(|ms| fixed_ticks(range, step * ms))
        }
    }
}

/// Evenly spaced ticks at whole multiples of `step_ms` since the epoch.
///
/// `None` when the step is unusable or the range would need more than [`MAX_TICKS`].
fn fixed_ticks(range: AxisRange, step_ms: f64) -> Option<TickBuf> {
    if !(step_ms >= 1.0) {
        return None;
    }
    // Milliseconds within +/-1e8 days stay exact in f64.
    let first = (range.min * MS_PER_DAY / step_ms - 1.0e-9).ceil();
    let last = (range.max * MS_PER_DAY / step_ms + 1.0e-9).floor();
    if last < first {
        return Some(TickBuf::new());
    }
    if last - first >= MAX_TICKS as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "bounded by MAX_TICKS above")]
    let count = (last - first) as usize;
    Some(
        (0..=count)
            .map(|i| (first + i as f64) * step_ms / MS_PER_DAY)
            .collect(),
    )
}

fn week_ticks(range: AxisRange, step: f64, first_day_of_week: Weekday) -> Option<TickBuf> {
    #[allow(clippy::cast_possible_truncation, reason = "week steps are 1..=4")]
    let period = (step.round() as i64).max(1) * 7;
    // Serial day 0 is a Saturday.
    let offset = (i64::from(first_day_of_week.num_days_from_monday())
        - i64::from(Weekday::Sat.num_days_from_monday()))
    .rem_euclid(7);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range is within +/-1e8 days"
    )]
    let (lo, hi) = (range.min.ceil() as i64, range.max.floor() as i64);
    let mut day = lo + (offset - lo).rem_euclid(period);
    let mut out = TickBuf::new();
    while day <= hi && out.len() < MAX_TICKS {
        out.push(day as f64);
        day += period;
    }
    Some(out)
}

fn month_ticks(range: AxisRange, start: NaiveDateTime, step: f64) -> Option<TickBuf> {
    #[allow(clippy::cast_possible_truncation, reason = "month steps are 1..=6")]
    let step = (step.round() as i32).max(1);
    let mut index = start.year().checked_mul(12)? + i32::try_from(start.month0()).ok()?;
    if month_start(index)? < range.min {
        index += 1;
    }
    index += (step - index.rem_euclid(step)) % step;

    let mut out = TickBuf::new();
    loop {
        let day = month_start(index)?;
        if day > range.max || out.len() >= MAX_TICKS {
            break;
        }
        out.push(day);
        index = index.checked_add(step)?;
    }
    Some(out)
}

fn month_start(index: i32) -> Option<f64> {
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    let date = NaiveDate::from_ymd_opt(index.div_euclid(12), month, 1)?;
    Some(serial(date) as f64)
}

fn year_ticks(range: AxisRange, start: NaiveDateTime, step: f64) -> Option<TickBuf> {
    if !(step >= 1.0) || step > 1.0e6 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "bounded to 1..=1e6 above")]
    let step = step as i32;
    let mut year = start.year();
    if year_start(year)? < range.min {
        year += 1;
    }
    year += (step - year.rem_euclid(step)) % step;

    let mut out = TickBuf::new();
    loop {
        let day = year_start(year)?;
        if day > range.max || out.len() >= MAX_TICKS {
            break;
        }
        out.push(day);
        year = year.checked_add(step)?;
    }
    Some(out)
}

fn year_start(year: i32) -> Option<f64> {
    Some(serial(NaiveDate::from_ymd_opt(year, 1, 1)?) as f64)
}

/// Pattern used when a configured date pattern cannot be rendered.
pub const FALLBACK_DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// `strftime`-style patterns for date tick labels, one per [`DateTimeUnit`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatePatterns {
    /// Pattern for second ticks.
    pub second: String,
    /// Pattern for minute ticks.
    pub minute: String,
    /// Pattern for hour ticks.
    pub hour: String,
    /// Pattern for day ticks.
    pub day: String,
    /// Pattern for week ticks.
    pub week: String,
    /// Pattern for month ticks.
    pub month: String,
    /// Pattern for year ticks.
    pub year: String,
}

impl Default for DatePatterns {
    fn default() -> Self {
        Self {
            second: "%H:%M:%S".into(),
            minute: "%H:%M".into(),
            hour: "%H:%M".into(),
            day: "%b %d".into(),
            week: "%b %d".into(),
            month: "%b %Y".into(),
            year: "%Y".into(),
        }
    }
}

impl DatePatterns {
    /// The pattern for `unit`.
    pub fn pattern(&self, unit: DateTimeUnit) -> &str {
        match unit {
            DateTimeUnit::Second => &self.second,
            DateTimeUnit::Minute => &self.minute,
            DateTimeUnit::Hour => &self.hour,
            DateTimeUnit::Day => &self.day,
            DateTimeUnit::Week => &self.week,
            DateTimeUnit::Month => &self.month,
            DateTimeUnit::Year => &self.year,
        }
    }

    /// Replaces the pattern for `unit`.
    #[must_use]
    pub fn with_pattern(mut self, unit: DateTimeUnit, pattern: impl Into<String>) -> Self {
        let slot = match unit {
            DateTimeUnit::Second => &mut self.second,
            DateTimeUnit::Minute => &mut self.minute,
            DateTimeUnit::Hour => &mut self.hour,
            DateTimeUnit::Day => &mut self.day,
            DateTimeUnit::Week => &mut self.week,
            DateTimeUnit::Month => &mut self.month,
            DateTimeUnit::Year => &mut self.year,
        };
        *slot = pattern.into();
        self
    }
}

/// Formats a serial day count with a `strftime`-style pattern.
///
/// Invalid patterns fall back to [`FALLBACK_DATE_PATTERN`]; values that are not calendar
/// time are printed as plain numbers.
pub fn format_date(days: f64, pattern: &str) -> String {
    let Some(datetime) = days_to_datetime(days) else {
        return alloc::format!("{days}");
    };
    let mut out = String::new();
    if write!(out, "{}", datetime.format(pattern)).is_err() {
        tracing::debug!(pattern, "invalid date pattern; using fallback");
        out.clear();
        let _ = write!(out, "{}", datetime.format(FALLBACK_DATE_PATTERN));
    }
    out
}
