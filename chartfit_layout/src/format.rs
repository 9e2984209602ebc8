// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick and data label formatting.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;

use crate::scale::AxisKind;
use crate::ticks::TickSet;
use crate::time::{DatePatterns, format_date};

/// Beyond these magnitudes numbers print in exponent form.
const EXPONENT_ABOVE: f64 = 1.0e15;
const EXPONENT_BELOW: f64 = 1.0e-5;

/// Most decimals ever printed in fixed notation.
const MAX_DECIMALS: usize = 10;

/// A value formatter: `(value, step) -> label`.
///
/// `step` is the tick step for axis labels (`0` when unknown or uneven).
pub type ValueFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// Separators used by the default numeric format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberLocale {
    /// Separates the integer and fractional parts.
    pub decimal_separator: char,
    /// Separates groups of three integer digits, if any.
    pub group_separator: Option<char>,
}

impl NumberLocale {
    /// `.` decimals, no grouping.
    pub const INVARIANT: Self = Self {
        decimal_separator: '.',
        group_separator: None,
    };

    /// Creates a locale from its separators.
    pub const fn new(decimal_separator: char, group_separator: Option<char>) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::INVARIANT
    }
}

/// Formats `value` in the general numeric format.
///
/// With a positive `step`, prints exactly as many decimals as the step needs, so every
/// label on an axis shares the same precision. Without one, prints the shortest decimals
/// that represent `value` (up to a fixed cap). Very large and very small magnitudes use
/// exponent form.
pub fn format_number(value: f64, step: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return alloc::format!("{value}");
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || (magnitude > 0.0 && magnitude < EXPONENT_BELOW) {
        let text = alloc::format!("{value:e}");
        return localize(&text, locale);
    }

    let decimals = if step.is_finite() && step > 0.0 {
        decimals_for(step)
    } else {
        decimals_for(value)
    };
    let text = alloc::format!("{value:.decimals$}");
    // Values that round to zero at this precision print without a sign.
    let text = match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => String::from(rest),
        _ => text,
    };
    localize(&text, locale)
}

/// Smallest number of decimals that represents `v` (within a relative tolerance).
fn decimals_for(v: f64) -> usize {
    let v = v.abs();
    let mut scaled = v;
    for decimals in 0..MAX_DECIMALS {
        if (scaled - scaled.round()).abs() <= 1.0e-9 * scaled.max(1.0) {
            return decimals;
        }
        scaled *= 10.0;
    }
    MAX_DECIMALS
}

/// Applies `locale` to Rust's `.`-separated output.
fn localize(text: &str, locale: NumberLocale) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let split = unsigned
        .find(|c: char| c == '.' || c == 'e')
        .unwrap_or(unsigned.len());
    let (int_part, rest) = unsigned.split_at(split);

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    match locale.group_separator {
        Some(group) => {
            for (i, c) in int_part.chars().enumerate() {
                if i > 0 && (int_part.len() - i) % 3 == 0 {
                    out.push(group);
                }
                out.push(c);
            }
        }
        None => out.push_str(int_part),
    }
    for c in rest.chars() {
        out.push(if c == '.' { locale.decimal_separator } else { c });
    }
    out
}

/// Value formatters layered per series, per chart, and a locale-aware default.
///
/// Lookups are first-match-wins: a formatter registered for the series, then the chart
/// formatter, then [`format_number`] with the chain's [`NumberLocale`].
#[derive(Clone, Default)]
pub struct FormatterChain {
    series: HashMap<usize, ValueFormatter>,
    chart: Option<ValueFormatter>,
    locale: NumberLocale,
}

impl core::fmt::Debug for FormatterChain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FormatterChain")
            .field("series", &self.series.len())
            .field("chart", &self.chart.is_some())
            .field("locale", &self.locale)
            .finish()
    }
}

impl FormatterChain {
    /// A chain with only the default formatter.
    pub fn new(locale: NumberLocale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// The locale used by the default formatter.
    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// Sets the chart-wide formatter.
    #[must_use]
    pub fn with_chart_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.chart = Some(Arc::new(f));
        self
    }

    /// Sets the formatter for one series, overriding the chart formatter for it.
    #[must_use]
    pub fn with_series_formatter(
        mut self,
        series: usize,
        f: impl Fn(f64, f64) -> String + 'static,
    ) -> Self {
        self.series.insert(series, Arc::new(f));
        self
    }

    /// Returns `true` if a chart-wide formatter is set.
    pub fn has_chart_formatter(&self) -> bool {
        self.chart.is_some()
    }

    /// Formats `value` for `series` (or for the chart when `None`).
    pub fn format(&self, series: Option<usize>, value: f64, step: f64) -> String {
        if let Some(f) = series.and_then(|s| self.series.get(&s)) {
            return f(value, step);
        }
        if let Some(f) = &self.chart {
            return f(value, step);
        }
        format_number(value, step, self.locale)
    }

    /// Resolves the chain for one series into a single formatter.
    ///
    /// Painters that label many points call this once instead of repeating the lookup.
    pub fn resolve(&self, series: Option<usize>) -> ValueFormatter {
        if let Some(f) = series.and_then(|s| self.series.get(&s)) {
            return f.clone();
        }
        if let Some(f) = &self.chart {
            return f.clone();
        }
        let locale = self.locale;
        Arc::new(move |value, step| format_number(value, step, locale))
    }
}

/// Builds the label strings for an axis's ticks.
///
/// - categorical axes use `categories[index]`, falling back to the number for indices
///   without a name;
/// - date/time axes use the pattern for the tick set's unit, unless a chart formatter is
///   set or the ticks fell back to linear stepping;
/// - everything else goes through the chart-level `formatters`.
pub fn axis_labels(
    ticks: &TickSet,
    kind: AxisKind,
    categories: &[String],
    formatters: &FormatterChain,
    dates: &DatePatterns,
) -> Vec<String> {
    ticks
        .values()
        .iter()
        .map(|&v| match kind {
            AxisKind::Categorical => category_index(v)
                .and_then(|i| categories.get(i))
                .cloned()
                .unwrap_or_else(|| formatters.format(None, v, ticks.step)),
            AxisKind::DateTime => match ticks.date_unit {
                Some(unit) if !formatters.has_chart_formatter() => {
                    format_date(v, dates.pattern(unit))
                }
                _ => formatters.format(None, v, ticks.step),
            },
            AxisKind::Linear | AxisKind::Logarithmic => formatters.format(None, v, ticks.step),
        })
        .collect()
}

fn category_index(v: f64) -> Option<usize> {
    let rounded = v.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > usize::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
    Some(rounded as usize)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::AxisRange;
    use crate::ticks::get_ticks;
    use crate::time::DateTimeUnit;
    use chrono::Weekday;

    #[test]
    fn step_decides_decimals() {
        let l = NumberLocale::INVARIANT;
        assert_eq!(format_number(20.0, 20.0, l), "20");
        assert_eq!(format_number(0.4, 0.2, l), "0.4");
        assert_eq!(format_number(0.5, 0.25, l), "0.50");
        assert_eq!(format_number(-0.0001, 0.5, l), "0.0");
        assert_eq!(format_number(3.25, 0.0, l), "3.25");
    }

    #[test]
    fn extremes_use_exponent_form() {
        let l = NumberLocale::INVARIANT;
        assert_eq!(format_number(1.0e20, 1.0e19, l), "1e20");
        assert_eq!(format_number(2.5e-7, 0.0, l), "2.5e-7");
        assert_eq!(format_number(f64::NAN, 1.0, l), "NaN");
    }

    #[test]
    fn locale_separators_apply() {
        let de = NumberLocale::new(',', Some('.'));
        assert_eq!(format_number(1_234_567.5, 0.5, de), "1.234.567,5");
        assert_eq!(format_number(-1200.0, 100.0, de), "-1.200");
        assert_eq!(format_number(999.0, 1.0, de), "999");
    }

    #[test]
    fn chain_is_first_match_wins() {
        let chain = FormatterChain::new(NumberLocale::INVARIANT)
            .with_chart_formatter(|v, _| alloc::format!("${v}"))
            .with_series_formatter(1, |v, _| alloc::format!("{v}%"));
        assert_eq!(chain.format(Some(1), 5.0, 0.0), "5%");
        assert_eq!(chain.format(Some(0), 5.0, 0.0), "$5");
        assert_eq!(chain.format(None, 5.0, 0.0), "$5");
        assert_eq!(chain.resolve(Some(1))(7.0, 0.0), "7%");

        let plain = FormatterChain::default();
        assert_eq!(plain.format(Some(3), 2.5, 0.5), "2.5");
        assert_eq!(plain.resolve(None)(2.0, 0.5), "2.0");
    }

    #[test]
    fn axis_labels_follow_axis_kind() {
        let chain = FormatterChain::default();
        let dates = DatePatterns::default();

        let linear = get_ticks(AxisRange::new(0.0, 97.0), AxisKind::Linear, 5);
        let labels = axis_labels(&linear, AxisKind::Linear, &[], &chain, &dates);
        assert_eq!(labels, ["0", "20", "40", "60", "80", "100"]);

        let names = [String::from("North"), String::from("South")];
        let cats = get_ticks(AxisRange::categories(3, true), AxisKind::Categorical, 3);
        let labels = axis_labels(&cats, AxisKind::Categorical, &names, &chain, &dates);
        assert_eq!(labels, ["North", "South", "2"]);

        let generator = crate::ticks::TickGenerator::new().with_first_day_of_week(Weekday::Mon);
        let months = generator.ticks(
            AxisRange::new(45_292.0, 45_657.0),
            AxisKind::DateTime,
            5,
        );
        assert_eq!(months.date_unit, Some(DateTimeUnit::Month));
        let labels = axis_labels(&months, AxisKind::DateTime, &[], &chain, &dates);
        assert_eq!(labels, ["Jan 2024", "Apr 2024", "Jul 2024", "Oct 2024"]);
    }
}
