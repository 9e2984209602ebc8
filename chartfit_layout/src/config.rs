// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart-wide layout settings.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartfit_text::{FontWeight, TextStyle};
use chrono::Weekday;
use kurbo::{Point, Rect};

use crate::format::NumberLocale;
use crate::label_layout::LabelLayoutOptions;
use crate::padding::{AxisConfig, AxisRole, Padding, TitleConfig};
use crate::pie::PieLabeler;
use crate::placement::LabelPlacer;
use crate::ticks::TickGenerator;
use crate::time::DatePatterns;

/// Styling and behaviour shared by every axis and label in a chart.
///
/// The defaults suit a small dashboard chart; adjust with the `with_*` methods or, with the
/// `serde` feature, load from a style file. Missing fields take their default value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Base font size for axis labels.
    pub label_font_size: f64,
    /// Font size for axis titles.
    pub title_font_size: f64,
    /// Font size for the chart title.
    pub chart_title_font_size: f64,
    /// Tick mark length.
    pub tick_length: f64,
    /// Gap between tick marks and labels.
    pub label_gap: f64,
    /// Spacing kept between neighbouring axis labels.
    pub label_margin: f64,
    /// Smallest font size labels may shrink to.
    pub min_font_size: f64,
    /// Smallest font size labels may shrink to, relative to the base size.
    pub shrink_ratio: f64,
    /// Whether crowded axis labels may rotate.
    pub allow_rotation: bool,
    /// Whether crowded axis labels may be trimmed with an ellipsis.
    pub allow_ellipsis: bool,
    /// Ticks to aim for on continuous axes.
    pub desired_ticks: usize,
    /// Minor ticks between neighbouring major ticks.
    pub minor_ticks: usize,
    /// Margins kept free of everything.
    pub base_padding: Padding,
    /// Gap between axis labels and axis titles, relative to the label font size.
    pub title_gap_ratio: f64,
    /// Font size for data labels.
    pub data_label_font_size: f64,
    /// Font weight for data labels.
    pub data_label_font_weight: FontWeight,
    /// Distance from a data point to its label.
    pub data_label_offset: f64,
    /// Padding around data label text.
    pub data_label_padding: f64,
    /// Radial length of pie leader lines before the elbow.
    pub pie_elbow_length: f64,
    /// Horizontal length of pie leader lines after the elbow.
    pub pie_horizontal_length: f64,
    /// Minimum vertical gap between pie callouts.
    pub pie_min_spacing: f64,
    /// First day of the week for weekly date ticks.
    pub first_day_of_week: Weekday,
    /// Date patterns per tick unit.
    pub date_patterns: DatePatterns,
    /// Separators for numeric labels.
    pub number_locale: NumberLocale,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_font_size: 10.0,
            title_font_size: 11.0,
            chart_title_font_size: 14.0,
            tick_length: 5.0,
            label_gap: 3.0,
            label_margin: 4.0,
            min_font_size: 8.0,
            shrink_ratio: 0.7,
            allow_rotation: true,
            allow_ellipsis: true,
            desired_ticks: 5,
            minor_ticks: 0,
            base_padding: Padding::uniform(8.0),
            title_gap_ratio: 0.5,
            data_label_font_size: 10.0,
            data_label_font_weight: FontWeight::NORMAL,
            data_label_offset: 4.0,
            data_label_padding: 2.0,
            pie_elbow_length: 10.0,
            pie_horizontal_length: 12.0,
            pie_min_spacing: 2.0,
            first_day_of_week: Weekday::Mon,
            date_patterns: DatePatterns::default(),
            number_locale: NumberLocale::default(),
        }
    }
}

impl LayoutConfig {
    /// Sets the axis label font size.
    #[must_use]
    pub fn with_label_font_size(mut self, font_size: f64) -> Self {
        self.label_font_size = font_size;
        self
    }

    /// Sets the axis title font size.
    #[must_use]
    pub fn with_title_font_size(mut self, font_size: f64) -> Self {
        self.title_font_size = font_size;
        self
    }

    /// Sets the base padding.
    #[must_use]
    pub fn with_base_padding(mut self, padding: Padding) -> Self {
        self.base_padding = padding;
        self
    }

    /// Sets the desired tick count.
    #[must_use]
    pub fn with_desired_ticks(mut self, desired: usize) -> Self {
        self.desired_ticks = desired;
        self
    }

    /// Sets the number of minor ticks per interval.
    #[must_use]
    pub fn with_minor_ticks(mut self, minor: usize) -> Self {
        self.minor_ticks = minor;
        self
    }

    /// Allows or forbids label rotation.
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

    /// Sets the first day of the week.
    #[must_use]
    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// Sets the date patterns.
    #[must_use]
    pub fn with_date_patterns(mut self, patterns: DatePatterns) -> Self {
        self.date_patterns = patterns;
        self
    }

    /// Sets the number locale.
    #[must_use]
    pub fn with_number_locale(mut self, locale: NumberLocale) -> Self {
        self.number_locale = locale;
        self
    }

    /// Sets the data label font size and weight.
    #[must_use]
    pub fn with_data_label_font(mut self, font_size: f64, font_weight: FontWeight) -> Self {
        self.data_label_font_size = font_size;
        self.data_label_font_weight = font_weight;
        self
    }

    /// Sets the data label offset and padding.
    #[must_use]
    pub fn with_data_label_spacing(mut self, offset: f64, padding: f64) -> Self {
        self.data_label_offset = offset;
        self.data_label_padding = padding;
        self
    }

    /// Label layout options for axis labels.
    pub fn label_layout_options(&self) -> LabelLayoutOptions {
        LabelLayoutOptions::default()
            .with_margin(self.label_margin)
            .with_shrink_floor(self.min_font_size, self.shrink_ratio)
            .with_rotation(self.allow_rotation)
            .with_ellipsis(self.allow_ellipsis)
    }

    /// The tick generator for this chart.
    pub fn tick_generator(&self) -> TickGenerator {
        TickGenerator::new().with_first_day_of_week(self.first_day_of_week)
    }

    /// An axis with this chart's styling.
    pub fn axis(&self, role: AxisRole, labels: Vec<String>) -> AxisConfig {
        AxisConfig::new(role, labels)
            .with_label_font_size(self.label_font_size)
            .with_tick_length(self.tick_length)
            .with_label_gap(self.label_gap)
            .with_layout(self.label_layout_options())
    }

    /// An axis title with this chart's styling.
    pub fn axis_title(&self, text: impl Into<String>) -> TitleConfig {
        TitleConfig::new(text).with_font_size(self.title_font_size)
    }

    /// A chart title with this chart's styling.
    pub fn chart_title(&self, text: impl Into<String>) -> TitleConfig {
        TitleConfig::new(text).with_font_size(self.chart_title_font_size)
    }

    /// Data label style.
    pub fn data_label_style(&self) -> TextStyle {
        TextStyle::new(self.data_label_font_size).with_weight(self.data_label_font_weight)
    }

    /// A data label placer for `plot`.
    pub fn label_placer(&self, plot: Rect) -> LabelPlacer {
        LabelPlacer::new(plot)
            .with_offset(self.data_label_offset)
            .with_padding(self.data_label_padding)
            .with_style(self.data_label_style())
    }

    /// An outside-label placer for a pie.
    pub fn pie_labeler(&self, center: Point, radius: f64) -> PieLabeler {
        PieLabeler::new(center, radius)
            .with_elbow_length(self.pie_elbow_length)
            .with_horizontal_length(self.pie_horizontal_length)
            .with_min_spacing(self.pie_min_spacing)
            .with_padding(self.data_label_padding)
            .with_style(self.data_label_style())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn derived_helpers_carry_the_settings() {
        let config = LayoutConfig::default()
            .with_label_font_size(9.0)
            .with_rotation(false)
            .with_first_day_of_week(Weekday::Sun);

        let axis = config.axis(AxisRole::Value, std::vec![String::from("1")]);
        assert_eq!(axis.label_font_size, 9.0);
        assert!(!axis.layout.allow_rotation);
        assert!(!axis.between_ticks);
        assert_eq!(config.tick_generator().first_day_of_week, Weekday::Sun);
        assert_eq!(config.label_layout_options().margin, config.label_margin);
    }

    #[test]
    fn data_label_font_reaches_the_placers() {
        let config = LayoutConfig::default();
        assert_eq!(config.data_label_style().font_weight, FontWeight::NORMAL);

        let config = config.with_data_label_font(12.0, FontWeight::BOLD);
        let style = config.data_label_style();
        assert_eq!(style.font_size, 12.0);
        assert_eq!(style.font_weight, FontWeight::BOLD);
        assert_eq!(
            config.label_placer(Rect::new(0.0, 0.0, 100.0, 100.0)),
            LabelPlacer::new(Rect::new(0.0, 0.0, 100.0, 100.0))
                .with_offset(config.data_label_offset)
                .with_padding(config.data_label_padding)
                .with_style(style)
        );
    }
}
