// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-render state.
//!
//! A [`RenderContext`] is built once per render, after the axes are known: it validates
//! the chart bounds, reserves the margins, and then stays read-only. Label placement runs
//! through a [`RenderPass`], which owns the placed-label accumulator so that it can never
//! outlive the render it belongs to.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartfit_text::TextMeasurer;
use kurbo::{Point, Rect};

use crate::config::LayoutConfig;
use crate::format::{FormatterChain, axis_labels};
use crate::padding::{Padding, PaddingRequest, PlotLayout, compute_padding};
use crate::pie::{PieCallout, PlacedCallout};
use crate::placement::{PlacedLabel, PlacedLabels, PlacementOrientation, data_anchor};
use crate::scale::{AxisKind, AxisRange, AxisScale, Orientation};
use crate::ticks::TickSet;

/// Why a render context could not be created.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ContextError {
    /// A bound is NaN or infinite.
    #[error("chart bounds must be finite, got {0:?}")]
    NonFiniteBounds(Rect),
    /// The bounds have no area.
    #[error("chart bounds must have a positive size, got {width}x{height}")]
    EmptyBounds {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// The margins leave no room for the plot.
    #[error("no room left for the plot after reserving {0:?}")]
    NoPlotArea(Padding),
}

/// Read-only state shared by everything drawn in one render.
#[derive(Clone, Debug)]
pub struct RenderContext {
    bounds: Rect,
    layout: PlotLayout,
    config: LayoutConfig,
    formatters: FormatterChain,
}

impl RenderContext {
    /// Validates `request.bounds` and reserves the plot margins.
    ///
    /// # Errors
    ///
    /// Fails if the bounds are not finite, have no area, or the reserved margins leave a
    /// plot without area.
    pub fn new(
        measurer: &dyn TextMeasurer,
        request: &PaddingRequest,
        config: LayoutConfig,
    ) -> Result<Self, ContextError> {
        let bounds = request.bounds;
        if !bounds.is_finite() {
            return Err(ContextError::NonFiniteBounds(bounds));
        }
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return Err(ContextError::EmptyBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        let layout = compute_padding(measurer, request);
        if !(layout.plot.width() > 0.0 && layout.plot.height() > 0.0) {
            return Err(ContextError::NoPlotArea(layout.padding));
        }
        let formatters = FormatterChain::new(config.number_locale);
        Ok(Self {
            bounds,
            layout,
            config,
            formatters,
        })
    }

    /// Replaces the value formatters.
    #[must_use]
    pub fn with_formatters(mut self, formatters: FormatterChain) -> Self {
        self.formatters = formatters;
        self
    }

    /// The chart bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The plot rectangle.
    pub fn plot(&self) -> Rect {
        self.layout.plot
    }

    /// The reserved margins.
    pub fn padding(&self) -> Padding {
        self.layout.padding
    }

    /// The full padding result, including per-axis label layouts.
    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    /// The chart's layout settings.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The value formatters.
    pub fn formatters(&self) -> &FormatterChain {
        &self.formatters
    }

    /// A scale spanning the plot rectangle.
    pub fn scale(&self, kind: AxisKind, range: AxisRange, orientation: Orientation) -> AxisScale {
        AxisScale::new(kind, range, self.layout.plot, orientation)
    }

    /// Major ticks for `range` using the configured tick count and week start.
    pub fn ticks(&self, range: AxisRange, kind: AxisKind) -> TickSet {
        self.config
            .tick_generator()
            .ticks(range, kind, self.config.desired_ticks)
    }

    /// Minor ticks between `major` using the configured count.
    pub fn minor_ticks(&self, major: &[f64], kind: AxisKind) -> Vec<f64> {
        self.config
            .tick_generator()
            .minor_ticks(major, kind, self.config.minor_ticks)
    }

    /// Label strings for `ticks`.
    pub fn axis_labels(&self, ticks: &TickSet, kind: AxisKind, categories: &[String]) -> Vec<String> {
        axis_labels(
            ticks,
            kind,
            categories,
            &self.formatters,
            &self.config.date_patterns,
        )
    }

    /// Starts label placement with an empty accumulator.
    pub fn begin_pass(&self) -> RenderPass<'_> {
        RenderPass {
            context: self,
            placed: PlacedLabels::new(),
        }
    }
}

/// Label placement for one render.
#[derive(Debug)]
pub struct RenderPass<'a> {
    context: &'a RenderContext,
    placed: PlacedLabels,
}

impl RenderPass<'_> {
    /// The rectangles placed so far.
    pub fn placed(&self) -> &PlacedLabels {
        &self.placed
    }

    /// Places `text` at a pixel `anchor`; see [`LabelPlacer::try_place`].
    ///
    /// [`LabelPlacer::try_place`]: crate::LabelPlacer::try_place
    pub fn try_place_label(
        &mut self,
        measurer: &dyn TextMeasurer,
        anchor: Point,
        text: &str,
        orientation: PlacementOrientation,
        inverted: bool,
    ) -> Option<PlacedLabel> {
        self.context
            .config
            .label_placer(self.context.layout.plot)
            .try_place(measurer, anchor, text, orientation, inverted, &mut self.placed)
    }

    /// Formats and places the label for one data point of `series`.
    ///
    /// Negative values prefer the mirrored side, so labels sit past the end of a bar that
    /// grows downwards or leftwards.
    pub fn place_value_label(
        &mut self,
        measurer: &dyn TextMeasurer,
        series: usize,
        x_scale: &AxisScale,
        y_scale: &AxisScale,
        x: f64,
        y: f64,
    ) -> Option<PlacedLabel> {
        let orientation = match y_scale.orientation() {
            Orientation::Vertical => PlacementOrientation::Vertical,
            Orientation::Horizontal => PlacementOrientation::Horizontal,
        };
        let anchor = data_anchor(x_scale, y_scale, x, y);
        let text = self.context.formatters.format(Some(series), y, 0.0);
        self.try_place_label(measurer, anchor, &text, orientation, y < 0.0)
    }

    /// Places outside labels for a pie at `center` with `radius`.
    pub fn place_pie_callouts(
        &mut self,
        measurer: &dyn TextMeasurer,
        center: Point,
        radius: f64,
        callouts: &[PieCallout],
    ) -> Vec<PlacedCallout> {
        self.context.config.pie_labeler(center, radius).place(
            measurer,
            callouts,
            self.context.layout.plot,
            &mut self.placed,
        )
    }

    /// Ends the pass, returning everything that was placed.
    pub fn finish(self) -> PlacedLabels {
        self.placed
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::padding::AxisRole;
    use chartfit_text::HeuristicTextMeasurer;

    const M: HeuristicTextMeasurer = HeuristicTextMeasurer;

    fn context() -> RenderContext {
        let config = LayoutConfig::default();
        let request = PaddingRequest::new(Rect::new(0.0, 0.0, 400.0, 300.0))
            .with_base_padding(config.base_padding)
            .with_axis(config.axis(AxisRole::Value, std::vec![String::from("100")]));
        RenderContext::new(&M, &request, config).unwrap()
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        let config = LayoutConfig::default();
        let nan = PaddingRequest::new(Rect::new(0.0, 0.0, f64::NAN, 10.0));
        assert!(matches!(
            RenderContext::new(&M, &nan, config.clone()),
            Err(ContextError::NonFiniteBounds(_))
        ));
        let flat = PaddingRequest::new(Rect::new(0.0, 0.0, 100.0, 0.0));
        assert!(matches!(
            RenderContext::new(&M, &flat, config.clone()),
            Err(ContextError::EmptyBounds { .. })
        ));
        let cramped = PaddingRequest::new(Rect::new(0.0, 0.0, 20.0, 20.0))
            .with_base_padding(Padding::uniform(10.0));
        assert!(matches!(
            RenderContext::new(&M, &cramped, config),
            Err(ContextError::NoPlotArea(_))
        ));
    }

    #[test]
    fn each_pass_starts_empty() {
        let ctx = context();
        let x = ctx.scale(
            AxisKind::Categorical,
            AxisRange::categories(3, true),
            Orientation::Horizontal,
        );
        let y = ctx.scale(AxisKind::Linear, AxisRange::new(0.0, 100.0), Orientation::Vertical);

        let mut pass = ctx.begin_pass();
        assert!(pass.place_value_label(&M, 0, &x, &y, 0.0, 50.0).is_some());
        assert!(pass.place_value_label(&M, 0, &x, &y, 1.0, 60.0).is_some());
        assert_eq!(pass.finish().len(), 2);

        let again = ctx.begin_pass();
        assert!(again.placed().is_empty());
    }

    #[test]
    fn negative_values_prefer_the_mirrored_side() {
        let ctx = context();
        let x = ctx.scale(
            AxisKind::Categorical,
            AxisRange::categories(2, true),
            Orientation::Horizontal,
        );
        let y = ctx.scale(AxisKind::Linear, AxisRange::new(-50.0, 50.0), Orientation::Vertical);
        let mut pass = ctx.begin_pass();
        let label = pass.place_value_label(&M, 0, &x, &y, 0.0, -20.0).unwrap();
        assert_eq!(label.side, crate::placement::LabelSide::Below);
    }

    #[test]
    fn context_helpers_use_the_config() {
        let ctx = context();
        let ticks = ctx.ticks(AxisRange::new(0.0, 97.0), AxisKind::Linear);
        let labels = ctx.axis_labels(&ticks, AxisKind::Linear, &[]);
        assert_eq!(labels.last().map(String::as_str), Some("100"));
        assert!(ctx.minor_ticks(ticks.values(), AxisKind::Linear).is_empty());
        assert!(ctx.plot().width() > 0.0 && ctx.plot().width() < ctx.bounds().width());
    }
}
