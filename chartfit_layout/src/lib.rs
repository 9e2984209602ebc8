// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate mapping and label layout for 2D charts.
//!
//! This crate decides *where* numbers and text go on a chart and *how large* labels may be;
//! it does not paint anything. The pieces, leaves first:
//!
//! - **Scales** ([`AxisScale`], [`map_value_to_pixel`]) map values to pixels and back for
//!   linear, logarithmic, date/time and categorical axes.
//! - **Ticks** ([`TickGenerator`], [`get_ticks`], [`minor_ticks`]) pick readable tick
//!   values: nice-number steps, decades, or calendar units.
//! - **Formatting** ([`FormatterChain`], [`axis_labels`], [`DatePatterns`]) turns ticks and
//!   values into label strings.
//! - **Label layout** ([`resolve_label_layout`]) fits a row of labels into the space each
//!   one gets by shrinking, rotating, trimming, or skipping.
//! - **Padding** ([`compute_padding`]) reserves plot margins for axes and titles.
//! - **Placement** ([`LabelPlacer`], [`PieLabeler`]) places data labels and pie callouts
//!   without overlaps.
//!
//! A render usually builds a [`RenderContext`] once and places labels through a
//! [`RenderPass`].
//!
//! Invalid data never panics or errors: non-finite values map to the axis minimum,
//! degenerate ranges are widened, unusable ranges produce no ticks, and labels that do not
//! fit are dropped.
//!
//! ## Features
//!
//! - `std`: use the standard library's float math.
//! - `libm` (default): float math through `libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for configuration and value types.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod config;
mod context;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod label_layout;
mod padding;
mod pie;
mod placement;
mod scale;
mod ticks;
mod time;

pub use chartfit_text::{
    CachedMeasurer, ELLIPSIS, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics,
    TextStyle, trim_to_width,
};
pub use config::LayoutConfig;
pub use context::{ContextError, RenderContext, RenderPass};
pub use format::{FormatterChain, NumberLocale, ValueFormatter, axis_labels, format_number};
pub use label_layout::{
    LabelLayout, LabelLayoutOptions, max_label_size, resolve_label_layout, rotated_size,
};
pub use padding::{
    AxisConfig, AxisPlacement, AxisRole, Padding, PaddingRequest, PlotLayout, Side,
    TitleConfig, compute_padding,
};
pub use pie::{PieCallout, PieLabeler, PlacedCallout};
pub use placement::{
    LabelPlacer, LabelSide, PlacedLabel, PlacedLabels, PlacementOrientation, data_anchor,
    rect_within, rects_overlap,
};
pub use scale::{
    AxisKind, AxisRange, AxisScale, Orientation, from_pixel, map_value_to_pixel, normalize,
    to_pixel,
};
pub use ticks::{
    TickBuf, TickGenerator, TickSet, category_ticks, get_ticks, linear_ticks, log_ticks,
    minor_ticks, nice_number,
};
pub use time::{
    DatePatterns, DateTimeUnit, EPOCH_CE_DAYS, FALLBACK_DATE_PATTERN, date_ticks,
    datetime_to_days, days_to_datetime, format_date,
};
