// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for chart label layout.
//!
//! Chart layout cannot decide where a label goes, or how large it may be,
//! without knowing how much room the label needs. Shaping and glyph rendering
//! stay downstream, so layout code depends on the tiny [`TextMeasurer`]
//! interface defined here.
//!
//! This crate provides:
//! - [`TextMeasurer`], [`TextStyle`] and [`TextMetrics`],
//! - [`HeuristicTextMeasurer`] for tests and early layout,
//! - [`CachedMeasurer`], a per-render memoising wrapper, and
//! - [`trim_to_width`], prefix trimming with an ellipsis marker.

#![no_std]

extern crate alloc;

mod cache;
mod ellipsis;

pub use cache::CachedMeasurer;
pub use ellipsis::{ELLIPSIS, trim_to_width};

/// A minimal text measurement interface used by the layout engine.
///
/// Implementations can be heuristic (fast, but inaccurate) or backed by a
/// real shaping engine owned by the host application.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers split on `\n` themselves.
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (typically pixels).
    pub font_size: f64,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a normal-weight `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Returns a copy of this style with a different font size.
    #[must_use]
    pub fn with_font_size(self, font_size: f64) -> Self {
        Self { font_size, ..self }
    }

    /// Returns a copy of this style with a different weight.
    #[must_use]
    pub fn with_weight(self, font_weight: FontWeight) -> Self {
        Self {
            font_weight,
            ..self
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width of the line.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns `(advance_width, line_height)`.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.advance_width, self.line_height())
    }
}

/// A tiny heuristic text measurer suitable for tests and early layout.
///
/// It assumes an average glyph width of ~0.6em (~0.65em for bold weights)
/// and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        let em = if style.font_weight.0 >= 600 { 0.65 } else { 0.6 };
        let advance_width = em * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}
