// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Prefix trimming with an ellipsis marker.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{TextMeasurer, TextStyle};

/// The marker appended to trimmed labels.
pub const ELLIPSIS: &str = "\u{2026}";

/// Trims `text` so that its measured width is at most `max_width`.
///
/// - If the whole text fits, it is returned unchanged (borrowed).
/// - Otherwise the longest character prefix whose `prefix + ELLIPSIS` fits is
///   chosen by binary search over prefix lengths, trailing whitespace is
///   dropped from the prefix, and the ellipsis is appended.
/// - If not even [`ELLIPSIS`] alone fits, an empty string is returned; a label
///   is never drawn wider than its budget.
pub fn trim_to_width<'a, M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &'a str,
    style: TextStyle,
    max_width: f64,
) -> Cow<'a, str> {
    if measurer.measure(text, style).advance_width <= max_width {
        return Cow::Borrowed(text);
    }
    let ellipsis_width = measurer.measure(ELLIPSIS, style).advance_width;
    if !(ellipsis_width <= max_width) {
        return Cow::Borrowed("");
    }

    // `ends[k]` is the byte length of the first `k` characters.
    let ends: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    if ends.is_empty() {
        return Cow::Borrowed(text);
    }

    let mut buf = String::with_capacity(text.len() + ELLIPSIS.len());
    let (mut lo, mut hi) = (0_usize, ends.len() - 1);
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        buf.clear();
        buf.push_str(&text[..ends[mid]]);
        buf.push_str(ELLIPSIS);
        if measurer.measure(&buf, style).advance_width <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    buf.clear();
    buf.push_str(text[..ends[lo]].trim_end());
    buf.push_str(ELLIPSIS);
    Cow::Owned(buf)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn fitting_text_is_borrowed_unchanged() {
        let m = HeuristicTextMeasurer;
        let out = trim_to_width(&m, "Q1", TextStyle::new(10.0), 100.0);
        assert!(matches!(out, Cow::Borrowed("Q1")));
    }

    #[test]
    fn long_text_is_cut_to_budget_with_marker() {
        let m = HeuristicTextMeasurer;
        let style = TextStyle::new(10.0);
        // 6px per char: 40px fits five chars plus the marker (36px).
        let out = trim_to_width(&m, "Northern Territory", style, 40.0);
        assert!(out.ends_with(ELLIPSIS));
        assert!(m.measure(&out, style).advance_width <= 40.0);
        assert_eq!(out, "North\u{2026}");
    }

    #[test]
    fn trailing_space_is_not_kept_before_marker() {
        let m = HeuristicTextMeasurer;
        let out = trim_to_width(&m, "ab cdef", TextStyle::new(10.0), 24.0);
        assert_eq!(out, "ab\u{2026}");
    }

    #[test]
    fn budget_smaller_than_marker_yields_empty() {
        let m = HeuristicTextMeasurer;
        let out = trim_to_width(&m, "Revenue", TextStyle::new(10.0), 3.0);
        assert_eq!(out, "");
    }

    #[test]
    fn multibyte_prefixes_stay_on_char_boundaries() {
        let m = HeuristicTextMeasurer;
        let out = trim_to_width(&m, "Zürich–Genève", TextStyle::new(10.0), 30.0);
        assert!(out.ends_with(ELLIPSIS));
        assert!(m.measure(&out, TextStyle::new(10.0)).advance_width <= 30.0);
    }
}
