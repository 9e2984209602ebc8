// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for tick generation, scales, trimming and placement.

use chartfit_layout::{
    AxisKind, AxisRange, DateTimeUnit, ELLIPSIS, HeuristicTextMeasurer, LabelPlacer,
    PlacedLabels, PlacementOrientation, TextMeasurer, TextStyle, linear_ticks, log_ticks,
    get_ticks, normalize, rect_within, rects_overlap, trim_to_width,
};
use kurbo::{Point, Rect};
use proptest::prelude::*;

const M: HeuristicTextMeasurer = HeuristicTextMeasurer;

proptest! {
    #[test]
    fn linear_ticks_are_even_and_enclose_the_range(
        min in -1.0e6_f64..1.0e6,
        span in 1.0e-3_f64..1.0e6,
        desired in 2_usize..12,
    ) {
        let max = min + span;
        let ticks = linear_ticks(AxisRange::new(min, max), desired);
        let values = ticks.values();
        prop_assert!(values.len() >= 2);
        let step = ticks.step;
        let magnitude = min.abs().max(max.abs()).max(1.0);
        let slack = step * 1e-6 + magnitude * 1e-12;
        prop_assert!(values[0] <= min + slack);
        prop_assert!(values[values.len() - 1] >= max - slack);
        for pair in values.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert!(((pair[1] - pair[0]) - step).abs() <= slack);
        }
    }

    #[test]
    fn log_ticks_are_positive_and_sorted(
        low_exp in -6.0_f64..6.0,
        decades in 0.1_f64..8.0,
        desired in 2_usize..10,
    ) {
        let min = 10_f64.powf(low_exp);
        let max = 10_f64.powf(low_exp + decades);
        let ticks = log_ticks(AxisRange::new(min, max), desired);
        prop_assert!(ticks.values().iter().all(|v| *v > 0.0));
        prop_assert!(ticks.values().windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn degenerate_ranges_are_widened(value in -1.0e9_f64..1.0e9) {
        let linear = AxisRange::new(value, value).normalized(AxisKind::Linear);
        prop_assert!(linear.max > linear.min);
        let log = AxisRange::new(value, value).normalized(AxisKind::Logarithmic);
        prop_assert!(log.min > 0.0 && log.max > log.min);
    }

    #[test]
    fn normalized_values_stay_in_unit_interval(
        value in proptest::num::f64::ANY,
        min in -1.0e6_f64..1.0e6,
        max in -1.0e6_f64..1.0e6,
    ) {
        for kind in [AxisKind::Linear, AxisKind::Logarithmic, AxisKind::DateTime] {
            let t = normalize(value, AxisRange::new(min, max), kind);
            prop_assert!((0.0..=1.0).contains(&t), "{kind:?} {value} -> {t}");
        }
    }

    #[test]
    fn trimmed_text_fits_its_budget(text in "[a-zA-Z0-9 ]{0,40}", max_width in 0.0_f64..200.0) {
        let style = TextStyle::new(10.0);
        let trimmed = trim_to_width(&M, &text, style, max_width);
        prop_assert!(M.measure(&trimmed, style).advance_width <= max_width);
        if trimmed != text.as_str() {
            prop_assert!(trimmed.is_empty() || trimmed.ends_with(ELLIPSIS));
        }
    }

    #[test]
    fn placed_labels_never_overlap_or_leave_the_plot(
        anchors in proptest::collection::vec((0.0_f64..400.0, 0.0_f64..300.0, any::<bool>()), 1..60),
        vertical in any::<bool>(),
    ) {
        let plot = Rect::new(0.0, 0.0, 400.0, 300.0);
        let placer = LabelPlacer::new(plot).with_style(TextStyle::new(10.0));
        let orientation = if vertical {
            PlacementOrientation::Vertical
        } else {
            PlacementOrientation::Horizontal
        };
        let mut placed = PlacedLabels::new();
        for (x, y, inverted) in anchors {
            if let Some(label) =
                placer.try_place(&M, Point::new(x, y), "123.4", orientation, inverted, &mut placed)
            {
                prop_assert!(orientation.sides(inverted).contains(&label.side));
            }
        }
        let rects = placed.rects();
        for (i, a) in rects.iter().enumerate() {
            prop_assert!(rect_within(*a, plot));
            for b in &rects[i + 1..] {
                prop_assert!(!rects_overlap(*a, *b));
            }
        }
    }

    #[test]
    fn calendar_ranges_always_get_two_ticks(
        min in 0.0_f64..80_000.0,
        span in 1.0e-4_f64..20_000.0,
        desired in 2_usize..10,
    ) {
        let ticks = get_ticks(AxisRange::new(min, min + span), AxisKind::DateTime, desired);
        prop_assert!(ticks.len() >= 2, "{min} + {span}: {:?}", ticks.values());
        prop_assert!(ticks.values().windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn date_units_grow_with_the_target(a in 0.0_f64..20_000.0, b in 0.0_f64..20_000.0) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(DateTimeUnit::for_target_days(small) <= DateTimeUnit::for_target_days(large));
    }
}
