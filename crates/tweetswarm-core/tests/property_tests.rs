//! Property tests for selection, legend, color and layout

use proptest::prelude::*;
use tweetswarm_core::{
    color, legend, Category, EncodingMode, LayoutEngine, Record, SelectionSet, LEGEND_BANDS,
    NEGATIVE, NEUTRAL, POSITIVE,
};

fn tweet(text: &str) -> Record {
    Record::new(text, Category::April)
}

fn sentiment_color(value: f64) -> tweetswarm_core::Rgb {
    color(
        &tweet("sample").with_sentiment(value),
        EncodingMode::Sentiment,
    )
}

#[test]
fn test_toggle_order() {
    let selection = SelectionSet::new()
        .toggled(&tweet("A"))
        .toggled(&tweet("B"));
    assert_eq!(selection.texts(), vec!["B", "A"]);
}

#[test]
fn test_legend_partition_covers_domain() {
    for mode in EncodingMode::ALL {
        let legend = legend(mode);
        let (lo, hi) = mode.domain();
        let width = (hi - lo) / LEGEND_BANDS as f64;

        assert_eq!(legend.bands.len(), LEGEND_BANDS);
        assert_eq!(legend.bands[0].hi_bound, hi);
        assert_eq!(legend.bands[LEGEND_BANDS - 1].lo_bound, lo);
        for band in &legend.bands {
            assert!((band.hi_bound - band.lo_bound - width).abs() < 1e-12);
        }
        for pair in legend.bands.windows(2) {
            assert_eq!(pair[0].lo_bound, pair[1].hi_bound);
        }
    }
}

#[test]
fn test_sentiment_passes_through_neutral() {
    assert_eq!(sentiment_color(-1.0), NEGATIVE);
    assert_eq!(sentiment_color(0.0), NEUTRAL);
    assert_eq!(sentiment_color(1.0), POSITIVE);
}

#[test]
fn test_dense_row_keeps_min_separation() {
    let records: Vec<Record> = (0..50)
        .map(|i| tweet(&format!("tweet {}", i)).with_projection(0.0))
        .collect();
    let refs: Vec<&Record> = records.iter().collect();
    let points = LayoutEngine::default().layout(&refs, |_| 200.0, 125.0, 250.0);

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            assert!(a.distance(b) >= 6.0 - 0.5, "distance {}", a.distance(b));
        }
    }
}

proptest! {
    #[test]
    fn test_toggle_twice_is_identity_for_new_text(
        texts in prop::collection::vec("[a-z]{1,6}", 0..8),
        extra in "[a-z]{1,6}",
    ) {
        let start = texts
            .iter()
            .fold(SelectionSet::new(), |s, t| s.toggled(&tweet(t)));
        prop_assume!(!start.contains_text(&extra));
        let round = start.toggled(&tweet(&extra)).toggled(&tweet(&extra));
        prop_assert_eq!(round, start);
    }

    #[test]
    fn test_toggle_twice_keeps_membership_of_selected_text(
        texts in prop::collection::vec("[a-z]{1,6}", 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let start = texts
            .iter()
            .fold(SelectionSet::new(), |s, t| s.toggled(&tweet(t)));
        prop_assume!(!start.is_empty());
        let chosen = start.texts()[pick.index(start.len())].to_string();

        let round = start.toggled(&tweet(&chosen)).toggled(&tweet(&chosen));
        // removed then re-added at the front
        prop_assert_eq!(round.texts()[0], chosen.as_str());
        let mut before = start.texts();
        let mut after = round.texts();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_selection_has_no_duplicates(texts in prop::collection::vec("[a-c]{1,2}", 0..20)) {
        let selection = texts
            .iter()
            .fold(SelectionSet::new(), |s, t| s.toggled(&tweet(t)));
        let mut seen = selection.texts();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), selection.len());
    }

    #[test]
    fn test_sentiment_channels_move_monotonically(a in -1.0f64..1.0, b in -1.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (c_lo, c_hi) = (sentiment_color(lo), sentiment_color(hi));

        // channels rise from red to neutral grey, then fall toward green
        if hi <= 0.0 {
            prop_assert!(c_lo.r <= c_hi.r && c_lo.g <= c_hi.g && c_lo.b <= c_hi.b);
        }
        if lo >= 0.0 {
            prop_assert!(c_lo.r >= c_hi.r && c_lo.g >= c_hi.g && c_lo.b >= c_hi.b);
        }
    }

    #[test]
    fn test_colors_clamp_outside_domain(value in 1.0f64..100.0) {
        prop_assert_eq!(sentiment_color(value), POSITIVE);
        prop_assert_eq!(sentiment_color(-value), NEGATIVE);
    }

    #[test]
    fn test_single_point_sits_on_target(target in -500.0f64..500.0, center in 0.0f64..300.0) {
        let record = tweet("only");
        let points = LayoutEngine::default().layout(&[&record], |_| target, center, 250.0);
        prop_assert!((points[0].x - target).abs() < 1e-9);
        prop_assert!((points[0].y - center).abs() < 1e-9);
    }
}
