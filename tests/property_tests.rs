/// Property-based tests using proptest
/// Tests invariants and properties that should hold for all inputs
use email_reply_api::models::{Sentiment, Tone};
use email_reply_api::sentiment::{bucket, polarity};
use email_reply_api::services::{build_prompt, mean_rating, round2};
use proptest::prelude::*;

// Property: polarity scoring should never panic and stays in [-1, 1]
proptest! {
    #[test]
    fn polarity_never_panics_and_stays_bounded(text in "\\PC*") {
        let p = polarity(&text);
        prop_assert!((-1.0..=1.0).contains(&p));
    }

    #[test]
    fn polarity_of_neutral_filler_is_zero(text in "[0-9 ]{0,80}") {
        // Digits and whitespace carry no sentiment
        prop_assert_eq!(polarity(&text), 0.0);
    }
}

// Property: bucketing is a pure function of the thresholds
proptest! {
    #[test]
    fn bucket_matches_thresholds(p in -1.0f64..=1.0) {
        let sentiment = bucket(p);
        if p > 0.1 {
            prop_assert_eq!(sentiment, Sentiment::Positive);
        } else if p < -0.1 {
            prop_assert_eq!(sentiment, Sentiment::Negative);
        } else {
            prop_assert_eq!(sentiment, Sentiment::Neutral);
        }
    }
}

// Property: tone resolution never panics, never rejects
proptest! {
    #[test]
    fn tone_resolution_never_panics(tone in "\\PC*") {
        let _ = Tone::resolve(&tone);
    }

    #[test]
    fn known_tones_resolve_in_any_case(
        tone in prop::sample::select(vec!["formal", "friendly", "apologetic"]),
        uppercase in proptest::bool::ANY
    ) {
        let input = if uppercase { tone.to_uppercase() } else { tone.to_string() };
        prop_assert!(Tone::resolve(&input).is_some());
    }

    #[test]
    fn prompt_wraps_instruction_and_body(body in "\\PC{0,200}") {
        let prompt = build_prompt(Tone::Friendly, &body);
        prop_assert!(prompt.starts_with(Tone::Friendly.instruction()));
        prop_assert!(prompt.ends_with(&body));
    }
}

// Property: rating aggregation
proptest! {
    #[test]
    fn mean_rating_bounded_by_extremes(ratings in prop::collection::vec(1i32..=5, 1..50)) {
        let mean = mean_rating(&ratings);
        let min = *ratings.iter().min().unwrap() as f64;
        let max = *ratings.iter().max().unwrap() as f64;
        // Rounding to two decimals can move the mean by at most half a cent
        prop_assert!(mean >= min - 0.005);
        prop_assert!(mean <= max + 0.005);
    }

    #[test]
    fn mean_rating_of_constant_ratings_is_that_rating(rating in 1i32..=5, count in 1usize..50) {
        let ratings = vec![rating; count];
        prop_assert_eq!(mean_rating(&ratings), rating as f64);
    }

    #[test]
    fn round2_moves_value_at_most_half_cent(x in -1000.0f64..1000.0) {
        let rounded = round2(x);
        prop_assert!((rounded - x).abs() <= 0.005 + 1e-9);
    }
}
