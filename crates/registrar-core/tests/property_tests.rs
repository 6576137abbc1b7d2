//! Property-based tests for the aggregation engine.
//!
//! The central invariant: the five grade bands partition the score space,
//! so every score lands in exactly one histogram bucket and the bucket
//! counts always sum to the input count.

use proptest::prelude::*;
use registrar_core::{GradeDistribution, LetterGrade, average, round_tenths};

fn scores() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=100.0, 0..200)
}

proptest! {
    #[test]
    fn histogram_partitions_all_scores(scores in scores()) {
        let dist = GradeDistribution::from_scores(scores.iter().copied());
        prop_assert_eq!(dist.total() as usize, scores.len());
    }

    #[test]
    fn every_score_lands_in_exactly_one_band(score in 0.0f64..=100.0) {
        let band = LetterGrade::from_score(score);
        let matches = LetterGrade::ALL
            .iter()
            .filter(|b| **b == band)
            .count();
        prop_assert_eq!(matches, 1);

        // Band membership is consistent with the documented boundaries.
        match band {
            LetterGrade::A => prop_assert!(score >= 90.0),
            LetterGrade::B => prop_assert!((80.0..90.0).contains(&score)),
            LetterGrade::C => prop_assert!((70.0..80.0).contains(&score)),
            LetterGrade::D => prop_assert!((60.0..70.0).contains(&score)),
            LetterGrade::F => prop_assert!(score < 60.0),
        }
    }

    #[test]
    fn average_stays_within_score_bounds(scores in scores()) {
        let mean = round_tenths(average(scores.iter().copied()));
        if scores.is_empty() {
            prop_assert_eq!(mean, 0.0);
        } else {
            // Rounding to one decimal can nudge past the extremes by at
            // most 0.05.
            prop_assert!(mean >= -0.05);
            prop_assert!(mean <= 100.05);
        }
    }
}

#[test]
fn boundary_scores_partition_exactly_once() {
    let boundary = [59.9, 60.0, 69.9, 70.0, 79.9, 80.0, 89.9, 90.0, 100.0];
    let dist = GradeDistribution::from_scores(boundary.iter().copied());
    assert_eq!(dist.total() as usize, boundary.len());
}
