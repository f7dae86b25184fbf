use std::cmp::Ordering;

use crate::recipe::NEUTRAL_RATING;

/// Scales raw similarity by the recipe's aggregate rating: 1.0x at the
/// 3-star midpoint, up to 1.4x at 5 stars, down to 0.6x at 1 star, so
/// popularity nudges ranking without overwhelming semantic relevance.
pub fn rating_adjusted(similarity: f32, rating_average: f64) -> f32 {
	let multiplier = 1.0 + (rating_average - NEUTRAL_RATING) / 5.0;

	similarity * multiplier as f32
}

/// Synthetic similarity for static-fallback candidates: a descending score
/// per list position, guaranteeing a stable total order even though no real
/// similarity was computed.
///
/// Positions past `base / step` go negative and large corpora can collide
/// after f32 rounding. The curated corpus stays well under that size; the
/// formula is kept bit-compatible with the shipped ranking.
pub fn synthetic_fallback_score(base: f32, step: f32, position: usize) -> f32 {
	base - step * position as f32
}

/// Descending order over final scores. NaN sorts last so a single corrupt
/// score cannot float to the top.
pub fn cmp_score_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn neutral_rating_leaves_similarity_unchanged() {
		assert!((rating_adjusted(0.8, 3.0) - 0.8).abs() < 1e-6);
	}

	#[test]
	fn four_star_recipe_boosts_by_twenty_percent() {
		// 0.8 * (1 + (4 - 3) / 5) = 0.96
		assert!((rating_adjusted(0.8, 4.0) - 0.96).abs() < 1e-6);
	}

	#[test]
	fn rating_extremes_scale_to_documented_bounds() {
		assert!((rating_adjusted(1.0, 5.0) - 1.4).abs() < 1e-6);
		assert!((rating_adjusted(1.0, 1.0) - 0.6).abs() < 1e-6);
	}

	#[test]
	fn fallback_scores_descend_by_step() {
		assert!((synthetic_fallback_score(0.4, 0.01, 0) - 0.4).abs() < 1e-6);
		assert!((synthetic_fallback_score(0.4, 0.01, 1) - 0.39).abs() < 1e-6);
		assert!((synthetic_fallback_score(0.4, 0.01, 2) - 0.38).abs() < 1e-6);
	}

	#[test]
	fn sorting_with_comparator_is_descending_and_nan_last() {
		let mut scores = vec![0.2_f32, f32::NAN, 0.9, 0.5];

		scores.sort_by(|a, b| cmp_score_desc(*a, *b));

		assert_eq!(scores[0], 0.9);
		assert_eq!(scores[1], 0.5);
		assert_eq!(scores[2], 0.2);
		assert!(scores[3].is_nan());
	}
}
