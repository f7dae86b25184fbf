use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The rating scale midpoint, used both as the neutral aggregate for unrated
/// recipes and as the center of the rating-adjusted score multiplier.
pub const NEUTRAL_RATING: f64 = 3.0;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
	pub recipe_id: Uuid,
	pub title: String,
	pub cuisine: String,
	pub meal_type: String,
	pub servings: u32,
	pub prep_minutes: u32,
	pub cook_minutes: u32,
	pub summary: String,
	pub instructions: String,
	#[serde(default)]
	pub dietary_tags: Vec<String>,
	#[serde(default)]
	pub allergens: Vec<String>,
	pub macros: MacroNutrients,
	#[serde(default)]
	pub micros: MicroNutrients,
	pub sustainability: Sustainability,
	#[serde(flatten)]
	pub rating: RatingAggregate,
	pub embedding_id: Option<Uuid>,
}

/// Per-serving macro nutrients. All values are non-negative.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct MacroNutrients {
	pub calories: f64,
	pub protein: f64,
	pub carbs: f64,
	pub fats: f64,
	pub fiber: f64,
}

/// Per-serving micronutrients. Unset values are treated as zero by the
/// constraint filter.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroNutrients {
	pub vitamin_d: Option<f64>,
	pub vitamin_b12: Option<f64>,
	pub iron: Option<f64>,
	pub magnesium: Option<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sustainability {
	pub carbon_footprint: EcoRating,
	pub water_usage: EcoRating,
	pub land_usage: EcoRating,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EcoRating {
	Low,
	Medium,
	High,
}

/// Derived state, recomputed from the approved reviews of a recipe. Never
/// written directly by a review submission.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RatingAggregate {
	#[serde(rename = "ratingSum")]
	pub sum: f64,
	#[serde(rename = "ratingCount")]
	pub count: u32,
	#[serde(rename = "ratingAverage")]
	pub average: f64,
}
impl RatingAggregate {
	/// Full recount over the ratings of a recipe's approved reviews. A full
	/// recount rather than an incremental update tolerates moderation
	/// reversals.
	pub fn recompute(ratings: &[i32]) -> Self {
		let count = ratings.len() as u32;
		let sum = ratings.iter().map(|rating| f64::from(*rating)).sum::<f64>();
		let average = if count > 0 { sum / f64::from(count) } else { NEUTRAL_RATING };

		Self { sum, count, average }
	}
}
impl Default for RatingAggregate {
	fn default() -> Self {
		Self { sum: 0.0, count: 0, average: NEUTRAL_RATING }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recompute_holds_average_invariant() {
		let aggregate = RatingAggregate::recompute(&[5, 4, 4]);

		assert_eq!(aggregate.sum, 13.0);
		assert_eq!(aggregate.count, 3);
		assert!((aggregate.average - aggregate.sum / f64::from(aggregate.count)).abs() < 1e-12);
	}

	#[test]
	fn recompute_empty_uses_neutral_average() {
		let aggregate = RatingAggregate::recompute(&[]);

		assert_eq!(aggregate.sum, 0.0);
		assert_eq!(aggregate.count, 0);
		assert_eq!(aggregate.average, NEUTRAL_RATING);
	}

	#[test]
	fn aggregate_serializes_interop_field_names() {
		let value = serde_json::to_value(RatingAggregate::recompute(&[4]))
			.expect("Failed to serialize aggregate.");

		assert_eq!(value["ratingSum"], 4.0);
		assert_eq!(value["ratingCount"], 1);
		assert_eq!(value["ratingAverage"], 4.0);
	}
}
