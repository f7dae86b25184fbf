use time::macros::datetime;
use uuid::Uuid;

use nosh_domain::{
	EcoRating, MacroNutrients, MicroNutrients, ModerationStatus, RatingAggregate, Recipe,
	RecipeFilters, Review, Sustainability, query, scoring,
};

fn recipe(title: &str, cuisine: &str, tags: &[&str], calories: f64) -> Recipe {
	Recipe {
		recipe_id: Uuid::new_v4(),
		title: title.to_string(),
		cuisine: cuisine.to_string(),
		meal_type: "dinner".to_string(),
		servings: 2,
		prep_minutes: 15,
		cook_minutes: 30,
		summary: format!("{title} summary."),
		instructions: format!("{title} instructions."),
		dietary_tags: tags.iter().map(|tag| tag.to_string()).collect(),
		allergens: Vec::new(),
		macros: MacroNutrients { calories, protein: 20.0, carbs: 50.0, fats: 12.0, fiber: 8.0 },
		micros: MicroNutrients::default(),
		sustainability: Sustainability {
			carbon_footprint: EcoRating::Low,
			water_usage: EcoRating::Medium,
			land_usage: EcoRating::Low,
		},
		rating: RatingAggregate::default(),
		embedding_id: None,
	}
}

#[test]
fn recipe_json_carries_interop_rating_fields() {
	let mut subject = recipe("Paella", "Spanish", &["pescatarian"], 640.0);

	subject.rating = RatingAggregate::recompute(&[5, 4]);

	let value = serde_json::to_value(&subject).expect("Failed to serialize recipe.");

	assert_eq!(value["ratingSum"], 9.0);
	assert_eq!(value["ratingCount"], 2);
	assert_eq!(value["ratingAverage"], 4.5);
	assert_eq!(value["dietaryTags"][0], "pescatarian");

	let parsed: Recipe = serde_json::from_value(value).expect("Failed to deserialize recipe.");

	assert_eq!(parsed.rating.count, 2);
}

#[test]
fn review_json_uses_moderation_status_field() {
	let review = Review {
		review_id: Uuid::new_v4(),
		recipe_id: Uuid::new_v4(),
		user_id: Uuid::new_v4(),
		rating: 4,
		comment: Some("Great weeknight dinner.".to_string()),
		status: ModerationStatus::Pending,
		moderator_id: None,
		moderated_at: None,
		notes: None,
		created_at: datetime!(2026-02-01 12:00 UTC),
	};
	let value = serde_json::to_value(&review).expect("Failed to serialize review.");

	assert_eq!(value["moderationStatus"], "pending");
	assert_eq!(value["rating"], 4);
	// Timestamps cross the wire as RFC 3339 strings, absent ones as null.
	assert_eq!(value["createdAt"], "2026-02-01T12:00:00Z");
	assert_eq!(value["moderatedAt"], serde_json::Value::Null);

	let parsed: Review = serde_json::from_value(value).expect("Failed to deserialize review.");

	assert_eq!(parsed.created_at, review.created_at);
}

#[test]
fn query_text_feeds_scoring_pipeline_deterministically() {
	let filters = RecipeFilters {
		query: Some("comfort food".to_string()),
		cuisines: vec!["Italian".to_string()],
		..Default::default()
	};

	assert_eq!(query::build_query_text(&filters), "comfort food. Italian cuisine");

	// The same similarity ranks higher on the better-rated recipe.
	let plain = scoring::rating_adjusted(0.7, 3.0);
	let loved = scoring::rating_adjusted(0.7, 4.8);

	assert!(loved > plain);
}

#[test]
fn filters_and_ranking_agree_on_survivors() {
	let filters = RecipeFilters { cuisines: vec!["Spanish".to_string()], ..Default::default() };
	let catalog = vec![
		recipe("Paella", "Spanish", &[], 640.0),
		recipe("Ramen", "Japanese", &[], 550.0),
		recipe("Gazpacho", "Spanish", &[], 180.0),
	];
	let survivors: Vec<&Recipe> =
		catalog.iter().filter(|candidate| filters.matches(candidate)).collect();

	assert_eq!(survivors.len(), 2);
	assert!(survivors.iter().all(|candidate| candidate.cuisine == "Spanish"));
}
