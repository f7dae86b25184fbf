pub mod filter;
pub mod query;
pub mod recipe;
pub mod review;
pub mod scoring;
pub mod similarity;

pub use filter::{MicroRange, Micronutrient, NutrientRange, RecipeFilters};
pub use recipe::{
	EcoRating, MacroNutrients, MicroNutrients, NEUTRAL_RATING, RatingAggregate, Recipe,
	Sustainability,
};
pub use review::{MAX_RATING, MIN_RATING, ModerationStatus, Review};
