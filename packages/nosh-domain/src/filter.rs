use serde::{Deserialize, Serialize};

use crate::recipe::{MicroNutrients, Recipe};

/// Hard constraints for a recipe search. Every field is optional; an absent
/// field skips its check entirely.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeFilters {
	pub query: Option<String>,
	pub cuisines: Vec<String>,
	pub dietary_tags: Vec<String>,
	pub exclude_allergens: Vec<String>,
	pub calories: Option<NutrientRange>,
	pub protein: Option<NutrientRange>,
	pub carbs: Option<NutrientRange>,
	pub fats: Option<NutrientRange>,
	pub micros: Vec<MicroRange>,
	pub limit: Option<u32>,
}

/// Inclusive range, open on whichever bound is omitted.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct NutrientRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
}
impl NutrientRange {
	pub fn contains(&self, value: f64) -> bool {
		if let Some(min) = self.min
			&& value < min
		{
			return false;
		}
		if let Some(max) = self.max
			&& value > max
		{
			return false;
		}

		true
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct MicroRange {
	pub nutrient: Micronutrient,
	#[serde(flatten)]
	pub range: NutrientRange,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Micronutrient {
	VitaminD,
	VitaminB12,
	Iron,
	Magnesium,
}
impl Micronutrient {
	/// An unset micronutrient on a recipe reads as zero for range checks.
	pub fn value_of(self, micros: &MicroNutrients) -> f64 {
		match self {
			Self::VitaminD => micros.vitamin_d,
			Self::VitaminB12 => micros.vitamin_b12,
			Self::Iron => micros.iron,
			Self::Magnesium => micros.magnesium,
		}
		.unwrap_or(0.0)
	}
}

impl RecipeFilters {
	/// Pure predicate: a recipe passes iff every present constraint holds.
	pub fn matches(&self, recipe: &Recipe) -> bool {
		if !self.cuisines.is_empty()
			&& !self.cuisines.iter().any(|cuisine| cuisine.eq_ignore_ascii_case(&recipe.cuisine))
		{
			return false;
		}
		if !self.dietary_tags.is_empty()
			&& !recipe.dietary_tags.iter().any(|tag| {
				self.dietary_tags.iter().any(|wanted| wanted.eq_ignore_ascii_case(tag))
			}) {
			return false;
		}
		if recipe.allergens.iter().any(|allergen| {
			self.exclude_allergens.iter().any(|excluded| excluded.eq_ignore_ascii_case(allergen))
		}) {
			return false;
		}

		let macro_checks = [
			(self.calories, recipe.macros.calories),
			(self.protein, recipe.macros.protein),
			(self.carbs, recipe.macros.carbs),
			(self.fats, recipe.macros.fats),
		];

		for (range, value) in macro_checks {
			if let Some(range) = range
				&& !range.contains(value)
			{
				return false;
			}
		}

		for micro in &self.micros {
			if !micro.range.contains(micro.nutrient.value_of(&recipe.micros)) {
				return false;
			}
		}

		true
	}
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use super::*;
	use crate::recipe::{
		EcoRating, MacroNutrients, MicroNutrients, RatingAggregate, Recipe, Sustainability,
	};

	fn test_recipe() -> Recipe {
		Recipe {
			recipe_id: Uuid::new_v4(),
			title: "Lentil bowl".to_string(),
			cuisine: "Mediterranean".to_string(),
			meal_type: "lunch".to_string(),
			servings: 2,
			prep_minutes: 10,
			cook_minutes: 25,
			summary: "Hearty lentil bowl.".to_string(),
			instructions: "Cook lentils. Assemble bowl.".to_string(),
			dietary_tags: vec!["vegan".to_string(), "high-protein".to_string()],
			allergens: vec!["sesame".to_string()],
			macros: MacroNutrients {
				calories: 520.0,
				protein: 24.0,
				carbs: 68.0,
				fats: 14.0,
				fiber: 18.0,
			},
			micros: MicroNutrients {
				vitamin_d: None,
				vitamin_b12: Some(0.4),
				iron: Some(6.2),
				magnesium: Some(110.0),
			},
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Low,
				land_usage: EcoRating::Medium,
			},
			rating: RatingAggregate::default(),
			embedding_id: None,
		}
	}

	#[test]
	fn empty_filters_match_everything() {
		assert!(RecipeFilters::default().matches(&test_recipe()));
	}

	#[test]
	fn cuisine_check_is_case_insensitive() {
		let filters =
			RecipeFilters { cuisines: vec!["mediterranean".to_string()], ..Default::default() };

		assert!(filters.matches(&test_recipe()));

		let filters = RecipeFilters { cuisines: vec!["Japanese".to_string()], ..Default::default() };

		assert!(!filters.matches(&test_recipe()));
	}

	#[test]
	fn any_dietary_tag_overlap_passes() {
		let filters = RecipeFilters {
			dietary_tags: vec!["keto".to_string(), "VEGAN".to_string()],
			..Default::default()
		};

		assert!(filters.matches(&test_recipe()));

		let filters =
			RecipeFilters { dietary_tags: vec!["keto".to_string()], ..Default::default() };

		assert!(!filters.matches(&test_recipe()));
	}

	#[test]
	fn excluded_allergen_rejects() {
		let filters =
			RecipeFilters { exclude_allergens: vec!["Sesame".to_string()], ..Default::default() };

		assert!(!filters.matches(&test_recipe()));

		let filters =
			RecipeFilters { exclude_allergens: vec!["peanut".to_string()], ..Default::default() };

		assert!(filters.matches(&test_recipe()));
	}

	#[test]
	fn macro_range_bounds_are_open_when_omitted() {
		let filters = RecipeFilters {
			calories: Some(NutrientRange { min: Some(400.0), max: None }),
			..Default::default()
		};

		assert!(filters.matches(&test_recipe()));

		let filters = RecipeFilters {
			calories: Some(NutrientRange { min: None, max: Some(500.0) }),
			..Default::default()
		};

		assert!(!filters.matches(&test_recipe()));
	}

	#[test]
	fn unset_micro_reads_as_zero() {
		let filters = RecipeFilters {
			micros: vec![MicroRange {
				nutrient: Micronutrient::VitaminD,
				range: NutrientRange { min: Some(1.0), max: None },
			}],
			..Default::default()
		};

		assert!(!filters.matches(&test_recipe()));

		let filters = RecipeFilters {
			micros: vec![MicroRange {
				nutrient: Micronutrient::VitaminD,
				range: NutrientRange { min: None, max: Some(5.0) },
			}],
			..Default::default()
		};

		assert!(filters.matches(&test_recipe()));
	}

	#[test]
	fn micro_range_checks_present_values() {
		let filters = RecipeFilters {
			micros: vec![MicroRange {
				nutrient: Micronutrient::Iron,
				range: NutrientRange { min: Some(5.0), max: Some(8.0) },
			}],
			..Default::default()
		};

		assert!(filters.matches(&test_recipe()));

		let filters = RecipeFilters {
			micros: vec![MicroRange {
				nutrient: Micronutrient::Magnesium,
				range: NutrientRange { min: Some(200.0), max: None },
			}],
			..Default::default()
		};

		assert!(!filters.matches(&test_recipe()));
	}
}
