//! The curated last-resort corpus. Served when both vector tiers come back
//! empty or cannot run, so search never returns nothing for a reachable
//! constraint set. Ids are fixed so clients can cache these entries across
//! deployments. Curated recipes live outside the catalog and carry no review
//! ledger; submitting a review against one is rejected.

use uuid::Uuid;

use nosh_domain::{
	EcoRating, MacroNutrients, MicroNutrients, RatingAggregate, Recipe, Sustainability,
};

// "nosh" prefix, version-4/variant-1 shaped, last byte is the slot.
const CURATED_ID_BASE: u128 = 0x6e6f_7368_0000_4000_8000_0000_0000_0000;

struct Curated {
	slot: u128,
	title: &'static str,
	cuisine: &'static str,
	meal_type: &'static str,
	servings: u32,
	prep_minutes: u32,
	cook_minutes: u32,
	summary: &'static str,
	instructions: &'static str,
	dietary_tags: &'static [&'static str],
	allergens: &'static [&'static str],
	macros: MacroNutrients,
	micros: MicroNutrients,
	sustainability: Sustainability,
}

fn build(seed: Curated) -> Recipe {
	Recipe {
		recipe_id: Uuid::from_u128(CURATED_ID_BASE | seed.slot),
		title: seed.title.to_string(),
		cuisine: seed.cuisine.to_string(),
		meal_type: seed.meal_type.to_string(),
		servings: seed.servings,
		prep_minutes: seed.prep_minutes,
		cook_minutes: seed.cook_minutes,
		summary: seed.summary.to_string(),
		instructions: seed.instructions.to_string(),
		dietary_tags: seed.dietary_tags.iter().map(|tag| tag.to_string()).collect(),
		allergens: seed.allergens.iter().map(|allergen| allergen.to_string()).collect(),
		macros: seed.macros,
		micros: seed.micros,
		sustainability: seed.sustainability,
		rating: RatingAggregate::default(),
		embedding_id: None,
	}
}

/// Ordering matters: synthetic fallback scores descend by position, so the
/// list is ordered from broadest appeal downward.
pub fn curated_corpus() -> Vec<Recipe> {
	vec![
		build(Curated {
			slot: 0x01,
			title: "Mediterranean Chickpea Bowl",
			cuisine: "Mediterranean",
			meal_type: "lunch",
			servings: 2,
			prep_minutes: 15,
			cook_minutes: 10,
			summary: "Chickpeas, cucumber, tomato, and olives over bulgur with a lemon-tahini dressing.",
			instructions: "Cook the bulgur. Chop the vegetables. Whisk the dressing and toss everything together.",
			dietary_tags: &["vegetarian", "high-fiber"],
			allergens: &["sesame", "gluten"],
			macros: MacroNutrients { calories: 520.0, protein: 18.0, carbs: 72.0, fats: 18.0, fiber: 14.0 },
			micros: MicroNutrients { vitamin_d: None, vitamin_b12: None, iron: Some(4.8), magnesium: Some(120.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Low,
				land_usage: EcoRating::Low,
			},
		}),
		build(Curated {
			slot: 0x02,
			title: "Lemon Herb Grilled Chicken",
			cuisine: "American",
			meal_type: "dinner",
			servings: 4,
			prep_minutes: 20,
			cook_minutes: 15,
			summary: "Grilled chicken breast marinated in lemon, garlic, and herbs, with roasted vegetables.",
			instructions: "Marinate the chicken for 20 minutes. Grill 6-7 minutes per side. Roast the vegetables and serve.",
			dietary_tags: &["high-protein", "gluten-free"],
			allergens: &[],
			macros: MacroNutrients { calories: 430.0, protein: 42.0, carbs: 18.0, fats: 20.0, fiber: 5.0 },
			micros: MicroNutrients { vitamin_d: Some(0.3), vitamin_b12: Some(0.9), iron: Some(1.6), magnesium: Some(48.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Medium,
				water_usage: EcoRating::Medium,
				land_usage: EcoRating::Medium,
			},
		}),
		build(Curated {
			slot: 0x03,
			title: "Vegetable Miso Ramen",
			cuisine: "Japanese",
			meal_type: "dinner",
			servings: 2,
			prep_minutes: 15,
			cook_minutes: 20,
			summary: "Miso broth with ramen noodles, shiitake, bok choy, and a soft-boiled egg.",
			instructions: "Simmer the broth with miso and shiitake. Cook the noodles separately. Assemble with bok choy and egg.",
			dietary_tags: &["vegetarian"],
			allergens: &["soy", "gluten", "egg"],
			macros: MacroNutrients { calories: 560.0, protein: 22.0, carbs: 78.0, fats: 17.0, fiber: 8.0 },
			micros: MicroNutrients { vitamin_d: Some(1.1), vitamin_b12: Some(0.5), iron: Some(3.4), magnesium: Some(74.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Medium,
				land_usage: EcoRating::Low,
			},
		}),
		build(Curated {
			slot: 0x04,
			title: "Black Bean Sweet Potato Tacos",
			cuisine: "Mexican",
			meal_type: "dinner",
			servings: 3,
			prep_minutes: 15,
			cook_minutes: 25,
			summary: "Roasted sweet potato and spiced black beans in corn tortillas with lime crema.",
			instructions: "Roast the sweet potato. Warm the beans with spices. Fill the tortillas and top with crema.",
			dietary_tags: &["vegetarian", "gluten-free", "high-fiber"],
			allergens: &["dairy"],
			macros: MacroNutrients { calories: 490.0, protein: 16.0, carbs: 80.0, fats: 13.0, fiber: 16.0 },
			micros: MicroNutrients { vitamin_d: None, vitamin_b12: None, iron: Some(4.2), magnesium: Some(110.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Low,
				land_usage: EcoRating::Low,
			},
		}),
		build(Curated {
			slot: 0x05,
			title: "Thai Green Curry with Tofu",
			cuisine: "Thai",
			meal_type: "dinner",
			servings: 4,
			prep_minutes: 20,
			cook_minutes: 20,
			summary: "Green curry paste, coconut milk, crispy tofu, and seasonal vegetables over jasmine rice.",
			instructions: "Fry the tofu until golden. Simmer the curry paste in coconut milk. Add vegetables and tofu, serve over rice.",
			dietary_tags: &["vegan", "gluten-free"],
			allergens: &["soy"],
			macros: MacroNutrients { calories: 540.0, protein: 19.0, carbs: 62.0, fats: 25.0, fiber: 7.0 },
			micros: MicroNutrients { vitamin_d: None, vitamin_b12: None, iron: Some(5.1), magnesium: Some(96.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Medium,
				land_usage: EcoRating::Low,
			},
		}),
		build(Curated {
			slot: 0x06,
			title: "Baked Salmon with Quinoa",
			cuisine: "Scandinavian",
			meal_type: "dinner",
			servings: 2,
			prep_minutes: 10,
			cook_minutes: 18,
			summary: "Oven-baked salmon fillet with dill, served on lemon quinoa and steamed greens.",
			instructions: "Bake the salmon at 200C for 14-16 minutes. Cook the quinoa. Steam the greens and plate.",
			dietary_tags: &["high-protein", "gluten-free", "pescatarian"],
			allergens: &["fish"],
			macros: MacroNutrients { calories: 580.0, protein: 38.0, carbs: 42.0, fats: 27.0, fiber: 6.0 },
			micros: MicroNutrients { vitamin_d: Some(14.0), vitamin_b12: Some(4.5), iron: Some(2.1), magnesium: Some(88.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Medium,
				water_usage: EcoRating::Medium,
				land_usage: EcoRating::Low,
			},
		}),
		build(Curated {
			slot: 0x07,
			title: "Overnight Oats with Berries",
			cuisine: "American",
			meal_type: "breakfast",
			servings: 1,
			prep_minutes: 5,
			cook_minutes: 0,
			summary: "Rolled oats soaked in oat milk with chia, topped with mixed berries and almonds.",
			instructions: "Combine oats, chia, and oat milk. Refrigerate overnight. Top with berries and almonds.",
			dietary_tags: &["vegan", "high-fiber"],
			allergens: &["tree-nut", "gluten"],
			macros: MacroNutrients { calories: 390.0, protein: 12.0, carbs: 58.0, fats: 13.0, fiber: 11.0 },
			micros: MicroNutrients { vitamin_d: Some(1.5), vitamin_b12: Some(0.6), iron: Some(2.8), magnesium: Some(105.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Low,
				land_usage: EcoRating::Low,
			},
		}),
		build(Curated {
			slot: 0x08,
			title: "Lentil Spinach Dal",
			cuisine: "Indian",
			meal_type: "dinner",
			servings: 4,
			prep_minutes: 10,
			cook_minutes: 30,
			summary: "Red lentils simmered with turmeric, cumin, and spinach, finished with a ghee tadka.",
			instructions: "Simmer the lentils with turmeric. Wilt in the spinach. Temper the spices in ghee and pour over.",
			dietary_tags: &["vegetarian", "gluten-free", "high-fiber"],
			allergens: &["dairy"],
			macros: MacroNutrients { calories: 410.0, protein: 21.0, carbs: 60.0, fats: 10.0, fiber: 15.0 },
			micros: MicroNutrients { vitamin_d: None, vitamin_b12: None, iron: Some(6.6), magnesium: Some(92.0) },
			sustainability: Sustainability {
				carbon_footprint: EcoRating::Low,
				water_usage: EcoRating::Low,
				land_usage: EcoRating::Low,
			},
		}),
	]
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn curated_ids_are_fixed_and_distinct() {
		let corpus = curated_corpus();
		let ids = corpus.iter().map(|recipe| recipe.recipe_id).collect::<HashSet<_>>();

		assert_eq!(ids.len(), corpus.len());

		for (a, b) in corpus.iter().zip(curated_corpus().iter()) {
			assert_eq!(a.recipe_id, b.recipe_id);
		}
	}

	#[test]
	fn curated_recipes_start_with_the_neutral_rating() {
		for recipe in curated_corpus() {
			assert_eq!(recipe.rating.count, 0);
			assert_eq!(recipe.rating.average, nosh_domain::NEUTRAL_RATING);
		}
	}
}
