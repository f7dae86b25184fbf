use serde_json::Value;
use sqlx::{Row, postgres::PgRow};
use time::OffsetDateTime;
use uuid::Uuid;

use nosh_domain::{
	MacroNutrients, MicroNutrients, ModerationStatus, RatingAggregate, Recipe, Review,
	Sustainability,
};

use crate::{Error, Result};

/// A stored recipe embedding. `model` identifies the producing embedding
/// model; vectors with different model ids must never be compared.
#[derive(Clone, Debug)]
pub struct RecipeEmbedding {
	pub embedding_id: Uuid,
	pub recipe_id: Uuid,
	pub model: String,
	pub vec: Vec<f32>,
	pub created_at: OffsetDateTime,
}

pub(crate) fn recipe_from_row(row: &PgRow) -> Result<Recipe> {
	let dietary_tags: Value = row.try_get("dietary_tags")?;
	let allergens: Value = row.try_get("allergens")?;
	let macros: Value = row.try_get("macros")?;
	let micros: Value = row.try_get("micros")?;
	let sustainability: Value = row.try_get("sustainability")?;

	Ok(Recipe {
		recipe_id: row.try_get("recipe_id")?,
		title: row.try_get("title")?,
		cuisine: row.try_get("cuisine")?,
		meal_type: row.try_get("meal_type")?,
		servings: row.try_get::<i32, _>("servings")? as u32,
		prep_minutes: row.try_get::<i32, _>("prep_minutes")? as u32,
		cook_minutes: row.try_get::<i32, _>("cook_minutes")? as u32,
		summary: row.try_get("summary")?,
		instructions: row.try_get("instructions")?,
		dietary_tags: decode_json("dietary_tags", dietary_tags)?,
		allergens: decode_json("allergens", allergens)?,
		macros: decode_json::<MacroNutrients>("macros", macros)?,
		micros: decode_json::<MicroNutrients>("micros", micros)?,
		sustainability: decode_json::<Sustainability>("sustainability", sustainability)?,
		rating: RatingAggregate {
			sum: row.try_get("rating_sum")?,
			count: row.try_get::<i32, _>("rating_count")? as u32,
			average: row.try_get("rating_average")?,
		},
		embedding_id: row.try_get("embedding_id")?,
	})
}

pub(crate) fn review_from_row(row: &PgRow) -> Result<Review> {
	let status: String = row.try_get("status")?;
	let status = ModerationStatus::parse(&status).ok_or_else(|| {
		Error::InvalidArgument(format!("Stored review has unknown status {status:?}."))
	})?;

	Ok(Review {
		review_id: row.try_get("review_id")?,
		recipe_id: row.try_get("recipe_id")?,
		user_id: row.try_get("user_id")?,
		rating: row.try_get("rating")?,
		comment: row.try_get("comment")?,
		status,
		moderator_id: row.try_get("moderator_id")?,
		moderated_at: row.try_get("moderated_at")?,
		notes: row.try_get("notes")?,
		created_at: row.try_get("created_at")?,
	})
}

pub(crate) fn embedding_from_row(row: &PgRow) -> Result<RecipeEmbedding> {
	let vec: Value = row.try_get("vec")?;

	Ok(RecipeEmbedding {
		embedding_id: row.try_get("embedding_id")?,
		recipe_id: row.try_get("recipe_id")?,
		model: row.try_get("model")?,
		vec: decode_json("vec", vec)?,
		created_at: row.try_get("created_at")?,
	})
}

pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(
	column: &'static str,
	value: Value,
) -> Result<T> {
	serde_json::from_value(value).map_err(|err| Error::Decode { column, source: err })
}
