use serde_json::json;
use uuid::Uuid;

use nosh_domain::{RatingAggregate, Recipe};

use crate::{
	Result,
	db::Db,
	models::{self, RecipeEmbedding},
};

pub async fn get_recipe(db: &Db, recipe_id: Uuid) -> Result<Option<Recipe>> {
	let row = sqlx::query("SELECT * FROM recipes WHERE recipe_id = $1")
		.bind(recipe_id)
		.fetch_optional(&db.pool)
		.await?;

	row.as_ref().map(models::recipe_from_row).transpose()
}

pub async fn get_recipes(db: &Db, recipe_ids: &[Uuid]) -> Result<Vec<Recipe>> {
	if recipe_ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query("SELECT * FROM recipes WHERE recipe_id = ANY($1)")
		.bind(recipe_ids)
		.fetch_all(&db.pool)
		.await?;

	rows.iter().map(models::recipe_from_row).collect()
}

pub async fn upsert_recipe(db: &Db, recipe: &Recipe) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO recipes (
	recipe_id,
	title,
	cuisine,
	meal_type,
	servings,
	prep_minutes,
	cook_minutes,
	summary,
	instructions,
	dietary_tags,
	allergens,
	macros,
	micros,
	sustainability,
	rating_sum,
	rating_count,
	rating_average,
	embedding_id
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18)
ON CONFLICT (recipe_id) DO UPDATE
SET
	title = EXCLUDED.title,
	cuisine = EXCLUDED.cuisine,
	meal_type = EXCLUDED.meal_type,
	servings = EXCLUDED.servings,
	prep_minutes = EXCLUDED.prep_minutes,
	cook_minutes = EXCLUDED.cook_minutes,
	summary = EXCLUDED.summary,
	instructions = EXCLUDED.instructions,
	dietary_tags = EXCLUDED.dietary_tags,
	allergens = EXCLUDED.allergens,
	macros = EXCLUDED.macros,
	micros = EXCLUDED.micros,
	sustainability = EXCLUDED.sustainability,
	embedding_id = EXCLUDED.embedding_id,
	updated_at = now()",
	)
	.bind(recipe.recipe_id)
	.bind(recipe.title.as_str())
	.bind(recipe.cuisine.as_str())
	.bind(recipe.meal_type.as_str())
	.bind(recipe.servings as i32)
	.bind(recipe.prep_minutes as i32)
	.bind(recipe.cook_minutes as i32)
	.bind(recipe.summary.as_str())
	.bind(recipe.instructions.as_str())
	.bind(json!(recipe.dietary_tags))
	.bind(json!(recipe.allergens))
	.bind(json!(recipe.macros))
	.bind(json!(recipe.micros))
	.bind(json!(recipe.sustainability))
	.bind(recipe.rating.sum)
	.bind(recipe.rating.count as i32)
	.bind(recipe.rating.average)
	.bind(recipe.embedding_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn list_embeddings(db: &Db) -> Result<Vec<RecipeEmbedding>> {
	let rows = sqlx::query(
		"SELECT embedding_id, recipe_id, model, vec, created_at FROM recipe_embeddings \
		 ORDER BY created_at, embedding_id",
	)
	.fetch_all(&db.pool)
	.await?;

	rows.iter().map(models::embedding_from_row).collect()
}

pub async fn upsert_embedding(db: &Db, embedding: &RecipeEmbedding) -> Result<()> {
	let mut tx = db.pool.begin().await?;

	sqlx::query(
		"\
INSERT INTO recipe_embeddings (embedding_id, recipe_id, model, embedding_dim, vec)
VALUES ($1,$2,$3,$4,$5)
ON CONFLICT (recipe_id, model) DO UPDATE
SET
	embedding_dim = EXCLUDED.embedding_dim,
	vec = EXCLUDED.vec,
	created_at = now()",
	)
	.bind(embedding.embedding_id)
	.bind(embedding.recipe_id)
	.bind(embedding.model.as_str())
	.bind(embedding.vec.len() as i32)
	.bind(json!(embedding.vec))
	.execute(&mut *tx)
	.await?;

	sqlx::query("UPDATE recipes SET embedding_id = $1, updated_at = now() WHERE recipe_id = $2")
		.bind(embedding.embedding_id)
		.bind(embedding.recipe_id)
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

pub async fn set_rating_aggregate(
	db: &Db,
	recipe_id: Uuid,
	aggregate: RatingAggregate,
) -> Result<()> {
	sqlx::query(
		"\
UPDATE recipes
SET
	rating_sum = $1,
	rating_count = $2,
	rating_average = $3,
	updated_at = now()
WHERE recipe_id = $4",
	)
	.bind(aggregate.sum)
	.bind(aggregate.count as i32)
	.bind(aggregate.average)
	.bind(recipe_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}
