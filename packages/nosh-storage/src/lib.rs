pub mod db;
pub mod models;
pub mod qdrant;
pub mod recipes;
pub mod reviews;
pub mod schema;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

use std::{future::Future, pin::Pin};

use time::OffsetDateTime;
use uuid::Uuid;

use nosh_domain::{ModerationStatus, RatingAggregate, Recipe, Review};

use crate::models::RecipeEmbedding;

/// A single nearest-neighbor hit from the vector index. Scores are assumed
/// already cosine-normalized to [0,1] by the index.
#[derive(Clone, Copy, Debug)]
pub struct IndexMatch {
	pub recipe_id: Uuid,
	pub score: f32,
}

#[derive(Clone, Debug)]
pub struct ModerationUpdate {
	pub recipe_id: Uuid,
	pub review_id: Uuid,
	pub status: ModerationStatus,
	pub moderator_id: Uuid,
	pub notes: Option<String>,
	pub moderated_at: OffsetDateTime,
}

/// Managed vector-index seam. The index is an optional collaborator: absence
/// and failure both degrade to the exhaustive scan.
pub trait VectorIndex
where
	Self: Send + Sync,
{
	fn query<'a>(&'a self, vector: &'a [f32], top_k: u32) -> BoxFuture<'a, Result<Vec<IndexMatch>>>;
}

/// Persistence seam for the recipe catalog, its embeddings, and the review
/// ledger. Implemented by the Postgres catalog here and by the in-memory
/// store in nosh-testkit.
pub trait RecipeStore
where
	Self: Send + Sync,
{
	fn get_recipe(&self, recipe_id: Uuid) -> BoxFuture<'_, Result<Option<Recipe>>>;
	fn get_recipes<'a>(&'a self, recipe_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Recipe>>>;
	fn upsert_recipe<'a>(&'a self, recipe: &'a Recipe) -> BoxFuture<'a, Result<()>>;
	fn list_embeddings(&self) -> BoxFuture<'_, Result<Vec<RecipeEmbedding>>>;
	fn upsert_embedding<'a>(&'a self, embedding: &'a RecipeEmbedding) -> BoxFuture<'a, Result<()>>;
	fn list_reviews(
		&self,
		recipe_id: Uuid,
		limit: u32,
		status: Option<ModerationStatus>,
	) -> BoxFuture<'_, Result<Vec<Review>>>;
	fn create_review<'a>(&'a self, review: &'a Review) -> BoxFuture<'a, Result<()>>;
	fn get_review(&self, recipe_id: Uuid, review_id: Uuid)
	-> BoxFuture<'_, Result<Option<Review>>>;
	fn set_review_moderation(&self, update: ModerationUpdate) -> BoxFuture<'_, Result<()>>;
	fn approved_ratings(&self, recipe_id: Uuid) -> BoxFuture<'_, Result<Vec<i32>>>;
	fn set_rating_aggregate(
		&self,
		recipe_id: Uuid,
		aggregate: RatingAggregate,
	) -> BoxFuture<'_, Result<()>>;
}

impl RecipeStore for db::Db {
	fn get_recipe(&self, recipe_id: Uuid) -> BoxFuture<'_, Result<Option<Recipe>>> {
		Box::pin(recipes::get_recipe(self, recipe_id))
	}

	fn get_recipes<'a>(&'a self, recipe_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Recipe>>> {
		Box::pin(recipes::get_recipes(self, recipe_ids))
	}

	fn upsert_recipe<'a>(&'a self, recipe: &'a Recipe) -> BoxFuture<'a, Result<()>> {
		Box::pin(recipes::upsert_recipe(self, recipe))
	}

	fn list_embeddings(&self) -> BoxFuture<'_, Result<Vec<RecipeEmbedding>>> {
		Box::pin(recipes::list_embeddings(self))
	}

	fn upsert_embedding<'a>(&'a self, embedding: &'a RecipeEmbedding) -> BoxFuture<'a, Result<()>> {
		Box::pin(recipes::upsert_embedding(self, embedding))
	}

	fn list_reviews(
		&self,
		recipe_id: Uuid,
		limit: u32,
		status: Option<ModerationStatus>,
	) -> BoxFuture<'_, Result<Vec<Review>>> {
		Box::pin(reviews::list_reviews(self, recipe_id, limit, status))
	}

	fn create_review<'a>(&'a self, review: &'a Review) -> BoxFuture<'a, Result<()>> {
		Box::pin(reviews::create_review(self, review))
	}

	fn get_review(
		&self,
		recipe_id: Uuid,
		review_id: Uuid,
	) -> BoxFuture<'_, Result<Option<Review>>> {
		Box::pin(reviews::get_review(self, recipe_id, review_id))
	}

	fn set_review_moderation(&self, update: ModerationUpdate) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move { reviews::set_review_moderation(self, &update).await })
	}

	fn approved_ratings(&self, recipe_id: Uuid) -> BoxFuture<'_, Result<Vec<i32>>> {
		Box::pin(reviews::approved_ratings(self, recipe_id))
	}

	fn set_rating_aggregate(
		&self,
		recipe_id: Uuid,
		aggregate: RatingAggregate,
	) -> BoxFuture<'_, Result<()>> {
		Box::pin(recipes::set_rating_aggregate(self, recipe_id, aggregate))
	}
}
