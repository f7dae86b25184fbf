//! In-memory fakes for the storage seams, so service behavior can be tested
//! without Postgres or Qdrant.

use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use time::OffsetDateTime;
use uuid::Uuid;

use nosh_domain::{
	EcoRating, MacroNutrients, MicroNutrients, ModerationStatus, RatingAggregate, Recipe, Review,
	Sustainability,
};
use nosh_storage::{
	BoxFuture, Error, IndexMatch, ModerationUpdate, RecipeStore, Result, VectorIndex,
	models::RecipeEmbedding,
};

/// Catalog + review ledger backed by hash maps. Iteration order for
/// embeddings and recipes follows insertion order, mirroring the Postgres
/// queries' deterministic `ORDER BY` clauses.
#[derive(Default)]
pub struct MemoryStore {
	inner: Mutex<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
	recipes: Vec<Recipe>,
	embeddings: Vec<RecipeEmbedding>,
	reviews: Vec<Review>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
		let store = Self::new();

		{
			let mut inner = store.inner.lock().unwrap_or_else(|err| err.into_inner());

			inner.recipes = recipes;
		}

		store
	}

	pub fn add_recipe(&self, recipe: Recipe) {
		let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

		inner.recipes.push(recipe);
	}

	pub fn add_embedding(&self, embedding: RecipeEmbedding) {
		let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

		inner.embeddings.push(embedding);
	}

	/// Snapshot of a recipe's stored aggregate, for invariant assertions.
	pub fn rating_of(&self, recipe_id: Uuid) -> Option<RatingAggregate> {
		let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

		inner.recipes.iter().find(|recipe| recipe.recipe_id == recipe_id).map(|r| r.rating)
	}

	pub fn review_count(&self) -> usize {
		let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

		inner.reviews.len()
	}
}

impl RecipeStore for MemoryStore {
	fn get_recipe(&self, recipe_id: Uuid) -> BoxFuture<'_, Result<Option<Recipe>>> {
		Box::pin(async move {
			let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			Ok(inner.recipes.iter().find(|recipe| recipe.recipe_id == recipe_id).cloned())
		})
	}

	fn get_recipes<'a>(&'a self, recipe_ids: &'a [Uuid]) -> BoxFuture<'a, Result<Vec<Recipe>>> {
		Box::pin(async move {
			let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			Ok(inner
				.recipes
				.iter()
				.filter(|recipe| recipe_ids.contains(&recipe.recipe_id))
				.cloned()
				.collect())
		})
	}

	fn upsert_recipe<'a>(&'a self, recipe: &'a Recipe) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			match inner.recipes.iter_mut().find(|r| r.recipe_id == recipe.recipe_id) {
				Some(existing) => *existing = recipe.clone(),
				None => inner.recipes.push(recipe.clone()),
			}

			Ok(())
		})
	}

	fn list_embeddings(&self) -> BoxFuture<'_, Result<Vec<RecipeEmbedding>>> {
		Box::pin(async move {
			let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			Ok(inner.embeddings.clone())
		})
	}

	fn upsert_embedding<'a>(&'a self, embedding: &'a RecipeEmbedding) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			match inner
				.embeddings
				.iter_mut()
				.find(|e| e.recipe_id == embedding.recipe_id && e.model == embedding.model)
			{
				Some(existing) => *existing = embedding.clone(),
				None => inner.embeddings.push(embedding.clone()),
			}

			let embedding_id = embedding.embedding_id;

			if let Some(recipe) =
				inner.recipes.iter_mut().find(|r| r.recipe_id == embedding.recipe_id)
			{
				recipe.embedding_id = Some(embedding_id);
			}

			Ok(())
		})
	}

	fn list_reviews(
		&self,
		recipe_id: Uuid,
		limit: u32,
		status: Option<ModerationStatus>,
	) -> BoxFuture<'_, Result<Vec<Review>>> {
		Box::pin(async move {
			let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());
			let mut reviews = inner
				.reviews
				.iter()
				.filter(|review| review.recipe_id == recipe_id)
				.filter(|review| status.map(|wanted| review.status == wanted).unwrap_or(true))
				.cloned()
				.collect::<Vec<_>>();

			// Same order as the Postgres query: newest first, review id as
			// the tie breaker.
			reviews.sort_by(|a, b| {
				b.created_at.cmp(&a.created_at).then_with(|| a.review_id.cmp(&b.review_id))
			});
			reviews.truncate(limit as usize);

			Ok(reviews)
		})
	}

	fn create_review<'a>(&'a self, review: &'a Review) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			inner.reviews.push(review.clone());

			Ok(())
		})
	}

	fn get_review(
		&self,
		recipe_id: Uuid,
		review_id: Uuid,
	) -> BoxFuture<'_, Result<Option<Review>>> {
		Box::pin(async move {
			let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			Ok(inner
				.reviews
				.iter()
				.find(|review| review.review_id == review_id && review.recipe_id == recipe_id)
				.cloned())
		})
	}

	fn set_review_moderation(&self, update: ModerationUpdate) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());
			let Some(review) = inner.reviews.iter_mut().find(|review| {
				review.review_id == update.review_id && review.recipe_id == update.recipe_id
			}) else {
				return Err(Error::NotFound(format!(
					"Review {} for recipe {} does not exist.",
					update.review_id, update.recipe_id
				)));
			};

			review.status = update.status;
			review.moderator_id = Some(update.moderator_id);
			review.moderated_at = Some(update.moderated_at);
			review.notes = update.notes.clone();

			Ok(())
		})
	}

	fn approved_ratings(&self, recipe_id: Uuid) -> BoxFuture<'_, Result<Vec<i32>>> {
		Box::pin(async move {
			let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			Ok(inner
				.reviews
				.iter()
				.filter(|review| {
					review.recipe_id == recipe_id && review.status == ModerationStatus::Approved
				})
				.map(|review| review.rating)
				.collect())
		})
	}

	fn set_rating_aggregate(
		&self,
		recipe_id: Uuid,
		aggregate: RatingAggregate,
	) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			if let Some(recipe) = inner.recipes.iter_mut().find(|r| r.recipe_id == recipe_id) {
				recipe.rating = aggregate;
			}

			Ok(())
		})
	}
}

/// Scripted vector index: returns a fixed match list, or an injected error to
/// exercise tier degradation. Counts queries so tests can assert which tiers
/// ran.
#[derive(Default)]
pub struct ScriptedIndex {
	matches: Vec<IndexMatch>,
	fail: bool,
	queries: AtomicUsize,
}
impl ScriptedIndex {
	pub fn with_matches(matches: Vec<IndexMatch>) -> Self {
		Self { matches, fail: false, queries: AtomicUsize::new(0) }
	}

	pub fn empty() -> Self {
		Self::default()
	}

	pub fn failing() -> Self {
		Self { matches: Vec::new(), fail: true, queries: AtomicUsize::new(0) }
	}

	pub fn query_count(&self) -> usize {
		self.queries.load(Ordering::SeqCst)
	}
}
impl VectorIndex for ScriptedIndex {
	fn query<'a>(
		&'a self,
		_vector: &'a [f32],
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<IndexMatch>>> {
		Box::pin(async move {
			self.queries.fetch_add(1, Ordering::SeqCst);

			if self.fail {
				return Err(Error::InvalidArgument("Injected index failure.".to_string()));
			}

			Ok(self.matches.iter().copied().take(top_k as usize).collect())
		})
	}
}

/// Minimal valid recipe for fixtures; override fields as needed.
pub fn recipe_fixture(title: &str, cuisine: &str) -> Recipe {
	Recipe {
		recipe_id: Uuid::new_v4(),
		title: title.to_string(),
		cuisine: cuisine.to_string(),
		meal_type: "dinner".to_string(),
		servings: 2,
		prep_minutes: 10,
		cook_minutes: 20,
		summary: format!("{title} summary."),
		instructions: format!("Prepare {title}."),
		dietary_tags: Vec::new(),
		allergens: Vec::new(),
		macros: MacroNutrients {
			calories: 500.0,
			protein: 25.0,
			carbs: 55.0,
			fats: 15.0,
			fiber: 9.0,
		},
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

pub fn embedding_fixture(recipe_id: Uuid, model: &str, vec: Vec<f32>) -> RecipeEmbedding {
	RecipeEmbedding {
		embedding_id: Uuid::new_v4(),
		recipe_id,
		model: model.to_string(),
		vec,
		created_at: OffsetDateTime::now_utc(),
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn review_at(recipe_id: Uuid, created_at: OffsetDateTime) -> Review {
		Review {
			review_id: Uuid::new_v4(),
			recipe_id,
			user_id: Uuid::new_v4(),
			rating: 4,
			comment: None,
			status: ModerationStatus::Pending,
			moderator_id: None,
			moderated_at: None,
			notes: None,
			created_at,
		}
	}

	#[tokio::test]
	async fn list_reviews_matches_the_postgres_order() {
		let store = MemoryStore::new();
		let recipe_id = Uuid::new_v4();
		let old = review_at(recipe_id, datetime!(2026-01-01 00:00 UTC));
		let new = review_at(recipe_id, datetime!(2026-02-01 00:00 UTC));

		// Newest inserted last, so insertion order and listing order differ.
		store.create_review(&old).await.expect("create failed");
		store.create_review(&new).await.expect("create failed");

		let listed = store.list_reviews(recipe_id, 10, None).await.expect("list failed");

		assert_eq!(listed.len(), 2);
		assert_eq!(listed[0].review_id, new.review_id);
		assert_eq!(listed[1].review_id, old.review_id);

		// The limit cuts after ordering, keeping the newest.
		let limited = store.list_reviews(recipe_id, 1, None).await.expect("list failed");

		assert_eq!(limited.len(), 1);
		assert_eq!(limited[0].review_id, new.review_id);
	}
}

