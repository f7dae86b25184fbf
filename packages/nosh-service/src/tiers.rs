use std::{collections::HashMap, sync::Arc};

use tokio::task::JoinSet;
use tracing::warn;
use uuid::Uuid;

use nosh_domain::{Recipe, scoring::synthetic_fallback_score, similarity::cosine};
use nosh_storage::{RecipeStore, VectorIndex, models::RecipeEmbedding};

use crate::{BoxFuture, ServiceResult};

/// Embeddings are scanned in parallel above this count; below it the spawn
/// overhead exceeds the cosine work.
const SCAN_CHUNK: usize = 256;

/// A retrieval candidate before constraint filtering and rating adjustment.
#[derive(Clone, Debug)]
pub struct ScoredRecipe {
	pub recipe: Recipe,
	pub similarity: f32,
}

/// One rung of the degradation ladder. A tier produces scored, unfiltered
/// candidates for a query vector; the search pipeline filters, re-scores, and
/// ranks them, and moves to the next rung when a tier errors or every
/// candidate is filtered out.
pub trait RetrievalTier
where
	Self: Send + Sync,
{
	fn name(&self) -> &'static str;

	/// Whether final scores apply the rating multiplier. Synthetic fallback
	/// scores already encode a total order and stay as-is.
	fn rating_boost(&self) -> bool {
		true
	}

	fn fetch<'a>(
		&'a self,
		query: &'a [f32],
		limit: u32,
	) -> BoxFuture<'a, ServiceResult<Vec<ScoredRecipe>>>;
}

/// Tier 1: nearest neighbors from the managed vector index, joined against
/// the catalog. Over-fetches by `candidate_multiplier` so the constraint
/// filter has headroom.
pub struct VectorIndexTier {
	pub index: Arc<dyn VectorIndex>,
	pub store: Arc<dyn RecipeStore>,
	pub candidate_multiplier: u32,
}
impl VectorIndexTier {
	async fn run(&self, query: &[f32], limit: u32) -> ServiceResult<Vec<ScoredRecipe>> {
		let top_k = self.candidate_multiplier.saturating_mul(limit);
		let matches = self.index.query(query, top_k).await?;

		if matches.is_empty() {
			return Ok(Vec::new());
		}

		let ids = matches.iter().map(|hit| hit.recipe_id).collect::<Vec<_>>();
		let recipes = self.store.get_recipes(&ids).await?;
		let by_id = recipes
			.into_iter()
			.map(|recipe| (recipe.recipe_id, recipe))
			.collect::<HashMap<Uuid, Recipe>>();
		let mut out = Vec::with_capacity(matches.len());

		for hit in matches {
			let Some(recipe) = by_id.get(&hit.recipe_id) else {
				warn!(recipe_id = %hit.recipe_id, "Index hit has no catalog row, dropping stale point.");

				continue;
			};

			out.push(ScoredRecipe { recipe: recipe.clone(), similarity: hit.score });
		}

		Ok(out)
	}
}
impl RetrievalTier for VectorIndexTier {
	fn name(&self) -> &'static str {
		"vector-index"
	}

	fn fetch<'a>(
		&'a self,
		query: &'a [f32],
		limit: u32,
	) -> BoxFuture<'a, ServiceResult<Vec<ScoredRecipe>>> {
		Box::pin(self.run(query, limit))
	}
}

/// Tier 2: cosine similarity against every stored embedding whose model
/// matches the configured one. Stale embeddings from other models never mix
/// into the ranking.
pub struct ExhaustiveScanTier {
	pub store: Arc<dyn RecipeStore>,
	pub model: String,
}
impl ExhaustiveScanTier {
	async fn run(&self, query: &[f32]) -> ServiceResult<Vec<ScoredRecipe>> {
		let stored = self.store.list_embeddings().await?;
		let total = stored.len();
		let embeddings = stored
			.into_iter()
			.filter(|embedding| embedding.model == self.model)
			.collect::<Vec<_>>();
		let skipped = total - embeddings.len();

		if skipped > 0 {
			warn!(skipped, model = %self.model, "Skipped embeddings from other models.");
		}
		if embeddings.is_empty() {
			return Ok(Vec::new());
		}

		let scored = scan_similarities(query.to_vec(), embeddings).await;
		let ids = scored.iter().map(|(recipe_id, _)| *recipe_id).collect::<Vec<_>>();
		let recipes = self.store.get_recipes(&ids).await?;
		let by_id = recipes
			.into_iter()
			.map(|recipe| (recipe.recipe_id, recipe))
			.collect::<HashMap<Uuid, Recipe>>();
		let mut out = Vec::with_capacity(scored.len());

		for (recipe_id, similarity) in scored {
			// An embedding whose recipe row is gone is skipped, same as a
			// stale index point.
			let Some(recipe) = by_id.get(&recipe_id) else {
				continue;
			};

			out.push(ScoredRecipe { recipe: recipe.clone(), similarity });
		}

		Ok(out)
	}
}
impl RetrievalTier for ExhaustiveScanTier {
	fn name(&self) -> &'static str {
		"exhaustive-scan"
	}

	fn fetch<'a>(
		&'a self,
		query: &'a [f32],
		_limit: u32,
	) -> BoxFuture<'a, ServiceResult<Vec<ScoredRecipe>>> {
		Box::pin(self.run(query))
	}
}

/// Tier 3: the curated corpus with synthetic position-based scores. Scores
/// are assigned before filtering, so surviving items keep the score of their
/// corpus position. Never fails.
pub struct StaticFallbackTier {
	pub corpus: Arc<Vec<Recipe>>,
	pub base_score: f32,
	pub score_step: f32,
}
impl RetrievalTier for StaticFallbackTier {
	fn name(&self) -> &'static str {
		"static-fallback"
	}

	fn rating_boost(&self) -> bool {
		false
	}

	fn fetch<'a>(
		&'a self,
		_query: &'a [f32],
		_limit: u32,
	) -> BoxFuture<'a, ServiceResult<Vec<ScoredRecipe>>> {
		Box::pin(async move {
			Ok(self
				.corpus
				.iter()
				.enumerate()
				.map(|(position, recipe)| ScoredRecipe {
					recipe: recipe.clone(),
					similarity: synthetic_fallback_score(
						self.base_score,
						self.score_step,
						position,
					),
				})
				.collect())
		})
	}
}

/// Chunked parallel cosine scan. Results are reduced back into input order so
/// downstream stable sorting stays deterministic regardless of task
/// completion order.
async fn scan_similarities(query: Vec<f32>, embeddings: Vec<RecipeEmbedding>) -> Vec<(Uuid, f32)> {
	if embeddings.len() <= SCAN_CHUNK {
		return embeddings
			.iter()
			.map(|embedding| (embedding.recipe_id, cosine(&query, &embedding.vec)))
			.collect();
	}

	let query = Arc::new(query);
	let mut tasks = JoinSet::new();

	for (chunk_index, chunk) in embeddings.chunks(SCAN_CHUNK).enumerate() {
		let query = query.clone();
		let chunk = chunk.to_vec();

		tasks.spawn(async move {
			let scored = chunk
				.iter()
				.map(|embedding| (embedding.recipe_id, cosine(&query, &embedding.vec)))
				.collect::<Vec<_>>();

			(chunk_index, scored)
		});
	}

	let mut chunks = Vec::new();

	while let Some(joined) = tasks.join_next().await {
		match joined {
			Ok(chunk) => chunks.push(chunk),
			Err(err) => warn!("Similarity scan task failed: {err}"),
		}
	}

	chunks.sort_by_key(|(chunk_index, _)| *chunk_index);

	chunks.into_iter().flat_map(|(_, scored)| scored).collect()
}

#[cfg(test)]
mod tests {
	use time::OffsetDateTime;

	use super::*;

	fn embedding(recipe_id: Uuid, vec: Vec<f32>) -> RecipeEmbedding {
		RecipeEmbedding {
			embedding_id: Uuid::new_v4(),
			recipe_id,
			model: "m".to_string(),
			vec,
			created_at: OffsetDateTime::now_utc(),
		}
	}

	#[tokio::test]
	async fn scan_preserves_input_order_above_chunk_threshold() {
		let ids = (0..(SCAN_CHUNK * 3 + 7)).map(|_| Uuid::new_v4()).collect::<Vec<_>>();
		let embeddings =
			ids.iter().map(|id| embedding(*id, vec![1.0, 0.0])).collect::<Vec<_>>();
		let scored = scan_similarities(vec![0.0, 1.0], embeddings).await;

		assert_eq!(scored.len(), ids.len());

		for (id, (scored_id, similarity)) in ids.iter().zip(&scored) {
			assert_eq!(id, scored_id);
			assert_eq!(*similarity, 0.0);
		}
	}

	#[tokio::test]
	async fn scan_computes_cosine_per_embedding() {
		let a = Uuid::new_v4();
		let b = Uuid::new_v4();
		let scored = scan_similarities(
			vec![1.0, 0.0],
			vec![embedding(a, vec![1.0, 0.0]), embedding(b, vec![0.0, 1.0])],
		)
		.await;

		assert_eq!(scored, vec![(a, 1.0), (b, 0.0)]);
	}
}
