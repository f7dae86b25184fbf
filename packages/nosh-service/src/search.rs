use tracing::{debug, warn};

use nosh_domain::{
	Recipe, RecipeFilters,
	query::build_query_text,
	scoring::{cmp_score_desc, rating_adjusted},
};

use crate::{
	NoshService, ServiceError, ServiceResult,
	tiers::{ExhaustiveScanTier, RetrievalTier, StaticFallbackTier, VectorIndexTier},
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	#[serde(flatten)]
	pub filters: RecipeFilters,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
	pub recipe: Recipe,
	/// Raw similarity as produced by the serving tier, before the rating
	/// multiplier.
	pub similarity: f32,
	pub score: f32,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	/// Name of the tier that produced the items, for observability. "none"
	/// when every tier came back empty after filtering.
	pub tier: String,
	pub items: Vec<SearchItem>,
}

impl NoshService {
	/// Runs the full pipeline: compose query text, embed it, walk the
	/// retrieval tiers until one yields candidates that survive the
	/// constraint filter, then score, rank, and truncate.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let SearchRequest { filters } = req;
		let limit = self.clamp_limit(filters.limit);
		let query_text = build_query_text(&filters);
		// Embedding failure is not a search failure: the static corpus can
		// still serve, so the vector tiers are simply skipped.
		let query_vector = match self.embed_query(&query_text).await {
			Ok(vector) => Some(vector),
			Err(err) => {
				warn!("Embedding unavailable, degrading to the fallback corpus: {err}");

				None
			},
		};
		let tiers = self.retrieval_tiers(query_vector.is_some());
		let query_vector = query_vector.unwrap_or_default();

		for tier in &tiers {
			let mut candidates = match tier.fetch(&query_vector, limit).await {
				Ok(candidates) => candidates,
				Err(err) => {
					warn!(tier = tier.name(), "Retrieval tier failed, trying the next: {err}");

					continue;
				},
			};

			candidates.retain(|candidate| filters.matches(&candidate.recipe));

			if candidates.is_empty() {
				debug!(tier = tier.name(), "No candidates survived the filter, trying the next.");

				continue;
			}

			let mut items = candidates
				.into_iter()
				.map(|candidate| {
					let score = if tier.rating_boost() {
						rating_adjusted(candidate.similarity, candidate.recipe.rating.average)
					} else {
						candidate.similarity
					};

					SearchItem { recipe: candidate.recipe, similarity: candidate.similarity, score }
				})
				.collect::<Vec<_>>();

			items.sort_by(|a, b| cmp_score_desc(a.score, b.score));
			items.truncate(limit as usize);

			return Ok(SearchResponse { tier: tier.name().to_string(), items });
		}

		Ok(SearchResponse { tier: "none".to_string(), items: Vec::new() })
	}

	fn retrieval_tiers(&self, have_vector: bool) -> Vec<Box<dyn RetrievalTier>> {
		let mut tiers: Vec<Box<dyn RetrievalTier>> = Vec::new();

		if have_vector {
			if let Some(index) = &self.index {
				tiers.push(Box::new(VectorIndexTier {
					index: index.clone(),
					store: self.store.clone(),
					candidate_multiplier: self.cfg.search.candidate_multiplier,
				}));
			}

			tiers.push(Box::new(ExhaustiveScanTier {
				store: self.store.clone(),
				model: self.cfg.providers.embedding.model.clone(),
			}));
		}
		if self.cfg.search.fallback.enabled {
			tiers.push(Box::new(StaticFallbackTier {
				corpus: self.fallback_corpus(),
				base_score: self.cfg.search.fallback.base_score,
				score_step: self.cfg.search.fallback.score_step,
			}));
		}

		tiers
	}

	async fn embed_query(&self, text: &str) -> ServiceResult<Vec<f32>> {
		let cfg = &self.cfg.providers.embedding;
		let batch = self.providers.embedding.embed(cfg, &[text.to_string()]).await?;

		if batch.model != cfg.model {
			return Err(ServiceError::Provider {
				message: format!(
					"Embedding provider answered with model {}, expected {}.",
					batch.model, cfg.model
				),
			});
		}

		let Some(vector) = batch.vectors.into_iter().next() else {
			return Err(ServiceError::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != cfg.dimensions as usize {
			return Err(ServiceError::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vector)
	}
}
