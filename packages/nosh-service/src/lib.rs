pub mod fallback;
pub mod reviews;
pub mod search;
pub mod tiers;

use std::{
	collections::HashMap,
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex},
};

use uuid::Uuid;

use nosh_config::{Config, EmbeddingProviderConfig};
use nosh_domain::Recipe;
use nosh_providers::embedding::{self, EmbeddingBatch};
use nosh_storage::{RecipeStore, VectorIndex};

pub use reviews::{ListReviewsRequest, ModerateReviewRequest, SubmitReviewRequest};
pub use search::{SearchItem, SearchRequest, SearchResponse};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Query-embedding seam. The default implementation calls the configured
/// OpenAI-compatible endpoint; tests substitute a scripted provider.
pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<EmbeddingBatch>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	NotFound { message: String },
	Provider { message: String },
	Storage { message: String },
	Index { message: String },
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct NoshService {
	pub cfg: Config,
	pub store: Arc<dyn RecipeStore>,
	pub index: Option<Arc<dyn VectorIndex>>,
	pub providers: Providers,
	fallback_corpus: Arc<Vec<Recipe>>,
	// One writer per recipe for the read-recount-write aggregate sequence.
	rating_locks: Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>,
}

struct DefaultProviders;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::NotFound { message } => write!(f, "Not found: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
			Self::Index { message } => write!(f, "Index error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<nosh_storage::Error> for ServiceError {
	fn from(err: nosh_storage::Error) -> Self {
		match err {
			nosh_storage::Error::Qdrant(_) => Self::Index { message: err.to_string() },
			_ => Self::Storage { message: err.to_string() },
		}
	}
}

impl From<color_eyre::Report> for ServiceError {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<EmbeddingBatch>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

impl NoshService {
	pub fn new(
		cfg: Config,
		store: Arc<dyn RecipeStore>,
		index: Option<Arc<dyn VectorIndex>>,
	) -> Self {
		Self::with_providers(cfg, store, index, Providers::default())
	}

	pub fn with_providers(
		cfg: Config,
		store: Arc<dyn RecipeStore>,
		index: Option<Arc<dyn VectorIndex>>,
		providers: Providers,
	) -> Self {
		Self {
			cfg,
			store,
			index,
			providers,
			fallback_corpus: Arc::new(fallback::curated_corpus()),
			rating_locks: Mutex::new(HashMap::new()),
		}
	}

	/// Replaces the built-in curated corpus, e.g. with an operator-supplied
	/// list.
	pub fn set_fallback_corpus(&mut self, corpus: Vec<Recipe>) {
		self.fallback_corpus = Arc::new(corpus);
	}

	/// Looks up a recipe in the live catalog first, then in the static
	/// fallback corpus, since fallback results are also served to clients.
	pub async fn get_recipe(&self, recipe_id: Uuid) -> ServiceResult<Option<Recipe>> {
		if let Some(recipe) = self.store.get_recipe(recipe_id).await? {
			return Ok(Some(recipe));
		}

		Ok(self.fallback_corpus.iter().find(|recipe| recipe.recipe_id == recipe_id).cloned())
	}

	pub(crate) fn fallback_corpus(&self) -> Arc<Vec<Recipe>> {
		self.fallback_corpus.clone()
	}

	pub(crate) fn clamp_limit(&self, requested: Option<u32>) -> u32 {
		requested.unwrap_or(self.cfg.search.default_limit).clamp(1, self.cfg.search.max_limit)
	}

	pub(crate) fn rating_lock(&self, recipe_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
		let mut locks = self.rating_locks.lock().unwrap_or_else(|err| err.into_inner());

		locks.entry(recipe_id).or_default().clone()
	}
}
