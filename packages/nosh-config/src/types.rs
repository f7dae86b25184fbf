use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	/// Optional. When absent, Tier-1 vector-index retrieval is skipped and the
	/// exhaustive scan becomes the first tier attempted.
	pub qdrant: Option<Qdrant>,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Result count when a request does not specify one.
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	/// Upper bound applied to any requested limit.
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	/// Tier-1 asks the index for `candidate_multiplier * limit` neighbors so
	/// the constraint filter has headroom.
	#[serde(default = "default_candidate_multiplier")]
	pub candidate_multiplier: u32,
	#[serde(default)]
	pub fallback: SearchFallback,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchFallback {
	pub enabled: bool,
	pub base_score: f32,
	pub score_step: f32,
}
impl Default for SearchFallback {
	fn default() -> Self {
		Self { enabled: true, base_score: 0.4, score_step: 0.01 }
	}
}

fn default_limit() -> u32 {
	10
}

fn default_max_limit() -> u32 {
	50
}

fn default_candidate_multiplier() -> u32 {
	3
}
