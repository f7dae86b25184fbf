use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// One embedding call. Vectors are returned in input order and the producing
/// model identifier is attached so callers can enforce the
/// never-compare-across-models invariant.
#[derive(Clone, Debug)]
pub struct EmbeddingBatch {
	pub model: String,
	pub vectors: Vec<Vec<f32>>,
}

pub async fn embed(
	cfg: &nosh_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<EmbeddingBatch> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_embedding_response(&cfg.model, json)
}

fn parse_embedding_response(requested_model: &str, json: Value) -> Result<EmbeddingBatch> {
	let model = json
		.get("model")
		.and_then(|v| v.as_str())
		.unwrap_or(requested_model)
		.to_string();
	let data = json
		.get("data")
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Embedding response is missing data array."))?;

	// Providers may stream items out of order; the response index, not the
	// array position, pairs a vector with its input text.
	let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());
	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let embedding = item
			.get("embedding")
			.and_then(|v| v.as_array())
			.ok_or_else(|| eyre::eyre!("Embedding item missing embedding array."))?;
		let mut vec = Vec::with_capacity(embedding.len());
		for value in embedding {
			let number =
				value.as_f64().ok_or_else(|| eyre::eyre!("Embedding value must be numeric."))?;
			vec.push(number as f32);
		}
		indexed.push((index, vec));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(EmbeddingBatch { model, vectors: indexed.into_iter().map(|(_, vec)| vec).collect() })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_embeddings_in_index_order() {
		let json = serde_json::json!({
			"model": "text-embedding-3-small",
			"data": [
				{ "index": 1, "embedding": [2.0, 3.0] },
				{ "index": 0, "embedding": [0.5, 1.5] }
			]
		});
		let parsed = parse_embedding_response("text-embedding-3-small", json)
			.expect("parse failed");

		assert_eq!(parsed.model, "text-embedding-3-small");
		assert_eq!(parsed.vectors.len(), 2);
		assert_eq!(parsed.vectors[0], vec![0.5, 1.5]);
		assert_eq!(parsed.vectors[1], vec![2.0, 3.0]);
	}

	#[test]
	fn missing_model_field_falls_back_to_requested_model() {
		let json = serde_json::json!({
			"data": [{ "index": 0, "embedding": [1.0] }]
		});
		let parsed = parse_embedding_response("m", json).expect("parse failed");

		assert_eq!(parsed.model, "m");
	}

	#[test]
	fn rejects_response_without_data_array() {
		let json = serde_json::json!({ "error": { "message": "rate limited" } });

		assert!(parse_embedding_response("m", json).is_err());
	}
}
