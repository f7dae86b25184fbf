use qdrant_client::qdrant::{PointId, Query, QueryPointsBuilder, point_id::PointIdOptions};
use uuid::Uuid;

use crate::{BoxFuture, IndexMatch, Result, VectorIndex};

pub struct QdrantIndex {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl QdrantIndex {
	pub fn new(cfg: &nosh_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	async fn query_points(&self, vector: &[f32], top_k: u32) -> Result<Vec<IndexMatch>> {
		let search = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector.to_vec()))
			.limit(u64::from(top_k));
		let response = self.client.query(search).await?;
		let mut out = Vec::with_capacity(response.result.len());

		for point in response.result {
			let Some(recipe_id) = point.id.as_ref().and_then(point_id_to_uuid) else {
				tracing::warn!("Vector index returned a point without a UUID id.");

				continue;
			};

			out.push(IndexMatch { recipe_id, score: point.score });
		}

		Ok(out)
	}
}
impl VectorIndex for QdrantIndex {
	fn query<'a>(
		&'a self,
		vector: &'a [f32],
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<IndexMatch>>> {
		Box::pin(self.query_points(vector, top_k))
	}
}

fn point_id_to_uuid(point_id: &PointId) -> Option<Uuid> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Uuid::parse_str(id).ok(),
		_ => None,
	}
}
