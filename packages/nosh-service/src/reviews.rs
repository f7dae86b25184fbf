use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use nosh_domain::{ModerationStatus, RatingAggregate, Review, review::rating_in_range};
use nosh_storage::ModerationUpdate;

use crate::{NoshService, ServiceError, ServiceResult};

pub const DEFAULT_REVIEW_PAGE: u32 = 50;
pub const MAX_REVIEW_PAGE: u32 = 200;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
	pub recipe_id: Uuid,
	pub user_id: Uuid,
	pub rating: i32,
	pub comment: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateReviewRequest {
	pub recipe_id: Uuid,
	pub review_id: Uuid,
	/// Raw status string from the caller; validated against the known
	/// lifecycle states.
	pub status: String,
	pub moderator_id: Uuid,
	pub notes: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsRequest {
	pub recipe_id: Uuid,
	pub limit: Option<u32>,
	pub status: Option<String>,
}

impl NoshService {
	/// Persists a pending review. The recipe's aggregate is untouched until a
	/// moderator approves it.
	pub async fn submit_review(&self, req: SubmitReviewRequest) -> ServiceResult<Review> {
		if !rating_in_range(req.rating) {
			return Err(ServiceError::InvalidRequest {
				message: format!("Rating {} is outside the 1..=5 scale.", req.rating),
			});
		}
		if self.store.get_recipe(req.recipe_id).await?.is_none() {
			return Err(ServiceError::NotFound {
				message: format!("Recipe {} does not exist.", req.recipe_id),
			});
		}

		let review = Review {
			review_id: Uuid::new_v4(),
			recipe_id: req.recipe_id,
			user_id: req.user_id,
			rating: req.rating,
			comment: req.comment,
			status: ModerationStatus::Pending,
			moderator_id: None,
			moderated_at: None,
			notes: None,
			created_at: OffsetDateTime::now_utc(),
		};

		self.store.create_review(&review).await?;

		info!(
			review_id = %review.review_id,
			recipe_id = %review.recipe_id,
			"Review submitted, pending moderation."
		);

		Ok(review)
	}

	/// Applies a moderation decision and recomputes the recipe's aggregate.
	/// Re-applying the review's current status is a no-op; any actual
	/// transition, including back to pending, records the moderator and
	/// timestamp.
	pub async fn moderate_review(&self, req: ModerateReviewRequest) -> ServiceResult<Review> {
		let Some(status) = ModerationStatus::parse(&req.status) else {
			return Err(ServiceError::InvalidRequest {
				message: format!("Unrecognized moderation status {:?}.", req.status),
			});
		};
		let lock = self.rating_lock(req.recipe_id);
		let _guard = lock.lock().await;
		let Some(mut review) = self.store.get_review(req.recipe_id, req.review_id).await? else {
			return Err(ServiceError::NotFound {
				message: format!(
					"Review {} for recipe {} does not exist.",
					req.review_id, req.recipe_id
				),
			});
		};

		if review.status == status {
			return Ok(review);
		}

		let moderated_at = OffsetDateTime::now_utc();

		self.store
			.set_review_moderation(ModerationUpdate {
				recipe_id: req.recipe_id,
				review_id: req.review_id,
				status,
				moderator_id: req.moderator_id,
				notes: req.notes.clone(),
				moderated_at,
			})
			.await?;
		self.recount_rating_locked(req.recipe_id).await?;

		info!(
			review_id = %req.review_id,
			recipe_id = %req.recipe_id,
			status = status.as_str(),
			"Review moderated."
		);

		review.status = status;
		review.moderator_id = Some(req.moderator_id);
		review.moderated_at = Some(moderated_at);
		review.notes = req.notes;

		Ok(review)
	}

	/// Full recount of a recipe's aggregate from its approved reviews,
	/// serialized per recipe so concurrent moderations cannot interleave the
	/// read-recount-write sequence.
	pub async fn recompute_rating(&self, recipe_id: Uuid) -> ServiceResult<RatingAggregate> {
		let lock = self.rating_lock(recipe_id);
		let _guard = lock.lock().await;

		self.recount_rating_locked(recipe_id).await
	}

	pub async fn list_reviews(&self, req: ListReviewsRequest) -> ServiceResult<Vec<Review>> {
		let status = match req.status.as_deref() {
			Some(raw) => {
				Some(ModerationStatus::parse(raw).ok_or_else(|| ServiceError::InvalidRequest {
					message: format!("Unrecognized moderation status {raw:?}."),
				})?)
			},
			None => None,
		};
		let limit = req.limit.unwrap_or(DEFAULT_REVIEW_PAGE).clamp(1, MAX_REVIEW_PAGE);

		Ok(self.store.list_reviews(req.recipe_id, limit, status).await?)
	}

	// Caller must hold the recipe's rating lock.
	async fn recount_rating_locked(&self, recipe_id: Uuid) -> ServiceResult<RatingAggregate> {
		let ratings = self.store.approved_ratings(recipe_id).await?;
		let aggregate = RatingAggregate::recompute(&ratings);

		self.store.set_rating_aggregate(recipe_id, aggregate).await?;

		Ok(aggregate)
	}
}
