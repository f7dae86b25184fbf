use uuid::Uuid;

use nosh_domain::{ModerationStatus, Review};

use crate::{Error, ModerationUpdate, Result, db::Db, models};

pub async fn create_review(db: &Db, review: &Review) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO reviews (
	review_id,
	recipe_id,
	user_id,
	rating,
	comment,
	status,
	moderator_id,
	moderated_at,
	notes,
	created_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)",
	)
	.bind(review.review_id)
	.bind(review.recipe_id)
	.bind(review.user_id)
	.bind(review.rating)
	.bind(review.comment.as_deref())
	.bind(review.status.as_str())
	.bind(review.moderator_id)
	.bind(review.moderated_at)
	.bind(review.notes.as_deref())
	.bind(review.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn get_review(db: &Db, recipe_id: Uuid, review_id: Uuid) -> Result<Option<Review>> {
	let row = sqlx::query("SELECT * FROM reviews WHERE review_id = $1 AND recipe_id = $2")
		.bind(review_id)
		.bind(recipe_id)
		.fetch_optional(&db.pool)
		.await?;

	row.as_ref().map(models::review_from_row).transpose()
}

pub async fn list_reviews(
	db: &Db,
	recipe_id: Uuid,
	limit: u32,
	status: Option<ModerationStatus>,
) -> Result<Vec<Review>> {
	let rows = match status {
		Some(status) => {
			sqlx::query(
				"\
SELECT * FROM reviews
WHERE recipe_id = $1 AND status = $2
ORDER BY created_at DESC, review_id
LIMIT $3",
			)
			.bind(recipe_id)
			.bind(status.as_str())
			.bind(limit as i64)
			.fetch_all(&db.pool)
			.await?
		},
		None => {
			sqlx::query(
				"\
SELECT * FROM reviews
WHERE recipe_id = $1
ORDER BY created_at DESC, review_id
LIMIT $2",
			)
			.bind(recipe_id)
			.bind(limit as i64)
			.fetch_all(&db.pool)
			.await?
		},
	};

	rows.iter().map(models::review_from_row).collect()
}

pub async fn set_review_moderation(db: &Db, update: &ModerationUpdate) -> Result<()> {
	let result = sqlx::query(
		"\
UPDATE reviews
SET
	status = $1,
	moderator_id = $2,
	moderated_at = $3,
	notes = $4
WHERE review_id = $5 AND recipe_id = $6",
	)
	.bind(update.status.as_str())
	.bind(update.moderator_id)
	.bind(update.moderated_at)
	.bind(update.notes.as_deref())
	.bind(update.review_id)
	.bind(update.recipe_id)
	.execute(&db.pool)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!(
			"Review {} for recipe {} does not exist.",
			update.review_id, update.recipe_id
		)));
	}

	Ok(())
}

pub async fn approved_ratings(db: &Db, recipe_id: Uuid) -> Result<Vec<i32>> {
	let ratings: Vec<(i32,)> = sqlx::query_as(
		"\
SELECT rating FROM reviews
WHERE recipe_id = $1 AND status = 'approved'
ORDER BY created_at, review_id",
	)
	.bind(recipe_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(ratings.into_iter().map(|(rating,)| rating).collect())
}
