use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
	pub review_id: Uuid,
	pub recipe_id: Uuid,
	pub user_id: Uuid,
	pub rating: i32,
	pub comment: Option<String>,
	#[serde(rename = "moderationStatus")]
	pub status: ModerationStatus,
	pub moderator_id: Option<Uuid>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub moderated_at: Option<OffsetDateTime>,
	pub notes: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

/// Lifecycle state of a review. Only `Approved` reviews contribute to a
/// recipe's aggregate rating.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
	Pending,
	Approved,
	Rejected,
}
impl ModerationStatus {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"pending" => Some(Self::Pending),
			"approved" => Some(Self::Approved),
			"rejected" => Some(Self::Rejected),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		}
	}
}

pub fn rating_in_range(rating: i32) -> bool {
	(MIN_RATING..=MAX_RATING).contains(&rating)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_known_statuses_only() {
		assert_eq!(ModerationStatus::parse("pending"), Some(ModerationStatus::Pending));
		assert_eq!(ModerationStatus::parse("approved"), Some(ModerationStatus::Approved));
		assert_eq!(ModerationStatus::parse("rejected"), Some(ModerationStatus::Rejected));
		assert_eq!(ModerationStatus::parse("Approved"), None);
		assert_eq!(ModerationStatus::parse("published"), None);
	}

	#[test]
	fn round_trips_as_str() {
		for status in
			[ModerationStatus::Pending, ModerationStatus::Approved, ModerationStatus::Rejected]
		{
			assert_eq!(ModerationStatus::parse(status.as_str()), Some(status));
		}
	}

	#[test]
	fn rating_bounds_are_inclusive() {
		assert!(rating_in_range(1));
		assert!(rating_in_range(5));
		assert!(!rating_in_range(0));
		assert!(!rating_in_range(6));
	}
}
