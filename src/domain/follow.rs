use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{FollowId, UserId};
use crate::domain::user::User;

/// Directed follow relationship: `follower_id` observes `following_id`.
///
/// At most one edge exists per ordered pair and self-edges are rejected
/// before storage is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowEdge {
    pub id: FollowId,
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`FollowEdge`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFollow {
    pub follower_id: UserId,
    pub following_id: UserId,
    pub created_at: NaiveDateTime,
}

/// A user on a following/followers list with the edge creation time.
#[derive(Debug, Clone, Serialize)]
pub struct FollowListEntry {
    pub user: User,
    pub followed_at: NaiveDateTime,
}
