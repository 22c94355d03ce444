use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};

/// User account as seen by this service. Account management lives elsewhere;
/// we only read users for feed, search and profile enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub full_name: String,
    pub created_at: NaiveDateTime,
}

/// A user as returned by search, flagged with the viewer's follow state.
#[derive(Debug, Clone, Serialize)]
pub struct UserSearchResult {
    pub user: User,
    pub is_following: bool,
}

/// Aggregated profile counters for a single user.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user: User,
    pub total_habits: i64,
    pub total_completions: i64,
    pub is_following: bool,
}
