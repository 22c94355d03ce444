use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::feed::ActivityFeedEntry;
use crate::domain::follow::{FollowEdge, FollowListEntry};
use crate::domain::user::{UserProfile, UserSearchResult};

/// A user as returned by search.
#[derive(Debug, Clone, Serialize)]
pub struct UserSearchDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub created_at: NaiveDateTime,
    pub is_following: bool,
}

impl From<UserSearchResult> for UserSearchDto {
    fn from(value: UserSearchResult) -> Self {
        Self {
            id: value.user.id.get(),
            username: value.user.username.into_inner(),
            full_name: value.user.full_name,
            created_at: value.user.created_at,
            is_following: value.is_following,
        }
    }
}

/// A follow edge as returned after a successful follow.
#[derive(Debug, Clone, Serialize)]
pub struct FollowDto {
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<FollowEdge> for FollowDto {
    fn from(value: FollowEdge) -> Self {
        Self {
            id: value.id.get(),
            follower_id: value.follower_id.get(),
            following_id: value.following_id.get(),
            created_at: value.created_at,
        }
    }
}

/// A user on a following/followers listing.
#[derive(Debug, Clone, Serialize)]
pub struct FollowListEntryDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub followed_at: NaiveDateTime,
}

impl From<FollowListEntry> for FollowListEntryDto {
    fn from(value: FollowListEntry) -> Self {
        Self {
            id: value.user.id.get(),
            username: value.user.username.into_inner(),
            full_name: value.user.full_name,
            followed_at: value.followed_at,
        }
    }
}

/// One activity feed entry.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntryDto {
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    pub habit_id: i32,
    pub habit_name: String,
    pub category: Option<String>,
    pub date: NaiveDate,
    pub completed_at: NaiveDateTime,
    pub total_completions: i64,
    pub recent_activity_count: i64,
}

impl From<ActivityFeedEntry> for FeedEntryDto {
    fn from(value: ActivityFeedEntry) -> Self {
        Self {
            user_id: value.user_id.get(),
            username: value.username.into_inner(),
            full_name: value.full_name,
            habit_id: value.habit_id.get(),
            habit_name: value.habit_name.into_inner(),
            category: value.category.map(Into::into),
            date: value.period.into(),
            completed_at: value.completed_at,
            total_completions: value.total_completions,
            recent_activity_count: value.recent_activity_count,
        }
    }
}

/// A user profile with aggregate counters.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub created_at: NaiveDateTime,
    pub total_habits: i64,
    pub total_completions: i64,
    pub is_following: bool,
}

impl From<UserProfile> for UserProfileDto {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.user.id.get(),
            username: value.user.username.into_inner(),
            full_name: value.user.full_name,
            created_at: value.user.created_at,
            total_habits: value.total_habits,
            total_completions: value.total_completions,
            is_following: value.is_following,
        }
    }
}
