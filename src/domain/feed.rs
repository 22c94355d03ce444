use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::period::PeriodKey;
use crate::domain::types::{CategoryName, HabitId, HabitName, UserId, Username};

/// One entry of the activity feed: a completion by a followed user, enriched
/// with identity and habit context plus counters derived from the ledger at
/// query time. Never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeedEntry {
    pub user_id: UserId,
    pub username: Username,
    pub full_name: String,
    pub habit_id: HabitId,
    pub habit_name: HabitName,
    pub category: Option<CategoryName>,
    pub period: PeriodKey,
    pub completed_at: NaiveDateTime,
    /// All-time completion count for the habit, independent of the window.
    pub total_completions: i64,
    /// Distinct period keys recorded within 30 days of the habit's most
    /// recent completion. The window anchors to the latest completion, not
    /// to the query time.
    pub recent_activity_count: i64,
}
