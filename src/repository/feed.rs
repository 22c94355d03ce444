use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use diesel::prelude::*;

use crate::domain::feed::ActivityFeedEntry;
use crate::domain::types::UserId;
use crate::models::completion::Completion as DbCompletion;
use crate::models::habit::Habit as DbHabit;
use crate::models::user::User as DbUser;
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, FeedReader};

/// Window for the recent-activity counter: distinct period keys within this
/// many days of a habit's most recent completion. The window anchors to the
/// latest completion, not to the query time.
const RECENT_ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Per-habit counters computed from the full set of recorded period keys.
fn habit_counters(dates: &[NaiveDate]) -> (i64, i64) {
    let total = dates.len() as i64;
    let recent = match dates.iter().max() {
        Some(&latest) => {
            let cutoff = latest - Duration::days(RECENT_ACTIVITY_WINDOW_DAYS);
            dates.iter().filter(|&&date| date >= cutoff).count() as i64
        }
        None => 0,
    };
    (total, recent)
}

impl FeedReader for DieselRepository {
    fn activity_feed(
        &self,
        user: UserId,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<ActivityFeedEntry>> {
        use crate::schema::{follows, habit_completions, habits, users};

        let mut conn = self.conn()?;

        let followed = follows::table
            .filter(follows::follower_id.eq(user.get()))
            .select(follows::following_id);

        let rows = habit_completions::table
            .inner_join(habits::table)
            .inner_join(users::table)
            .filter(habit_completions::user_id.eq_any(followed))
            .order((
                habit_completions::completed_at.desc(),
                habit_completions::id.asc(),
            ))
            .offset(pagination.offset)
            .limit(pagination.limit)
            .load::<(DbCompletion, DbHabit, DbUser)>(&mut conn)?;

        // Derived counters are recomputed from the ledger at query time, not
        // stored. Histories are small, so one pass over the dates of the
        // habits on this page is enough.
        let habit_ids = rows.iter().map(|(c, _, _)| c.habit_id).collect::<Vec<i32>>();
        let date_rows = habit_completions::table
            .filter(habit_completions::habit_id.eq_any(&habit_ids))
            .select((habit_completions::habit_id, habit_completions::date))
            .load::<(i32, NaiveDate)>(&mut conn)?;

        let mut dates_by_habit: HashMap<i32, Vec<NaiveDate>> = HashMap::new();
        for (habit_id, date) in date_rows {
            dates_by_habit.entry(habit_id).or_default().push(date);
        }

        rows.into_iter()
            .map(|(completion, habit, user)| {
                let dates = dates_by_habit
                    .get(&completion.habit_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let (total_completions, recent_activity_count) = habit_counters(dates);

                let habit: crate::domain::habit::Habit = habit.try_into()?;
                let user: crate::domain::user::User = user.try_into()?;

                Ok(ActivityFeedEntry {
                    user_id: user.id,
                    username: user.username,
                    full_name: user.full_name,
                    habit_id: habit.id,
                    habit_name: habit.name,
                    category: habit.category,
                    period: completion.date.into(),
                    completed_at: completion.completed_at,
                    total_completions,
                    recent_activity_count,
                })
            })
            .collect()
    }
}
