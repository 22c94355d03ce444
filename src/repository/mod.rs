use crate::db::{DbConnection, DbPool};
use crate::domain::completion::{CompletionRecord, NewCompletion};
use crate::domain::feed::ActivityFeedEntry;
use crate::domain::follow::{FollowEdge, FollowListEntry, NewFollow};
use crate::domain::habit::{Habit, HabitChanges, HabitWithCompletions, NewHabit};
use crate::domain::period::PeriodKey;
use crate::domain::types::{HabitId, UserId};
use crate::domain::user::{User, UserProfile, UserSearchResult};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod completion;
pub mod errors;
pub mod feed;
pub mod follow;
pub mod habit;
pub mod user;

diesel::define_sql_function! {
    /// SQL `LOWER`, used for case-insensitive name matching.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for habits.
pub trait HabitReader {
    /// List a user's habits, newest first, each with its completion history.
    fn list_habits(&self, owner: UserId) -> RepositoryResult<Vec<HabitWithCompletions>>;
    /// Retrieve a habit by id, scoped to its owner.
    fn get_habit(&self, id: HabitId, owner: UserId) -> RepositoryResult<Option<Habit>>;
    /// Case-insensitive lookup of a habit by name within one owner's habits.
    fn find_habit_by_name(&self, owner: UserId, name: &str) -> RepositoryResult<Option<Habit>>;
}

/// Write operations for habits.
pub trait HabitWriter {
    /// Persist a new habit and return the stored record.
    fn create_habit(&self, habit: &NewHabit) -> RepositoryResult<Habit>;
    /// Apply a partial update and return the updated record.
    fn update_habit(
        &self,
        id: HabitId,
        owner: UserId,
        changes: &HabitChanges,
    ) -> RepositoryResult<Habit>;
    /// Delete a habit and, by cascade, all of its completions.
    fn delete_habit(&self, id: HabitId, owner: UserId) -> RepositoryResult<usize>;
}

/// Read-only operations against the completion ledger.
pub trait CompletionReader {
    /// Full completion records of a habit, newest period first.
    fn list_completions(&self, habit_id: HabitId) -> RepositoryResult<Vec<CompletionRecord>>;
    /// Distinct period keys of a habit, sorted strictly descending.
    fn list_periods_desc(&self, habit_id: HabitId) -> RepositoryResult<Vec<PeriodKey>>;
    /// All-time completion count for a habit.
    fn count_completions(&self, habit_id: HabitId) -> RepositoryResult<i64>;
}

/// Append operations against the completion ledger.
pub trait CompletionWriter {
    /// Append a completion fact.
    ///
    /// Must be a single atomic insert-if-absent against the
    /// `(habit_id, period)` uniqueness invariant: of two concurrent calls for
    /// the same habit and period exactly one succeeds and the other fails
    /// with [`errors::RepositoryError::UniqueViolation`]. Implementations
    /// must not pre-check existence with a separate read.
    fn record_completion(&self, completion: &NewCompletion) -> RepositoryResult<CompletionRecord>;
}

/// Read-only operations for user accounts.
pub trait UserReader {
    /// Retrieve a user by id.
    fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>>;
    /// Case-insensitive substring search over usernames and full names,
    /// excluding the viewer, capped at 20 results.
    fn search_users(&self, viewer: UserId, query: &str)
    -> RepositoryResult<Vec<UserSearchResult>>;
    /// Profile with habit/completion counters and the viewer's follow state.
    fn get_profile(&self, viewer: UserId, id: UserId) -> RepositoryResult<Option<UserProfile>>;
}

/// Read-only operations over the follow graph.
pub trait FollowReader {
    /// Whether `follower` currently follows `following`.
    fn is_following(&self, follower: UserId, following: UserId) -> RepositoryResult<bool>;
    /// Ids of every user `user` follows.
    fn following_ids(&self, user: UserId) -> RepositoryResult<Vec<UserId>>;
    /// Users `user` follows, newest edge first.
    fn list_following(&self, user: UserId) -> RepositoryResult<Vec<FollowListEntry>>;
    /// Users following `user`, newest edge first.
    fn list_followers(&self, user: UserId) -> RepositoryResult<Vec<FollowListEntry>>;
}

/// Write operations over the follow graph.
pub trait FollowWriter {
    /// Insert a follow edge; duplicate pairs fail with a unique violation.
    fn create_follow(&self, follow: &NewFollow) -> RepositoryResult<FollowEdge>;
    /// Remove a follow edge, returning the number of rows deleted.
    fn delete_follow(&self, follower: UserId, following: UserId) -> RepositoryResult<usize>;
}

/// Read-only aggregation of followed users' completions.
pub trait FeedReader {
    /// Completions by users `user` follows, ordered by completion timestamp
    /// descending with insertion order breaking ties, paginated after
    /// ordering, each entry enriched with counters derived from the ledger.
    fn activity_feed(
        &self,
        user: UserId,
        pagination: Pagination,
    ) -> RepositoryResult<Vec<ActivityFeedEntry>>;
}
