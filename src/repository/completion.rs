use diesel::prelude::*;

use crate::domain::completion::{CompletionRecord, NewCompletion};
use crate::domain::period::PeriodKey;
use crate::domain::types::HabitId;
use crate::models::completion::{Completion as DbCompletion, NewCompletion as DbNewCompletion};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CompletionReader, CompletionWriter, DieselRepository};

impl CompletionReader for DieselRepository {
    fn list_completions(&self, habit_id: HabitId) -> RepositoryResult<Vec<CompletionRecord>> {
        use crate::schema::habit_completions;

        let mut conn = self.conn()?;

        let rows = habit_completions::table
            .filter(habit_completions::habit_id.eq(habit_id.get()))
            .order(habit_completions::date.desc())
            .load::<DbCompletion>(&mut conn)?;

        let rows = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CompletionRecord>, _>>()?;
        Ok(rows)
    }

    fn list_periods_desc(&self, habit_id: HabitId) -> RepositoryResult<Vec<PeriodKey>> {
        use crate::schema::habit_completions;

        let mut conn = self.conn()?;

        let dates = habit_completions::table
            .filter(habit_completions::habit_id.eq(habit_id.get()))
            .select(habit_completions::date)
            .order(habit_completions::date.desc())
            .load::<chrono::NaiveDate>(&mut conn)?;

        Ok(dates.into_iter().map(Into::into).collect())
    }

    fn count_completions(&self, habit_id: HabitId) -> RepositoryResult<i64> {
        use crate::schema::habit_completions;

        let mut conn = self.conn()?;

        let count = habit_completions::table
            .filter(habit_completions::habit_id.eq(habit_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}

impl CompletionWriter for DieselRepository {
    /// Single atomic insert against the `(habit_id, date)` uniqueness
    /// constraint, with no existence pre-check. SQLite serializes writers,
    /// so of two racing calls exactly one row is inserted and the loser
    /// surfaces as a unique violation.
    fn record_completion(&self, completion: &NewCompletion) -> RepositoryResult<CompletionRecord> {
        use crate::schema::habit_completions;

        let mut conn = self.conn()?;
        let db_completion: DbNewCompletion = completion.clone().into();

        let created = diesel::insert_into(habit_completions::table)
            .values(db_completion)
            .get_result::<DbCompletion>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
