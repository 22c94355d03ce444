use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::completion::CompletionRecord;
use crate::domain::habit::{Habit, HabitChanges, HabitWithCompletions, NewHabit};
use crate::domain::types::{HabitId, UserId};
use crate::models::habit::{
    Habit as DbHabit, HabitChangeset as DbHabitChangeset, NewHabit as DbNewHabit,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, HabitReader, HabitWriter, lower};

impl HabitReader for DieselRepository {
    fn list_habits(&self, owner: UserId) -> RepositoryResult<Vec<HabitWithCompletions>> {
        use crate::schema::{habit_completions, habits};

        let mut conn = self.conn()?;

        let rows = habits::table
            .filter(habits::user_id.eq(owner.get()))
            .order(habits::created_at.desc())
            .load::<DbHabit>(&mut conn)?;

        let ids = rows.iter().map(|h| h.id).collect::<Vec<i32>>();
        let completions = habit_completions::table
            .filter(habit_completions::habit_id.eq_any(&ids))
            .order(habit_completions::date.desc())
            .load::<crate::models::completion::Completion>(&mut conn)?;

        let mut by_habit: HashMap<i32, Vec<CompletionRecord>> = HashMap::new();
        for completion in completions {
            let habit_id = completion.habit_id;
            by_habit
                .entry(habit_id)
                .or_default()
                .push(completion.try_into()?);
        }

        rows.into_iter()
            .map(|row| {
                let completions = by_habit.remove(&row.id).unwrap_or_default();
                Ok(HabitWithCompletions {
                    habit: row.try_into()?,
                    completions,
                })
            })
            .collect()
    }

    fn get_habit(&self, id: HabitId, owner: UserId) -> RepositoryResult<Option<Habit>> {
        use crate::schema::habits;

        let mut conn = self.conn()?;

        let habit = habits::table
            .filter(habits::id.eq(id.get()))
            .filter(habits::user_id.eq(owner.get()))
            .first::<DbHabit>(&mut conn)
            .optional()?;

        let habit = habit.map(TryInto::try_into).transpose()?;
        Ok(habit)
    }

    fn find_habit_by_name(&self, owner: UserId, name: &str) -> RepositoryResult<Option<Habit>> {
        use crate::schema::habits;

        let mut conn = self.conn()?;

        let habit = habits::table
            .filter(habits::user_id.eq(owner.get()))
            .filter(lower(habits::name).eq(name.to_lowercase()))
            .first::<DbHabit>(&mut conn)
            .optional()?;

        let habit = habit.map(TryInto::try_into).transpose()?;
        Ok(habit)
    }
}

impl HabitWriter for DieselRepository {
    fn create_habit(&self, habit: &NewHabit) -> RepositoryResult<Habit> {
        use crate::schema::habits;

        let mut conn = self.conn()?;
        let db_habit: DbNewHabit = habit.clone().into();

        let created = diesel::insert_into(habits::table)
            .values(db_habit)
            .get_result::<DbHabit>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_habit(
        &self,
        id: HabitId,
        owner: UserId,
        changes: &HabitChanges,
    ) -> RepositoryResult<Habit> {
        use crate::schema::habits;

        let mut conn = self.conn()?;
        let changeset: DbHabitChangeset = changes.clone().into();

        let updated = diesel::update(
            habits::table
                .filter(habits::id.eq(id.get()))
                .filter(habits::user_id.eq(owner.get())),
        )
        .set(changeset)
        .get_result::<DbHabit>(&mut conn)?;

        Ok(updated.try_into()?)
    }

    fn delete_habit(&self, id: HabitId, owner: UserId) -> RepositoryResult<usize> {
        use crate::schema::habits;

        let mut conn = self.conn()?;

        // Completions cascade via the schema's foreign key.
        let affected = diesel::delete(
            habits::table
                .filter(habits::id.eq(id.get()))
                .filter(habits::user_id.eq(owner.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
