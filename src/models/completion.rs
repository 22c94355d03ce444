use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::completion::{
    CompletionRecord as DomainCompletion, NewCompletion as DomainNewCompletion,
};
use crate::domain::types::TypeConstraintError;

/// Diesel model representing the `habit_completions` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::habit_completions)]
pub struct Completion {
    pub id: i32,
    pub habit_id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub completed_at: NaiveDateTime,
}

/// Insertable form of [`Completion`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::habit_completions)]
pub struct NewCompletion {
    pub habit_id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub completed_at: NaiveDateTime,
}

impl TryFrom<Completion> for DomainCompletion {
    type Error = TypeConstraintError;

    fn try_from(completion: Completion) -> Result<Self, Self::Error> {
        Ok(Self {
            id: completion.id.try_into()?,
            habit_id: completion.habit_id.try_into()?,
            user_id: completion.user_id.try_into()?,
            period: completion.date.into(),
            completed_at: completion.completed_at,
        })
    }
}

impl From<DomainNewCompletion> for NewCompletion {
    fn from(completion: DomainNewCompletion) -> Self {
        Self {
            habit_id: completion.habit_id.get(),
            user_id: completion.user_id.get(),
            date: completion.period.into(),
            completed_at: completion.completed_at,
        }
    }
}
