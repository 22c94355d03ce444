use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::completion::CompletionRecord;
use crate::domain::habit::{Habit, HabitWithCompletions};

/// One recorded completion as returned to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionDto {
    pub id: i32,
    pub habit_id: i32,
    pub date: NaiveDate,
    pub completed_at: NaiveDateTime,
}

impl From<CompletionRecord> for CompletionDto {
    fn from(value: CompletionRecord) -> Self {
        Self {
            id: value.id.get(),
            habit_id: value.habit_id.get(),
            date: value.period.into(),
            completed_at: value.completed_at,
        }
    }
}

/// A habit with its completion history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HabitDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
    pub completions: Vec<CompletionDto>,
}

impl HabitDto {
    pub fn with_completions(habit: Habit, completions: Vec<CompletionRecord>) -> Self {
        let mut dto = Self::from(habit);
        dto.completions = completions.into_iter().map(Into::into).collect();
        dto
    }
}

impl From<Habit> for HabitDto {
    fn from(value: Habit) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description,
            frequency: value.frequency.into(),
            category: value.category.map(Into::into),
            created_at: value.created_at,
            completions: Vec::new(),
        }
    }
}

impl From<HabitWithCompletions> for HabitDto {
    fn from(value: HabitWithCompletions) -> Self {
        Self::with_completions(value.habit, value.completions)
    }
}
