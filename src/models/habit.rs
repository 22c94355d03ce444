use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::habit::{
    Habit as DomainHabit, HabitChanges as DomainHabitChanges, NewHabit as DomainNewHabit,
};
use crate::domain::types::{CategoryName, Frequency, HabitName, TypeConstraintError};

/// Diesel model representing the `habits` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::habits)]
pub struct Habit {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Habit`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::habits)]
pub struct NewHabit {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub frequency: String,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Partial-update changeset for [`Habit`]. Outer `None` skips the column;
/// `Some(None)` writes NULL to a nullable column.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::habits, treat_none_as_null = false)]
pub struct HabitChangeset {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<String>,
    pub category: Option<Option<String>>,
}

impl From<DomainHabitChanges> for HabitChangeset {
    fn from(changes: DomainHabitChanges) -> Self {
        Self {
            name: changes.name.map(HabitName::into_inner),
            description: changes.description,
            frequency: changes.frequency.map(Into::into),
            category: changes
                .category
                .map(|category| category.map(CategoryName::into_inner)),
        }
    }
}

impl TryFrom<Habit> for DomainHabit {
    type Error = TypeConstraintError;

    fn try_from(habit: Habit) -> Result<Self, Self::Error> {
        Ok(Self {
            id: habit.id.try_into()?,
            user_id: habit.user_id.try_into()?,
            name: HabitName::new(habit.name)?,
            description: habit.description,
            frequency: Frequency::try_from(habit.frequency.as_str())?,
            category: habit.category.map(CategoryName::new).transpose()?,
            created_at: habit.created_at,
        })
    }
}

impl From<DomainNewHabit> for NewHabit {
    fn from(habit: DomainNewHabit) -> Self {
        Self {
            user_id: habit.user_id.get(),
            name: habit.name.into_inner(),
            description: habit.description,
            frequency: habit.frequency.into(),
            category: habit.category.map(CategoryName::into_inner),
            created_at: habit.created_at,
        }
    }
}
