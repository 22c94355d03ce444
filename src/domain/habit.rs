use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::completion::CompletionRecord;
use crate::domain::types::{CategoryName, Frequency, HabitId, HabitName, UserId};

/// Canonical habit record owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    pub name: HabitName,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub category: Option<CategoryName>,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Habit`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHabit {
    pub user_id: UserId,
    pub name: HabitName,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub category: Option<CategoryName>,
    pub created_at: NaiveDateTime,
}

/// Partial update applied to an existing habit.
///
/// Outer `None` leaves a field untouched; for the nullable fields an inner
/// `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitChanges {
    pub name: Option<HabitName>,
    pub description: Option<Option<String>>,
    pub frequency: Option<Frequency>,
    pub category: Option<Option<CategoryName>>,
}

impl HabitChanges {
    /// True when the update would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.frequency.is_none()
            && self.category.is_none()
    }
}

/// A habit together with its completion history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct HabitWithCompletions {
    pub habit: Habit,
    pub completions: Vec<CompletionRecord>,
}
