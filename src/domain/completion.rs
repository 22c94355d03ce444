use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::period::PeriodKey;
use crate::domain::types::{CompletionId, HabitId, UserId};

/// One recorded completion of a habit for one period.
///
/// The pair `(habit_id, period)` is unique in the ledger; records are
/// immutable once created and only ever removed by cascading habit deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub period: PeriodKey,
    pub completed_at: NaiveDateTime,
}

/// Data required to append a completion fact to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCompletion {
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub period: PeriodKey,
    pub completed_at: NaiveDateTime,
}
