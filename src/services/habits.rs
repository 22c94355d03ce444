use chrono::NaiveDateTime;

use crate::auth::AuthenticatedUser;
use crate::domain::period::PeriodKey;
use crate::domain::stats::{self, HabitStats};
use crate::domain::types::{Frequency, HabitId};
use crate::dto::habits::{CompletionDto, HabitDto};
use crate::forms::habits::{CreateHabitFormPayload, UpdateHabitFormPayload};
use crate::repository::{CompletionReader, CompletionWriter, HabitReader, HabitWriter};

use super::{ServiceError, ServiceResult};

/// List the caller's habits, newest first, with their completion histories.
pub fn list_habits<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<HabitDto>>
where
    R: HabitReader,
{
    let user_id = user.user_id()?;

    match repo.list_habits(user_id) {
        Ok(habits) => Ok(habits.into_iter().map(HabitDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list habits: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_habit<R>(
    habit_id: HabitId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<HabitDto>
where
    R: HabitReader + CompletionReader,
{
    let user_id = user.user_id()?;

    let habit = match repo.get_habit(habit_id, user_id) {
        Ok(Some(habit)) => habit,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get habit: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let completions = match repo.list_completions(habit_id) {
        Ok(completions) => completions,
        Err(e) => {
            log::error!("Failed to list completions: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(HabitDto::with_completions(habit, completions))
}

pub fn create_habit<R>(
    payload: CreateHabitFormPayload,
    now: NaiveDateTime,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<HabitDto>
where
    R: HabitReader + HabitWriter,
{
    let user_id = user.user_id()?;

    match repo.find_habit_by_name(user_id, payload.name.as_str()) {
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(
                "You already have a habit with this name".to_string(),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to check habit name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let habit = payload.into_new_habit(user_id, now);
    match repo.create_habit(&habit) {
        Ok(created) => Ok(created.into()),
        Err(e) => {
            log::error!("Failed to create habit: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_habit<R>(
    habit_id: HabitId,
    payload: UpdateHabitFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<HabitDto>
where
    R: HabitReader + HabitWriter,
{
    let user_id = user.user_id()?;

    let existing = match repo.get_habit(habit_id, user_id) {
        Ok(Some(habit)) => habit,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get habit: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let changes = payload.changes;
    if changes.is_empty() {
        return Err(ServiceError::Form("No fields to update".to_string()));
    }

    // Renames must not collide with another habit of the same owner.
    if let Some(name) = &changes.name
        && !name.as_str().eq_ignore_ascii_case(existing.name.as_str())
    {
        match repo.find_habit_by_name(user_id, name.as_str()) {
            Ok(Some(other)) if other.id != habit_id => {
                return Err(ServiceError::Conflict(
                    "You already have a habit with this name".to_string(),
                ));
            }
            Ok(_) => {}
            Err(e) => {
                log::error!("Failed to check habit name: {e}");
                return Err(ServiceError::Internal);
            }
        }
    }

    match repo.update_habit(habit_id, user_id, &changes) {
        Ok(updated) => Ok(updated.into()),
        Err(e) => {
            log::error!("Failed to update habit: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_habit<R>(habit_id: HabitId, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: HabitWriter,
{
    let user_id = user.user_id()?;

    match repo.delete_habit(habit_id, user_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete habit: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Record a completion of `habit_id` for the period containing `now`.
///
/// Ownership is checked before any period resolution. The write itself is a
/// single atomic insert-if-absent; the losing side of a duplicate-period race
/// comes back as a unique violation and is reported as a conflict.
pub fn complete_habit<R>(
    habit_id: HabitId,
    now: NaiveDateTime,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CompletionDto>
where
    R: HabitReader + CompletionWriter,
{
    let user_id = user.user_id()?;

    let habit = match repo.get_habit(habit_id, user_id) {
        Ok(Some(habit)) => habit,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get habit: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let period = PeriodKey::resolve(habit.frequency, now.date());
    let completion = crate::domain::completion::NewCompletion {
        habit_id,
        user_id,
        period,
        completed_at: now,
    };

    match repo.record_completion(&completion) {
        Ok(record) => Ok(record.into()),
        Err(crate::repository::errors::RepositoryError::UniqueViolation(_)) => {
            let scope = match habit.frequency {
                Frequency::Daily => "today",
                Frequency::Weekly => "this week",
            };
            Err(ServiceError::Conflict(format!(
                "This habit has already been completed for {scope}"
            )))
        }
        Err(e) => {
            log::error!("Failed to record completion: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Recompute streak, totals and completion rate from the full ledger.
pub fn habit_stats<R>(
    habit_id: HabitId,
    now: NaiveDateTime,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<HabitStats>
where
    R: HabitReader + CompletionReader,
{
    let user_id = user.user_id()?;

    let habit = match repo.get_habit(habit_id, user_id) {
        Ok(Some(habit)) => habit,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get habit: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let periods = match repo.list_periods_desc(habit_id) {
        Ok(periods) => periods,
        Err(e) => {
            log::error!("Failed to list completions: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let today = now.date();
    let current_streak = stats::current_streak(&periods, habit.frequency, today);
    let expected = stats::expected_completions(habit.created_at, habit.frequency, today);
    let actual = periods.len();

    Ok(HabitStats {
        current_streak,
        total_completions: actual,
        completion_rate: stats::completion_rate(expected, actual),
        expected_completions: expected,
    })
}
