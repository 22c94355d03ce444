use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::habit::{HabitChanges, NewHabit};
use crate::domain::types::{CategoryName, Frequency, HabitName, TypeConstraintError, UserId};

/// Turn an optional free-text field into an update instruction: absent means
/// leave untouched, blank means clear, anything else sets the trimmed value.
fn optional_text(value: Option<String>) -> Option<Option<String>> {
    value.map(|text| {
        let trimmed = text.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    })
}

#[derive(Deserialize, Validate)]
pub struct CreateHabitForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub frequency: String,
    #[validate(length(max = 50))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateHabitFormPayload {
    pub name: HabitName,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub category: Option<CategoryName>,
}

impl CreateHabitFormPayload {
    pub fn into_new_habit(self, user_id: UserId, now: NaiveDateTime) -> NewHabit {
        NewHabit {
            user_id,
            name: self.name,
            description: self.description,
            frequency: self.frequency,
            category: self.category,
            created_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateHabitFormError {
    #[error("Create habit form validation failed: {0}")]
    Validation(String),
    #[error("Create habit form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateHabitFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateHabitFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateHabitForm> for CreateHabitFormPayload {
    type Error = CreateHabitFormError;

    fn try_from(value: CreateHabitForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: HabitName::new(value.name)?,
            description: optional_text(value.description).flatten(),
            frequency: Frequency::try_from(value.frequency.as_str())?,
            category: optional_text(value.category)
                .flatten()
                .map(CategoryName::new)
                .transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateHabitForm {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateHabitFormPayload {
    pub changes: HabitChanges,
}

#[derive(Debug, Error)]
pub enum UpdateHabitFormError {
    #[error("Update habit form validation failed: {0}")]
    Validation(String),
    #[error("Update habit form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateHabitFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateHabitFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateHabitForm> for UpdateHabitFormPayload {
    type Error = UpdateHabitFormError;

    fn try_from(value: UpdateHabitForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let changes = HabitChanges {
            name: value.name.map(HabitName::new).transpose()?,
            description: optional_text(value.description),
            frequency: value
                .frequency
                .as_deref()
                .map(Frequency::try_from)
                .transpose()?,
            category: optional_text(value.category)
                .map(|category| category.map(CategoryName::new).transpose())
                .transpose()?,
        };

        Ok(Self { changes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_form_parses_and_trims() {
        let form = CreateHabitForm {
            name: "  Morning run  ".to_string(),
            description: Some("   ".to_string()),
            frequency: "daily".to_string(),
            category: Some(" Health ".to_string()),
        };

        let payload = CreateHabitFormPayload::try_from(form).unwrap();
        assert_eq!(payload.name, "Morning run");
        assert_eq!(payload.description, None);
        assert_eq!(payload.frequency, Frequency::Daily);
        assert_eq!(payload.category.unwrap(), "Health");
    }

    #[test]
    fn create_form_rejects_unknown_frequency() {
        let form = CreateHabitForm {
            name: "Read".to_string(),
            description: None,
            frequency: "monthly".to_string(),
            category: None,
        };

        let err = CreateHabitFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, CreateHabitFormError::TypeConstraint(_)));
    }

    #[test]
    fn update_form_blank_category_clears_it() {
        let form = UpdateHabitForm {
            name: None,
            description: None,
            frequency: None,
            category: Some("  ".to_string()),
        };

        let payload = UpdateHabitFormPayload::try_from(form).unwrap();
        assert_eq!(payload.changes.category, Some(None));
        assert!(payload.changes.name.is_none());
    }

    #[test]
    fn update_form_with_no_fields_is_empty() {
        let form = UpdateHabitForm {
            name: None,
            description: None,
            frequency: None,
            category: None,
        };

        let payload = UpdateHabitFormPayload::try_from(form).unwrap();
        assert!(payload.changes.is_empty());
    }
}
