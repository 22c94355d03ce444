//! Error conversion glue between form, domain and service error types.

use crate::domain::types::TypeConstraintError;
use crate::forms::habits::{CreateHabitFormError, UpdateHabitFormError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<CreateHabitFormError> for ServiceError {
    fn from(val: CreateHabitFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateHabitFormError> for ServiceError {
    fn from(val: UpdateHabitFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
