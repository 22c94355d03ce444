use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller has no valid authenticated identity.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource is absent or not owned by the caller.
    #[error("not found")]
    NotFound,
    /// A uniqueness rule rejected the operation: duplicate completion for
    /// the period, duplicate follow edge, or duplicate habit name.
    #[error("{0}")]
    Conflict(String),
    /// A request form failed validation.
    #[error("{0}")]
    Form(String),
    /// A value violated a domain type constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
