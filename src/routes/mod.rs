use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod habits;
pub mod social;
pub mod users;

/// Translate a service error into the JSON error response the API exposes.
pub fn error_response(e: ServiceError) -> HttpResponse {
    let body = json!({ "error": e.to_string() });
    match e {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Internal => HttpResponse::InternalServerError().json(body),
    }
}
