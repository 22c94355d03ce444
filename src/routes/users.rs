use actix_web::{HttpResponse, Responder, get, web};

use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::domain::types::UserId;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services;

#[get("/{id}")]
pub async fn user_profile(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = UserId::new(path.into_inner())
        .map_err(Into::into)
        .and_then(|id| services::social::user_profile(id, &user, &repo));
    match result {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => error_response(e),
    }
}
