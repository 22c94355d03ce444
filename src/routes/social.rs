use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::domain::types::UserId;
use crate::pagination::{DEFAULT_FEED_LIMIT, Pagination};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{self, ServiceError};

fn user_id(raw: i32) -> Result<UserId, ServiceError> {
    UserId::new(raw).map_err(Into::into)
}

#[derive(Deserialize, Debug)]
struct SearchQueryParams {
    q: String,
}

#[get("/users/search")]
pub async fn search_users(
    params: web::Query<SearchQueryParams>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let query = params.q.trim();
    if query.is_empty() {
        return error_response(ServiceError::Form(
            "Search query cannot be empty".to_string(),
        ));
    }

    let repo = DieselRepository::new(pool.get_ref().clone());

    match services::social::search_users(query, &user, &repo) {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => error_response(e),
    }
}

#[post("/follow/{user_id}")]
pub async fn follow_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = user_id(path.into_inner())
        .and_then(|target| services::social::follow_user(target, Utc::now().naive_utc(), &user, &repo));
    match result {
        Ok(edge) => HttpResponse::Created().json(edge),
        Err(e) => error_response(e),
    }
}

#[delete("/follow/{user_id}")]
pub async fn unfollow_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = user_id(path.into_inner())
        .and_then(|target| services::social::unfollow_user(target, &user, &repo));
    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Unfollowed successfully"
        })),
        Err(e) => error_response(e),
    }
}

#[get("/following")]
pub async fn following(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match services::social::following(&user, &repo) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => error_response(e),
    }
}

#[get("/followers")]
pub async fn followers(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match services::social::followers(&user, &repo) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize, Debug)]
struct FeedQueryParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[get("/feed")]
pub async fn activity_feed(
    params: web::Query<FeedQueryParams>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());
    let pagination = Pagination::new(
        params.limit.unwrap_or(DEFAULT_FEED_LIMIT),
        params.offset.unwrap_or(0),
    );

    match services::social::activity_feed(pagination, &user, &repo) {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => error_response(e),
    }
}
