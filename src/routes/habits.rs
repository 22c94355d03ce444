use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::db::DbPool;
use crate::domain::types::HabitId;
use crate::forms::habits::{
    CreateHabitForm, CreateHabitFormPayload, UpdateHabitForm, UpdateHabitFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{self, ServiceError};

fn habit_id(raw: i32) -> Result<HabitId, ServiceError> {
    HabitId::new(raw).map_err(Into::into)
}

#[get("")]
pub async fn list_habits(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match services::habits::list_habits(&user, &repo) {
        Ok(habits) => HttpResponse::Ok().json(habits),
        Err(e) => error_response(e),
    }
}

#[get("/{id}")]
pub async fn get_habit(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = habit_id(path.into_inner())
        .and_then(|id| services::habits::get_habit(id, &user, &repo));
    match result {
        Ok(habit) => HttpResponse::Ok().json(habit),
        Err(e) => error_response(e),
    }
}

#[post("")]
pub async fn create_habit(
    form: web::Json<CreateHabitForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let payload = match CreateHabitFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    match services::habits::create_habit(payload, Utc::now().naive_utc(), &user, &repo) {
        Ok(habit) => HttpResponse::Created().json(habit),
        Err(e) => error_response(e),
    }
}

#[put("/{id}")]
pub async fn update_habit(
    path: web::Path<i32>,
    form: web::Json<UpdateHabitForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let payload = match UpdateHabitFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(e.into()),
    };

    let result = habit_id(path.into_inner())
        .and_then(|id| services::habits::update_habit(id, payload, &user, &repo));
    match result {
        Ok(habit) => HttpResponse::Ok().json(habit),
        Err(e) => error_response(e),
    }
}

#[delete("/{id}")]
pub async fn delete_habit(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = habit_id(path.into_inner())
        .and_then(|id| services::habits::delete_habit(id, &user, &repo));
    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Habit deleted successfully"
        })),
        Err(e) => error_response(e),
    }
}

#[post("/{id}/complete")]
pub async fn complete_habit(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = habit_id(path.into_inner())
        .and_then(|id| services::habits::complete_habit(id, Utc::now().naive_utc(), &user, &repo));
    match result {
        Ok(completion) => HttpResponse::Created().json(completion),
        Err(e) => error_response(e),
    }
}

#[get("/{id}/stats")]
pub async fn habit_stats(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let result = habit_id(path.into_inner())
        .and_then(|id| services::habits::habit_stats(id, Utc::now().naive_utc(), &user, &repo));
    match result {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(e),
    }
}
