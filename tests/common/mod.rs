//! Helpers for integration tests.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use habitloop::db::{DbPool, establish_connection_pool};
use habitloop::schema::users;
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Insert a user row directly; accounts come from an upstream system and the
/// repository exposes no user writer.
#[allow(dead_code)]
pub fn insert_user(pool: &DbPool, username: &str, full_name: &str, created_at: NaiveDateTime) -> i32 {
    let mut conn = pool.get().expect("Failed to get SQLite connection");
    diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::full_name.eq(full_name),
            users::created_at.eq(created_at),
        ))
        .execute(&mut conn)
        .expect("should insert user");
    users::table
        .filter(users::username.eq(username))
        .select(users::id)
        .first(&mut conn)
        .expect("inserted user id should be readable")
}
