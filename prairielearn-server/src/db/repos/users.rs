//! User repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{Id, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user by login uid.
    pub async fn select_by_uid(&self, uid: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, uid, name, is_administrator FROM users WHERE uid = $1",
        )
        .bind(uid)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Whether the user teaches (or administers) any course at all.
    pub async fn is_instructor_in_any_course(&self, user_id: Id) -> Result<bool, DbError> {
        let is_instructor: bool =
            sqlx::query_scalar("SELECT users_is_instructor_in_any_course($1)")
                .bind(user_id)
                .fetch_one(self.pool)
                .await?;

        Ok(is_instructor)
    }
}
