use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::{User, UserProfile, UserSearchResult};
use crate::models::user::User as DbUser;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, FollowReader, UserReader, lower};

const SEARCH_RESULT_CAP: i64 = 20;

impl UserReader for DieselRepository {
    fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::id.eq(id.get()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }

    fn search_users(
        &self,
        viewer: UserId,
        query: &str,
    ) -> RepositoryResult<Vec<UserSearchResult>> {
        use crate::schema::{follows, users};

        let mut conn = self.conn()?;
        let pattern = format!("%{}%", query.to_lowercase());

        let rows = users::table
            .filter(
                lower(users::username)
                    .like(pattern.clone())
                    .or(lower(users::full_name).like(pattern)),
            )
            .filter(users::id.ne(viewer.get()))
            .limit(SEARCH_RESULT_CAP)
            .load::<DbUser>(&mut conn)?;

        let followed = follows::table
            .filter(follows::follower_id.eq(viewer.get()))
            .select(follows::following_id)
            .load::<i32>(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                let is_following = followed.contains(&row.id);
                Ok(UserSearchResult {
                    user: row.try_into()?,
                    is_following,
                })
            })
            .collect()
    }

    fn get_profile(&self, viewer: UserId, id: UserId) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::{habit_completions, habits};

        let Some(user) = self.get_user(id)? else {
            return Ok(None);
        };

        let mut conn = self.conn()?;

        let total_habits = habits::table
            .filter(habits::user_id.eq(id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        let total_completions = habit_completions::table
            .filter(habit_completions::user_id.eq(id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        let is_following = self.is_following(viewer, id)?;

        Ok(Some(UserProfile {
            user,
            total_habits,
            total_completions,
            is_following,
        }))
    }
}
