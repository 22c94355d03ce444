use diesel::prelude::*;

use crate::domain::follow::{FollowEdge, FollowListEntry, NewFollow};
use crate::domain::types::UserId;
use crate::models::follow::{Follow as DbFollow, NewFollow as DbNewFollow};
use crate::models::user::User as DbUser;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, FollowReader, FollowWriter};

fn to_entries(rows: Vec<(DbFollow, DbUser)>) -> RepositoryResult<Vec<FollowListEntry>> {
    rows.into_iter()
        .map(|(follow, user)| {
            Ok(FollowListEntry {
                user: user.try_into()?,
                followed_at: follow.created_at,
            })
        })
        .collect()
}

impl FollowReader for DieselRepository {
    fn is_following(&self, follower: UserId, following: UserId) -> RepositoryResult<bool> {
        use crate::schema::follows;

        let mut conn = self.conn()?;

        let found = follows::table
            .filter(follows::follower_id.eq(follower.get()))
            .filter(follows::following_id.eq(following.get()))
            .select(follows::id)
            .first::<i32>(&mut conn)
            .optional()?;

        Ok(found.is_some())
    }

    fn following_ids(&self, user: UserId) -> RepositoryResult<Vec<UserId>> {
        use crate::schema::follows;

        let mut conn = self.conn()?;

        let ids = follows::table
            .filter(follows::follower_id.eq(user.get()))
            .select(follows::following_id)
            .load::<i32>(&mut conn)?;

        let ids = ids
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<UserId>, _>>()?;
        Ok(ids)
    }

    fn list_following(&self, user: UserId) -> RepositoryResult<Vec<FollowListEntry>> {
        use crate::schema::{follows, users};

        let mut conn = self.conn()?;

        let rows = follows::table
            .filter(follows::follower_id.eq(user.get()))
            .inner_join(users::table.on(users::id.eq(follows::following_id)))
            .order(follows::created_at.desc())
            .load::<(DbFollow, DbUser)>(&mut conn)?;

        to_entries(rows)
    }

    fn list_followers(&self, user: UserId) -> RepositoryResult<Vec<FollowListEntry>> {
        use crate::schema::{follows, users};

        let mut conn = self.conn()?;

        let rows = follows::table
            .filter(follows::following_id.eq(user.get()))
            .inner_join(users::table.on(users::id.eq(follows::follower_id)))
            .order(follows::created_at.desc())
            .load::<(DbFollow, DbUser)>(&mut conn)?;

        to_entries(rows)
    }
}

impl FollowWriter for DieselRepository {
    fn create_follow(&self, follow: &NewFollow) -> RepositoryResult<FollowEdge> {
        use crate::schema::follows;

        let mut conn = self.conn()?;
        let db_follow: DbNewFollow = follow.clone().into();

        let created = diesel::insert_into(follows::table)
            .values(db_follow)
            .get_result::<DbFollow>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_follow(&self, follower: UserId, following: UserId) -> RepositoryResult<usize> {
        use crate::schema::follows;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower.get()))
                .filter(follows::following_id.eq(following.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
