use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::follow::{FollowEdge as DomainFollow, NewFollow as DomainNewFollow};
use crate::domain::types::TypeConstraintError;

/// Diesel model representing the `follows` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::follows)]
pub struct Follow {
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Follow`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::follows)]
pub struct NewFollow {
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Follow> for DomainFollow {
    type Error = TypeConstraintError;

    fn try_from(follow: Follow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: follow.id.try_into()?,
            follower_id: follow.follower_id.try_into()?,
            following_id: follow.following_id.try_into()?,
            created_at: follow.created_at,
        })
    }
}

impl From<DomainNewFollow> for NewFollow {
    fn from(follow: DomainNewFollow) -> Self {
        Self {
            follower_id: follow.follower_id.get(),
            following_id: follow.following_id.get(),
            created_at: follow.created_at,
        }
    }
}
