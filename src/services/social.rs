use chrono::NaiveDateTime;

use crate::auth::AuthenticatedUser;
use crate::domain::follow::NewFollow;
use crate::domain::types::UserId;
use crate::dto::social::{FeedEntryDto, FollowDto, FollowListEntryDto, UserProfileDto, UserSearchDto};
use crate::pagination::Pagination;
use crate::repository::{FeedReader, FollowReader, FollowWriter, UserReader};

use super::{ServiceError, ServiceResult};

/// Case-insensitive user search, excluding the caller.
pub fn search_users<R>(
    query: &str,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<UserSearchDto>>
where
    R: UserReader,
{
    let user_id = user.user_id()?;

    match repo.search_users(user_id, query) {
        Ok(results) => Ok(results.into_iter().map(UserSearchDto::from).collect()),
        Err(e) => {
            log::error!("Failed to search users: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a follow edge from the caller to `target`.
///
/// Self-follows are rejected before storage is touched; a duplicate edge
/// surfaces as a unique violation and is reported as a conflict.
pub fn follow_user<R>(
    target: UserId,
    now: NaiveDateTime,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<FollowDto>
where
    R: UserReader + FollowWriter,
{
    let user_id = user.user_id()?;

    if target == user_id {
        return Err(ServiceError::Form("You cannot follow yourself".to_string()));
    }

    match repo.get_user(target) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get user: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let follow = NewFollow {
        follower_id: user_id,
        following_id: target,
        created_at: now,
    };

    match repo.create_follow(&follow) {
        Ok(edge) => Ok(edge.into()),
        Err(crate::repository::errors::RepositoryError::UniqueViolation(_)) => Err(
            ServiceError::Conflict("You are already following this user".to_string()),
        ),
        Err(e) => {
            log::error!("Failed to create follow: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn unfollow_user<R>(target: UserId, user: &AuthenticatedUser, repo: &R) -> ServiceResult<()>
where
    R: FollowWriter,
{
    let user_id = user.user_id()?;

    match repo.delete_follow(user_id, target) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete follow: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn following<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<FollowListEntryDto>>
where
    R: FollowReader,
{
    let user_id = user.user_id()?;

    match repo.list_following(user_id) {
        Ok(entries) => Ok(entries.into_iter().map(FollowListEntryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list following: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn followers<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<FollowListEntryDto>>
where
    R: FollowReader,
{
    let user_id = user.user_id()?;

    match repo.list_followers(user_id) {
        Ok(entries) => Ok(entries.into_iter().map(FollowListEntryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list followers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Completions of followed users, newest first, paginated after ordering.
pub fn activity_feed<R>(
    pagination: Pagination,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<FeedEntryDto>>
where
    R: FeedReader,
{
    let user_id = user.user_id()?;

    match repo.activity_feed(user_id, pagination) {
        Ok(entries) => Ok(entries.into_iter().map(FeedEntryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to build activity feed: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn user_profile<R>(
    id: UserId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<UserProfileDto>
where
    R: UserReader,
{
    let user_id = user.user_id()?;

    match repo.get_profile(user_id, id) {
        Ok(Some(profile)) => Ok(profile.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get profile: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::habit::Habit;
    use crate::domain::types::{Frequency, HabitId, HabitName, Username};
    use crate::domain::user::User;
    use crate::repository::test::TestRepository;
    use crate::services::habits::complete_habit;
    use chrono::NaiveDate;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            username: "alice".into(),
            exp: 0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(id: i32, username: &str) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(username).unwrap(),
            full_name: format!("{username} Example"),
            created_at: date(2023, 12, 1).and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    fn habit_of(id: i32, owner: i32) -> Habit {
        Habit {
            id: HabitId::new(id).unwrap(),
            user_id: UserId::new(owner).unwrap(),
            name: HabitName::new(format!("Habit {id}")).unwrap(),
            description: None,
            frequency: Frequency::Daily,
            category: None,
            created_at: date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn self_follow_is_rejected_before_storage() {
        let repo = TestRepository::new(vec![account(1, "alice")]);
        let user = sample_user();
        let now = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();

        let err = follow_user(UserId::new(1).unwrap(), now, &user, &repo).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Form("You cannot follow yourself".to_string())
        );
    }

    #[test]
    fn following_an_unknown_user_is_not_found() {
        let repo = TestRepository::new(vec![account(1, "alice")]);
        let user = sample_user();
        let now = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();

        let err = follow_user(UserId::new(42).unwrap(), now, &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn duplicate_follow_conflicts() {
        let repo = TestRepository::new(vec![account(1, "alice"), account(2, "bob")]);
        let user = sample_user();
        let now = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let target = UserId::new(2).unwrap();

        follow_user(target, now, &user, &repo).unwrap();
        let err = follow_user(target, now, &user, &repo).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict("You are already following this user".to_string())
        );
    }

    #[test]
    fn unfollow_without_an_edge_is_not_found() {
        let repo = TestRepository::new(vec![account(1, "alice"), account(2, "bob")]);
        let user = sample_user();

        let err = unfollow_user(UserId::new(2).unwrap(), &user, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn feed_orders_newest_completion_first() {
        let repo = TestRepository::new(vec![account(1, "alice"), account(2, "bob")])
            .with_habits(vec![habit_of(1, 2)]);
        let alice = sample_user();
        let bob = AuthenticatedUser {
            sub: "2".into(),
            username: "bob".into(),
            exp: 0,
        };

        let now = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        follow_user(UserId::new(2).unwrap(), now, &alice, &repo).unwrap();

        let habit_id = HabitId::new(1).unwrap();
        for day in 1..=3 {
            let t = date(2024, 1, day).and_hms_opt(12, 0, 0).unwrap();
            complete_habit(habit_id, t, &bob, &repo).unwrap();
        }

        let feed = activity_feed(Pagination::new(10, 0), &alice, &repo).unwrap();
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].date, date(2024, 1, 3));
        assert_eq!(feed[1].date, date(2024, 1, 2));
        assert_eq!(feed[2].date, date(2024, 1, 1));
        assert_eq!(feed[0].total_completions, 3);
        assert_eq!(feed[0].recent_activity_count, 3);
        assert_eq!(feed[0].username, "bob");
    }

    #[test]
    fn feed_excludes_unfollowed_users() {
        let repo = TestRepository::new(vec![account(1, "alice"), account(2, "bob")])
            .with_habits(vec![habit_of(1, 2)]);
        let alice = sample_user();
        let bob = AuthenticatedUser {
            sub: "2".into(),
            username: "bob".into(),
            exp: 0,
        };

        let t = date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        complete_habit(HabitId::new(1).unwrap(), t, &bob, &repo).unwrap();

        let feed = activity_feed(Pagination::default(), &alice, &repo).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn feed_pagination_windows_after_ordering() {
        let repo = TestRepository::new(vec![account(1, "alice"), account(2, "bob")])
            .with_habits(vec![habit_of(1, 2)]);
        let alice = sample_user();
        let bob = AuthenticatedUser {
            sub: "2".into(),
            username: "bob".into(),
            exp: 0,
        };

        let now = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        follow_user(UserId::new(2).unwrap(), now, &alice, &repo).unwrap();

        let habit_id = HabitId::new(1).unwrap();
        for day in 1..=5 {
            let t = date(2024, 1, day).and_hms_opt(12, 0, 0).unwrap();
            complete_habit(habit_id, t, &bob, &repo).unwrap();
        }

        let page = activity_feed(Pagination::new(2, 1), &alice, &repo).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].date, date(2024, 1, 4));
        assert_eq!(page[1].date, date(2024, 1, 3));
    }

    #[test]
    fn search_flags_followed_users() {
        let repo = TestRepository::new(vec![
            account(1, "alice"),
            account(2, "bob"),
            account(3, "bobby"),
        ]);
        let alice = sample_user();
        let now = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        follow_user(UserId::new(2).unwrap(), now, &alice, &repo).unwrap();

        let results = search_users("bob", &alice, &repo).unwrap();
        assert_eq!(results.len(), 2);
        let bob = results.iter().find(|r| r.username == "bob").unwrap();
        let bobby = results.iter().find(|r| r.username == "bobby").unwrap();
        assert!(bob.is_following);
        assert!(!bobby.is_following);
    }

    #[test]
    fn profile_counts_habits_and_completions() {
        let repo = TestRepository::new(vec![account(1, "alice"), account(2, "bob")])
            .with_habits(vec![habit_of(1, 2)]);
        let alice = sample_user();
        let bob = AuthenticatedUser {
            sub: "2".into(),
            username: "bob".into(),
            exp: 0,
        };

        let t = date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap();
        complete_habit(HabitId::new(1).unwrap(), t, &bob, &repo).unwrap();

        let profile = user_profile(UserId::new(2).unwrap(), &alice, &repo).unwrap();
        assert_eq!(profile.total_habits, 1);
        assert_eq!(profile.total_completions, 1);
        assert!(!profile.is_following);
    }
}
