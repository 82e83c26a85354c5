//! Authorization policy.
//!
//! Every route maps `(Action, Resource)` to one [`Rule`]. Handlers evaluate the
//! rule after the JWT middleware has established identity and before touching
//! data. A failed rule is a 403, distinct from the 401 of a bad token.

use std::future::Future;

use crate::error::ApiError;
use crate::middleware::AuthUser;

use super::{UserId, ADMIN_USER_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    List,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Session,
    Schema,
    User,
    Movie,
    Genre,
    MovieGenre,
    Rating,
    Review,
    WatchHistory,
    Recommendation,
    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// No token required
    Public,
    /// Any valid token
    Authenticated,
    /// Token subject must equal the resource's owning user
    OwnerOnly,
    /// Token subject must be the admin account
    AdminOnly,
}

/// The static policy table.
pub fn rule_for(action: Action, resource: Resource) -> Rule {
    use Action::*;
    use Resource::*;

    match (resource, action) {
        (Session, _) | (Schema, _) => Rule::Public,
        (User, Create) => Rule::Public,
        (User, List) => Rule::Authenticated,
        (User, _) => Rule::OwnerOnly,

        (Movie, Read | List) | (Genre, Read | List) | (MovieGenre, Read | List) => Rule::Authenticated,
        (Movie, _) | (Genre, _) | (MovieGenre, _) => Rule::AdminOnly,

        // Rows are created for the requester; reads are scoped to the requester or public per movie
        (Rating | Review, Create | Read | List) => Rule::Authenticated,
        (Rating | Review, Update | Delete) => Rule::OwnerOnly,

        (WatchHistory, Create | Read | List) => Rule::Authenticated,
        (WatchHistory, Update | Delete) => Rule::OwnerOnly,

        (Recommendation, Read | List) => Rule::Authenticated,
        (Recommendation, _) => Rule::AdminOnly,

        (Statistics, _) => Rule::Authenticated,
    }
}

/// Outcome of evaluating a rule. `owner` is only consulted for `OwnerOnly`.
pub fn evaluate(rule: Rule, requester: UserId, owner: Option<UserId>) -> bool {
    match rule {
        Rule::Public | Rule::Authenticated => true,
        Rule::OwnerOnly => owner == Some(requester),
        Rule::AdminOnly => requester == ADMIN_USER_ID,
    }
}

/// Check a rule that needs no resource lookup.
pub fn authorize(user: &AuthUser, action: Action, resource: Resource) -> Result<(), ApiError> {
    let rule = rule_for(action, resource);
    if evaluate(rule, user.user_id, None) {
        Ok(())
    } else {
        tracing::warn!(
            "User {} denied {:?} on {:?} (rule {:?})",
            user.user_id,
            action,
            resource,
            rule
        );
        Err(ApiError::forbidden("Access denied"))
    }
}

/// Check an owner rule where the owner is already known (e.g. from the path).
pub fn authorize_owner(
    user: &AuthUser,
    action: Action,
    resource: Resource,
    owner: UserId,
    denied_message: &str,
) -> Result<(), ApiError> {
    let rule = rule_for(action, resource);
    if evaluate(rule, user.user_id, Some(owner)) {
        Ok(())
    } else {
        tracing::warn!(
            "User {} denied {:?} on {:?} owned by {}",
            user.user_id,
            action,
            resource,
            owner
        );
        Err(ApiError::forbidden(denied_message))
    }
}

/// Check an owner rule by first fetching the resource's owning user.
///
/// `fetch_owner` resolves to `None` when the resource does not exist, which is
/// reported as `not_found_message`.
pub async fn authorize_owned<F, Fut, E>(
    user: &AuthUser,
    action: Action,
    resource: Resource,
    fetch_owner: F,
    not_found_message: &str,
    denied_message: &str,
) -> Result<(), ApiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<UserId>, E>>,
    E: Into<ApiError>,
{
    match fetch_owner().await.map_err(Into::into)? {
        None => Err(ApiError::not_found(not_found_message)),
        Some(owner) => authorize_owner(user, action, resource, owner, denied_message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: UserId) -> AuthUser {
        AuthUser { user_id: id }
    }

    #[test]
    fn catalogue_mutation_is_admin_only() {
        for resource in [Resource::Movie, Resource::Genre, Resource::MovieGenre, Resource::Recommendation] {
            for action in [Action::Create, Action::Update, Action::Delete] {
                assert_eq!(rule_for(action, resource), Rule::AdminOnly, "{:?} {:?}", action, resource);
            }
        }
        assert!(authorize(&user(ADMIN_USER_ID), Action::Create, Resource::Movie).is_ok());
        let denied = authorize(&user(2), Action::Create, Resource::Movie).unwrap_err();
        assert_eq!(denied.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn catalogue_reads_need_only_a_token() {
        assert_eq!(rule_for(Action::List, Resource::Movie), Rule::Authenticated);
        assert_eq!(rule_for(Action::Read, Resource::Genre), Rule::Authenticated);
        assert_eq!(rule_for(Action::List, Resource::Recommendation), Rule::Authenticated);
        assert!(authorize(&user(9), Action::List, Resource::Statistics).is_ok());
    }

    #[test]
    fn registration_and_login_are_public() {
        assert_eq!(rule_for(Action::Create, Resource::User), Rule::Public);
        assert_eq!(rule_for(Action::Create, Resource::Session), Rule::Public);
        assert_eq!(rule_for(Action::Create, Resource::Schema), Rule::Public);
    }

    #[test]
    fn owner_rules_compare_identity() {
        assert_eq!(rule_for(Action::Update, Resource::Rating), Rule::OwnerOnly);
        assert_eq!(rule_for(Action::Delete, Resource::Review), Rule::OwnerOnly);
        assert_eq!(rule_for(Action::Read, Resource::User), Rule::OwnerOnly);

        assert!(evaluate(Rule::OwnerOnly, 3, Some(3)));
        assert!(!evaluate(Rule::OwnerOnly, 3, Some(4)));
        assert!(!evaluate(Rule::OwnerOnly, 3, None));
        // admin has no owner override
        assert!(!evaluate(Rule::OwnerOnly, ADMIN_USER_ID, Some(4)));
    }

    #[test]
    fn owner_denial_uses_given_message() {
        let err = authorize_owner(&user(3), Action::Update, Resource::Rating, 4, "Unauthorized to update this rating")
            .unwrap_err();
        assert_eq!(err.message(), "Unauthorized to update this rating");
    }

    #[tokio::test]
    async fn owned_lookup_distinguishes_missing_from_foreign() {
        let me = user(3);

        let missing = authorize_owned(
            &me,
            Action::Delete,
            Resource::Review,
            || async { Ok::<_, ApiError>(None) },
            "Review not found",
            "Unauthorized to delete this review",
        )
        .await
        .unwrap_err();
        assert_eq!(missing.status_code(), axum::http::StatusCode::NOT_FOUND);

        let foreign = authorize_owned(
            &me,
            Action::Delete,
            Resource::Review,
            || async { Ok::<_, ApiError>(Some(8)) },
            "Review not found",
            "Unauthorized to delete this review",
        )
        .await
        .unwrap_err();
        assert_eq!(foreign.status_code(), axum::http::StatusCode::FORBIDDEN);

        let mine = authorize_owned(
            &me,
            Action::Delete,
            Resource::Review,
            || async { Ok::<_, ApiError>(Some(3)) },
            "Review not found",
            "Unauthorized to delete this review",
        )
        .await;
        assert!(mine.is_ok());
    }
}
