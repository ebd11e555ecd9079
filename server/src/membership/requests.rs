//! Membership request pipeline
//!
//! Public intake of prospective-member requests and the admin decision
//! step. A request is decided exactly once; approval provisions a
//! `member`-role user and an empty membership profile in the same
//! transaction as the status flip — a request can never end up approved
//! without a member behind it, or the other way around.

use sqlx::SqlitePool;

use crate::db::repository::membership_request;
use shared::models::{MembershipRequest, MembershipRequestCreate, RequestDecision, RequestStatus};

use super::{LifecycleError, LifecycleResult};

/// Outcome of [`decide_request`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    Rejected,
    /// Request approved; carries the freshly provisioned member id
    Approved { member_id: i64 },
}

/// Public submission. Name and email must be present; duplicate emails
/// are deliberately allowed (any number of pending requests per
/// address).
pub async fn submit_request(
    pool: &SqlitePool,
    data: &MembershipRequestCreate,
) -> LifecycleResult<MembershipRequest> {
    if data.full_name.trim().is_empty() || data.email.trim().is_empty() {
        return Err(LifecycleError::Validation(
            "Name and email are required".into(),
        ));
    }

    let request = membership_request::create(pool, data).await?;
    tracing::info!(request_id = request.id, email = %request.email, "Membership request submitted");
    Ok(request)
}

/// Admin decision. Fails with `NotFound` for an unknown id and
/// `AlreadyProcessed` when the request is no longer pending — both on
/// the pre-check and on the conditional write, so a concurrent double
/// decision cannot slip through.
pub async fn decide_request(
    pool: &SqlitePool,
    request_id: i64,
    decision: RequestDecision,
) -> LifecycleResult<DecisionOutcome> {
    let request = membership_request::find_by_id(pool, request_id)
        .await?
        .ok_or_else(|| {
            LifecycleError::NotFound(format!("Membership request {request_id} not found"))
        })?;

    if request.status != RequestStatus::Pending {
        return Err(LifecycleError::AlreadyProcessed);
    }

    match decision {
        RequestDecision::Rejected => {
            let transitioned = membership_request::mark_rejected(pool, request_id).await?;
            if !transitioned {
                return Err(LifecycleError::AlreadyProcessed);
            }
            tracing::info!(request_id, "Membership request rejected");
            Ok(DecisionOutcome::Rejected)
        }
        RequestDecision::Approved => {
            let credential_ref = shared::util::opaque_token();
            let member_id =
                membership_request::approve_and_provision(pool, &request, &credential_ref)
                    .await?
                    .ok_or(LifecycleError::AlreadyProcessed)?;
            tracing::info!(request_id, member_id, "Membership request approved, member provisioned");
            Ok(DecisionOutcome::Approved { member_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;
    use shared::models::Role;

    fn request(name: &str, email: &str) -> MembershipRequestCreate {
        MembershipRequestCreate {
            full_name: name.to_string(),
            email: email.to_string(),
            phone: Some("555-0101".to_string()),
            message: None,
        }
    }

    #[tokio::test]
    async fn submit_creates_pending_request() {
        let pool = test_pool().await;
        let req = submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.email, "jane@x.com");
        assert!(req.decided_at.is_none());
    }

    #[tokio::test]
    async fn submit_rejects_missing_name() {
        let pool = test_pool().await;
        let err = submit_request(&pool, &request("  ", "jane@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_emails_are_allowed() {
        let pool = test_pool().await;
        submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();
        // Same email again: accepted by design
        submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn approval_provisions_exactly_one_user_and_profile() {
        let pool = test_pool().await;
        let req = submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();

        let outcome = decide_request(&pool, req.id, RequestDecision::Approved)
            .await
            .unwrap();
        let member_id = match outcome {
            DecisionOutcome::Approved { member_id } => member_id,
            other => panic!("expected approval, got {other:?}"),
        };

        let user = crate::db::repository::user::find_by_id(&pool, member_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.email, "jane@x.com");

        let profile = crate::db::repository::member_profile::find_by_user_id(&pool, member_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.user_id, member_id);
        assert!(profile.current_plan_id.is_none());
        assert!(profile.assigned_trainer_id.is_none());
        assert!(profile.membership_end_date.is_none());

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM member_profiles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((users, profiles), (1, 1));
    }

    #[tokio::test]
    async fn request_is_decided_exactly_once() {
        let pool = test_pool().await;
        let req = submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();

        decide_request(&pool, req.id, RequestDecision::Approved)
            .await
            .unwrap();
        let err = decide_request(&pool, req.id, RequestDecision::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::AlreadyProcessed));

        // No duplicate member was provisioned by the second call
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn rejection_is_terminal_and_provisions_nothing() {
        let pool = test_pool().await;
        let req = submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();

        let outcome = decide_request(&pool, req.id, RequestDecision::Rejected)
            .await
            .unwrap();
        assert_eq!(outcome, DecisionOutcome::Rejected);

        let stored = membership_request::find_by_id(&pool, req.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Rejected);
        assert!(stored.decided_at.is_some());

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 0);

        // Flipping a rejected request to approved is refused
        let err = decide_request(&pool, req.id, RequestDecision::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::AlreadyProcessed));
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let pool = test_pool().await;
        let err = decide_request(&pool, 999, RequestDecision::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn approval_rolls_back_when_email_already_registered() {
        let pool = test_pool().await;
        crate::db::test_support::seed_user(&pool, 1, "Jane", "jane@x.com", "member").await;

        let req = submit_request(&pool, &request("Jane", "jane@x.com"))
            .await
            .unwrap();
        let err = decide_request(&pool, req.id, RequestDecision::Approved)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::Repo(crate::db::repository::RepoError::Duplicate(_))
        ));

        // The status flip rolled back with the failed insert
        let stored = membership_request::find_by_id(&pool, req.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }
}
