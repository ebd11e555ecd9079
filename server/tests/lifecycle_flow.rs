//! End-to-end membership lifecycle: request → approval → assignment →
//! renewal → roster, against a real on-disk database with a pinned
//! clock.

use chrono::NaiveDate;

use gym_server::db::repository::{plan, user};
use gym_server::db::DbService;
use gym_server::membership::requests::{decide_request, submit_request, DecisionOutcome};
use gym_server::membership::{assignment, dashboard, renewal, roster};
use shared::models::{
    AssignmentUpdate, MembershipRequestCreate, MembershipStatus, PlanCreate, RequestDecision, Role,
    UserCreate,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn full_membership_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gym.db");
    let db = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let pool = db.pool;

    let today = d(2025, 6, 1);

    // Staff setup: one trainer, one 3-month plan
    let trainer = user::create(
        &pool,
        UserCreate {
            full_name: "Coach Kim".into(),
            email: "kim@gym.test".into(),
            phone: None,
            role: Role::Trainer,
        },
        "seed-credential",
    )
    .await
    .unwrap();

    let quarterly = plan::create(
        &pool,
        PlanCreate {
            name: "Quarterly".into(),
            duration_months: 3,
            price: 900.0,
            description: Some("Three months, all facilities".into()),
            is_active: None,
        },
    )
    .await
    .unwrap();

    // 1. Public request
    let request = submit_request(
        &pool,
        &MembershipRequestCreate {
            full_name: "Jane".into(),
            email: "jane@x.com".into(),
            phone: Some("555-0102".into()),
            message: Some("Interested in joining".into()),
        },
    )
    .await
    .unwrap();

    // 2. Admin approval provisions the member
    let outcome = decide_request(&pool, request.id, RequestDecision::Approved)
        .await
        .unwrap();
    let member_id = match outcome {
        DecisionOutcome::Approved { member_id } => member_id,
        other => panic!("expected approval, got {other:?}"),
    };

    // 3. Assign trainer and plan
    let profile = assignment::assign_trainer_and_plan(
        &pool,
        member_id,
        &AssignmentUpdate {
            assigned_trainer_id: Some(Some(trainer.id)),
            current_plan_id: Some(Some(quarterly.id)),
        },
    )
    .await
    .unwrap();
    assert_eq!(profile.assigned_trainer_id, Some(trainer.id));
    assert!(profile.membership_end_date.is_none());

    // 4. First renewal: no end date yet, so the window starts today
    let new_end = renewal::renew(&pool, member_id, today).await.unwrap();
    assert_eq!(new_end, d(2025, 9, 1));

    // 5. Roster shows Jane active and not expired, with joined names
    let members = roster::list_members(&pool, today).await.unwrap();
    assert_eq!(members.len(), 1);
    let jane = &members[0];
    assert_eq!(jane.user_id, member_id);
    assert_eq!(jane.full_name, "Jane");
    assert_eq!(jane.trainer_name.as_deref(), Some("Coach Kim"));
    assert_eq!(jane.plan_name.as_deref(), Some("Quarterly"));
    assert_eq!(jane.membership_status, MembershipStatus::Active);
    assert_eq!(jane.membership_end_date, Some(d(2025, 9, 1)));
    assert!(!jane.is_expired);

    // 6. A second renewal before expiry extends contiguously
    let extended = renewal::renew(&pool, member_id, d(2025, 7, 15)).await.unwrap();
    assert_eq!(extended, d(2025, 12, 2));

    // 7. Dashboard sees one member, one trainer, nothing expired
    let stats = dashboard::dashboard_stats(&pool, today).await.unwrap();
    assert_eq!(stats.total_members, 1);
    assert_eq!(stats.active_trainers, 1);
    assert_eq!(stats.expired_memberships, 0);

    // ...until the clock moves past the paid-through date
    let later = dashboard::dashboard_stats(&pool, d(2026, 1, 1)).await.unwrap();
    assert_eq!(later.expired_memberships, 1);
}
