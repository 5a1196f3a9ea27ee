//! Tests for the request ledger service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockSwapRequestRepository, SwapRequestRepository};
use crate::outbound::memory::{InMemoryProfileRepository, InMemorySwapRequestRepository};
use crate::test_support::{MutableClock, fixed_now, profile};
use rstest::{fixture, rstest};

struct Harness {
    service: RequestLedgerService<InMemoryProfileRepository, InMemorySwapRequestRepository>,
    requests: Arc<InMemorySwapRequestRepository>,
    clock: Arc<MutableClock>,
    alice: UserProfile,
    bruno: UserProfile,
    carla: UserProfile,
}

#[fixture]
fn harness() -> Harness {
    let alice = profile("Alice Guitar", &["Guitar"], &["Spanish"]);
    let bruno = profile("Bruno Spanish", &["Spanish", "Cooking"], &["Guitar"]);
    let carla = profile("Carla Outsider", &["Chess"], &[]);
    let profiles = Arc::new(InMemoryProfileRepository::with_profiles(vec![
        alice.clone(),
        bruno.clone(),
        carla.clone(),
    ]));
    let requests = Arc::new(InMemorySwapRequestRepository::default());
    let clock = Arc::new(MutableClock::new(fixed_now()));
    let service = RequestLedgerService::new(profiles, requests.clone(), clock.clone());
    Harness {
        service,
        requests,
        clock,
        alice,
        bruno,
        carla,
    }
}

fn guitar_for_spanish(from: &UserProfile, to: &UserProfile) -> CreateSwapRequest {
    CreateSwapRequest {
        from_user_id: from.id.clone(),
        to_user_id: to.id.clone(),
        offered_skill: "guitar".to_owned(),
        wanted_skill: "SPANISH".to_owned(),
        message: Some("  Happy to trade lessons  ".to_owned()),
    }
}

#[rstest]
#[tokio::test]
async fn create_opens_pending_request_with_canonical_skills(harness: Harness) {
    let request = harness
        .service
        .create(guitar_for_spanish(&harness.alice, &harness.bruno))
        .await
        .expect("create succeeds");

    assert_eq!(request.status(), SwapStatus::Pending);
    assert_eq!(request.offered_skill().as_ref(), "Guitar");
    assert_eq!(request.wanted_skill().as_ref(), "Spanish");
    assert_eq!(request.message(), Some("Happy to trade lessons"));
    assert_eq!(request.created_at(), fixed_now());
    assert_eq!(request.created_at(), request.updated_at());
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_users(harness: Harness) {
    let mut input = guitar_for_spanish(&harness.alice, &harness.bruno);
    let ghost = UserId::random();
    input.to_user_id = ghost.clone();

    let err = harness.service.create(input).await.expect_err("unknown");
    assert_eq!(err, SwapError::UnknownUser { user_id: ghost });
}

#[rstest]
#[case("Piano", "Spanish")]
#[case("Guitar", "Guitar")]
#[case("   ", "Spanish")]
#[case("Guitar", "")]
#[case("Guitar", "sssssssssssssssssssssssssssssssssssssssssssssssssssssssssssssssss")]
#[tokio::test]
async fn create_rejects_skill_mismatch_without_writing(
    harness: Harness,
    #[case] offered: &str,
    #[case] wanted: &str,
) {
    let mut input = guitar_for_spanish(&harness.alice, &harness.bruno);
    input.offered_skill = offered.to_owned();
    input.wanted_skill = wanted.to_owned();

    let err = harness.service.create(input).await.expect_err("mismatch");
    assert_eq!(err.kind(), "skill_mismatch");
    assert!(harness.requests.list_all().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn create_rejects_self_requests(harness: Harness) {
    let input = guitar_for_spanish(&harness.alice, &harness.alice);
    let err = harness.service.create(input).await.expect_err("self");
    assert_eq!(err.kind(), "invalid_input");
}

#[rstest]
#[tokio::test]
async fn create_rejects_overlong_messages(harness: Harness) {
    let mut input = guitar_for_spanish(&harness.alice, &harness.bruno);
    input.message = Some("x".repeat(MESSAGE_MAX_CHARS + 1));
    let err = harness.service.create(input).await.expect_err("too long");
    assert_eq!(err.kind(), "invalid_input");
}

#[rstest]
#[tokio::test]
async fn lifecycle_moves_through_accept_and_complete(harness: Harness) {
    let request = harness
        .service
        .create(guitar_for_spanish(&harness.alice, &harness.bruno))
        .await
        .expect("create");

    let err = harness
        .service
        .transition(&request.id(), SwapStatus::Accepted, &harness.alice.id)
        .await
        .expect_err("sender cannot accept");
    assert_eq!(err.kind(), "forbidden");

    harness.clock.advance_seconds(60);
    let accepted = harness
        .service
        .transition(&request.id(), SwapStatus::Accepted, &harness.bruno.id)
        .await
        .expect("recipient accepts");
    assert!(accepted.updated_at() > accepted.created_at());

    let err = harness
        .service
        .transition(&request.id(), SwapStatus::Completed, &harness.carla.id)
        .await
        .expect_err("outsider cannot complete");
    assert_eq!(err.kind(), "forbidden");

    let completed = harness
        .service
        .transition(&request.id(), SwapStatus::Completed, &harness.alice.id)
        .await
        .expect("sender completes");
    assert!(completed.updated_at() > accepted.updated_at());

    let err = harness
        .service
        .transition(&request.id(), SwapStatus::Pending, &harness.alice.id)
        .await
        .expect_err("completed is terminal");
    assert_eq!(
        err,
        SwapError::InvalidTransition {
            from: SwapStatus::Completed,
            to: SwapStatus::Pending,
        }
    );
}

#[rstest]
#[tokio::test]
async fn complete_requires_accepted(harness: Harness) {
    let request = harness
        .service
        .create(guitar_for_spanish(&harness.alice, &harness.bruno))
        .await
        .expect("create");
    let err = harness
        .service
        .transition(&request.id(), SwapStatus::Completed, &harness.bruno.id)
        .await
        .expect_err("pending cannot complete");
    assert_eq!(err.kind(), "invalid_transition");

    let stored = harness
        .requests
        .find_by_id(&request.id())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored, request);
}

#[rstest]
#[tokio::test]
async fn unknown_request_is_not_found(harness: Harness) {
    let err = harness
        .service
        .transition(
            &SwapRequestId::random(),
            SwapStatus::Accepted,
            &harness.bruno.id,
        )
        .await
        .expect_err("missing");
    assert_eq!(err.kind(), "not_found");
}

#[rstest]
#[tokio::test]
async fn list_for_user_returns_oldest_first(harness: Harness) {
    let first = harness
        .service
        .create(guitar_for_spanish(&harness.alice, &harness.bruno))
        .await
        .expect("first");
    harness.clock.advance_seconds(5);
    let mut reverse = guitar_for_spanish(&harness.bruno, &harness.alice);
    reverse.offered_skill = "Cooking".to_owned();
    reverse.wanted_skill = "Guitar".to_owned();
    let second = harness.service.create(reverse).await.expect("second");

    let listed = harness
        .service
        .list_for_user(&harness.alice.id)
        .await
        .expect("list");
    assert_eq!(listed, vec![first, second]);
    assert!(
        harness
            .service
            .list_for_user(&harness.carla.id)
            .await
            .expect("list")
            .is_empty()
    );
}

#[tokio::test]
async fn lost_compare_and_set_is_a_conflict() {
    let request = crate::test_support::request_with_status(SwapStatus::Pending);
    let recipient = request.to_user_id().clone();
    let stored = request.clone();

    let mut requests = MockSwapRequestRepository::new();
    requests
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    requests
        .expect_update_if_status()
        .times(1)
        .return_once(|_, expected| {
            Err(SwapRequestRepositoryError::status_mismatch(
                expected,
                SwapStatus::Rejected,
            ))
        });

    let service = RequestLedgerService::new(
        Arc::new(InMemoryProfileRepository::default()),
        Arc::new(requests),
        Arc::new(MutableClock::new(fixed_now())),
    );
    let err = service
        .transition(&request.id(), SwapStatus::Accepted, &recipient)
        .await
        .expect_err("lost race");
    assert_eq!(err.kind(), "conflict");
}
