//! Tests for directory handlers.

use super::*;
use crate::domain::ports::MockUserDirectory;
use crate::domain::{ErrorCode, SwapError, UserId};
use crate::inbound::http::test_utils::{MockPorts, signed_in, test_app};
use crate::test_support::profile;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(current_user)
        .service(update_current_user)
        .service(list_user_feedback)
        .service(get_user);
}

fn directory_of(count: usize) -> Vec<UserProfile> {
    (0..count)
        .map(|index| profile(&format!("Member {index}"), &["Python"], &["Guitar"]))
        .collect()
}

fn ports_with_directory(directory: MockUserDirectory) -> MockPorts {
    MockPorts {
        directory,
        ..MockPorts::default()
    }
}

#[actix_web::test]
async fn anonymous_visitors_can_browse_the_directory() {
    let profiles = directory_of(2);
    let first_id = profiles[0].id.clone();
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list()
        .times(1)
        .returning(move |_| Ok(profiles.clone()));
    let expected = first_id.clone();
    directory
        .expect_get_by_id()
        .withf(move |id| id == &expected)
        .times(1)
        .returning(|id| {
            let mut found = profile("Member 0", &["Python"], &["Guitar"]);
            found.id = id.clone();
            Ok(found)
        });
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;

    let page: UserPage = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;
    assert_eq!(page.items.len(), 2);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{first_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn own_profile_requires_a_session() {
    let mut directory = MockUserDirectory::new();
    directory.expect_get_by_id().never();
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn listing_passes_filters_and_pages_results() {
    let profiles = directory_of(3);
    let second_id = profiles[1].id.clone();
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list()
        .withf(|query| {
            query.search_term() == Some("member")
                && query.skill_filter() == Some("python")
                && query.availability_filter() == Some(AvailabilitySlot::Weekends)
        })
        .times(2)
        .returning(move |_| Ok(profiles.clone()));
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;
    let cookie = signed_in(&app, &UserId::random()).await;

    let first: UserPage = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users?search=Member&skill=PYTHON&availability=Weekends&limit=2")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(first.items.len(), 2);
    let cursor = first.next_cursor.expect("second page exists");

    let second: UserPage = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!(
                "/api/v1/users?search=Member&skill=PYTHON&availability=Weekends&limit=2&cursor={cursor}"
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(second.items.len(), 1);
    assert!(second.next_cursor.is_none());
    assert_ne!(second.items[0].id, second_id);
}

#[rstest]
#[case("limit=0", "limit")]
#[case("limit=101", "limit")]
#[case("cursor=not-base64!", "cursor")]
#[case("availability=Someday", "availability")]
#[actix_web::test]
async fn invalid_listing_parameters_are_rejected(#[case] query: &str, #[case] field: &str) {
    let mut directory = MockUserDirectory::new();
    directory.expect_list().never();
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;
    let cookie = signed_in(&app, &UserId::random()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users?{query}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_test::read_body_json(res).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        payload.details().and_then(|d| d.get("field")),
        Some(&json!(field))
    );
}

#[actix_web::test]
async fn paging_continues_after_a_member_leaves_the_listing() {
    let members = directory_of(4);
    let departed = members[1].id.clone();
    let remaining: Vec<UserProfile> = members
        .iter()
        .filter(|member| member.id != departed)
        .cloned()
        .collect();
    let expected: Vec<String> = remaining[1..].iter().map(|m| m.name.as_ref().to_owned()).collect();
    let mut directory = MockUserDirectory::new();
    directory.expect_list().returning(move |_| Ok(remaining.clone()));
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;
    let cursor = Cursor::after(departed.to_string(), 1).encode();

    let page: UserPage = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users?cursor={cursor}&limit=2"))
            .to_request(),
    )
    .await;
    let names: Vec<String> = page.items.iter().map(|m| m.name.as_ref().to_owned()).collect();
    assert_eq!(names, expected);
    assert!(page.next_cursor.is_none());
}

#[actix_web::test]
async fn me_returns_the_session_profile() {
    let me = profile("Sarah Chen", &["Python"], &["Guitar"]);
    let my_id = me.id.clone();
    let mut directory = MockUserDirectory::new();
    let expected_id = my_id.clone();
    directory
        .expect_get_by_id()
        .withf(move |id| id == &expected_id)
        .returning(move |_| Ok(me.clone()));
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;
    let cookie = signed_in(&app, &my_id).await;

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body["name"], "Sarah Chen");
}

#[actix_web::test]
async fn profile_update_is_applied_for_session_user() {
    let me = profile("Sarah Chen", &["Python"], &["Guitar"]);
    let my_id = me.id.clone();
    let mut directory = MockUserDirectory::new();
    let expected_actor = my_id.clone();
    directory
        .expect_update_profile()
        .withf(move |actor, update| {
            actor == &expected_actor
                && !update.is_public
                && update.skills_offered.len() == 2
                && update.details.location.as_deref() == Some("Lisbon")
        })
        .returning(move |_, update| {
            let mut updated = me.clone();
            updated.is_public = update.is_public;
            updated.skills_offered = update.skills_offered;
            Ok(updated)
        });
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;
    let cookie = signed_in(&app, &my_id).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .set_json(json!({
                "name": "Sarah Chen",
                "skillsOffered": ["Python", "SQL"],
                "skillsWanted": [],
                "availability": ["Weekday Evenings"],
                "isPublic": false,
                "location": "Lisbon",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["isPublic"], false);
}

#[rstest]
#[case("not-a-uuid", StatusCode::BAD_REQUEST)]
#[case("0b8f7d2e-3c4a-4e5f-8a6b-7c8d9e0f1a2b", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn lookup_by_id_maps_failures(#[case] id: &str, #[case] status: StatusCode) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_get_by_id()
        .returning(|id| Err(SwapError::not_found("user", id.to_string())));
    let app =
        actix_test::init_service(test_app(ports_with_directory(directory).into_state(), routes))
            .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), status);
}

#[actix_web::test]
async fn feedback_listing_delegates_to_feedback_port() {
    let subject = UserId::random();
    let mut ports = MockPorts::default();
    let expected = subject.clone();
    ports
        .feedback
        .expect_list_for_user()
        .withf(move |id| id == &expected)
        .returning(|_| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports.into_state(), routes)).await;
    let cookie = signed_in(&app, &UserId::random()).await;

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{subject}/feedback"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body, json!([]));
}
