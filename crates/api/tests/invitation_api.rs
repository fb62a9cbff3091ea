//! End-to-end organizer and guest scenarios against a real database.
//!
//! `#[sqlx::test]` provisions a fresh database per test from `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{
    authed_delete, authed_get, authed_post_json, authed_put_json, body_json, get, post_json,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use vowly_db::repositories::OrganizerRepo;

/// Register an organizer on `plan` and return their token.
async fn organizer_on(pool: &PgPool, plan: &str) -> (Uuid, String) {
    let id = Uuid::new_v4();
    OrganizerRepo::ensure(pool, id).await.unwrap();
    OrganizerRepo::set_plan(pool, id, plan).await.unwrap();
    (id, token_for(id))
}

/// Create an event and return `(event_id, www_id)`.
async fn create_event(pool: &PgPool, token: &str) -> (String, String) {
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/events",
        token,
        json!({ "title": "Ada & Bo", "partner_one": "Ada", "partner_two": "Bo" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["id"].as_str().unwrap().to_string(),
        json["data"]["www_id"].as_str().unwrap().to_string(),
    )
}

async fn publish(pool: &PgPool, token: &str, event_id: &str) {
    let response = authed_put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}"),
        token,
        json!({ "is_published": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Organizer
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_registers_organizer_on_free_plan(pool: PgPool) {
    let token = token_for(Uuid::new_v4());
    let response = authed_get(common::build_test_app(pool), "/api/v1/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["plan"], "free");
    assert_eq!(json["data"]["features"], json!(["qr_codes"]));
    assert_eq!(json["data"]["limits"]["custom_questions"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn events_are_scoped_to_their_organizer(pool: PgPool) {
    let (_, owner) = organizer_on(&pool, "basic").await;
    let (_, stranger) = organizer_on(&pool, "basic").await;
    let (event_id, www_id) = create_event(&pool, &owner).await;
    assert!(vowly_core::www_id::is_valid(&www_id));

    let response = authed_get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}"),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = authed_delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}"),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn free_plan_cannot_add_custom_questions(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "free").await;
    let (event_id, _) = create_event(&pool, &token).await;

    let response = authed_post_json(
        common::build_test_app(pool),
        &format!("/api/v1/events/{event_id}/questions"),
        &token,
        json!({ "question_type": "yes_no", "title": "Brunch?" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body_json(response).await["code"], "PLAN_LIMIT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn multiple_choice_question_needs_options(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "basic").await;
    let (event_id, _) = create_event(&pool, &token).await;

    let response = authed_post_json(
        common::build_test_app(pool),
        &format!("/api/v1/events/{event_id}/questions"),
        &token,
        json!({ "question_type": "multiple_choice", "title": "Song?", "options": ["Only one"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_guest_email_is_a_conflict(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "basic").await;
    let (event_id, _) = create_event(&pool, &token).await;
    let uri = format!("/api/v1/events/{event_id}/guests");

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "full_name": "Cy", "email": "cy@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = authed_post_json(
        common::build_test_app(pool),
        &uri,
        &token,
        json!({ "full_name": "Cy Again", "email": "CY@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(
        json["error"],
        "A guest with email 'CY@example.com' is already on the list"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preview_flow_places_questions_between_transportation_and_note(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "premium").await;
    let (event_id, www_id) = create_event(&pool, &token).await;

    let mut question_ids = Vec::new();
    for title in ["Brunch?", "Song request"] {
        let kind = if title == "Brunch?" { "yes_no" } else { "text" };
        let response = authed_post_json(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/events/{event_id}/questions"),
            &token,
            json!({ "question_type": kind, "title": title }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        question_ids.push(body_json(response).await["data"]["id"].as_str().unwrap().to_string());
    }

    // Swap the two questions.
    let response = authed_put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/questions/reorder"),
        &token,
        json!({ "question_ids": [question_ids[1], question_ids[0]] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed_get(
        common::build_test_app(pool),
        &format!("/api/v1/events/{event_id}/flow"),
        &token,
    )
    .await;
    let steps = body_json(response).await["data"].clone();
    let ids: Vec<&str> = steps
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids.len(), 10);
    assert_eq!(ids[5], "transportation");
    assert_eq!(ids[6], question_ids[1]);
    assert_eq!(ids[7], question_ids[0]);
    assert_eq!(ids[8], "note");
    assert_eq!(
        steps[6]["path"],
        format!("/event-id/{www_id}/invitation/custom-question/{}", question_ids[1])
    );
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unpublished_event_is_hidden_from_guests(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "basic").await;
    let (event_id, www_id) = create_event(&pool, &token).await;

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/public/events/{www_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    publish(&pool, &token, &event_id).await;
    let response = authed_put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/sections/venue"),
        &token,
        json!({ "is_visible": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/public/events/{}", www_id.to_lowercase()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["event"]["www_id"], www_id);
    let sections: Vec<&str> = json["data"]["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["section"].as_str().unwrap())
        .collect();
    assert!(sections.contains(&"rsvp"));
    assert!(!sections.contains(&"venue"));
    assert!(!sections.contains(&"registry"));
    assert_eq!(
        json["data"]["invitation_path"],
        format!("/event-id/{www_id}/invitation")
    );
    assert!(json["data"]["upload_path"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_walks_flow_and_submits_rsvp(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "basic").await;
    let (event_id, www_id) = create_event(&pool, &token).await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/events/{event_id}/questions"),
        &token,
        json!({ "question_type": "yes_no", "title": "Brunch?", "required": true }),
    )
    .await;
    let question_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    publish(&pool, &token, &event_id).await;

    // transportation now leads into the custom question.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/public/events/{www_id}/flow/transportation"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let nav = body_json(response).await["data"].clone();
    assert_eq!(nav["index"], 5);
    assert_eq!(nav["total"], 9);
    assert_eq!(
        nav["next_path"],
        format!("/event-id/{www_id}/invitation/custom-question/{question_id}")
    );

    // Unknown step.
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/public/events/{www_id}/flow/not-a-step"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Step 'not-a-step' is not part of this invitation");

    // Attending without the required answer is refused.
    let rsvp_uri = format!("/api/v1/public/events/{www_id}/rsvp");
    let response = post_json(
        common::build_test_app(pool.clone()),
        &rsvp_uri,
        json!({ "full_name": "Cy", "email": "cy@example.com", "attending": true, "party_size": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        common::build_test_app(pool.clone()),
        &rsvp_uri,
        json!({
            "full_name": "Cy",
            "email": "cy@example.com",
            "attending": true,
            "party_size": 2,
            "answers": { question_id.clone(): "yes" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let guest_id = body_json(response).await["data"]["guest_id"]
        .as_str()
        .unwrap()
        .to_string();

    // Re-submitting with the same email (different case) updates the guest.
    let response = post_json(
        common::build_test_app(pool.clone()),
        &rsvp_uri,
        json!({ "full_name": "Cy", "email": "CY@example.com", "attending": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["guest_id"], guest_id);
    assert_eq!(json["data"]["rsvp_status"], "declined");

    let response = authed_get(
        common::build_test_app(pool),
        &format!("/api/v1/events/{event_id}/guests/summary"),
        &token,
    )
    .await;
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["total_invited"], 1);
    assert_eq!(summary["declined"], 1);
    assert_eq!(summary["expected_headcount"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_uploads_need_premium(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "basic").await;
    let (event_id, www_id) = create_event(&pool, &token).await;
    publish(&pool, &token, &event_id).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/public/events/{www_id}/media"),
        json!({ "content_type": "image/jpeg", "byte_size": 1024 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn collateral_reflects_plan(pool: PgPool) {
    let (_, token) = organizer_on(&pool, "premium").await;
    let (event_id, www_id) = create_event(&pool, &token).await;

    let response = authed_get(
        common::build_test_app(pool),
        &format!("/api/v1/events/{event_id}/collateral"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(
        items[0]["qr_payload"],
        format!("https://vowly.test/event-id/{www_id}/invitation")
    );
}
