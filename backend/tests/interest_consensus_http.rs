//! End-to-end interest and consensus flows over the REST surface.
//!
//! These tests drive the real services and memory adapters through the
//! HTTP handlers: declaring interest, superseding earlier records, and the
//! quorum evaluation that turns enough mutual interest into a reservation.

#[allow(dead_code)]
#[path = "support/fixtures.rs"]
mod fixtures;
#[path = "support/http.rs"]
mod http_support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use backend::domain::ConsensusPolicy;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

use fixtures::{ada, alan, edsger, grace, old_crown, spice_merchant, standard_population};
use http_support::{get, init_engine_app, post_json};

fn interest_payload(user: Uuid, venue: Uuid, status: &str) -> Value {
    json!({
        "userId": user.to_string(),
        "venueId": venue.to_string(),
        "status": status,
    })
}

async fn declare(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    user: Uuid,
    venue: Uuid,
    status: &str,
) -> (StatusCode, Value) {
    let request = post_json("/api/v1/interests", &interest_payload(user, venue, status));
    let response = actix_test::call_service(app, request).await;
    let status_code = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status_code, body)
}

fn participant_status(reservation: &Value, user: Uuid) -> String {
    reservation["participants"]
        .as_array()
        .expect("participants array")
        .iter()
        .find(|p| p["userId"] == user.to_string())
        .map(|p| p["status"].as_str().expect("status string").to_owned())
        .expect("participant present")
}

#[actix_web::test]
async fn first_interest_reports_below_quorum() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    let (status, body) = declare(&app, ada(), old_crown(), "INTERESTED").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["interest"]["userId"], ada().to_string());
    assert_eq!(body["interest"]["venueId"], old_crown().to_string());
    assert_eq!(body["interest"]["status"], "INTERESTED");
    assert_eq!(body["outcome"]["kind"], "BELOW_QUORUM");
    assert_eq!(body["outcome"]["interested"], 1);
}

#[actix_web::test]
async fn superseding_writes_keep_one_current_record() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    let (status, _) = declare(&app, ada(), old_crown(), "INTERESTED").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = declare(&app, ada(), old_crown(), "NOT_INTERESTED").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"]["kind"], "BELOW_QUORUM");
    assert_eq!(body["outcome"]["interested"], 0);

    let response = actix_test::call_service(
        &app,
        get(&format!("/api/v1/users/{}/interests", ada())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing: Value = actix_test::read_body_json(response).await;
    let interests = listing["interests"].as_array().expect("interests array");
    assert_eq!(interests.len(), 1);
    assert_eq!(interests[0]["status"], "NOT_INTERESTED");
}

#[actix_web::test]
async fn repeating_a_status_reports_one_current_record() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    let (status, _) = declare(&app, ada(), old_crown(), "INTERESTED").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = declare(&app, ada(), old_crown(), "INTERESTED").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"]["kind"], "BELOW_QUORUM");
    assert_eq!(body["outcome"]["interested"], 1);

    let response = actix_test::call_service(
        &app,
        get(&format!("/api/v1/users/{}/interests", ada())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing: Value = actix_test::read_body_json(response).await;
    let interests = listing["interests"].as_array().expect("interests array");
    assert_eq!(interests.len(), 1);
    assert_eq!(interests[0]["status"], "INTERESTED");
}

#[actix_web::test]
async fn quorum_creates_a_reservation_for_the_roster() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    let (_, body) = declare(&app, ada(), old_crown(), "INTERESTED").await;
    assert_eq!(body["outcome"]["kind"], "BELOW_QUORUM");

    let (status, body) = declare(&app, grace(), old_crown(), "INTERESTED").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"]["kind"], "CREATED");

    let reservation = &body["outcome"]["reservation"];
    assert_eq!(reservation["venueId"], old_crown().to_string());
    assert_eq!(reservation["status"], "PENDING");
    assert_eq!(reservation["createdByUserId"], grace().to_string());
    assert_eq!(
        reservation["participants"]
            .as_array()
            .expect("participants array")
            .len(),
        2
    );
    assert_eq!(participant_status(reservation, grace()), "ACCEPTED");
    assert_eq!(participant_status(reservation, ada()), "INVITED");
    let scheduled = reservation["scheduledTime"]
        .as_str()
        .expect("scheduled time string");
    assert!(
        scheduled.contains("T19:00:00"),
        "auto-scheduled slot takes the configured hour: {scheduled}"
    );

    let response = actix_test::call_service(
        &app,
        get(&format!("/api/v1/reservations/{}", ada())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listing: Value = actix_test::read_body_json(response).await;
    let reservations = listing["reservations"].as_array().expect("reservations");
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0]["id"], reservation["id"]);
}

#[actix_web::test]
async fn a_third_member_is_absorbed_by_the_existing_booking() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    declare(&app, ada(), old_crown(), "INTERESTED").await;
    let (_, created) = declare(&app, grace(), old_crown(), "INTERESTED").await;
    let reservation_id = created["outcome"]["reservation"]["id"].clone();

    let (status, body) = declare(&app, alan(), old_crown(), "INTERESTED").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["outcome"]["kind"], "SKIPPED_DUPLICATE");
    assert_eq!(body["outcome"]["reservationId"], reservation_id);

    // The latecomer is not on the roster, so their listing stays empty.
    let response = actix_test::call_service(
        &app,
        get(&format!("/api/v1/reservations/{}", alan())),
    )
    .await;
    let listing: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        listing["reservations"].as_array().expect("reservations").len(),
        0
    );
}

#[actix_web::test]
async fn quorum_respects_a_higher_configured_minimum() {
    let state = fixtures::engine_state(fixtures::policy(3, None), &standard_population());
    let app = init_engine_app(state).await;

    declare(&app, ada(), old_crown(), "INTERESTED").await;
    let (_, body) = declare(&app, grace(), old_crown(), "INTERESTED").await;
    assert_eq!(body["outcome"]["kind"], "BELOW_QUORUM");
    assert_eq!(body["outcome"]["interested"], 2);

    let (_, body) = declare(&app, alan(), old_crown(), "INTERESTED").await;
    assert_eq!(body["outcome"]["kind"], "CREATED");
    let reservation = &body["outcome"]["reservation"];
    assert_eq!(
        reservation["participants"]
            .as_array()
            .expect("participants array")
            .len(),
        3
    );
    assert_eq!(reservation["createdByUserId"], alan().to_string());
    assert_eq!(participant_status(reservation, alan()), "ACCEPTED");
    assert_eq!(participant_status(reservation, ada()), "INVITED");
    assert_eq!(participant_status(reservation, grace()), "INVITED");
}

#[rstest]
#[case::unknown_user(Uuid::from_u128(0xDEAD), None)]
#[case::unknown_venue(Uuid::from_u128(0), Some(Uuid::from_u128(0xDEAD)))]
fn unknown_subjects_are_not_found(#[case] user: Uuid, #[case] venue: Option<Uuid>) {
    actix_rt::System::new().block_on(async move {
        let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
        let app = init_engine_app(state).await;

        // A nil user id stands for "use a seeded user" in the case table.
        let user = if user == Uuid::from_u128(0) { ada() } else { user };
        let venue = venue.unwrap_or_else(old_crown);
        let (status, body) = declare(&app, user, venue, "INTERESTED").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    });
}

#[rstest]
#[case::malformed_user_id(
    json!({ "userId": "not-a-uuid", "venueId": Uuid::from_u128(0xB1).to_string(), "status": "INTERESTED" }),
    "userId"
)]
#[case::unknown_status(
    json!({ "userId": Uuid::from_u128(0xA1).to_string(), "venueId": Uuid::from_u128(0xB1).to_string(), "status": "MAYBE" }),
    "status"
)]
fn malformed_payloads_are_rejected(#[case] payload: Value, #[case] field: &'static str) {
    actix_rt::System::new().block_on(async move {
        let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
        let app = init_engine_app(state).await;

        let response = actix_test::call_service(&app, post_json("/api/v1/interests", &payload)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
    });
}

#[actix_web::test]
async fn interest_listing_is_sorted_by_venue() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    declare(&app, ada(), spice_merchant(), "INTERESTED").await;
    declare(&app, ada(), old_crown(), "INTERESTED").await;

    let response = actix_test::call_service(
        &app,
        get(&format!("/api/v1/users/{}/interests", ada())),
    )
    .await;
    let listing: Value = actix_test::read_body_json(response).await;
    let interests = listing["interests"].as_array().expect("interests array");
    assert_eq!(interests.len(), 2);
    assert_eq!(interests[0]["venueId"], old_crown().to_string());
    assert_eq!(interests[1]["venueId"], spice_merchant().to_string());
}

#[actix_web::test]
async fn errors_carry_the_trace_identifier() {
    let state = fixtures::engine_state(ConsensusPolicy::default(), &standard_population());
    let app = init_engine_app(state).await;

    let request = post_json(
        "/api/v1/interests",
        &interest_payload(Uuid::from_u128(0xDEAD), old_crown(), "INTERESTED"),
    );
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get("trace-id")
        .expect("trace id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["traceId"], header);

    // Successful responses carry the header as well.
    let success = actix_test::call_service(
        &app,
        get(&format!("/api/v1/reservations/{}", edsger())),
    )
    .await;
    assert_eq!(success.status(), StatusCode::OK);
    assert!(success.headers().contains_key("trace-id"));
}
