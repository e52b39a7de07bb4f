//! Recommendation ranking over the REST surface.
//!
//! Interests are declared through the API with a deliberately unreachable
//! quorum so no reservation is created as a side effect; the assertions then
//! pin the aggregate venue ordering, the social score arithmetic, and the
//! attached people lists.

#[allow(dead_code)]
#[path = "support/fixtures.rs"]
mod fixtures;
#[path = "support/http.rs"]
mod http_support;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::ConsensusPolicy;
use serde_json::{Value, json};
use uuid::Uuid;

use fixtures::{ada, alan, grace, old_crown, spice_merchant, standard_population, verdant_cafe};
use http_support::{get, init_engine_app, post_json};

/// Friendship strengths in the standard population give these pairwise
/// compatibility scores for Ada, whose own interest set starts empty:
/// 0.4 * (0.9 / 1.9) with Grace and 0.4 * (0.5 / 1.5) with Alan.
const ADA_GRACE: f64 = 0.4 * (0.9 / 1.9);
const ADA_ALAN: f64 = 0.4 * (0.5 / 1.5);

fn unreachable_quorum() -> ConsensusPolicy {
    fixtures::policy(10, None)
}

async fn declare(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    user: Uuid,
    venue: Uuid,
    status: &str,
) {
    let payload = json!({
        "userId": user.to_string(),
        "venueId": venue.to_string(),
        "status": status,
    });
    let response = test::call_service(app, post_json("/api/v1/interests", &payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn recommendations_for(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    path: &str,
) -> (StatusCode, Value) {
    let response = test::call_service(app, get(path)).await;
    let status = response.status();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}

fn venue_ids(body: &Value) -> Vec<String> {
    body["recommendedVenues"]
        .as_array()
        .expect("recommendedVenues array")
        .iter()
        .map(|entry| {
            entry["venue"]["id"]
                .as_str()
                .expect("venue id string")
                .to_owned()
        })
        .collect()
}

fn scores(body: &Value) -> Vec<f64> {
    body["recommendedVenues"]
        .as_array()
        .expect("recommendedVenues array")
        .iter()
        .map(|entry| entry["score"].as_f64().expect("score number"))
        .collect()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[actix_web::test]
async fn venues_rank_by_aggregate_social_score() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;
    declare(&app, grace(), old_crown(), "INTERESTED").await;
    declare(&app, alan(), old_crown(), "INTERESTED").await;
    declare(&app, grace(), verdant_cafe(), "INTERESTED").await;

    let (status, body) =
        recommendations_for(&app, &format!("/api/v1/recommendations/{}", ada())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        venue_ids(&body),
        vec![
            old_crown().to_string(),
            verdant_cafe().to_string(),
            spice_merchant().to_string(),
        ]
    );
    let scores = scores(&body);
    assert!(close(scores[0], 5.0 * (ADA_GRACE + ADA_ALAN)));
    assert!(close(scores[1], 5.0 * ADA_GRACE));
    assert!(close(scores[2], 0.0));

    // People attach in descending compatibility order.
    let people = body["recommendedVenues"][0]["recommendedPeople"]
        .as_array()
        .expect("people array");
    assert_eq!(people.len(), 2);
    assert_eq!(people[0]["user"]["id"], grace().to_string());
    assert_eq!(people[1]["user"]["id"], alan().to_string());
    assert!(close(
        people[0]["compatibilityScore"].as_f64().expect("score"),
        ADA_GRACE
    ));
    assert!(close(
        people[1]["compatibilityScore"].as_f64().expect("score"),
        ADA_ALAN
    ));
}

#[actix_web::test]
async fn a_users_own_interest_lifts_the_venue() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;
    declare(&app, ada(), spice_merchant(), "INTERESTED").await;

    let (_, body) =
        recommendations_for(&app, &format!("/api/v1/recommendations/{}", ada())).await;

    assert_eq!(
        venue_ids(&body),
        vec![
            spice_merchant().to_string(),
            old_crown().to_string(),
            verdant_cafe().to_string(),
        ]
    );
    assert!(close(scores(&body)[0], 10.0));
}

#[actix_web::test]
async fn proximity_dominates_at_the_origin() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;

    // Query from the cafe's doorstep; the decay term is 1 at zero distance.
    let (status, body) = recommendations_for(
        &app,
        &format!("/api/v1/recommendations/{}?lat=51.5360&lon=-0.1030", ada()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids = venue_ids(&body);
    assert_eq!(ids.first(), Some(&verdant_cafe().to_string()));
    assert!(close(scores(&body)[0], 50.0));
    assert_eq!(ids.len(), 3);
}

#[actix_web::test]
async fn venues_the_user_rejected_are_excluded() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;
    declare(&app, grace(), verdant_cafe(), "INTERESTED").await;
    declare(&app, grace(), old_crown(), "INTERESTED").await;
    declare(&app, ada(), verdant_cafe(), "NOT_INTERESTED").await;

    let (_, body) =
        recommendations_for(&app, &format!("/api/v1/recommendations/{}", ada())).await;

    let ids = venue_ids(&body);
    assert_eq!(ids.len(), 2);
    assert!(!ids.contains(&verdant_cafe().to_string()));
    assert_eq!(ids.first(), Some(&old_crown().to_string()));
}

#[actix_web::test]
async fn people_lists_respect_the_configured_cap() {
    let mut settings = fixtures::engine_settings();
    settings.min_participants = 10;
    settings.recommended_people_limit = 1;
    let state = fixtures::engine_state(fixtures::policy_from(settings), &standard_population());
    let app = init_engine_app(state).await;
    declare(&app, grace(), old_crown(), "INTERESTED").await;
    declare(&app, alan(), old_crown(), "INTERESTED").await;

    let (_, body) =
        recommendations_for(&app, &format!("/api/v1/recommendations/{}", ada())).await;

    let people = body["recommendedVenues"][0]["recommendedPeople"]
        .as_array()
        .expect("people array");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["user"]["id"], grace().to_string());
}

#[actix_web::test]
async fn equal_scores_fall_back_to_venue_order() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;
    declare(&app, grace(), verdant_cafe(), "INTERESTED").await;
    declare(&app, grace(), spice_merchant(), "INTERESTED").await;

    let (_, body) =
        recommendations_for(&app, &format!("/api/v1/recommendations/{}", ada())).await;

    assert_eq!(
        venue_ids(&body),
        vec![
            verdant_cafe().to_string(),
            spice_merchant().to_string(),
            old_crown().to_string(),
        ]
    );
}

#[actix_web::test]
async fn unknown_viewers_are_not_found() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;

    let (status, body) = recommendations_for(
        &app,
        &format!("/api/v1/recommendations/{}", Uuid::from_u128(0xDEAD)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn half_an_origin_is_rejected() {
    let state = fixtures::engine_state(unreachable_quorum(), &standard_population());
    let app = init_engine_app(state).await;

    let (status, body) = recommendations_for(
        &app,
        &format!("/api/v1/recommendations/{}?lat=51.5", ada()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "incomplete_coordinates");
    assert_eq!(body["details"]["field"], "lon");
}
