//! In-process HTTP harness mirroring the production route layout.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::Value;

use backend::Trace;
use backend::inbound::http::interests::{list_user_interests, set_interest};
use backend::inbound::http::recommendations::recommend_venues;
use backend::inbound::http::reservations::{
    accept_invitation, create_reservation, decline_invitation, list_user_reservations,
};
use backend::inbound::http::state::HttpState;

/// Build the engine app the way the server composes it: the versioned API
/// scope behind the trace middleware.
pub(crate) async fn init_engine_app(
    state: web::Data<HttpState>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let api = web::scope("/api/v1")
        .service(set_interest)
        .service(list_user_interests)
        .service(recommend_venues)
        .service(create_reservation)
        .service(accept_invitation)
        .service(decline_invitation)
        .service(list_user_reservations);
    test::init_service(App::new().app_data(state).wrap(Trace).service(api)).await
}

pub(crate) fn post_json(path: &str, payload: &Value) -> Request {
    test::TestRequest::post()
        .uri(path)
        .set_json(payload)
        .to_request()
}

pub(crate) fn get(path: &str) -> Request {
    test::TestRequest::get().uri(path).to_request()
}
