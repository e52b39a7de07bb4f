//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: all HTTP endpoints from the inbound layer (interests,
//!   recommendations, reservations, health)
//! - **Schemas**: the domain types and request/response bodies those
//!   endpoints exchange
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    ConsensusOutcome, Error, ErrorCode, GeoPoint, Interest, InterestStatus, ParticipantStatus,
    RecommendedPerson, RecommendedVenue, Reservation, ReservationParticipant, ReservationStatus,
    User, Venue,
};
use crate::inbound::http::interests::{
    SetInterestRequestBody, SetInterestResponseBody, UserInterestsResponseBody,
};
use crate::inbound::http::recommendations::RecommendationsResponseBody;
use crate::inbound::http::reservations::{
    CreateReservationRequestBody, InvitationAnswerRequestBody, InvitationAnswerResponseBody,
    UserReservationsResponseBody,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reservation consensus engine API",
        description = "HTTP interface for interest ingestion, venue recommendations, \
            reservation consensus, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::interests::set_interest,
        crate::inbound::http::interests::list_user_interests,
        crate::inbound::http::recommendations::recommend_venues,
        crate::inbound::http::reservations::create_reservation,
        crate::inbound::http::reservations::accept_invitation,
        crate::inbound::http::reservations::decline_invitation,
        crate::inbound::http::reservations::list_user_reservations,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Interest,
        InterestStatus,
        ConsensusOutcome,
        Reservation,
        ReservationParticipant,
        ReservationStatus,
        ParticipantStatus,
        RecommendedVenue,
        RecommendedPerson,
        User,
        Venue,
        GeoPoint,
        SetInterestRequestBody,
        SetInterestResponseBody,
        UserInterestsResponseBody,
        CreateReservationRequestBody,
        InvitationAnswerRequestBody,
        InvitationAnswerResponseBody,
        UserReservationsResponseBody,
        RecommendationsResponseBody,
    )),
    tags(
        (name = "interests", description = "Declaring and listing interest in venues"),
        (name = "recommendations", description = "Compatibility-ranked venue suggestions"),
        (name = "reservations", description = "Reservation creation and invitation lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI path registration and schema field structure.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/v1/interests",
            "/api/v1/users/{user_id}/interests",
            "/api/v1/recommendations/{user_id}",
            "/api/v1/reservations",
            "/api/v1/reservations/accept",
            "/api/v1/reservations/decline",
            "/api/v1/reservations/{user_id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path '{path}'");
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_reservation_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let reservation_schema = schemas.get("Reservation").expect("Reservation schema");

        assert_object_schema_has_field(reservation_schema, "id");
        assert_object_schema_has_field(reservation_schema, "venueId");
        assert_object_schema_has_field(reservation_schema, "participants");
    }
}
