//! Domain model and services for the reservation consensus engine.
//!
//! Purpose: hold the engine's entities, value objects, ports, and the
//! services implementing interest ingestion, recommendation, quorum
//! consensus, and the reservation lifecycle. Everything here is transport
//! agnostic; inbound adapters speak to the driving ports and outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic failure envelope.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Interest, Reservation, User, Venue, Friendship — core entities.
//! - ConsensusCoordinator, QuorumDetector, CompatibilityScorer — consensus
//!   and scoring.
//! - ports — driving and driven port traits with their fixtures.

pub mod consensus;
pub mod error;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod friendship;
pub mod ids;
pub mod interest;
pub mod interest_service;
pub mod ports;
pub mod quorum;
pub mod recommendation;
pub mod reservation;
pub mod reservation_service;
pub(crate) mod retry;
pub mod scoring;
pub mod settings;
pub mod user;
pub mod venue;
pub mod venue_locks;

pub use self::consensus::{ConsensusCoordinator, ConsensusOutcome};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
#[cfg(feature = "example-data")]
pub use self::example_data::{DemoData, ExampleDataError};
pub use self::friendship::{Friendship, FriendshipValidationError};
pub use self::ids::{
    InterestId, InterestIdValidationError, ParticipantId, ParticipantIdValidationError,
    ReservationId, ReservationIdValidationError, UserId, UserIdValidationError, VenueId,
    VenueIdValidationError,
};
pub use self::interest::{Interest, InterestStatus, InterestStatusParseError};
pub use self::interest_service::{InterestCommandService, InterestQueryService};
pub use self::quorum::{QuorumDecision, QuorumDetector};
pub use self::recommendation::{RecommendationService, RecommendedPerson, RecommendedVenue};
pub use self::reservation::{
    ParticipantStatus, Reservation, ReservationParticipant, ReservationStatus,
    ReservationTransitionError, ReservationValidationError,
};
pub use self::reservation_service::ReservationLifecycleService;
pub use self::scoring::{haversine_km, jaccard_index, CompatibilityScorer};
pub use self::settings::{ConfirmationThreshold, ConsensusPolicy, ConsensusSettings};
pub use self::user::{DisplayName, User, UserValidationError};
pub use self::venue::{GeoPoint, Venue, VenueValidationError};
pub use self::venue_locks::{VenueLease, VenueLockRegistry, VenueLockTimeout};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
