//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    InterestCommand, InterestQuery, RecommendationQuery, ReservationCommand, ReservationQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::ports::{
///     FixtureInterestCommand, FixtureInterestQuery, FixtureRecommendationQuery,
///     FixtureReservationCommand, FixtureReservationQuery,
/// };
/// use backend::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     interests: Arc::new(FixtureInterestCommand),
///     interests_query: Arc::new(FixtureInterestQuery),
///     recommendations: Arc::new(FixtureRecommendationQuery),
///     reservations: Arc::new(FixtureReservationCommand),
///     reservations_query: Arc::new(FixtureReservationQuery),
/// };
/// let _interests = state.interests.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub interests: Arc<dyn InterestCommand>,
    pub interests_query: Arc<dyn InterestQuery>,
    pub recommendations: Arc<dyn RecommendationQuery>,
    pub reservations: Arc<dyn ReservationCommand>,
    pub reservations_query: Arc<dyn ReservationQuery>,
}
