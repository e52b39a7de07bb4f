//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories and directories) face the adapters; driving
//! ports (commands and queries) face the inbound HTTP layer.

mod macros;
pub(crate) use macros::define_port_error;

mod friendship_directory;
mod interest_command;
mod interest_query;
mod interest_repository;
mod recommendation_query;
mod reservation_command;
mod reservation_query;
mod reservation_repository;
mod user_directory;
mod venue_directory;

#[cfg(test)]
pub use friendship_directory::MockFriendshipDirectory;
pub use friendship_directory::{
    FixtureFriendshipDirectory, FriendshipDirectory, FriendshipDirectoryError,
};
#[cfg(test)]
pub use interest_command::MockInterestCommand;
pub use interest_command::{
    FixtureInterestCommand, InterestCommand, SetInterestRequest, SetInterestResponse,
};
#[cfg(test)]
pub use interest_query::MockInterestQuery;
pub use interest_query::{
    FixtureInterestQuery, InterestQuery, ListUserInterestsRequest, ListUserInterestsResponse,
};
#[cfg(test)]
pub use interest_repository::MockInterestRepository;
pub use interest_repository::{
    FixtureInterestRepository, InterestRepository, InterestRepositoryError,
};
#[cfg(test)]
pub use recommendation_query::MockRecommendationQuery;
pub use recommendation_query::{
    FixtureRecommendationQuery, RecommendationQuery, RecommendationRequest, RecommendationResponse,
};
#[cfg(test)]
pub use reservation_command::MockReservationCommand;
pub use reservation_command::{
    CreateReservationRequest, CreateReservationResponse, FixtureReservationCommand,
    InvitationAnswerRequest, InvitationAnswerResponse, ReservationCommand,
};
#[cfg(test)]
pub use reservation_query::MockReservationQuery;
pub use reservation_query::{
    FixtureReservationQuery, ListUserReservationsRequest, ListUserReservationsResponse,
    ReservationQuery,
};
#[cfg(test)]
pub use reservation_repository::MockReservationRepository;
pub use reservation_repository::{
    FixtureReservationRepository, ReservationRepository, ReservationRepositoryError,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use venue_directory::MockVenueDirectory;
pub use venue_directory::{FixtureVenueDirectory, VenueDirectory, VenueDirectoryError};
