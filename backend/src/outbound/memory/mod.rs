//! In-memory adapters for the engine's stores and directories.
//!
//! This family backs the driven ports with process-local state:
//!
//! - **Interest store**: append-only history plus a latest-wins projection,
//!   published behind a snapshot-swap lock so reads never block writers.
//! - **Reservation store**: one authoritative copy per reservation id with
//!   insert/update separation, read through the same snapshot pattern.
//! - **Seeded directories**: fixed user, venue, and friendship sets loaded
//!   at startup; the engine treats identity and catalogue data as external.
//!
//! Adapters are thin translators between port calls and the shared state.
//! They contain no business logic; serialization of quorum-sensitive writes
//! is owned by the coordinator's per-venue locks.

mod directories;
mod interest_repository;
mod reservation_repository;

pub use directories::{SeededFriendshipDirectory, SeededUserDirectory, SeededVenueDirectory};
pub use interest_repository::MemoryInterestRepository;
pub use reservation_repository::MemoryReservationRepository;
