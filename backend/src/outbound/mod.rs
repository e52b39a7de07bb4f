//! Outbound adapters implementing domain ports for infrastructure concerns.
//!
//! This module follows the hexagonal architecture pattern, providing
//! concrete implementations of domain port traits:
//!
//! - **memory**: process-local stores and seeded directories backing the
//!   interest ledger, the reservation book, and the identity lookups.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
