//! Generated population data structures.
//!
//! These types describe a generated demo population in a transport-friendly
//! shape. They carry plain identifiers and primitives rather than backend
//! domain types, so consumers convert them at their own boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated demo user.
///
/// # Examples
///
/// ```
/// use example_data::ExampleUserSeed;
/// use uuid::Uuid;
///
/// let user = ExampleUserSeed {
///     id: Uuid::nil(),
///     display_name: "Alice Example".to_owned(),
/// };
/// let json = serde_json::to_value(&user).expect("serializes");
/// assert_eq!(json["displayName"], "Alice Example");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUserSeed {
    /// Stable identifier for the user.
    pub id: Uuid,
    /// Display name satisfying the backend's validation rules.
    pub display_name: String,
}

/// A generated demo venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleVenueSeed {
    /// Stable identifier for the venue.
    pub id: Uuid,
    /// Human-readable venue name.
    pub name: String,
    /// Category drawn from the registry's venue categories.
    pub category: String,
    /// Street address.
    pub address: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A generated friendship between two demo users.
///
/// Friendships are directed pairs; the generator emits one row per edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleFriendshipSeed {
    /// The user owning this friendship edge.
    pub user_id: Uuid,
    /// The befriended user.
    pub friend_id: Uuid,
    /// Relationship strength in `(0.0, 1.0]`.
    pub strength: f64,
}

/// A complete generated demo population.
///
/// # Examples
///
/// ```
/// use example_data::DemoPopulation;
///
/// let population = DemoPopulation {
///     users: Vec::new(),
///     venues: Vec::new(),
///     friendships: Vec::new(),
/// };
/// assert!(population.users.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoPopulation {
    /// Generated users.
    pub users: Vec<ExampleUserSeed>,
    /// Generated venues.
    pub venues: Vec<ExampleVenueSeed>,
    /// Generated friendship edges.
    pub friendships: Vec<ExampleFriendshipSeed>,
}
