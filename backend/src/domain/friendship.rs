//! Friendship data model.
//!
//! A friendship is a directed edge with a strength weight. The scorer treats
//! the relation as symmetric by averaging the two directed edges, so a single
//! direction is enough to register affinity.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ids::UserId;

/// Default strength assigned when an edge carries no explicit weight.
pub const DEFAULT_FRIENDSHIP_STRENGTH: f64 = 1.0;

/// Validation errors returned by [`Friendship::try_new`].
#[derive(Debug, Clone, PartialEq)]
pub enum FriendshipValidationError {
    SelfEdge,
    InvalidStrength { value: f64 },
}

impl fmt::Display for FriendshipValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfEdge => write!(f, "a user cannot befriend themselves"),
            Self::InvalidStrength { value } => {
                write!(f, "friendship strength {value} must be finite and non-negative")
            }
        }
    }
}

impl std::error::Error for FriendshipValidationError {}

/// Directed friendship edge with an affinity weight.
///
/// ## Invariants
/// - `user_id` and `friend_id` differ.
/// - `strength` is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Friendship {
    #[schema(value_type = String)]
    user_id: UserId,
    #[schema(value_type = String)]
    friend_id: UserId,
    #[schema(example = 1.0)]
    strength: f64,
}

impl Friendship {
    /// Validate and construct a directed friendship edge.
    pub fn try_new(
        user_id: UserId,
        friend_id: UserId,
        strength: f64,
    ) -> Result<Self, FriendshipValidationError> {
        if user_id == friend_id {
            return Err(FriendshipValidationError::SelfEdge);
        }
        if !strength.is_finite() || strength < 0.0 {
            return Err(FriendshipValidationError::InvalidStrength { value: strength });
        }
        Ok(Self {
            user_id,
            friend_id,
            strength,
        })
    }

    /// Owning side of the directed edge.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Target of the directed edge.
    #[must_use]
    pub fn friend_id(&self) -> &UserId {
        &self.friend_id
    }

    /// Affinity weight; larger means closer.
    #[rustfmt::skip]
    #[must_use]
    pub fn strength(&self) -> f64 { self.strength }
}
