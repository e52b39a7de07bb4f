//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod interests;
pub mod recommendations;
pub mod reservations;
pub mod state;
pub mod validation;

pub use crate::domain::ApiResult;
