//! Data Transfer Objects for REST request/response serialization.
//!
//! Domain records serialize directly; the types here cover request bodies,
//! query strings and response envelopes that have no domain counterpart.

pub mod access_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod event_dto;
pub mod match_dto;

pub use access_dto::*;
pub use auth_dto::*;
pub use common_dto::*;
pub use event_dto::*;
pub use match_dto::*;
