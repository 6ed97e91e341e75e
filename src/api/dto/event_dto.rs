//! Request bodies for the event endpoints.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ParticipantRole;

/// Request body for `POST /events/join`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinEventRequest {
    /// Join code, any case.
    pub join_code: String,
    /// Role to ask for; `player` when omitted.
    #[serde(default)]
    pub requested_role: ParticipantRole,
}
