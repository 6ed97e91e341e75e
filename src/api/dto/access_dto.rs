//! Query and response for `GET /access`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AccessDecision, AppRoute};

/// Query parameters for `GET /access`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccessQuery {
    /// Client-side path, e.g. `/admin/events/create`.
    pub path: String,
}

/// Whether the caller may open a client route.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessResponse {
    /// Path that was checked.
    pub path: String,
    /// Matched route; `null` for unknown paths, which are public.
    pub route: Option<AppRoute>,
    /// Policy outcome.
    pub decision: AccessDecision,
    /// Where to navigate instead, if not allowed.
    pub redirect_to: Option<String>,
}
