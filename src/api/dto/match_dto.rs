//! Request bodies for the match endpoints.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{MatchAction, MatchStatus, Scoreline};
use crate::error::KeeperError;

/// Request body for `POST /matches/{id}/status`.
///
/// Exactly one of `status` and `action` must be given.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// Target status.
    #[serde(default)]
    pub status: Option<MatchStatus>,
    /// Named admin action.
    #[serde(default)]
    pub action: Option<MatchAction>,
    /// Scores, applied only when completing.
    #[serde(flatten)]
    pub scores: Scoreline,
}

impl StatusUpdateRequest {
    /// Resolves the requested target status.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] when neither or both of
    /// `status` and `action` are set.
    pub fn target(&self) -> Result<MatchStatus, KeeperError> {
        match (self.status, self.action) {
            (Some(status), None) => Ok(status),
            (None, Some(action)) => Ok(action.target()),
            (None, None) => Err(KeeperError::ValidationFailed(
                "either status or action is required".to_string(),
            )),
            (Some(_), Some(_)) => Err(KeeperError::ValidationFailed(
                "give status or action, not both".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn action_or_status_resolves() {
        let Ok(req) = serde_json::from_str::<StatusUpdateRequest>(
            r#"{"action":"complete","score_a":2,"score_b":0}"#,
        ) else {
            panic!("valid body");
        };
        assert!(matches!(req.target(), Ok(MatchStatus::Completed)));
        assert_eq!(req.scores.score_a, Some(2));

        let Ok(req) = serde_json::from_str::<StatusUpdateRequest>(r#"{"status":"cancelled"}"#)
        else {
            panic!("valid body");
        };
        assert!(matches!(req.target(), Ok(MatchStatus::Cancelled)));
        assert_eq!(req.scores, Scoreline::default());

        let Ok(req) = serde_json::from_str::<StatusUpdateRequest>("{}") else {
            panic!("empty body parses");
        };
        assert!(req.target().is_err());
    }
}
