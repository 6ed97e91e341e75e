//! Shared DTO types used across multiple endpoints.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ListFilter, StatusFilter};
use crate::error::KeeperError;

/// Query parameters accepted by the event and match list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// `all` (default) or a status name.
    #[serde(default)]
    pub status: Option<String>,
    /// Case-insensitive search term.
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    /// Converts the raw query into a typed filter.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] for an unknown status.
    pub fn into_filter<S>(self) -> Result<ListFilter<S>, KeeperError>
    where
        S: FromStr<Err = KeeperError> + PartialEq,
    {
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse::<StatusFilter<S>>()?,
            None => StatusFilter::All,
        };
        Ok(ListFilter::new(status, self.search.unwrap_or_default()))
    }
}

/// Envelope for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse<T> {
    /// Items in display order.
    pub data: Vec<T>,
    /// Number of items returned.
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            total: data.len(),
            data,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{EventFilter, EventStatus, MatchStatus};

    #[test]
    fn query_becomes_filter() {
        let query = ListQuery {
            status: Some("upcoming".to_string()),
            search: Some("cup".to_string()),
        };
        let Ok(filter) = query.into_filter::<EventStatus>() else {
            panic!("valid status");
        };
        assert_eq!(
            filter,
            EventFilter::new(StatusFilter::Only(EventStatus::Upcoming), "cup")
        );

        let Ok(all) = ListQuery::default().into_filter::<MatchStatus>() else {
            panic!("empty query is valid");
        };
        assert_eq!(all.status, StatusFilter::All);
        assert!(all.search.is_empty());

        let bad = ListQuery {
            status: Some("finished".to_string()),
            search: None,
        };
        assert!(bad.into_filter::<MatchStatus>().is_err());
    }
}
