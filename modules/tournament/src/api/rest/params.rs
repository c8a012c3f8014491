//! Query-string binding for the tournament endpoints.

use ft_projection::ListParams;
use serde::Deserialize;

/// `fields`, `orderBy`, `pageNumber` and `pageSize` for `GET /teams`.
pub type TeamsParameters = ListParams;

/// Same parameters for `GET /groups` and `GET /groups/{id}/teams`.
pub type GroupsParameters = ListParams;

/// Parameters accepted when reading a single resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemParameters {
    pub fields: Option<String>,
}

impl ItemParameters {
    /// # Errors
    /// Returns `ft_projection::Error::InvalidQuery` for an undecodable query.
    pub fn from_query(raw: &str) -> Result<Self, ft_projection::Error> {
        serde_urlencoded::from_str(raw).map_err(|e| ft_projection::Error::InvalidQuery(e.to_string()))
    }
}
