//! API entry point and version endpoints.

use ft_projection::{Method, rel};
use serde_json::json;
use tracing::instrument;

use super::handlers::TournamentApi;
use super::response::{ApiResponse, ok_json};

pub const API_VERSION: &str = "1.0";

impl TournamentApi {
    /// `GET /`: where a client can go from the entry point.
    #[instrument(skip(self))]
    #[must_use]
    pub fn get_root(&self) -> ApiResponse {
        let links = self.links();
        let root: [&str; 0] = [];
        let body = vec![
            links.link(&root, rel::SELF, Method::Get),
            links.link(&["teams"], "teams", Method::Get),
            links.link(&["teams"], "create_team", Method::Post),
            links.link(&["groups"], "groups", Method::Get),
        ];
        ok_json(json!(body))
    }

    /// `GET /version`
    #[must_use]
    pub fn api_version() -> ApiResponse {
        ok_json(json!(format!("Version: {API_VERSION}")))
    }
}

