//! RFC 9457 Problem Details (pure data model)

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// RFC 9457 Problem Details for HTTP APIs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Problem {
    /// URI reference identifying the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// Short, human-readable summary of the problem type.
    pub title: String,
    /// HTTP status code, serialized as a number.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    /// Explanation specific to this occurrence.
    pub detail: String,
    /// URI reference identifying this occurrence (usually the request path).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    /// Machine-readable code from the error catalogue.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// The `invalid-params` extension member.
    #[serde(
        default,
        rename = "invalid-params",
        skip_serializing_if = "Option::is_none"
    )]
    pub invalid_params: Option<Vec<InvalidParam>>,
}

/// One rejected request parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvalidParam {
    pub name: String,
    pub reason: String,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            trace_id: None,
            invalid_params: None,
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_invalid_params(mut self, params: Vec<InvalidParam>) -> Self {
        self.invalid_params = Some(params);
        self
    }

    /// Render as a JSON response with the `application/problem+json` content type.
    #[must_use]
    pub fn into_response(self) -> Response<serde_json::Value> {
        let status = self.status;
        let body = serde_json::to_value(&self).unwrap_or_else(|_| {
            serde_json::json!({ "title": self.title, "status": status.as_u16() })
        });
        let mut resp = Response::new(body);
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.title, self.detail)
    }
}

impl std::error::Error for Problem {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_every_member() {
        let p = Problem::new(StatusCode::BAD_REQUEST, "Bad Request", "unknown field")
            .with_code("ft.projection.invalid_fields")
            .with_instance("/api/v1/teams")
            .with_trace_id("req-7")
            .with_invalid_params(vec![InvalidParam {
                name: "fields".to_owned(),
                reason: "unknown field 'bogus'".to_owned(),
            }]);

        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.code, "ft.projection.invalid_fields");
        assert_eq!(p.instance, "/api/v1/teams");
        assert_eq!(p.trace_id.as_deref(), Some("req-7"));
        assert_eq!(p.invalid_params.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn status_serializes_as_number_and_empty_members_are_skipped() {
        let p = Problem::new(StatusCode::NOT_FOUND, "Not Found", "no such team");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["type"], "about:blank");
        assert!(json.get("instance").is_none());
        assert!(json.get("invalid-params").is_none());
    }

    #[test]
    fn deserializes_from_wire_form() {
        let raw = r#"{"type":"about:blank","title":"Not Found","status":404,"detail":"gone"}"#;
        let p: Problem = serde_json::from_str(raw).unwrap();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert!(p.code.is_empty());
    }

    #[test]
    fn response_has_problem_content_type() {
        let resp = Problem::new(StatusCode::BAD_REQUEST, "Bad Request", "nope").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );
        assert_eq!(resp.body()["detail"], "nope");
    }
}
