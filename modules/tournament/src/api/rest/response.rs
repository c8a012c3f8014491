//! Response construction helpers.

use ft_problem::Problem;
use ft_projection::PaginationMetadata;
use http::header::{ALLOW, CONTENT_TYPE, HeaderName, HeaderValue, LOCATION};
use http::{Response, StatusCode};
use serde_json::Value;

use super::error::internal_problem;

pub type ApiResponse = Response<Value>;
pub type ApiResult = Result<ApiResponse, Problem>;

/// Header carrying the JSON paging block of a collection response.
pub static X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// Vendor media type under which a single group is returned with links.
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.marvin.hateoas+json";

fn json(status: StatusCode, body: Value) -> ApiResponse {
    let mut resp = Response::new(body);
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    resp
}

#[must_use]
pub fn ok_json(body: Value) -> ApiResponse {
    json(StatusCode::OK, body)
}

/// 201 with a `Location` header pointing at the new resource.
///
/// # Errors
/// Returns a 500 Problem if `location` is not a valid header value.
pub fn created_json(body: Value, location: &str, instance: &str) -> ApiResult {
    let location = HeaderValue::from_str(location)
        .map_err(|e| internal_problem(&format!("bad Location header: {e}"), instance))?;
    let mut resp = json(StatusCode::CREATED, body);
    resp.headers_mut().insert(LOCATION, location);
    Ok(resp)
}

#[must_use]
pub fn no_content() -> ApiResponse {
    let mut resp = Response::new(Value::Null);
    *resp.status_mut() = StatusCode::NO_CONTENT;
    resp
}

/// Empty 200 advertising the methods a collection supports.
#[must_use]
pub fn allow(methods: &'static str) -> ApiResponse {
    let mut resp = Response::new(Value::Null);
    resp.headers_mut()
        .insert(ALLOW, HeaderValue::from_static(methods));
    resp
}

/// Attach `X-Pagination` to a collection response.
///
/// # Errors
/// Returns a 500 Problem if the metadata cannot be rendered as a header.
pub fn with_pagination(
    mut resp: ApiResponse,
    metadata: &PaginationMetadata,
    instance: &str,
) -> ApiResult {
    let encoded = serde_json::to_string(metadata)
        .map_err(|e| internal_problem(&format!("pagination metadata: {e}"), instance))?;
    let value = HeaderValue::from_str(&encoded)
        .map_err(|e| internal_problem(&format!("pagination header: {e}"), instance))?;
    resp.headers_mut().insert(X_PAGINATION.clone(), value);
    Ok(resp)
}

/// Collapse a handler result into the response that goes on the wire.
#[must_use]
pub fn into_response(result: ApiResult) -> ApiResponse {
    result.unwrap_or_else(Problem::into_response)
}
