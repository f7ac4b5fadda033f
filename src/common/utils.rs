use lambda_http::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Request, RequestExt, Response};
use serde::Serialize;
use serde_json::Value;

use crate::common::errors::Error;

/// Parses the raw request body as JSON, whatever content type the caller sent.
pub fn extract_body(request: &Request) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(request.body().as_ref())
}

pub fn extract_path_parameter(request: &Request, name: &str) -> Option<String> {
    request
        .path_parameters_ref()
        .and_then(|params| params.first(name))
        .map(String::from)
}

pub fn json_response<T: Serialize>(
    status: StatusCode,
    payload: &T,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(payload)?)?;

    Ok(response)
}

/// Same as [`json_response`] with a CORS header admitting `origin`.
pub fn json_response_with_origin<T: Serialize>(
    status: StatusCode,
    payload: &T,
    origin: &str,
) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, origin)
        .body(serde_json::to_string(payload)?)?;

    Ok(response)
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();
}
