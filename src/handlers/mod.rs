//! The three candidate operations.
//!
//! Every operation returns `Result<_, CandidateError>`, and every
//! `CandidateError` maps to one status code with a `{"message": ...}` body.

use lambda_http::http::StatusCode;
use lambda_http::Response;
use serde::Serialize;
use thiserror::Error;

use crate::candidate::ValidationError;
use crate::common::errors::Error;
use crate::common::utils::{json_response, json_response_with_origin};
use crate::store::StorageError;

pub mod get_details;
pub mod list;
pub mod submit;

pub const VALIDATION_FAILED_MESSAGE: &str =
    "Couldn't submit candidate because of validation errors.";
pub const FETCH_FAILED_MESSAGE: &str = "Couldn't fetch candidate.";
pub const LIST_FAILED_MESSAGE: &str = "Unable to list candidates";

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Missing path parameter {0}")]
    MissingPathParameter(&'static str),
    #[error("Unable to submit candidate with email {email}")]
    Submit {
        email: String,
        #[source]
        source: StorageError,
    },
    #[error("Unable to list candidates")]
    List(#[source] StorageError),
    #[error("Couldn't fetch candidate.")]
    Fetch(#[source] StorageError),
    #[error("Unable to serialize response: {0}")]
    Serialization(#[source] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl CandidateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CandidateError::MalformedBody(_)
            | CandidateError::Validation(_)
            | CandidateError::MissingPathParameter(_) => StatusCode::BAD_REQUEST,
            CandidateError::Submit { .. }
            | CandidateError::List(_)
            | CandidateError::Fetch(_)
            | CandidateError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The caller-visible message. Storage details never appear here.
    pub fn message(&self) -> String {
        match self {
            CandidateError::Validation(_) => VALIDATION_FAILED_MESSAGE.to_string(),
            CandidateError::List(_) => LIST_FAILED_MESSAGE.to_string(),
            CandidateError::Fetch(_) => FETCH_FAILED_MESSAGE.to_string(),
            CandidateError::Serialization(_) => "Unable to serialize response".to_string(),
            other => other.to_string(),
        }
    }

    pub fn into_response(self) -> Result<Response<String>, Error> {
        json_response(
            self.status_code(),
            &MessageBody {
                message: self.message(),
            },
        )
    }

    /// Same as [`CandidateError::into_response`], readable by a browser at `origin`.
    pub fn into_response_with_origin(self, origin: &str) -> Result<Response<String>, Error> {
        json_response_with_origin(
            self.status_code(),
            &MessageBody {
                message: self.message(),
            },
            origin,
        )
    }

    /// Turns the failure into a response for the caller, keeping the Lambda
    /// invocation itself successful.
    pub fn into_error(self) -> Error {
        match self.into_response() {
            Ok(response) => Error::HttpError(response),
            Err(err) => err,
        }
    }
}

impl From<CandidateError> for Error {
    fn from(err: CandidateError) -> Self {
        err.into_error()
    }
}
