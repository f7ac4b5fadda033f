use lambda_http::http::StatusCode;
use lambda_http::{Request, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use super::CandidateError;
use crate::candidate;
use crate::common::errors::Error;
use crate::common::utils::{extract_body, json_response};
use crate::store::CandidateStore;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SubmitResponse {
    pub message: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
}

/// Validates `body` and stores it as a new candidate record.
///
/// Nothing is written unless validation succeeds.
pub async fn submit<S>(body: &Value, store: &S) -> Result<SubmitResponse, CandidateError>
where
    S: CandidateStore + Sync,
{
    let record = candidate::validate(body).map_err(|err| {
        error!("Validation failed: {}", err);
        CandidateError::from(err)
    })?;

    info!("Submitting candidate {}", record.id);
    if let Err(source) = store.put(&record).await {
        error!("Failed to store candidate {}: {}", record.id, source);
        return Err(CandidateError::Submit {
            email: record.email,
            source,
        });
    }

    Ok(SubmitResponse {
        message: format!("Sucessfully submitted candidate with email {}", record.email),
        candidate_id: record.id,
    })
}

#[tracing::instrument(skip(store))]
pub async fn process_request<S>(request: Request, store: &S) -> Result<Response<String>, Error>
where
    S: CandidateStore + Sync,
{
    let body = extract_body(&request).map_err(|err| {
        error!("Request body is not valid JSON: {}", err);
        CandidateError::MalformedBody(err).into_error()
    })?;

    let response = submit(&body, store)
        .await
        .map_err(CandidateError::into_error)?;

    json_response(StatusCode::OK, &response)
}
