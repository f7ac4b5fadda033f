use lambda_http::http::StatusCode;
use lambda_http::{Request, Response};
use tracing::{error, info};

use super::CandidateError;
use crate::common::errors::Error;
use crate::common::utils::{extract_path_parameter, json_response};
use crate::store::{CandidateStore, Item};

pub const ID_PARAMETER: &str = "id";

/// Fetches one record. A missing record is `Ok(None)`, not an error.
pub async fn get_details<S>(id: &str, store: &S) -> Result<Option<Item>, CandidateError>
where
    S: CandidateStore + Sync,
{
    store.get(id).await.map_err(|err| {
        error!("Failed to fetch candidate {}: {}", id, err);
        CandidateError::Fetch(err)
    })
}

#[tracing::instrument(skip(store))]
pub async fn process_request<S>(request: Request, store: &S) -> Result<Response<String>, Error>
where
    S: CandidateStore + Sync,
{
    let id = extract_path_parameter(&request, ID_PARAMETER)
        .ok_or(CandidateError::MissingPathParameter(ID_PARAMETER))?;

    info!("Fetching candidate {}", id);
    let item = get_details(&id, store).await?;
    if item.is_none() {
        info!("Candidate {} not found", id);
    }

    json_response(StatusCode::OK, &item)
}
