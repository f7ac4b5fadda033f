use lambda_http::http::StatusCode;
use lambda_http::Response;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::CandidateError;
use crate::common::errors::Error;
use crate::common::utils::json_response_with_origin;
use crate::common::ALLOWED_ORIGIN;
use crate::store::{CandidateStore, Item};

/// Attributes requested from the scan. The stored attribute is `email`, so
/// `emails` never matches and listings carry only `id` and `fullname`.
pub const LIST_PROJECTION: [&str; 3] = ["id", "fullname", "emails"];

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListResponse {
    pub candidate: Vec<Item>,
}

pub async fn list<S>(store: &S) -> Result<ListResponse, CandidateError>
where
    S: CandidateStore + Sync,
{
    info!("Scanning candidate table");
    let page = store.scan(&LIST_PROJECTION).await.map_err(|err| {
        error!("Scan failed to load data: {}", err);
        CandidateError::List(err)
    })?;

    info!("Scan succeeded with {} items", page.items.len());
    if page.continuation.is_some() {
        warn!("Scan returned a continuation key; only the first page is listed");
    }

    Ok(ListResponse {
        candidate: page.items,
    })
}

#[tracing::instrument(skip(store))]
pub async fn process_request<S>(store: &S) -> Result<Response<String>, Error>
where
    S: CandidateStore + Sync,
{
    info!("Listing");
    let response = match list(store).await {
        Ok(response) => response,
        Err(err) => {
            return Err(Error::HttpError(
                err.into_response_with_origin(ALLOWED_ORIGIN)?,
            ))
        }
    };

    json_response_with_origin(StatusCode::OK, &response, ALLOWED_ORIGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::validate;
    use crate::store::memory::MemoryCandidateStore;
    use lambda_http::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
    use serde_json::{json, Value};

    async fn seeded_store(count: usize) -> MemoryCandidateStore {
        let store = MemoryCandidateStore::new();
        for index in 0..count {
            let record = validate(&json!({
                "fullname": format!("Candidate {index}"),
                "email": format!("c{index}@example.com"),
                "experience": index
            }))
            .expect("valid submission");
            store.put(&record).await.expect("put succeeds");
        }
        store
    }

    #[tokio::test]
    async fn lists_projected_items_with_cors_header() {
        let store = seeded_store(3).await;

        let response = process_request(&store).await.expect("listing succeeds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8017"
        );

        let body: ListResponse = serde_json::from_str(response.body()).expect("list body");
        assert_eq!(body.candidate.len(), 3);
        for item in &body.candidate {
            let mut keys: Vec<&str> = item.keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["fullname", "id"]);
        }
    }

    #[tokio::test]
    async fn listing_does_not_write() {
        let store = seeded_store(2).await;
        let writes = store.writes();

        let listed = list(&store).await.expect("listing succeeds");
        assert!(listed.candidate.len() <= store.len());
        assert_eq!(store.writes(), writes);
    }

    #[tokio::test]
    async fn lists_only_the_first_page() {
        let store = MemoryCandidateStore::with_page_size(2);
        for index in 0..5 {
            store.insert_raw(
                json!({"id": format!("id-{index}"), "fullname": format!("Candidate {index}")})
                    .as_object()
                    .cloned()
                    .expect("object"),
            );
        }

        let page = store.scan(&LIST_PROJECTION).await.expect("scan succeeds");
        let resume_from = page.continuation.expect("more items remain");
        assert_eq!(Value::Object(resume_from), json!({"id": "id-1"}));

        let response = process_request(&store).await.expect("listing succeeds");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_str(response.body()).expect("list body");
        assert_eq!(
            body,
            json!({"candidate": [
                {"id": "id-0", "fullname": "Candidate 0"},
                {"id": "id-1", "fullname": "Candidate 1"}
            ]})
        );
        // one scan above, one for the request: the continuation is never followed
        assert_eq!(store.scans(), 2);
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let store = MemoryCandidateStore::new();

        let response = process_request(&store).await.expect("listing succeeds");
        let body: Value = serde_json::from_str(response.body()).expect("list body");
        assert_eq!(body, json!({"candidate": []}));
    }

    #[tokio::test]
    async fn scan_failure_is_a_server_error() {
        let store = seeded_store(1).await;
        store.fail_all();

        match process_request(&store).await {
            Err(Error::HttpError(response)) => {
                assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(
                    response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
                    "http://localhost:8017"
                );
                let body: Value = serde_json::from_str(response.body()).expect("json body");
                assert_eq!(body["message"], "Unable to list candidates");
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }
}
