//! Storage collaborator for candidate records.
//!
//! Handlers only see [`CandidateStore`]; the DynamoDB adapter is wired in by the
//! binaries and an in-memory store backs the tests.

use serde_json::{Map, Value};
use std::future::Future;
use thiserror::Error;

use crate::candidate::CandidateRecord;

pub mod dynamo;
#[cfg(test)]
pub mod memory;

pub use dynamo::DynamoCandidateStore;

/// A stored item rendered as JSON, exactly as the table returned it.
pub type Item = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("cannot decode stored attribute: {0}")]
    Decode(String),
}

impl StorageError {
    pub fn backend<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StorageError::Backend {
            operation,
            source: source.into(),
        }
    }
}

/// One page of a table scan.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Key to resume the scan from, when the table had more to return.
    pub continuation: Option<Item>,
}

pub trait CandidateStore {
    fn put(
        &self,
        record: &CandidateRecord,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Item>, StorageError>> + Send;

    /// Reads the first page of the table, keeping only the `projection` attributes.
    fn scan(
        &self,
        projection: &[&str],
    ) -> impl Future<Output = Result<ScanPage, StorageError>> + Send;
}
