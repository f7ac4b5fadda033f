//! Candidate submission Lambdas over a single DynamoDB table.
//!
//! Three functions share this library: `submit` creates a candidate record,
//! `list` scans a projected view of all candidates and `get-details` fetches
//! one record by id. Each binary wires the DynamoDB store into the matching
//! `handlers` module.

pub mod candidate;
pub mod common;
pub mod handlers;
pub mod store;
