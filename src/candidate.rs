//! Candidate record construction from untrusted submissions.
//!
//! Only the JSON types of `fullname`, `email` and `experience` are checked.
//! Empty strings pass, as does any email-shaped or non-email-shaped string.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("submission must be a JSON object")]
    NotAnObject,
    #[error("field `{field}` must be a {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// The typed fields of a submission, before an id and timestamps are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub fullname: String,
    pub email: String,
    pub experience: Number,
}

impl Submission {
    pub fn from_value(input: &Value) -> Result<Self, ValidationError> {
        let object = input.as_object().ok_or(ValidationError::NotAnObject)?;

        let fullname = object
            .get("fullname")
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidField {
                field: "fullname",
                expected: "string",
            })?;
        let email = object
            .get("email")
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidField {
                field: "email",
                expected: "string",
            })?;
        let experience = match object.get("experience") {
            Some(Value::Number(number)) => number.clone(),
            _ => {
                return Err(ValidationError::InvalidField {
                    field: "experience",
                    expected: "number",
                })
            }
        };

        Ok(Self {
            fullname: fullname.to_string(),
            email: email.to_string(),
            experience,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    pub fullname: String,
    pub email: String,
    pub experience: Number,
    /// Epoch milliseconds.
    pub submitted_at: i64,
    pub updated_at: i64,
}

impl CandidateRecord {
    pub fn new(submission: Submission, id: impl Into<String>, now_millis: i64) -> Self {
        Self {
            id: id.into(),
            fullname: submission.fullname,
            email: submission.email,
            experience: submission.experience,
            submitted_at: now_millis,
            updated_at: now_millis,
        }
    }
}

/// Validates `input` and builds a fresh record with a new time-ordered id.
pub fn validate(input: &Value) -> Result<CandidateRecord, ValidationError> {
    let submission = Submission::from_value(input)?;
    Ok(CandidateRecord::new(
        submission,
        Uuid::now_v7().to_string(),
        now_millis(),
    ))
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
