use aws_sdk_dynamodb::types::AttributeValue;
use aws_smithy_types::base64;
use serde_json::{Number, Value};
use std::collections::HashMap;
use tracing::info;

use super::{CandidateStore, Item, ScanPage, StorageError};
use crate::candidate::CandidateRecord;

const KEY_ATTRIBUTE: &str = "id";

#[derive(Debug, Clone)]
pub struct DynamoCandidateStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoCandidateStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl CandidateStore for DynamoCandidateStore {
    async fn put(&self, record: &CandidateRecord) -> Result<(), StorageError> {
        let response = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record.into()))
            .send()
            .await
            .map_err(|err| StorageError::backend("PutItem", err))?;

        info!("Stored candidate {}: {:?}", record.id, response);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>, StorageError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|err| StorageError::backend("GetItem", err))?;

        output.item.map(decode_item).transpose()
    }

    async fn scan(&self, projection: &[&str]) -> Result<ScanPage, StorageError> {
        let (expression, names) = projection_expression(projection);
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .projection_expression(expression)
            .set_expression_attribute_names(Some(names))
            .send()
            .await
            .map_err(|err| StorageError::backend("Scan", err))?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(decode_item)
            .collect::<Result<Vec<_>, _>>()?;
        let continuation = output.last_evaluated_key.map(decode_item).transpose()?;

        Ok(ScanPage {
            items,
            continuation,
        })
    }
}

impl From<&CandidateRecord> for HashMap<String, AttributeValue> {
    fn from(record: &CandidateRecord) -> Self {
        HashMap::from([
            (KEY_ATTRIBUTE.into(), AttributeValue::S(record.id.clone())),
            ("fullname".into(), AttributeValue::S(record.fullname.clone())),
            ("email".into(), AttributeValue::S(record.email.clone())),
            (
                "experience".into(),
                AttributeValue::N(record.experience.to_string()),
            ),
            (
                "submittedAt".into(),
                AttributeValue::N(record.submitted_at.to_string()),
            ),
            (
                "updatedAt".into(),
                AttributeValue::N(record.updated_at.to_string()),
            ),
        ])
    }
}

/// Builds `#p0, #p1, ...` with the matching attribute name map, so projected
/// names never clash with reserved words.
fn projection_expression(projection: &[&str]) -> (String, HashMap<String, String>) {
    let mut placeholders = Vec::with_capacity(projection.len());
    let mut names = HashMap::with_capacity(projection.len());
    for (index, name) in projection.iter().enumerate() {
        let placeholder = format!("#p{index}");
        names.insert(placeholder.clone(), name.to_string());
        placeholders.push(placeholder);
    }

    (placeholders.join(", "), names)
}

fn decode_item(item: HashMap<String, AttributeValue>) -> Result<Item, StorageError> {
    item.into_iter()
        .map(|(name, value)| decode_value(value).map(|value| (name, value)))
        .collect()
}

fn decode_value(value: AttributeValue) -> Result<Value, StorageError> {
    match value {
        AttributeValue::S(text) => Ok(Value::String(text)),
        AttributeValue::N(raw) => decode_number(&raw),
        AttributeValue::Bool(flag) => Ok(Value::Bool(flag)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::M(map) => decode_item(map).map(Value::Object),
        AttributeValue::L(list) => list
            .into_iter()
            .map(decode_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::Ss(set) => Ok(Value::Array(set.into_iter().map(Value::String).collect())),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|raw| decode_number(raw))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        // binary goes out base64 encoded, as DynamoDB JSON renders it
        AttributeValue::B(blob) => Ok(Value::String(base64::encode(blob))),
        AttributeValue::Bs(set) => Ok(Value::Array(
            set.iter()
                .map(|blob| Value::String(base64::encode(blob)))
                .collect(),
        )),
        other => Err(StorageError::Decode(format!(
            "unsupported attribute value {other:?}"
        ))),
    }
}

fn decode_number(raw: &str) -> Result<Value, StorageError> {
    if let Ok(number) = raw.parse::<i64>() {
        return Ok(Value::from(number));
    }
    if let Ok(number) = raw.parse::<u64>() {
        return Ok(Value::from(number));
    }

    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StorageError::Decode(format!("invalid number `{raw}`")))
}
