//! DynamoDB record storage.
//!
//! One row per record in a single table:
//!
//! | Attribute | Type   | Description            |
//! |-----------|--------|------------------------|
//! | `id`      | String | Partition key          |
//! | `task`    | String | Free-form task payload |
//!
//! Listing is a full `Scan` that follows `LastEvaluatedKey` until the table is
//! exhausted. `DeleteItem` on an absent key succeeds, so deleting a missing
//! record is not an error for this backend.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tasklet_core::Record;

use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;

const ID_ATTRIBUTE: &str = "id";
const TASK_ATTRIBUTE: &str = "task";

/// DynamoDB-backed record storage.
#[derive(Debug, Clone)]
pub struct TableStorage {
    client: Client,
    table_name: String,
}

impl TableStorage {
    /// Creates a backend with a pre-built DynamoDB client.
    ///
    /// The table must already exist with `id` (String) as its partition key.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a backend from the standard AWS SDK config chain.
    ///
    /// `region` overrides the chain's region; `endpoint_url` points the client
    /// at DynamoDB Local or another compatible endpoint.
    pub async fn from_env(
        table_name: impl Into<String>,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()), table_name)
    }
}

/// Maps an AWS SDK error to a [`StorageError::BackendError`].
fn map_sdk_error(err: impl std::error::Error, context: &str) -> StorageError {
    StorageError::BackendError(format!(
        "DynamoDB error for {context}: {}",
        DisplayErrorContext(err)
    ))
}

/// Marshal a record into its row attributes.
fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ID_ATTRIBUTE.to_string(),
            AttributeValue::S(record.id.clone()),
        ),
        (
            TASK_ATTRIBUTE.to_string(),
            AttributeValue::S(record.task.clone()),
        ),
    ])
}

/// Decode one scanned row. Both attributes must be present strings.
fn item_to_record(item: &HashMap<String, AttributeValue>) -> StorageResult<Record> {
    let id = item
        .get(ID_ATTRIBUTE)
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| StorageError::Decode {
            key: "<unknown>".to_string(),
            message: "missing or invalid id attribute".to_string(),
        })?;

    let task = item
        .get(TASK_ATTRIBUTE)
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| StorageError::Decode {
            key: id.clone(),
            message: "missing or invalid task attribute".to_string(),
        })?;

    Ok(Record::new(id.clone(), task.clone()))
}

#[async_trait]
impl Storage for TableStorage {
    async fn list(&self) -> StorageResult<Vec<Record>> {
        let start = std::time::Instant::now();
        let mut records = Vec::new();
        let mut exclusive_start_key = None;
        let mut pages = 0u32;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await
                .map_err(|e| {
                    let err = map_sdk_error(e, &format!("scan of {}", self.table_name));
                    tracing::error!(error = %err, table = %self.table_name, "DynamoDB scan failed");
                    err
                })?;
            pages += 1;

            for item in output.items() {
                let record = item_to_record(item).inspect_err(|e| {
                    tracing::error!(error = %e, table = %self.table_name, "Row is not a record");
                })?;
                records.push(record);
            }

            match output.last_evaluated_key() {
                Some(last_key) if !last_key.is_empty() => {
                    exclusive_start_key = Some(last_key.clone());
                }
                _ => break,
            }
        }

        tracing::info!(
            table = %self.table_name,
            pages,
            returned = records.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "DynamoDB scan successful"
        );

        Ok(records)
    }

    async fn put(&self, record: Record) -> StorageResult<Record> {
        let start = std::time::Instant::now();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(&record)))
            .send()
            .await
            .map_err(|e| {
                let err = map_sdk_error(e, &format!("key {}", record.id));
                tracing::error!(
                    error = %err,
                    table = %self.table_name,
                    key = %record.id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "DynamoDB put failed"
                );
                err
            })?;

        tracing::info!(
            table = %self.table_name,
            key = %record.id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "DynamoDB put successful"
        );

        Ok(record)
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                let err = map_sdk_error(e, &format!("key {}", id));
                tracing::error!(
                    error = %err,
                    table = %self.table_name,
                    key = %id,
                    "DynamoDB delete failed"
                );
                err
            })?;

        tracing::info!(
            table = %self.table_name,
            key = %id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "DynamoDB delete successful"
        );

        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("table {}", self.table_name)))?;
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::TableStore
    }
}
