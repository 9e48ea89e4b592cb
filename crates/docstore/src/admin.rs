//! Table administration helpers.
//!
//! Create/delete/wait helpers for standing up tables on a local
//! instance. Tables get string keys and pay-per-request billing, which
//! is all the adapter's own test scenarios need.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;

use crate::error::{map_admin_error, Result, StoreError};

const ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_DELAY: Duration = Duration::from_millis(500);

/// Creates a table with a string partition key and an optional string
/// sort key, then waits for it to become active.
pub async fn create_table(
    client: &Client,
    table: &str,
    partition_key: &str,
    sort_key: Option<&str>,
) -> Result<()> {
    let mut key_schema = vec![KeySchemaElement::builder()
        .attribute_name(partition_key)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| map_admin_error("CreateTable", e))?];

    let mut attribute_definitions = vec![AttributeDefinition::builder()
        .attribute_name(partition_key)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| map_admin_error("CreateTable", e))?];

    if let Some(sk) = sort_key {
        key_schema.push(
            KeySchemaElement::builder()
                .attribute_name(sk)
                .key_type(KeyType::Range)
                .build()
                .map_err(|e| map_admin_error("CreateTable", e))?,
        );
        attribute_definitions.push(
            AttributeDefinition::builder()
                .attribute_name(sk)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| map_admin_error("CreateTable", e))?,
        );
    }

    client
        .create_table()
        .table_name(table)
        .set_key_schema(Some(key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| map_admin_error("CreateTable", e.into_service_error()))?;

    wait_for_table_active(client, table).await
}

/// Deletes a table.
pub async fn delete_table(client: &Client, table: &str) -> Result<()> {
    client
        .delete_table()
        .table_name(table)
        .send()
        .await
        .map_err(|e| map_admin_error("DeleteTable", e.into_service_error()))?;
    Ok(())
}

/// Whether a table exists (in any status).
pub async fn table_exists(client: &Client, table: &str) -> Result<bool> {
    match client.describe_table().table_name(table).send().await {
        Ok(_) => Ok(true),
        Err(err) => {
            if err
                .as_service_error()
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false)
            {
                Ok(false)
            } else {
                Err(map_admin_error("DescribeTable", err.into_service_error()))
            }
        }
    }
}

/// Polls until the table reports `ACTIVE`.
async fn wait_for_table_active(client: &Client, table: &str) -> Result<()> {
    for _ in 0..ACTIVATION_ATTEMPTS {
        let response = client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_admin_error("DescribeTable", e.into_service_error()))?;

        let active = response
            .table()
            .and_then(|t| t.table_status())
            .map(|s| *s == TableStatus::Active)
            .unwrap_or(false);
        if active {
            return Ok(());
        }

        tokio::time::sleep(ACTIVATION_DELAY).await;
    }

    Err(StoreError::TableActivationTimeout {
        table: table.to_string(),
    })
}
