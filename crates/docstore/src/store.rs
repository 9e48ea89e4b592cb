//! The document store adapter.
//!
//! Thin translation layer between high-level calls and the DynamoDB
//! SDK's request builders. No retries, no caching, no timeouts beyond
//! what the SDK itself enforces; every failure propagates immediately.

use std::collections::HashMap;

use async_stream::try_stream;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use futures_util::Stream;

use crate::client::create_client;
use crate::condition::Condition;
use crate::config::StoreConfig;
use crate::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error, Result,
};

/// A stored record or primary key: attribute name to attribute value.
///
/// The adapter enforces no schema; key shape and item contents are
/// whatever the target table expects.
pub type Item = HashMap<String, AttributeValue>;

/// Async adapter over a per-instance DynamoDB client.
pub struct DocumentStore {
    client: Client,
}

impl DocumentStore {
    /// Connects with the given configuration.
    ///
    /// Builds a client handle owned by this instance; constructing a
    /// second store never affects the first.
    pub async fn connect(config: &StoreConfig) -> Self {
        Self::new(create_client(config).await)
    }

    /// Wraps a pre-built client (useful for sharing one SDK config).
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying SDK client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Reads a single item by primary key.
    ///
    /// An absent item is `Ok(None)`, never an error; the service signals
    /// "no item" as a successful empty result.
    pub async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(output.item)
    }

    /// Writes an item, overwriting any existing item with the same key.
    ///
    /// With a non-empty `condition`, the write only applies when the
    /// condition holds against the current item; otherwise it fails with
    /// [`StoreError::ConditionalCheckFailed`](crate::StoreError::ConditionalCheckFailed).
    pub async fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: Option<&Condition>,
    ) -> Result<()> {
        let mut request = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(item));

        if let Some(condition) = condition.filter(|c| !c.is_empty()) {
            let built = condition.build();
            request = request
                .condition_expression(built.expression)
                .set_expression_attribute_names(Some(built.names))
                .set_expression_attribute_values(Some(built.values));
        }

        request
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    /// Deletes the item with the given key, with the same conditional
    /// semantics as [`put_item`](Self::put_item).
    ///
    /// Deleting a key with no stored item is a success.
    pub async fn delete_item(
        &self,
        table: &str,
        key: Item,
        condition: Option<&Condition>,
    ) -> Result<()> {
        let mut request = self.client.delete_item().table_name(table).set_key(Some(key));

        if let Some(condition) = condition.filter(|c| !c.is_empty()) {
            let built = condition.build();
            request = request
                .condition_expression(built.expression)
                .set_expression_attribute_names(Some(built.names))
                .set_expression_attribute_values(Some(built.values));
        }

        request
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table))?;

        Ok(())
    }

    /// Scans a table.
    ///
    /// With `paginate == false` this issues exactly one request and
    /// returns only the first page the service hands back, which for a
    /// large table is a partial result. With `paginate == true` it
    /// follows `last_evaluated_key` sequentially, accumulating items in
    /// service order until a response carries no continuation key. A
    /// failing page request discards everything accumulated so far.
    pub async fn scan(&self, table: &str, paginate: bool) -> Result<Vec<Item>> {
        if !paginate {
            let output = self
                .client
                .scan()
                .table_name(table)
                .send()
                .await
                .map_err(map_scan_error)?;
            return Ok(output.items.unwrap_or_default());
        }

        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(map_scan_error)?;

            items.extend(output.items.unwrap_or_default());
            tracing::debug!(table, accumulated = items.len(), "scan page received");

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Lazily scans a table one page at a time.
    ///
    /// Each yielded element is one page of items; the next request is
    /// only issued when the stream is polled past the current page, so
    /// large tables never have to be held in memory at once.
    pub fn scan_pages<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Stream<Item = Result<Vec<Item>>> + 'a {
        try_stream! {
            let mut start_key: Option<Item> = None;

            loop {
                let output = self
                    .client
                    .scan()
                    .table_name(table)
                    .set_exclusive_start_key(start_key.take())
                    .send()
                    .await
                    .map_err(map_scan_error)?;

                yield output.items.unwrap_or_default();

                match output.last_evaluated_key {
                    Some(key) if !key.is_empty() => start_key = Some(key),
                    _ => break,
                }
            }
        }
    }
}
