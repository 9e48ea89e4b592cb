//! Error types and AWS SDK error mapping.
//!
//! Every operation maps its SDK error into `StoreError` without retrying,
//! suppressing, or defaulting anything. `ConditionalCheckFailed` is kept
//! as its own variant so callers can drive optimistic-concurrency loops
//! off it.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("conditional check failed on table '{table}'")]
    ConditionalCheckFailed { table: String },

    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("no comparator supplied for attribute '{attribute}'")]
    MissingComparator { attribute: String },

    #[error("timed out waiting for table '{table}' to become active")]
    TableActivationTimeout { table: String },
}

fn remote(operation: &'static str, message: impl Into<String>) -> StoreError {
    StoreError::Remote {
        operation,
        message: message.into(),
    }
}

/// Map a GetItem SDK error to StoreError.
pub(crate) fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StoreError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => remote("GetItem", "table not found"),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            remote("GetItem", "throughput exceeded")
        }
        GetItemError::RequestLimitExceeded(_) => remote("GetItem", "request limit exceeded"),
        GetItemError::InternalServerError(_) => remote("GetItem", "internal server error"),
        err => remote("GetItem", format!("{:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub(crate) fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed {
            table: table.to_string(),
        },
        PutItemError::ResourceNotFoundException(_) => remote("PutItem", "table not found"),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            remote("PutItem", "throughput exceeded")
        }
        PutItemError::RequestLimitExceeded(_) => remote("PutItem", "request limit exceeded"),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            remote("PutItem", "item collection size limit exceeded")
        }
        PutItemError::TransactionConflictException(_) => remote("PutItem", "transaction conflict"),
        PutItemError::InternalServerError(_) => remote("PutItem", "internal server error"),
        err => remote("PutItem", format!("{:?}", err)),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub(crate) fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(_) => StoreError::ConditionalCheckFailed {
            table: table.to_string(),
        },
        DeleteItemError::ResourceNotFoundException(_) => remote("DeleteItem", "table not found"),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            remote("DeleteItem", "throughput exceeded")
        }
        DeleteItemError::RequestLimitExceeded(_) => remote("DeleteItem", "request limit exceeded"),
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            remote("DeleteItem", "item collection size limit exceeded")
        }
        DeleteItemError::TransactionConflictException(_) => {
            remote("DeleteItem", "transaction conflict")
        }
        DeleteItemError::InternalServerError(_) => remote("DeleteItem", "internal server error"),
        err => remote("DeleteItem", format!("{:?}", err)),
    }
}

/// Map a Scan SDK error to StoreError.
pub(crate) fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> StoreError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => remote("Scan", "table not found"),
        ScanError::ProvisionedThroughputExceededException(_) => {
            remote("Scan", "throughput exceeded")
        }
        ScanError::RequestLimitExceeded(_) => remote("Scan", "request limit exceeded"),
        ScanError::InternalServerError(_) => remote("Scan", "internal server error"),
        err => remote("Scan", format!("{:?}", err)),
    }
}

/// Map a generic admin-operation error to StoreError.
pub(crate) fn map_admin_error(operation: &'static str, err: impl std::fmt::Display) -> StoreError {
    remote(operation, err.to_string())
}
