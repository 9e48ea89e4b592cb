//! Thin async adapter over the DynamoDB SDK.
//!
//! Four operations — [`DocumentStore::get_item`], [`DocumentStore::put_item`],
//! [`DocumentStore::delete_item`], [`DocumentStore::scan`] — plus a pure
//! builder for simple AND-chained condition expressions. Every call
//! delegates straight to `aws-sdk-dynamodb`; transport, signing,
//! throttling and retries stay the SDK's business.
//!
//! # Example
//!
//! ```no_run
//! use docstore::{AttributeValue, Comparator, Condition, DocumentStore, StoreConfig};
//!
//! # async fn example() -> docstore::Result<()> {
//! let store = DocumentStore::connect(
//!     &StoreConfig::new()
//!         .region("us-east-1")
//!         .endpoint_url("http://localhost:8000"),
//! )
//! .await;
//!
//! let item = std::collections::HashMap::from([
//!     ("id".to_string(), AttributeValue::S("a".to_string())),
//!     ("v".to_string(), AttributeValue::N("1".to_string())),
//! ]);
//! store.put_item("T", item, None).await?;
//!
//! // Overwrite only while v is still 1.
//! let guard = Condition::new().clause("v", Comparator::Eq, AttributeValue::N("1".to_string()));
//! let updated = std::collections::HashMap::from([
//!     ("id".to_string(), AttributeValue::S("a".to_string())),
//!     ("v".to_string(), AttributeValue::N("2".to_string())),
//! ]);
//! store.put_item("T", updated, Some(&guard)).await?;
//! # Ok(())
//! # }
//! ```

pub mod admin;
mod client;
mod condition;
mod config;
mod error;
mod store;

pub use condition::{BuiltCondition, Comparator, Condition};
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::{DocumentStore, Item};

// Re-exported so callers can build items without depending on the SDK
// crate directly.
pub use aws_sdk_dynamodb::types::AttributeValue;
pub use aws_sdk_dynamodb::Client;
