//! Integration tests against DynamoDB Local.
//!
//! These tests only run when `AWS_ENDPOINT_URL` points at a local
//! instance (e.g. `http://localhost:8000`); without it every test is a
//! no-op pass. Start one with:
//!
//! ```bash
//! docker run -p 8000:8000 amazon/dynamodb-local
//! AWS_ENDPOINT_URL=http://localhost:8000 cargo test -p docstore --test local_store
//! ```
//!
//! Each test creates and drops its own table, so they can run in
//! parallel against one instance.

use std::collections::HashMap;

use docstore::{admin, AttributeValue, Comparator, Condition, DocumentStore, Item, StoreConfig, StoreError};
use tokio_stream::StreamExt;

/// Connects to the local instance, or `None` when no endpoint is set.
async fn local_store() -> Option<DocumentStore> {
    let endpoint = std::env::var("AWS_ENDPOINT_URL").ok()?;

    // DynamoDB Local accepts any credentials but the SDK insists on
    // having some.
    for (key, value) in [
        ("AWS_ACCESS_KEY_ID", "local"),
        ("AWS_SECRET_ACCESS_KEY", "local"),
    ] {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }

    let config = StoreConfig::new()
        .region("us-east-1")
        .endpoint_url(endpoint);
    Some(DocumentStore::connect(&config).await)
}

fn s(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_string())
}

fn n(value: &str) -> AttributeValue {
    AttributeValue::N(value.to_string())
}

fn key(id: &str) -> Item {
    HashMap::from([("id".to_string(), s(id))])
}

fn item(id: &str, v: &str) -> Item {
    HashMap::from([("id".to_string(), s(id)), ("v".to_string(), n(v))])
}

/// Runs `f`-style test body against a fresh table, dropping it afterwards.
async fn with_table<F, Fut>(name: &str, body: F)
where
    F: FnOnce(DocumentStore, String) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let Some(store) = local_store().await else {
        eprintln!("skipping: AWS_ENDPOINT_URL not set");
        return;
    };

    let table = format!("docstore-test-{}", name);
    if admin::table_exists(store.client(), &table).await.unwrap() {
        admin::delete_table(store.client(), &table).await.unwrap();
    }
    admin::create_table(store.client(), &table, "id", None)
        .await
        .unwrap();

    body(store, table).await;
}

#[tokio::test]
async fn put_get_delete_round_trip() {
    with_table("round-trip", |store, table| async move {
        store.put_item(&table, item("a", "1"), None).await.unwrap();

        let fetched = store.get_item(&table, key("a")).await.unwrap();
        assert_eq!(fetched, Some(item("a", "1")));

        store.delete_item(&table, key("a"), None).await.unwrap();

        let fetched = store.get_item(&table, key("a")).await.unwrap();
        assert_eq!(fetched, None);

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn get_missing_item_is_ok_none() {
    with_table("get-missing", |store, table| async move {
        let fetched = store.get_item(&table, key("nope")).await.unwrap();
        assert_eq!(fetched, None);

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn unconditional_put_overwrites() {
    with_table("overwrite", |store, table| async move {
        store.put_item(&table, item("a", "1"), None).await.unwrap();
        store.put_item(&table, item("a", "2"), None).await.unwrap();

        let fetched = store.get_item(&table, key("a")).await.unwrap();
        assert_eq!(fetched, Some(item("a", "2")));

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn delete_missing_item_succeeds() {
    with_table("delete-missing", |store, table| async move {
        store.delete_item(&table, key("ghost"), None).await.unwrap();

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn conditional_put_both_outcomes() {
    with_table("cond-put", |store, table| async move {
        store.put_item(&table, item("a", "1"), None).await.unwrap();

        // Wrong expected version: rejected, state untouched.
        let stale = Condition::new().clause("v", Comparator::Eq, n("9"));
        let err = store
            .put_item(&table, item("a", "2"), Some(&stale))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::ConditionalCheckFailed {
                table: table.clone()
            }
        );
        let fetched = store.get_item(&table, key("a")).await.unwrap();
        assert_eq!(fetched, Some(item("a", "1")));

        // Matching version: applied and observable.
        let current = Condition::new().clause("v", Comparator::Eq, n("1"));
        store
            .put_item(&table, item("a", "2"), Some(&current))
            .await
            .unwrap();
        let fetched = store.get_item(&table, key("a")).await.unwrap();
        assert_eq!(fetched, Some(item("a", "2")));

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn conditional_delete_both_outcomes() {
    with_table("cond-delete", |store, table| async move {
        store.put_item(&table, item("a", "3"), None).await.unwrap();

        let stale = Condition::new().clause("v", Comparator::Gt, n("5"));
        let err = store
            .delete_item(&table, key("a"), Some(&stale))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConditionalCheckFailed { .. }));

        let current = Condition::new().clause("v", Comparator::Le, n("5"));
        store
            .delete_item(&table, key("a"), Some(&current))
            .await
            .unwrap();
        let fetched = store.get_item(&table, key("a")).await.unwrap();
        assert_eq!(fetched, None);

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn multi_clause_condition_ands_all_clauses() {
    with_table("multi-clause", |store, table| async move {
        store.put_item(&table, item("a", "5"), None).await.unwrap();

        // One true clause, one false clause: the AND chain fails.
        let half_true = Condition::new()
            .clause("id", Comparator::Eq, s("a"))
            .clause("v", Comparator::Lt, n("5"));
        let err = store
            .put_item(&table, item("a", "6"), Some(&half_true))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ConditionalCheckFailed { .. }));

        let all_true = Condition::new()
            .clause("id", Comparator::Eq, s("a"))
            .clause("v", Comparator::Le, n("5"));
        store
            .put_item(&table, item("a", "6"), Some(&all_true))
            .await
            .unwrap();

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn scan_single_page_table() {
    with_table("scan-one-page", |store, table| async move {
        for id in ["a", "b", "c"] {
            store.put_item(&table, item(id, "1"), None).await.unwrap();
        }

        // Boundary: first response carries no continuation key, so both
        // modes see the whole table.
        let first_page = store.scan(&table, false).await.unwrap();
        assert_eq!(first_page.len(), 3);

        let all = store.scan(&table, true).await.unwrap();
        assert_eq!(all.len(), 3);

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

/// Items sized so a scan page (1 MB) cannot hold the whole table.
fn oversized_item(id: &str) -> Item {
    HashMap::from([
        ("id".to_string(), s(id)),
        ("payload".to_string(), s(&"x".repeat(390_000))),
    ])
}

#[tokio::test]
async fn scan_multi_page_table() {
    with_table("scan-multi-page", |store, table| async move {
        let ids = ["a", "b", "c", "d"];
        for id in ids {
            store
                .put_item(&table, oversized_item(id), None)
                .await
                .unwrap();
        }

        // Non-paginated: first page only, which cannot be the full table.
        let first_page = store.scan(&table, false).await.unwrap();
        assert!(first_page.len() < ids.len());

        // Paginated: the union of all pages is the full item set.
        let all = store.scan(&table, true).await.unwrap();
        assert_eq!(all.len(), ids.len());
        let mut seen: Vec<String> = all
            .iter()
            .map(|item| item.get("id").unwrap().as_s().unwrap().clone())
            .collect();
        seen.sort();
        assert_eq!(seen, ids);

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn scan_pages_stream_matches_accumulated_scan() {
    with_table("scan-stream", |store, table| async move {
        let ids = ["a", "b", "c", "d"];
        for id in ids {
            store
                .put_item(&table, oversized_item(id), None)
                .await
                .unwrap();
        }

        let mut pages = std::pin::pin!(store.scan_pages(&table));
        let mut streamed = Vec::new();
        let mut page_count = 0;
        while let Some(page) = pages.next().await {
            streamed.extend(page.unwrap());
            page_count += 1;
        }

        assert!(page_count > 1);
        assert_eq!(streamed.len(), ids.len());

        admin::delete_table(store.client(), &table).await.unwrap();
    })
    .await;
}

#[tokio::test]
async fn scan_missing_table_fails() {
    let Some(store) = local_store().await else {
        eprintln!("skipping: AWS_ENDPOINT_URL not set");
        return;
    };

    let err = store
        .scan("docstore-test-no-such-table", true)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Remote { operation: "Scan", .. }));
}
