//! Command line client for the document store adapter.
//!
//! Thin wrapper for poking at tables from a shell, mostly against a
//! local DynamoDB instance.

mod value;

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use docstore::{admin, Comparator, Condition, DocumentStore, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// docstore - get, put, delete and scan items in a document store
#[derive(Parser, Debug)]
#[command(name = "docstore")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Custom endpoint URL, e.g. http://localhost:8000 for DynamoDB Local
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// AWS region
    #[arg(long, global = true, default_value = "us-east-1", env = "AWS_REGION")]
    region: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Fetch a single item by primary key
    Get {
        /// Table name
        table: String,
        /// Primary key as a JSON object, e.g. '{"id": "a"}'
        key: String,
    },

    /// Write an item, optionally guarded by a condition
    #[command(long_about = "Write an item, overwriting any existing item with the same key.

With --expected/--comparator pairs the write only applies when every
clause holds against the current item, e.g.:

  docstore put T '{\"id\": \"a\", \"v\": 2}' --expected v=1 --comparator 'v=='")]
    Put {
        /// Table name
        table: String,
        /// Item as a JSON object
        item: String,
        /// Expected attribute value, as attr=JSON (repeatable)
        #[arg(long, value_name = "ATTR=VALUE")]
        expected: Vec<String>,
        /// Comparator for an expected attribute, as attr=OP (repeatable)
        #[arg(long, value_name = "ATTR=OP")]
        comparator: Vec<String>,
    },

    /// Delete an item, optionally guarded by a condition
    Delete {
        /// Table name
        table: String,
        /// Primary key as a JSON object
        key: String,
        /// Expected attribute value, as attr=JSON (repeatable)
        #[arg(long, value_name = "ATTR=VALUE")]
        expected: Vec<String>,
        /// Comparator for an expected attribute, as attr=OP (repeatable)
        #[arg(long, value_name = "ATTR=OP")]
        comparator: Vec<String>,
    },

    /// Scan a table
    Scan {
        /// Table name
        table: String,
        /// Follow continuation keys until the whole table is returned.
        /// Without this flag only the first page is printed.
        #[arg(long)]
        paginate: bool,
    },

    /// Manage tables on a local instance
    Table {
        #[command(subcommand)]
        action: TableAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum TableAction {
    /// Create a table with string keys
    Create {
        /// Table name
        table: String,
        /// Partition key attribute name
        #[arg(long, default_value = "id")]
        partition_key: String,
        /// Optional sort key attribute name
        #[arg(long)]
        sort_key: Option<String>,
    },
    /// Delete a table
    Destroy {
        /// Table name
        table: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docstore=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = StoreConfig::new().region(cli.region);
    if let Some(endpoint) = cli.endpoint_url {
        config = config.endpoint_url(endpoint);
    }
    tracing::debug!(target = %config.target_display(), "connecting");

    let store = DocumentStore::connect(&config).await;

    match cli.command {
        Commands::Get { table, key } => {
            let key = value::parse_item(&key)?;
            match store.get_item(&table, key).await? {
                Some(item) => println!("{}", serde_json::to_string_pretty(&value::item_to_json(&item)?)?),
                None => println!("(no item)"),
            }
        }
        Commands::Put {
            table,
            item,
            expected,
            comparator,
        } => {
            let item = value::parse_item(&item)?;
            let condition = parse_condition(&expected, &comparator)?;
            store.put_item(&table, item, condition.as_ref()).await?;
            println!("ok");
        }
        Commands::Delete {
            table,
            key,
            expected,
            comparator,
        } => {
            let key = value::parse_item(&key)?;
            let condition = parse_condition(&expected, &comparator)?;
            store.delete_item(&table, key, condition.as_ref()).await?;
            println!("ok");
        }
        Commands::Scan { table, paginate } => {
            let items = store.scan(&table, paginate).await?;
            for item in &items {
                println!("{}", serde_json::to_string(&value::item_to_json(item)?)?);
            }
            tracing::info!(count = items.len(), paginated = paginate, "scan complete");
        }
        Commands::Table { action } => match action {
            TableAction::Create {
                table,
                partition_key,
                sort_key,
            } => {
                admin::create_table(
                    store.client(),
                    &table,
                    &partition_key,
                    sort_key.as_deref(),
                )
                .await?;
                println!("created '{}'", table);
            }
            TableAction::Destroy { table } => {
                admin::delete_table(store.client(), &table).await?;
                println!("destroyed '{}'", table);
            }
        },
    }

    Ok(())
}

/// Build the optional condition from repeated --expected / --comparator
/// flags. Flag order drives clause order.
fn parse_condition(expected: &[String], comparators: &[String]) -> Result<Option<Condition>> {
    if expected.is_empty() && comparators.is_empty() {
        return Ok(None);
    }

    let mut comparator_map = HashMap::new();
    for pair in comparators {
        let (attribute, op) = split_pair(pair)?;
        let comparator = Comparator::parse(op)
            .ok_or_else(|| anyhow!("unknown comparator '{}' for attribute '{}'", op, attribute))?;
        comparator_map.insert(attribute.to_string(), comparator);
    }

    let mut values = Vec::with_capacity(expected.len());
    for pair in expected {
        let (attribute, raw) = split_pair(pair)?;
        // Bare words are treated as strings so quoting isn't required.
        let json = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        values.push((attribute.to_string(), value::json_to_attribute(json)?));
    }

    let condition = Condition::from_parts(values, &comparator_map)
        .context("building condition expression")?;
    Ok(Some(condition))
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| anyhow!("expected ATTR=VALUE, got '{}'", pair))
}
