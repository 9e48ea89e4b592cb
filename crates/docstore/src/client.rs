//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;

use crate::config::StoreConfig;

/// Creates a DynamoDB client with the given configuration.
///
/// The returned client is owned by the caller; nothing process-wide is
/// configured here.
pub(crate) async fn create_client(config: &StoreConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &config.region {
        sdk_config_loader = sdk_config_loader.region(aws_config::Region::new(region.clone()));
    }

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
