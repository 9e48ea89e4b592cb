//! Store configuration.

use std::env;

/// Connection configuration for a [`DocumentStore`](crate::DocumentStore).
///
/// Strictly instance-scoped: consuming a config builds one client handle
/// and never touches process-wide SDK state, so two stores in the same
/// process can point at different endpoints.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// AWS region. When `None`, the SDK's default region chain applies.
    pub region: Option<String>,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
}

impl StoreConfig {
    /// Empty configuration: SDK defaults for everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_ENDPOINT_URL` - Custom endpoint, e.g. `http://localhost:8000`
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    pub fn from_env() -> Self {
        Self {
            region: Some(env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string())),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("local endpoint ({})", url),
            None => format!(
                "AWS (region: {})",
                self.region.as_deref().unwrap_or("default")
            ),
        }
    }
}
