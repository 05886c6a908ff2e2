//! Client configuration

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the backend endpoint
pub const ENV_URL: &str = "SUPABASE_URL";
/// Environment variable holding the public API key
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
/// Optional: object-storage bucket for gallery images
pub const ENV_STORAGE_BUCKET: &str = "SALON_STORAGE_BUCKET";
/// Optional: request timeout in seconds
pub const ENV_TIMEOUT: &str = "SALON_HTTP_TIMEOUT_SECS";

pub const DEFAULT_BUCKET: &str = "images";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co")
    pub base_url: String,

    /// Public (anon) API key sent with every request
    pub api_key: String,

    /// Bucket that receives gallery uploads
    pub storage_bucket: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Both values are required; an empty value counts as missing.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> ClientResult<Self> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if base_url.trim().is_empty() {
            return Err(ClientError::Config(format!("{ENV_URL} must be set")));
        }
        if api_key.trim().is_empty() {
            return Err(ClientError::Config(format!("{ENV_ANON_KEY} must be set")));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            storage_bucket: DEFAULT_BUCKET.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var(ENV_URL).unwrap_or_default();
        let api_key = std::env::var(ENV_ANON_KEY).unwrap_or_default();

        let mut config = Self::new(base_url, api_key)?;

        if let Some(bucket) = std::env::var(ENV_STORAGE_BUCKET)
            .ok()
            .filter(|s| !s.is_empty())
        {
            config.storage_bucket = bucket;
        }
        if let Some(timeout) = std::env::var(ENV_TIMEOUT)
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }

        Ok(config)
    }

    /// Set the storage bucket
    pub fn with_storage_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.storage_bucket = bucket.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_values_required() {
        assert!(matches!(
            ClientConfig::new("", "key"),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("https://example.supabase.co", "  "),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(config.base_url, "https://example.supabase.co");
        assert_eq!(config.storage_bucket, DEFAULT_BUCKET);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }
}
