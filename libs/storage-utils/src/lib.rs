/// Shared blob-storage utilities for the MindEase backend
///
/// Provides a unified S3 client, per-kind bucket configuration, and
/// upload/delete operations so the service code never touches the AWS
/// SDK directly.
use aws_sdk_s3::Client;
use std::sync::Arc;

pub mod config;
pub mod operations;

pub use config::StorageConfig;
pub use operations::{generate_object_key, StorageOperations};

pub type StorageError = Box<dyn std::error::Error + Send + Sync>;

/// Kind of binary content an admin can upload. Selects the target bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Audio,
    Pdf,
}

impl BlobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobKind::Audio => "audio",
            BlobKind::Pdf => "pdf",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "audio" => Some(BlobKind::Audio),
            "pdf" => Some(BlobKind::Pdf),
            _ => None,
        }
    }
}

/// Shared S3 client wrapper
#[derive(Clone)]
pub struct StorageClient {
    client: Arc<Client>,
    config: StorageConfig,
}

impl StorageClient {
    /// Create new storage client with configuration from environment
    pub async fn new() -> Result<Self, StorageError> {
        let config = StorageConfig::from_env()?;
        Self::with_config(config).await
    }

    /// Create new storage client with custom configuration
    pub async fn with_config(config: StorageConfig) -> Result<Self, StorageError> {
        let aws_config = aws_config::load_from_env().await;
        let client = Client::new(&aws_config);

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Get reference to underlying AWS S3 client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get storage configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Build an operations handle sharing this client
    pub fn operations(&self) -> StorageOperations {
        StorageOperations::new(Arc::clone(&self.client), self.config.clone())
    }

    /// Health check: both buckets must be reachable
    pub async fn health_check(&self) -> Result<(), StorageError> {
        for kind in [BlobKind::Audio, BlobKind::Pdf] {
            self.client
                .head_bucket()
                .bucket(self.config.bucket_for(kind))
                .send()
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_kind_round_trips_through_str() {
        assert_eq!(BlobKind::parse("audio"), Some(BlobKind::Audio));
        assert_eq!(BlobKind::parse("pdf"), Some(BlobKind::Pdf));
        assert_eq!(BlobKind::parse("video"), None);
        assert_eq!(BlobKind::Audio.as_str(), "audio");
    }
}
