/// Blob upload, deletion, and object-key generation
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config::StorageConfig;
use crate::{BlobKind, StorageError};

/// Generate a collision-resistant object key, preserving the original
/// file extension: `<millis>-<random suffix>[.ext]`.
pub fn generate_object_key(original_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    match std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
    {
        Some(ext) => format!("{}-{}.{}", millis, suffix, ext),
        None => format!("{}-{}", millis, suffix),
    }
}

#[derive(Clone)]
pub struct StorageOperations {
    client: Arc<Client>,
    config: StorageConfig,
}

impl StorageOperations {
    pub fn new(client: Arc<Client>, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Upload a blob to the kind's bucket and return its public URL
    pub async fn upload_blob(
        &self,
        kind: BlobKind,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let bucket = self.config.bucket_for(kind);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await?;

        tracing::debug!(bucket, key, "uploaded blob");

        Ok(self.config.object_url(kind, key))
    }

    /// Delete a blob from the kind's bucket
    pub async fn delete_blob(&self, kind: BlobKind, key: &str) -> Result<(), StorageError> {
        let bucket = self.config.bucket_for(kind);

        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;

        tracing::debug!(bucket, key, "deleted blob");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_preserve_extension() {
        let key = generate_object_key("calm-piano.mp3");
        assert!(key.ends_with(".mp3"));

        let key = generate_object_key("notes");
        assert!(!key.contains('.'));
    }

    #[test]
    fn object_keys_are_unique_across_calls() {
        let a = generate_object_key("book.pdf");
        let b = generate_object_key("book.pdf");
        assert_ne!(a, b);
    }
}
