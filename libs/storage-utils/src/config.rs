/// Storage configuration: one bucket per blob kind
use serde::{Deserialize, Serialize};

use crate::{BlobKind, StorageError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding uploaded audio files
    pub audio_bucket: String,
    /// Bucket holding uploaded PDF documents
    pub pdf_bucket: String,
    /// AWS region
    pub region: String,
    /// Base URL for public access (CDN domain or S3 endpoint)
    pub base_url: String,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    pub fn from_env() -> Result<Self, StorageError> {
        Ok(Self {
            audio_bucket: std::env::var("STORAGE_AUDIO_BUCKET")
                .unwrap_or_else(|_| "admin-audio".to_string()),
            pdf_bucket: std::env::var("STORAGE_PDF_BUCKET")
                .unwrap_or_else(|_| "admin-pdfs".to_string()),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            base_url: std::env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "https://s3.amazonaws.com".to_string()),
            path_style: std::env::var("STORAGE_PATH_STYLE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
        })
    }

    /// Bucket name for a blob kind
    pub fn bucket_for(&self, kind: BlobKind) -> &str {
        match kind {
            BlobKind::Audio => &self.audio_bucket,
            BlobKind::Pdf => &self.pdf_bucket,
        }
    }

    /// Build the public URL for an object
    pub fn object_url(&self, kind: BlobKind, key: &str) -> String {
        let bucket = self.bucket_for(kind);
        if self.path_style {
            format!("{}/{}/{}", self.base_url, bucket, key)
        } else {
            format!("https://{}.s3.{}.amazonaws.com/{}", bucket, self.region, key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(path_style: bool) -> StorageConfig {
        StorageConfig {
            audio_bucket: "admin-audio".to_string(),
            pdf_bucket: "admin-pdfs".to_string(),
            region: "us-east-1".to_string(),
            base_url: "https://s3.amazonaws.com".to_string(),
            path_style,
        }
    }

    #[test]
    fn bucket_routing_by_kind() {
        let config = test_config(false);
        assert_eq!(config.bucket_for(BlobKind::Audio), "admin-audio");
        assert_eq!(config.bucket_for(BlobKind::Pdf), "admin-pdfs");
    }

    #[test]
    fn object_url_virtual_hosted_style() {
        let config = test_config(false);
        let url = config.object_url(BlobKind::Audio, "1700000000-abc123.mp3");
        assert_eq!(
            url,
            "https://admin-audio.s3.us-east-1.amazonaws.com/1700000000-abc123.mp3"
        );
    }

    #[test]
    fn object_url_path_style() {
        let config = test_config(true);
        let url = config.object_url(BlobKind::Pdf, "doc.pdf");
        assert_eq!(url, "https://s3.amazonaws.com/admin-pdfs/doc.pdf");
    }
}
