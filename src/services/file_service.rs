use crate::models::{StoredFile, UploadResult};
use crate::services::storage::{ObjectSummary, StorageService};
use anyhow::Result;
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Every object this service creates lives under this prefix.
pub const UPLOAD_PREFIX: &str = "uploads/";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Builds `uploads/{millis}-{file_name}`. The name is kept verbatim.
pub fn object_key(file_name: &str, timestamp_millis: i64) -> String {
    format!("{}{}-{}", UPLOAD_PREFIX, timestamp_millis, file_name)
}

pub fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

pub struct FileService {
    storage: Arc<dyn StorageService>,
    public_base_url: String,
}

impl FileService {
    pub fn new(storage: Arc<dyn StorageService>, public_base_url: String) -> Self {
        Self {
            storage,
            public_base_url,
        }
    }

    pub fn public_url_for(&self, key: &str) -> String {
        public_url(&self.public_base_url, key)
    }

    pub async fn upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<UploadResult> {
        let key = object_key(file_name, Utc::now().timestamp_millis());
        let content_type = content_type
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let size = data.len() as u64;

        self.storage.put_object(&key, data, &content_type).await?;
        info!("⬆️  Stored {} ({} bytes, {})", key, size, content_type);

        Ok(UploadResult {
            file_name: file_name.to_string(),
            public_url: self.public_url_for(&key),
            key,
            size,
            content_type,
        })
    }

    pub async fn list(&self) -> Result<Vec<StoredFile>> {
        let objects = self.storage.list_objects(UPLOAD_PREFIX).await?;
        Ok(objects
            .into_iter()
            .map(|ObjectSummary { key, size, last_modified }| StoredFile {
                public_url: self.public_url_for(&key),
                key,
                size,
                last_modified,
            })
            .collect())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.storage.delete_object(key).await?;
        info!("🗑️  Deleted {}", key);
        Ok(())
    }
}
