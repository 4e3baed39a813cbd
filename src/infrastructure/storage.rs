use crate::config::{ConfigError, R2Config};
use crate::services::storage::{S3StorageService, StorageService, UnavailableStorage};
use aws_sdk_s3::config::{Credentials, Region};
use std::sync::Arc;
use tracing::{error, info};

/// Builds the R2 client from static credentials. Makes no network calls.
pub async fn build_client(config: &R2Config) -> Result<aws_sdk_s3::Client, ConfigError> {
    let credentials = config.credentials()?;

    let aws_config = aws_config::from_env()
        .endpoint_url(credentials.endpoint_url())
        .region(Region::new("auto"))
        .credentials_provider(Credentials::new(
            credentials.access_key_id,
            credentials.secret_access_key,
            None,
            None,
            "static",
        ))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config).build();
    Ok(aws_sdk_s3::Client::from_conf(s3_config))
}

/// Constructs the storage backend once for the lifetime of the process.
///
/// Missing credentials do not stop the server: the returned backend fails
/// every call with the configuration error instead.
pub async fn setup_storage(config: &R2Config) -> Arc<dyn StorageService> {
    match build_client(config).await {
        Ok(client) => {
            info!(
                "☁️  R2 Storage: {} (Bucket: {})",
                config
                    .credentials()
                    .map(|c| c.endpoint_url())
                    .unwrap_or_default(),
                config.bucket_name
            );
            Arc::new(S3StorageService::new(client, config.bucket_name.clone()))
        }
        Err(e) => {
            error!("❌ R2 storage unavailable: {}", e);
            Arc::new(UnavailableStorage::new(e.to_string()))
        }
    }
}
