use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

pub const ACCOUNT_ID_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const ACCESS_KEY_ID_VAR: &str = "CLOUDFLARE_R2_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "CLOUDFLARE_R2_SECRET_ACCESS_KEY";
pub const BUCKET_NAME_VAR: &str = "CLOUDFLARE_R2_BUCKET_NAME";
pub const PUBLIC_URL_VAR: &str = "CLOUDFLARE_R2_PUBLIC_URL";
pub const MAX_FILE_SIZE_VAR: &str = "MAX_FILE_SIZE";

/// Host suffix of the per-account R2 endpoint.
pub const R2_DOMAIN: &str = "r2.cloudflarestorage.com";

/// Matches the limit advertised by the upload page.
pub const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// Static credentials for the object store.
#[derive(Clone)]
pub struct R2Credentials {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl R2Credentials {
    pub fn endpoint_url(&self) -> String {
        format!("https://{}.{}", self.account_id, R2_DOMAIN)
    }
}

impl fmt::Debug for R2Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("R2Credentials")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Cloudflare R2 settings.
///
/// Empty values are treated exactly like unset ones.
#[derive(Clone, Default)]
pub struct R2Config {
    pub account_id: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Empty when unset.
    pub bucket_name: String,
    /// Empty when unset.
    pub public_url: String,
}

impl fmt::Debug for R2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("R2Config")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("bucket_name", &self.bucket_name)
            .field("public_url", &self.public_url)
            .finish()
    }
}

impl R2Config {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            account_id: non_empty(ACCOUNT_ID_VAR),
            access_key_id: non_empty(ACCESS_KEY_ID_VAR),
            secret_access_key: non_empty(SECRET_ACCESS_KEY_VAR),
            bucket_name: non_empty(BUCKET_NAME_VAR).unwrap_or_default(),
            public_url: non_empty(PUBLIC_URL_VAR).unwrap_or_default(),
        }
    }

    /// Returns the client credentials, or the first missing variable.
    pub fn credentials(&self) -> Result<R2Credentials, ConfigError> {
        let account_id = self
            .account_id
            .clone()
            .ok_or(ConfigError::MissingVar(ACCOUNT_ID_VAR))?;
        let access_key_id = self
            .access_key_id
            .clone()
            .ok_or(ConfigError::MissingVar(ACCESS_KEY_ID_VAR))?;
        let secret_access_key = self
            .secret_access_key
            .clone()
            .ok_or(ConfigError::MissingVar(SECRET_ACCESS_KEY_VAR))?;

        Ok(R2Credentials {
            account_id,
            access_key_id,
            secret_access_key,
        })
    }

    pub fn status(&self) -> ConfigStatus {
        ConfigStatus {
            account_id: self.account_id.is_some(),
            access_key_id: self.access_key_id.is_some(),
            secret_access_key: self.secret_access_key.is_some(),
            bucket_name: !self.bucket_name.is_empty(),
            public_url: !self.public_url.is_empty(),
        }
    }
}

/// Which configuration values are present. Never carries the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfigStatus {
    #[serde(rename = "CLOUDFLARE_ACCOUNT_ID")]
    pub account_id: bool,
    #[serde(rename = "CLOUDFLARE_R2_ACCESS_KEY_ID")]
    pub access_key_id: bool,
    #[serde(rename = "CLOUDFLARE_R2_SECRET_ACCESS_KEY")]
    pub secret_access_key: bool,
    #[serde(rename = "CLOUDFLARE_R2_BUCKET_NAME")]
    pub bucket_name: bool,
    #[serde(rename = "CLOUDFLARE_R2_PUBLIC_URL")]
    pub public_url: bool,
}

impl ConfigStatus {
    pub fn all_configured(&self) -> bool {
        self.account_id
            && self.access_key_id
            && self.secret_access_key
            && self.bucket_name
            && self.public_url
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub r2: R2Config,

    /// Maximum accepted upload size in bytes (default: 50 MB)
    pub max_file_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            r2: R2Config::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_file_size = lookup(MAX_FILE_SIZE_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE);

        Self {
            r2: R2Config::from_lookup(lookup),
            max_file_size,
        }
    }
}
