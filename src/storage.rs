use anyhow::Context;
use async_trait::async_trait;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    Client,
};
use tracing::debug;

use crate::config::StorageConfig;

/// Object storage holding the files behind photo URLs.
#[async_trait]
pub trait StorageClient: Send + Sync {
    fn bucket(&self) -> &str;
    async fn delete_object(&self, key: &str) -> anyhow::Result<()>;

    /// Deletes the object a public photo URL points at.
    async fn delete_by_url(&self, url: &str) -> anyhow::Result<()> {
        let key = key_from_url(url, self.bucket())
            .with_context(|| format!("no object key in url {}", url))?;
        self.delete_object(&key).await
    }
}

#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
}

impl Storage {
    pub async fn new(cfg: &StorageConfig) -> anyhow::Result<Self> {
        let shared = defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(Credentials::new(
                &cfg.access_key,
                &cfg.secret_key,
                None,
                None,
                "static",
            ))
            .endpoint_url(&cfg.endpoint)
            .load()
            .await;

        let conf = S3ConfigBuilder::from(&shared)
            .endpoint_url(&cfg.endpoint)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
            bucket: cfg.bucket.clone(),
        })
    }
}

#[async_trait]
impl StorageClient for Storage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .context("s3 delete_object")?;
        debug!(bucket = %self.bucket, key, "object deleted");
        Ok(())
    }
}

/// Object key for a photo URL. Accepts path-style (`host/<bucket>/<key>`) and
/// virtual-hosted (`<bucket>.host/<key>`) URLs; query and fragment are ignored.
pub fn key_from_url(url: &str, bucket: &str) -> Option<String> {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let path = rest.split_once('/').map(|(_, p)| p)?;
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let key = path
        .strip_prefix(bucket)
        .and_then(|p| p.strip_prefix('/'))
        .unwrap_or(path);
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Records deleted keys instead of talking to S3.
    #[derive(Default)]
    pub struct FakeStorage {
        pub deleted: Mutex<Vec<String>>,
        pub fail_on: Option<String>,
    }

    #[async_trait]
    impl StorageClient for FakeStorage {
        fn bucket(&self) -> &str {
            "osusume"
        }

        async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
            if self.fail_on.as_deref() == Some(key) {
                anyhow::bail!("simulated failure for {}", key);
            }
            self.deleted.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }
}
