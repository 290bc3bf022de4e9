/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::config::Config;
use crate::error::Error;
use crate::operation;
use crate::operation::delete::DeleteFluentBuilder;
use crate::operation::download::DownloadFluentBuilder;
use crate::operation::list::ListFluentBuilder;
use crate::operation::stat::StatFluentBuilder;
use crate::operation::upload::UploadFluentBuilder;
use crate::validate;

/// Storage gateway client.
///
/// The client is cheap to clone and safe to share across tasks. The
/// underlying SDK client is constructed on first use and reused for every
/// subsequent call.
#[derive(Debug, Clone)]
pub struct Client {
    handle: Arc<Handle>,
}

/// Gateway state shared across operations: the immutable configuration and
/// the lazily constructed SDK client handle.
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: Config,
    s3: OnceCell<aws_sdk_s3::Client>,
}

impl Handle {
    fn new(config: Config) -> Self {
        // An explicit client override seeds the cell up front, keeping
        // repeat initialization idempotent and side-effect free.
        let s3 = match config.explicit_client() {
            Some(client) => OnceCell::new_with(Some(client.clone())),
            None => OnceCell::new(),
        };
        Self { config, s3 }
    }

    /// The SDK client to use for store operations, constructing it from the
    /// configuration on first use.
    pub(crate) async fn s3_client(&self) -> &aws_sdk_s3::Client {
        self.s3
            .get_or_init(|| async { build_s3_client(&self.config) })
            .await
    }
}

fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = aws_sdk_s3::config::Credentials::new(
        config.access_key_id(),
        config.secret_access_key(),
        None,
        None,
        "s3-tool-gateway",
    );

    let mut builder = aws_sdk_s3::config::Builder::new()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new(config.region().to_owned()))
        .credentials_provider(credentials);

    if let Some(endpoint) = config.endpoint_url() {
        // self-hosted S3-compatibles generally only speak path-style
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    tracing::debug!(
        region = config.region(),
        endpoint = config.endpoint_url().unwrap_or("<default>"),
        "constructed S3 client"
    );

    aws_sdk_s3::Client::from_conf(builder.build())
}

impl Client {
    /// Create a new gateway client from a validated [`Config`].
    pub fn new(config: Config) -> Self {
        Self {
            handle: Arc::new(Handle::new(config)),
        }
    }

    /// The configuration this client was constructed with.
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    pub(crate) fn handle(&self) -> Arc<Handle> {
        self.handle.clone()
    }

    /// Upload an object.
    pub fn upload(&self) -> UploadFluentBuilder {
        UploadFluentBuilder::new(self.handle())
    }

    /// Download an object with its content.
    pub fn download(&self) -> DownloadFluentBuilder {
        DownloadFluentBuilder::new(self.handle())
    }

    /// List objects under an optional prefix.
    pub fn list(&self) -> ListFluentBuilder {
        ListFluentBuilder::new(self.handle())
    }

    /// Fetch object metadata without its content.
    pub fn stat(&self) -> StatFluentBuilder {
        StatFluentBuilder::new(self.handle())
    }

    /// Delete an object.
    pub fn delete(&self) -> DeleteFluentBuilder {
        DeleteFluentBuilder::new(self.handle())
    }

    /// Check whether an object exists via a metadata-only probe.
    ///
    /// A not-found response maps to `Ok(false)`; any other backend error
    /// propagates unchanged.
    pub async fn exists(&self, key: &str, bucket: Option<&str>) -> Result<bool, Error> {
        let key = validate::validate_key(key)?;
        let bucket = operation::resolve_bucket(&self.handle.config, bucket)?;
        operation::object_exists(&self.handle, &bucket, &key).await
    }
}
