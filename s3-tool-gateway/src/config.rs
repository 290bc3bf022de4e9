/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use crate::error::{self, Error};
use crate::validate;
use crate::MEBIBYTE;

mod loader;

pub use loader::ConfigLoader;

pub(crate) const DEFAULT_REGION: &str = "us-east-1";
pub(crate) const DEFAULT_MAX_FILE_SIZE_MB: u64 = 100;
pub(crate) const DEFAULT_MAX_LIST_OBJECTS: i32 = 1000;

/// Configuration for a [`Client`](crate::client::Client)
///
/// Constructed once at process start and handed to the client by value;
/// there is no hidden global state. [`Builder::build`] performs the
/// required-field check, so a constructed `Config` is always usable.
#[derive(Clone)]
pub struct Config {
    access_key_id: String,
    secret_access_key: String,
    region: String,
    endpoint_url: Option<String>,
    bucket: String,
    max_file_size_bytes: u64,
    max_list_objects: i32,
    allowed_extensions: Option<Vec<String>>,
    client: Option<aws_sdk_s3::Client>,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The default bucket targeted when an operation does not name one.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The region requests are signed for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Custom endpoint override for S3-compatible stores, if any.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// Upload size ceiling in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Ceiling on the number of entries a single list operation returns.
    pub fn max_list_objects(&self) -> i32 {
        self.max_list_objects
    }

    /// Extension allowlist applied to uploads; `None` allows everything.
    pub fn allowed_extensions(&self) -> Option<&[String]> {
        self.allowed_extensions.as_deref()
    }

    pub(crate) fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub(crate) fn explicit_client(&self) -> Option<&aws_sdk_s3::Client> {
        self.client.as_ref()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("bucket", &self.bucket)
            .field("max_file_size_bytes", &self.max_file_size_bytes)
            .field("max_list_objects", &self.max_list_objects)
            .field("allowed_extensions", &self.allowed_extensions)
            .field("client", &self.client.as_ref().map(|_| "<explicit>"))
            .finish()
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    region: Option<String>,
    endpoint_url: Option<String>,
    bucket: Option<String>,
    max_file_size_bytes: Option<u64>,
    max_list_objects: Option<i32>,
    allowed_extensions: Option<Vec<String>>,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Static access key ID used to construct the store client.
    pub fn access_key_id(mut self, value: impl Into<String>) -> Self {
        self.access_key_id = Some(value.into());
        self
    }

    /// Static secret access key used to construct the store client.
    pub fn secret_access_key(mut self, value: impl Into<String>) -> Self {
        self.secret_access_key = Some(value.into());
        self
    }

    /// Region to sign requests for. Default is `us-east-1`.
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = Some(value.into());
        self
    }

    /// Custom endpoint URL for S3-compatible stores (MinIO, etc). Implies
    /// path-style addressing.
    pub fn endpoint_url(mut self, value: impl Into<String>) -> Self {
        self.endpoint_url = Some(value.into());
        self
    }

    /// Default bucket for operations that do not name one. Required.
    pub fn bucket(mut self, value: impl Into<String>) -> Self {
        self.bucket = Some(value.into());
        self
    }

    /// Upload size ceiling in mebibytes. Default is 100 MiB.
    pub fn max_file_size_mb(mut self, mebibytes: u64) -> Self {
        self.max_file_size_bytes = Some(mebibytes * MEBIBYTE);
        self
    }

    /// Ceiling on entries returned by a single list operation. Default 1000.
    pub fn max_list_objects(mut self, count: i32) -> Self {
        self.max_list_objects = Some(count);
        self
    }

    /// Comma-separated extension allowlist, case-folded, leading dots
    /// stripped. An empty string clears the allowlist (everything allowed).
    pub fn allowed_extensions(mut self, csv: &str) -> Self {
        self.allowed_extensions = parse_allowed_extensions(csv);
        self
    }

    /// Set an explicit S3 client to use instead of constructing one from the
    /// static credentials. The supplied client carries its own credential
    /// provider, so the access key settings become optional.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`].
    ///
    /// Fails fast with a configuration error (distinct from per-call
    /// validation errors) when a required field is missing.
    pub fn build(self) -> Result<Config, Error> {
        if self.client.is_none() {
            if self.access_key_id.as_deref().unwrap_or("").is_empty() {
                return Err(error::invalid_config("AWS_ACCESS_KEY_ID is required"));
            }
            if self.secret_access_key.as_deref().unwrap_or("").is_empty() {
                return Err(error::invalid_config("AWS_SECRET_ACCESS_KEY is required"));
            }
        }

        let bucket = match self.bucket.as_deref().unwrap_or("") {
            "" => return Err(error::invalid_config("S3_BUCKET_NAME is required")),
            bucket => validate::validate_bucket_name(bucket)
                .map_err(error::invalid_config)?
                .to_owned(),
        };

        Ok(Config {
            access_key_id: self.access_key_id.unwrap_or_default(),
            secret_access_key: self.secret_access_key.unwrap_or_default(),
            region: self.region.unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            endpoint_url: self.endpoint_url,
            bucket,
            max_file_size_bytes: self
                .max_file_size_bytes
                .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB * MEBIBYTE),
            max_list_objects: self.max_list_objects.unwrap_or(DEFAULT_MAX_LIST_OBJECTS),
            allowed_extensions: self.allowed_extensions,
            client: self.client,
        })
    }
}

/// Parse a comma-separated allowlist into lower-cased extensions without
/// leading dots. Empty input yields `None` (everything allowed).
pub(crate) fn parse_allowed_extensions(csv: &str) -> Option<Vec<String>> {
    let extensions: Vec<String> = csv
        .split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect();

    if extensions.is_empty() {
        None
    } else {
        Some(extensions)
    }
}
