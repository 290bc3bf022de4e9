/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::HashMap;
use std::sync::Arc;

use aws_sdk_s3::primitives::DateTimeFormat;
use serde::Serialize;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::resolve_bucket;
use crate::types::DEFAULT_CONTENT_TYPE;
use crate::validate;

/// Fluent builder for the stat operation, created by
/// [`Client::stat`](crate::client::Client::stat).
#[derive(Debug)]
pub struct StatFluentBuilder {
    handle: Arc<Handle>,
    key: Option<String>,
    bucket: Option<String>,
}

impl StatFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            key: None,
            bucket: None,
        }
    }

    /// Key of the object to describe. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Bucket to probe. Defaults to the configured bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Validate the key and fetch the object's metadata without its content.
    pub async fn send(self) -> Result<StatOutput, Error> {
        let key = self
            .key
            .ok_or_else(|| error::validation("stat requires a key"))?;
        let bucket = resolve_bucket(&self.handle.config, self.bucket.as_deref())?;
        let key = validate::validate_key(&key)?;

        let resp = self
            .handle
            .s3_client()
            .await
            .head_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                    error::not_found(format!("object '{key}' not found in bucket '{bucket}'"))
                } else {
                    err.into()
                }
            })?;

        tracing::info!(key = %key, bucket = %bucket, "fetched object metadata");

        Ok(StatOutput {
            key,
            bucket,
            size_bytes: resp.content_length.unwrap_or_default().max(0) as u64,
            content_type: resp
                .content_type
                .as_deref()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_owned(),
            last_modified: resp
                .last_modified
                .and_then(|ts| ts.fmt(DateTimeFormat::DateTime).ok()),
            etag: resp
                .e_tag
                .as_deref()
                .unwrap_or_default()
                .trim_matches('"')
                .to_owned(),
            metadata: resp.metadata.unwrap_or_default(),
            storage_class: resp
                .storage_class
                .as_ref()
                .map(|class| class.as_str().to_owned())
                .unwrap_or_else(|| "STANDARD".to_owned()),
            exists: true,
        })
    }
}

/// Object metadata, reconstructed fresh on each query and never cached.
#[derive(Debug, Clone, Serialize)]
pub struct StatOutput {
    /// Normalized key that was probed.
    pub key: String,
    /// Bucket that was probed.
    pub bucket: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// MIME type; `application/octet-stream` when the backend omits one.
    pub content_type: String,
    /// Last-modified timestamp (RFC3339), when the backend supplies one.
    pub last_modified: Option<String>,
    /// Content fingerprint with surrounding quotes stripped.
    pub etag: String,
    /// User metadata stored with the object.
    pub metadata: HashMap<String, String>,
    /// Backend storage tier label; `STANDARD` when omitted upstream.
    pub storage_class: String,
    /// Always `true`: a missing object fails the call instead.
    pub exists: bool,
}
