/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::primitives::DateTimeFormat;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::resolve_bucket;
use crate::types::{ContentEncoding, DEFAULT_CONTENT_TYPE};
use crate::validate;

/// Fluent builder for the download operation, created by
/// [`Client::download`](crate::client::Client::download).
#[derive(Debug)]
pub struct DownloadFluentBuilder {
    handle: Arc<Handle>,
    key: Option<String>,
    bucket: Option<String>,
    as_base64: bool,
}

impl DownloadFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            key: None,
            bucket: None,
            as_base64: false,
        }
    }

    /// Key of the object to fetch. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Source bucket. Defaults to the configured bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Always return the content base64-encoded, even when it is valid
    /// UTF-8.
    pub fn as_base64(mut self, as_base64: bool) -> Self {
        self.as_base64 = as_base64;
        self
    }

    /// Validate the key and fetch the object with its content.
    pub async fn send(self) -> Result<DownloadOutput, Error> {
        let key = self
            .key
            .ok_or_else(|| error::validation("download requires a key"))?;
        let bucket = resolve_bucket(&self.handle.config, self.bucket.as_deref())?;
        let key = validate::validate_key(&key)?;

        let resp = self
            .handle
            .s3_client()
            .await
            .get_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    error::not_found(format!("object '{key}' not found in bucket '{bucket}'"))
                } else {
                    err.into()
                }
            })?;

        let content_type = resp
            .content_type
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_owned();
        let last_modified = resp
            .last_modified
            .and_then(|ts| ts.fmt(DateTimeFormat::DateTime).ok());
        let etag = resp
            .e_tag
            .as_deref()
            .unwrap_or_default()
            .trim_matches('"')
            .to_owned();
        let content_length = resp.content_length;

        let data = resp.body.collect().await?.into_bytes();
        let size_bytes = match content_length {
            Some(len) if len >= 0 => len as u64,
            _ => data.len() as u64,
        };

        let (content, encoding) = if self.as_base64 {
            (BASE64.encode(&data), ContentEncoding::Base64)
        } else {
            match std::str::from_utf8(&data) {
                Ok(text) => (text.to_owned(), ContentEncoding::Utf8),
                Err(_) => (BASE64.encode(&data), ContentEncoding::Base64),
            }
        };

        tracing::info!(key = %key, bucket = %bucket, size_bytes, encoding = %encoding, "downloaded object");

        Ok(DownloadOutput {
            key,
            bucket,
            size_bytes,
            content_type,
            last_modified,
            etag,
            content,
            encoding,
        })
    }
}

/// A downloaded object: metadata plus content.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadOutput {
    /// Normalized key the object was fetched from.
    pub key: String,
    /// Bucket the object was fetched from.
    pub bucket: String,
    /// Object size in bytes as reported by the backend.
    pub size_bytes: u64,
    /// MIME type; `application/octet-stream` when the backend omits one.
    pub content_type: String,
    /// Last-modified timestamp (RFC3339), when the backend supplies one.
    pub last_modified: Option<String>,
    /// Content fingerprint with surrounding quotes stripped.
    pub etag: String,
    /// Object content, encoded per `encoding`.
    pub content: String,
    /// Which encoding `content` uses.
    pub encoding: ContentEncoding,
}
