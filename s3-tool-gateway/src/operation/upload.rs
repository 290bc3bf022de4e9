/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::{object_exists, resolve_bucket};
use crate::types::DEFAULT_CONTENT_TYPE;
use crate::validate;

/// Fluent builder for the upload operation, created by
/// [`Client::upload`](crate::client::Client::upload).
#[derive(Debug)]
pub struct UploadFluentBuilder {
    handle: Arc<Handle>,
    key: Option<String>,
    content: Option<Bytes>,
    content_type: Option<String>,
    bucket: Option<String>,
    overwrite: bool,
    is_base64: bool,
}

impl UploadFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            key: None,
            content: None,
            content_type: None,
            bucket: None,
            overwrite: false,
            is_base64: false,
        }
    }

    /// Destination key inside the bucket. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Payload to upload. Text content is taken as UTF-8 bytes; pass a
    /// base64 string and set [`is_base64`](Self::is_base64) for binary data.
    pub fn content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// MIME type stored with the object. Default `application/octet-stream`.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Target bucket. Defaults to the configured bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Allow replacing an existing object. Off by default: uploading over an
    /// existing key fails with a conflict error unless this is set.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Interpret the content as a base64-encoded string and upload the
    /// decoded bytes.
    pub fn is_base64(mut self, is_base64: bool) -> Self {
        self.is_base64 = is_base64;
        self
    }

    /// Validate the request and upload the object.
    ///
    /// NOTE: when `overwrite` is off, the existence probe and the write are
    /// not atomic against concurrent writers; a racing upload can still land
    /// between the check and the put. This window is accepted and documented
    /// rather than mitigated.
    pub async fn send(self) -> Result<UploadOutput, Error> {
        let key = self
            .key
            .ok_or_else(|| error::validation("upload requires a key"))?;
        let content = self
            .content
            .ok_or_else(|| error::validation("upload requires content"))?;
        let content_type = self
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned());

        let bucket = resolve_bucket(&self.handle.config, self.bucket.as_deref())?;
        let key = validate::validate_key(&key)?;
        validate::validate_extension(&key, self.handle.config.allowed_extensions())?;

        let bytes = if self.is_base64 {
            decode_base64(&content)?
        } else {
            content
        };
        validate::validate_size(bytes.len() as u64, self.handle.config.max_file_size_bytes())?;

        if !self.overwrite && object_exists(&self.handle, &bucket, &key).await? {
            return Err(error::conflict(format!(
                "object '{key}' already exists in bucket '{bucket}', pass overwrite=true to replace it"
            )));
        }

        let size_bytes = bytes.len() as u64;
        self.handle
            .s3_client()
            .await
            .put_object()
            .bucket(&bucket)
            .key(&key)
            .content_type(&content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await?;

        tracing::info!(key = %key, bucket = %bucket, size_bytes, "uploaded object");

        Ok(UploadOutput {
            key,
            bucket,
            size_bytes,
            content_type,
            uploaded_at: Utc::now(),
        })
    }
}

fn decode_base64(content: &Bytes) -> Result<Bytes, Error> {
    let text = std::str::from_utf8(content)
        .map_err(|err| error::validation(format!("invalid base64 content: {err}")))?;
    BASE64
        .decode(text)
        .map(Bytes::from)
        .map_err(|err| error::validation(format!("invalid base64 content: {err}")))
}

/// Confirmation record for a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutput {
    /// Normalized key the object was stored under.
    pub key: String,
    /// Bucket the object was stored in.
    pub bucket: String,
    /// Size of the stored payload in bytes.
    pub size_bytes: u64,
    /// MIME type stored with the object.
    pub content_type: String,
    /// Upload timestamp (UTC, taken when the write completed).
    pub uploaded_at: DateTime<Utc>,
}
