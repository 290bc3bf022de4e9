/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::Handle;
use crate::error::{self, Error};
use crate::operation::{object_exists, resolve_bucket};
use crate::validate;

/// Fluent builder for the delete operation, created by
/// [`Client::delete`](crate::client::Client::delete).
#[derive(Debug)]
pub struct DeleteFluentBuilder {
    handle: Arc<Handle>,
    key: Option<String>,
    bucket: Option<String>,
}

impl DeleteFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            key: None,
            bucket: None,
        }
    }

    /// Key of the object to delete. Required.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Bucket to delete from. Defaults to the configured bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Validate the key and delete the object.
    ///
    /// Deleting a nonexistent object is an error, not a silent success: the
    /// operation probes existence first and fails when the object is absent.
    pub async fn send(self) -> Result<DeleteOutput, Error> {
        let key = self
            .key
            .ok_or_else(|| error::validation("delete requires a key"))?;
        let bucket = resolve_bucket(&self.handle.config, self.bucket.as_deref())?;
        let key = validate::validate_key(&key)?;

        if !object_exists(&self.handle, &bucket, &key).await? {
            return Err(error::not_found(format!(
                "object '{key}' not found in bucket '{bucket}'"
            )));
        }

        self.handle
            .s3_client()
            .await
            .delete_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await?;

        tracing::info!(key = %key, bucket = %bucket, "deleted object");

        Ok(DeleteOutput {
            key,
            bucket,
            deleted: true,
            deleted_at: Utc::now(),
        })
    }
}

/// Confirmation record for a completed delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutput {
    /// Normalized key that was deleted.
    pub key: String,
    /// Bucket the object was deleted from.
    pub bucket: String,
    /// Always `true`: a missing object fails the call instead.
    pub deleted: bool,
    /// Deletion timestamp (UTC).
    pub deleted_at: DateTime<Utc>,
}
