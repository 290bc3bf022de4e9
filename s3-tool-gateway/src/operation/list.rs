/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use aws_sdk_s3::primitives::DateTimeFormat;
use serde::Serialize;

use crate::client::Handle;
use crate::error::Error;
use crate::operation::resolve_bucket;
use crate::validate;

/// Fluent builder for the list operation, created by
/// [`Client::list`](crate::client::Client::list).
#[derive(Debug)]
pub struct ListFluentBuilder {
    handle: Arc<Handle>,
    prefix: Option<String>,
    bucket: Option<String>,
    max_keys: Option<i32>,
}

impl ListFluentBuilder {
    pub(crate) fn new(handle: Arc<Handle>) -> Self {
        Self {
            handle,
            prefix: None,
            bucket: None,
            max_keys: None,
        }
    }

    /// Key prefix to scope the listing to a logical subdirectory. A
    /// non-empty prefix passes through the key validator, so
    /// traversal-bearing prefixes are rejected.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Bucket to list. Defaults to the configured bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Maximum number of entries to return, clamped to the configured
    /// ceiling. Non-positive values fall back to the ceiling.
    pub fn max_keys(mut self, max_keys: i32) -> Self {
        self.max_keys = Some(max_keys);
        self
    }

    /// Paginate through the backend listing, accumulating entries until the
    /// listing is exhausted or the clamped limit is reached. Order follows
    /// the backend's native lexicographic key order.
    pub async fn send(self) -> Result<ListOutput, Error> {
        let bucket = resolve_bucket(&self.handle.config, self.bucket.as_deref())?;
        let prefix = match self.prefix.as_deref() {
            None | Some("") => String::new(),
            Some(prefix) => validate::validate_key(prefix)?,
        };

        let ceiling = self.handle.config.max_list_objects();
        let max_keys = self
            .max_keys
            .filter(|requested| *requested > 0)
            .map_or(ceiling, |requested| requested.min(ceiling));

        let client = self.handle.s3_client().await;
        let mut files: Vec<ObjectSummary> = Vec::new();
        let mut total_size: u64 = 0;
        let mut continuation_token: Option<String> = None;

        loop {
            let remaining = max_keys - files.len() as i32;
            let resp = client
                .list_objects_v2()
                .bucket(&bucket)
                .set_prefix((!prefix.is_empty()).then(|| prefix.clone()))
                .max_keys(remaining)
                .set_continuation_token(continuation_token.take())
                .send()
                .await?;

            for obj in resp.contents() {
                let size_bytes = obj.size.unwrap_or_default().max(0) as u64;
                files.push(ObjectSummary {
                    key: obj.key.clone().unwrap_or_default(),
                    size_bytes,
                    last_modified: obj
                        .last_modified
                        .and_then(|ts| ts.fmt(DateTimeFormat::DateTime).ok()),
                    etag: obj
                        .e_tag
                        .as_deref()
                        .unwrap_or_default()
                        .trim_matches('"')
                        .to_owned(),
                    storage_class: obj
                        .storage_class
                        .as_ref()
                        .map(|class| class.as_str().to_owned())
                        .unwrap_or_else(|| "STANDARD".to_owned()),
                });
                total_size += size_bytes;

                if files.len() as i32 >= max_keys {
                    break;
                }
            }

            if files.len() as i32 >= max_keys {
                break;
            }

            let is_truncated = resp.is_truncated.unwrap_or(false);
            match (is_truncated, resp.next_continuation_token) {
                (true, Some(token)) => continuation_token = Some(token),
                _ => break,
            }
        }

        tracing::info!(
            bucket = %bucket,
            prefix = %prefix,
            total_count = files.len(),
            "listed objects"
        );

        Ok(ListOutput {
            bucket,
            prefix,
            total_count: files.len(),
            total_size_bytes: total_size,
            files,
        })
    }
}

/// One listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    /// Object key.
    pub key: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// Last-modified timestamp (RFC3339), when the backend supplies one.
    pub last_modified: Option<String>,
    /// Content fingerprint with surrounding quotes stripped.
    pub etag: String,
    /// Backend storage tier label; `STANDARD` when omitted upstream.
    pub storage_class: String,
}

/// Accumulated listing result.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    /// Bucket that was listed.
    pub bucket: String,
    /// Effective (normalized) prefix the listing was scoped to.
    pub prefix: String,
    /// Number of entries returned.
    pub total_count: usize,
    /// Sum of the sizes of the returned entries, in bytes.
    pub total_size_bytes: u64,
    /// The entries, in the backend's lexicographic key order.
    pub files: Vec<ObjectSummary>,
}
