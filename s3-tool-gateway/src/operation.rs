/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::client::Handle;
use crate::config::Config;
use crate::error::Error;
use crate::validate;

/// Types for the single object upload operation
pub mod upload;

/// Types for the single object download operation
pub mod download;

/// Types for the list operation
pub mod list;

/// Types for the metadata (stat) operation
pub mod stat;

/// Types for the delete operation
pub mod delete;

/// Resolve the target bucket for an operation: an explicit argument is
/// validated as a bucket name, otherwise the configured default applies.
pub(crate) fn resolve_bucket(config: &Config, explicit: Option<&str>) -> Result<String, Error> {
    match explicit {
        Some(bucket) => Ok(validate::validate_bucket_name(bucket)?.to_owned()),
        None => Ok(config.bucket().to_owned()),
    }
}

/// Metadata-only existence probe. A not-found response maps to `false`;
/// any other backend error propagates unchanged.
pub(crate) async fn object_exists(handle: &Handle, bucket: &str, key: &str) -> Result<bool, Error> {
    let result = handle
        .s3_client()
        .await
        .head_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
        Err(err) => Err(err.into()),
    }
}
