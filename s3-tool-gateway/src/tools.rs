/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Tool adapter: maps each gateway operation to an externally invocable
//! command with a uniform success/error envelope.
//!
//! Every tool returns one of two envelope shapes:
//! - success: `{"success": true, "message": ..., "data": ...}`
//! - failure: `{"success": false, "error": <tag>, "message": ...}`
//!
//! No error ever crosses this boundary unwrapped.

use aws_sdk_s3::error::DisplayErrorContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::{Error, ErrorKind};
use crate::types::DEFAULT_CONTENT_TYPE;

/// Machine-readable failure tag carried in the envelope.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    /// Input validation failed, or the target object does not exist.
    ValidationError,
    /// The upload target already exists and overwrite was not requested.
    ConflictError,
    /// Upload failed for any other reason.
    UploadError,
    /// Download failed for any other reason.
    DownloadError,
    /// Listing failed for any other reason.
    ListError,
    /// Metadata fetch failed for any other reason.
    InfoError,
    /// Delete failed for any other reason.
    DeleteError,
}

/// Uniform envelope returned by every tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Failure tag; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorTag>,
    /// Human-readable summary or failure description.
    pub message: String,
    /// Operation result; absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolResponse {
    fn failure(tag: ErrorTag, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(tag),
            message: message.into(),
            data: None,
        }
    }

    fn from_result<T: Serialize>(
        result: Result<T, Error>,
        message: impl FnOnce(&T) -> String,
        fallback: ErrorTag,
    ) -> Self {
        match result {
            Ok(output) => match serde_json::to_value(&output) {
                Ok(data) => Self {
                    success: true,
                    error: None,
                    message: message(&output),
                    data: Some(data),
                },
                Err(err) => Self::failure(fallback, err.to_string()),
            },
            Err(err) => Self::failure(tag_for(&err, fallback), describe(&err)),
        }
    }
}

/// Map an [`Error`] to its envelope tag. Validation and not-found failures
/// share the `validation_error` tag (the external contract of the original
/// server); conflicts get their own tag; everything else, configuration
/// errors included, falls back to the operation-specific tag.
fn tag_for(err: &Error, fallback: ErrorTag) -> ErrorTag {
    match err.kind() {
        ErrorKind::Validation | ErrorKind::NotFound => ErrorTag::ValidationError,
        ErrorKind::Conflict => ErrorTag::ConflictError,
        _ => fallback,
    }
}

fn describe(err: &Error) -> String {
    format!("{}", DisplayErrorContext(err))
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_owned()
}

/// Request for [`upload_file`].
#[derive(Debug, Clone, Deserialize)]
pub struct UploadFileRequest {
    /// Destination key inside the bucket.
    pub key: String,
    /// File content: plain text, or a base64 string with `is_base64`.
    pub content: String,
    /// MIME type of the file.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Target bucket; the configured default when absent.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Allow replacing an existing object.
    #[serde(default)]
    pub overwrite: bool,
    /// Interpret `content` as base64-encoded data.
    #[serde(default)]
    pub is_base64: bool,
}

/// Request for [`download_file`].
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadFileRequest {
    /// Key of the object to fetch.
    pub key: String,
    /// Source bucket; the configured default when absent.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Return the content base64-encoded regardless of its bytes.
    #[serde(default)]
    pub as_base64: bool,
}

/// Request for [`list_files`].
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesRequest {
    /// Key prefix to filter by; empty lists everything.
    #[serde(default)]
    pub prefix: String,
    /// Bucket to list; the configured default when absent.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Cap on the number of entries returned.
    #[serde(default)]
    pub max_keys: Option<i32>,
}

/// Request for [`get_file_info`].
#[derive(Debug, Clone, Deserialize)]
pub struct GetFileInfoRequest {
    /// Key of the object to describe.
    pub key: String,
    /// Bucket to probe; the configured default when absent.
    #[serde(default)]
    pub bucket: Option<String>,
}

/// Request for [`delete_file`].
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteFileRequest {
    /// Key of the object to delete.
    pub key: String,
    /// Bucket to delete from; the configured default when absent.
    #[serde(default)]
    pub bucket: Option<String>,
}

/// Upload a file to the object store.
pub async fn upload_file(client: &Client, req: UploadFileRequest) -> ToolResponse {
    tracing::info!(key = %req.key, overwrite = req.overwrite, "tool invoked: upload_file");

    let mut op = client
        .upload()
        .key(req.key)
        .content(req.content)
        .content_type(req.content_type)
        .overwrite(req.overwrite)
        .is_base64(req.is_base64);
    if let Some(bucket) = req.bucket {
        op = op.bucket(bucket);
    }

    ToolResponse::from_result(
        op.send().await,
        |out| format!("File '{}' uploaded successfully", out.key),
        ErrorTag::UploadError,
    )
}

/// Download a file from the object store.
pub async fn download_file(client: &Client, req: DownloadFileRequest) -> ToolResponse {
    tracing::info!(key = %req.key, as_base64 = req.as_base64, "tool invoked: download_file");

    let mut op = client.download().key(req.key).as_base64(req.as_base64);
    if let Some(bucket) = req.bucket {
        op = op.bucket(bucket);
    }

    ToolResponse::from_result(
        op.send().await,
        |out| format!("File '{}' downloaded successfully", out.key),
        ErrorTag::DownloadError,
    )
}

/// List files in the object store, optionally filtered by prefix.
pub async fn list_files(client: &Client, req: ListFilesRequest) -> ToolResponse {
    tracing::info!(prefix = %req.prefix, "tool invoked: list_files");

    let mut op = client.list();
    if !req.prefix.is_empty() {
        op = op.prefix(req.prefix);
    }
    if let Some(bucket) = req.bucket {
        op = op.bucket(bucket);
    }
    if let Some(max_keys) = req.max_keys {
        op = op.max_keys(max_keys);
    }

    ToolResponse::from_result(
        op.send().await,
        |out| format!("Found {} files", out.total_count),
        ErrorTag::ListError,
    )
}

/// Fetch metadata for a single file.
pub async fn get_file_info(client: &Client, req: GetFileInfoRequest) -> ToolResponse {
    tracing::info!(key = %req.key, "tool invoked: get_file_info");

    let mut op = client.stat().key(req.key);
    if let Some(bucket) = req.bucket {
        op = op.bucket(bucket);
    }

    ToolResponse::from_result(
        op.send().await,
        |out| format!("Retrieved info for file '{}'", out.key),
        ErrorTag::InfoError,
    )
}

/// Delete a file from the object store.
pub async fn delete_file(client: &Client, req: DeleteFileRequest) -> ToolResponse {
    tracing::info!(key = %req.key, "tool invoked: delete_file");

    let mut op = client.delete().key(req.key);
    if let Some(bucket) = req.bucket {
        op = op.bucket(bucket);
    }

    ToolResponse::from_result(
        op.send().await,
        |out| format!("File '{}' deleted successfully", out.key),
        ErrorTag::DeleteError,
    )
}
