/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Pure validation of object keys, bucket names, file extensions, and
//! payload sizes. No I/O; the same input always yields the same output.

use std::path::Path;

use path_clean::PathClean;

use crate::error::{self, Error};
use crate::MEBIBYTE;

/// Maximum length of a normalized object key, in characters.
pub const MAX_KEY_LENGTH: usize = 1024;

/// Characters never allowed in a normalized key, in addition to ASCII
/// control characters.
const INVALID_KEY_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Validate an object key against directory traversal and malformed input,
/// returning the normalized key.
///
/// Checks, in order: non-empty, no NUL bytes, no leading `/` or `\` (on the
/// raw input, prior to normalization), no `..` sequence anywhere in the raw
/// input, then normalizes separators to `/` and collapses redundant segments,
/// re-checks the result is still relative, rejects `< > : " | ? *` and
/// control characters, and caps the length at [`MAX_KEY_LENGTH`].
pub fn validate_key(raw: &str) -> Result<String, Error> {
    if raw.is_empty() {
        return Err(error::validation("object key cannot be empty"));
    }

    if raw.contains('\0') {
        return Err(error::validation("object key contains a NUL byte"));
    }

    if raw.starts_with('/') || raw.starts_with('\\') {
        return Err(error::validation(
            "absolute paths are not allowed, use a relative key",
        ));
    }

    // Coarse traversal block: any ".." sequence is rejected regardless of
    // position, before normalization gets a chance to resolve it.
    if raw.contains("..") {
        return Err(error::validation(
            "directory traversal detected: '..' is not allowed in object keys",
        ));
    }

    let normalized = Path::new(&raw.replace('\\', "/"))
        .clean()
        .to_string_lossy()
        .into_owned();

    // defense in depth, normalization must not have produced an absolute path
    if normalized.starts_with('/') {
        return Err(error::validation(
            "object key normalized to an absolute path",
        ));
    }

    if normalized
        .chars()
        .any(|c| INVALID_KEY_CHARS.contains(&c) || (c as u32) < 0x20)
    {
        return Err(error::validation("object key contains invalid characters"));
    }

    if normalized.chars().count() > MAX_KEY_LENGTH {
        return Err(error::validation(format!(
            "object key exceeds the maximum length of {MAX_KEY_LENGTH} characters"
        )));
    }

    Ok(normalized)
}

/// Validate a filename's extension against an optional allowlist.
///
/// With no allowlist every filename passes. Otherwise the extension (text
/// after the last `.`, lower-cased) must be a member of the allowlist;
/// filenames without an extension are rejected whenever an allowlist is
/// present.
pub fn validate_extension(filename: &str, allowed: Option<&[String]>) -> Result<(), Error> {
    let Some(allowed) = allowed else {
        return Ok(());
    };

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty());

    match extension {
        Some(ext) if allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)) => Ok(()),
        Some(ext) => Err(error::validation(format!(
            "extension '.{ext}' is not allowed. Allowed extensions: {}",
            allowed.join(", ")
        ))),
        None => Err(error::validation(format!(
            "files without an extension are not allowed. Allowed extensions: {}",
            allowed.join(", ")
        ))),
    }
}

/// Validate a payload size against the configured ceiling.
///
/// Zero-byte payloads are rejected (negative sizes are unrepresentable).
/// Overflowing the ceiling reports both values in MiB to two decimal places.
pub fn validate_size(size_bytes: u64, max_bytes: u64) -> Result<(), Error> {
    if size_bytes == 0 {
        return Err(error::validation("file size must be a positive number"));
    }

    if size_bytes > max_bytes {
        let as_mib = |bytes: u64| bytes as f64 / MEBIBYTE as f64;
        return Err(error::validation(format!(
            "file size ({:.2} MiB) exceeds the maximum allowed ({:.2} MiB)",
            as_mib(size_bytes),
            as_mib(max_bytes)
        )));
    }

    Ok(())
}

/// Validate an S3 bucket name, returning it unchanged on success.
///
/// Names must be 3-63 characters, contain only lowercase letters, digits,
/// and hyphens, start and end with a letter or digit, and contain no
/// consecutive hyphens.
pub fn validate_bucket_name(name: &str) -> Result<&str, Error> {
    if name.is_empty() {
        return Err(error::validation("bucket name cannot be empty"));
    }

    let len = name.chars().count();
    if !(3..=63).contains(&len) {
        return Err(error::validation(
            "bucket name must be between 3 and 63 characters",
        ));
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let valid_edges =
        name.chars().next().is_some_and(alnum) && name.chars().next_back().is_some_and(alnum);
    if !valid_edges || !name.chars().all(|c| alnum(c) || c == '-') {
        return Err(error::validation(
            "bucket name must contain only lowercase letters, digits and hyphens, \
             and start and end with a letter or digit",
        ));
    }

    if name.contains("--") {
        return Err(error::validation(
            "bucket name cannot contain consecutive hyphens",
        ));
    }

    Ok(name)
}
