/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use serde::Serialize;

/// Content type assumed when the caller (or the backend) does not supply one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// How downloaded content is encoded in a [`DownloadOutput`].
///
/// UTF-8 payloads are returned verbatim; anything else falls back to base64.
///
/// [`DownloadOutput`]: crate::operation::download::DownloadOutput
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ContentEncoding {
    /// The content is valid UTF-8 and returned as-is.
    #[serde(rename = "utf-8")]
    Utf8,
    /// The content is base64-encoded raw bytes.
    #[serde(rename = "base64")]
    Base64,
}

impl ContentEncoding {
    /// String form as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Utf8 => "utf-8",
            ContentEncoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
