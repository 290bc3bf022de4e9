/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_sdk_s3::error::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of gateway errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input validation failed (bad key, bucket name, extension, size, or
    /// payload encoding). Detected before any network call is made.
    Validation,

    /// The upload target already exists and `overwrite` was not requested.
    Conflict,

    /// The requested object (or bucket) does not exist.
    NotFound,

    /// The gateway configuration is incomplete or out of range.
    Config,

    /// Any other failure surfaced by the object store (permissions, network,
    /// throttling, ...). Propagated unclassified; never retried by this layer.
    Backend,
}

impl Error {
    /// Creates a new gateway [`Error`] from a known kind of error as well as
    /// an arbitrary error source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Validation => write!(f, "validation failed"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::NotFound => write!(f, "object not found"),
            ErrorKind::Config => write!(f, "invalid configuration"),
            ErrorKind::Backend => write!(f, "backend error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

pub(crate) fn validation<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Validation, err)
}

pub(crate) fn conflict<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Conflict, err)
}

pub(crate) fn not_found<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::NotFound, err)
}

pub(crate) fn invalid_config<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Config, err)
}

pub(crate) fn backend<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Backend, err)
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some("NotFound" | "NoSuchKey" | "NoSuchBucket") => ErrorKind::NotFound,
            _ => ErrorKind::Backend,
        };

        Error::new(kind, value)
    }
}

impl From<aws_sdk_s3::primitives::ByteStreamError> for Error {
    fn from(value: aws_sdk_s3::primitives::ByteStreamError) -> Self {
        Self::new(ErrorKind::Backend, value)
    }
}
