/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! S3 Tool Gateway
//!
//! A thin adapter exposing object-storage operations (upload, download,
//! list, stat, delete) as remotely invokable tools, backed by any
//! S3-API-compatible object store. Every operation validates its inputs
//! (keys, bucket names, extensions, sizes) before a single network call is
//! made, and every tool call returns a uniform success/error envelope.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

pub(crate) const MEBIBYTE: u64 = 1024 * 1024;

/// Error types emitted by `s3-tool-gateway`
pub mod error;

/// Common types shared across operations
pub mod types;

/// Pure validation of keys, bucket names, extensions, and sizes
pub mod validate;

/// Gateway configuration
pub mod config;

/// Gateway client
pub mod client;

/// Gateway operations
pub mod operation;

/// Tool adapter: typed requests and the success/error envelope
pub mod tools;

pub use client::Client;
pub use config::{Config, ConfigLoader};

/// Load gateway [`Config`] from the process environment.
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}
